//! Error types for parsing and macro definition
//!
//! Every failure here is recoverable: a parse error or a rejected macro
//! definition leaves the session in its prior state. Running out of reduction
//! budget is deliberately *not* an error; the execution driver reports it as
//! a trace marker instead.

use thiserror::Error;

/// What went wrong while parsing, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A term was required but the input had none.
    #[error("expected term")]
    ExpectedTerm,

    /// An open parenthesis without a matching close.
    #[error("unbalanced parentheses")]
    UnbalancedParens,

    /// A lambda without a bound variable name.
    #[error("expected variable name after lambda")]
    ExpectedVariable,

    /// A lambda binder without the separating dot.
    #[error("expected dot after variable name")]
    ExpectedDot,

    /// An uppercase identifier with no entry in the macro table.
    #[error("macro {0} undefined")]
    UndefinedMacro(String),

    /// Trailing input after a complete top-level parse.
    #[error("unexpected token")]
    UnexpectedToken,

    /// A macro definition without a leading macro name.
    #[error("expected macro name")]
    ExpectedMacroName,

    /// A macro definition without the `≜` (or `=`) sign.
    #[error("expected ≜ after macro name")]
    ExpectedDefinitionSign,
}

/// A positioned, recoverable parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,

    /// Character offset into the source where the failure was detected.
    pub offset: usize,
}

impl ParseError {
    /// Create a parse error at the given offset.
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// A rejected macro definition. The macro table is rolled back to its
/// pre-attempt snapshot whenever one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    /// The definition body has a free variable.
    #[error("macros must be closed terms: {name} leaves {variable} free")]
    OpenTerm {
        /// Name of the macro being defined.
        name: String,
        /// One of the offending free variables.
        variable: String,
    },

    /// The definition would close a dependency cycle.
    #[error("cannot define circularly dependent macro {name}")]
    CircularDependency {
        /// Name of the macro being defined.
        name: String,
    },

    /// The definition body failed to parse during (re)compilation.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Any recoverable failure surfaced by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parse failure.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A macro definition failure.
    #[error(transparent)]
    Macro(#[from] MacroError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
