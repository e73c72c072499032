//! # Lambent
//!
//! An interactive evaluator core for the untyped lambda calculus.
//!
//! Lambent parses lambda terms and macro definitions, reduces terms one
//! visible step at a time under a selectable strategy, and records bounded
//! execution traces suitable for step-by-step display. Named macros are
//! precomputed, recompiled in dependency order, and recovered from reduced
//! output by resugaring.
//!
//! ## Architecture
//!
//! - **Term model**: immutable tree of variables, applications, abstractions,
//!   and macro references
//! - **Parser**: recursive descent over a character scanner, resolving macro
//!   names at parse time
//! - **Reduction**: four strategies (call-by-value, call-by-name, normal
//!   order, applicative order) sharing one capture-avoiding substitution
//! - **Driver**: budget-bounded stepping with timeout-aware traces
//! - **Session**: macro table plus configuration, with all-or-nothing macro
//!   definition
//!
//! ## Example
//!
//! ```
//! use lambent::Session;
//!
//! let session = Session::new();
//! let trace = session.eval("(λx. x) (λy. y)")?;
//! assert_eq!(
//!     trace.normal_form().map(ToString::to_string).as_deref(),
//!     Some("λy. y"),
//! );
//! # Ok::<(), lambent::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alpha;
pub mod driver;
pub mod error;
pub mod macros;
pub mod parser;
pub mod reduce;
pub mod scanner;
pub mod session;
pub mod subst;
pub mod term;

// Re-export main types
pub use alpha::is_alpha_equivalent;
pub use driver::{run, StepLabel, Trace, TraceInfo, TraceStep};
pub use error::{Error, MacroError, ParseError, ParseErrorKind, Result};
pub use macros::{resugar, MacroDefinition, MacroTable};
pub use parser::Parser;
pub use reduce::{StepInfo, Strategy};
pub use session::{Session, SessionConfig, DEFAULT_STEP_BUDGET};
pub use term::{flatten_to_match, pretty_print, PathStep, Term, TermPath};

/// Lambent version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
