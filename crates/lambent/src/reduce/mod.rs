//! Single-step reduction strategies
//!
//! All four strategies share one contract: `step` returns the stepped term
//! together with a [`StepInfo`] describing what happened, or `None` when the
//! input is a value under that strategy. "No step" is a normal terminal
//! condition, never an error. None of the strategies bounds non-termination;
//! that is the execution driver's job.
//!
//! The strategies differ only in traversal order and macro-expansion timing:
//!
//! | Strategy          | Under binders? | Order                         |
//! |-------------------|----------------|-------------------------------|
//! | Call-by-value     | no             | head macro, left, right, beta |
//! | Call-by-name      | no             | head macro, left, beta        |
//! | Normal order      | yes            | head macro, beta, left, right |
//! | Applicative order | yes            | head macro, left, beta, right |

pub mod applicative;
pub mod cbn;
pub mod cbv;
pub mod normal;

use crate::subst::substitute;
use crate::term::{PathStep, Term, TermPath};

/// Which reduction strategy drives the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Reduce the argument to a value before substituting; never under binders.
    CallByValue,
    /// Substitute the argument unevaluated; never under binders.
    CallByName,
    /// Leftmost-outermost; finds a normal form whenever one exists.
    NormalOrder,
    /// Reduce under binders, innermost function bodies first.
    ApplicativeOrder,
}

impl Strategy {
    /// Attempt one reduction step on `term` under this strategy.
    pub fn step(&self, term: &Term) -> Option<(Term, StepInfo)> {
        match self {
            Strategy::CallByValue => cbv::step(term),
            Strategy::CallByName => cbn::step(term),
            Strategy::NormalOrder => normal::step(term),
            Strategy::ApplicativeOrder => applicative::step(term),
        }
    }

    /// Human-readable strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::CallByValue => "call-by-value",
            Strategy::CallByName => "call-by-name",
            Strategy::NormalOrder => "normal order",
            Strategy::ApplicativeOrder => "applicative order",
        }
    }
}

/// Description of the most recently applied step.
///
/// The rendering collaborator uses this to highlight what changed; reduction
/// itself never reads it back. Paths are relative to the stepped term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInfo {
    /// A beta-reduction `(λv. body) arg → body[arg/v]`.
    Beta {
        /// The bound variable that was substituted away.
        bound_var: String,
        /// Positions of every freshly inserted copy of the argument.
        substituted: Vec<TermPath>,
    },

    /// A macro reference unfolded into its cached expansion. Distinct from a
    /// beta step; the driver labels it with `=` rather than `→`.
    MacroExpansion {
        /// Name of the expanded macro.
        name: String,
        /// Position of the inserted expansion.
        path: TermPath,
    },
}

impl StepInfo {
    /// Re-root this info one level deeper, after the step bubbled out of the
    /// given branch of an enclosing term.
    pub fn prefixed(self, step: PathStep) -> Self {
        match self {
            StepInfo::Beta {
                bound_var,
                mut substituted,
            } => {
                for path in &mut substituted {
                    path.insert(0, step);
                }
                StepInfo::Beta {
                    bound_var,
                    substituted,
                }
            }
            StepInfo::MacroExpansion { name, mut path } => {
                path.insert(0, step);
                StepInfo::MacroExpansion { name, path }
            }
        }
    }

    /// The positions of the subterms this step freshly inserted.
    pub fn fresh_paths(&self) -> &[TermPath] {
        match self {
            StepInfo::Beta { substituted, .. } => substituted,
            StepInfo::MacroExpansion { path, .. } => std::slice::from_ref(path),
        }
    }

    /// Whether this step was a beta-reduction.
    pub fn is_beta(&self) -> bool {
        matches!(self, StepInfo::Beta { .. })
    }
}

/// The common beta rule: `App(Abstraction(bound, body), arg)` steps to
/// `body[arg/bound]`, marking every inserted copy of the argument.
pub(crate) fn beta(bound: &str, body: &Term, arg: &Term) -> (Term, StepInfo) {
    let (result, substituted) = substitute(body, arg, bound);
    (
        result,
        StepInfo::Beta {
            bound_var: bound.to_string(),
            substituted,
        },
    )
}

/// Unfold a macro reference at the application head.
pub(crate) fn expand_head(name: &str, expansion: &Term, arg: &Term) -> (Term, StepInfo) {
    (
        Term::app(expansion.clone(), arg.clone()),
        StepInfo::MacroExpansion {
            name: name.to_string(),
            path: vec![PathStep::Fun],
        },
    )
}

/// Unfold a macro reference on the argument side.
pub(crate) fn expand_arg(fun: &Term, name: &str, expansion: &Term) -> (Term, StepInfo) {
    (
        Term::app(fun.clone(), expansion.clone()),
        StepInfo::MacroExpansion {
            name: name.to_string(),
            path: vec![PathStep::Arg],
        },
    )
}

/// The ad hoc right-hand macro rule shared by CBV, normal, and applicative
/// order: an argument-position macro is unfolded only when its cached
/// expansion is itself an application (needs further reduction for
/// value-hood). Preserved exactly for trace compatibility.
pub(crate) fn arg_macro(arg: &Term) -> Option<(&str, &Term)> {
    match arg {
        Term::MacroRef(name, expansion)
            if matches!(expansion.as_ref(), Term::Application(_, _)) =>
        {
            Some((name, expansion))
        }
        _ => None,
    }
}
