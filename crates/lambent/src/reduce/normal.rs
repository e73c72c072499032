//! Normal-order reduction
//!
//! Reduces the leftmost-outermost redex first, which finds a normal form
//! whenever one exists. Under binders and for right-hand sides it delegates
//! to applicative-order reduction, matching the traces the original
//! interactive tool produced.

use super::{applicative, arg_macro, beta, expand_arg, expand_head, StepInfo};
use crate::term::{PathStep, Term};

/// One normal-order step, or `None` if `term` is in normal form.
pub(crate) fn step(term: &Term) -> Option<(Term, StepInfo)> {
    match term {
        Term::Abstraction(bound, body) => {
            let (next, info) = applicative::step(body)?;
            Some((
                Term::abs(bound.clone(), next),
                info.prefixed(PathStep::Body),
            ))
        }
        Term::Application(fun, arg) => {
            if let Term::MacroRef(name, expansion) = fun.as_ref() {
                return Some(expand_head(name, expansion, arg));
            }
            if let Term::Abstraction(bound, body) = fun.as_ref() {
                return Some(beta(bound, body, arg));
            }
            if let Some((next, info)) = step(fun) {
                return Some((Term::app(next, (**arg).clone()), info.prefixed(PathStep::Fun)));
            }
            if let Some((name, expansion)) = arg_macro(arg) {
                return Some(expand_arg(fun, name, expansion));
            }
            let (next, info) = applicative::step(arg)?;
            Some((
                Term::app((**fun).clone(), next),
                info.prefixed(PathStep::Arg),
            ))
        }
        Term::Variable(_) | Term::MacroRef(_, _) | Term::Hole => None,
    }
}
