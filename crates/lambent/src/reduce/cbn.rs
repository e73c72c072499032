//! Call-by-name reduction
//!
//! Never reduces under binders and never touches the argument before
//! substitution: expand a head macro, otherwise step the left subterm,
//! otherwise beta.

use super::{beta, expand_head, StepInfo};
use crate::term::{PathStep, Term};

/// One call-by-name step, or `None` if `term` is a CBN value.
pub(crate) fn step(term: &Term) -> Option<(Term, StepInfo)> {
    let Term::Application(fun, arg) = term else {
        return None;
    };
    if let Term::MacroRef(name, expansion) = fun.as_ref() {
        return Some(expand_head(name, expansion, arg));
    }
    if let Some((next, info)) = step(fun) {
        return Some((Term::app(next, (**arg).clone()), info.prefixed(PathStep::Fun)));
    }
    if let Term::Abstraction(bound, body) = fun.as_ref() {
        return Some(beta(bound, body, arg));
    }
    None
}
