//! Applicative-order reduction
//!
//! Reduces under binders: an abstraction's body is driven to normal form
//! before the abstraction can participate in a beta step. At an application:
//! expand a head macro, step the left subterm, beta, and only once the left
//! is fully reduced attempt the right. Macro timing matches normal order.

use super::{arg_macro, beta, expand_arg, expand_head, StepInfo};
use crate::term::{PathStep, Term};

/// One applicative-order step, or `None` if no redex remains.
pub(crate) fn step(term: &Term) -> Option<(Term, StepInfo)> {
    match term {
        Term::Abstraction(bound, body) => {
            let (next, info) = step(body)?;
            Some((
                Term::abs(bound.clone(), next),
                info.prefixed(PathStep::Body),
            ))
        }
        Term::Application(fun, arg) => {
            if let Term::MacroRef(name, expansion) = fun.as_ref() {
                return Some(expand_head(name, expansion, arg));
            }
            if let Some((next, info)) = step(fun) {
                return Some((Term::app(next, (**arg).clone()), info.prefixed(PathStep::Fun)));
            }
            if let Term::Abstraction(bound, body) = fun.as_ref() {
                return Some(beta(bound, body, arg));
            }
            if let Some((name, expansion)) = arg_macro(arg) {
                return Some(expand_arg(fun, name, expansion));
            }
            let (next, info) = step(arg)?;
            Some((
                Term::app((**fun).clone(), next),
                info.prefixed(PathStep::Arg),
            ))
        }
        Term::Variable(_) | Term::MacroRef(_, _) | Term::Hole => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Term {
        Term::abs(name, Term::var(name))
    }

    #[test]
    fn test_function_body_reduced_before_beta() {
        // (\x. (\y. y) x) z first simplifies the function body
        let fun = Term::abs("x", Term::app(id("y"), Term::var("x")));
        let term = Term::app(fun, Term::var("z"));
        let (next, _) = step(&term).unwrap();
        assert_eq!(next, Term::app(id("x"), Term::var("z")));
    }

    #[test]
    fn test_reduces_under_binders() {
        let term = Term::abs("a", Term::abs("b", Term::app(id("y"), Term::var("b"))));
        let (next, info) = step(&term).unwrap();
        assert_eq!(next, Term::abs("a", Term::abs("b", Term::var("b"))));
        assert_eq!(
            info.fresh_paths(),
            &[vec![PathStep::Body, PathStep::Body]]
        );
    }

    #[test]
    fn test_right_attempted_once_left_is_neutral() {
        let term = Term::app(Term::var("x"), Term::app(id("y"), Term::var("z")));
        let (next, _) = step(&term).unwrap();
        assert_eq!(next, Term::app(Term::var("x"), Term::var("z")));
    }

    #[test]
    fn test_beta_once_function_is_normal() {
        let term = Term::app(id("x"), Term::var("w"));
        let (next, info) = step(&term).unwrap();
        assert_eq!(next, Term::var("w"));
        assert!(info.is_beta());
    }
}
