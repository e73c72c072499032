//! Call-by-value reduction
//!
//! Never reduces under binders. At an application: expand a head macro
//! immediately; otherwise try the left subterm, then the right subterm, then
//! beta once the left is an abstraction. An argument-position macro is only
//! unfolded when its expansion still needs reduction to become a value.

use super::{arg_macro, beta, expand_arg, expand_head, StepInfo};
use crate::term::{PathStep, Term};

/// One call-by-value step, or `None` if `term` is a CBV value.
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
    if let Some((name, expansion)) = arg_macro(arg) {
        return Some(expand_arg(fun, name, expansion));
    }
    if let Some((next, info)) = step(arg) {
        return Some((Term::app((**fun).clone(), next), info.prefixed(PathStep::Arg)));
    }
    if let Term::Abstraction(bound, body) = fun.as_ref() {
        return Some(beta(bound, body, arg));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Term {
        Term::abs(name, Term::var(name))
    }

    #[test]
    fn test_beta_on_values() {
        // (\x. x) (\y. y) -> \y. y
        let term = Term::app(id("x"), id("y"));
        let (next, info) = step(&term).unwrap();
        assert_eq!(next, id("y"));
        assert!(info.is_beta());
    }

    #[test]
    fn test_argument_reduced_before_beta() {
        // (\x. x) ((\y. y) z) reduces the argument first
        let term = Term::app(id("x"), Term::app(id("y"), Term::var("z")));
        let (next, info) = step(&term).unwrap();
        assert_eq!(next, Term::app(id("x"), Term::var("z")));
        assert_eq!(info.fresh_paths(), &[vec![PathStep::Arg]]);
    }

    #[test]
    fn test_no_reduction_under_binders() {
        // \x. (\y. y) x is a CBV value
        let term = Term::abs("x", Term::app(id("y"), Term::var("x")));
        assert!(step(&term).is_none());
    }

    #[test]
    fn test_head_macro_expands_immediately() {
        let term = Term::app(Term::macro_ref("ID", id("x")), Term::var("z"));
        let (next, info) = step(&term).unwrap();
        assert_eq!(next, Term::app(id("x"), Term::var("z")));
        assert!(matches!(info, StepInfo::MacroExpansion { .. }));
    }

    #[test]
    fn test_arg_macro_with_abstraction_expansion_stays_folded() {
        // x ID takes no step: ID's expansion is already a value
        let term = Term::app(Term::var("x"), Term::macro_ref("ID", id("y")));
        assert!(step(&term).is_none());
    }

    #[test]
    fn test_arg_macro_with_application_expansion_unfolds() {
        let redex = Term::app(id("y"), id("z"));
        let term = Term::app(Term::var("x"), Term::macro_ref("M", redex.clone()));
        let (next, _) = step(&term).unwrap();
        assert_eq!(next, Term::app(Term::var("x"), redex));
    }

    #[test]
    fn test_omega_keeps_stepping() {
        // (\x. x x) (\x. x x) steps to itself forever
        let dup = Term::abs("x", Term::app(Term::var("x"), Term::var("x")));
        let omega = Term::app(dup.clone(), dup);
        let (next, _) = step(&omega).unwrap();
        assert_eq!(next, omega);
    }
}
