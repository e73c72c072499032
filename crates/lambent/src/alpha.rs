//! Alpha-equivalence of closed terms
//!
//! Bound variables are compared by binder depth, de Bruijn style, so names
//! never matter. Macro references are transparently unfolded on both sides
//! before comparison. Open terms are never equivalent to anything.

use crate::term::Term;

/// Whether two closed terms are equal up to consistent renaming of bound
/// variables. Returns `false` when either term is open.
pub fn is_alpha_equivalent(a: &Term, b: &Term) -> bool {
    if !a.is_closed() || !b.is_closed() {
        return false;
    }
    equivalent(a, b, &mut Vec::new(), &mut Vec::new())
}

fn equivalent(
    a: &Term,
    b: &Term,
    binders_a: &mut Vec<String>,
    binders_b: &mut Vec<String>,
) -> bool {
    match (a, b) {
        // Strip macro layers so each boundary compares as if absent.
        (Term::MacroRef(_, expansion), _) => equivalent(expansion, b, binders_a, binders_b),
        (_, Term::MacroRef(_, expansion)) => equivalent(a, expansion, binders_a, binders_b),

        (Term::Variable(x), Term::Variable(y)) => {
            match (binder_depth(binders_a, x), binder_depth(binders_b, y)) {
                (Some(i), Some(j)) => i == j,
                _ => false,
            }
        }
        (Term::Application(f1, a1), Term::Application(f2, a2)) => {
            equivalent(f1, f2, binders_a, binders_b) && equivalent(a1, a2, binders_a, binders_b)
        }
        (Term::Abstraction(x, body_a), Term::Abstraction(y, body_b)) => {
            binders_a.push(x.clone());
            binders_b.push(y.clone());
            let result = equivalent(body_a, body_b, binders_a, binders_b);
            binders_a.pop();
            binders_b.pop();
            result
        }
        (Term::Hole, Term::Hole) => true,
        _ => false,
    }
}

/// Distance to the nearest enclosing binder of `name`, so shadowing picks
/// the innermost one.
fn binder_depth(binders: &[String], name: &str) -> Option<usize> {
    binders.iter().rev().position(|b| b == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Term {
        Term::abs(name, Term::var(name))
    }

    #[test]
    fn test_renamed_binders_are_equivalent() {
        assert!(is_alpha_equivalent(&id("x"), &id("y")));
    }

    #[test]
    fn test_different_binding_structure_is_not() {
        // \a. \b. a vs \a. \b. b
        let first = Term::abs("a", Term::abs("b", Term::var("a")));
        let second = Term::abs("a", Term::abs("b", Term::var("b")));
        assert!(!is_alpha_equivalent(&first, &second));
    }

    #[test]
    fn test_shadow_renaming_is_equivalent() {
        // \a. \b. b vs \a. \a. a
        let first = Term::abs("a", Term::abs("b", Term::var("b")));
        let second = Term::abs("a", Term::abs("a", Term::var("a")));
        assert!(is_alpha_equivalent(&first, &second));
    }

    #[test]
    fn test_open_terms_never_equivalent() {
        let open = Term::var("x");
        assert!(!is_alpha_equivalent(&open, &open));
        assert!(!is_alpha_equivalent(&Term::abs("y", Term::var("x")), &id("x")));
    }

    #[test]
    fn test_macro_layers_are_transparent() {
        let wrapped = Term::macro_ref("ID", id("x"));
        assert!(is_alpha_equivalent(&wrapped, &id("z")));
        assert!(is_alpha_equivalent(&id("z"), &wrapped));
        assert!(is_alpha_equivalent(&wrapped, &wrapped));
    }

    #[test]
    fn test_mismatched_shapes_are_not_equivalent() {
        let abs = id("x");
        let app = Term::app(id("x"), id("y"));
        assert!(!is_alpha_equivalent(&abs, &app));
    }

    #[test]
    fn test_symmetry_and_transitivity_on_examples() {
        let a = id("x");
        let b = id("y");
        let c = id("z");
        assert!(is_alpha_equivalent(&a, &b) && is_alpha_equivalent(&b, &a));
        assert!(is_alpha_equivalent(&b, &c) && is_alpha_equivalent(&a, &c));
    }
}
