//! Capture-avoiding substitution and variable renaming
//!
//! Foundational to every reduction strategy. Besides the substituted term,
//! [`substitute`] reports the exact positions where copies of the value were
//! inserted; the rendering collaborator highlights those, so the set must be
//! precise: every direct copy-insertion point and nothing else.

use std::collections::HashSet;

use crate::term::{PathStep, Term, TermPath};

/// Compute `body[value/name]`, renaming binders as needed to avoid capture.
///
/// Returns the substituted term and the paths (relative to it) of every
/// freshly inserted copy of `value`.
pub fn substitute(body: &Term, value: &Term, name: &str) -> (Term, Vec<TermPath>) {
    match body {
        Term::Variable(var) if var == name => (value.clone(), vec![Vec::new()]),
        Term::Variable(_) => (body.clone(), Vec::new()),

        Term::Application(fun, arg) => {
            let (fun, mut paths) = substitute(fun, value, name);
            for path in &mut paths {
                path.insert(0, PathStep::Fun);
            }
            let (arg, arg_paths) = substitute(arg, value, name);
            for mut path in arg_paths {
                path.insert(0, PathStep::Arg);
                paths.push(path);
            }
            (Term::app(fun, arg), paths)
        }

        // The inner binder shadows the substituted name.
        Term::Abstraction(bound, _) if bound == name => (body.clone(), Vec::new()),

        Term::Abstraction(bound, inner) => {
            let free_in_value = value.free_vars();
            if free_in_value.contains(bound) {
                // Substituting under this binder would capture the free
                // occurrence of `bound` inside the value. Rename the binder
                // first, then substitute into the renamed body.
                let mut avoid = free_in_value;
                avoid.insert(name.to_string());
                let fresh = fresh_name(bound, &avoid);
                let renamed = rename(inner, bound, &fresh);
                let (inner, mut paths) = substitute(&renamed, value, name);
                for path in &mut paths {
                    path.insert(0, PathStep::Body);
                }
                (Term::abs(fresh, inner), paths)
            } else {
                let (inner, mut paths) = substitute(inner, value, name);
                for path in &mut paths {
                    path.insert(0, PathStep::Body);
                }
                (Term::abs(bound.clone(), inner), paths)
            }
        }

        // Macros are closed, so there is nothing to substitute into.
        // A no-op by invariant, not an optimization.
        Term::MacroRef(_, _) | Term::Hole => (body.clone(), Vec::new()),
    }
}

/// Rename free occurrences of `old` to `new`, respecting shadowing.
pub fn rename(term: &Term, old: &str, new: &str) -> Term {
    match term {
        Term::Variable(var) if var == old => Term::var(new),
        Term::Variable(_) => term.clone(),
        Term::Application(fun, arg) => Term::app(rename(fun, old, new), rename(arg, old, new)),
        Term::Abstraction(bound, _) if bound == old => term.clone(),
        Term::Abstraction(bound, body) => Term::abs(bound.clone(), rename(body, old, new)),
        Term::MacroRef(_, _) | Term::Hole => term.clone(),
    }
}

/// Deterministic fresh-name generation: append an increasing numeric suffix
/// to `base` until the result avoids the given set.
///
/// This can collide with user-chosen names that already carry a numeric
/// suffix; an accepted limitation.
fn fresh_name(base: &str, avoid: &HashSet<String>) -> String {
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if !avoid.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
