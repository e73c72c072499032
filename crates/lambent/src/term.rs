//! Lambda-calculus term representation
//!
//! Terms form a closed sum type; every component of the crate matches on it
//! exhaustively, so adding a variant is a compile-time-checked change across
//! the parser, the substitution engine, and all four reduction strategies.

mod display;

pub use display::pretty_print;

use std::collections::HashSet;

/// A lambda-calculus term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A free or bound identifier.
    Variable(String),

    /// Juxtaposition of a function term and an argument term.
    Application(Box<Term>, Box<Term>),

    /// Binds a name inside a body. Shadowing by nested abstractions with
    /// the same name is legal; the inner binder wins.
    Abstraction(String, Box<Term>),

    /// A reference to a previously defined, named, closed term.
    ///
    /// Carries its own cached expansion so reduction can unfold it without
    /// a table lookup. The expansion is closed by construction: closedness
    /// is enforced when a macro is defined and never rechecked here.
    MacroRef(String, Box<Term>),

    /// The `...` placeholder for partial or guessed input.
    Hole,
}

/// One branch choice on the way down into a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Into the function side of an application.
    Fun,
    /// Into the argument side of an application.
    Arg,
    /// Into the body of an abstraction.
    Body,
}

/// A position inside a term, as the list of branch choices from the root.
///
/// Paths stand in for the object identity the rendering layer needs when it
/// highlights freshly substituted copies; an empty path is the term itself.
pub type TermPath = Vec<PathStep>;

impl Term {
    /// Construct a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    /// Construct an application term.
    pub fn app(fun: Term, arg: Term) -> Self {
        Term::Application(Box::new(fun), Box::new(arg))
    }

    /// Construct an abstraction term.
    pub fn abs(bound: impl Into<String>, body: Term) -> Self {
        Term::Abstraction(bound.into(), Box::new(body))
    }

    /// Construct a macro reference carrying its cached expansion.
    pub fn macro_ref(name: impl Into<String>, expansion: Term) -> Self {
        Term::MacroRef(name.into(), Box::new(expansion))
    }

    /// Collect the free variables of this term.
    pub fn free_vars(&self) -> HashSet<String> {
        let mut vars = HashSet::new();
        self.collect_free_vars(&mut Vec::new(), &mut vars);
        vars
    }

    fn collect_free_vars(&self, bound: &mut Vec<String>, out: &mut HashSet<String>) {
        match self {
            Term::Variable(name) => {
                if !bound.iter().any(|b| b == name) {
                    out.insert(name.clone());
                }
            }
            Term::Application(fun, arg) => {
                fun.collect_free_vars(bound, out);
                arg.collect_free_vars(bound, out);
            }
            Term::Abstraction(name, body) => {
                bound.push(name.clone());
                body.collect_free_vars(bound, out);
                bound.pop();
            }
            // Macro expansions are closed by invariant.
            Term::MacroRef(_, _) | Term::Hole => {}
        }
    }

    /// Whether this term has no free variables.
    pub fn is_closed(&self) -> bool {
        self.free_vars().is_empty()
    }

    /// Collect the names of every macro referenced anywhere in this term.
    pub fn macro_refs(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_macro_refs(&mut names);
        names
    }

    fn collect_macro_refs(&self, out: &mut Vec<String>) {
        match self {
            Term::MacroRef(name, _) => {
                if !out.iter().any(|n| n == name) {
                    out.push(name.clone());
                }
            }
            Term::Application(fun, arg) => {
                fun.collect_macro_refs(out);
                arg.collect_macro_refs(out);
            }
            Term::Abstraction(_, body) => body.collect_macro_refs(out),
            Term::Variable(_) | Term::Hole => {}
        }
    }
}

/// Collapse the parts of `source` that a partially-elided `target` leaves out.
///
/// Wherever `target` has a [`Term::Hole`], the corresponding part of `source`
/// becomes a hole; where the two shapes agree the walk descends; anywhere the
/// shapes diverge, `source` is kept as-is. This supports the interactive
/// "guess the next step" mode, which compares a real term against a
/// user-sketched shape.
pub fn flatten_to_match(source: &Term, target: &Term) -> Term {
    match (source, target) {
        (_, Term::Hole) => Term::Hole,
        (Term::Application(fun, arg), Term::Application(tfun, targ)) => {
            Term::app(flatten_to_match(fun, tfun), flatten_to_match(arg, targ))
        }
        (Term::Abstraction(bound, body), Term::Abstraction(_, tbody)) => {
            Term::abs(bound.clone(), flatten_to_match(body, tbody))
        }
        _ => source.clone(),
    }
}
