//! Term rendering with minimal parenthesization
//!
//! Abstractions are parenthesized only when they appear as the left operand
//! of an application; applications and abstractions are parenthesized when
//! they appear as the right operand of an application. The annotated variant
//! additionally brackets the subterms a reduction step freshly inserted, for
//! the rendering collaborator to highlight.

use std::fmt;

use crate::reduce::StepInfo;
use crate::term::{PathStep, Term, TermPath};

/// Where a subterm sits relative to its parent, for parenthesization.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    FunSide,
    ArgSide,
}

fn needs_parens(term: &Term, position: Position) -> bool {
    match position {
        Position::Top => false,
        Position::FunSide => matches!(term, Term::Abstraction(_, _)),
        Position::ArgSide => matches!(term, Term::Abstraction(_, _) | Term::Application(_, _)),
    }
}

/// Render a term, bracketing the fresh copies named by `info`.
///
/// With `info` absent this is identical to the `Display` impl. Marking state
/// is threaded as parameters through the recursive walk rather than stored on
/// the terms themselves.
pub fn pretty_print(term: &Term, info: Option<&StepInfo>) -> String {
    let marks: &[TermPath] = info.map(StepInfo::fresh_paths).unwrap_or(&[]);
    let mut out = String::new();
    let mut path = Vec::new();
    write_term(&mut out, term, Position::Top, &mut path, marks);
    out
}

fn write_term(
    out: &mut String,
    term: &Term,
    position: Position,
    path: &mut TermPath,
    marks: &[TermPath],
) {
    let marked = marks.iter().any(|m| m == path);
    if marked {
        out.push('[');
    }
    let parens = needs_parens(term, position);
    if parens {
        out.push('(');
    }
    match term {
        Term::Variable(name) => out.push_str(name),
        Term::MacroRef(name, _) => out.push_str(name),
        Term::Hole => out.push_str("..."),
        Term::Abstraction(bound, body) => {
            out.push('λ');
            out.push_str(bound);
            out.push_str(". ");
            path.push(PathStep::Body);
            write_term(out, body, Position::Top, path, marks);
            path.pop();
        }
        Term::Application(fun, arg) => {
            path.push(PathStep::Fun);
            write_term(out, fun, Position::FunSide, path, marks);
            path.pop();
            out.push(' ');
            path.push(PathStep::Arg);
            write_term(out, arg, Position::ArgSide, path, marks);
            path.pop();
        }
    }
    if parens {
        out.push(')');
    }
    if marked {
        out.push(']');
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty_print(self, None))
    }
}
