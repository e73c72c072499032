//! Recursive-descent parser for lambda-calculus source text
//!
//! Grammar (PEG-style ordered choice):
//!
//! ```text
//! Expr        := Whitespace (Term Whitespace)+     -- left-associated applications
//! Term        := Dots | Var | MacroName | Abstraction | '(' Expr ')'
//! Var         := [a-z0-9]+
//! MacroName   := [A-Z]+
//! Abstraction := ('\' | 'λ') Whitespace Var Whitespace '.' Whitespace Expr
//! Dots        := '...'
//! Definition  := Whitespace MacroName Whitespace ('≜' | '=') Expr
//! ```
//!
//! A lowercase identifier is always a variable; an uppercase identifier is
//! always resolved immediately against the macro table, erroring when absent.

use crate::error::{ParseError, ParseErrorKind};
use crate::macros::MacroTable;
use crate::reduce::Strategy;
use crate::scanner::Scanner;
use crate::term::Term;

fn is_var_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn is_macro_char(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Parser over one piece of source text, resolving macro names against a
/// table under the active strategy.
pub struct Parser<'a> {
    scanner: Scanner,
    table: &'a MacroTable,
    strategy: Strategy,
}

impl<'a> Parser<'a> {
    /// Create a parser for `input`.
    pub fn new(input: &str, table: &'a MacroTable, strategy: Strategy) -> Self {
        Self {
            scanner: Scanner::new(input),
            table,
            strategy,
        }
    }

    /// Parse a complete top-level expression.
    ///
    /// Blank input is a valid empty parse (`Ok(None)`); anything left over
    /// after a complete expression is an `unexpected token` error.
    pub fn parse_expression(mut self) -> Result<Option<Term>, ParseError> {
        self.scanner.skip_whitespace();
        if self.scanner.is_done() {
            return Ok(None);
        }
        let term = self.expr()?;
        self.scanner.skip_whitespace();
        if !self.scanner.is_done() {
            return Err(self.scanner.error(ParseErrorKind::UnexpectedToken));
        }
        Ok(Some(term))
    }

    /// Parse a macro definition `NAME ≜ expr`.
    ///
    /// Returns the macro name, the literal body text (kept for later
    /// recompilation), and the parsed body.
    pub fn parse_definition(mut self) -> Result<(String, String, Term), ParseError> {
        self.scanner.skip_whitespace();
        let name = self
            .scanner
            .scan_while(is_macro_char)
            .ok_or_else(|| self.scanner.error(ParseErrorKind::ExpectedMacroName))?;
        self.scanner.skip_whitespace();
        if !(self.scanner.scan("≜") || self.scanner.scan("=")) {
            return Err(self.scanner.error(ParseErrorKind::ExpectedDefinitionSign));
        }
        let source_text = self.scanner.remainder();
        self.scanner.skip_whitespace();
        if self.scanner.is_done() {
            return Err(self.scanner.error(ParseErrorKind::ExpectedTerm));
        }
        let body = self.expr()?;
        self.scanner.skip_whitespace();
        if !self.scanner.is_done() {
            return Err(self.scanner.error(ParseErrorKind::UnexpectedToken));
        }
        Ok((name, source_text, body))
    }

    /// `Expr`: one or more terms, left-associated into an application chain.
    fn expr(&mut self) -> Result<Term, ParseError> {
        self.scanner.skip_whitespace();
        let mut terms = Vec::new();
        while let Some(term) = self.term()? {
            terms.push(term);
            self.scanner.skip_whitespace();
        }
        let mut terms = terms.into_iter();
        let Some(first) = terms.next() else {
            return Err(self.scanner.error(ParseErrorKind::ExpectedTerm));
        };
        Ok(terms.fold(first, Term::app))
    }

    /// `Term`: one atom, or `None` when the input cannot start a term here.
    fn term(&mut self) -> Result<Option<Term>, ParseError> {
        if self.scanner.scan("...") {
            return Ok(Some(Term::Hole));
        }
        if let Some(name) = self.scanner.scan_while(is_var_char) {
            return Ok(Some(Term::var(name)));
        }
        let macro_start = self.scanner.offset();
        if let Some(name) = self.scanner.scan_while(is_macro_char) {
            let def = self.table.get(&name).ok_or(ParseError::new(
                ParseErrorKind::UndefinedMacro(name.clone()),
                macro_start,
            ))?;
            let expansion = def.value_for(self.strategy).clone();
            return Ok(Some(Term::macro_ref(name, expansion)));
        }
        if self.scanner.scan("\\") || self.scanner.scan("λ") {
            self.scanner.skip_whitespace();
            let bound = self
                .scanner
                .scan_while(is_var_char)
                .ok_or_else(|| self.scanner.error(ParseErrorKind::ExpectedVariable))?;
            self.scanner.skip_whitespace();
            if !self.scanner.scan(".") {
                return Err(self.scanner.error(ParseErrorKind::ExpectedDot));
            }
            let body = self.expr()?;
            return Ok(Some(Term::abs(bound, body)));
        }
        if self.scanner.scan("(") {
            let inner = self.expr()?;
            self.scanner.skip_whitespace();
            if !self.scanner.scan(")") {
                return Err(self.scanner.error(ParseErrorKind::UnbalancedParens));
            }
            return Ok(Some(inner));
        }
        Ok(None)
    }
}
