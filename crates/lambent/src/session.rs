//! Interactive session state
//!
//! One session owns the macro table and the evaluation configuration. All
//! execution is single-threaded and synchronous; the step budget is the only
//! cancellation mechanism. Macro-definition failures restore the table from
//! a pre-attempt snapshot, so a failed attempt never leaks a partial update.

use crate::driver::{run, Trace};
use crate::error::{Error, MacroError, ParseError};
use crate::macros::{resugar, MacroDefinition, MacroTable};
use crate::parser::Parser;
use crate::reduce::{StepInfo, Strategy};
use crate::term::Term;

/// Default step budget for a run.
pub const DEFAULT_STEP_BUDGET: usize = 100;

/// Configuration for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum reduction steps per run.
    pub step_budget: usize,

    /// The active evaluation strategy.
    pub strategy: Strategy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_budget: DEFAULT_STEP_BUDGET,
            strategy: Strategy::NormalOrder,
        }
    }
}

impl SessionConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step budget.
    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.step_budget = budget;
        self
    }

    /// Set the evaluation strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// An interactive evaluation session: the macro table plus configuration.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: MacroTable,
    config: SessionConfig,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            table: MacroTable::new(),
            config,
        }
    }

    /// The active evaluation strategy.
    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    /// Switch the evaluation strategy. Later parses resolve macros under
    /// the new strategy; existing terms are unaffected.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.config.strategy = strategy;
    }

    /// The configured step budget.
    pub fn step_budget(&self) -> usize {
        self.config.step_budget
    }

    /// Change the step budget.
    pub fn set_step_budget(&mut self, budget: usize) {
        self.config.step_budget = budget;
    }

    /// Read access to the macro table.
    pub fn macro_table(&self) -> &MacroTable {
        &self.table
    }

    /// Parse an expression, resolving macros under the active strategy.
    /// Blank input is a valid empty parse.
    pub fn parse(&self, source: &str) -> Result<Option<Term>, ParseError> {
        Parser::new(source, &self.table, self.config.strategy).parse_expression()
    }

    /// Define (or redefine) a macro from `NAME ≜ expr` source text.
    ///
    /// The body must be closed. The whole table is recompiled in dependency
    /// order so dependents see the new definition; on any failure the table
    /// is restored to its pre-attempt snapshot. Returns the macro's name and
    /// the trace produced while precomputing its value.
    pub fn define_macro(&mut self, source: &str) -> Result<(String, Trace), Error> {
        let (name, source_text, body) =
            Parser::new(source, &self.table, self.config.strategy).parse_definition()?;
        let mut free: Vec<String> = body.free_vars().into_iter().collect();
        free.sort();
        if let Some(variable) = free.into_iter().next() {
            return Err(MacroError::OpenTerm { name, variable }.into());
        }
        let snapshot = self.table.clone();
        self.table
            .insert_source(name.clone(), source_text, body);
        match self
            .table
            .recompile(self.config.step_budget, self.config.strategy)
        {
            Ok(mut traces) => {
                let trace = traces.shift_remove(&name).unwrap_or_default();
                Ok((name, trace))
            }
            Err(err) => {
                self.table = snapshot;
                Err(err.into())
            }
        }
    }

    /// Run a term to completion (or budget exhaustion) under the active
    /// strategy.
    pub fn run(&self, term: Term) -> Trace {
        run(Some(term), self.config.step_budget, self.config.strategy)
    }

    /// Run a term under an explicit strategy and budget.
    pub fn run_with(&self, term: Term, strategy: Strategy, budget: usize) -> Trace {
        run(Some(term), budget, strategy)
    }

    /// Parse and run in one call.
    pub fn eval(&self, source: &str) -> Result<Trace, ParseError> {
        let term = self.parse(source)?;
        Ok(run(term, self.config.step_budget, self.config.strategy))
    }

    /// One reduction step under the active strategy.
    pub fn step(&self, term: &Term) -> Option<(Term, StepInfo)> {
        self.config.strategy.step(term)
    }

    /// The macro definitions, topologically sorted by dependency for
    /// display. Recompiles the table first, as every display does; a failed
    /// recompile restores the pre-call table, the same all-or-nothing
    /// behavior as [`Session::define_macro`].
    pub fn macros_in_dependency_order(&mut self) -> Result<Vec<&MacroDefinition>, Error> {
        let snapshot = self.table.clone();
        if let Err(err) = self
            .table
            .recompile(self.config.step_budget, self.config.strategy)
        {
            self.table = snapshot;
            return Err(err.into());
        }
        Ok(self.table.in_dependency_order()?)
    }

    /// Replace reduced subterms with equivalent macro references.
    pub fn resugar(&self, term: &Term) -> (Term, bool) {
        resugar(term, &self.table, self.config.strategy)
    }
}
