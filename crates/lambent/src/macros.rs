//! Macro definitions, precomputation, and dependency-ordered recompilation
//!
//! Macros are named, closed terms. When one is defined the subsystem tries
//! to precompute its normal form under normal-order reduction (valid for
//! every strategy); failing that, call-by-value and call-by-name values are
//! attempted separately. Because a macro's unreduced body may reference other
//! macros, the whole table is recompiled in dependency order whenever any
//! definition changes, so later macros always embed the current, fully
//! resolved expansions of earlier ones.

use indexmap::IndexMap;

use crate::alpha::is_alpha_equivalent;
use crate::driver::{run, Trace};
use crate::error::{MacroError, ParseErrorKind};
use crate::parser::Parser;
use crate::reduce::Strategy;
use crate::term::Term;

/// A named macro and its precomputed values.
///
/// At most one of the normal-form fields is meaningful for a given
/// evaluation strategy; `full_normal_form` takes priority everywhere because
/// normal order finds a normal form whenever one exists. Definitions are
/// recomputed wholesale on recompilation, never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    /// Uppercase macro name.
    pub name: String,

    /// The literal definition text, kept for recompilation.
    pub source_text: String,

    /// The parsed, unreduced definition body.
    pub source: Term,

    /// Normal form found by normal-order reduction, valid for any strategy.
    pub full_normal_form: Option<Term>,

    /// Value found by call-by-value reduction, when normal order timed out.
    pub cbv_value: Option<Term>,

    /// Value found by call-by-name reduction, when normal order timed out.
    pub cbn_value: Option<Term>,
}

impl MacroDefinition {
    /// The precomputed value to use under `strategy`, if any was stored.
    pub fn stored_value(&self, strategy: Strategy) -> Option<&Term> {
        self.full_normal_form.as_ref().or(match strategy {
            Strategy::CallByValue => self.cbv_value.as_ref(),
            Strategy::CallByName => self.cbn_value.as_ref(),
            Strategy::NormalOrder | Strategy::ApplicativeOrder => None,
        })
    }

    /// The term a parse of this macro's name should expand to: the full
    /// normal form, else the strategy's precomputed value, else the literal
    /// unreduced source. The same macro token can therefore parse to
    /// different terms under different strategies, keeping visible traces
    /// strategy-consistent.
    pub fn value_for(&self, strategy: Strategy) -> &Term {
        self.stored_value(strategy).unwrap_or(&self.source)
    }

    /// Names of the macros this definition's unreduced body references.
    pub fn dependencies(&self) -> Vec<String> {
        self.source.macro_refs()
    }
}

/// The session's mapping from macro name to definition.
///
/// Keys are unique; insertion order is irrelevant for lookup but the table
/// presents itself topologically sorted by dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    macros: IndexMap<String, MacroDefinition>,
}

impl MacroTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a macro by name.
    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(name)
    }

    /// Whether a macro with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Number of defined macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// All macro names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.macros.keys().cloned().collect()
    }

    /// Insert or replace a definition with no precomputed values yet.
    /// [`MacroTable::recompile`] fills them in.
    pub fn insert_source(&mut self, name: String, source_text: String, source: Term) {
        self.macros.insert(
            name.clone(),
            MacroDefinition {
                name,
                source_text,
                source,
                full_normal_form: None,
                cbv_value: None,
                cbn_value: None,
            },
        );
    }

    /// Macro names topologically sorted by the "depends on" relation:
    /// dependencies sort before their dependents.
    ///
    /// A cycle is a fatal definition error.
    pub fn dependency_order(&self) -> Result<Vec<String>, MacroError> {
        let mut order = Vec::with_capacity(self.macros.len());
        let mut visiting = Vec::new();
        for name in self.macros.keys() {
            self.visit(name, &mut visiting, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        name: &str,
        visiting: &mut Vec<String>,
        order: &mut Vec<String>,
    ) -> Result<(), MacroError> {
        if order.iter().any(|n| n == name) {
            return Ok(());
        }
        if visiting.iter().any(|n| n == name) {
            return Err(MacroError::CircularDependency {
                name: name.to_string(),
            });
        }
        let Some(def) = self.macros.get(name) else {
            return Ok(());
        };
        visiting.push(name.to_string());
        for dep in def.dependencies() {
            self.visit(&dep, visiting, order)?;
        }
        visiting.pop();
        order.push(name.to_string());
        Ok(())
    }

    /// Definitions in dependency order, for display.
    pub fn in_dependency_order(&self) -> Result<Vec<&MacroDefinition>, MacroError> {
        let order = self.dependency_order()?;
        Ok(order.iter().filter_map(|name| self.macros.get(name)).collect())
    }

    /// Recompile every macro from its literal source text, in dependency
    /// order, re-deriving all precomputed values under the given budget.
    ///
    /// Returns the precomputation trace of each macro. Idempotent on an
    /// unchanged table. Errors (a dependency cycle, or a body that no longer
    /// parses) leave the table partially updated; callers snapshot and
    /// restore for all-or-nothing semantics.
    pub fn recompile(
        &mut self,
        budget: usize,
        strategy: Strategy,
    ) -> Result<IndexMap<String, Trace>, MacroError> {
        let order = self.dependency_order()?;
        let mut traces = IndexMap::new();
        for name in order {
            let Some(def) = self.macros.get(&name) else {
                continue;
            };
            let source_text = def.source_text.clone();
            let parsed = Parser::new(&source_text, self, strategy).parse_expression()?;
            let source = parsed.ok_or(MacroError::Parse(crate::error::ParseError::new(
                ParseErrorKind::ExpectedTerm,
                0,
            )))?;
            let (def, trace) = compile(name.clone(), source_text, source, budget);
            traces.insert(name.clone(), trace);
            // Replacing under an existing key keeps its table position.
            self.macros.insert(name, def);
        }
        Ok(traces)
    }
}

/// Precompute a macro's values: normal order first (its success makes the
/// CBV/CBN slots unnecessary), else whichever of CBV and CBN terminate.
/// CBN finds a value whenever CBV does, so a CBV-only success cannot occur;
/// both are still attempted independently.
fn compile(name: String, source_text: String, source: Term, budget: usize) -> (MacroDefinition, Trace) {
    let normal = run(Some(source.clone()), budget, Strategy::NormalOrder);
    if !normal.timed_out() {
        let full_normal_form = normal.final_term().cloned();
        return (
            MacroDefinition {
                name,
                source_text,
                source,
                full_normal_form,
                cbv_value: None,
                cbn_value: None,
            },
            normal,
        );
    }
    let cbv = run(Some(source.clone()), budget, Strategy::CallByValue);
    let cbn = run(Some(source.clone()), budget, Strategy::CallByName);
    let cbv_value = cbv.normal_form().cloned();
    let cbn_value = cbn.normal_form().cloned();
    let trace = if !cbv.timed_out() {
        cbv
    } else if !cbn.timed_out() {
        cbn
    } else {
        normal
    };
    (
        MacroDefinition {
            name,
            source_text,
            source,
            full_normal_form: None,
            cbv_value,
            cbn_value,
        },
        trace,
    )
}

/// Replace reduced subterms with references to macros they are equivalent to.
///
/// The walk is outside-in: each node is inspected before its children, the
/// first macro (in dependency order) whose stored value is alpha-equivalent
/// to the node replaces it, and the walk does not descend below a
/// replacement. Existing macro references are left untouched. The flag
/// reports whether any replacement occurred.
pub fn resugar(term: &Term, table: &MacroTable, strategy: Strategy) -> (Term, bool) {
    let order = match table.dependency_order() {
        Ok(order) => order,
        Err(_) => table.names(),
    };
    let mut changed = false;
    let result = resugar_walk(term, table, strategy, &order, &mut changed);
    (result, changed)
}

fn resugar_walk(
    term: &Term,
    table: &MacroTable,
    strategy: Strategy,
    order: &[String],
    changed: &mut bool,
) -> Term {
    // Already sugared; nothing to gain by re-wrapping it.
    if let Term::MacroRef(_, _) = term {
        return term.clone();
    }
    for name in order {
        let Some(def) = table.get(name) else { continue };
        let Some(value) = def.stored_value(strategy) else {
            continue;
        };
        if is_alpha_equivalent(term, value) {
            *changed = true;
            return Term::macro_ref(name.clone(), value.clone());
        }
    }
    match term {
        Term::Application(fun, arg) => Term::app(
            resugar_walk(fun, table, strategy, order, changed),
            resugar_walk(arg, table, strategy, order, changed),
        ),
        Term::Abstraction(bound, body) => Term::abs(
            bound.clone(),
            resugar_walk(body, table, strategy, order, changed),
        ),
        Term::Variable(_) | Term::MacroRef(_, _) | Term::Hole => term.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Term {
        Term::abs(name, Term::var(name))
    }

    fn table_with(defs: &[(&str, Term)]) -> MacroTable {
        let mut table = MacroTable::new();
        for (name, term) in defs {
            table.insert_source(name.to_string(), term.to_string(), term.clone());
        }
        table
    }

    #[test]
    fn test_value_for_prefers_full_normal_form() {
        let mut def = MacroDefinition {
            name: "ID".to_string(),
            source_text: "λx. x".to_string(),
            source: id("x"),
            full_normal_form: Some(id("full")),
            cbv_value: Some(id("cbv")),
            cbn_value: None,
        };
        assert_eq!(def.value_for(Strategy::CallByValue), &id("full"));
        def.full_normal_form = None;
        assert_eq!(def.value_for(Strategy::CallByValue), &id("cbv"));
        assert_eq!(def.value_for(Strategy::NormalOrder), &id("x"));
    }

    #[test]
    fn test_dependency_order_sorts_dependencies_first() {
        // PLUS references SUCC; defined PLUS-first on purpose
        let succ = id("n");
        let plus = Term::abs("m", Term::macro_ref("SUCC", succ.clone()));
        let table = table_with(&[("PLUS", plus), ("SUCC", succ)]);
        let order = table.dependency_order().unwrap();
        assert_eq!(order, vec!["SUCC".to_string(), "PLUS".to_string()]);
    }

    #[test]
    fn test_dependency_cycle_is_an_error() {
        let a = Term::macro_ref("B", id("x"));
        let b = Term::macro_ref("A", id("x"));
        let table = table_with(&[("A", a), ("B", b)]);
        assert!(matches!(
            table.dependency_order(),
            Err(MacroError::CircularDependency { .. })
        ));
    }

    #[test]
    fn test_recompile_is_idempotent() {
        let mut table = MacroTable::new();
        table.insert_source("ID".to_string(), "λx. x".to_string(), id("x"));
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        let first = table.clone();
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        assert_eq!(table, first);
    }

    #[test]
    fn test_recompile_stores_full_normal_form() {
        let mut table = MacroTable::new();
        table.insert_source(
            "ID".to_string(),
            "(λx. x) (λy. y)".to_string(),
            Term::app(id("x"), id("y")),
        );
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        let def = table.get("ID").unwrap();
        assert_eq!(def.full_normal_form, Some(id("y")));
        assert_eq!(def.cbv_value, None);
        assert_eq!(def.cbn_value, None);
    }

    #[test]
    fn test_recompile_divergent_macro_keeps_literal_only() {
        let mut table = MacroTable::new();
        table.insert_source(
            "OMEGA".to_string(),
            "(λx. x x) (λx. x x)".to_string(),
            Term::app(
                Term::abs("x", Term::app(Term::var("x"), Term::var("x"))),
                Term::abs("x", Term::app(Term::var("x"), Term::var("x"))),
            ),
        );
        table.recompile(10, Strategy::NormalOrder).expect("recompile");
        let def = table.get("OMEGA").unwrap();
        assert_eq!(def.full_normal_form, None);
        assert_eq!(def.cbv_value, None);
        assert_eq!(def.cbn_value, None);
        assert_eq!(def.value_for(Strategy::NormalOrder), &def.source);
    }

    #[test]
    fn test_resugar_replaces_outermost_match() {
        let mut table = MacroTable::new();
        table.insert_source("ID".to_string(), "λx. x".to_string(), id("x"));
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        let (sugared, changed) = resugar(&id("anything"), &table, Strategy::NormalOrder);
        assert!(changed);
        assert!(matches!(sugared, Term::MacroRef(ref name, _) if name == "ID"));
    }

    #[test]
    fn test_resugar_no_match_returns_original() {
        let table = MacroTable::new();
        let term = Term::app(Term::var("f"), Term::var("g"));
        let (sugared, changed) = resugar(&term, &table, Strategy::NormalOrder);
        assert!(!changed);
        assert_eq!(sugared, term);
    }

    #[test]
    fn test_resugar_skips_existing_macro_refs() {
        let mut table = MacroTable::new();
        table.insert_source("ID".to_string(), "λx. x".to_string(), id("x"));
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        let already = Term::macro_ref("ID", id("x"));
        let (sugared, changed) = resugar(&already, &table, Strategy::NormalOrder);
        assert!(!changed);
        assert_eq!(sugared, already);
    }

    #[test]
    fn test_resugar_does_not_descend_into_replacement() {
        // ID ID: the whole application matches nothing, each side matches ID
        let mut table = MacroTable::new();
        table.insert_source("ID".to_string(), "λx. x".to_string(), id("x"));
        table
            .recompile(100, Strategy::NormalOrder)
            .expect("recompile");
        let term = Term::app(id("a"), id("b"));
        let (sugared, changed) = resugar(&term, &table, Strategy::NormalOrder);
        assert!(changed);
        match sugared {
            Term::Application(fun, arg) => {
                assert!(matches!(*fun, Term::MacroRef(ref n, _) if n == "ID"));
                assert!(matches!(*arg, Term::MacroRef(ref n, _) if n == "ID"));
            }
            other => panic!("expected application, got {other}"),
        }
    }
}
