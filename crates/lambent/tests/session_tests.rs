use lambent::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_session_defaults() {
    let session = Session::new();
    assert_eq!(session.strategy(), Strategy::NormalOrder);
    assert_eq!(session.step_budget(), DEFAULT_STEP_BUDGET);
    assert!(session.macro_table().is_empty());
}

#[test]
fn test_session_with_config() {
    let config = SessionConfig::new()
        .with_strategy(Strategy::CallByName)
        .with_step_budget(7);
    let session = Session::with_config(config);
    assert_eq!(session.strategy(), Strategy::CallByName);
    assert_eq!(session.step_budget(), 7);
}

#[test]
fn test_switching_strategy_changes_evaluation() {
    let mut session = Session::new();
    // normal order finishes the body under the lambda
    let trace = session.eval("λz. (λx. x) z").expect("parse failed");
    assert_eq!(trace.normal_form().map(ToString::to_string).as_deref(), Some("λz. z"));

    session.set_strategy(Strategy::CallByValue);
    let trace = session.eval("λz. (λx. x) z").expect("parse failed");
    assert_eq!(
        trace.normal_form().map(ToString::to_string).as_deref(),
        Some("λz. (λx. x) z")
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_blank_input_is_an_empty_trace() {
    let session = Session::new();
    let trace = session.eval("   ").expect("parse failed");
    assert!(trace.is_empty());
    assert!(!trace.timed_out());
}

#[test]
fn test_eval_reports_parse_errors() {
    let session = Session::new();
    let err = session.eval("λx").expect_err("parse succeeded");
    assert_eq!(err.kind, ParseErrorKind::ExpectedDot);
}

#[test]
fn test_eval_respects_step_budget() {
    let mut session = Session::new();
    session.set_step_budget(5);
    let trace = session.eval("(λx. x x) (λx. x x)").expect("parse failed");
    assert!(trace.timed_out());
    // initial entry, five steps, timeout marker
    assert_eq!(trace.len(), 7);
}

#[test]
fn test_run_with_overrides_session_settings() {
    let session = Session::new();
    let term = session
        .parse("(λx. x) (λy. y)")
        .expect("parse failed")
        .expect("empty parse");
    let trace = session.run_with(term, Strategy::CallByName, 1);
    assert!(!trace.timed_out());
    assert_eq!(trace.normal_form().map(ToString::to_string).as_deref(), Some("λy. y"));
}

#[test]
fn test_step_matches_strategy() {
    let mut session = Session::new();
    session.set_strategy(Strategy::CallByName);
    let term = session
        .parse("(λx. x) ((λy. y) z)")
        .expect("parse failed")
        .expect("empty parse");
    let (next, info) = session.step(&term).expect("no step");
    assert!(info.is_beta());
    assert_eq!(next.to_string(), "(λy. y) z");
}

// ═══════════════════════════════════════════════════════════════════════
// Trace rendering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_trace_display_shows_step_labels() {
    let mut session = Session::new();
    session
        .define_macro("ID ≜ λx. x")
        .expect("definition failed");
    let trace = session.eval("ID z").expect("parse failed");
    let rendered = trace.to_string();
    assert!(rendered.contains("  ID z"));
    assert!(rendered.contains("= (λx. x) z"));
    assert!(rendered.contains("→ z"));
}

#[test]
fn test_timed_out_trace_says_so() {
    let mut session = Session::new();
    session.set_step_budget(3);
    let trace = session.eval("(λx. x x) (λx. x x)").expect("parse failed");
    assert!(trace.to_string().contains("no normal form found within budget"));
}

// ═══════════════════════════════════════════════════════════════════════
// Macro definitions through the session
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_definition_accepts_both_signs() {
    let mut session = Session::new();
    session.define_macro("A ≜ λx. x").expect("≜ rejected");
    session.define_macro("B = λx. x").expect("= rejected");
    assert_eq!(session.macro_table().len(), 2);
}

#[test]
fn test_definition_parse_error_is_surfaced() {
    let mut session = Session::new();
    let err = session.define_macro("λx. x").expect_err("accepted");
    assert!(matches!(
        err,
        Error::Parse(ParseError {
            kind: ParseErrorKind::ExpectedMacroName,
            ..
        })
    ));
}

#[test]
fn test_listing_macros_preserves_the_table() {
    let mut session = Session::new();
    session.define_macro("ID ≜ λx. x").expect("definition failed");
    session
        .define_macro("PAIR ≜ λa. λb. λf. f a b")
        .expect("definition failed");
    let before = session.macro_table().clone();
    let names: Vec<String> = session
        .macros_in_dependency_order()
        .expect("listing failed")
        .iter()
        .map(|def| def.name.clone())
        .collect();
    assert_eq!(names, ["ID", "PAIR"]);
    // the recompile on the listing path is all-or-nothing and idempotent
    assert_eq!(session.macro_table(), &before);
}

#[test]
fn test_defined_macro_usable_immediately() {
    let mut session = Session::new();
    session
        .define_macro("TRUE ≜ λt. λf. t")
        .expect("definition failed");
    session
        .define_macro("FALSE ≜ λt. λf. f")
        .expect("definition failed");
    let trace = session.eval("TRUE a b").expect("parse failed");
    assert_eq!(trace.normal_form().map(ToString::to_string).as_deref(), Some("a"));
}
