//! Bounded execution driver
//!
//! The calculus is Turing-complete, so no strategy can promise termination;
//! this driver is the single place where non-termination is bounded. It
//! applies a strategy's `step` repeatedly up to a fixed budget and records
//! the trace the interactive front end renders. At most `budget + 1` step
//! inspections are performed per run.

use std::fmt;

use crate::reduce::{StepInfo, Strategy};
use crate::term::Term;

/// Display label attached to each trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepLabel {
    /// The initial term; nothing was applied yet.
    Initial,
    /// A beta-reduction arrow.
    Beta,
    /// A macro-expansion equals-sign.
    MacroExpansion,
    /// The budget ran out with steps still available.
    TimedOut,
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepLabel::Initial => Ok(()),
            StepLabel::Beta => f.write_str("→"),
            StepLabel::MacroExpansion => f.write_str("="),
            StepLabel::TimedOut => f.write_str("…"),
        }
    }
}

/// Step annotation carried by a trace entry.
///
/// `TimedOut` is deliberately distinct from the absence of a step: a trace
/// ending without it reached a genuine normal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceInfo {
    /// First entry of every non-empty trace.
    Initial,
    /// One successfully applied reduction or expansion.
    Step(StepInfo),
    /// Budget exhausted before reaching a normal form.
    TimedOut,
}

/// One entry of an execution trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// How to label this entry when rendering.
    pub label: StepLabel,
    /// The term after this step (for the initial entry, the input itself).
    pub term: Term,
    /// What produced this entry.
    pub info: TraceInfo,
}

/// An ordered reduction trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    /// All entries, oldest first.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of entries (including the initial one).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace has no entries (an empty parse was run).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the run stopped on budget exhaustion rather than a value.
    pub fn timed_out(&self) -> bool {
        matches!(
            self.steps.last(),
            Some(TraceStep {
                info: TraceInfo::TimedOut,
                ..
            })
        )
    }

    /// The last term the run reached, if any.
    pub fn final_term(&self) -> Option<&Term> {
        self.steps.last().map(|step| &step.term)
    }

    /// The normal form this run reached, or `None` on timeout or empty input.
    pub fn normal_form(&self) -> Option<&Term> {
        if self.timed_out() {
            None
        } else {
            self.final_term()
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step.info {
                TraceInfo::Initial => writeln!(f, "  {}", step.term)?,
                TraceInfo::TimedOut => {
                    writeln!(f, "{} no normal form found within budget", step.label)?
                }
                TraceInfo::Step(_) => writeln!(f, "{} {}", step.label, step.term)?,
            }
        }
        Ok(())
    }
}

/// Drive `term` with the given strategy for at most `budget` steps.
///
/// The first trace entry is the initial term; each later entry reflects one
/// successful step. If the budget runs out while another step is still
/// available, a final [`TraceInfo::TimedOut`] marker entry is appended so
/// callers can tell a timeout from a genuine normal form. A `None` input
/// (an empty parse) produces an empty trace.
pub fn run(term: Option<Term>, budget: usize, strategy: Strategy) -> Trace {
    let Some(initial) = term else {
        return Trace::default();
    };
    let mut current = initial.clone();
    let mut steps = vec![TraceStep {
        label: StepLabel::Initial,
        term: initial,
        info: TraceInfo::Initial,
    }];
    for _ in 0..budget {
        match strategy.step(&current) {
            None => return Trace { steps },
            Some((next, info)) => {
                let label = if info.is_beta() {
                    StepLabel::Beta
                } else {
                    StepLabel::MacroExpansion
                };
                steps.push(TraceStep {
                    label,
                    term: next.clone(),
                    info: TraceInfo::Step(info),
                });
                current = next;
            }
        }
    }
    // Budget exhausted; one final inspection decides timeout vs normal form.
    if strategy.step(&current).is_some() {
        steps.push(TraceStep {
            label: StepLabel::TimedOut,
            term: current,
            info: TraceInfo::TimedOut,
        });
    }
    Trace { steps }
}
