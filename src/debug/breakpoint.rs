//! Breakpoint hook
//!
//! The debug tag reports each phase of its life (parse, compile, render) to a
//! [`Breakpoint`]. The hook decides what to do with it: nothing, record it,
//! or stop and let a developer look at the value (see
//! [`TuiBreakpoint`](crate::ui::TuiBreakpoint)).

use super::SourcePointers;
use crate::value::Value;
use std::fmt;

/// Phase of the tag lifecycle that triggered the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Compile,
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Parse => "parse",
            Phase::Compile => "compile",
            Phase::Render => "render",
        };
        f.write_str(name)
    }
}

/// What the hook gets to see
#[derive(Debug, Clone, Copy)]
pub struct BreakEvent<'a> {
    /// The tag's `break` argument
    pub enabled: bool,
    pub phase: Phase,
    /// Template position; None once the template is compiled
    pub pointers: Option<&'a SourcePointers>,
    /// The dumped value, render phase only
    pub value: Option<&'a Value>,
}

pub trait Breakpoint {
    fn hit(&mut self, event: &BreakEvent<'_>);
}

impl<B: Breakpoint + ?Sized> Breakpoint for Box<B> {
    fn hit(&mut self, event: &BreakEvent<'_>) {
        (**self).hit(event)
    }
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBreakpoint;

impl Breakpoint for NoopBreakpoint {
    fn hit(&mut self, _event: &BreakEvent<'_>) {}
}

/// One event captured by [`RecordingBreakpoint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedHit {
    pub enabled: bool,
    pub phase: Phase,
    pub pointers: Option<SourcePointers>,
    pub value_kind: Option<&'static str>,
}

/// Keeps every event, for tooling and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingBreakpoint {
    pub hits: Vec<RecordedHit>,
}

impl RecordingBreakpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phases of the events that had `break` enabled
    pub fn breaks(&self) -> Vec<Phase> {
        self.hits
            .iter()
            .filter(|hit| hit.enabled)
            .map(|hit| hit.phase)
            .collect()
    }
}

impl Breakpoint for RecordingBreakpoint {
    fn hit(&mut self, event: &BreakEvent<'_>) {
        self.hits.push(RecordedHit {
            enabled: event.enabled,
            phase: event.phase,
            pointers: event.pointers.cloned(),
            value_kind: event.value.map(Value::kind),
        });
    }
}
