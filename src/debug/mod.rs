//! Debug tag adapter
//!
//! Binds the inspector to a host templating engine. A host creates one
//! [`DebugTag`] per tag occurrence and forwards the tag's lifecycle to it:
//!
//! ```text
//! parse   → on_parse(pointers, break_on) remember position, break hook
//! compile → on_compile(&args)            break hook, may keep the template uncompiled
//! render  → render(args, children)       break hook, inspect, emit to sink, pass value on
//! ```
//!
//! - [`sink`]: where finished dumps go
//! - [`breakpoint`]: the break hook contract
//!
//! # Modes
//!
//! [`TagMode::Active`] is the development behaviour. [`TagMode::Transparent`]
//! is the production stand-in: it evaluates the value and passes it through,
//! but never inspects, emits or breaks.

pub mod breakpoint;
pub mod errors;
pub mod sink;

pub use breakpoint::{BreakEvent, Breakpoint, NoopBreakpoint, Phase, RecordingBreakpoint};
pub use errors::DebugError;
pub use sink::{ConsoleScriptSink, DumpRecord, JsonSink, Sink, TextSink, TracingSink};

use crate::inspector::{Inspector, DEFAULT_MAX_DEPTH};
use crate::value::Value;

/// Default console method
pub const DEFAULT_LEVEL: &str = "log";

/// Position of the tag in its template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePointers {
    pub line: usize,
    pub character: usize,
    pub template_code: String,
}

impl SourcePointers {
    pub fn new(line: usize, character: usize, template_code: impl Into<String>) -> Self {
        SourcePointers {
            line,
            character,
            template_code: template_code.into(),
        }
    }

    /// Title used when the tag has no explicit one
    pub fn title(&self) -> String {
        format!(
            "Line {}, character {}: {}",
            self.line,
            self.character,
            self.template_code.trim()
        )
    }
}

/// Arguments of one tag occurrence
#[derive(Debug, Clone)]
pub struct DebugArguments {
    /// Value to dump; the tag's children are rendered when absent
    pub value: Option<Value>,
    /// Title printed before the dump
    pub title: Option<String>,
    /// Console method used for the dump
    pub level: String,
    pub max_depth: i32,
    /// Skip output entirely (pairs well with `break_on`)
    pub silent: bool,
    /// Return the value to the surrounding template
    pub pass: bool,
    /// Fire the break hook in every phase
    pub break_on: bool,
    /// Allow the host to compile the template
    pub compile: bool,
}

impl DebugArguments {
    /// Defaults of the `debug.break` alias: silent, breaking
    pub fn break_alias() -> Self {
        DebugArguments {
            silent: true,
            break_on: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for DebugArguments {
    fn default() -> Self {
        DebugArguments {
            value: None,
            title: None,
            level: DEFAULT_LEVEL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            silent: false,
            pass: true,
            break_on: false,
            compile: true,
        }
    }
}

/// Active or production behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    #[default]
    Active,
    Transparent,
}

/// Whether the host may compile the template containing the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileDecision {
    Compiled,
    /// Keep parsing on every request so positions stay available
    Disabled,
}

/// One debug tag occurrence
pub struct DebugTag<S: Sink, B: Breakpoint = NoopBreakpoint> {
    mode: TagMode,
    inspector: Inspector,
    sink: S,
    breakpoint: B,
    pointers: Option<SourcePointers>,
}

impl<S: Sink> DebugTag<S, NoopBreakpoint> {
    pub fn new(sink: S) -> Self {
        DebugTag::with_breakpoint(sink, NoopBreakpoint)
    }
}

impl<S: Sink, B: Breakpoint> DebugTag<S, B> {
    pub fn with_breakpoint(sink: S, breakpoint: B) -> Self {
        DebugTag {
            mode: TagMode::Active,
            inspector: Inspector::default(),
            sink,
            breakpoint,
            pointers: None,
        }
    }

    pub fn with_mode(mut self, mode: TagMode) -> Self {
        self.mode = mode;
        self
    }

    /// Inspector options; the depth budget always comes from the arguments
    pub fn with_inspector(mut self, inspector: Inspector) -> Self {
        self.inspector = inspector;
        self
    }

    pub fn mode(&self) -> TagMode {
        self.mode
    }

    pub fn pointers(&self) -> Option<&SourcePointers> {
        self.pointers.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn breakpoint(&self) -> &B {
        &self.breakpoint
    }

    pub fn into_parts(self) -> (S, B) {
        (self.sink, self.breakpoint)
    }

    /// Parse phase; only the first position seen is kept
    pub fn on_parse(&mut self, pointers: SourcePointers, break_on: bool) {
        if self.mode == TagMode::Transparent {
            return;
        }
        if self.pointers.is_none() {
            self.pointers = Some(pointers);
        }
        tracing::debug!(phase = %Phase::Parse, "debug tag");
        self.breakpoint.hit(&BreakEvent {
            enabled: break_on,
            phase: Phase::Parse,
            pointers: self.pointers.as_ref(),
            value: None,
        });
    }

    /// Compile phase
    pub fn on_compile(&mut self, args: &DebugArguments) -> CompileDecision {
        if self.mode == TagMode::Transparent {
            return CompileDecision::Compiled;
        }
        tracing::debug!(phase = %Phase::Compile, compile = args.compile, "debug tag");
        self.breakpoint.hit(&BreakEvent {
            enabled: args.break_on,
            phase: Phase::Compile,
            pointers: self.pointers.as_ref(),
            value: None,
        });
        if args.compile {
            CompileDecision::Compiled
        } else {
            CompileDecision::Disabled
        }
    }

    /// Render phase
    ///
    /// Returns the dumped value when `pass` is set, None otherwise.
    pub fn render<F>(
        &mut self,
        args: DebugArguments,
        render_children: F,
    ) -> Result<Option<Value>, DebugError>
    where
        F: FnOnce() -> Value,
    {
        let value = args.value.unwrap_or_else(render_children);
        if self.mode == TagMode::Transparent {
            return Ok(args.pass.then_some(value));
        }

        tracing::debug!(phase = %Phase::Render, kind = value.kind(), "debug tag");
        self.breakpoint.hit(&BreakEvent {
            enabled: args.break_on,
            phase: Phase::Render,
            pointers: self.pointers.as_ref(),
            value: Some(&value),
        });

        if !args.silent {
            let title = args
                .title
                .filter(|title| !title.is_empty())
                .or_else(|| self.pointers.as_ref().map(SourcePointers::title));
            let representation = self.inspector.inspect_with_depth(&value, args.max_depth)?;
            self.sink.emit(&DumpRecord {
                title,
                level: args.level,
                representation,
            })?;
        }

        Ok(args.pass.then_some(value))
    }
}
