// vardump: dump JSON documents through the debug tag pipeline

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use vardump::config::DumpConfig;
use vardump::debug::{
    Breakpoint, ConsoleScriptSink, DebugTag, JsonSink, NoopBreakpoint, Sink, SourcePointers,
    TextSink,
};
use vardump::ui::TuiBreakpoint;
use vardump::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Inline `console.*` script
    Console,
    /// Indented text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Dump a JSON document as a bounded, cycle-safe representation
#[derive(Debug, Parser)]
#[command(name = "vardump", version, about)]
struct Args {
    /// JSON file to dump; stdin when absent or "-"
    input: Option<PathBuf>,

    /// vardump.toml with dump settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Depth budget, overrides the config
    #[arg(short = 'd', long)]
    max_depth: Option<i32>,

    /// Title printed before the dump
    #[arg(short, long)]
    title: Option<String>,

    /// Console method, overrides the config
    #[arg(short, long)]
    level: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Produce no dump output
    #[arg(long)]
    silent: bool,

    /// Stop at the render breakpoint and open the viewer
    #[arg(long)]
    browse: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the dump
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DumpConfig::load(path)?,
        None => DumpConfig::default(),
    }
    .with_overrides(args.max_depth, args.level.as_deref());

    let (source_name, text) = read_input(args.input.as_ref())?;
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", source_name))?;
    tracing::info!(input = %source_name, "dumping document");

    let breakpoint: Box<dyn Breakpoint> = if args.browse {
        Box::new(TuiBreakpoint::new(config.inspector()))
    } else {
        Box::new(NoopBreakpoint)
    };

    let value = Value::from(json);
    match args.format {
        Format::Console => {
            let sink = ConsoleScriptSink::new();
            let sink = run_tag(&args, &config, &source_name, value, sink, breakpoint)?;
            if !sink.blocks().is_empty() {
                println!("{}", sink.script());
            }
        }
        Format::Text => {
            let sink = TextSink::new(io::stdout());
            run_tag(&args, &config, &source_name, value, sink, breakpoint)?;
        }
        Format::Json => {
            let sink = JsonSink::new(io::stdout());
            run_tag(&args, &config, &source_name, value, sink, breakpoint)?;
        }
    }

    Ok(())
}

/// Drive one tag occurrence through parse, compile and render
fn run_tag<S: Sink>(
    args: &Args,
    config: &DumpConfig,
    source_name: &str,
    value: Value,
    sink: S,
    breakpoint: Box<dyn Breakpoint>,
) -> Result<S> {
    let mut tag_args = config.arguments().with_value(value);
    tag_args.title = args.title.clone();
    tag_args.silent = args.silent;
    tag_args.break_on = args.browse;

    let mut tag = DebugTag::with_breakpoint(sink, breakpoint).with_inspector(config.inspector());
    tag.on_parse(SourcePointers::new(1, 1, source_name), tag_args.break_on);
    tag.on_compile(&tag_args);
    tag.render(tag_args, || Value::Null)?;

    let (sink, _) = tag.into_parts();
    Ok(sink)
}

fn read_input(input: Option<&PathBuf>) -> Result<(String, String)> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(("<stdin>".to_string(), text))
        }
    }
}
