//! Output sinks for finished dumps
//!
//! # Sinks
//!
//! - [`ConsoleScriptSink`]: inline script blocks calling the browser console
//! - [`TextSink`]: indented text on any writer
//! - [`JsonSink`]: one JSON document per dump on any writer
//! - [`TracingSink`]: structured log events

use super::errors::DebugError;
use crate::representation::Representation;
use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter};
use std::io::{self, Write};
use tracing::Level;

/// A finished dump, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct DumpRecord {
    pub title: Option<String>,
    /// Console method name, e.g. "log" or "warn"
    pub level: String,
    pub representation: Representation,
}

pub trait Sink {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError> {
        (**self).emit(record)
    }
}

/// A named inline script, one per dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub name: String,
    pub code: String,
}

/// Collects `console.<level>(...)` calls for a page footer
#[derive(Debug, Clone, Default)]
pub struct ConsoleScriptSink {
    blocks: Vec<ScriptBlock>,
}

impl ConsoleScriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[ScriptBlock] {
        &self.blocks
    }

    /// All blocks joined into one script
    pub fn script(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.code.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Sink for ConsoleScriptSink {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError> {
        if !is_console_method(&record.level) {
            return Err(DebugError::InvalidLevel(record.level.clone()));
        }
        let json = to_console_json(&record.representation)?;

        let mut code = String::new();
        if let Some(title) = &record.title {
            code.push_str(&format!("console.info('{}');\n", add_slashes(title)));
        }
        code.push_str(&format!("console.{}({});", record.level, json));

        self.blocks.push(ScriptBlock {
            name: format!("Dump {}", self.blocks.len() + 1),
            code,
        });
        Ok(())
    }
}

/// Writes a title line and the indented text form
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        TextSink { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError> {
        match &record.title {
            Some(title) => writeln!(self.writer, "[{}] {}", record.level, title)?,
            None => writeln!(self.writer, "[{}]", record.level)?,
        }
        writeln!(self.writer, "{}", record.representation)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each dump as a pretty-printed JSON document
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        JsonSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonSink<W> {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError> {
        let document = serde_json::json!({
            "title": record.title,
            "level": record.level,
            "dump": record.representation,
        });
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sends dumps to `tracing`, mapping the console level to a log level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&mut self, record: &DumpRecord) -> Result<(), DebugError> {
        let json = serde_json::to_string(&record.representation)?;
        let title = record.title.as_deref().unwrap_or("");
        match tracing_level(&record.level) {
            Level::ERROR => tracing::error!(title, "{}", json),
            Level::WARN => tracing::warn!(title, "{}", json),
            Level::DEBUG => tracing::debug!(title, "{}", json),
            Level::TRACE => tracing::trace!(title, "{}", json),
            _ => tracing::info!(title, "{}", json),
        }
        Ok(())
    }
}

/// Log level for a console method; unknown methods log at info
pub(crate) fn tracing_level(level: &str) -> Level {
    match level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Check that a level is usable as `console.<level>`
fn is_console_method(level: &str) -> bool {
    let mut chars = level.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Escape a title for a single-quoted JS string inside an inline script
///
/// Quotes, backslashes and NUL as with `addslashes`, plus line breaks and `/`
/// so the text can neither end the string nor close the `<script>` element.
fn add_slashes(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' | '"' | '\\' | '/' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Compact JSON safe to embed in an inline script
///
/// `"` inside strings is written as `\u0022` and `/` as `\/`, so a dumped
/// string can never contain `</script>`.
struct HexQuotFormatter;

impl Formatter for HexQuotFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut parts = fragment.split('/');
        if let Some(first) = parts.next() {
            writer.write_all(first.as_bytes())?;
        }
        for part in parts {
            writer.write_all(b"\\/")?;
            writer.write_all(part.as_bytes())?;
        }
        Ok(())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Encode a representation for embedding in an inline script
pub fn to_console_json(representation: &Representation) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, HexQuotFormatter);
    representation.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(title: Option<&str>, level: &str) -> DumpRecord {
        let mut entries = IndexMap::new();
        entries.insert(
            "quote".to_string(),
            Representation::String("say \"hi\"".to_string()),
        );
        DumpRecord {
            title: title.map(str::to_string),
            level: level.to_string(),
            representation: Representation::Mapping(entries),
        }
    }

    #[test]
    fn test_console_json_hex_quotes() {
        let json = to_console_json(&record(None, "log").representation).unwrap();
        assert_eq!(json, r#"{"quote":"say \u0022hi\u0022"}"#);
    }

    #[test]
    fn test_console_script_with_title() {
        let mut sink = ConsoleScriptSink::new();
        sink.emit(&record(Some("it's here"), "warn")).unwrap();
        sink.emit(&record(None, "log")).unwrap();

        let blocks = sink.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "Dump 1");
        assert_eq!(
            blocks[0].code,
            "console.info('it\\'s here');\nconsole.warn({\"quote\":\"say \\u0022hi\\u0022\"});"
        );
        assert_eq!(blocks[1].name, "Dump 2");
        assert!(blocks[1].code.starts_with("console.log("));
        assert_eq!(sink.script().lines().count(), 3);
    }

    #[test]
    fn test_console_rejects_bad_level() {
        let mut sink = ConsoleScriptSink::new();
        for level in ["", "log(1);alert", "1log", "log info"] {
            let err = sink.emit(&record(None, level)).unwrap_err();
            assert!(matches!(err, DebugError::InvalidLevel(_)));
        }
        assert!(sink.blocks().is_empty());
    }

    #[test]
    fn test_text_sink() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&record(Some("Line 3"), "log")).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "[log] Line 3\nmapping(1) {\n  quote => \"say \\\"hi\\\"\"\n}\n"
        );
    }

    #[test]
    fn test_json_sink() {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&record(None, "info")).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "title": null,
                "level": "info",
                "dump": {"quote": "say \"hi\""}
            })
        );
    }

    #[test]
    fn test_add_slashes() {
        assert_eq!(add_slashes(r#"a'b"c\d"#), r#"a\'b\"c\\d"#);
        assert_eq!(add_slashes("nul\0"), "nul\\0");
        assert_eq!(add_slashes("two\nlines"), "two\\nlines");
        assert_eq!(add_slashes("</script>"), "<\\/script>");
    }

    #[test]
    fn test_console_script_cannot_close_script_element() {
        let mut entries = IndexMap::new();
        entries.insert(
            "html</b>".to_string(),
            Representation::String("</script><script>alert(2)</script>".to_string()),
        );
        let mut sink = ConsoleScriptSink::new();
        sink.emit(&DumpRecord {
            title: Some("t</script><script>alert(1)</script>".to_string()),
            level: "log".to_string(),
            representation: Representation::Mapping(entries),
        })
        .unwrap();

        let code = &sink.blocks()[0].code;
        assert!(!code.contains("</"), "unescaped closing tag in {}", code);
        assert_eq!(
            code,
            r#"console.info('t<\/script><script>alert(1)<\/script>');
console.log({"html<\/b>":"<\/script><script>alert(2)<\/script>"});"#
        );

        // the escaped JSON still decodes to the original text
        let json = to_console_json(&sink_record_value()).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, serde_json::json!({"path": "a/b \"c\""}));
    }

    fn sink_record_value() -> Representation {
        let mut entries = IndexMap::new();
        entries.insert(
            "path".to_string(),
            Representation::String("a/b \"c\"".to_string()),
        );
        Representation::Mapping(entries)
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(tracing_level("error"), Level::ERROR);
        assert_eq!(tracing_level("warn"), Level::WARN);
        assert_eq!(tracing_level("info"), Level::INFO);
        assert_eq!(tracing_level("debug"), Level::DEBUG);
        assert_eq!(tracing_level("trace"), Level::TRACE);
        // console methods without a log level counterpart
        assert_eq!(tracing_level("log"), Level::INFO);
        assert_eq!(tracing_level("table"), Level::INFO);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_sink_emits_at_mapped_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = TracingSink;
            sink.emit(&record(Some("Line 3"), "warn")).unwrap();
            sink.emit(&record(None, "log")).unwrap();
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WARN"), "{}", lines[0]);
        assert!(lines[0].contains("title=\"Line 3\""), "{}", lines[0]);
        assert!(lines[0].contains(r#"{"quote":"say \"hi\""}"#), "{}", lines[0]);
        assert!(lines[1].contains("INFO"), "{}", lines[1]);
    }
}
