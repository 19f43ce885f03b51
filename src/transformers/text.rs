//! Human-readable, optionally colorized text output
//!
//! Every rendered line looks like
//! `[<time>] [<group>] [<LEVEL>]   <message>`, and a multi-line message
//! repeats the same prefix on each of its lines. Non-string payloads are
//! pretty-printed by [`TextTransformer::format_value`].

use super::colors::{ColorKey, ColorMap, Paint};
use crate::core::{resolve_name, LogEntry, Output, Result, Transformer, Value};
use std::borrow::Cow;
use std::io::IsTerminal;

/// Containers nested deeper than this render as `[Array]` / `[Object]`.
pub const DEFAULT_MAX_DEPTH: usize = 3;

const INDENT: &str = "  ";

/// Width the level label is padded to (brackets excluded).
const LEVEL_COLUMN: usize = 7;

pub struct TextTransformer {
    colors_enabled: bool,
    force_colors: bool,
    terminal: bool,
    max_depth: usize,
    colors: ColorMap,
}

impl TextTransformer {
    pub fn new() -> Self {
        Self {
            colors_enabled: true,
            force_colors: false,
            terminal: std::io::stdout().is_terminal(),
            max_depth: DEFAULT_MAX_DEPTH,
            colors: ColorMap::default(),
        }
    }

    /// Enable or disable colours when writing to a terminal.
    #[must_use]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    /// Colour output even when it is not a terminal or colours are disabled.
    #[must_use]
    pub fn force_colors(mut self, force: bool) -> Self {
        self.force_colors = force;
        self
    }

    /// Override terminal detection (detected from stdout by default).
    #[must_use]
    pub fn assume_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_color(mut self, key: ColorKey, paint: Paint) -> Self {
        self.colors.set(key, paint);
        self
    }

    /// Apply overrides given by key name; unknown keys are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use ansi_logger::transformers::{Paint, TextTransformer};
    ///
    /// let transformer = TextTransformer::new()
    ///     .with_color_map([("info", "green".parse::<Paint>()?), ("group", Paint::plain())])?;
    /// # Ok::<(), ansi_logger::LoggerError>(())
    /// ```
    pub fn with_color_map<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Paint)>,
    {
        for (name, paint) in overrides {
            self.colors.set(name.parse()?, paint);
        }
        Ok(self)
    }

    pub fn set_color(&mut self, key: ColorKey, paint: Paint) {
        self.colors.set(key, paint);
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// `force_colors || (terminal && colors enabled)`
    pub fn use_colors(&self) -> bool {
        self.force_colors || (self.terminal && self.colors_enabled)
    }

    fn colorize<'a>(&self, text: &'a str, paint: Paint) -> Cow<'a, str> {
        if self.use_colors() {
            Cow::Owned(paint.apply(text))
        } else {
            Cow::Borrowed(text)
        }
    }

    fn format_time(&self, time: &str) -> String {
        format!("[{}]", self.colorize(time, self.colors.get(ColorKey::Time)))
    }

    /// Trimmed group in brackets; the trimmed whitespace is re-added after
    /// the closing bracket so columns stay aligned.
    fn format_group(&self, group: &str) -> String {
        let trimmed = group.trim();
        let pad = group.chars().count() - trimmed.chars().count();
        format!(
            "[{}]{}",
            self.colorize(trimmed, self.colors.get(ColorKey::Group)),
            " ".repeat(pad)
        )
    }

    fn format_level(&self, bits: u32) -> String {
        let name = resolve_name(bits);
        let pad = if name.len() < LEVEL_COLUMN - 1 {
            LEVEL_COLUMN - name.len()
        } else {
            0
        };
        format!(
            "[{}]{}",
            self.colorize(name, self.colors.level_paint(bits)),
            " ".repeat(pad)
        )
    }

    /// Render an entry as newline-terminated text, one output line per
    /// message line.
    pub fn format_line(&self, entry: &LogEntry) -> String {
        let mut prefix = self.format_time(&entry.timestamp);

        if let Some(group) = &entry.group {
            prefix.push(' ');
            prefix.push_str(&self.format_group(group));
        }

        if entry.level_text.is_some() {
            prefix.push(' ');
            prefix.push_str(&self.format_level(entry.level_numeric));
        }

        let message: Option<Cow<'_, str>> = if entry.message.is_nullish() {
            None
        } else {
            Some(
                entry
                    .message
                    .as_str()
                    .unwrap_or_else(|| Cow::Owned(self.format_value(&entry.message))),
            )
        };

        let mut out = String::with_capacity(prefix.len() + 64);
        match message {
            None => out.push_str(&prefix),
            Some(message) => {
                let paint = self.colors.message_paint(entry.level_numeric);
                for (i, line) in message.split('\n').enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&prefix);
                    out.push(' ');
                    // colour per line so escapes never span a line break
                    out.push_str(&self.colorize(line, paint));
                }
            }
        }
        out.push('\n');
        out
    }

    /// Pretty-print any value. Total: every input yields a string.
    pub fn format_value(&self, value: &Value) -> String {
        let mut ancestors = Vec::new();
        self.render(value, 0, false, &mut ancestors)
    }

    fn render(&self, value: &Value, depth: usize, inline: bool, ancestors: &mut Vec<usize>) -> String {
        match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) if inline => format!("'{}'", s.replace('\n', "\\n")),
            Value::String(s) => format!("'{}'", s),
            Value::Array(_) | Value::Map(_) if depth >= self.max_depth => {
                if matches!(value, Value::Array(_)) {
                    "[Array]".to_string()
                } else {
                    "[Object]".to_string()
                }
            }
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Array(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| self.render(item, depth + 1, true, ancestors).trim().to_string())
                    .collect();
                format!("[ {} ]", rendered.join(", "))
            }
            Value::Map(pairs) if pairs.is_empty() => "{}".to_string(),
            Value::Map(pairs) if inline => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(key, val)| format!("{}: {}", key, self.render(val, depth + 1, true, ancestors)))
                    .collect();
                format!("{{ {} }}", rendered.join(", "))
            }
            Value::Map(pairs) => {
                let pad = INDENT.repeat(depth);
                let mut out = String::from("{");
                for (key, val) in pairs {
                    out.push('\n');
                    out.push_str(&pad);
                    out.push_str(INDENT);
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(&self.render(val, depth + 1, false, ancestors));
                }
                out.push('\n');
                out.push_str(&pad);
                out.push('}');
                out
            }
            Value::Error { message, .. } if inline => message.clone(),
            Value::Error { message, stack } => match stack {
                Some(stack) => {
                    let pad = INDENT.repeat(depth);
                    let stack = stack.replace('\n', &format!("\n{}", pad));
                    format!("{}\n{}{}", message, pad, stack)
                }
                None => message.clone(),
            },
            Value::Function(Some(name)) => format!("[Function: {}]", name),
            Value::Function(None) => "Function".to_string(),
            Value::Opaque(type_name) => type_name.to_lowercase(),
            Value::Shared(node) => {
                let id = node.id();
                if ancestors.contains(&id) {
                    return "[Circular]".to_string();
                }
                ancestors.push(id);
                let rendered = self.render(&node.read(), depth, inline, ancestors);
                ancestors.pop();
                rendered
            }
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        f.to_string()
    }
}

impl Default for TextTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for TextTransformer {
    fn format(&self, entry: LogEntry) -> Result<Output> {
        Ok(Output::Text(self.format_line(&entry)))
    }

    fn format_complex_value(&self, value: Value) -> Value {
        Value::String(self.format_value(&value))
    }

    fn name(&self) -> &str {
        "text"
    }
}
