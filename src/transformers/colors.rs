//! Colour table for the text transformer
//!
//! Colours are keyed by severity plus the `TIME` and `GROUP` columns. Each
//! transformer owns its own [`ColorMap`]; nothing here is global.

use crate::core::{LoggerError, Mask, Result};
use colored::Color;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Error,
    Warn,
    Success,
    Log,
    Info,
    Debug,
    Verbose,
    Time,
    Group,
}

impl ColorKey {
    pub const ALL: [ColorKey; 9] = [
        ColorKey::Error,
        ColorKey::Warn,
        ColorKey::Success,
        ColorKey::Log,
        ColorKey::Info,
        ColorKey::Debug,
        ColorKey::Verbose,
        ColorKey::Time,
        ColorKey::Group,
    ];

    pub fn for_mask(mask: Mask) -> Self {
        match mask {
            Mask::Error => ColorKey::Error,
            Mask::Warn => ColorKey::Warn,
            Mask::Success => ColorKey::Success,
            Mask::Log => ColorKey::Log,
            Mask::Info => ColorKey::Info,
            Mask::Debug => ColorKey::Debug,
            Mask::Verbose => ColorKey::Verbose,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorKey::Error => "ERROR",
            ColorKey::Warn => "WARN",
            ColorKey::Success => "SUCCESS",
            ColorKey::Log => "LOG",
            ColorKey::Info => "INFO",
            ColorKey::Debug => "DEBUG",
            ColorKey::Verbose => "VERBOSE",
            ColorKey::Time => "TIME",
            ColorKey::Group => "GROUP",
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorKey {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        // TITLE is the old name of the group column
        if upper == "TITLE" {
            return Ok(ColorKey::Group);
        }
        ColorKey::ALL
            .into_iter()
            .find(|key| key.name() == upper)
            .ok_or_else(|| LoggerError::unknown_name("color key", s))
    }
}

/// A terminal style: optional foreground, optional background, bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

impl Paint {
    /// No styling at all.
    pub const fn plain() -> Self {
        Paint {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    pub const fn fg(color: Color) -> Self {
        Paint {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    #[must_use]
    pub const fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold
    }

    /// Wrap `text` in SGR escape codes. Plain paints and empty text pass
    /// through untouched.
    ///
    /// Codes come from `colored`, but the wrapper is built here: `Colorize`
    /// consults the crate-global TTY switch, while colour policy belongs to
    /// each transformer.
    pub fn apply(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }
        let mut codes: Vec<String> = Vec::with_capacity(3);
        if self.bold {
            codes.push("1".to_string());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.to_fg_str().into_owned());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.to_bg_str().into_owned());
        }
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text)
    }
}

impl FromStr for Paint {
    type Err = LoggerError;

    /// Parses styles such as `"blue"`, `"bold red"`, `"white on red"`,
    /// `"bright magenta"` or `"plain"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut paint = Paint::plain();
        let mut background = false;
        let mut words = s.split_whitespace().peekable();

        while let Some(word) = words.next() {
            let lower = word.to_lowercase();
            match lower.as_str() {
                "plain" | "none" | "normal" => {}
                "bold" => paint.bold = true,
                "on" => background = true,
                _ => {
                    let name = if lower == "bright" {
                        match words.next() {
                            Some(next) => format!("bright {}", next.to_lowercase()),
                            None => return Err(LoggerError::unknown_name("color", s)),
                        }
                    } else {
                        lower
                    };
                    let color = name
                        .parse::<Color>()
                        .map_err(|_| LoggerError::unknown_name("color", s))?;
                    if background {
                        paint.bg = Some(color);
                        background = false;
                    } else {
                        paint.fg = Some(color);
                    }
                }
            }
        }

        if background {
            return Err(LoggerError::unknown_name("color", s));
        }
        Ok(paint)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    paints: HashMap<ColorKey, Paint>,
}

impl Default for ColorMap {
    fn default() -> Self {
        let paints = ColorKey::ALL
            .into_iter()
            .map(|key| (key, Self::default_paint(key)))
            .collect();
        Self { paints }
    }
}

impl ColorMap {
    pub fn default_paint(key: ColorKey) -> Paint {
        match key {
            ColorKey::Error => Paint::fg(Color::White).on(Color::Red),
            ColorKey::Warn => Paint::fg(Color::Red).bold(),
            ColorKey::Success => Paint::fg(Color::Green),
            ColorKey::Log => Paint::plain(),
            ColorKey::Info => Paint::fg(Color::Blue),
            ColorKey::Debug => Paint::fg(Color::Yellow),
            ColorKey::Verbose => Paint::fg(Color::Magenta),
            ColorKey::Time => Paint::fg(Color::Cyan),
            ColorKey::Group => Paint::fg(Color::Cyan),
        }
    }

    pub fn get(&self, key: ColorKey) -> Paint {
        self.paints
            .get(&key)
            .copied()
            .unwrap_or_else(|| Self::default_paint(key))
    }

    pub fn set(&mut self, key: ColorKey, paint: Paint) {
        self.paints.insert(key, paint);
    }

    /// Paint for the level column: the most severe mask present wins,
    /// bits without any canonical mask use the LOG paint.
    pub fn level_paint(&self, bits: u32) -> Paint {
        Mask::ALL
            .into_iter()
            .find(|mask| crate::core::matches(bits, mask.bits()))
            .map_or_else(|| self.get(ColorKey::Log), |mask| self.get(ColorKey::for_mask(mask)))
    }

    /// Paint for message text: only exact canonical masks are coloured.
    pub fn message_paint(&self, bits: u32) -> Paint {
        Mask::from_bits(bits).map_or(Paint::plain(), |mask| self.get(ColorKey::for_mask(mask)))
    }
}
