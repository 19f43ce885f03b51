//! Severity masks and cumulative levels
//!
//! A [`Mask`] is a single bit naming what kind of event an entry is. A
//! [`Level`] is a set of masks that should be output. The canonical levels
//! are prefix unions in the order `ERROR < WARN < SUCCESS < LOG < INFO <
//! DEBUG < VERBOSE`, but any union of masks is a valid level.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Label used for any value that is not exactly one canonical mask.
pub const CUSTOM_LABEL: &str = "CUSTOM";

/// Returns true iff every bit of `mask` is enabled in `level`.
#[inline]
pub fn matches(level: u32, mask: u32) -> bool {
    (level & mask) == mask
}

/// Name of a canonical mask, or [`CUSTOM_LABEL`] for anything else.
pub fn resolve_name(mask: u32) -> &'static str {
    Mask::from_bits(mask).map_or(CUSTOM_LABEL, |m| m.name())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Mask {
    Error = 0b000_0001,
    Warn = 0b000_0010,
    Success = 0b000_0100,
    Log = 0b000_1000,
    Info = 0b001_0000,
    Debug = 0b010_0000,
    Verbose = 0b100_0000,
}

impl Mask {
    /// All masks, most severe first.
    pub const ALL: [Mask; 7] = [
        Mask::Error,
        Mask::Warn,
        Mask::Success,
        Mask::Log,
        Mask::Info,
        Mask::Debug,
        Mask::Verbose,
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mask::Error => "ERROR",
            Mask::Warn => "WARN",
            Mask::Success => "SUCCESS",
            Mask::Log => "LOG",
            Mask::Info => "INFO",
            Mask::Debug => "DEBUG",
            Mask::Verbose => "VERBOSE",
        }
    }

    /// Exact lookup; composite values return `None`.
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.bits() == bits)
    }

    /// The cumulative level ending at this mask.
    pub fn level(self) -> Level {
        Level((self.bits() << 1) - 1)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mask {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ERROR" | "FATAL" => Ok(Mask::Error),
            "WARN" | "WARNING" => Ok(Mask::Warn),
            "SUCCESS" => Ok(Mask::Success),
            "LOG" => Ok(Mask::Log),
            "INFO" => Ok(Mask::Info),
            "DEBUG" => Ok(Mask::Debug),
            "VERBOSE" => Ok(Mask::Verbose),
            _ => Err(LoggerError::unknown_name("mask", s)),
        }
    }
}

/// A set of enabled masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u32);

impl Level {
    pub const SILENT: Level = Level(0);
    pub const ERROR: Level = Level(0b000_0001);
    pub const WARN: Level = Level(0b000_0011);
    pub const SUCCESS: Level = Level(0b000_0111);
    pub const LOG: Level = Level(0b000_1111);
    pub const INFO: Level = Level(0b001_1111);
    pub const DEBUG: Level = Level(0b011_1111);
    pub const VERBOSE: Level = Level(0b111_1111);

    /// Highest valid level value (all seven masks).
    pub const MAX_BITS: u32 = Self::VERBOSE.0;

    const NAMED: [(&'static str, Level); 8] = [
        ("SILENT", Level::SILENT),
        ("ERROR", Level::ERROR),
        ("WARN", Level::WARN),
        ("SUCCESS", Level::SUCCESS),
        ("LOG", Level::LOG),
        ("INFO", Level::INFO),
        ("DEBUG", Level::DEBUG),
        ("VERBOSE", Level::VERBOSE),
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Checked construction from raw bits.
    pub fn from_bits(bits: u32) -> Result<Self> {
        if bits > Self::MAX_BITS {
            return Err(LoggerError::invalid_level(i64::from(bits)));
        }
        Ok(Level(bits))
    }

    pub fn from_masks<I: IntoIterator<Item = Mask>>(masks: I) -> Self {
        masks.into_iter().fold(Level::SILENT, |level, mask| level | mask)
    }

    /// Parse a comma separated mask list such as `"INFO,DEBUG"`.
    pub fn parse_mask_list(list: &str) -> Result<Self> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Mask>)
            .collect::<Result<Vec<_>>>()
            .map(Level::from_masks)
    }

    #[inline]
    pub fn contains(self, mask: Mask) -> bool {
        matches(self.0, mask.bits())
    }

    #[inline]
    pub fn matches(self, mask: u32) -> bool {
        matches(self.0, mask)
    }

    /// Name of a canonical level, `None` for custom unions.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, level)| *level == self)
            .map(|(name, _)| *name)
    }
}

impl TryFrom<i64> for Level {
    type Error = LoggerError;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .ok()
            .filter(|bits| *bits <= Self::MAX_BITS)
            .map(Level)
            .ok_or_else(|| LoggerError::invalid_level(value))
    }
}

impl From<Mask> for Level {
    fn from(mask: Mask) -> Self {
        Level(mask.bits())
    }
}

impl BitOr<Mask> for Level {
    type Output = Level;

    fn bitor(self, rhs: Mask) -> Level {
        Level(self.0 | rhs.bits())
    }
}

impl BitOr for Level {
    type Output = Level;

    fn bitor(self, rhs: Level) -> Level {
        Level(self.0 | rhs.0)
    }
}

impl BitOr for Mask {
    type Output = Level;

    fn bitor(self, rhs: Mask) -> Level {
        Level(self.bits() | rhs.bits())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => {
                let names: Vec<&str> = Mask::ALL
                    .iter()
                    .filter(|m| self.contains(**m))
                    .map(|m| m.name())
                    .collect();
                write!(f, "{}", names.join("|"))
            }
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Accepts a level name (case-insensitive) or an integer in `0..=127`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Level::try_from(value);
        }
        let upper = trimmed.to_uppercase();
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == upper)
            .map(|(_, level)| *level)
            .ok_or_else(|| LoggerError::unknown_name("level", s))
    }
}
