//! Colors and state-to-color mappings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::state::InteractionState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("Color '{0}' must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("Color '{0}' contains invalid hex digits")]
    BadDigit(String),
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, fully opaque
    pub const fn from_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Normalized [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An ordered list of (color, required states) rules.
///
/// The first rule whose required flags are all present wins; when nothing
/// matches the last rule is the default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateColor {
    rules: Vec<(Color, InteractionState)>,
}

impl StateColor {
    pub fn new(rules: impl IntoIterator<Item = (Color, InteractionState)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// A single color for every state
    pub fn solid(color: Color) -> Self {
        Self::new([(color, InteractionState::empty())])
    }

    pub fn push(&mut self, color: Color, states: InteractionState) -> &mut Self {
        self.rules.push((color, states));
        self
    }

    pub fn with(mut self, color: Color, states: InteractionState) -> Self {
        self.push(color, states);
        self
    }

    /// Resolve the color for the given states. An empty mapping is transparent.
    pub fn resolve(&self, states: InteractionState) -> Color {
        self.rules
            .iter()
            .find(|(_, required)| states.contains(*required))
            .or_else(|| self.rules.last())
            .map(|(color, _)| *color)
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Every flag some rule depends on
    pub fn states(&self) -> InteractionState {
        self.rules
            .iter()
            .fold(InteractionState::empty(), |acc, (_, states)| acc | *states)
    }

    pub fn rules(&self) -> &[(Color, InteractionState)] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Color> for StateColor {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}
