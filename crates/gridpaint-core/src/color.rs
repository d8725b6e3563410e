//! Three-channel RGB color value.
//!
//! [`Color`] is the single color representation used for storage, comparison
//! and the text form handed to a paint surface. Equality is exact and
//! channel-wise.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An immutable 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Draws each channel uniformly from `0..=255`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color {
            red: rng.gen(),
            green: rng.gen(),
            blue: rng.gen(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = CoreError;

    /// Parses `rgb(r, g, b)` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = |reason: &str| CoreError::InvalidColor {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if let Some(hex) = input.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid("expected six hex digits"));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| invalid("bad hex digit"))
            };
            return Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let body = input
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid("expected rgb(r, g, b) or #rrggbb"))?;

        let channels = body
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid("channel is not an integer in 0..=255"))?;

        match channels.as_slice() {
            [red, green, blue] => Ok(Color::new(*red, *green, *blue)),
            _ => Err(invalid("expected exactly three channels")),
        }
    }
}
