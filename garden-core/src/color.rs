use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GardenError;

/// An 8-bit RGB color.
///
/// Parses from and displays as `#rrggbb` hex, which is also its serde
/// representation (the AI suggestion wire format uses hex color strings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Stem color, a dark foliage green.
pub const STEM_GREEN: Rgb = Rgb::new(0x2d, 0x5a, 0x27);
/// Leaf color, a slightly lighter foliage green.
pub const LEAF_GREEN: Rgb = Rgb::new(0x4a, 0x7c, 0x44);
/// Ground plane color.
pub const GROUND_GREEN: Rgb = Rgb::new(0x24, 0x45, 0x1f);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts an HSL triple to RGB.
    ///
    /// `h` is in degrees (wrapped into [0, 360)), `s` and `l` in [0, 1].
    /// Used by the random parameter generator to pick pleasant hues.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;

        let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r1), to_u8(g1), to_u8(b1))
    }

    /// Color channels as floats in [0, 1], in RGB order.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| GardenError::InvalidColor(s.to_string()))?;
        if hex.len() != 6 {
            return Err(GardenError::InvalidColor(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| GardenError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = GardenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}
