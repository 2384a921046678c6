//! 8-bit RGBA color with hex parsing and source-over compositing.
//!
//! Effects carry colors as straight (non-premultiplied) RGBA. Hex strings
//! are the configuration format: `#rgb`, `#rrggbb`, and `#rrggbbaa` all
//! parse; serialization always emits the full `#rrggbbaa` form when alpha
//! is not 255 and `#rrggbb` otherwise.

use crate::error::EffectError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A straight-alpha RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    /// Creates a color from the four channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB channel values.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb`, or `#rrggbbaa` (leading `#` required).
    ///
    /// Returns `EffectError::InvalidColor` on any malformed input.
    pub fn from_hex(hex: &str) -> Result<Rgba, EffectError> {
        let body = hex
            .strip_prefix('#')
            .ok_or_else(|| EffectError::InvalidColor(hex.to_string()))?;
        let nibble = |c: u8| -> Result<u8, EffectError> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| EffectError::InvalidColor(hex.to_string()))
        };
        let bytes = body.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Rgba::opaque(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 | 8 => {
                let mut ch = [0u8; 4];
                ch[3] = 255;
                for (i, pair) in bytes.chunks(2).enumerate() {
                    ch[i] = nibble(pair[0])? << 4 | nibble(pair[1])?;
                }
                Ok(Rgba::new(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => Err(EffectError::InvalidColor(hex.to_string())),
        }
    }

    /// Formats as `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Returns the same color with the given alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Returns the same color with alpha multiplied by `factor` in [0, 1].
    ///
    /// `factor` outside [0, 1] is clamped.
    pub fn scale_alpha(self, factor: f64) -> Rgba {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Alpha as a fraction in [0, 1].
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Source-over composite of `self` on top of `dst` (straight alpha).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.alpha_f64();
        let da = dst.alpha_f64();
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| -> u8 {
            let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            (out_a * 255.0).round() as u8,
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(|e| D::Error::custom(e.to_string()))
    }
}
