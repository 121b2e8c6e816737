//! Opaque RGB draw colors and the HSV conversion used by the hue remap.
//!
//! HSV uses hue in degrees `[0, 360)` and saturation/value in `[0, 1]`.
//! Channels are rounded to the nearest integer on the way back to RGB, so an
//! RGB -> HSV -> RGB round trip is exact for achromatic colors.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use crate::error::ParseError;

/// An opaque RGB color, as chosen in a color dialog or picked from the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or the `#RGB` shorthand. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Color(hex.to_owned());
        let digits = hex.trim().trim_start_matches('#');
        // from_str_radix alone would accept a sign
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(err()),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as a fully opaque pixel
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Drops the alpha channel of a pixel
    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self::rgb(r, g, b)
    }

    /// Convert to `(hue, saturation, value)`
    pub fn to_hsv(self) -> (f32, f32, f32) {
        rgb_to_hsv(self.r, self.g, self.b)
    }

    /// Build a color from `(hue, saturation, value)`. Hue wraps around 360.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::rgb(r, g, b)
    }

    pub fn hue(self) -> f32 {
        self.to_hsv().0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    if delta == 0.0 {
        return (0.0, 0.0, v);
    }
    let s = delta / max;

    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (if h >= 360.0 { h - 360.0 } else { h }, s, v)
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::RED);
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::GREEN);
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!("#0000FF".parse::<Color>().unwrap(), Color::BLUE);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("#-1+1-1").is_err());
        assert!(Color::from_hex("#+ff").is_err());
    }

    #[test]
    fn formats_lowercase_hex() {
        assert_eq!(Color::rgb(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }

    #[test]
    fn primary_hues() {
        assert_eq!(Color::RED.hue(), 0.0);
        assert!((Color::GREEN.hue() - 120.0).abs() < 1e-4);
        assert!((Color::BLUE.hue() - 240.0).abs() < 1e-4);
        assert!((Color::rgb(255, 0, 255).hue() - 300.0).abs() < 1e-4);
    }

    #[test]
    fn gray_round_trip_is_exact() {
        for level in 0..=255u8 {
            let (h, s, v) = rgb_to_hsv(level, level, level);
            assert_eq!(s, 0.0);
            assert_eq!(hsv_to_rgb(h, s, v), (level, level, level));
            assert_eq!(hsv_to_rgb(200.0, s, v), (level, level, level));
        }
    }

    #[test]
    fn hsv_round_trip_is_stable() {
        let samples = [
            Color::rgb(12, 200, 77),
            Color::rgb(250, 128, 3),
            Color::rgb(90, 10, 200),
            Color::rgb(1, 2, 3),
        ];
        for color in samples {
            let (h, s, v) = color.to_hsv();
            assert_eq!(Color::from_hsv(h, s, v), color);
        }
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(-120.0, 1.0, 1.0), Color::BLUE);
    }
}
