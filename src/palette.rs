use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Background swatches offered by the editor.
pub const BACKGROUND_TOKENS: &[&str] = &[
    "bg-red-500",
    "bg-orange-500",
    "bg-yellow-500",
    "bg-green-500",
    "bg-blue-500",
    "bg-indigo-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-gray-500",
    "bg-slate-500",
    "bg-zinc-500",
    "bg-neutral-500",
    "bg-stone-500",
    "bg-red-600",
    "bg-orange-600",
    "bg-yellow-600",
    "bg-green-600",
    "bg-blue-600",
    "bg-indigo-600",
    "bg-purple-600",
    "bg-pink-600",
    "bg-gray-600",
];

/// Tints applied to library icons.
pub const ICON_TINT_TOKENS: &[&str] = &[
    "text-white",
    "text-gray-100",
    "text-gray-200",
    "text-gray-300",
    "text-gray-600",
    "text-gray-700",
    "text-gray-800",
    "text-gray-900",
    "text-red-100",
    "text-blue-100",
    "text-green-100",
    "text-yellow-100",
    "text-purple-100",
    "text-pink-100",
    "text-indigo-100",
    "text-orange-100",
];

pub const DEFAULT_BACKGROUND: &str = "bg-blue-500";
pub const DEFAULT_ICON_TINT: &str = "text-white";
pub const DEFAULT_LITERAL: &str = "hsl(220, 100%, 50%)";

// hue-shade -> rgb, enough to preview every token above plus the seeded defaults
const SWATCHES: &[(&str, u32)] = &[
    ("white", 0xffffff),
    ("black", 0x000000),
    ("red-100", 0xfee2e2),
    ("red-500", 0xef4444),
    ("red-600", 0xdc2626),
    ("orange-100", 0xffedd5),
    ("orange-500", 0xf97316),
    ("orange-600", 0xea580c),
    ("yellow-100", 0xfef9c3),
    ("yellow-500", 0xeab308),
    ("yellow-600", 0xca8a04),
    ("green-100", 0xdcfce7),
    ("green-500", 0x22c55e),
    ("green-600", 0x16a34a),
    ("blue-100", 0xdbeafe),
    ("blue-500", 0x3b82f6),
    ("blue-600", 0x2563eb),
    ("indigo-100", 0xe0e7ff),
    ("indigo-500", 0x6366f1),
    ("indigo-600", 0x4f46e5),
    ("purple-100", 0xf3e8ff),
    ("purple-500", 0xa855f7),
    ("purple-600", 0x9333ea),
    ("pink-100", 0xfce7f3),
    ("pink-500", 0xec4899),
    ("pink-600", 0xdb2777),
    ("gray-100", 0xf3f4f6),
    ("gray-200", 0xe5e7eb),
    ("gray-300", 0xd1d5db),
    ("gray-400", 0x9ca3af),
    ("gray-500", 0x6b7280),
    ("gray-600", 0x4b5563),
    ("gray-700", 0x374151),
    ("gray-800", 0x1f2937),
    ("gray-900", 0x111827),
    ("slate-500", 0x64748b),
    ("zinc-500", 0x71717a),
    ("neutral-500", 0x737373),
    ("stone-500", 0x78716c),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    fn from_rgb(rgb: u32, a: u8) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a,
        }
    }
}

/// A color as stored in a shortcut: either a named swatch or a literal value.
///
/// On disk this is a single string. Literal values are recognised by their
/// prefix (`#` or `hsl`); everything else is a palette token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorValue {
    Palette(String),
    Literal(String),
}

impl ColorValue {
    pub fn parse(text: &str) -> Self {
        Self::from(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColorValue::Palette(token) => token,
            ColorValue::Literal(value) => value,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ColorValue::Literal(_))
    }

    pub fn to_rgba(&self) -> Option<Rgba> {
        match self {
            ColorValue::Palette(token) => token_rgba(token),
            ColorValue::Literal(value) => literal_rgba(value),
        }
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        ColorValue::Palette(DEFAULT_BACKGROUND.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(text: String) -> Self {
        if is_literal(&text) {
            ColorValue::Literal(text)
        } else {
            ColorValue::Palette(text)
        }
    }
}

impl From<ColorValue> for String {
    fn from(color: ColorValue) -> Self {
        match color {
            ColorValue::Palette(token) => token,
            ColorValue::Literal(value) => value,
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn is_literal(text: &str) -> bool {
    text.starts_with('#') || text.starts_with("hsl")
}

fn token_rgba(token: &str) -> Option<Rgba> {
    let body = token
        .strip_prefix("bg-")
        .or_else(|| token.strip_prefix("text-"))?;
    let (name, opacity) = match body.split_once('/') {
        Some((name, pct)) => (name, pct.parse::<u32>().ok()?.min(100)),
        None => (body, 100),
    };
    let rgb = SWATCHES.iter().find(|(n, _)| *n == name)?.1;
    Some(Rgba::from_rgb(rgb, (opacity * 255 / 100) as u8))
}

fn literal_rgba(value: &str) -> Option<Rgba> {
    if let Some(hex) = value.strip_prefix('#') {
        return hex_rgba(hex);
    }
    hsl_rgba(value)
}

fn hex_rgba(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                out[i] = channel(&c.to_string())? * 17;
            }
            Some(Rgba { r: out[0], g: out[1], b: out[2], a: 255 })
        }
        6 | 8 => Some(Rgba {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: if hex.len() == 8 { channel(&hex[6..8])? } else { 255 },
        }),
        _ => None,
    }
}

fn hsl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^hsla?\(\s*(-?\d+(?:\.\d+)?)(?:deg)?\s*[,\s]\s*(\d+(?:\.\d+)?)%\s*[,\s]\s*(\d+(?:\.\d+)?)%\s*(?:[,/]\s*(\d+(?:\.\d+)?)(%?)\s*)?\)$",
        )
        .expect("hsl pattern is valid")
    })
}

fn hsl_rgba(value: &str) -> Option<Rgba> {
    let caps = hsl_pattern().captures(value.trim())?;
    let h: f32 = caps[1].parse().ok()?;
    let s: f32 = caps[2].parse::<f32>().ok()?.min(100.0) / 100.0;
    let l: f32 = caps[3].parse::<f32>().ok()?.min(100.0) / 100.0;
    let alpha = match caps.get(4) {
        Some(a) => {
            let a: f32 = a.as_str().parse().ok()?;
            let is_pct = caps.get(5).is_some_and(|m| !m.as_str().is_empty());
            if is_pct { a / 100.0 } else { a }
        }
        None => 1.0,
    };

    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    Some(Rgba {
        r: to_u8(r),
        g: to_u8(g),
        b: to_u8(b),
        a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_decides_representation() {
        assert!(ColorValue::parse("#ff0000").is_literal());
        assert!(ColorValue::parse("hsl(220, 100%, 50%)").is_literal());
        assert!(!ColorValue::parse("bg-blue-500").is_literal());
        // no prefix sniffing beyond `#` and `hsl`
        assert!(!ColorValue::parse("rgb(1, 2, 3)").is_literal());
    }

    #[test]
    fn serializes_as_plain_string() {
        let color = ColorValue::parse("bg-gray-400/50");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"bg-gray-400/50\"");
        let back: ColorValue = serde_json::from_str("\"#123456\"").unwrap();
        assert_eq!(back, ColorValue::Literal("#123456".to_string()));
    }

    #[test]
    fn resolves_hex_literals() {
        assert_eq!(
            ColorValue::parse("#ff8000").to_rgba(),
            Some(Rgba { r: 255, g: 128, b: 0, a: 255 })
        );
        assert_eq!(
            ColorValue::parse("#fff").to_rgba(),
            Some(Rgba { r: 255, g: 255, b: 255, a: 255 })
        );
        assert_eq!(ColorValue::parse("#12").to_rgba(), None);
    }

    #[test]
    fn resolves_hsl_literals() {
        let rgba = ColorValue::parse(DEFAULT_LITERAL).to_rgba().unwrap();
        assert_eq!(rgba, Rgba { r: 0, g: 85, b: 255, a: 255 });

        let red = ColorValue::parse("hsl(0, 100%, 50%)").to_rgba().unwrap();
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));
    }

    #[test]
    fn resolves_palette_tokens_with_opacity() {
        let gray = ColorValue::parse("bg-gray-400/50").to_rgba().unwrap();
        assert_eq!((gray.r, gray.g, gray.b, gray.a), (0x9c, 0xa3, 0xaf, 127));
        assert!(ColorValue::parse("bg-chartreuse-500").to_rgba().is_none());
    }

    #[test]
    fn every_offered_token_has_a_preview() {
        for token in BACKGROUND_TOKENS.iter().chain(ICON_TINT_TOKENS) {
            assert!(ColorValue::parse(token).to_rgba().is_some(), "{token}");
        }
    }
}
