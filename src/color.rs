use std::fmt;

use thiserror::Error;

/// Labels whose perceived luminance is at or below this get white text.
pub const WHITE_TEXT_MAX_LUMINANCE: f64 = 186.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A theme color: either a palette index or an exact RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse `#RRGGBB`. The leading `#` is required.
    pub fn parse_hex(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };
        let hex = s.strip_prefix('#').ok_or_else(make_err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(make_err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| make_err())
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Parse a label color as the server sends it: six hex digits, no `#`.
    pub fn from_label_hex(color: &str) -> Result<Self, ColorParseError> {
        Self::parse_hex(&format!("#{color}"), "label.color")
    }

    /// Perceived luminance, `0.299 R + 0.587 G + 0.114 B`, in `0.0..=255.0`.
    pub fn luminance(self) -> f64 {
        f64::from(self.r) * 0.299 + f64::from(self.g) * 0.587 + f64::from(self.b) * 0.114
    }

    pub fn prefers_white_text(self) -> bool {
        self.luminance() <= WHITE_TEXT_MAX_LUMINANCE
    }

    /// The text color that stays readable on top of this background.
    pub fn contrasting_text(self) -> Rgb {
        if self.prefers_white_text() {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether text drawn on `bg_color` (`#RRGGBB`) should be white.
///
/// Returns `false` when black text reads better.
pub fn prefers_white_text(bg_color: &str) -> Result<bool, ColorParseError> {
    Rgb::parse_hex(bg_color, "background").map(Rgb::prefers_white_text)
}

impl Color {
    /// Parse a color string with a field name for error reporting.
    ///
    /// Accepts:
    /// - `"0"` through `"255"` (with optional leading zeros) → `Ansi256`
    /// - `"#RRGGBB"` → `Hex`
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        if s.starts_with('#') {
            return Rgb::parse_hex(s, field).map(Color::Hex);
        }
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };
        let n: u16 = s.parse().map_err(|_| make_err())?;
        u8::try_from(n).map(Color::Ansi256).map_err(|_| make_err())
    }

    /// Convert to a `crossterm::style::Color` at the given terminal color depth.
    ///
    /// ANSI indices 0–15 map to crossterm's named variants so the terminal
    /// renders them through its own 16-color palette.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (self, depth) {
            (Color::Ansi256(n), ColorDepth::TrueColor | ColorDepth::Color256) => {
                ansi_to_crossterm(n)
            }
            (Color::Hex(Rgb { r, g, b }), ColorDepth::TrueColor) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (Color::Hex(rgb), ColorDepth::Color256) => {
                crossterm::style::Color::AnsiValue(approximate_ansi256(rgb))
            }
            (color, ColorDepth::Color16) => ansi_to_crossterm(approximate_ansi16(color.to_rgb())),
        }
    }

    fn to_rgb(self) -> Rgb {
        match self {
            Color::Hex(rgb) => rgb,
            Color::Ansi256(n) => ansi256_to_rgb(n),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Hex(rgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex(rgb) => rgb.fmt(f),
        }
    }
}

impl ColorDepth {
    /// Detect terminal color depth from environment variables.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Color16
    }
}

fn ansi_to_crossterm(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color;
    match n {
        0 => Color::Black,
        1 => Color::DarkRed,
        2 => Color::DarkGreen,
        3 => Color::DarkYellow,
        4 => Color::DarkBlue,
        5 => Color::DarkMagenta,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Red,
        10 => Color::Green,
        11 => Color::Yellow,
        12 => Color::Blue,
        13 => Color::Magenta,
        14 => Color::Cyan,
        15 => Color::White,
        _ => Color::AnsiValue(n),
    }
}

/// Approximate RGB of an ANSI-256 index.
fn ansi256_to_rgb(n: u8) -> Rgb {
    const BASE16: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    let (r, g, b) = match n {
        0..=15 => BASE16[usize::from(n)],
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    };
    Rgb { r, g, b }
}

/// Nearest index in the 6x6x6 cube or the grayscale ramp.
fn approximate_ansi256(Rgb { r, g, b }: Rgb) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + ((u16::from(r) - 8) / 10).min(23) as u8,
        };
    }
    let level = |v: u8| -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => ((u16::from(v) - 35) / 40).min(5) as u8,
        }
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn approximate_ansi16(Rgb { r, g, b }: Rgb) -> u8 {
    let bright = (u16::from(r) + u16::from(g) + u16::from(b)) / 3 > 128;
    let base = u8::from(r > 128) | (u8::from(g > 128) << 1) | (u8::from(b > 128) << 2);
    if bright { base + 8 } else { base }
}
