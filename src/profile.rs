//! Color capability of the output sink.
//!
//! A profile is applied twice: colors are downsampled while the style sheet
//! is built, and [`ColorProfile::apply`] strips every escape from the finished
//! buffer when colors are off.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::profile::ColorProfile;
//!
//! assert_eq!(ColorProfile::TrueColor.convert("#FF0000").as_deref(), Some("#FF0000"));
//! assert_eq!(ColorProfile::Ansi256.convert("#FF0000").as_deref(), Some("196"));
//! assert_eq!(ColorProfile::Ansi.convert("#FF0000").as_deref(), Some("9"));
//! assert_eq!(ColorProfile::NoColor.convert("#FF0000"), None);
//! ```

use std::borrow::Cow;

use crossterm::tty::IsTty;

/// What the destination terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorProfile {
    /// No escape sequences at all: pipes, files, `NO_COLOR`, dumb terminals.
    NoColor,
    /// The 16 basic ANSI colors.
    Ansi,
    /// The 256-color palette.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl ColorProfile {
    /// Guesses the profile of stdout from the environment.
    pub fn detect() -> Self {
        Self::from_env(
            std::io::stdout().is_tty(),
            |key| std::env::var(key).ok(),
        )
    }

    fn from_env(is_tty: bool, var: impl Fn(&str) -> Option<String>) -> Self {
        if var("NO_COLOR").is_some_and(|v| !v.is_empty()) || !is_tty {
            return Self::NoColor;
        }
        let term = var("TERM").unwrap_or_default();
        if term == "dumb" {
            return Self::NoColor;
        }
        if matches!(var("COLORTERM").as_deref(), Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        if term.contains("256color") {
            return Self::Ansi256;
        }
        Self::Ansi
    }

    /// Downsamples `color` to what the profile can show.
    ///
    /// `#RRGGBB` (or `#RGB`) colors become a 256-color index for
    /// [`ColorProfile::Ansi256`] and one of the 16 basic colors for
    /// [`ColorProfile::Ansi`]. Palette indices above 15 are reduced the same
    /// way for [`ColorProfile::Ansi`]. Anything else is passed through.
    ///
    /// # Returns
    ///
    /// `None` for [`ColorProfile::NoColor`], the color to hand to the style
    /// layer otherwise.
    pub fn convert(&self, color: &str) -> Option<String> {
        let rgb = || parse_hex(color).or_else(|| palette_rgb(color));
        match self {
            Self::NoColor => None,
            Self::TrueColor => Some(color.to_string()),
            Self::Ansi256 => Some(match parse_hex(color) {
                Some(rgb) => rgb_to_ansi256(rgb).to_string(),
                None => color.to_string(),
            }),
            Self::Ansi => Some(match rgb() {
                Some(rgb) => rgb_to_ansi16(rgb).to_string(),
                None => color.to_string(),
            }),
        }
    }

    /// Adapts a finished buffer to the profile.
    ///
    /// Only [`ColorProfile::NoColor`] changes the text; it removes every
    /// escape sequence.
    pub fn apply<'a>(&self, rendered: &'a str) -> Cow<'a, str> {
        match self {
            Self::NoColor => Cow::Owned(strip_ansi_escapes::strip_str(rendered)),
            _ => Cow::Borrowed(rendered),
        }
    }
}

/// The 16 basic colors as xterm draws them.
const ANSI16: [(u8, u8, u8); 16] = [
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

/// Channel levels of the 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let short = |s: &str| channel(s).map(|v| v * 17);
            Some((short(&hex[0..1])?, short(&hex[1..2])?, short(&hex[2..3])?))
        }
        _ => None,
    }
}

/// RGB value of a 256-color palette index given as a decimal string.
fn palette_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let index: u8 = color.parse().ok()?;
    Some(match index {
        0..=15 => ANSI16[usize::from(index)],
        16..=231 => {
            let i = index - 16;
            (
                CUBE_LEVELS[usize::from(i / 36)],
                CUBE_LEVELS[usize::from(i / 6 % 6)],
                CUBE_LEVELS[usize::from(i % 6)],
            )
        }
        _ => {
            let level = 8 + (index - 232) * 10;
            (level, level, level)
        }
    })
}

/// Nearest 256-color palette index, picking between the color cube and the
/// grayscale ramp.
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    let level = |v: u8| match v {
        0..=47 => 0,
        48..=114 => 1,
        _ => (v - 35) / 40,
    };
    let (qr, qg, qb) = (level(r), level(g), level(b));
    let cube = 16 + 36 * qr + 6 * qg + qb;
    let cube_rgb = (
        CUBE_LEVELS[usize::from(qr)],
        CUBE_LEVELS[usize::from(qg)],
        CUBE_LEVELS[usize::from(qb)],
    );

    let average = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let gray_step = if average > 238 { 23 } else { average.saturating_sub(3) / 10 };
    let gray_level = 8 + gray_step * 10;
    let gray = 232 + gray_step;

    if distance((r, g, b), (gray_level, gray_level, gray_level)) < distance((r, g, b), cube_rgb) {
        gray
    } else {
        cube
    }
}

fn rgb_to_ansi16(rgb: (u8, u8, u8)) -> u8 {
    (0u8..16)
        .min_by_key(|&i| distance(rgb, ANSI16[usize::from(i)]))
        .unwrap_or(7)
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = i32::from(x) - i32::from(y);
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
