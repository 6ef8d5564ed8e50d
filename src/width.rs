//! Terminal width resolution.
//!
//! The renderer never asks the OS for the terminal size itself; it asks a
//! [`WidthProvider`]. [`TerminalWidth`] is the stock provider: it honors the
//! `HELPDECK_WIDTH` environment variable, then queries the terminal, then
//! falls back to [`DEFAULT_WIDTH`]. The answer is cached inside the provider
//! value, so each provider measures at most once and nothing is process-wide.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::width::{FixedWidth, WidthProvider};
//!
//! assert_eq!(FixedWidth(45).width(), 45);
//! assert_eq!(FixedWidth(400).width(), 120);
//! ```

use std::fmt;

use once_cell::unsync::OnceCell;
use tracing::debug;

/// Environment variable that overrides the measured width.
pub const WIDTH_ENV: &str = "HELPDECK_WIDTH";

/// Width used when nothing else is known, and the ceiling for every result.
pub const DEFAULT_WIDTH: usize = 120;

/// Source of the terminal width for one render.
pub trait WidthProvider: fmt::Debug {
    /// Width in columns, already clamped to `1..=DEFAULT_WIDTH`.
    fn width(&self) -> usize;
}

/// A width fixed up front, mostly for tests and harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl WidthProvider for FixedWidth {
    fn width(&self) -> usize {
        clamp(self.0)
    }
}

/// Width measured from the environment or the attached terminal.
#[derive(Debug, Default)]
pub struct TerminalWidth {
    cached: OnceCell<usize>,
}

impl TerminalWidth {
    /// Creates a provider that measures lazily on first use.
    pub fn new() -> Self {
        Self::default()
    }

    fn measure() -> usize {
        if let Some(w) = std::env::var(WIDTH_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            debug!(width = w, source = "env", "resolved terminal width");
            return clamp(w);
        }
        match crossterm::terminal::size() {
            Ok((cols, _)) if cols > 0 => {
                debug!(width = cols, source = "terminal", "resolved terminal width");
                clamp(usize::from(cols))
            }
            _ => {
                debug!(width = DEFAULT_WIDTH, source = "default", "resolved terminal width");
                DEFAULT_WIDTH
            }
        }
    }
}

impl WidthProvider for TerminalWidth {
    fn width(&self) -> usize {
        *self.cached.get_or_init(Self::measure)
    }
}

fn clamp(width: usize) -> usize {
    width.clamp(1, DEFAULT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_is_clamped() {
        assert_eq!(FixedWidth(45).width(), 45);
        assert_eq!(FixedWidth(121).width(), DEFAULT_WIDTH);
        assert_eq!(FixedWidth(0).width(), 1);
    }

    #[test]
    fn test_terminal_width_is_cached_and_bounded() {
        let provider = TerminalWidth::new();
        let first = provider.width();
        assert!((1..=DEFAULT_WIDTH).contains(&first));
        assert_eq!(provider.width(), first);
    }
}
