//! Error reports.
//!
//! An error is shown as an `ERROR` badge followed by its message. Errors that
//! stem from a bad invocation also get a hint pointing at `--help`; which
//! errors those are is decided purely from the message prefix.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::report::ErrorClass;
//!
//! assert_eq!(ErrorClass::classify("unknown flag: --nope"), ErrorClass::Usage);
//! assert_eq!(ErrorClass::classify("disk full"), ErrorClass::General);
//! ```

use std::fmt;

use crate::layout::wrap;
use crate::theme::{Slot, StyleSheet};

/// Message prefixes that mark an invocation mistake.
pub const USAGE_ERROR_PREFIXES: &[&str] = &[
    "flag needs an argument:",
    "unknown flag:",
    "unknown shorthand flag:",
    "unknown command",
    "invalid argument",
];

const MARGIN: usize = 2;

/// How an error is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The user invoked the program wrongly; a help hint is shown.
    Usage,
    /// Anything else.
    General,
}

impl ErrorClass {
    /// Classifies an error message by its prefix.
    pub fn classify(message: &str) -> Self {
        if USAGE_ERROR_PREFIXES
            .iter()
            .any(|prefix| message.starts_with(prefix))
        {
            Self::Usage
        } else {
            Self::General
        }
    }
}

/// Renders the report for `err`.
///
/// The message is wrapped to the sheet's width and gets a trailing period.
/// The error itself is only read.
pub fn render_error(styles: &StyleSheet, err: &dyn fmt::Display) -> String {
    let message = err.to_string();
    let indented = Slot::new().margin_left(MARGIN);
    let text = styles.error_text.merge(&indented);
    let mut out = String::new();

    out.push('\n');
    out.push_str(&styles.error_header.render("ERROR"));
    out.push_str("\n\n");

    for line in wrap(&format!("{message}."), styles.width.saturating_sub(MARGIN)) {
        out.push_str(&text.render(&line));
        out.push('\n');
    }
    out.push('\n');

    if ErrorClass::classify(&message) == ErrorClass::Usage {
        out.push_str(&text.render("Try"));
        out.push_str(&styles.program.flag.render("--help"));
        out.push_str(
            &styles
                .error_text
                .merge(&Slot::new().padding_left(1))
                .render("for usage."),
        );
        out.push_str("\n\n");
    }
    out
}
