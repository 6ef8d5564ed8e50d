#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/helpdeck/")]

//! # helpdeck
//!
//! Styled, width-aware help and error screens for command-line programs.
//!
//! helpdeck takes a description of a command tree ([`CommandNode`]) and turns
//! it into a help screen: a wrapped description, a usage box, syntax-highlighted
//! examples, grouped subcommands and an aligned flag table. Errors get a
//! matching report with an `ERROR` badge and, for invocation mistakes, a hint
//! pointing at `--help`.
//!
//! ## Features
//!
//! - **Example highlighting** that tells program names, subcommands, flags,
//!   flag values, quoted strings and comments apart, across continued lines
//! - **Width awareness**: boxes fit the terminal, long example lines end in
//!   `…`, and help text wraps with a hanging indent
//! - **Theming** through an adaptive [`ColorScheme`] resolved into a
//!   [`StyleSheet`] per render
//! - **Color profiles**: output is stripped of escapes when colors are off
//!
//! ## Quick Start
//!
//! ```rust
//! use helpdeck::prelude::*;
//!
//! let root = CommandNode::new("deploy [command] [--flags]")
//!     .with_short("Ship things to places")
//!     .with_example("# Push to staging:\ndeploy push --env staging")
//!     .with_flag(FlagSpec::boolean("verbose", "talk more").with_short('v'))
//!     .with_child(CommandNode::new("push [args]").with_short("push a build"));
//!
//! let renderer = HelpRenderer::new()
//!     .with_width(60)
//!     .with_profile(ColorProfile::NoColor);
//!
//! let help = renderer.render_help(&root);
//! assert!(help.contains("COMMANDS"));
//! assert!(help.contains("-v --verbose"));
//!
//! let report = renderer.render_error(&"unknown flag: --nope");
//! assert!(report.contains("Try --help for usage."));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`command`] | Command tree description and lookup |
//! | [`tokenizer`] | Example-line tokenizer |
//! | [`highlight`] | Token styling |
//! | [`layout`] | Width measurement, truncation, wrapping, boxes |
//! | [`usage`] | Usage-line synthesis |
//! | [`theme`] | Color schemes and style sheets |
//! | [`render`] | The help renderer |
//! | [`report`] | Error reports |
//! | [`width`] | Terminal width providers |
//! | [`profile`] | Color profile detection |

pub mod command;
pub mod error;
pub mod highlight;
pub mod layout;
pub mod profile;
pub mod render;
pub mod report;
pub mod theme;
pub mod tokenizer;
pub mod usage;
pub mod width;

pub use command::{CommandLookup, CommandNode, FlagSpec, Group, ValueKind};
pub use error::{Error, Result};
pub use highlight::Highlighter;
pub use layout::{StyledBlock, ELLIPSIS};
pub use profile::ColorProfile;
pub use render::{GroupOrder, HelpRenderer, Section};
pub use report::ErrorClass;
pub use theme::{ColorScheme, Slot, StyleSheet, Tone};
pub use tokenizer::{tokenize, tokenize_example, ExampleLine, Token, TokenKind, TokenizerState};
pub use usage::UsageLine;
pub use width::{FixedWidth, TerminalWidth, WidthProvider};

/// Prelude module for convenient imports.
///
/// ```rust
/// use helpdeck::prelude::*;
///
/// let help = HelpRenderer::new()
///     .with_width(45)
///     .with_profile(ColorProfile::NoColor)
///     .render_help(&CommandNode::new("simple"));
/// assert!(help.contains("simple"));
/// ```
pub mod prelude {
    pub use crate::command::{CommandLookup, CommandNode, FlagSpec, Group, ValueKind};
    pub use crate::error::{Error, Result};
    pub use crate::profile::ColorProfile;
    pub use crate::render::{GroupOrder, HelpRenderer};
    pub use crate::theme::{ColorScheme, StyleSheet, Tone};
    pub use crate::width::{FixedWidth, TerminalWidth, WidthProvider};
}
