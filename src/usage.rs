//! Usage-line synthesis.
//!
//! A raw use-line such as `deploy [args] <env> [target] [flags]` is split into
//! the command text and its placeholders. Placeholders are re-emitted as
//! dimmed suffixes in a fixed order: `[command]`, `[args]`, every other
//! bracketed placeholder in source order, then `[--flags]`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::CommandNode;
use crate::layout::StyledBlock;
use crate::theme::Program;

/// Placeholder for positional arguments.
pub const ARGS: &str = "[args]";
/// Placeholder for subcommands.
pub const COMMAND: &str = "[command]";
/// Placeholder for flags, as rendered.
pub const FLAGS: &str = "[--flags]";

const FLAGS_ALT: &str = "[flags]";

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]*\]").expect("bracket pattern is valid"));

/// A use-line broken into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageLine {
    /// Command text with every placeholder removed.
    pub text: String,
    /// Whether `[command]` is shown.
    pub has_command: bool,
    /// Whether `[args]` is shown.
    pub has_args: bool,
    /// Other bracketed placeholders in source order.
    pub others: Vec<String>,
    /// Whether `[--flags]` is shown.
    pub has_flags: bool,
}

impl UsageLine {
    /// Parses a command's use-line.
    ///
    /// `[command]` and `[--flags]` are also shown when the command has visible
    /// children or flags, even if its use-line does not mention them.
    pub fn parse(cmd: &CommandNode) -> Self {
        let raw = if cmd.use_line.trim().is_empty() {
            cmd.name.as_str()
        } else {
            cmd.use_line.as_str()
        };
        let has_args = raw.contains(ARGS);
        let has_flags = raw.contains(FLAGS) || raw.contains(FLAGS_ALT) || cmd.has_visible_flags();
        let has_command = raw.contains(COMMAND) || cmd.has_visible_children();

        let mut rest = raw.to_string();
        for known in [ARGS, FLAGS_ALT, FLAGS, COMMAND] {
            rest = rest.replace(known, "");
        }
        let others = BRACKETED
            .find_iter(&rest)
            .map(|m| m.as_str().to_string())
            .collect();
        let rest = BRACKETED.replace_all(&rest, "");

        Self {
            text: rest.split_whitespace().collect::<Vec<_>>().join(" "),
            has_command,
            has_args,
            others,
            has_flags,
        }
    }

    /// Placeholders in rendering order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.others.len() + 3);
        if self.has_command {
            out.push(COMMAND);
        }
        if self.has_args {
            out.push(ARGS);
        }
        out.extend(self.others.iter().map(String::as_str));
        if self.has_flags {
            out.push(FLAGS);
        }
        out
    }

    /// Renders the line.
    ///
    /// `complete` renders the text as the program name (the usage box);
    /// otherwise it is drawn as a subcommand (command listings).
    pub fn render(&self, styles: &Program, complete: bool) -> StyledBlock {
        let head = if complete {
            &styles.name
        } else {
            &styles.command
        };
        let mut out = head.render(&self.text);
        for placeholder in self.placeholders() {
            out.push_str(&styles.dimmed_argument.render(placeholder));
        }
        StyledBlock::new(out)
    }
}
