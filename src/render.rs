//! The help renderer.
//!
//! One render pass walks a fixed sequence of [`Section`]s and appends each
//! one that has content:
//!
//! ```text
//! Preamble → Usage → Examples → CommandGroups → Flags → Done
//! ```
//!
//! Everything the pass needs (style sheet, width, tokenizer state) is created
//! inside the call and dropped at the end of it, so rendering a parent and
//! then a child never shares state.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::prelude::*;
//!
//! let root = CommandNode::new("example")
//!     .with_short("Short help")
//!     .with_example("example --name Carlos")
//!     .with_flag(FlagSpec::string("name", "the name"));
//!
//! let help = HelpRenderer::new()
//!     .with_width(45)
//!     .with_profile(ColorProfile::NoColor)
//!     .render_help(&root);
//!
//! assert!(help.contains("USAGE"));
//! assert!(help.contains("example --name Carlos"));
//! assert!(help.contains("--name    the name"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::command::{CommandNode, FlagSpec};
use crate::error::Result;
use crate::highlight::Highlighter;
use crate::layout::{self, boxed, column_row, column_space, compute_width, truncate, StyledBlock};
use crate::profile::ColorProfile;
use crate::report;
use crate::theme::{ColorScheme, Slot, StyleSheet};
use crate::tokenizer::tokenize_example;
use crate::usage::UsageLine;
use crate::width::{FixedWidth, TerminalWidth, WidthProvider};

/// Indentation of the preamble text.
const SHORT_PAD: usize = 2;
/// Indentation of flag and command rows.
const LONG_PAD: usize = 4;
/// Left margin of the codeblock.
const MARGIN: usize = 2;
/// Below this many columns, row help text is left unwrapped.
const MIN_HELP_WIDTH: usize = 10;

/// The stages of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Long (or short) description.
    Preamble,
    /// The usage box.
    Usage,
    /// The example box.
    Examples,
    /// Subcommand listings, default group first.
    CommandGroups,
    /// The flag table.
    Flags,
    /// Terminal state.
    Done,
}

impl Section {
    /// The stage that follows this one.
    pub fn next(self) -> Self {
        match self {
            Self::Preamble => Self::Usage,
            Self::Usage => Self::Examples,
            Self::Examples => Self::CommandGroups,
            Self::CommandGroups => Self::Flags,
            Self::Flags | Self::Done => Self::Done,
        }
    }
}

/// Order in which named command groups are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Ascending by group ID.
    #[default]
    Lexical,
    /// The order groups were registered on the parent; IDs that were never
    /// registered follow in order of first use.
    Registration,
}

/// A two-column table row.
#[derive(Debug, Clone)]
struct Row {
    label: StyledBlock,
    help: Vec<String>,
}

/// A titled list of command rows.
#[derive(Debug, Clone)]
struct CommandGroup {
    title: String,
    rows: Vec<Row>,
}

/// Everything a pass lays out before writing a single line.
#[derive(Debug)]
struct Plan {
    styles: StyleSheet,
    block_width: usize,
    usage: StyledBlock,
    examples: Vec<StyledBlock>,
    groups: Vec<CommandGroup>,
    flags: Vec<Row>,
    space: usize,
}

/// Renders help and error output for a command tree.
#[derive(Debug)]
pub struct HelpRenderer {
    scheme: ColorScheme,
    is_dark: bool,
    width: Box<dyn WidthProvider>,
    profile: ColorProfile,
    group_order: GroupOrder,
    suppress_defaults: bool,
    capitalize_help: bool,
    sort_flags: bool,
}

impl Default for HelpRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpRenderer {
    /// Creates a renderer with the stock scheme, a dark background, a
    /// terminal-measured width and a detected color profile.
    pub fn new() -> Self {
        Self {
            scheme: ColorScheme::default(),
            is_dark: true,
            width: Box::new(TerminalWidth::new()),
            profile: ColorProfile::detect(),
            group_order: GroupOrder::default(),
            suppress_defaults: true,
            capitalize_help: false,
            sort_flags: false,
        }
    }

    /// Uses a different color scheme.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use helpdeck::prelude::*;
    ///
    /// let scheme = ColorScheme {
    ///     title: Tone::fixed("#FF0000"),
    ///     ..ColorScheme::default()
    /// };
    /// let renderer = HelpRenderer::new()
    ///     .with_scheme(scheme)
    ///     .with_profile(ColorProfile::TrueColor);
    /// assert_eq!(renderer.style_sheet().title.get_foreground(), Some("#FF0000"));
    /// ```
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Picks the light or dark variant of every tone.
    ///
    /// The renderer assumes a dark background unless told otherwise.
    pub fn with_dark_background(mut self, is_dark: bool) -> Self {
        self.is_dark = is_dark;
        self
    }

    /// Measures the width with a custom provider.
    ///
    /// The provider is asked once per render. Whatever it reports is used for
    /// the preamble wrap, the codeblock width and the help column.
    ///
    /// # Arguments
    ///
    /// * `provider` - Any [`WidthProvider`]; [`TerminalWidth`] is the default
    ///
    /// # Examples
    ///
    /// ```rust
    /// use helpdeck::prelude::*;
    ///
    /// #[derive(Debug)]
    /// struct Narrow;
    ///
    /// impl WidthProvider for Narrow {
    ///     fn width(&self) -> usize {
    ///         40
    ///     }
    /// }
    ///
    /// let renderer = HelpRenderer::new().with_width_provider(Narrow);
    /// assert_eq!(renderer.style_sheet().width, 40);
    /// ```
    pub fn with_width_provider(mut self, provider: impl WidthProvider + 'static) -> Self {
        self.width = Box::new(provider);
        self
    }

    /// Renders at a fixed width, clamped to `1..=120`.
    ///
    /// Shorthand for `with_width_provider(FixedWidth(width))`.
    pub fn with_width(self, width: usize) -> Self {
        self.with_width_provider(FixedWidth(width))
    }

    /// Overrides the detected color profile.
    ///
    /// Colors are downsampled to the profile while the style sheet is built;
    /// [`ColorProfile::NoColor`] also strips every escape from the output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use helpdeck::prelude::*;
    ///
    /// let help = HelpRenderer::new()
    ///     .with_width(45)
    ///     .with_profile(ColorProfile::NoColor)
    ///     .render_help(&CommandNode::new("app"));
    /// assert!(!help.contains('\x1b'));
    /// ```
    pub fn with_profile(mut self, profile: ColorProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets how named command groups are ordered.
    ///
    /// Ungrouped commands are always listed first, under `COMMANDS`. See
    /// [`GroupOrder`] for the choices; [`GroupOrder::Lexical`] is the default.
    pub fn with_group_order(mut self, order: GroupOrder) -> Self {
        self.group_order = order;
        self
    }

    /// Hides flag defaults of `false`, `0` and `[]` when enabled (default).
    ///
    /// Empty defaults are never shown either way.
    pub fn with_suppressed_defaults(mut self, suppress: bool) -> Self {
        self.suppress_defaults = suppress;
        self
    }

    /// Capitalizes the first letter of descriptions when enabled.
    pub fn with_capitalized_help(mut self, capitalize: bool) -> Self {
        self.capitalize_help = capitalize;
        self
    }

    /// Lists flags by long name instead of declaration order when enabled.
    pub fn with_sorted_flags(mut self, sort: bool) -> Self {
        self.sort_flags = sort;
        self
    }

    /// Builds the style sheet for one render.
    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet::build_for(&self.scheme, self.width.width(), self.is_dark, self.profile)
    }

    /// Renders the help screen for `cmd`.
    pub fn render_help(&self, cmd: &CommandNode) -> String {
        let plan = self.plan(cmd);
        let mut out = String::new();
        let mut section = Section::Preamble;
        while section != Section::Done {
            match section {
                Section::Preamble => self.write_preamble(&mut out, &plan, cmd),
                Section::Usage => write_usage(&mut out, &plan),
                Section::Examples => write_examples(&mut out, &plan),
                Section::CommandGroups => write_command_groups(&mut out, &plan),
                Section::Flags => write_flags(&mut out, &plan),
                Section::Done => {}
            }
            section = section.next();
        }
        out.push('\n');
        self.profile.apply(&out).into_owned()
    }

    /// Renders the help screen for `cmd` into `w`.
    pub fn write_help<W: Write>(&self, cmd: &CommandNode, w: &mut W) -> Result<()> {
        w.write_all(self.render_help(cmd).as_bytes())?;
        Ok(())
    }

    /// Renders an error report.
    pub fn render_error(&self, err: &dyn fmt::Display) -> String {
        let rendered = report::render_error(&self.style_sheet(), err);
        self.profile.apply(&rendered).into_owned()
    }

    /// Renders an error report into `w`.
    pub fn write_error<W: Write>(&self, err: &dyn fmt::Display, w: &mut W) -> Result<()> {
        w.write_all(self.render_error(err).as_bytes())?;
        Ok(())
    }

    fn plan(&self, cmd: &CommandNode) -> Plan {
        let styles = self.style_sheet();
        let width = styles.width;

        let usage = UsageLine::parse(cmd).render(&styles.codeblock.program, true);
        let lines = tokenize_example(&cmd.example, cmd);
        let examples = Highlighter::new(&styles.codeblock).render_example(&lines);

        let padding = styles.codeblock.base.get_horizontal_padding();
        let mut candidates = Vec::with_capacity(examples.len() + 1);
        candidates.push(usage.clone());
        candidates.extend(examples.iter().cloned());
        let block_width = compute_width(&candidates, width, padding);
        let inner = block_width.saturating_sub(padding);
        let usage = truncate(&usage, inner);
        let examples = examples.iter().map(|e| truncate(e, inner)).collect();

        let command_labels = self.command_labels(cmd, &styles);
        let flag_labels: Vec<(StyledBlock, &FlagSpec)> = self
            .listed_flags(cmd)
            .into_iter()
            .map(|f| (flag_label(f, &styles), f))
            .collect();

        let all_commands: Vec<StyledBlock> = command_labels
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.clone()))
            .collect();
        let all_flags: Vec<StyledBlock> = flag_labels.iter().map(|(l, _)| l.clone()).collect();
        let space = column_space(&[&all_commands[..], &all_flags[..]]);
        let help_width = width.saturating_sub(LONG_PAD + space);
        debug!(width, block_width, space, command = %cmd.name, "laid out help");

        let groups = command_labels
            .into_iter()
            .map(|(title, rows)| CommandGroup {
                title,
                rows: rows
                    .into_iter()
                    .map(|(label, child)| Row {
                        help: self.help_lines(&styles, &child.short_help, None, help_width),
                        label,
                    })
                    .collect(),
            })
            .collect();
        let flags = flag_labels
            .into_iter()
            .map(|(label, flag)| Row {
                help: self.help_lines(
                    &styles,
                    &flag.usage,
                    self.shown_default(&flag.default_value),
                    help_width,
                ),
                label,
            })
            .collect();

        Plan {
            styles,
            block_width,
            usage,
            examples,
            groups,
            flags,
            space,
        }
    }

    fn write_preamble(&self, out: &mut String, plan: &Plan, cmd: &CommandNode) {
        let text = if cmd.long_help.is_empty() {
            &cmd.short_help
        } else {
            &cmd.long_help
        };
        if text.is_empty() {
            return;
        }
        let text = self.describe(text);
        out.push('\n');
        let wrapped = layout::wrap_and_pad(&text, plan.styles.width.saturating_sub(SHORT_PAD), SHORT_PAD);
        for line in wrapped.lines() {
            if !line.is_empty() {
                out.push_str(&plan.styles.text.render(line));
            }
            out.push('\n');
        }
    }

    /// Visible children bucketed by group, in listing order, each group's
    /// rows sorted by name. Empty groups are dropped.
    fn command_labels<'c>(
        &self,
        cmd: &'c CommandNode,
        styles: &StyleSheet,
    ) -> Vec<(String, Vec<(StyledBlock, &'c CommandNode)>)> {
        let mut buckets: BTreeMap<&str, Vec<&CommandNode>> = BTreeMap::new();
        for child in cmd.visible_children() {
            buckets
                .entry(child.group_id.as_deref().unwrap_or(""))
                .or_default()
                .push(child);
        }

        let mut order: Vec<&str> = Vec::new();
        if buckets.contains_key("") {
            order.push("");
        }
        match self.group_order {
            GroupOrder::Lexical => {
                order.extend(buckets.keys().copied().filter(|id| !id.is_empty()));
            }
            GroupOrder::Registration => {
                for group in &cmd.groups {
                    if buckets.contains_key(group.id.as_str()) && !order.contains(&group.id.as_str()) {
                        order.push(group.id.as_str());
                    }
                }
                for child in cmd.visible_children() {
                    if let Some(id) = child.group_id.as_deref() {
                        if !order.contains(&id) {
                            order.push(id);
                        }
                    }
                }
            }
        }

        order
            .into_iter()
            .filter_map(|id| {
                let mut children = buckets.remove(id)?;
                children.sort_by(|a, b| a.name.cmp(&b.name));
                let title = if id.is_empty() {
                    "commands".to_string()
                } else {
                    cmd.group_title(id).unwrap_or(id).to_string()
                };
                let rows = children
                    .into_iter()
                    .map(|child| (UsageLine::parse(child).render(&styles.program, false), child))
                    .collect();
                Some((title, rows))
            })
            .collect()
    }

    fn listed_flags<'c>(&self, cmd: &'c CommandNode) -> Vec<&'c FlagSpec> {
        let mut flags: Vec<&FlagSpec> = cmd.visible_flags().collect();
        if self.sort_flags {
            flags.sort_by(|a, b| a.long_name.cmp(&b.long_name));
        }
        flags
    }

    fn shown_default<'f>(&self, value: &'f str) -> Option<&'f str> {
        if value.is_empty() {
            return None;
        }
        if self.suppress_defaults && matches!(value, "false" | "0" | "[]") {
            return None;
        }
        Some(value)
    }

    fn describe(&self, text: &str) -> String {
        if !self.capitalize_help {
            return text.to_string();
        }
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Styled help lines for one row, wrapped to `width` when it is usable.
    fn help_lines(
        &self,
        styles: &StyleSheet,
        text: &str,
        default: Option<&str>,
        width: usize,
    ) -> Vec<String> {
        let text = self.describe(text);
        let wrap_width = if width >= MIN_HELP_WIDTH { width } else { usize::MAX };
        let plain = if text.is_empty() {
            Vec::new()
        } else {
            layout::wrap(&text, wrap_width)
        };
        let mut lines: Vec<String> = plain
            .iter()
            .map(|line| styles.flag_description.render(line))
            .collect();

        if let Some(default) = default {
            let default = format!("({default})");
            let last_width = plain.last().map_or(0, |l| UnicodeWidthStr::width(l.as_str()));
            let default_width = UnicodeWidthStr::width(default.as_str());
            let tight = styles.flag_default.merge(&Slot::new().padding_left(0));
            if text.is_empty() {
                lines = vec![tight.render(&default)];
            } else if last_width + 1 + default_width <= wrap_width {
                if let Some(last) = lines.last_mut() {
                    last.push_str(&styles.flag_default.render(&default));
                }
            } else {
                lines.push(tight.render(&default));
            }
        }
        lines
    }
}

fn flag_label(flag: &FlagSpec, styles: &StyleSheet) -> StyledBlock {
    let tight = styles.program.flag.merge(&Slot::new().padding_left(0));
    let long = format!("--{}", flag.long_name);
    let text = match flag.short_name {
        Some(short) => format!(
            "{}{}",
            tight.render(&format!("-{short}")),
            styles.program.flag.render(&long)
        ),
        None => tight.render(&long),
    };
    StyledBlock::new(text)
}

fn write_title(out: &mut String, styles: &StyleSheet, title: &str) {
    out.push('\n');
    out.push_str(&styles.title.render(title));
    out.push_str("\n\n");
}

fn write_usage(out: &mut String, plan: &Plan) {
    write_title(out, &plan.styles, "usage");
    out.push_str(&boxed(
        std::slice::from_ref(&plan.usage),
        plan.block_width,
        &plan.styles.codeblock.base,
        MARGIN,
    ));
    out.push('\n');
}

fn write_examples(out: &mut String, plan: &Plan) {
    if plan.examples.is_empty() {
        return;
    }
    write_title(out, &plan.styles, "examples");
    out.push_str(&boxed(
        &plan.examples,
        plan.block_width,
        &plan.styles.codeblock.base,
        MARGIN,
    ));
    out.push('\n');
}

fn write_command_groups(out: &mut String, plan: &Plan) {
    for group in &plan.groups {
        if group.rows.is_empty() {
            continue;
        }
        write_title(out, &plan.styles, &group.title);
        write_rows(out, &group.rows, plan.space);
    }
}

fn write_flags(out: &mut String, plan: &Plan) {
    if plan.flags.is_empty() {
        return;
    }
    write_title(out, &plan.styles, "flags");
    write_rows(out, &plan.flags, plan.space);
}

fn write_rows(out: &mut String, rows: &[Row], space: usize) {
    let hanging = Slot::new().padding_left(LONG_PAD + space);
    for row in rows {
        let mut help = row.help.iter();
        let first = help.next().map_or("", String::as_str);
        out.push_str(&column_row(&row.label, space, first, LONG_PAD));
        out.push('\n');
        for line in help {
            out.push_str(&hanging.render(line));
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Group;

    fn renderer() -> HelpRenderer {
        HelpRenderer::new()
            .with_width(45)
            .with_profile(ColorProfile::NoColor)
    }

    #[test]
    fn test_section_order() {
        let mut seen = vec![Section::Preamble];
        while let Some(&last) = seen.last() {
            if last == Section::Done {
                break;
            }
            seen.push(last.next());
        }
        assert_eq!(
            seen,
            vec![
                Section::Preamble,
                Section::Usage,
                Section::Examples,
                Section::CommandGroups,
                Section::Flags,
                Section::Done,
            ]
        );
        assert_eq!(Section::Done.next(), Section::Done);
    }

    #[test]
    fn test_simple_command() {
        let out = renderer().render_help(&CommandNode::new("simple"));
        assert_eq!(
            out,
            "\n  USAGE\n\n            \n    simple  \n            \n\n"
        );
    }

    #[test]
    fn test_preamble_prefers_long_help() {
        let cmd = CommandNode::new("simple")
            .with_short("Short help")
            .with_long("Long help");
        let out = renderer().render_help(&cmd);
        assert!(out.starts_with("\n  Long help\n\n  USAGE\n"));
        assert!(!out.contains("Short help"));
    }

    #[test]
    fn test_capitalized_help() {
        let cmd = CommandNode::new("simple").with_short("lower case");
        let out = renderer().with_capitalized_help(true).render_help(&cmd);
        assert!(out.starts_with("\n  Lower case\n"));
    }

    #[test]
    fn test_flag_defaults() {
        let cmd = CommandNode::new("simple")
            .with_flag(FlagSpec::string("string1", "a string flag").with_default("default-value"))
            .with_flag(FlagSpec::string("int1", "an int flag").with_default("0"))
            .with_flag(FlagSpec::boolean("bool1", "a bool flag"))
            .with_flag(FlagSpec::string("slice1", "a slice flag").with_default("[]"))
            .with_flag(FlagSpec::boolean("hidden", "nope").with_short('z').hidden());

        let out = renderer().render_help(&cmd);
        assert!(out.contains("    --string1  a string flag (default-value)\n"));
        assert!(out.contains("    --int1     an int flag\n"));
        assert!(out.contains("    --bool1    a bool flag\n"));
        assert!(out.contains("    --slice1   a slice flag\n"));
        assert!(!out.contains("hidden"));

        let out = renderer().with_suppressed_defaults(false).render_help(&cmd);
        assert!(out.contains("    --int1     an int flag (0)\n"));
        assert!(out.contains("    --bool1    a bool flag (false)\n"));
    }

    #[test]
    fn test_flag_labels_with_shorthand() {
        let cmd = CommandNode::new("simple")
            .with_flag(FlagSpec::string("string3", "a string flag").with_short('s'));
        let out = renderer().render_help(&cmd);
        assert!(out.contains("    -s --string3  a string flag\n"));
    }

    #[test]
    fn test_sorted_flags() {
        let cmd = CommandNode::new("simple")
            .with_flag(FlagSpec::boolean("zeta", "z"))
            .with_flag(FlagSpec::boolean("alpha", "a"));
        let declared = renderer().render_help(&cmd);
        assert!(declared.find("--zeta") < declared.find("--alpha"));
        let sorted = renderer().with_sorted_flags(true).render_help(&cmd);
        assert!(sorted.find("--alpha") < sorted.find("--zeta"));
    }

    #[test]
    fn test_long_flag_help_wraps_with_hanging_indent() {
        let cmd = CommandNode::new("simple").with_flag(FlagSpec::string(
            "name",
            "a rather long description that cannot fit",
        ));
        let out = renderer().render_help(&cmd);
        assert!(out.contains(
            "    --name    a rather long description that\n              cannot fit\n"
        ));
    }

    #[test]
    fn test_group_ordering() {
        let cmd = CommandNode::new("simple")
            .with_group(Group::new("2", "Second group"))
            .with_group(Group::new("1", "First group"))
            .with_child(CommandNode::new("sub-cmd-3").with_short("c").with_group_id("2"))
            .with_child(CommandNode::new("sub-cmd-2").with_short("b").with_group_id("1"))
            .with_child(CommandNode::new("sub-cmd").with_short("a"));

        let lexical = renderer().render_help(&cmd);
        let commands = lexical.find("COMMANDS");
        let first = lexical.find("FIRST GROUP");
        let second = lexical.find("SECOND GROUP");
        assert!(commands.is_some());
        assert!(commands < first && first < second);

        let registered = renderer()
            .with_group_order(GroupOrder::Registration)
            .render_help(&cmd);
        assert!(registered.find("SECOND GROUP") < registered.find("FIRST GROUP"));
    }

    #[test]
    fn test_empty_and_hidden_groups_are_skipped() {
        let cmd = CommandNode::new("simple")
            .with_group(Group::new("ops", "Operations"))
            .with_child(CommandNode::new("secret").with_group_id("ops").hidden());
        let out = renderer().render_help(&cmd);
        assert!(!out.contains("OPERATIONS"));
        assert!(!out.contains("COMMANDS"));
        assert!(!out.contains("[command]"));
    }

    #[test]
    fn test_unregistered_group_uses_its_id() {
        let cmd = CommandNode::new("simple")
            .with_child(CommandNode::new("x").with_short("x").with_group_id("misc"));
        let out = renderer().render_help(&cmd);
        assert!(out.contains("\n  MISC\n"));
    }

    #[test]
    fn test_commands_and_flags_share_alignment() {
        let cmd = CommandNode::new("simple")
            .with_child(CommandNode::new("sub1").with_short("a sub command"))
            .with_flag(FlagSpec::string("a-much-longer-flag", "flag help"));
        let out = renderer().render_help(&cmd);
        // "--a-much-longer-flag" is 20 wide, so help starts at column 4 + 22.
        assert!(out.contains(&format!("    sub1{}a sub command\n", " ".repeat(18))));
        assert!(out.contains("    --a-much-longer-flag  flag help\n"));
    }

    #[test]
    fn test_examples_are_truncated_to_the_box() {
        let cmd = CommandNode::new("example").with_example(
            "example with a very long list of arguments that overflows the terminal",
        );
        let out = renderer().render_help(&cmd);
        let line = out
            .lines()
            .find(|l| l.contains("example with"))
            .unwrap_or_default();
        assert!(line.contains('…'));
        assert_eq!(UnicodeWidthStr::width(line), 45 - 4 + MARGIN);
    }

    #[test]
    fn test_render_is_idempotent() {
        let cmd = CommandNode::new("example")
            .with_short("Short help")
            .with_example("# Run it:\nexample --name x")
            .with_flag(FlagSpec::string("name", "the name"));
        let r = renderer();
        assert_eq!(r.render_help(&cmd), r.render_help(&cmd));
    }

    #[test]
    fn test_write_help_to_sink() {
        let mut sink = Vec::new();
        let cmd = CommandNode::new("simple");
        renderer()
            .write_help(&cmd, &mut sink)
            .expect("writing to a Vec cannot fail");
        assert_eq!(
            String::from_utf8(sink).expect("utf-8"),
            renderer().render_help(&cmd)
        );
    }

    #[test]
    fn test_write_error_to_sink() {
        let mut sink = Vec::new();
        renderer()
            .write_error(&"unknown command \"nope\" for \"simple\"", &mut sink)
            .expect("writing to a Vec cannot fail");
        let out = String::from_utf8(sink).expect("utf-8");
        assert!(out.contains("ERROR"));
        assert!(out.contains("Try --help for usage."));
    }

    #[test]
    fn test_command_without_help_has_no_trailing_space() {
        let root = CommandNode::new("app")
            .with_child(CommandNode::new("sub [command]"))
            .with_child(CommandNode::new("other").with_short("does other things"));
        let out = renderer().render_help(&root);
        assert!(out.contains("\n    sub [command]\n"));
        assert!(out.contains("    other          does other things\n"));
    }

    #[test]
    fn test_style_sheet_follows_profile() {
        let title = |profile| {
            renderer()
                .with_profile(profile)
                .style_sheet()
                .title
                .get_foreground()
                .map(str::to_string)
        };
        let truecolor = title(ColorProfile::TrueColor);
        let ansi256 = title(ColorProfile::Ansi256);
        let ansi = title(ColorProfile::Ansi);
        assert!(truecolor.is_some() && ansi256.is_some() && ansi.is_some());
        assert_ne!(truecolor, ansi256);
        assert_ne!(truecolor, ansi);
        assert_ne!(ansi256, ansi);
        assert_eq!(title(ColorProfile::NoColor), None);
    }
}
