//! Width-aware layout primitives.
//!
//! All measurements here are in terminal columns: escape sequences count as
//! zero, wide characters count as two, and a grapheme cluster is never split.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::layout::{compute_width, truncate, StyledBlock};
//!
//! let usage = StyledBlock::new("example [command] [--flags]");
//! let width = compute_width(&[usage.clone()], 20, 4);
//! assert_eq!(width, 16);
//!
//! let cut = truncate(&usage, 10);
//! assert_eq!(cut.as_str(), "example […");
//! assert_eq!(cut.width(), 10);
//! ```

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::theme::Slot;

/// Glyph appended to truncated lines.
pub const ELLIPSIS: &str = "…";

/// Smallest alignment column for flag and command tables.
pub const MIN_SPACE: usize = 10;

/// Gap guaranteed between the widest label and its help text.
pub const SPACE_BETWEEN: usize = 2;

/// Rendered text tagged with its display width.
///
/// For multi-line text the width is that of the widest line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledBlock {
    text: String,
    width: usize,
}

impl StyledBlock {
    /// Wraps already-rendered text, measuring it once.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = display_width(&text);
        Self { text, width }
    }

    /// The rendered text, escape sequences included.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Display width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Reports whether the block holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the block, returning its text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for StyledBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Number of columns the widest line of `s` occupies.
pub fn display_width(s: &str) -> usize {
    let plain = strip_ansi_escapes::strip_str(s);
    plain
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

/// A piece of rendered text: either printable text or one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Escape(&'a str),
}

/// Splits `s` into printable runs and complete escape sequences.
///
/// CSI (`ESC [` … final byte), OSC (`ESC ]` … BEL or `ESC \`) and two-byte
/// escapes are recognized. An unterminated sequence runs to the end of input.
pub(crate) fn segments(s: &str) -> Vec<Segment<'_>> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != 0x1b {
            i += 1;
            continue;
        }
        if start < i {
            out.push(Segment::Text(&s[start..i]));
        }
        let end = escape_end(bytes, i);
        out.push(Segment::Escape(&s[i..end]));
        i = end;
        start = end;
    }
    if start < bytes.len() {
        out.push(Segment::Text(&s[start..]));
    }
    out
}

fn escape_end(bytes: &[u8], at: usize) -> usize {
    match bytes.get(at + 1) {
        Some(b'[') => {
            let mut j = at + 2;
            while j < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[j]) {
                    return j + 1;
                }
                j += 1;
            }
            bytes.len()
        }
        Some(b']') => {
            let mut j = at + 2;
            while j < bytes.len() {
                match bytes[j] {
                    0x07 => return j + 1,
                    0x1b if bytes.get(j + 1) == Some(&b'\\') => return j + 2,
                    _ => j += 1,
                }
            }
            bytes.len()
        }
        Some(b) if b.is_ascii() => at + 2,
        _ => at + 1,
    }
}

/// Width of the codeblock box that holds `blocks`.
///
/// The box hugs its widest line, leaving `min_padding` columns for the box's
/// own padding, and never grows past the terminal.
///
/// # Arguments
///
/// * `blocks` - Every line that goes into the box
/// * `terminal_width` - Columns available
/// * `min_padding` - Columns reserved around the content
///
/// # Returns
///
/// `min(terminal_width - min_padding, widest + min_padding)`, saturating at
/// zero on terminals narrower than the padding.
///
/// # Examples
///
/// ```rust
/// use helpdeck::layout::{compute_width, StyledBlock};
///
/// let lines = [StyledBlock::new("app run"), StyledBlock::new("app run --env prod")];
/// assert_eq!(compute_width(&lines, 120, 4), 22);
/// assert_eq!(compute_width(&lines, 20, 4), 16);
/// ```
pub fn compute_width(blocks: &[StyledBlock], terminal_width: usize, min_padding: usize) -> usize {
    let widest = blocks.iter().map(StyledBlock::width).max().unwrap_or(0);
    terminal_width
        .saturating_sub(min_padding)
        .min(widest + min_padding)
}

/// Cuts `block` so it fits in `max_width` columns, ending it with `…`.
///
/// Each line is cut on its own. A grapheme cluster is never split, and a
/// wide character that would straddle the limit is dropped whole.
///
/// # Arguments
///
/// * `block` - Rendered text, escape sequences included
/// * `max_width` - Columns the result may occupy, the ellipsis included
///
/// # Returns
///
/// The block itself when it already fits. Otherwise a new block whose every
/// line is at most `max_width` wide. Escape sequences are always kept whole,
/// including those past the cut, so any reset that closed a style in the
/// original still closes it in the result.
///
/// # Examples
///
/// ```rust
/// use helpdeck::layout::{truncate, StyledBlock};
///
/// let cut = truncate(&StyledBlock::new("\x1b[1mdeploy --all\x1b[0m"), 7);
/// assert_eq!(cut.as_str(), "\x1b[1mdeploy…\x1b[0m");
/// assert_eq!(cut.width(), 7);
/// ```
pub fn truncate(block: &StyledBlock, max_width: usize) -> StyledBlock {
    if block.width() <= max_width {
        return block.clone();
    }
    let lines: Vec<String> = block
        .as_str()
        .split('\n')
        .map(|line| truncate_line(line, max_width))
        .collect();
    StyledBlock::new(lines.join("\n"))
}

fn truncate_line(line: &str, max_width: usize) -> String {
    if display_width(line) <= max_width {
        return line.to_string();
    }
    let tail_width = UnicodeWidthStr::width(ELLIPSIS);
    let budget = max_width.saturating_sub(tail_width);
    let mut out = String::with_capacity(line.len());
    let mut used = 0;
    let mut cut = false;
    for segment in segments(line) {
        match segment {
            Segment::Escape(seq) => out.push_str(seq),
            Segment::Text(text) => {
                for grapheme in text.graphemes(true) {
                    if cut {
                        break;
                    }
                    let w = UnicodeWidthStr::width(grapheme);
                    if used + w > budget {
                        cut = true;
                        if tail_width <= max_width {
                            out.push_str(ELLIPSIS);
                        }
                        break;
                    }
                    used += w;
                    out.push_str(grapheme);
                }
            }
        }
    }
    out
}

/// Alignment column shared by every label set.
///
/// Commands and flags are measured together so that their help text lines up
/// on one column across both tables.
///
/// # Arguments
///
/// * `label_sets` - One slice of rendered labels per table
///
/// # Returns
///
/// The widest label plus [`SPACE_BETWEEN`], never below [`MIN_SPACE`].
///
/// # Examples
///
/// ```rust
/// use helpdeck::layout::{column_space, StyledBlock};
///
/// let commands = [StyledBlock::new("sub [args]")];
/// let flags = [StyledBlock::new("-s --string3")];
/// assert_eq!(column_space(&[&commands[..], &flags[..]]), 14);
/// assert_eq!(column_space(&[]), 10);
/// ```
pub fn column_space(label_sets: &[&[StyledBlock]]) -> usize {
    label_sets
        .iter()
        .flat_map(|set| set.iter())
        .map(|label| label.width() + SPACE_BETWEEN)
        .fold(MIN_SPACE, usize::max)
}

/// Greedy word wrap to `width` columns.
///
/// Existing line breaks are kept. A word wider than `width` is hard-broken at
/// grapheme boundaries. The input is expected to be plain text.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            if current_width > 0 && current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }
            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }
            for grapheme in word.graphemes(true) {
                let w = UnicodeWidthStr::width(grapheme);
                if current_width > 0 && current_width + w > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push_str(grapheme);
                current_width += w;
            }
        }
        lines.push(current);
    }
    lines
}

/// Word-wraps `text` to `width` columns and indents every line by `indent`.
///
/// Empty lines stay empty rather than carrying trailing indentation.
pub fn wrap_and_pad(text: &str, width: usize, indent: usize) -> String {
    let indented = Slot::new().padding_left(indent);
    wrap(text, width)
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                indented.render(&line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draws `lines` inside a filled box `width` columns wide.
///
/// `base` supplies the fill colors and the padding around the content; the
/// box is fixed to `width` (padding included) and shifted right by `margin`
/// unstyled columns. Lines are expected to fit already: lipgloss wraps any
/// line wider than the inner width.
///
/// # Examples
///
/// ```rust
/// use helpdeck::layout::{boxed, StyledBlock};
/// use helpdeck::theme::Slot;
///
/// let base = Slot::new().padding(1, 2, 1, 2);
/// let out = boxed(&[StyledBlock::new("ls -la")], 10, &base, 2);
/// assert_eq!(out.lines().nth(1), Some("    ls -la  "));
/// ```
pub fn boxed(lines: &[StyledBlock], width: usize, base: &Slot, margin: usize) -> String {
    let body: Vec<&str> = lines.iter().map(StyledBlock::as_str).collect();
    base.merge(&Slot::new().width(width).margin_left(margin))
        .render(&body.join("\n"))
}

/// One row of a two-column table: `label`, padding up to `space`, `help`.
///
/// The row is indented by `indent` columns and the help text starts at
/// column `indent + space`. A row without help ends right after its label.
///
/// # Examples
///
/// ```rust
/// use helpdeck::layout::{column_row, StyledBlock};
///
/// let label = StyledBlock::new("--name");
/// assert_eq!(column_row(&label, 10, "the name", 4), "    --name    the name");
/// assert_eq!(column_row(&label, 10, "", 4), "    --name");
/// ```
pub fn column_row(label: &StyledBlock, space: usize, help: &str, indent: usize) -> String {
    let cell = Slot::new().padding_left(indent);
    if help.is_empty() {
        return cell.render(label.as_str());
    }
    let cell = cell.width(indent + space.max(label.width()));
    format!("{}{}", cell.render(label.as_str()), help)
}
