//! Color schemes and the resolved style sheet used by every renderer.
//!
//! Styles are plain immutable records ([`Slot`]). A slot never mutates; it is
//! combined with another through [`Slot::merge`] (base ⊕ override), which
//! lets a renderer tweak padding for one fragment without touching the sheet
//! shared with its siblings.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::theme::{ColorScheme, Slot, StyleSheet};
//!
//! let sheet = StyleSheet::build(&ColorScheme::default(), 80, true);
//! let tight = sheet.program.flag.merge(&Slot::new().padding_left(0));
//! assert_eq!(tight.get_padding_left(), 0);
//! assert_eq!(sheet.program.flag.get_padding_left(), 1);
//! ```

use lipgloss_extras::prelude::*;

use crate::profile::ColorProfile;

/// A color with a light-background and a dark-background variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tone {
    /// Color used on light terminals.
    pub light: String,
    /// Color used on dark terminals.
    pub dark: String,
}

impl Tone {
    /// Creates a tone with distinct light and dark variants.
    pub fn adaptive(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// Creates a tone that is the same on every background.
    pub fn fixed(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            light: color.clone(),
            dark: color,
        }
    }

    /// Picks the variant for the given background.
    pub fn resolve(&self, is_dark: bool) -> &str {
        if is_dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

const CHARCOAL: &str = "#3A3943";
const ASH: &str = "#DFDBDD";
const CHARPLE: &str = "#6B50FF";
const SALT: &str = "#F1EFEF";
const MALIBU: &str = "#00A4FF";
const SQUID: &str = "#858392";
const PONY: &str = "#FF4FBF";
const DOLLY: &str = "#FF60FF";
const CORAL: &str = "#FF577D";
const SALMON: &str = "#FF7F90";
const BUTTER: &str = "#FFFAF1";
const CHERRY: &str = "#FF388B";
const JULEP: &str = "#00FFB2";

/// The palette a [`StyleSheet`] is built from.
///
/// Optional tones fall back to [`ColorScheme::base`], which is expected to be
/// readable on the terminal's own background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    /// Plain text.
    pub base: Tone,
    /// Section titles.
    pub title: Tone,
    /// Codeblock background.
    pub codeblock: Tone,
    /// Program name.
    pub program: Tone,
    /// Placeholders such as `[args]`.
    pub dimmed_argument: Tone,
    /// Example comments.
    pub comment: Tone,
    /// Flags.
    pub flag: Tone,
    /// Subcommands.
    pub command: Tone,
    /// Quoted strings.
    pub quoted_string: Tone,
    /// Plain arguments.
    pub argument: Tone,
    /// Help text next to flags and commands.
    pub help: Option<Tone>,
    /// Flag default values.
    pub flag_default: Option<Tone>,
    /// Error header foreground and background.
    pub error_header: (Tone, Tone),
    /// Error message body.
    pub error_details: Option<Tone>,
}

impl ColorScheme {
    /// The stock palette.
    pub fn charm() -> Self {
        Self {
            base: Tone::adaptive(CHARCOAL, ASH),
            title: Tone::fixed(CHARPLE),
            codeblock: Tone::adaptive(SALT, "#2F2E36"),
            program: Tone::fixed(MALIBU),
            dimmed_argument: Tone::fixed(SQUID),
            comment: Tone::adaptive(SQUID, "#747282"),
            flag: Tone::adaptive("#00BC82", JULEP),
            command: Tone::adaptive(PONY, DOLLY),
            quoted_string: Tone::adaptive(CORAL, SALMON),
            argument: Tone::adaptive(CHARCOAL, ASH),
            help: None,
            flag_default: Some(Tone::fixed(SQUID)),
            error_header: (Tone::fixed(BUTTER), Tone::fixed(CHERRY)),
            error_details: None,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::charm()
    }
}

/// An immutable set of visual attributes.
///
/// Every attribute is optional so that [`Slot::merge`] can tell "unset" apart
/// from "set to the default". Rendering hands the whole record to a lipgloss
/// [`Style`], so padding, margin, width and the uppercase transform are drawn
/// by lipgloss along with the colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    foreground: Option<String>,
    background: Option<String>,
    bold: Option<bool>,
    uppercase: Option<bool>,
    padding_top: Option<usize>,
    padding_right: Option<usize>,
    padding_bottom: Option<usize>,
    padding_left: Option<usize>,
    margin_left: Option<usize>,
    width: Option<usize>,
}

impl Slot {
    /// An empty slot that renders text unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foreground color.
    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Sets the background color.
    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Sets bold.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Uppercases text before rendering.
    pub fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = Some(uppercase);
        self
    }

    /// Sets padding on all four sides, in the order top, right, bottom, left.
    pub fn padding(mut self, top: usize, right: usize, bottom: usize, left: usize) -> Self {
        self.padding_top = Some(top);
        self.padding_right = Some(right);
        self.padding_bottom = Some(bottom);
        self.padding_left = Some(left);
        self
    }

    /// Sets left padding in columns.
    pub fn padding_left(mut self, n: usize) -> Self {
        self.padding_left = Some(n);
        self
    }

    /// Sets right padding in columns.
    pub fn padding_right(mut self, n: usize) -> Self {
        self.padding_right = Some(n);
        self
    }

    /// Sets an unstyled left margin in columns.
    pub fn margin_left(mut self, n: usize) -> Self {
        self.margin_left = Some(n);
        self
    }

    /// Sets the block width, padding included. Shorter lines are filled out
    /// to it; longer ones are wrapped by lipgloss.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Left padding, zero when unset.
    pub fn get_padding_left(&self) -> usize {
        self.padding_left.unwrap_or(0)
    }

    /// Right padding, zero when unset.
    pub fn get_padding_right(&self) -> usize {
        self.padding_right.unwrap_or(0)
    }

    /// Combined horizontal padding.
    pub fn get_horizontal_padding(&self) -> usize {
        self.get_padding_left() + self.get_padding_right()
    }

    /// Left margin, zero when unset.
    pub fn get_margin_left(&self) -> usize {
        self.margin_left.unwrap_or(0)
    }

    /// Foreground color, if any.
    pub fn get_foreground(&self) -> Option<&str> {
        self.foreground.as_deref()
    }

    /// Background color, if any.
    pub fn get_background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Returns `self` with every attribute set in `over` replaced.
    pub fn merge(&self, over: &Slot) -> Slot {
        Slot {
            foreground: over.foreground.clone().or_else(|| self.foreground.clone()),
            background: over.background.clone().or_else(|| self.background.clone()),
            bold: over.bold.or(self.bold),
            uppercase: over.uppercase.or(self.uppercase),
            padding_top: over.padding_top.or(self.padding_top),
            padding_right: over.padding_right.or(self.padding_right),
            padding_bottom: over.padding_bottom.or(self.padding_bottom),
            padding_left: over.padding_left.or(self.padding_left),
            margin_left: over.margin_left.or(self.margin_left),
            width: over.width.or(self.width),
        }
    }

    /// Renders `text` through lipgloss.
    ///
    /// Padding is drawn with the slot's background so adjacent fragments in a
    /// codeblock read as one continuous band.
    pub fn render(&self, text: &str) -> String {
        self.to_style().render(text)
    }

    /// The lipgloss style this slot describes.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = &self.foreground {
            style = style.foreground(Color::from(fg.as_str()));
        }
        if let Some(bg) = &self.background {
            style = style.background(Color::from(bg.as_str()));
        }
        if self.bold.unwrap_or(false) {
            style = style.bold(true);
        }
        let top = self.padding_top.unwrap_or(0);
        let bottom = self.padding_bottom.unwrap_or(0);
        if top + bottom + self.get_horizontal_padding() > 0 {
            style = style.padding(
                top as i32,
                self.get_padding_right() as i32,
                bottom as i32,
                self.get_padding_left() as i32,
            );
        }
        if self.get_margin_left() > 0 {
            style = style.margin_left(self.get_margin_left() as i32);
        }
        if let Some(width) = self.width.filter(|&w| w > 0) {
            style = style.width(width as i32);
        }
        if self.uppercase.unwrap_or(false) {
            style = style.transform(|s| s.to_uppercase());
        }
        style
    }

    fn maybe_foreground(mut self, color: Option<String>) -> Self {
        self.foreground = color;
        self
    }

    fn maybe_background(mut self, color: Option<String>) -> Self {
        self.background = color;
        self
    }
}

/// Styles for the pieces of a command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The program's own name.
    pub name: Slot,
    /// Subcommands.
    pub command: Slot,
    /// Flags.
    pub flag: Slot,
    /// Plain and flag-value arguments.
    pub argument: Slot,
    /// Placeholders and continuation markers.
    pub dimmed_argument: Slot,
    /// Quoted-string fragments.
    pub quoted_string: Slot,
}

impl Program {
    fn with_background(&self, background: &Slot) -> Program {
        Program {
            name: self.name.merge(background),
            command: self.command.merge(background),
            flag: self.flag.merge(background),
            argument: self.argument.merge(background),
            dimmed_argument: self.dimmed_argument.merge(background),
            quoted_string: self.quoted_string.merge(background),
        }
    }
}

/// Styles for the usage/example box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeblock {
    /// The box itself; its padding is the box's inner horizontal padding.
    pub base: Slot,
    /// Plain text inside the box.
    pub text: Slot,
    /// Comment lines.
    pub comment: Slot,
    /// Program styles drawn on the box background.
    pub program: Program,
}

/// Every named style needed to render help and error output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    /// Terminal width the sheet was built for.
    pub width: usize,
    /// Plain text.
    pub text: Slot,
    /// Section titles.
    pub title: Slot,
    /// Usage/example box.
    pub codeblock: Codeblock,
    /// Program styles used outside the box (command listings, hints).
    pub program: Program,
    /// Help text beside flags and commands.
    pub flag_description: Slot,
    /// Flag default values.
    pub flag_default: Slot,
    /// The `ERROR` badge.
    pub error_header: Slot,
    /// Error message body.
    pub error_text: Slot,
}

impl StyleSheet {
    /// Resolves a color scheme into concrete 24-bit styles for one render.
    pub fn build(scheme: &ColorScheme, width: usize, is_dark: bool) -> Self {
        Self::build_for(scheme, width, is_dark, ColorProfile::TrueColor)
    }

    /// Resolves a color scheme for one render, downsampling every color to
    /// what `profile` can show.
    ///
    /// # Arguments
    ///
    /// * `scheme` - The palette to resolve
    /// * `width` - Terminal width the sheet is built for
    /// * `is_dark` - Picks the dark variant of every [`Tone`]
    /// * `profile` - Color capability of the output; [`ColorProfile::NoColor`]
    ///   leaves every slot uncolored
    ///
    /// # Examples
    ///
    /// ```rust
    /// use helpdeck::profile::ColorProfile;
    /// use helpdeck::theme::{ColorScheme, StyleSheet};
    ///
    /// let scheme = ColorScheme::default();
    /// let full = StyleSheet::build_for(&scheme, 80, true, ColorProfile::TrueColor);
    /// let basic = StyleSheet::build_for(&scheme, 80, true, ColorProfile::Ansi);
    /// assert_ne!(full.title.get_foreground(), basic.title.get_foreground());
    /// ```
    pub fn build_for(
        scheme: &ColorScheme,
        width: usize,
        is_dark: bool,
        profile: ColorProfile,
    ) -> Self {
        let tone = |t: &Tone| profile.convert(t.resolve(is_dark));
        let base = tone(&scheme.base);
        let or_base = |t: &Option<Tone>| t.as_ref().map_or_else(|| base.clone(), tone);
        let fg = |color: Option<String>| Slot::new().maybe_foreground(color);

        let program = Program {
            name: fg(tone(&scheme.program)),
            command: fg(tone(&scheme.command)),
            flag: fg(tone(&scheme.flag)).padding_left(1),
            argument: fg(tone(&scheme.argument)).padding_left(1),
            dimmed_argument: fg(tone(&scheme.dimmed_argument)).padding_left(1),
            quoted_string: fg(tone(&scheme.quoted_string)).padding_left(1),
        };
        let block_background = Slot::new().maybe_background(tone(&scheme.codeblock));
        let codeblock_program = Program {
            command: program.command.clone().padding_left(1),
            ..program.clone()
        }
        .with_background(&block_background);

        Self {
            width,
            text: fg(base.clone()),
            title: fg(tone(&scheme.title))
                .bold(true)
                .uppercase(true)
                .margin_left(2),
            codeblock: Codeblock {
                base: block_background
                    .clone()
                    .maybe_foreground(base.clone())
                    .padding(1, 2, 1, 2),
                text: block_background.clone(),
                comment: block_background.maybe_foreground(tone(&scheme.comment)),
                program: codeblock_program,
            },
            program,
            flag_description: fg(or_base(&scheme.help)),
            flag_default: fg(or_base(&scheme.flag_default)).padding_left(1),
            error_header: fg(tone(&scheme.error_header.0))
                .maybe_background(tone(&scheme.error_header.1))
                .bold(true)
                .padding_left(1)
                .padding_right(1)
                .margin_left(2),
            error_text: fg(or_base(&scheme.error_details)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_resolves_by_background() {
        let tone = Tone::adaptive("#000000", "#FFFFFF");
        assert_eq!(tone.resolve(false), "#000000");
        assert_eq!(tone.resolve(true), "#FFFFFF");
        assert_eq!(Tone::fixed("red").resolve(true), "red");
    }

    #[test]
    fn test_merge_prefers_override() {
        let base = Slot::new().foreground("red").padding_left(1).bold(true);
        let merged = base.merge(&Slot::new().padding_left(0).background("blue"));
        assert_eq!(merged.get_padding_left(), 0);
        assert_eq!(merged.get_background(), Some("blue"));
        assert_eq!(merged, Slot::new().foreground("red").padding_left(0).bold(true).background("blue"));
    }

    #[test]
    fn test_merge_leaves_base_untouched() {
        let base = Slot::new().padding_left(1);
        let _ = base.merge(&Slot::new().padding_left(4));
        assert_eq!(base.get_padding_left(), 1);
    }

    #[test]
    fn test_render_plain_slot_only_pads() {
        let slot = Slot::new().padding_left(2).padding_right(1);
        assert_eq!(slot.render("x"), "  x ");
        assert_eq!(Slot::new().uppercase(true).render("usage"), "USAGE");
        assert_eq!(Slot::new().margin_left(2).render("x"), "  x");
    }

    #[test]
    fn test_render_fills_block_to_width() {
        let slot = Slot::new().padding(1, 1, 1, 1).width(5);
        assert_eq!(slot.render("ab"), "     \n ab  \n     ");
    }

    #[test]
    fn test_merge_covers_layout_attributes() {
        let base = Slot::new().padding(1, 2, 1, 2).margin_left(2);
        let merged = base.merge(&Slot::new().width(10).padding_left(0));
        assert_eq!(merged.get_padding_left(), 0);
        assert_eq!(merged.get_padding_right(), 2);
        assert_eq!(merged.get_margin_left(), 2);
        assert_eq!(merged, Slot::new().padding(1, 2, 1, 0).margin_left(2).width(10));
    }

    #[test]
    fn test_build_for_downsamples_colors() {
        let scheme = ColorScheme::default();
        let title = |profile| {
            StyleSheet::build_for(&scheme, 80, true, profile)
                .title
                .get_foreground()
                .map(str::to_string)
        };
        assert_eq!(title(ColorProfile::TrueColor).as_deref(), Some(CHARPLE));
        assert_eq!(title(ColorProfile::Ansi256).as_deref(), Some("63"));
        assert_eq!(title(ColorProfile::Ansi).as_deref(), Some("12"));
        assert_eq!(title(ColorProfile::NoColor), None);

        let plain = StyleSheet::build_for(&scheme, 80, true, ColorProfile::NoColor);
        assert_eq!(plain.codeblock.base.get_background(), None);
        assert_eq!(plain.codeblock.base.get_horizontal_padding(), 4);
    }

    #[test]
    fn test_render_colored_slot_keeps_text() {
        let slot = Slot::new().foreground("#FF0000").padding_left(1);
        let out = slot.render("flag");
        assert_eq!(strip_ansi_escapes::strip_str(&out), " flag");
    }

    #[test]
    fn test_build_applies_codeblock_background() {
        let scheme = ColorScheme::default();
        let dark = StyleSheet::build(&scheme, 80, true);
        let light = StyleSheet::build(&scheme, 80, false);
        assert_eq!(dark.codeblock.program.flag.get_background(), Some("#2F2E36"));
        assert_eq!(light.codeblock.program.flag.get_background(), Some(SALT));
        assert_eq!(dark.program.flag.get_background(), None);
        assert_eq!(dark.codeblock.base.get_horizontal_padding(), 4);
        assert_eq!(dark.title.get_margin_left(), 2);
        assert_eq!(dark.width, 80);
    }

    #[test]
    fn test_missing_optional_tones_fall_back_to_base() {
        let scheme = ColorScheme {
            flag_default: None,
            ..ColorScheme::default()
        };
        let sheet = StyleSheet::build(&scheme, 80, true);
        assert_eq!(
            sheet.flag_default,
            Slot::new().foreground(ASH).padding_left(1)
        );
    }
}
