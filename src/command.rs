//! The command tree consumed by the help renderer.
//!
//! A [`CommandNode`] carries everything the renderer needs to know about a
//! command: its name, help texts, raw use-line, example block, flags and
//! children. The tree is owned by the caller and is only ever read here.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::command::{CommandNode, FlagSpec, Group};
//!
//! let root = CommandNode::new("example")
//!     .with_short("Short help")
//!     .with_group(Group::new("ops", "Operations"))
//!     .with_flag(FlagSpec::string("name", "the name"))
//!     .with_flag(FlagSpec::boolean("async", "async?").with_short('a'))
//!     .with_child(CommandNode::new("sub").with_short("a sub command"))
//!     .with_child(
//!         CommandNode::new("deploy")
//!             .with_short("ship it")
//!             .with_group_id("ops"),
//!     );
//!
//! assert_eq!(root.visible_children().count(), 2);
//! assert!(root.find_flag("-a").is_some());
//! ```

/// How a flag consumes its value on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// A switch; never takes a separate value word.
    Bool,
    /// Anything else; `--flag value` binds the following word.
    #[default]
    Other,
}

/// A single flag definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Long name without the leading dashes.
    pub long_name: String,
    /// Optional single-character shorthand.
    pub short_name: Option<char>,
    /// One-line description.
    pub usage: String,
    /// Textual form of the default value, empty when there is none.
    pub default_value: String,
    /// Whether the flag is a switch or takes a value.
    pub value_kind: ValueKind,
    /// Hidden flags are never listed.
    pub hidden: bool,
}

impl FlagSpec {
    /// Creates a value-taking flag with an empty default.
    pub fn string(long_name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: None,
            usage: usage.into(),
            default_value: String::new(),
            value_kind: ValueKind::Other,
            hidden: false,
        }
    }

    /// Creates a boolean switch defaulting to `false`.
    pub fn boolean(long_name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            default_value: "false".to_string(),
            value_kind: ValueKind::Bool,
            ..Self::string(long_name, usage)
        }
    }

    /// Sets the shorthand character.
    pub fn with_short(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Sets the textual default value.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Marks the flag hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Reports whether the flag binds the next word as its value.
    pub fn takes_value(&self) -> bool {
        self.value_kind != ValueKind::Bool
    }
}

/// A named bucket children can be assigned to for listing purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Identifier referenced by [`CommandNode::group_id`].
    pub id: String,
    /// Title printed above the group's commands.
    pub title: String,
}

impl Group {
    /// Creates a group.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A node of the command tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandNode {
    /// Single-word command name.
    pub name: String,
    /// Alternative names this command also answers to.
    pub aliases: Vec<String>,
    /// One-line description.
    pub short_help: String,
    /// Full description; preferred over `short_help` in the preamble.
    pub long_help: String,
    /// Raw use-line, possibly containing placeholders such as `[args]`.
    pub use_line: String,
    /// Free-form example block.
    pub example: String,
    /// Flags in declaration order.
    pub flags: Vec<FlagSpec>,
    /// Child commands in registration order.
    pub children: Vec<CommandNode>,
    /// Groups registered on this command for its children.
    pub groups: Vec<Group>,
    /// Group this command is listed under in its parent's help.
    pub group_id: Option<String>,
    /// Hidden commands are never listed.
    pub hidden: bool,
}

impl CommandNode {
    /// Creates a command whose use-line is just its name.
    ///
    /// Anything after the first whitespace is treated as use-line tail, so
    /// `CommandNode::new("sub2 [args]")` is named `sub2`.
    pub fn new(use_line: impl Into<String>) -> Self {
        let use_line = use_line.into();
        let name = use_line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            use_line,
            ..Self::default()
        }
    }

    /// Sets the one-line description.
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short_help = short.into();
        self
    }

    /// Sets the long description.
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long_help = long.into();
        self
    }

    /// Sets the example block.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Appends a flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Appends a child command.
    pub fn with_child(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    /// Registers a group for this command's children.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Places this command in one of its parent's groups.
    pub fn with_group_id(mut self, id: impl Into<String>) -> Self {
        self.group_id = Some(id.into());
        self
    }

    /// Marks the command hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Children that should appear in help listings.
    pub fn visible_children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.iter().filter(|c| !c.hidden)
    }

    /// Flags that should appear in help listings.
    pub fn visible_flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.iter().filter(|f| !f.hidden)
    }

    /// Reports whether any visible flag exists.
    pub fn has_visible_flags(&self) -> bool {
        self.visible_flags().next().is_some()
    }

    /// Reports whether any visible child exists.
    pub fn has_visible_children(&self) -> bool {
        self.visible_children().next().is_some()
    }

    /// Title of a registered group, if any.
    pub fn group_title(&self, id: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.title.as_str())
    }

    /// Looks up a flag by its command-line spelling (`--long` or `-s`).
    ///
    /// An inline `=value` is ignored. Hidden flags are still found.
    pub fn find_flag(&self, word: &str) -> Option<&FlagSpec> {
        let word = word.split_once('=').map_or(word, |(name, _)| name);
        if let Some(long) = word.strip_prefix("--") {
            if long.is_empty() {
                return None;
            }
            return self.flags.iter().find(|f| f.long_name == long);
        }
        let short = word.strip_prefix('-')?;
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.flags.iter().find(|f| f.short_name == Some(c)),
            _ => None,
        }
    }
}

/// Read-only view of a command tree used while tokenizing examples.
///
/// The tokenizer only needs to know a command's own name, how to step to a
/// child, and whether a flag binds a value, so it depends on this trait rather
/// than on [`CommandNode`] directly.
pub trait CommandLookup {
    /// The command's own name.
    fn name(&self) -> &str;

    /// Resolves a direct child by name or alias.
    fn resolve_child(&self, name: &str) -> Option<&dyn CommandLookup>;

    /// Value kind of a flag spelled `--long` or `-s`, if the command knows it.
    fn flag_kind(&self, word: &str) -> Option<ValueKind>;
}

impl CommandLookup for CommandNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_child(&self, name: &str) -> Option<&dyn CommandLookup> {
        self.children
            .iter()
            .find(|c| c.name == name || c.aliases.iter().any(|a| a == name))
            .map(|c| c as &dyn CommandLookup)
    }

    fn flag_kind(&self, word: &str) -> Option<ValueKind> {
        self.find_flag(word).map(|f| f.value_kind)
    }
}
