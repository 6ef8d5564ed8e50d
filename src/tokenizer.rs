//! Tokenizer for shell-like example lines.
//!
//! Each whitespace-delimited word of a line is classified by its syntactic
//! role. Classification is stateful: an open quote or a trailing `\` carries
//! over to the next physical line, and a value-taking flag claims the word
//! that follows it.
//!
//! # Examples
//!
//! ```rust
//! use helpdeck::command::{CommandNode, FlagSpec};
//! use helpdeck::tokenizer::{tokenize, TokenKind, TokenizerState};
//!
//! let cmd = CommandNode::new("example").with_flag(FlagSpec::string("name", "the name"));
//! let (tokens, _) = tokenize("example --name Carlos", TokenizerState::default(), &cmd);
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::ProgramName, TokenKind::Flag, TokenKind::FlagValue]
//! );
//! ```

use tracing::trace;

use crate::command::{CommandLookup, ValueKind};

/// Syntactic role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The command's own name.
    ProgramName,
    /// A child command reached from the current command.
    SubCommand,
    /// A flag, or the `name=` half of an assignment.
    Flag,
    /// The value bound to the preceding flag or assignment.
    FlagValue,
    /// One word of a double-quoted string.
    QuotedFragment,
    /// A whole `# ...` line.
    Comment,
    /// A trailing lone `\`.
    Continuation,
    /// Anything else.
    Argument,
}

/// One classified piece of an example line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Source text of the token.
    pub text: String,
    /// What the token is.
    pub kind: TokenKind,
    /// `true` when the token continues the previous token's word with no
    /// whitespace in between, as in the value half of `FOO=bar`.
    pub attached: bool,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            attached: false,
        }
    }

    fn attached(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            attached: true,
            ..Self::new(kind, text)
        }
    }
}

/// Conditions that carry from one token, or one line, to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerState {
    /// A double-quoted string is open.
    pub inside_quote: bool,
    /// The previous word was a value-taking flag without an inline value.
    pub pending_flag_value: bool,
    /// The line ended with a continuation marker.
    pub continues_next_line: bool,
}

impl TokenizerState {
    /// The state the next physical line starts from.
    ///
    /// Only a continued line passes anything on, and then only its open
    /// quote.
    pub fn next_line(self) -> Self {
        if self.continues_next_line {
            Self {
                inside_quote: self.inside_quote,
                ..Self::default()
            }
        } else {
            Self::default()
        }
    }
}

/// A tokenized example line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleLine {
    /// Tokens in source order; empty for a blank line.
    pub tokens: Vec<Token>,
    /// The previous line ended with a continuation marker.
    pub indent: bool,
}

/// Classifies every word of `line`.
///
/// `command` is the command whose help is being rendered: its name marks the
/// program, its children are candidate subcommands, and its flags decide
/// whether a flag binds the next word. Unknown flags are treated as switches.
pub fn tokenize(
    line: &str,
    state: TokenizerState,
    command: &dyn CommandLookup,
) -> (Vec<Token>, TokenizerState) {
    let line = line.trim();
    if line.starts_with("# ") {
        return (
            vec![Token::new(TokenKind::Comment, line)],
            TokenizerState::default(),
        );
    }

    let mut st = TokenizerState {
        continues_next_line: false,
        ..state
    };
    let mut tokens = Vec::new();
    let mut current = command;
    let mut program_seen = false;
    let words: Vec<&str> = line.split_whitespace().collect();

    for (i, &word) in words.iter().enumerate() {
        if i + 1 == words.len() && word == "\\" {
            tokens.push(Token::new(TokenKind::Continuation, word));
            st.continues_next_line = true;
            continue;
        }

        if st.inside_quote {
            tokens.push(Token::new(TokenKind::QuotedFragment, word));
            st.inside_quote = !ends_with_unescaped_quote(word);
            continue;
        }

        if st.pending_flag_value {
            st.pending_flag_value = false;
            if word.starts_with('"') {
                tokens.push(Token::new(TokenKind::QuotedFragment, word));
                st.inside_quote = !is_self_closing(word);
            } else {
                tokens.push(Token::new(TokenKind::FlagValue, word));
            }
            continue;
        }

        if !program_seen {
            if let Some((name, value)) = word.split_once('=') {
                tokens.push(Token::new(TokenKind::Flag, format!("{name}=")));
                if value.starts_with('"') {
                    tokens.push(Token::attached(TokenKind::QuotedFragment, value));
                    st.inside_quote = !is_self_closing(value);
                } else if !value.is_empty() {
                    tokens.push(Token::attached(TokenKind::FlagValue, value));
                }
                continue;
            }
            if word == command.name() {
                tokens.push(Token::new(TokenKind::ProgramName, word));
                program_seen = true;
                continue;
            }
        }

        if !word.starts_with('"') && !word.starts_with('-') {
            if let Some(child) = current.resolve_child(word) {
                tokens.push(Token::new(TokenKind::SubCommand, word));
                current = child;
                continue;
            }
        }

        if word.starts_with('"') {
            tokens.push(Token::new(TokenKind::QuotedFragment, word));
            st.inside_quote = !is_self_closing(word);
            continue;
        }

        if word.starts_with('-') {
            if let Some((name, value)) = word.split_once('=') {
                tokens.push(Token::new(TokenKind::Flag, format!("{name}=")));
                if !value.is_empty() {
                    tokens.push(Token::attached(TokenKind::Argument, value));
                }
                continue;
            }
            tokens.push(Token::new(TokenKind::Flag, word));
            let kind = current
                .flag_kind(word)
                .or_else(|| command.flag_kind(word));
            st.pending_flag_value = kind == Some(ValueKind::Other);
            continue;
        }

        tokens.push(Token::new(TokenKind::Argument, word));
    }

    st.pending_flag_value = false;
    trace!(tokens = tokens.len(), line, "tokenized example line");
    (tokens, st)
}

/// Tokenizes a whole example block.
///
/// Lines are trimmed. Leading and trailing blank lines are dropped; interior
/// blank lines become lines with no tokens. State starts fresh for the block
/// and crosses a line boundary only after a continuation marker.
pub fn tokenize_example(example: &str, command: &dyn CommandLookup) -> Vec<ExampleLine> {
    let lines: Vec<&str> = example.lines().map(str::trim).collect();
    let Some(first) = lines.iter().position(|l| !l.is_empty()) else {
        return Vec::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .unwrap_or(first);

    let mut state = TokenizerState::default();
    let mut out = Vec::with_capacity(last - first + 1);
    for line in &lines[first..=last] {
        let indent = state.continues_next_line;
        let (tokens, next) = tokenize(line, state.next_line(), command);
        out.push(ExampleLine { tokens, indent });
        state = next;
    }
    out
}

fn ends_with_unescaped_quote(word: &str) -> bool {
    let Some(body) = word.strip_suffix('"') else {
        return false;
    };
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 0
}

/// `word` opens with `"` and closes again within the same word.
fn is_self_closing(word: &str) -> bool {
    word.len() >= 2 && ends_with_unescaped_quote(&word[1..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandNode, FlagSpec};
    use super::TokenKind::*;

    fn example_cmd() -> CommandNode {
        CommandNode::new("example")
            .with_flag(FlagSpec::string("name", "the name"))
            .with_flag(FlagSpec::string("surname", "the surname").with_short('s'))
            .with_flag(FlagSpec::boolean("async", "async?").with_short('a'))
            .with_child(
                CommandNode::new("sub").with_child(CommandNode::new("another")),
            )
    }

    fn kinds(line: &str) -> Vec<(String, TokenKind)> {
        let (tokens, _) = tokenize(line, TokenizerState::default(), &example_cmd());
        tokens.into_iter().map(|t| (t.text, t.kind)).collect()
    }

    fn pairs(expected: &[(&str, TokenKind)]) -> Vec<(String, TokenKind)> {
        expected.iter().map(|(s, k)| (s.to_string(), *k)).collect()
    }

    #[test]
    fn test_mixed_quotes_and_flags() {
        assert_eq!(
            kinds(r#"example sub "multi-word quoted string" --name "another quoted string" -a"#),
            pairs(&[
                ("example", ProgramName),
                ("sub", SubCommand),
                ("\"multi-word", QuotedFragment),
                ("quoted", QuotedFragment),
                ("string\"", QuotedFragment),
                ("--name", Flag),
                ("\"another", QuotedFragment),
                ("quoted", QuotedFragment),
                ("string\"", QuotedFragment),
                ("-a", Flag),
            ])
        );
    }

    #[test]
    fn test_flag_binds_next_word() {
        assert_eq!(
            kinds("example --name Carlos"),
            pairs(&[("example", ProgramName), ("--name", Flag), ("Carlos", FlagValue)])
        );
        assert_eq!(
            kinds("example -s sub"),
            pairs(&[("example", ProgramName), ("-s", Flag), ("sub", FlagValue)])
        );
    }

    #[test]
    fn test_bool_and_unknown_flags_bind_nothing() {
        assert_eq!(
            kinds("example -a value --nope other"),
            pairs(&[
                ("example", ProgramName),
                ("-a", Flag),
                ("value", Argument),
                ("--nope", Flag),
                ("other", Argument),
            ])
        );
    }

    #[test]
    fn test_assignments_before_program() {
        let (tokens, state) = tokenize(
            r#"FOO=bar ZAZ="quoted value" example --name=Carlos -s Becker"#,
            TokenizerState::default(),
            &example_cmd(),
        );
        let got: Vec<(&str, TokenKind, bool)> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.kind, t.attached))
            .collect();
        assert_eq!(
            got,
            vec![
                ("FOO=", Flag, false),
                ("bar", FlagValue, true),
                ("ZAZ=", Flag, false),
                ("\"quoted", QuotedFragment, true),
                ("value\"", QuotedFragment, false),
                ("example", ProgramName, false),
                ("--name=", Flag, false),
                ("Carlos", Argument, true),
                ("-s", Flag, false),
                ("Becker", FlagValue, false),
            ]
        );
        assert_eq!(state, TokenizerState::default());
    }

    #[test]
    fn test_self_closing_quote() {
        assert_eq!(
            kinds(r#"example "one" two"#),
            pairs(&[("example", ProgramName), ("\"one\"", QuotedFragment), ("two", Argument)])
        );
        assert_eq!(
            kinds(r#"example "a\" b""#),
            pairs(&[("example", ProgramName), ("\"a\\\"", QuotedFragment), ("b\"", QuotedFragment)])
        );
    }

    #[test]
    fn test_subcommand_descends_one_level_at_a_time() {
        assert_eq!(
            kinds("example sub another args --async"),
            pairs(&[
                ("example", ProgramName),
                ("sub", SubCommand),
                ("another", SubCommand),
                ("args", Argument),
                ("--async", Flag),
            ])
        );
        assert_eq!(
            kinds("example another"),
            pairs(&[("example", ProgramName), ("another", Argument)])
        );
    }

    #[test]
    fn test_comment_line() {
        assert_eq!(
            kinds("# Run it with \"quotes\" and --flags"),
            pairs(&[("# Run it with \"quotes\" and --flags", Comment)])
        );
        assert_eq!(kinds("#nospace"), pairs(&[("#nospace", Argument)]));
    }

    #[test]
    fn test_continuation_sets_state() {
        let (tokens, state) =
            tokenize(r#"ENV_A=0 "open \"#, TokenizerState::default(), &example_cmd());
        assert_eq!(tokens.last().map(|t| t.kind), Some(Continuation));
        assert!(state.continues_next_line);
        assert!(state.inside_quote);

        let next = state.next_line();
        assert!(next.inside_quote);
        assert!(!next.continues_next_line);
        let (tokens, state) = tokenize(r#"still" example"#, next, &example_cmd());
        assert_eq!(tokens[0].kind, QuotedFragment);
        assert_eq!(tokens[1].kind, ProgramName);
        assert!(!state.inside_quote);
    }

    #[test]
    fn test_backslash_only_continues_at_end() {
        assert_eq!(
            kinds(r"example \ sub"),
            pairs(&[("example", ProgramName), ("\\", Argument), ("sub", SubCommand)])
        );
    }

    #[test]
    fn test_unterminated_quote_without_continuation_resets() {
        let (_, state) = tokenize(r#"example "open"#, TokenizerState::default(), &example_cmd());
        assert!(state.inside_quote);
        assert_eq!(state.next_line(), TokenizerState::default());
    }

    #[test]
    fn test_example_block_trims_and_indents() {
        let block = "\n\n# Multi-line:\nENV_A=0 \\\n  example sub \"quoted argument\"\n\nexample\n  \n";
        let lines = tokenize_example(block, &example_cmd());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].tokens[0].kind, Comment);
        assert!(!lines[1].indent);
        assert!(lines[2].indent);
        assert_eq!(lines[2].tokens[0].kind, ProgramName);
        assert!(lines[3].tokens.is_empty());
        assert!(!lines[4].indent);
    }

    #[test]
    fn test_empty_example_block() {
        assert!(tokenize_example("", &example_cmd()).is_empty());
        assert!(tokenize_example("\n  \n", &example_cmd()).is_empty());
    }

    #[test]
    fn test_round_trip_reconstructs_words() {
        let line = r#"FOO=bar example sub "multi-word quoted" --name=x -s Becker \"#;
        let (tokens, _) = tokenize(line, TokenizerState::default(), &example_cmd());
        let mut rebuilt = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 && !token.attached {
                rebuilt.push(' ');
            }
            rebuilt.push_str(&token.text);
        }
        assert_eq!(rebuilt, line.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    fn deploy_cmd() -> CommandNode {
        CommandNode::new("app")
            .with_flag(FlagSpec::string("name", "a name"))
            .with_child(
                CommandNode::new("run")
                    .with_alias("r")
                    .with_flag(FlagSpec::string("env", "where")),
            )
    }

    #[test]
    fn test_alias_reaches_child_flags() {
        let (tokens, _) = tokenize("app r --env prod", TokenizerState::default(), &deploy_cmd());
        let got: Vec<(String, TokenKind)> = tokens.into_iter().map(|t| (t.text, t.kind)).collect();
        assert_eq!(
            got,
            pairs(&[
                ("app", ProgramName),
                ("r", SubCommand),
                ("--env", Flag),
                ("prod", FlagValue),
            ])
        );
    }

    #[test]
    fn test_root_flag_after_subcommand_binds_value() {
        let (tokens, _) = tokenize("app run --name x y", TokenizerState::default(), &deploy_cmd());
        let got: Vec<(String, TokenKind)> = tokens.into_iter().map(|t| (t.text, t.kind)).collect();
        assert_eq!(
            got,
            pairs(&[
                ("app", ProgramName),
                ("run", SubCommand),
                ("--name", Flag),
                ("x", FlagValue),
                ("y", Argument),
            ])
        );
    }
}
