//! Independent lexical matchers.
//!
//! Each rule looks at the input at a byte position and either declines or
//! consumes a non-empty prefix of the remaining text. The tokenizer tries
//! the rules of a [`TokenRules`] set in order and keeps the first match.

use std::fmt;
use std::sync::Arc;

use super::TokenKind;
use crate::keyword::KeywordTable;

/// A lexical matcher.
pub trait TokenRule: fmt::Debug + Send + Sync {
    /// Attempts to recognize a token starting at byte `position` of `input`.
    ///
    /// Returns the token kind and the number of bytes consumed. A rule that
    /// does not recognize the character at `position` returns `None`.
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)>;
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\0' | '\x0B' | '\x0C')
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn name_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count(),
        _ => 0,
    }
}

/// Consumes a maximal run of space, tab, CR, LF, NUL, VT and FF.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceRule;

impl TokenRule for WhitespaceRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        let len = rest.find(|c: char| !is_blank(c)).unwrap_or(rest.len());
        (len > 0).then_some((TokenKind::Whitespace, len))
    }
}

/// Consumes a delimited comment such as `/* ... */`.
#[derive(Debug, Clone, Copy)]
pub struct BlockCommentRule {
    open: &'static str,
    close: &'static str,
}

impl BlockCommentRule {
    /// Creates a rule for comments between `open` and `close`.
    #[must_use]
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

impl Default for BlockCommentRule {
    fn default() -> Self {
        Self::new("/*", "*/")
    }
}

impl TokenRule for BlockCommentRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        if !rest.starts_with(self.open) {
            return None;
        }
        let body = self.open.len();
        match rest[body..].find(self.close) {
            Some(i) => Some((TokenKind::Whitespace, body + i + self.close.len())),
            None => Some((TokenKind::Error, rest.len())),
        }
    }
}

/// Consumes `-- ...` and, when enabled, `# ...` up to the end of the line.
///
/// A single `-` is left to the operator rule.
#[derive(Debug, Clone, Copy)]
pub struct LineCommentRule {
    hash: bool,
}

impl LineCommentRule {
    /// Creates the rule; `hash` also enables `#` comments.
    #[must_use]
    pub const fn new(hash: bool) -> Self {
        Self { hash }
    }
}

impl TokenRule for LineCommentRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        if !(rest.starts_with("--") || (self.hash && rest.starts_with('#'))) {
            return None;
        }
        let len = rest
            .find(|c: char| c == '\n' || c == '\r')
            .unwrap_or(rest.len());
        Some((TokenKind::Whitespace, len))
    }
}

/// Consumes a string literal; a doubled quotation mark is an escaped quote.
#[derive(Debug, Clone, Copy)]
pub struct LiteralRule {
    quote: char,
    backslash_escapes: bool,
}

impl LiteralRule {
    /// Creates a rule for literals delimited by `quote`.
    #[must_use]
    pub const fn new(quote: char) -> Self {
        Self {
            quote,
            backslash_escapes: false,
        }
    }

    /// Also treats a backslash as escaping the next character.
    #[must_use]
    pub const fn with_backslash_escapes(mut self, enabled: bool) -> Self {
        self.backslash_escapes = enabled;
        self
    }
}

impl Default for LiteralRule {
    fn default() -> Self {
        Self::new('\'')
    }
}

impl TokenRule for LiteralRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        if !rest.starts_with(self.quote) {
            return None;
        }
        let mut chars = rest.char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            if self.backslash_escapes && c == '\\' {
                chars.next();
            } else if c == self.quote {
                let end = i + c.len_utf8();
                if !rest[end..].starts_with(self.quote) {
                    return Some((TokenKind::Literal, end));
                }
                chars.next();
            }
        }
        Some((TokenKind::Error, rest.len()))
    }
}

/// Consumes a quoted identifier through its closing quote.
#[derive(Debug, Clone, Copy)]
pub struct QuotedIdentifierRule {
    open: char,
    close: char,
}

impl QuotedIdentifierRule {
    /// Creates a rule for identifiers between `open` and `close`.
    #[must_use]
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl TokenRule for QuotedIdentifierRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        if !rest.starts_with(self.open) {
            return None;
        }
        let body = self.open.len_utf8();
        match rest[body..].find(self.close) {
            Some(i) => Some((TokenKind::Identifier, body + i + self.close.len_utf8())),
            None => Some((TokenKind::Error, rest.len())),
        }
    }
}

/// Consumes integers, reals (with optional exponent) and `0x` hexadecimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule;

impl TokenRule for NumberRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input.as_bytes()[position..];
        if !rest.first()?.is_ascii_digit() {
            return None;
        }

        if rest[0] == b'0'
            && matches!(rest.get(1), Some(b'x' | b'X'))
            && rest.get(2).is_some_and(u8::is_ascii_hexdigit)
        {
            let len = 2 + rest[2..]
                .iter()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
            return Some((TokenKind::Hexadecimal, len));
        }

        let mut kind = TokenKind::Integer;
        let mut len = digits(rest);

        if rest.get(len) == Some(&b'.') && rest.get(len + 1).is_some_and(u8::is_ascii_digit) {
            len += 1 + digits(&rest[len + 1..]);
            kind = TokenKind::Real;
        }

        if matches!(rest.get(len), Some(b'e' | b'E')) {
            let mut exponent = len + 1;
            if matches!(rest.get(exponent), Some(b'+' | b'-')) {
                exponent += 1;
            }
            if rest.get(exponent).is_some_and(u8::is_ascii_digit) {
                len = exponent + digits(&rest[exponent..]);
                kind = TokenKind::Real;
            }
        }

        Some((kind, len))
    }
}

/// Consumes a bare word and classifies it against a keyword table.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    keywords: Arc<KeywordTable>,
}

impl KeywordRule {
    /// Creates the rule over a shared keyword table.
    #[must_use]
    pub const fn new(keywords: Arc<KeywordTable>) -> Self {
        Self { keywords }
    }
}

impl TokenRule for KeywordRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let len = name_len(&input.as_bytes()[position..]);
        if len == 0 {
            return None;
        }
        let word = &input[position..position + len];
        if self.keywords.is_keyword(word) {
            Some((TokenKind::Keyword, len))
        } else {
            Some((TokenKind::Identifier, len))
        }
    }
}

/// Consumes `.`, `;` and parameter placeholders (`?`, `?1`, `:name`, `@name`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolRule;

impl TokenRule for SymbolRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input.as_bytes()[position..];
        match rest.first()? {
            b'.' => Some((TokenKind::Dot, 1)),
            b';' => Some((TokenKind::Terminal, 1)),
            b'?' => Some((TokenKind::Parameter, 1 + digits(&rest[1..]))),
            b':' | b'@' => {
                let len = name_len(&rest[1..]);
                (len > 0).then_some((TokenKind::Parameter, 1 + len))
            }
            _ => None,
        }
    }
}

/// Consumes one- and two-character operators and punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorRule;

impl OperatorRule {
    const DOUBLE: [&'static str; 8] = ["||", "!=", "==", "<=", "<>", "<<", ">=", ">>"];
}

impl TokenRule for OperatorRule {
    fn process(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = &input[position..];
        // Comment openers belong to the comment rules.
        if rest.starts_with("/*") || rest.starts_with("--") {
            return None;
        }
        if let Some(op) = Self::DOUBLE.iter().find(|op| rest.starts_with(**op)) {
            return Some((TokenKind::Operator, op.len()));
        }
        match rest.as_bytes().first()? {
            b'|' | b'!' | b'=' | b'<' | b'>' | b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'~'
            | b'(' | b')' | b',' => Some((TokenKind::Operator, 1)),
            _ => None,
        }
    }
}

/// Options describing a dialect's lexical conventions.
#[derive(Debug, Clone, Copy)]
pub struct LexicalOptions {
    /// Opening and closing identifier quote characters.
    pub identifier_quote: (char, char),
    /// String literal quotation mark.
    pub literal_quote: char,
    /// Whether `#` starts a line comment.
    pub hash_comments: bool,
    /// Whether a backslash escapes the next character inside literals.
    pub backslash_escapes: bool,
}

impl Default for LexicalOptions {
    fn default() -> Self {
        Self {
            identifier_quote: ('"', '"'),
            literal_quote: '\'',
            hash_comments: true,
            backslash_escapes: false,
        }
    }
}

/// An ordered set of rules; earlier rules win.
#[derive(Debug, Default)]
pub struct TokenRules {
    rules: Vec<Box<dyn TokenRule>>,
}

impl TokenRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule with the lowest priority so far.
    #[must_use]
    pub fn with(mut self, rule: impl TokenRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Builds the standard priority order for a dialect.
    #[must_use]
    pub fn standard(options: LexicalOptions, keywords: Arc<KeywordTable>) -> Self {
        let (open, close) = options.identifier_quote;
        Self::new()
            .with(WhitespaceRule)
            .with(BlockCommentRule::default())
            .with(LineCommentRule::new(options.hash_comments))
            .with(
                LiteralRule::new(options.literal_quote)
                    .with_backslash_escapes(options.backslash_escapes),
            )
            .with(QuotedIdentifierRule::new(open, close))
            .with(NumberRule)
            .with(KeywordRule::new(keywords))
            .with(SymbolRule)
            .with(OperatorRule)
    }

    /// Returns the first match at `position`, skipping rules that consume nothing.
    #[must_use]
    pub fn matching(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.process(input, position))
            .find(|(_, len)| *len > 0)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &dyn TokenRule, input: &str) -> Option<(TokenKind, usize)> {
        rule.process(input, 0)
    }

    #[test]
    fn test_whitespace_rule() {
        assert_eq!(
            run(&WhitespaceRule, " \t\r\n\0\x0B\x0Cx"),
            Some((TokenKind::Whitespace, 7))
        );
        assert_eq!(run(&WhitespaceRule, "x "), None);
    }

    #[test]
    fn test_block_comment_rule() {
        let rule = BlockCommentRule::default();
        assert_eq!(run(&rule, "/* a */ b"), Some((TokenKind::Whitespace, 7)));
        assert_eq!(run(&rule, "/*/"), Some((TokenKind::Error, 3)));
        assert_eq!(run(&rule, "/ 2"), None);
    }

    #[test]
    fn test_line_comment_rule() {
        let rule = LineCommentRule::new(true);
        assert_eq!(run(&rule, "-- note\nSELECT"), Some((TokenKind::Whitespace, 7)));
        assert_eq!(run(&rule, "# note"), Some((TokenKind::Whitespace, 6)));
        assert_eq!(run(&rule, "- 1"), None);
        assert_eq!(run(&LineCommentRule::new(false), "# note"), None);
    }

    #[test]
    fn test_literal_rule_escaped_quote() {
        let rule = LiteralRule::default();
        assert_eq!(run(&rule, "'it''s' x"), Some((TokenKind::Literal, 7)));
        assert_eq!(run(&rule, "''"), Some((TokenKind::Literal, 2)));
        assert_eq!(run(&rule, "'open"), Some((TokenKind::Error, 5)));
    }

    #[test]
    fn test_literal_rule_backslash_escapes() {
        let plain = LiteralRule::default();
        let escaping = LiteralRule::default().with_backslash_escapes(true);
        assert_eq!(run(&plain, r"'a\'b'"), Some((TokenKind::Literal, 4)));
        assert_eq!(run(&escaping, r"'a\'b'"), Some((TokenKind::Literal, 6)));
        assert_eq!(run(&escaping, r"'a\\' b"), Some((TokenKind::Literal, 5)));
        assert_eq!(run(&escaping, r"'a\"), Some((TokenKind::Error, 3)));
    }

    #[test]
    fn test_quoted_identifier_rule() {
        let rule = QuotedIdentifierRule::new('[', ']');
        assert_eq!(run(&rule, "[user name]."), Some((TokenKind::Identifier, 11)));
        assert_eq!(run(&rule, "[open"), Some((TokenKind::Error, 5)));
    }

    #[test]
    fn test_number_rule() {
        assert_eq!(run(&NumberRule, "42 "), Some((TokenKind::Integer, 2)));
        assert_eq!(run(&NumberRule, "0"), Some((TokenKind::Integer, 1)));
        assert_eq!(run(&NumberRule, "0x1fZ"), Some((TokenKind::Hexadecimal, 4)));
        assert_eq!(run(&NumberRule, "0xZ"), Some((TokenKind::Integer, 1)));
        assert_eq!(run(&NumberRule, "0.5"), Some((TokenKind::Real, 3)));
        assert_eq!(run(&NumberRule, "3.14"), Some((TokenKind::Real, 4)));
        assert_eq!(run(&NumberRule, "1."), Some((TokenKind::Integer, 1)));
        assert_eq!(run(&NumberRule, "2.5e-3"), Some((TokenKind::Real, 6)));
        assert_eq!(run(&NumberRule, "7e"), Some((TokenKind::Integer, 1)));
        assert_eq!(run(&NumberRule, "x1"), None);
    }

    #[test]
    fn test_keyword_rule() {
        let rule = KeywordRule::new(Arc::new(KeywordTable::parse("SELECT")));
        assert_eq!(run(&rule, "select x"), Some((TokenKind::Keyword, 6)));
        assert_eq!(run(&rule, "_tmp1 x"), Some((TokenKind::Identifier, 5)));
        assert_eq!(run(&rule, "1abc"), None);
    }

    #[test]
    fn test_symbol_rule() {
        assert_eq!(run(&SymbolRule, "."), Some((TokenKind::Dot, 1)));
        assert_eq!(run(&SymbolRule, ";"), Some((TokenKind::Terminal, 1)));
        assert_eq!(run(&SymbolRule, "?12"), Some((TokenKind::Parameter, 3)));
        assert_eq!(run(&SymbolRule, ":user_id)"), Some((TokenKind::Parameter, 8)));
        assert_eq!(run(&SymbolRule, ": x"), None);
    }

    #[test]
    fn test_operator_rule() {
        for op in ["||", "!=", "==", "<=", "<>", "<<", ">=", ">>"] {
            assert_eq!(run(&OperatorRule, op), Some((TokenKind::Operator, 2)), "{op}");
        }
        for op in ["|", "!", "=", "<", ">", "+", "*", "%", "&", "~", "-", "/"] {
            assert_eq!(run(&OperatorRule, op), Some((TokenKind::Operator, 1)), "{op}");
        }
        assert_eq!(run(&OperatorRule, "/* c */"), None);
        assert_eq!(run(&OperatorRule, "-- c"), None);
        assert_eq!(run(&OperatorRule, "^"), None);
    }

    #[test]
    fn test_rules_priority() {
        let rules = TokenRules::standard(
            LexicalOptions::default(),
            Arc::new(KeywordTable::parse("SELECT")),
        );
        assert_eq!(rules.len(), 9);
        assert_eq!(rules.matching("/* c */", 0), Some((TokenKind::Whitespace, 7)));
        assert_eq!(rules.matching("- 1", 0), Some((TokenKind::Operator, 1)));
        assert_eq!(rules.matching("^", 0), None);
    }
}
