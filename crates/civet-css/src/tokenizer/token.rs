//! Token model.

use civet_intern::Atom;

/// The CSS 2.1 token categories.
///
/// Ordering matters: every category up to and including
/// [`TokenType::Dimension`] has its text interned, and the first four
/// additionally intern a lowercased form (identifiers, at-keywords,
/// hashes, and function names are matched case-insensitively throughout
/// the language).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// An identifier.
    Ident,
    /// `@` followed by an identifier.
    AtKeyword,
    /// `#` followed by a name.
    Hash,
    /// An identifier followed by `(`.
    Function,
    /// A quoted string.
    String,
    /// A string terminated by a bare newline rather than its quote.
    InvalidString,
    /// `url(...)`; the text is the URL itself.
    Uri,
    /// `u+` followed by a code-point range.
    UnicodeRange,
    /// A single character matched by no other rule.
    Char,
    /// An integer or fixed-point number.
    Number,
    /// A number followed by `%`; the text excludes the sign.
    Percentage,
    /// A number followed by an identifier unit; the text carries both.
    Dimension,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// A run of whitespace.
    Whitespace,
    /// `/* ... */`; only emitted when the tokenizer is asked to.
    Comment,
    /// `~=`
    Includes,
    /// `|=`
    Dashmatch,
    /// `^=`
    Prefixmatch,
    /// `$=`
    Suffixmatch,
    /// `*=`
    Substringmatch,
    /// End of input; emitted terminally and idempotently.
    Eof,
}

impl TokenType {
    /// Whether tokens of this category carry interned text.
    #[must_use]
    pub fn interns(self) -> bool {
        matches!(
            self,
            TokenType::Ident
                | TokenType::AtKeyword
                | TokenType::Hash
                | TokenType::Function
                | TokenType::String
                | TokenType::InvalidString
                | TokenType::Uri
                | TokenType::UnicodeRange
                | TokenType::Char
                | TokenType::Number
                | TokenType::Percentage
                | TokenType::Dimension
        )
    }

    /// Whether tokens of this category also intern a lowercased form.
    #[must_use]
    pub fn interns_lower(self) -> bool {
        matches!(
            self,
            TokenType::Ident | TokenType::AtKeyword | TokenType::Hash | TokenType::Function
        )
    }
}

/// A lexical token.
///
/// `data` is the token's text (`None` for structural tokens such as
/// whitespace); `lower` is the lowercase-interned form where the category
/// calls for one, and otherwise aliases `data`.
#[derive(Debug, Clone)]
pub struct Token {
    /// The token's category.
    pub ttype: TokenType,
    /// Original-case interned text, if the category carries text.
    pub data: Option<Atom>,
    /// Lowercase interned text (aliases `data` where case is irrelevant).
    pub lower: Option<Atom>,
    /// 1-based source line of the token's first character.
    pub line: u32,
    /// 1-based source column of the token's first character.
    pub col: u32,
}

impl Token {
    /// The token's text, or the empty string for textless tokens.
    #[must_use]
    pub fn text(&self) -> &str {
        self.data.as_ref().map_or("", Atom::as_str)
    }

    /// The token's lowercased text, or the empty string.
    #[must_use]
    pub fn lower_text(&self) -> &str {
        self.lower.as_ref().map_or("", Atom::as_str)
    }

    /// Whether this is a [`TokenType::Char`] token holding exactly `c`.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.ttype == TokenType::Char && {
            let mut buf = [0u8; 4];
            self.text() == c.encode_utf8(&mut buf)
        }
    }

    /// Whether this is a whitespace token.
    #[must_use]
    pub fn is_ws(&self) -> bool {
        self.ttype == TokenType::Whitespace
    }

    /// Whether this token is an identifier whose lowercase form is `s`.
    ///
    /// `s` must already be lowercase.
    #[must_use]
    pub fn is_ident(&self, s: &str) -> bool {
        self.ttype == TokenType::Ident && self.lower_text() == s
    }
}
