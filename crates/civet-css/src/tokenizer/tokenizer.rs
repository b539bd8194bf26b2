//! The CSS 2.1 lexer.
//!
//! Byte-oriented scanning over the input stream: all structural
//! characters are ASCII, and any byte at or above `0x80` is an
//! identifier character, so decoded UTF-8 passes through unharmed.
//!
//! Whenever a token cannot be completed because the stream ran out of
//! bytes before end-of-input, the lexer rewinds to the token start and
//! returns `NeedData`; the caller appends more input and retries. This
//! is what makes parsing chunk-order-invariant.

use civet_intern::Dictionary;

use super::token::{Token, TokenType};
use crate::error::{Error, Result};
use crate::stream::{InputStream, Peek};

/// The lexer. Holds options only; all position state lives in the stream.
#[derive(Debug, Default)]
pub struct Tokenizer {
    emit_comments: bool,
}

impl Tokenizer {
    /// Create a lexer with default options.
    #[must_use]
    pub fn new() -> Tokenizer {
        Tokenizer::default()
    }

    /// Emit `COMMENT` tokens instead of skipping comments.
    pub fn set_emit_comments(&mut self, emit: bool) {
        self.emit_comments = emit;
    }

    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// `NeedData` when the stream ran dry mid-token before end-of-input;
    /// the stream is rewound to the token start so the call can be
    /// retried verbatim.
    pub fn next_token(&mut self, stream: &mut InputStream, dict: &Dictionary) -> Result<Token> {
        loop {
            let mark = stream.mark();
            let (line, col) = stream.position();

            match scan(stream) {
                Ok((TokenType::Comment, _)) if !self.emit_comments => {}
                Ok((ttype, text)) => {
                    let data = if ttype.interns() || ttype == TokenType::Comment {
                        text.map(|t| dict.intern(&t))
                    } else {
                        None
                    };
                    let lower = if ttype.interns_lower() {
                        data.as_ref().map(|a| dict.intern_lower(a.as_str()))
                    } else {
                        data.clone()
                    };
                    return Ok(Token {
                        ttype,
                        data,
                        lower,
                        line,
                        col,
                    });
                }
                Err(e) => {
                    stream.rewind(mark);
                    return Err(e);
                }
            }
        }
    }
}

/// Peek that folds "more data may come" into `NeedData`.
fn peek(s: &InputStream, off: usize) -> Result<Option<u8>> {
    match s.peek(off) {
        Peek::Byte(b) => Ok(Some(b)),
        Peek::Eof => Ok(None),
        Peek::Pending => Err(Error::NeedData),
    }
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0C')
}

fn is_newline(b: u8) -> bool {
    matches!(b, b'\r' | b'\n' | b'\x0C')
}

/// `nmstart`: `[_a-zA-Z]`, non-ASCII, or the start of an escape.
fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// `nmchar`: `nmstart`, digit, or `-`.
fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || b == b'-'
}

/// `[!#$%&*-~]`, non-ASCII, or escape: the characters of a bare URL.
fn is_url_char(b: u8) -> bool {
    matches!(b, b'!' | b'#' | b'$' | b'%' | b'&' | b'*'..=b'~') || b >= 0x80
}

/// Whether an escape begins at `off` (backslash not followed by newline).
fn escape_starts(s: &InputStream, off: usize) -> Result<bool> {
    if peek(s, off)? != Some(b'\\') {
        return Ok(false);
    }
    Ok(match peek(s, off + 1)? {
        Some(b) => !is_newline(b),
        None => false,
    })
}

/// Whether an identifier begins at `off`: `[-]? nmstart | escape`.
fn ident_starts(s: &InputStream, off: usize) -> Result<bool> {
    let off = if peek(s, off)? == Some(b'-') { off + 1 } else { off };
    Ok(match peek(s, off)? {
        Some(b) if is_name_start(b) => true,
        Some(b'\\') => escape_starts(s, off)?,
        _ => false,
    })
}

/// Whether a number begins at `off`: `[+-]? ('.'? digit)`.
fn number_starts(s: &InputStream, off: usize) -> Result<bool> {
    let off = if matches!(peek(s, off)?, Some(b'+' | b'-')) {
        off + 1
    } else {
        off
    };
    let off = if peek(s, off)? == Some(b'.') { off + 1 } else { off };
    Ok(matches!(peek(s, off)?, Some(b) if b.is_ascii_digit()))
}

/// Scan one token, returning its category and text.
///
/// Comments are always scanned as tokens here; the caller drops them when
/// not asked to emit them.
fn scan(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    let b = match peek(s, 0)? {
        None => return Ok((TokenType::Eof, None)),
        Some(b) => b,
    };

    match b {
        b if is_ws(b) => {
            while matches!(peek(s, 0)?, Some(b) if is_ws(b)) {
                s.advance(1);
            }
            Ok((TokenType::Whitespace, None))
        }

        b'/' => {
            if peek(s, 1)? == Some(b'*') {
                scan_comment(s)
            } else {
                scan_char(s)
            }
        }

        b'"' | b'\'' => scan_string(s, b),

        b'#' => {
            let named = match peek(s, 1)? {
                Some(n) if is_name_char(n) => true,
                Some(b'\\') => escape_starts(s, 1)?,
                _ => false,
            };
            if named {
                s.advance(1);
                let name = scan_name(s)?;
                Ok((TokenType::Hash, Some(name)))
            } else {
                scan_char(s)
            }
        }

        b'@' => {
            if ident_starts(s, 1)? {
                s.advance(1);
                let name = scan_ident(s)?;
                Ok((TokenType::AtKeyword, Some(name)))
            } else {
                scan_char(s)
            }
        }

        b'<' => {
            if peek(s, 1)? == Some(b'!') && peek(s, 2)? == Some(b'-') && peek(s, 3)? == Some(b'-')
            {
                s.advance(4);
                Ok((TokenType::Cdo, None))
            } else {
                scan_char(s)
            }
        }

        b'~' | b'|' | b'^' | b'$' | b'*' => {
            if peek(s, 1)? == Some(b'=') {
                let ttype = match b {
                    b'~' => TokenType::Includes,
                    b'|' => TokenType::Dashmatch,
                    b'^' => TokenType::Prefixmatch,
                    b'$' => TokenType::Suffixmatch,
                    _ => TokenType::Substringmatch,
                };
                s.advance(2);
                Ok((ttype, None))
            } else {
                scan_char(s)
            }
        }

        b'-' => {
            if peek(s, 1)? == Some(b'-') && peek(s, 2)? == Some(b'>') {
                s.advance(3);
                Ok((TokenType::Cdc, None))
            } else if number_starts(s, 0)? {
                scan_numeric(s)
            } else if ident_starts(s, 0)? {
                scan_ident_like(s)
            } else {
                scan_char(s)
            }
        }

        b'+' | b'.' => {
            if number_starts(s, 0)? {
                scan_numeric(s)
            } else {
                scan_char(s)
            }
        }

        b'0'..=b'9' => scan_numeric(s),

        b'u' | b'U' => {
            if unicode_range_starts(s)? {
                scan_unicode_range(s)
            } else {
                scan_ident_like(s)
            }
        }

        b'\\' => {
            if escape_starts(s, 0)? {
                scan_ident_like(s)
            } else {
                scan_char(s)
            }
        }

        b if is_name_start(b) => scan_ident_like(s),

        _ => scan_char(s),
    }
}

/// A single-character token.
fn scan_char(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    let b = peek(s, 0)?.unwrap_or(0);
    s.advance(1);
    Ok((TokenType::Char, Some((b as char).to_string())))
}

/// `/* ... */`. Unterminated comments swallow the rest of the input.
fn scan_comment(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    s.advance(2);
    let mut text = Vec::new();
    loop {
        match peek(s, 0)? {
            None => break,
            Some(b'*') if peek(s, 1)? == Some(b'/') => {
                s.advance(2);
                break;
            }
            Some(b) => {
                text.push(b);
                s.advance(1);
            }
        }
    }
    Ok((
        TokenType::Comment,
        Some(String::from_utf8_lossy(&text).into_owned()),
    ))
}

/// A quoted string. A bare newline inside the string yields
/// `INVALID_STRING`; end of input closes the string.
fn scan_string(s: &mut InputStream, quote: u8) -> Result<(TokenType, Option<String>)> {
    s.advance(1);
    let mut text = Vec::new();
    loop {
        match peek(s, 0)? {
            None => break,
            Some(b) if b == quote => {
                s.advance(1);
                break;
            }
            Some(b) if is_newline(b) => {
                // The newline is not part of the token.
                return Ok((
                    TokenType::InvalidString,
                    Some(String::from_utf8_lossy(&text).into_owned()),
                ));
            }
            Some(b'\\') => match peek(s, 1)? {
                None => {
                    s.advance(1);
                    break;
                }
                Some(n) if is_newline(n) => {
                    // Escaped newline: line continuation.
                    s.advance(2);
                    if n == b'\r' && peek(s, 0)? == Some(b'\n') {
                        s.advance(1);
                    }
                }
                Some(_) => consume_escape(s, &mut text)?,
            },
            Some(b) => {
                text.push(b);
                s.advance(1);
            }
        }
    }
    Ok((
        TokenType::String,
        Some(String::from_utf8_lossy(&text).into_owned()),
    ))
}

/// `name`: one or more `nmchar`s / escapes.
fn scan_name(s: &mut InputStream) -> Result<String> {
    let mut text = Vec::new();
    loop {
        match peek(s, 0)? {
            Some(b) if is_name_char(b) => {
                text.push(b);
                s.advance(1);
            }
            Some(b'\\') if escape_starts(s, 0)? => consume_escape(s, &mut text)?,
            _ => break,
        }
    }
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// `ident`: optional `-`, then `nmstart`, then `nmchar`s.
fn scan_ident(s: &mut InputStream) -> Result<String> {
    let mut text = Vec::new();
    if peek(s, 0)? == Some(b'-') {
        text.push(b'-');
        s.advance(1);
    }
    match peek(s, 0)? {
        Some(b'\\') if escape_starts(s, 0)? => consume_escape(s, &mut text)?,
        Some(b) if is_name_start(b) => {
            text.push(b);
            s.advance(1);
        }
        _ => {}
    }
    loop {
        match peek(s, 0)? {
            Some(b) if is_name_char(b) => {
                text.push(b);
                s.advance(1);
            }
            Some(b'\\') if escape_starts(s, 0)? => consume_escape(s, &mut text)?,
            _ => break,
        }
    }
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// An identifier, function, or URI token.
fn scan_ident_like(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    let name = scan_ident(s)?;
    if peek(s, 0)? == Some(b'(') {
        if name.eq_ignore_ascii_case("url") {
            if let Some(url) = try_scan_uri_tail(s)? {
                return Ok((TokenType::Uri, Some(url)));
            }
        }
        s.advance(1);
        return Ok((TokenType::Function, Some(name)));
    }
    Ok((TokenType::Ident, Some(name)))
}

/// The tail of a URI token, cursor on `(`. Restores the cursor and
/// returns `None` when the tail does not match the URI grammar (the
/// caller falls back to a function token).
fn try_scan_uri_tail(s: &mut InputStream) -> Result<Option<String>> {
    let mark = s.mark();
    s.advance(1);

    while matches!(peek(s, 0)?, Some(b) if is_ws(b)) {
        s.advance(1);
    }

    let mut text = Vec::new();
    match peek(s, 0)? {
        Some(q @ (b'"' | b'\'')) => {
            let (ttype, content) = scan_string(s, q)?;
            if ttype != TokenType::String {
                s.rewind(mark);
                return Ok(None);
            }
            text = content.unwrap_or_default().into_bytes();
        }
        _ => loop {
            match peek(s, 0)? {
                Some(b) if is_url_char(b) && b != b'\\' && b != b'"' && b != b'\'' => {
                    text.push(b);
                    s.advance(1);
                }
                Some(b'\\') if escape_starts(s, 0)? => consume_escape(s, &mut text)?,
                _ => break,
            }
        },
    }

    while matches!(peek(s, 0)?, Some(b) if is_ws(b)) {
        s.advance(1);
    }

    if peek(s, 0)? == Some(b')') {
        s.advance(1);
        Ok(Some(String::from_utf8_lossy(&text).into_owned()))
    } else {
        s.rewind(mark);
        Ok(None)
    }
}

/// A number, percentage, or dimension token.
fn scan_numeric(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    let mut text = Vec::new();

    if let Some(b @ (b'+' | b'-')) = peek(s, 0)? {
        text.push(b);
        s.advance(1);
    }
    while matches!(peek(s, 0)?, Some(b) if b.is_ascii_digit()) {
        text.push(peek(s, 0)?.unwrap_or(0));
        s.advance(1);
    }
    if peek(s, 0)? == Some(b'.') && matches!(peek(s, 1)?, Some(b) if b.is_ascii_digit()) {
        text.push(b'.');
        s.advance(1);
        while matches!(peek(s, 0)?, Some(b) if b.is_ascii_digit()) {
            text.push(peek(s, 0)?.unwrap_or(0));
            s.advance(1);
        }
    }

    if ident_starts(s, 0)? {
        let unit = scan_ident(s)?;
        text.extend_from_slice(unit.as_bytes());
        return Ok((
            TokenType::Dimension,
            Some(String::from_utf8_lossy(&text).into_owned()),
        ));
    }

    if peek(s, 0)? == Some(b'%') {
        s.advance(1);
        return Ok((
            TokenType::Percentage,
            Some(String::from_utf8_lossy(&text).into_owned()),
        ));
    }

    Ok((
        TokenType::Number,
        Some(String::from_utf8_lossy(&text).into_owned()),
    ))
}

/// Whether `u+` begins a unicode-range token at the cursor.
fn unicode_range_starts(s: &InputStream) -> Result<bool> {
    Ok(peek(s, 0)?.is_some_and(|b| b == b'u' || b == b'U')
        && peek(s, 1)? == Some(b'+')
        && matches!(peek(s, 2)?, Some(b) if b.is_ascii_hexdigit() || b == b'?'))
}

/// `u+` `[0-9a-f?]{1,6}` (`-` `[0-9a-f]{1,6}`)?
fn scan_unicode_range(s: &mut InputStream) -> Result<(TokenType, Option<String>)> {
    let mut text = Vec::new();
    text.push(peek(s, 0)?.unwrap_or(b'u'));
    text.push(b'+');
    s.advance(2);

    let mut count = 0;
    while count < 6
        && matches!(peek(s, 0)?, Some(b) if b.is_ascii_hexdigit() || b == b'?')
    {
        text.push(peek(s, 0)?.unwrap_or(0));
        s.advance(1);
        count += 1;
    }

    if peek(s, 0)? == Some(b'-') && matches!(peek(s, 1)?, Some(b) if b.is_ascii_hexdigit()) {
        text.push(b'-');
        s.advance(1);
        let mut count = 0;
        while count < 6 && matches!(peek(s, 0)?, Some(b) if b.is_ascii_hexdigit()) {
            text.push(peek(s, 0)?.unwrap_or(0));
            s.advance(1);
            count += 1;
        }
    }

    Ok((
        TokenType::UnicodeRange,
        Some(String::from_utf8_lossy(&text).into_owned()),
    ))
}

/// Consume an escape sequence (cursor on the backslash), appending the
/// escaped character to `out` as UTF-8.
fn consume_escape(s: &mut InputStream, out: &mut Vec<u8>) -> Result<()> {
    s.advance(1);
    let first = match peek(s, 0)? {
        None => return Ok(()),
        Some(b) => b,
    };

    if first.is_ascii_hexdigit() {
        let mut value: u32 = 0;
        let mut count = 0;
        while count < 6 {
            match peek(s, 0)? {
                Some(b) if b.is_ascii_hexdigit() => {
                    value = value * 16 + u32::from((b as char).to_digit(16).unwrap_or(0));
                    s.advance(1);
                    count += 1;
                }
                _ => break,
            }
        }
        // One whitespace character after the hex digits is part of the
        // escape.
        if let Some(b) = peek(s, 0)? {
            if is_ws(b) {
                s.advance(1);
                if b == b'\r' && peek(s, 0)? == Some(b'\n') {
                    s.advance(1);
                }
            }
        }
        let c = match value {
            0 | 0xD800..=0xDFFF => '\u{FFFD}',
            v if v > 0x10FFFF => '\u{FFFD}',
            v => char::from_u32(v).unwrap_or('\u{FFFD}'),
        };
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        return Ok(());
    }

    // Literal escape: the next character itself. Copy the full UTF-8
    // sequence for non-ASCII.
    out.push(first);
    s.advance(1);
    if first >= 0xC0 {
        while matches!(peek(s, 0)?, Some(b) if (0x80..0xC0).contains(&b)) {
            out.push(peek(s, 0)?.unwrap_or(0));
            s.advance(1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize_all(input: &str) -> Vec<(TokenType, String)> {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.append(input.as_bytes());
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        let mut out = Vec::new();
        loop {
            let t = lexer.next_token(&mut stream, &dict).expect("complete input");
            let eof = t.ttype == TokenType::Eof;
            out.push((t.ttype, t.text().to_string()));
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn ident_and_function_and_uri_disambiguate() {
        let toks = tokenize_all("color rgb( url(a.css)");
        assert_eq!(toks[0], (TokenType::Ident, "color".to_string()));
        assert_eq!(toks[2], (TokenType::Function, "rgb".to_string()));
        assert_eq!(toks[4], (TokenType::Uri, "a.css".to_string()));
    }

    #[test]
    fn uri_with_quoted_body_and_whitespace() {
        let toks = tokenize_all("url( \"x y.css\" )");
        assert_eq!(toks[0], (TokenType::Uri, "x y.css".to_string()));
    }

    #[test]
    fn numbers_percentages_dimensions() {
        let toks = tokenize_all("12 4.5 -3px 100%");
        assert_eq!(toks[0], (TokenType::Number, "12".to_string()));
        assert_eq!(toks[2], (TokenType::Number, "4.5".to_string()));
        assert_eq!(toks[4], (TokenType::Dimension, "-3px".to_string()));
        assert_eq!(toks[6], (TokenType::Percentage, "100".to_string()));
    }

    #[test]
    fn invalid_string_on_bare_newline() {
        let toks = tokenize_all("\"abc\ndef\"");
        assert_eq!(toks[0], (TokenType::InvalidString, "abc".to_string()));
    }

    #[test]
    fn escaped_newline_continues_string() {
        let toks = tokenize_all("\"ab\\\ncd\"");
        assert_eq!(toks[0], (TokenType::String, "abcd".to_string()));
    }

    #[test]
    fn hex_escapes_decode_with_trailing_space() {
        let toks = tokenize_all("\\34 2");
        // \34 is "4"; the following space is part of the escape.
        assert_eq!(toks[0], (TokenType::Ident, "42".to_string()));
    }

    #[test]
    fn match_operators() {
        let toks = tokenize_all("~= |= ^= $= *=");
        assert_eq!(toks[0].0, TokenType::Includes);
        assert_eq!(toks[2].0, TokenType::Dashmatch);
        assert_eq!(toks[4].0, TokenType::Prefixmatch);
        assert_eq!(toks[6].0, TokenType::Suffixmatch);
        assert_eq!(toks[8].0, TokenType::Substringmatch);
    }

    #[test]
    fn cdo_cdc_and_comments_skipped() {
        let toks = tokenize_all("<!-- p --> /* note */ q");
        assert_eq!(toks[0].0, TokenType::Cdo);
        assert_eq!(toks[2], (TokenType::Ident, "p".to_string()));
        assert_eq!(toks[4].0, TokenType::Cdc);
        // Comment skipped entirely: next non-ws token is the ident.
        assert_eq!(toks[6], (TokenType::Ident, "q".to_string()));
    }

    #[test]
    fn comments_emitted_on_request() {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.append(b"/* x */");
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        lexer.set_emit_comments(true);
        let t = lexer.next_token(&mut stream, &dict).unwrap();
        assert_eq!(t.ttype, TokenType::Comment);
        assert_eq!(t.text(), " x ");
    }

    #[test]
    fn eof_is_idempotent() {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        for _ in 0..3 {
            let t = lexer.next_token(&mut stream, &dict).unwrap();
            assert_eq!(t.ttype, TokenType::Eof);
        }
    }

    #[test]
    fn needdata_rewinds_and_resumes() {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.append(b"back");
        let mut lexer = Tokenizer::new();
        assert_eq!(
            lexer.next_token(&mut stream, &dict).unwrap_err(),
            Error::NeedData
        );
        stream.append(b"ground");
        stream.mark_eof();
        let t = lexer.next_token(&mut stream, &dict).unwrap();
        assert_eq!(t.ttype, TokenType::Ident);
        assert_eq!(t.text(), "background");
    }

    #[test]
    fn lowercase_form_is_interned_for_idents() {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.append(b"DIV");
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        let t = lexer.next_token(&mut stream, &dict).unwrap();
        assert_eq!(t.text(), "DIV");
        assert_eq!(t.lower_text(), "div");
        assert_eq!(t.lower.unwrap(), dict.intern("div"));
    }

    #[test]
    fn hash_and_at_keyword() {
        let toks = tokenize_all("#fff @media @ #");
        assert_eq!(toks[0], (TokenType::Hash, "fff".to_string()));
        assert_eq!(toks[2], (TokenType::AtKeyword, "media".to_string()));
        assert_eq!(toks[4], (TokenType::Char, "@".to_string()));
        assert_eq!(toks[6], (TokenType::Char, "#".to_string()));
    }

    #[test]
    fn unicode_range_forms() {
        let toks = tokenize_all("u+00a0 U+0025-00FF u+4??");
        assert_eq!(toks[0], (TokenType::UnicodeRange, "u+00a0".to_string()));
        assert_eq!(toks[2], (TokenType::UnicodeRange, "U+0025-00FF".to_string()));
        assert_eq!(toks[4], (TokenType::UnicodeRange, "u+4??".to_string()));
    }

    #[test]
    fn token_positions_are_tracked() {
        let dict = Dictionary::new();
        let mut stream = InputStream::new();
        stream.append(b"p {\n  color: red }");
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        let mut tokens = Vec::new();
        loop {
            let t = lexer.next_token(&mut stream, &dict).unwrap();
            let eof = t.ttype == TokenType::Eof;
            tokens.push(t);
            if eof {
                break;
            }
        }
        // "color" is on line 2, column 3.
        let color = tokens.iter().find(|t| t.text() == "color").unwrap();
        assert_eq!((color.line, color.col), (2, 3));
    }
}
