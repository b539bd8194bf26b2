//! Selector-list parsing.
//!
//! Turns a ruleset prelude — the token vector delivered with a
//! `START_RULESET` event — into selector chains with computed
//! specificity. The CSS 2.1 grammar:
//!
//! ```text
//! selector_list   -> selector [ ',' ws selector ]*
//! selector        -> simple_selector [ combinator simple_selector ]*
//! combinator      -> '+' ws | '>' ws | ws1
//! simple_selector -> element_name [ HASH | class | attrib | pseudo ]*
//!                 -> [ HASH | class | attrib | pseudo ]+
//! element_name    -> IDENT | '*'
//! class           -> '.' IDENT
//! attrib          -> '[' ws IDENT ws [ [ '=' | INCLUDES | DASHMATCH ]
//!                        ws [ IDENT | STRING ] ws ]? ']'
//! pseudo          -> ':' [ IDENT | FUNCTION ws IDENT? ws ')' ]
//! ```
//!
//! Any error rejects the entire selector list, which discards the whole
//! ruleset.

use civet_intern::Dictionary;

use super::properties::TokenCursor;
use crate::error::{Error, Result};
use crate::selector::{
    Combinator, Detail, DetailKind, SPECIFICITY_B, SPECIFICITY_C, SPECIFICITY_D, Selector,
};
use crate::tokenizer::{Token, TokenType};

/// Pseudo-elements count at element weight; everything else at class
/// weight.
fn pseudo_specificity(name: &str) -> u32 {
    match name {
        "first-line" | "first-letter" | "before" | "after" => SPECIFICITY_D,
        _ => SPECIFICITY_C,
    }
}

/// Whether a token can begin a simple selector.
fn starts_simple_selector(t: &Token) -> bool {
    t.ttype == TokenType::Ident
        || t.ttype == TokenType::Hash
        || t.is_char('*')
        || t.is_char('.')
        || t.is_char(':')
        || t.is_char('[')
}

/// Parse a full comma-separated selector list.
pub(crate) fn parse_selector_list(dict: &Dictionary, tokens: &[Token]) -> Result<Vec<Selector>> {
    let mut v = TokenCursor::new(tokens);
    let mut selectors = Vec::new();

    loop {
        selectors.push(parse_selector(dict, &mut v)?);
        v.skip_ws();
        match v.peek() {
            None => break,
            Some(t) if t.is_char(',') => {
                let _ = v.next();
            }
            Some(_) => return Err(Error::Invalid),
        }
    }

    Ok(selectors)
}

/// Parse one selector chain. The returned head is the rightmost simple
/// selector with the chain's total specificity.
fn parse_selector(dict: &Dictionary, v: &mut TokenCursor<'_>) -> Result<Selector> {
    v.skip_ws();
    let (mut chain, mut specificity) = parse_simple_selector(dict, v)?;

    loop {
        let Some(combinator) = parse_combinator(v)? else {
            break;
        };
        let (mut head, spec) = parse_simple_selector(dict, v)?;
        specificity += spec;
        head.combinator = combinator;
        head.next = Some(Box::new(chain));
        chain = head;
    }

    chain.specificity = specificity;
    Ok(chain)
}

/// Parse the combinator between two simple selectors, or `None` at the
/// end of the chain.
fn parse_combinator(v: &mut TokenCursor<'_>) -> Result<Option<Combinator>> {
    let mut saw_ws = false;
    loop {
        match v.peek() {
            Some(t) if t.is_ws() || t.ttype == TokenType::Comment => {
                saw_ws = true;
                let _ = v.next();
            }
            Some(t) if t.is_char('>') => {
                let _ = v.next();
                v.skip_ws();
                return Ok(Some(Combinator::Child));
            }
            Some(t) if t.is_char('+') => {
                let _ = v.next();
                v.skip_ws();
                return Ok(Some(Combinator::AdjacentSibling));
            }
            Some(t) if saw_ws && starts_simple_selector(t) => {
                return Ok(Some(Combinator::Descendant));
            }
            _ => return Ok(None),
        }
    }
}

/// Parse one simple selector: an optional element name followed by
/// conditions, or conditions alone (implied universal element).
fn parse_simple_selector(
    dict: &Dictionary,
    v: &mut TokenCursor<'_>,
) -> Result<(Selector, u32)> {
    let mut specificity = 0u32;

    let element = match v.peek() {
        Some(t) if t.ttype == TokenType::Ident => {
            let name = t.lower.clone().ok_or(Error::Invalid)?;
            let _ = v.next();
            specificity += SPECIFICITY_D;
            name
        }
        Some(t) if t.is_char('*') => {
            let _ = v.next();
            dict.intern("*")
        }
        Some(t) if starts_simple_selector(t) => dict.intern("*"),
        _ => return Err(Error::Invalid),
    };

    let mut selector = Selector::new(Detail {
        kind: DetailKind::Element,
        name: element,
        value: None,
    });

    // Conditions bind tightly: any whitespace ends the simple selector.
    loop {
        match v.peek() {
            Some(t) if t.ttype == TokenType::Hash => {
                let name = t.data.clone().ok_or(Error::Invalid)?;
                let _ = v.next();
                selector.details.push(Detail {
                    kind: DetailKind::Id,
                    name,
                    value: None,
                });
                specificity += SPECIFICITY_B;
            }
            Some(t) if t.is_char('.') => {
                let _ = v.next();
                let ident = v.next().ok_or(Error::Invalid)?;
                if ident.ttype != TokenType::Ident {
                    return Err(Error::Invalid);
                }
                selector.details.push(Detail {
                    kind: DetailKind::Class,
                    name: ident.data.clone().ok_or(Error::Invalid)?,
                    value: None,
                });
                specificity += SPECIFICITY_C;
            }
            Some(t) if t.is_char('[') => {
                let _ = v.next();
                selector.details.push(parse_attrib(v)?);
                specificity += SPECIFICITY_C;
            }
            Some(t) if t.is_char(':') => {
                let _ = v.next();
                let detail = parse_pseudo(v)?;
                specificity += pseudo_specificity(detail.name.as_str());
                selector.details.push(detail);
            }
            _ => break,
        }
    }

    Ok((selector, specificity))
}

/// Parse an attribute condition; the `[` is already consumed.
fn parse_attrib(v: &mut TokenCursor<'_>) -> Result<Detail> {
    v.skip_ws();
    let name_tok = v.next().ok_or(Error::Invalid)?;
    if name_tok.ttype != TokenType::Ident {
        return Err(Error::Invalid);
    }
    let name = name_tok.lower.clone().ok_or(Error::Invalid)?;

    v.skip_ws();
    let t = v.next().ok_or(Error::Invalid)?;

    if t.is_char(']') {
        return Ok(Detail {
            kind: DetailKind::Attribute,
            name,
            value: None,
        });
    }

    let kind = if t.is_char('=') {
        DetailKind::AttributeEqual
    } else if t.ttype == TokenType::Includes {
        DetailKind::AttributeIncludes
    } else if t.ttype == TokenType::Dashmatch {
        DetailKind::AttributeDashmatch
    } else {
        return Err(Error::Invalid);
    };

    v.skip_ws();
    let value_tok = v.next().ok_or(Error::Invalid)?;
    if !matches!(value_tok.ttype, TokenType::Ident | TokenType::String) {
        return Err(Error::Invalid);
    }
    let value = value_tok.data.clone().ok_or(Error::Invalid)?;

    v.skip_ws();
    match v.next() {
        Some(t) if t.is_char(']') => Ok(Detail {
            kind,
            name,
            value: Some(value),
        }),
        _ => Err(Error::Invalid),
    }
}

/// Parse a pseudo condition; the leading `:` is already consumed. A
/// second colon (the CSS 3 pseudo-element spelling) is tolerated.
fn parse_pseudo(v: &mut TokenCursor<'_>) -> Result<Detail> {
    let mut t = v.next().ok_or(Error::Invalid)?;
    if t.is_char(':') {
        t = v.next().ok_or(Error::Invalid)?;
    }

    match t.ttype {
        TokenType::Ident => Ok(Detail {
            kind: DetailKind::Pseudo,
            name: t.lower.clone().ok_or(Error::Invalid)?,
            value: None,
        }),
        TokenType::Function => {
            let name = t.lower.clone().ok_or(Error::Invalid)?;
            v.skip_ws();
            let mut value = None;
            if let Some(arg) = v.peek()
                && arg.ttype == TokenType::Ident
            {
                value = Some(arg.data.clone().ok_or(Error::Invalid)?);
                let _ = v.next();
            }
            v.skip_ws();
            match v.next() {
                Some(t) if t.is_char(')') => Ok(Detail {
                    kind: DetailKind::Pseudo,
                    name,
                    value,
                }),
                _ => Err(Error::Invalid),
            }
        }
        _ => Err(Error::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::InputStream;
    use crate::tokenizer::Tokenizer;

    fn tokens_of(dict: &Dictionary, input: &str) -> Vec<Token> {
        let mut stream = InputStream::new();
        stream.append(input.as_bytes());
        stream.mark_eof();
        let mut lexer = Tokenizer::new();
        let mut out = Vec::new();
        loop {
            let t = lexer.next_token(&mut stream, dict).unwrap();
            if t.ttype == TokenType::Eof {
                break;
            }
            out.push(t);
        }
        out
    }

    fn parse(dict: &Dictionary, input: &str) -> Result<Vec<Selector>> {
        parse_selector_list(dict, &tokens_of(dict, input))
    }

    #[test]
    fn element_selector_has_unit_specificity() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "p").unwrap();
        assert_eq!(sels.len(), 1);
        assert_eq!(sels[0].specificity, SPECIFICITY_D);
        assert_eq!(sels[0].element_name(), &dict.intern("p"));
        assert_eq!(sels[0].combinator, Combinator::None);
    }

    #[test]
    fn compound_selector_sums_weights() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "div#main.warning").unwrap();
        assert_eq!(
            sels[0].specificity,
            SPECIFICITY_D + SPECIFICITY_B + SPECIFICITY_C
        );
        assert_eq!(sels[0].details.len(), 3);
    }

    #[test]
    fn chains_are_stored_right_to_left() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "div > p em").unwrap();
        let head = &sels[0];
        assert_eq!(head.element_name(), &dict.intern("em"));
        assert_eq!(head.combinator, Combinator::Descendant);
        let mid = head.next.as_ref().unwrap();
        assert_eq!(mid.element_name(), &dict.intern("p"));
        assert_eq!(mid.combinator, Combinator::Child);
        let tail = mid.next.as_ref().unwrap();
        assert_eq!(tail.element_name(), &dict.intern("div"));
        assert_eq!(tail.combinator, Combinator::None);
        // Chain specificity accumulates on the head.
        assert_eq!(head.specificity, 3 * SPECIFICITY_D);
    }

    #[test]
    fn class_without_element_gets_universal_name() {
        let dict = Dictionary::new();
        let sels = parse(&dict, ".warning").unwrap();
        assert_eq!(sels[0].element_name(), &dict.intern("*"));
        assert_eq!(sels[0].specificity, SPECIFICITY_C);
    }

    #[test]
    fn selector_lists_split_on_commas() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "h1, h2 , h3").unwrap();
        assert_eq!(sels.len(), 3);
    }

    #[test]
    fn attribute_forms() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "a[href][rel=next][lang|=en][class~=x]").unwrap();
        let kinds: Vec<_> = sels[0].conditions().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DetailKind::Attribute,
                DetailKind::AttributeEqual,
                DetailKind::AttributeDashmatch,
                DetailKind::AttributeIncludes,
            ]
        );
    }

    #[test]
    fn element_names_are_lowercased_but_classes_are_not() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "DIV.Warning").unwrap();
        assert_eq!(sels[0].element_name(), &dict.intern("div"));
        assert_eq!(sels[0].conditions()[0].name, dict.intern("Warning"));
    }

    #[test]
    fn pseudo_element_counts_at_element_weight() {
        let dict = Dictionary::new();
        let sels = parse(&dict, "p:first-line").unwrap();
        assert_eq!(sels[0].specificity, 2 * SPECIFICITY_D);
        let hover = parse(&dict, "a:hover").unwrap();
        assert_eq!(hover[0].specificity, SPECIFICITY_D + SPECIFICITY_C);
    }

    #[test]
    fn junk_rejects_the_whole_list() {
        let dict = Dictionary::new();
        assert!(parse(&dict, "p,").is_err());
        assert!(parse(&dict, "p..x").is_err());
        assert!(parse(&dict, "[=x]").is_err());
        assert!(parse(&dict, "p >").is_err());
    }
}
