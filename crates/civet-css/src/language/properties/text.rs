//! Text and colour properties.

use super::utils::{
    colour_property, keyword_property, length_property, parse_important, parse_length,
};
use super::{PropertyContext, TokenCursor};
use crate::bytecode::{self as bc, FLAG_INHERIT, Opcode, Opv, Style};
use crate::error::{Error, Result};
use crate::fixed::number_from_string;
use crate::tokenizer::TokenType;

pub(super) fn parse_color(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    colour_property(Opcode::Color, 0, bc::COLOR_SET, &[], ctx, v, style)
}

const SPACING_NORMAL_KEYWORD: &[(&str, u16)] = &[("normal", bc::SPACING_NORMAL)];

pub(super) fn parse_letter_spacing(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::LetterSpacing,
        0,
        bc::SPACING_SET,
        SPACING_NORMAL_KEYWORD,
        false,
        true,
        ctx,
        v,
        style,
    )
}

pub(super) fn parse_word_spacing(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::WordSpacing,
        0,
        bc::SPACING_SET,
        SPACING_NORMAL_KEYWORD,
        false,
        true,
        ctx,
        v,
        style,
    )
}

/// `line-height: <number> | <length> | <percentage> | normal | inherit`.
/// Bare numbers stay numbers (they scale with the element's own font
/// size); dimensions must not be negative.
pub(super) fn parse_line_height(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;

    if t.ttype == TokenType::Ident {
        let (inherit, value) = if t.is_ident("inherit") {
            (FLAG_INHERIT, 0)
        } else if t.is_ident("normal") {
            (0, bc::LINE_HEIGHT_NORMAL)
        } else {
            return Err(Error::Invalid);
        };
        let _ = v.next();
        let flags = inherit | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::LineHeight, flags, value));
        return Ok(());
    }

    if t.ttype == TokenType::Number {
        let text = t.text();
        let (val, consumed) = number_from_string(text, false);
        if consumed == text.len() && !val.is_negative() {
            let _ = v.next();
            let flags = parse_important(v)?;
            style.push_opv(Opv::new(Opcode::LineHeight, flags, bc::LINE_HEIGHT_NUMBER));
            style.push_fixed(val);
            return Ok(());
        }
        return Err(Error::Invalid);
    }

    let (val, unit) = parse_length(ctx, v, true, false)?;
    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::LineHeight, flags, bc::LINE_HEIGHT_DIMENSION));
    style.push_fixed(val);
    style.push_unit(unit);
    Ok(())
}

pub(super) fn parse_text_align(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::TextAlign,
        0,
        &[
            ("left", bc::TEXT_ALIGN_LEFT),
            ("right", bc::TEXT_ALIGN_RIGHT),
            ("center", bc::TEXT_ALIGN_CENTER),
            ("justify", bc::TEXT_ALIGN_JUSTIFY),
        ],
        v,
        style,
    )
}

pub(super) fn parse_text_transform(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::TextTransform,
        0,
        &[
            ("capitalize", bc::TEXT_TRANSFORM_CAPITALIZE),
            ("uppercase", bc::TEXT_TRANSFORM_UPPERCASE),
            ("lowercase", bc::TEXT_TRANSFORM_LOWERCASE),
            ("none", bc::TEXT_TRANSFORM_NONE),
        ],
        v,
        style,
    )
}

pub(super) fn parse_white_space(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    keyword_property(
        Opcode::WhiteSpace,
        0,
        &[
            ("normal", bc::WHITE_SPACE_NORMAL),
            ("pre", bc::WHITE_SPACE_PRE),
            ("nowrap", bc::WHITE_SPACE_NOWRAP),
            ("pre-wrap", bc::WHITE_SPACE_PRE_WRAP),
            ("pre-line", bc::WHITE_SPACE_PRE_LINE),
        ],
        v,
        style,
    )
}

/// `text-decoration: none | [underline || overline || line-through ||
/// blink] | inherit`. The bitset lives in the value field.
pub(super) fn parse_text_decoration(
    _ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    v.skip_ws();
    let t = v.peek().ok_or(Error::Invalid)?;
    if t.ttype != TokenType::Ident {
        return Err(Error::Invalid);
    }

    if t.is_ident("inherit") {
        let _ = v.next();
        let flags = FLAG_INHERIT | parse_important(v)?;
        style.push_opv(Opv::new(Opcode::TextDecoration, flags, 0));
        return Ok(());
    }
    if t.is_ident("none") {
        let _ = v.next();
        let flags = parse_important(v)?;
        style.push_opv(Opv::new(
            Opcode::TextDecoration,
            flags,
            bc::TEXT_DECORATION_NONE,
        ));
        return Ok(());
    }

    let mut value = 0u16;
    loop {
        v.skip_ws();
        let Some(t) = v.peek() else { break };
        if t.is_char('!') {
            break;
        }
        if t.ttype != TokenType::Ident {
            return Err(Error::Invalid);
        }
        let bit = match t.lower_text() {
            "underline" => bc::TEXT_DECORATION_UNDERLINE,
            "overline" => bc::TEXT_DECORATION_OVERLINE,
            "line-through" => bc::TEXT_DECORATION_LINE_THROUGH,
            "blink" => bc::TEXT_DECORATION_BLINK,
            _ => return Err(Error::Invalid),
        };
        // Each keyword may appear once.
        if value & bit != 0 {
            return Err(Error::Invalid);
        }
        let _ = v.next();
        value |= bit;
    }
    if value == 0 {
        return Err(Error::Invalid);
    }

    let flags = parse_important(v)?;
    style.push_opv(Opv::new(Opcode::TextDecoration, flags, value));
    Ok(())
}

pub(super) fn parse_text_indent(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::TextIndent,
        0,
        bc::TEXT_INDENT_SET,
        &[],
        true,
        true,
        ctx,
        v,
        style,
    )
}

/// `vertical-align` takes its keyword set, a length, or a percentage
/// (negatives permitted).
pub(super) fn parse_vertical_align(
    ctx: &mut PropertyContext<'_>,
    v: &mut TokenCursor<'_>,
    style: &mut Style,
) -> Result<()> {
    length_property(
        Opcode::VerticalAlign,
        0,
        bc::VERTICAL_ALIGN_SET,
        &[
            ("baseline", bc::VERTICAL_ALIGN_BASELINE),
            ("sub", bc::VERTICAL_ALIGN_SUB),
            ("super", bc::VERTICAL_ALIGN_SUPER),
            ("top", bc::VERTICAL_ALIGN_TOP),
            ("text-top", bc::VERTICAL_ALIGN_TEXT_TOP),
            ("middle", bc::VERTICAL_ALIGN_MIDDLE),
            ("bottom", bc::VERTICAL_ALIGN_BOTTOM),
            ("text-bottom", bc::VERTICAL_ALIGN_TEXT_BOTTOM),
        ],
        true,
        true,
        ctx,
        v,
        style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::skip_value;
    use crate::tokenizer::{Token, Tokenizer};
    use civet_intern::Dictionary;

    fn tokens_of(dict: &Dictionary, input: &str) -> Vec<Token> {
        let mut stream = crate::stream::InputStream::new();
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

    fn parse_one(input: &str) -> Style {
        let dict = Dictionary::new();
        let tokens = tokens_of(&dict, input);
        let mut ctx = PropertyContext {
            dict: &dict,
            quirks_allowed: false,
            quirks_used: false,
        };
        let mut cursor = TokenCursor::new(&tokens);
        let mut style = Style::new();
        parse_line_height(&mut ctx, &mut cursor, &mut style)
            .expect("valid line-height");
        style
    }

    #[test]
    fn line_height_number_is_one_operand() {
        let style = parse_one("1.5");
        assert_eq!(style.words().len(), 2);
        let mut iter = style.iter();
        let opv = Opv::from_raw(iter.next_word().unwrap());
        assert_eq!(opv.opcode(), Some(Opcode::LineHeight));
        assert_eq!(opv.value(), bc::LINE_HEIGHT_NUMBER);
        skip_value(Opcode::LineHeight, opv, &mut iter).unwrap();
        assert!(iter.at_end());
    }

    #[test]
    fn line_height_dimension_is_two_operands() {
        let style = parse_one("12px");
        assert_eq!(style.words().len(), 3);
    }

    #[test]
    fn negative_line_height_is_rejected() {
        let dict = Dictionary::new();
        let tokens = tokens_of(&dict, "-1.5");
        let mut ctx = PropertyContext {
            dict: &dict,
            quirks_allowed: false,
            quirks_used: false,
        };
        let mut cursor = TokenCursor::new(&tokens);
        let mut style = Style::new();
        assert_eq!(
            parse_line_height(&mut ctx, &mut cursor, &mut style),
            Err(Error::Invalid)
        );
    }

    #[test]
    fn text_decoration_accumulates_bits() {
        let dict = Dictionary::new();
        let tokens = tokens_of(&dict, "underline line-through");
        let mut ctx = PropertyContext {
            dict: &dict,
            quirks_allowed: false,
            quirks_used: false,
        };
        let mut cursor = TokenCursor::new(&tokens);
        let mut style = Style::new();
        parse_text_decoration(&mut ctx, &mut cursor, &mut style).unwrap();
        let opv = Opv::from_raw(style.words()[0]);
        assert_eq!(
            opv.value(),
            bc::TEXT_DECORATION_UNDERLINE | bc::TEXT_DECORATION_LINE_THROUGH
        );
    }
}
