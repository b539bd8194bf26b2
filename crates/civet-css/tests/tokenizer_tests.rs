//! Integration tests for the tokenizer: interning behaviour and
//! resumption across chunk boundaries.

use civet_css::stream::InputStream;
use civet_css::tokenizer::{Token, TokenType, Tokenizer};
use civet_css::{Dictionary, Error};

fn tokenize(dict: &Dictionary, input: &str) -> Vec<Token> {
    let mut stream = InputStream::new();
    stream.append(input.as_bytes());
    stream.mark_eof();
    let mut lexer = Tokenizer::new();
    let mut out = Vec::new();
    loop {
        let t = lexer.next_token(&mut stream, dict).expect("complete input");
        if t.ttype == TokenType::Eof {
            break;
        }
        out.push(t);
    }
    out
}

#[test]
fn identical_text_shares_one_interned_handle() {
    let dict = Dictionary::new();
    let tokens = tokenize(&dict, "color red color");
    let idents: Vec<&Token> = tokens.iter().filter(|t| !t.is_ws()).collect();

    assert_eq!(
        idents[0].data.as_ref().unwrap(),
        idents[2].data.as_ref().unwrap()
    );
    assert_ne!(
        idents[0].data.as_ref().unwrap(),
        idents[1].data.as_ref().unwrap()
    );
}

#[test]
fn lowercase_handles_alias_the_original_when_already_lower() {
    let dict = Dictionary::new();
    let tokens = tokenize(&dict, "div DIV");
    let idents: Vec<&Token> = tokens.iter().filter(|t| !t.is_ws()).collect();

    // "div" needs no separate lowercase entry.
    assert_eq!(idents[0].data, idents[0].lower);
    // "DIV" interns both forms; the lowercase one is shared with "div".
    assert_ne!(idents[1].data, idents[1].lower);
    assert_eq!(idents[1].lower, idents[0].data);
}

#[test]
fn token_stream_is_chunk_boundary_invariant() {
    let input = "@media screen{p{color:#a1b2c3;width:12.5%}}/*x*/ url( 'a b' ) u+0a?-0aff";

    let dict = Dictionary::new();
    let whole = tokenize(&dict, input);

    // Re-lex with the stream fed one byte at a time.
    let dict2 = Dictionary::new();
    let mut stream = InputStream::new();
    let mut lexer = Tokenizer::new();
    let mut split: Vec<Token> = Vec::new();
    let mut fed = 0;
    let bytes = input.as_bytes();
    loop {
        match lexer.next_token(&mut stream, &dict2) {
            Ok(t) => {
                if t.ttype == TokenType::Eof {
                    break;
                }
                split.push(t);
            }
            Err(Error::NeedData) => {
                if fed < bytes.len() {
                    stream.append(&bytes[fed..=fed]);
                    fed += 1;
                } else {
                    stream.mark_eof();
                }
            }
            Err(e) => panic!("lex failed: {e}"),
        }
    }

    assert_eq!(whole.len(), split.len());
    for (a, b) in whole.iter().zip(split.iter()) {
        assert_eq!(a.ttype, b.ttype);
        assert_eq!(a.text(), b.text());
    }
}

#[test]
fn every_category_up_to_dimension_is_interned() {
    let dict = Dictionary::new();
    let tokens = tokenize(
        &dict,
        "name @at #hash fn( 'str' url(u) u+0a0a x 1 2% 3em",
    );
    for token in tokens.iter().filter(|t| !t.is_ws()) {
        assert!(
            token.ttype.interns(),
            "expected an interning category, got {:?}",
            token.ttype
        );
        assert!(token.data.is_some(), "{:?} lost its text", token.ttype);
    }
}
