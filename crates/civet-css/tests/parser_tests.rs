//! Integration tests for the grammar automaton: event order, token
//! vectors, error recovery, and chunked driving.

use civet_css::parser::{EventHandler, EventType, Parser};
use civet_css::tokenizer::Token;
use civet_css::types::CharsetSource;
use civet_css::{Dictionary, Error, Result};
use std::rc::Rc;

/// Records every event with the text of its token vector.
#[derive(Default)]
struct Recorder {
    events: Vec<(EventType, Option<String>)>,
    /// Event types to answer with `Invalid`.
    reject: Vec<EventType>,
}

impl Recorder {
    fn text_of(tokens: &[Token]) -> String {
        let mut out = String::new();
        for t in tokens {
            if t.is_ws() {
                out.push(' ');
            } else {
                out.push_str(t.text());
            }
        }
        out.trim().to_string()
    }
}

impl EventHandler for Recorder {
    fn handle(&mut self, event: EventType, tokens: Option<&[Token]>) -> Result<()> {
        self.events.push((event, tokens.map(Self::text_of)));
        if self.reject.contains(&event) {
            return Err(Error::Invalid);
        }
        Ok(())
    }
}

fn parse(input: &str) -> Recorder {
    parse_with(input, Recorder::default())
}

fn parse_with(input: &str, mut recorder: Recorder) -> Recorder {
    let dict = Rc::new(Dictionary::new());
    let mut parser = Parser::new(dict, None, CharsetSource::Default);
    match parser.parse_chunk(input.as_bytes(), &mut recorder) {
        Ok(()) | Err(Error::NeedData) => {}
        Err(e) => panic!("parse_chunk failed: {e}"),
    }
    parser.completed(&mut recorder).expect("completed");
    recorder
}

fn event_types(recorder: &Recorder) -> Vec<EventType> {
    recorder.events.iter().map(|(e, _)| *e).collect()
}

#[test]
fn empty_input_produces_only_stylesheet_events() {
    let r = parse("");
    assert_eq!(
        event_types(&r),
        vec![EventType::StartStylesheet, EventType::EndStylesheet]
    );
}

#[test]
fn whitespace_and_cdo_cdc_produce_no_rules() {
    let r = parse("  <!-- \n --> \t ");
    assert_eq!(
        event_types(&r),
        vec![EventType::StartStylesheet, EventType::EndStylesheet]
    );
}

#[test]
fn simple_ruleset_event_sequence() {
    let r = parse("p { color: red }");
    assert_eq!(
        event_types(&r),
        vec![
            EventType::StartStylesheet,
            EventType::StartRuleset,
            EventType::Declaration,
            EventType::EndRuleset,
            EventType::EndStylesheet,
        ]
    );

    // The ruleset event carries the selector prelude; the declaration
    // carries property, colon, and value.
    assert_eq!(r.events[1].1.as_deref(), Some("p"));
    assert_eq!(r.events[2].1.as_deref(), Some("color: red"));
}

#[test]
fn multiple_declarations_fire_in_document_order() {
    let r = parse("p { color: red; font-size: 12px }");
    let decls: Vec<_> = r
        .events
        .iter()
        .filter(|(e, _)| *e == EventType::Declaration)
        .map(|(_, t)| t.clone().unwrap())
        .collect();
    assert_eq!(decls, vec!["color: red", "font-size: 12px"]);
}

#[test]
fn at_rule_without_block_fires_start_end() {
    let r = parse("@import url(a.css);");
    assert_eq!(
        event_types(&r),
        vec![
            EventType::StartStylesheet,
            EventType::StartAtRule,
            EventType::EndAtRule,
            EventType::EndStylesheet,
        ]
    );
    assert_eq!(r.events[1].1.as_deref(), Some("import a.css"));
}

#[test]
fn at_rule_with_block_wraps_block_events() {
    let r = parse("@media screen { p { color: red } }");
    let types = event_types(&r);
    assert_eq!(
        types,
        vec![
            EventType::StartStylesheet,
            EventType::StartAtRule,
            EventType::StartBlock,
            EventType::BlockContent,
            EventType::StartBlock,
            EventType::BlockContent,
            EventType::EndBlock,
            EventType::BlockContent,
            EventType::EndBlock,
            EventType::EndAtRule,
            EventType::EndStylesheet,
        ]
    );
    // Outer block content is the child selector prelude; inner is its
    // declarations.
    assert_eq!(r.events[3].1.as_deref(), Some("p"));
    assert_eq!(r.events[5].1.as_deref(), Some("color: red"));
}

#[test]
fn malformed_declaration_recovers_to_next_semicolon() {
    let r = parse("p { color: red; foo bar baz; font-size: 12px }");
    let decls: Vec<_> = r
        .events
        .iter()
        .filter(|(e, _)| *e == EventType::Declaration)
        .map(|(_, t)| t.clone().unwrap())
        .collect();
    // The malformed middle declaration never becomes an event.
    assert_eq!(decls, vec!["color: red", "font-size: 12px"]);
    assert!(event_types(&r).contains(&EventType::EndRuleset));
}

#[test]
fn rejected_selector_discards_the_whole_block() {
    let recorder = Recorder {
        reject: vec![EventType::StartRuleset],
        ..Recorder::default()
    };
    let r = parse_with("p { color: red } ", recorder);
    // The ruleset is discarded wholesale: no declaration, no end event.
    let types = event_types(&r);
    assert!(!types.contains(&EventType::Declaration));
    assert!(!types.contains(&EventType::EndRuleset));
    assert!(types.contains(&EventType::EndStylesheet));
}

#[test]
fn rejected_at_rule_is_discarded_to_semicolon() {
    let recorder = Recorder {
        reject: vec![EventType::StartAtRule],
        ..Recorder::default()
    };
    let r = parse_with("@unknown foo; p { color: red }", recorder);
    let types = event_types(&r);
    assert!(!types.contains(&EventType::EndAtRule));
    // The following ruleset still parses.
    assert!(types.contains(&EventType::Declaration));
}

#[test]
fn unterminated_block_closes_at_eof() {
    let r = parse("p { color: red");
    let types = event_types(&r);
    assert!(types.contains(&EventType::Declaration));
    assert!(types.contains(&EventType::EndRuleset));
    assert_eq!(types.last(), Some(&EventType::EndStylesheet));
}

#[test]
fn unknown_at_rule_with_block_consumed_by_recovery() {
    let recorder = Recorder {
        reject: vec![EventType::StartAtRule],
        ..Recorder::default()
    };
    let r = parse_with("@foo { junk { nested } } p { color: red }", recorder);
    let decls: Vec<_> = r
        .events
        .iter()
        .filter(|(e, _)| *e == EventType::Declaration)
        .map(|(_, t)| t.clone().unwrap())
        .collect();
    assert_eq!(decls, vec!["color: red"]);
}

#[test]
fn chunk_boundaries_do_not_change_events() {
    let input = "h1, h2 { color: #abc; margin: 0 auto } @media print { p { width: 50% } }";

    let whole = parse(input);

    // Feed the same input one byte at a time.
    let dict = Rc::new(Dictionary::new());
    let mut parser = Parser::new(dict, None, CharsetSource::Default);
    let mut split = Recorder::default();
    for byte in input.as_bytes() {
        match parser.parse_chunk(&[*byte], &mut split) {
            Ok(()) | Err(Error::NeedData) => {}
            Err(e) => panic!("chunked parse failed: {e}"),
        }
    }
    parser.completed(&mut split).expect("completed");

    assert_eq!(whole.events.len(), split.events.len());
    for (a, b) in whole.events.iter().zip(split.events.iter()) {
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }
}

#[test]
fn append_after_completion_is_a_bad_parameter() {
    let dict = Rc::new(Dictionary::new());
    let mut parser = Parser::new(dict, None, CharsetSource::Default);
    let mut recorder = Recorder::default();
    parser.completed(&mut recorder).unwrap();
    assert_eq!(
        parser.parse_chunk(b"p{}", &mut recorder),
        Err(Error::BadParm)
    );
}
