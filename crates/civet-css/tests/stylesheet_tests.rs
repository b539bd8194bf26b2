//! Integration tests for stylesheet assembly: rules, ordering
//! constraints, imports, quirks, and bytecode well-formedness.

use std::cell::RefCell;
use std::rc::Rc;

use civet_css::bytecode::{COLOR_SET, Opcode, Opv, skip_value};
use civet_css::selector::SPECIFICITY_D;
use civet_css::stylesheet::Rule;
use civet_css::types::CharsetSource;
use civet_css::{Error, Language, Media, Params, Stylesheet};

fn parse_sheet(css: &str) -> Stylesheet {
    parse_sheet_with(css, Params::default())
}

fn parse_sheet_with(css: &str, params: Params) -> Stylesheet {
    let mut sheet = Stylesheet::new(params).expect("create sheet");
    match sheet.append_data(css.as_bytes()) {
        Ok(()) | Err(Error::NeedData) => {}
        Err(e) => panic!("append_data failed: {e}"),
    }
    sheet.data_done().expect("data_done");
    sheet
}

#[test]
fn wrong_language_level_is_a_bad_parameter() {
    for level in [Language::Css1, Language::Css2, Language::Css3] {
        let result = Stylesheet::new(Params {
            level,
            ..Params::default()
        });
        assert!(matches!(result, Err(Error::BadParm)));
    }
}

#[test]
fn empty_input_yields_zero_rules() {
    let sheet = parse_sheet("");
    assert_eq!(sheet.rule_count(), 0);
}

#[test]
fn comment_and_cdo_only_input_yields_zero_rules() {
    let sheet = parse_sheet("<!-- /* nothing here */ -->");
    assert_eq!(sheet.rule_count(), 0);
}

#[test]
fn simple_declaration_compiles_to_expected_bytecode() {
    let sheet = parse_sheet("p { color: red }");
    assert_eq!(sheet.rule_count(), 1);

    let Rule::Selector(rule) = &sheet.rules()[0] else {
        panic!("expected a selector rule");
    };
    assert_eq!(rule.selectors.len(), 1);

    let head = &rule.selectors[0];
    assert_eq!(head.element_name().as_str(), "p");
    assert_eq!(head.specificity, SPECIFICITY_D);
    assert_eq!(head.rule_index, rule.index);

    // One OPV with opcode COLOR and value COLOR_SET, followed by the
    // 32-bit colour 0xFF0000FF.
    let words = rule.style.words();
    assert_eq!(words.len(), 2);
    let opv = Opv::from_raw(words[0]);
    assert_eq!(opv.opcode(), Some(Opcode::Color));
    assert_eq!(opv.flags(), 0);
    assert_eq!(opv.value(), COLOR_SET);
    assert_eq!(words[1], 0xFF00_00FF);
}

#[test]
fn rule_indices_are_unique_and_ordered() {
    let sheet = parse_sheet("p { color: red } q { color: blue } r { color: lime }");
    let indices: Vec<u32> = sheet.rules().iter().map(Rule::index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn charset_rule_is_honoured_only_first() {
    let sheet = parse_sheet("@charset \"ISO-8859-1\"; p { color: red }");
    assert_eq!(sheet.rule_count(), 2);
    assert!(matches!(&sheet.rules()[0], Rule::Charset(c) if c.encoding == "ISO-8859-1"));
    let (charset, source) = sheet.charset();
    assert_eq!(charset, Some("ISO-8859-1"));
    assert_eq!(source, CharsetSource::Document);

    // After any other rule, @charset is a malformed at-rule.
    let sheet = parse_sheet("p { color: red } @charset \"ISO-8859-1\";");
    assert_eq!(sheet.rule_count(), 1);
    assert!(matches!(&sheet.rules()[0], Rule::Selector(_)));
}

#[test]
fn dictated_charset_cannot_be_overridden() {
    let mut sheet = Stylesheet::new(Params {
        charset: Some("UTF-8".into()),
        charset_source: CharsetSource::Dictated,
        ..Params::default()
    })
    .unwrap();

    let result = sheet.append_data(b"@charset \"ISO-8859-1\"; p { color: red }");
    assert_eq!(result, Err(Error::BadCharset));
}

#[test]
fn import_accepted_only_before_other_rules() {
    let sheet = parse_sheet("@import url(a.css); p { color: red }");
    assert_eq!(sheet.rule_count(), 2);
    assert!(matches!(&sheet.rules()[0], Rule::Import(_)));

    let sheet = parse_sheet("p { color: red } @import url(a.css);");
    assert_eq!(sheet.rule_count(), 1);
}

#[test]
fn import_media_list_defaults_to_all() {
    let sheet = parse_sheet("@import url(a.css); @import url(b.css) print, screen;");
    let Rule::Import(first) = &sheet.rules()[0] else {
        panic!("expected import");
    };
    let Rule::Import(second) = &sheet.rules()[1] else {
        panic!("expected import");
    };
    assert_eq!(first.media, Media::ALL);
    assert_eq!(second.media, Media::PRINT | Media::SCREEN);
}

#[test]
fn import_callback_fires_once_per_accepted_import() {
    let seen: Rc<RefCell<Vec<(String, Media)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let params = Params {
        import_callback: Some(Box::new(move |url, media| {
            sink.borrow_mut().push((url.to_string(), media));
        })),
        ..Params::default()
    };
    let _sheet = parse_sheet_with("@import url(a.css); @import \"b.css\" print;", params);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], ("a.css".to_string(), Media::ALL));
    assert_eq!(seen[1], ("b.css".to_string(), Media::PRINT));
}

#[test]
fn pending_imports_surface_until_registered() {
    let mut sheet = parse_sheet("@import url(a.css); p { color: red }");

    let (url, media) = sheet.next_pending_import().expect("pending import");
    assert_eq!(url.as_str(), "a.css");
    assert_eq!(media, Media::ALL);

    let child = Rc::new(parse_sheet("p { width: 10px }"));
    sheet.register_import(child).unwrap();
    assert!(sheet.next_pending_import().is_none());

    // Nothing left to register.
    let another = Rc::new(parse_sheet(""));
    assert_eq!(sheet.register_import(another), Err(Error::Invalid));
}

#[test]
fn media_rule_holds_child_rules() {
    let sheet = parse_sheet("@media print, braille { p { color: red } q { color: blue } }");
    assert_eq!(sheet.rule_count(), 1);

    let Rule::Media(media) = &sheet.rules()[0] else {
        panic!("expected media rule");
    };
    assert_eq!(media.media, Media::PRINT | Media::BRAILLE);
    assert_eq!(media.rules.len(), 2);
    assert_eq!(media.index, 0);
    // Children take subsequent document-order indices.
    assert_eq!(media.rules[0].index(), 1);
    assert_eq!(media.rules[1].index(), 2);
}

#[test]
fn media_rule_with_unknown_medium_is_discarded() {
    let sheet = parse_sheet("@media holodeck { p { color: red } } q { color: blue }");
    assert_eq!(sheet.rule_count(), 1);
    assert!(matches!(&sheet.rules()[0], Rule::Selector(_)));
}

#[test]
fn font_face_and_page_rules_compile_their_blocks() {
    let sheet = parse_sheet(
        "@font-face { font-family: \"My Font\" } @page :first { margin-top: 2cm }",
    );
    assert_eq!(sheet.rule_count(), 2);

    let Rule::FontFace(ff) = &sheet.rules()[0] else {
        panic!("expected font-face");
    };
    assert!(!ff.style.is_empty());

    let Rule::Page(page) = &sheet.rules()[1] else {
        panic!("expected page rule");
    };
    assert_eq!(page.selector.as_ref().map(|a| a.as_str()), Some("first"));
    assert!(!page.style.is_empty());
}

#[test]
fn unknown_properties_are_discarded_but_the_rule_survives() {
    let sheet = parse_sheet("p { frobnicate: yes; color: red }");
    let Rule::Selector(rule) = &sheet.rules()[0] else {
        panic!("expected selector rule");
    };
    // Only the colour declaration compiled.
    assert_eq!(rule.style.words().len(), 2);
}

#[test]
fn quirk_colours_require_quirks_permission() {
    let strict = parse_sheet("p { color: abcdef }");
    let Rule::Selector(rule) = &strict.rules()[0] else {
        panic!("expected selector rule");
    };
    assert!(rule.style.is_empty());
    assert!(!strict.quirks_used());

    let quirky = parse_sheet_with(
        "p { color: abcdef }",
        Params {
            allow_quirks: true,
            ..Params::default()
        },
    );
    let Rule::Selector(rule) = &quirky.rules()[0] else {
        panic!("expected selector rule");
    };
    assert_eq!(rule.style.words().len(), 2);
    assert!(quirky.quirks_used());
}

#[test]
fn unitless_nonzero_lengths_are_a_quirk() {
    let quirky = parse_sheet_with(
        "p { margin-left: 4 }",
        Params {
            allow_quirks: true,
            ..Params::default()
        },
    );
    assert!(quirky.quirks_used());

    // A bare zero is fine everywhere and engages no quirk.
    let strict = parse_sheet("p { margin-left: 0 }");
    let Rule::Selector(rule) = &strict.rules()[0] else {
        panic!("expected selector rule");
    };
    assert_eq!(rule.style.words().len(), 3);
    assert!(!strict.quirks_used());
}

#[test]
fn removing_a_rule_unregisters_it() {
    let mut sheet = parse_sheet("p { color: red } q { color: blue }");
    assert_eq!(sheet.rule_count(), 2);
    sheet.remove_rule(0).unwrap();
    assert_eq!(sheet.rule_count(), 1);
    assert_eq!(sheet.rules()[0].index(), 1);
    assert_eq!(sheet.remove_rule(0), Err(Error::Invalid));
}

#[test]
fn disabled_flag_round_trips() {
    let mut sheet = parse_sheet("p { color: red }");
    assert!(!sheet.disabled());
    sheet.set_disabled(true);
    assert!(sheet.disabled());
}

#[test]
fn every_compiled_style_is_exactly_walkable() {
    // A kitchen sink covering list encodings, operand layouts, and
    // shorthand expansion: the layout oracle must consume every style
    // exactly to its end.
    let css = r#"
        p {
            content: "a" counter(c, lower-roman) open-quote attr(title);
            counter-increment: c 2 d;
            counter-reset: c;
            quotes: "<" ">" "[" "]";
            cursor: url(a.png), url(b.png), pointer;
            font-family: "DejaVu Sans", serif;
            voice-family: "Paul", male;
            background-position: left center;
            background: #123 url(bg.png) no-repeat fixed;
            clip: rect(1px, auto, 2em, auto);
            border-spacing: 1px 2px;
            border: thin solid red;
            margin: 1px 2% auto;
            padding: 4px;
            font: italic bold 12px/1.5 serif;
            azimuth: far-left behind;
            elevation: 45deg;
            volume: 50%;
            play-during: url(x.wav) mix repeat;
            pause: 12ms 10%;
            cue: url(a.wav);
            text-decoration: underline overline;
            z-index: 3;
            line-height: 1.2;
            clear: both !important;
            outline: invert dotted medium;
            list-style: square inside url(dot.png);
        }
    "#;
    let sheet = parse_sheet(css);
    let Rule::Selector(rule) = &sheet.rules()[0] else {
        panic!("expected selector rule");
    };
    assert!(!rule.style.is_empty());

    let mut iter = rule.style.iter();
    let mut decoded = 0;
    while let Some(word) = iter.next_word() {
        let opv = Opv::from_raw(word);
        let op = opv.opcode().expect("every head word is a known opcode");
        skip_value(op, opv, &mut iter).expect("operands fit the style");
        decoded += 1;
    }
    assert!(iter.at_end());
    // Every declaration (with shorthand expansion) produced bytecode.
    assert!(decoded > 30, "expected many OPVs, saw {decoded}");
}
