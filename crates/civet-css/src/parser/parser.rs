//! The grammar automaton.
//!
//! A deterministic, iterative recogniser for the CSS 2.1 generic
//! grammar. The parser never recurses: it pushes `(state, substate)`
//! records onto its own stack, so arbitrarily nested blocks and
//! any-productions run in bounded native stack. Transitions consume
//! tokens through a single-token push-back buffer, and runs of
//! whitespace are reduced to at most one token before the grammar sees
//! them.
//!
//! Error recovery never aborts the parse. A malformed declaration is
//! consumed up to the next `;` or `}` at the current bracket depth; a
//! malformed selector discards the whole next block; a malformed at-rule
//! is consumed to the next `;` or the end of the next balanced block.
//! A stack of open-bracket characters keeps `{}`, `[]`, and `()`
//! balanced while discarding.

use std::rc::Rc;

use civet_intern::Dictionary;

use super::{EventHandler, EventType};
use crate::error::{Error, Result};
use crate::stream::InputStream;
use crate::tokenizer::{Token, TokenType, Tokenizer};
use crate::types::CharsetSource;

/// Major states of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Stylesheet,
    Statement,
    Ruleset,
    RulesetEnd,
    AtRule,
    AtRuleEnd,
    Block,
    BlockContent,
    Selector,
    Declaration,
    DeclList,
    DeclListEnd,
    Property,
    Value0,
    Value1,
    Value,
    Any0,
    Any1,
    Any,
    MalformedDecl,
    MalformedSelector,
    MalformedAtRule,
}

/// One stack record: a major state plus its sub-state counter.
#[derive(Debug, Clone, Copy)]
struct Entry {
    state: State,
    substate: u8,
}

/// The CSS 2.1 grammar parser.
///
/// Chunk-driven: [`Parser::parse_chunk`] appends input and runs the
/// automaton until it blocks on more data; [`Parser::completed`] sends
/// end-of-input and drains. Single-threaded; one parser per stylesheet.
pub struct Parser {
    stream: InputStream,
    lexer: Tokenizer,
    dict: Rc<Dictionary>,

    states: Vec<Entry>,
    tokens: Vec<Token>,
    pushback: Option<Token>,
    parse_error: bool,
    open_items: Vec<u8>,
    last_was_ws: bool,

    quirks: bool,
    charset: Option<String>,
    charset_source: CharsetSource,
}

impl Parser {
    /// Create a parser interning into `dict`, with the charset the input
    /// was transcoded from (if known).
    #[must_use]
    pub fn new(dict: Rc<Dictionary>, charset: Option<&str>, cs_source: CharsetSource) -> Parser {
        Parser {
            stream: InputStream::new(),
            lexer: Tokenizer::new(),
            dict,
            states: vec![Entry {
                state: State::Start,
                substate: 0,
            }],
            tokens: Vec::new(),
            pushback: None,
            parse_error: false,
            open_items: Vec::new(),
            last_was_ws: false,
            quirks: false,
            charset: charset.map(str::to_owned),
            charset_source: if charset.is_some() {
                cs_source
            } else {
                CharsetSource::Default
            },
        }
    }

    /// Enable parsing quirks.
    pub fn set_quirks(&mut self, quirks: bool) {
        self.quirks = quirks;
    }

    /// Whether parsing quirks are enabled.
    #[must_use]
    pub fn quirks(&self) -> bool {
        self.quirks
    }

    /// Emit `COMMENT` tokens to the token vectors.
    pub fn set_emit_comments(&mut self, emit: bool) {
        self.lexer.set_emit_comments(emit);
    }

    /// The charset the parser was created with, and where it came from.
    #[must_use]
    pub fn read_charset(&self) -> (Option<&str>, CharsetSource) {
        (self.charset.as_deref(), self.charset_source)
    }

    /// The dictionary this parser interns into.
    #[must_use]
    pub fn dictionary(&self) -> &Rc<Dictionary> {
        &self.dict
    }

    /// Append a chunk of data and run the automaton until it blocks.
    ///
    /// # Errors
    ///
    /// `NeedData` when more input is required (the usual outcome);
    /// anything else aborts the parse.
    pub fn parse_chunk(&mut self, data: &[u8], handler: &mut dyn EventHandler) -> Result<()> {
        if self.stream.is_eof_marked() {
            return Err(Error::BadParm);
        }
        self.stream.append(data);
        self.run(handler)
    }

    /// Signal end-of-input and drain the automaton.
    ///
    /// # Errors
    ///
    /// Propagates handler errors; `Ok` once the stylesheet production
    /// completes.
    pub fn completed(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        self.stream.mark_eof();
        self.run(handler)
    }

    fn run(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        while let Some(entry) = self.states.last().copied() {
            match entry.state {
                State::Start => self.parse_start(handler)?,
                State::Stylesheet => self.parse_stylesheet(handler)?,
                State::Statement => self.parse_statement()?,
                State::Ruleset => self.parse_ruleset(handler)?,
                State::RulesetEnd => self.parse_ruleset_end(handler)?,
                State::AtRule => self.parse_at_rule()?,
                State::AtRuleEnd => self.parse_at_rule_end(handler)?,
                State::Block => self.parse_block(handler)?,
                State::BlockContent => self.parse_block_content(handler)?,
                State::Selector => self.parse_selector()?,
                State::Declaration => self.parse_declaration(handler)?,
                State::DeclList => self.parse_decl_list()?,
                State::DeclListEnd => self.parse_decl_list_end()?,
                State::Property => self.parse_property()?,
                State::Value0 => self.parse_value0()?,
                State::Value1 => self.parse_value1()?,
                State::Value => self.parse_value()?,
                State::Any0 => self.parse_any0()?,
                State::Any1 => self.parse_any1()?,
                State::Any => self.parse_any()?,
                State::MalformedDecl => self.parse_malformed_declaration()?,
                State::MalformedSelector => self.parse_malformed_selector()?,
                State::MalformedAtRule => self.parse_malformed_at_rule()?,
            }
        }
        Ok(())
    }

    /* ---------------------------------------------------------------- *
     * Token plumbing                                                   *
     * ---------------------------------------------------------------- */

    /// Fetch the next token: push-back buffer first, then the lexer.
    /// Runs of whitespace collapse to the single token already seen.
    /// Every returned token is appended to the current token vector.
    fn get_token(&mut self) -> Result<Token> {
        let token = if let Some(t) = self.pushback.take() {
            t
        } else {
            let mut t = self.lexer.next_token(&mut self.stream, &self.dict)?;
            while self.last_was_ws && t.is_ws() {
                t = self.lexer.next_token(&mut self.stream, &self.dict)?;
            }
            t
        };
        self.last_was_ws = token.is_ws();
        self.tokens.push(token.clone());
        Ok(token)
    }

    /// Push a token back on the input. The buffer is one token deep.
    fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none());
        let _ = self.tokens.pop();
        self.pushback = Some(token);
    }

    /// Consume a single whitespace token, if one is next.
    fn eat_ws(&mut self) -> Result<()> {
        let t = self.get_token()?;
        if !t.is_ws() {
            self.push_back(t);
        }
        Ok(())
    }

    /* ---------------------------------------------------------------- *
     * State stack plumbing                                             *
     * ---------------------------------------------------------------- */

    fn substate(&self) -> u8 {
        self.states.last().map_or(0, |e| e.substate)
    }

    fn set_substate(&mut self, substate: u8) {
        if let Some(e) = self.states.last_mut() {
            e.substate = substate;
        }
    }

    /// Enter `to`, arranging to return to the current state at
    /// `ret_substate`.
    fn transition(&mut self, to: State, ret_state: State, ret_substate: u8) {
        if let Some(e) = self.states.last_mut() {
            *e = Entry {
                state: ret_state,
                substate: ret_substate,
            };
        }
        self.states.push(Entry {
            state: to,
            substate: 0,
        });
        self.parse_error = false;
    }

    /// Replace the current state with `to`; completion returns to the
    /// previous state on the stack.
    fn transition_no_ret(&mut self, to: State) {
        if let Some(e) = self.states.last_mut() {
            *e = Entry {
                state: to,
                substate: 0,
            };
        }
        self.parse_error = false;
    }

    /// Pop the current state.
    fn done(&mut self) {
        let _ = self.states.pop();
    }

    /// Fire an event at the handler. `Invalid` is reported back as
    /// `true` (a parse error the caller may recover from); other errors
    /// abort.
    fn emit(
        &mut self,
        handler: &mut dyn EventHandler,
        event: EventType,
        with_tokens: bool,
    ) -> Result<bool> {
        let tokens = if with_tokens {
            Some(self.tokens.as_slice())
        } else {
            None
        };
        match handler.handle(event, tokens) {
            Ok(()) => Ok(false),
            Err(Error::Invalid) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /* ---------------------------------------------------------------- *
     * Parser stages                                                    *
     * ---------------------------------------------------------------- */

    /// `start -> ws stylesheet EOF`
    fn parse_start(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_WS: u8 = 1;
        const AFTER_STYLESHEET: u8 = 2;

        if self.substate() == INITIAL {
            let _ = self.emit(handler, EventType::StartStylesheet, false)?;
            self.set_substate(AFTER_WS);
        }
        if self.substate() == AFTER_WS {
            self.eat_ws()?;
            self.transition(State::Stylesheet, State::Start, AFTER_STYLESHEET);
            return Ok(());
        }

        // AFTER_STYLESHEET
        let t = self.get_token()?;
        debug_assert!(t.ttype == TokenType::Eof);
        let _ = self.emit(handler, EventType::EndStylesheet, false)?;
        self.tokens.clear();
        self.done();
        Ok(())
    }

    /// `stylesheet -> (CDO ws | CDC ws | statement ws)* `
    fn parse_stylesheet(&mut self, _handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        loop {
            if self.substate() == INITIAL {
                let t = self.get_token()?;
                match t.ttype {
                    TokenType::Eof => {
                        self.push_back(t);
                        self.tokens.clear();
                        self.done();
                        return Ok(());
                    }
                    TokenType::Cdo | TokenType::Cdc => self.set_substate(WS),
                    _ => {
                        self.push_back(t);
                        self.transition(State::Statement, State::Stylesheet, WS);
                        return Ok(());
                    }
                }
            }
            // WS
            self.eat_ws()?;
            self.set_substate(INITIAL);
        }
    }

    /// `statement -> ruleset | at-rule`
    fn parse_statement(&mut self) -> Result<()> {
        let t = self.get_token()?;
        let to = if t.ttype == TokenType::AtKeyword {
            State::AtRule
        } else {
            State::Ruleset
        };
        self.push_back(t);
        self.transition_no_ret(to);
        Ok(())
    }

    /// `ruleset -> selector? '{' ws ruleset-end`
    fn parse_ruleset(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const BRACE: u8 = 1;
        const WS: u8 = 2;

        if self.substate() == INITIAL {
            self.tokens.clear();
            let t = self.get_token()?;
            // The grammar is ambiguous here: selectors may in principle
            // start with a brace. Assume they don't.
            if t.is_char('{') {
                if self.emit(handler, EventType::StartRuleset, false)? {
                    self.transition_no_ret(State::MalformedSelector);
                    return Ok(());
                }
                self.set_substate(WS);
            } else {
                self.push_back(t);
                self.transition(State::Selector, State::Ruleset, BRACE);
                return Ok(());
            }
        }
        if self.substate() == BRACE {
            if !self.parse_error && self.emit(handler, EventType::StartRuleset, true)? {
                self.parse_error = true;
            }
            if self.parse_error {
                self.transition_no_ret(State::MalformedSelector);
                return Ok(());
            }
            // FOLLOW(selector) contains only '{', pushed back by the
            // selector production.
            let t = self.get_token()?;
            debug_assert!(t.is_char('{'));
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.transition_no_ret(State::RulesetEnd);
        Ok(())
    }

    /// `ruleset-end -> declaration? decl-list '}' ws`
    fn parse_ruleset_end(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const DECL_LIST: u8 = 1;
        const BRACE: u8 = 2;
        const WS: u8 = 3;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            self.push_back(t.clone());
            if t.ttype == TokenType::Ident {
                self.transition(State::Declaration, State::RulesetEnd, DECL_LIST);
                return Ok(());
            }
            self.set_substate(DECL_LIST);
        }
        if self.substate() == DECL_LIST {
            self.transition(State::DeclList, State::RulesetEnd, BRACE);
            return Ok(());
        }
        if self.substate() == BRACE {
            let t = self.get_token()?;
            if t.ttype == TokenType::Eof {
                // Open constructs close at end of input.
                self.push_back(t);
            } else {
                debug_assert!(t.is_char('}'));
            }
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        let _ = self.emit(handler, EventType::EndRuleset, false)?;
        self.done();
        Ok(())
    }

    /// `at-rule -> ATKEYWORD ws any0 at-rule-end`
    fn parse_at_rule(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;
        const ANY: u8 = 2;
        const AFTER_ANY: u8 = 3;

        if self.substate() == INITIAL {
            self.tokens.clear();
            let t = self.get_token()?;
            debug_assert!(t.ttype == TokenType::AtKeyword);
            self.set_substate(WS);
        }
        if self.substate() == WS {
            self.eat_ws()?;
            self.set_substate(ANY);
        }
        if self.substate() == ANY {
            self.transition(State::Any0, State::AtRule, AFTER_ANY);
            return Ok(());
        }

        // AFTER_ANY
        if self.parse_error {
            self.transition_no_ret(State::MalformedAtRule);
            return Ok(());
        }
        let t = self.get_token()?;
        // Grammar ambiguity: any0 stops on '{', ';', ')', ']'; an
        // at-rule prelude continues through the latter two.
        if t.is_char(')') || t.is_char(']') {
            self.transition(State::Any0, State::AtRule, AFTER_ANY);
            return Ok(());
        }
        self.push_back(t);
        self.transition_no_ret(State::AtRuleEnd);
        Ok(())
    }

    /// `at-rule-end -> block | ';' ws`
    fn parse_at_rule_end(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;
        const AFTER_BLOCK: u8 = 2;

        if self.substate() == INITIAL {
            if self.emit(handler, EventType::StartAtRule, true)? {
                self.transition_no_ret(State::MalformedAtRule);
                return Ok(());
            }
            let t = self.get_token()?;
            if t.is_char('{') {
                self.push_back(t);
                self.transition(State::Block, State::AtRuleEnd, AFTER_BLOCK);
                return Ok(());
            }
            if t.ttype == TokenType::Eof {
                // An at-rule complete up to its terminator is accepted
                // at end of input.
                self.push_back(t);
            } else {
                debug_assert!(t.is_char(';'));
            }
            self.set_substate(WS);
        }
        if self.substate() == WS {
            self.eat_ws()?;
        }

        // WS or AFTER_BLOCK
        let _ = self.emit(handler, EventType::EndAtRule, false)?;
        self.done();
        Ok(())
    }

    /// `block -> '{' ws block-content '}' ws`
    fn parse_block(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;
        const CONTENT: u8 = 2;
        const BRACE: u8 = 3;
        const WS2: u8 = 4;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            let _ = self.emit(handler, EventType::StartBlock, false)?;
            self.tokens.clear();
            debug_assert!(t.is_char('{'));
            self.set_substate(WS);
        }
        if self.substate() == WS {
            self.eat_ws()?;
            self.set_substate(CONTENT);
        }
        if self.substate() == CONTENT {
            self.transition(State::BlockContent, State::Block, BRACE);
            return Ok(());
        }
        if self.substate() == BRACE {
            let t = self.get_token()?;
            if t.ttype == TokenType::Eof {
                self.push_back(t);
            } else {
                debug_assert!(t.is_char('}'));
            }
            self.set_substate(WS2);
        }

        // WS2
        self.eat_ws()?;
        let _ = self.emit(handler, EventType::EndBlock, false)?;
        self.tokens.clear();
        self.done();
        Ok(())
    }

    /// `block-content -> (any | block | ATKEYWORD ws | ';' ws)*`
    fn parse_block_content(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        loop {
            if self.substate() == INITIAL {
                let t = self.get_token()?;
                match t.ttype {
                    TokenType::AtKeyword => self.set_substate(WS),
                    TokenType::Char if t.is_char('{') => {
                        // Grammar ambiguity: assume block.
                        self.push_back(t);
                        let _ = self.emit(handler, EventType::BlockContent, true)?;
                        self.transition(State::Block, State::BlockContent, INITIAL);
                        return Ok(());
                    }
                    TokenType::Char if t.is_char(';') => self.set_substate(WS),
                    TokenType::Char if t.is_char('}') => {
                        // Grammar ambiguity: assume end of block.
                        self.push_back(t);
                        let _ = self.emit(handler, EventType::BlockContent, true)?;
                        self.done();
                        return Ok(());
                    }
                    TokenType::Eof => {
                        self.push_back(t);
                        let _ = self.emit(handler, EventType::BlockContent, true)?;
                        self.done();
                        return Ok(());
                    }
                    _ => {
                        self.push_back(t);
                        self.transition(State::Any, State::BlockContent, INITIAL);
                        return Ok(());
                    }
                }
            }
            // WS
            self.eat_ws()?;
            self.set_substate(INITIAL);
        }
    }

    /// `selector -> any1`
    fn parse_selector(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_ANY1: u8 = 1;

        if self.substate() == INITIAL {
            self.tokens.clear();
            self.transition(State::Any1, State::Selector, AFTER_ANY1);
            return Ok(());
        }
        self.done();
        Ok(())
    }

    /// `declaration -> property ':' ws value1`
    fn parse_declaration(&mut self, handler: &mut dyn EventHandler) -> Result<()> {
        const INITIAL: u8 = 0;
        const COLON: u8 = 1;
        const WS: u8 = 2;
        const AFTER_VALUE1: u8 = 3;

        if self.substate() == INITIAL {
            self.tokens.clear();
            self.transition(State::Property, State::Declaration, COLON);
            return Ok(());
        }
        if self.substate() == COLON {
            let t = self.get_token()?;
            if !t.is_char(':') {
                // Parse error: expected ':'.
                self.push_back(t);
                self.transition_no_ret(State::MalformedDecl);
                return Ok(());
            }
            self.set_substate(WS);
        }
        if self.substate() == WS {
            self.eat_ws()?;
            self.transition(State::Value1, State::Declaration, AFTER_VALUE1);
            return Ok(());
        }

        // AFTER_VALUE1
        if self.parse_error {
            self.parse_error = false;
            self.transition_no_ret(State::MalformedDecl);
            return Ok(());
        }
        let _ = self.emit(handler, EventType::Declaration, true)?;
        self.done();
        Ok(())
    }

    /// `decl-list -> ';' ws decl-list-end | ε`
    fn parse_decl_list(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            if t.ttype == TokenType::Eof || t.is_char('}') {
                self.push_back(t);
                self.done();
                return Ok(());
            }
            debug_assert!(t.is_char(';'));
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.transition_no_ret(State::DeclListEnd);
        Ok(())
    }

    /// `decl-list-end -> declaration? decl-list`
    fn parse_decl_list_end(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_DECLARATION: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            let terminates =
                t.ttype == TokenType::Eof || t.is_char(';') || t.is_char('}');
            self.push_back(t);
            if !terminates {
                self.transition(State::Declaration, State::DeclListEnd, AFTER_DECLARATION);
                return Ok(());
            }
        }

        // AFTER_DECLARATION
        self.transition_no_ret(State::DeclList);
        Ok(())
    }

    /// `property -> IDENT ws`
    fn parse_property(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            if t.ttype != TokenType::Ident {
                self.parse_error = true;
                self.done();
                return Ok(());
            }
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.done();
        Ok(())
    }

    /// `value1 -> value value0`
    fn parse_value1(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_VALUE: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            self.push_back(t.clone());
            // Grammar ambiguity: ';', '}', and end of input mark the end
            // of the (absent) value.
            if t.ttype == TokenType::Eof || t.is_char(';') || t.is_char('}') {
                self.parse_error = true;
                self.done();
                return Ok(());
            }
            self.transition(State::Value, State::Value1, AFTER_VALUE);
            return Ok(());
        }

        // AFTER_VALUE
        self.transition_no_ret(State::Value0);
        Ok(())
    }

    /// `value0 -> value value0 | ε`
    fn parse_value0(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_VALUE: u8 = 1;

        loop {
            if self.substate() == INITIAL {
                let t = self.get_token()?;
                self.push_back(t.clone());
                if t.ttype == TokenType::Eof || t.is_char(';') || t.is_char('}') {
                    self.done();
                    return Ok(());
                }
                self.transition(State::Value, State::Value0, AFTER_VALUE);
                return Ok(());
            }
            // AFTER_VALUE
            self.set_substate(INITIAL);
        }
    }

    /// `value -> any | block | ATKEYWORD ws`
    fn parse_value(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            if t.ttype == TokenType::AtKeyword {
                self.set_substate(WS);
            } else if t.is_char('{') {
                // Grammar ambiguity: assume block.
                self.push_back(t);
                self.transition_no_ret(State::Block);
                return Ok(());
            } else {
                self.push_back(t);
                self.transition_no_ret(State::Any);
                return Ok(());
            }
        }

        // WS
        self.eat_ws()?;
        self.done();
        Ok(())
    }

    /// `any0 -> any any0 | ε`
    fn parse_any0(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_ANY: u8 = 1;

        loop {
            if self.substate() == INITIAL {
                let t = self.get_token()?;
                self.push_back(t.clone());
                // Grammar ambiguity: '{', ';', ')', ']' mark the end.
                if t.ttype == TokenType::Eof
                    || t.is_char('{')
                    || t.is_char(';')
                    || t.is_char(')')
                    || t.is_char(']')
                {
                    self.done();
                    return Ok(());
                }
                self.transition(State::Any, State::Any0, AFTER_ANY);
                return Ok(());
            }
            // AFTER_ANY
            if self.parse_error {
                self.done();
                return Ok(());
            }
            self.set_substate(INITIAL);
        }
    }

    /// `any1 -> any any0`
    fn parse_any1(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const AFTER_ANY: u8 = 1;
        const AFTER_ANY0: u8 = 2;

        if self.substate() == INITIAL {
            self.transition(State::Any, State::Any1, AFTER_ANY);
            return Ok(());
        }
        if self.substate() == AFTER_ANY {
            if self.parse_error {
                self.done();
                return Ok(());
            }
            self.transition(State::Any0, State::Any1, AFTER_ANY0);
            return Ok(());
        }

        // AFTER_ANY0
        if self.parse_error {
            self.done();
            return Ok(());
        }
        let t = self.get_token()?;
        self.push_back(t.clone());
        if t.ttype == TokenType::Char {
            // any0 stops on '{', ';', ')', ']'; a selector may only be
            // followed by '{'.
            if t.is_char(';') || t.is_char(')') || t.is_char(']') {
                self.transition(State::Any, State::Any1, AFTER_ANY);
                return Ok(());
            }
            if !t.is_char('{') {
                self.parse_error = true;
            }
        } else {
            self.parse_error = true;
        }
        self.done();
        Ok(())
    }

    /// `any -> IDENT ws | NUMBER ws | ... | FUNCTION ws | CHAR ws`
    fn parse_any(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const WS: u8 = 1;

        if self.substate() == INITIAL {
            let t = self.get_token()?;
            let acceptable = matches!(
                t.ttype,
                TokenType::Ident
                    | TokenType::Number
                    | TokenType::Percentage
                    | TokenType::Dimension
                    | TokenType::String
                    | TokenType::Char
                    | TokenType::Uri
                    | TokenType::UnicodeRange
                    | TokenType::Includes
                    | TokenType::Dashmatch
                    | TokenType::Prefixmatch
                    | TokenType::Suffixmatch
                    | TokenType::Substringmatch
                    | TokenType::Function
            );
            if !acceptable {
                self.parse_error = true;
                self.done();
                return Ok(());
            }
            // Function and bracket contents flatten into the token
            // vector; their close brackets terminate the enclosing
            // any0 and are re-entered by its caller.
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.done();
        Ok(())
    }

    /* ---------------------------------------------------------------- *
     * Error recovery                                                   *
     * ---------------------------------------------------------------- */

    /// Map a close bracket to its opener; 0 for anything else.
    fn opener_for(c: u8) -> u8 {
        match c {
            b'}' => b'{',
            b']' => b'[',
            b')' => b'(',
            _ => 0,
        }
    }

    /// The single-byte char value of a token, if it is one of the
    /// bracket/semicolon characters recovery cares about.
    fn recovery_char(t: &Token) -> Option<u8> {
        if t.ttype != TokenType::Char {
            return None;
        }
        match t.text().as_bytes() {
            [b @ (b'{' | b'}' | b'[' | b']' | b'(' | b')' | b';')] => Some(*b),
            _ => None,
        }
    }

    /// Consume up to the next `;` or `}` at the current bracket depth;
    /// the terminator is pushed back.
    fn parse_malformed_declaration(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const GO: u8 = 1;

        if self.substate() == INITIAL {
            self.open_items.clear();
            self.set_substate(GO);
        }

        let terminator = loop {
            let t = self.get_token()?;
            if t.ttype == TokenType::Eof {
                break t;
            }
            let Some(c) = Self::recovery_char(&t) else {
                continue;
            };

            let top = self.open_items.last().copied();

            // With no brackets open, ';' or '}' ends the declaration.
            if top.is_none() && (c == b';' || c == b'}') {
                break t;
            }
            if c == b';' {
                continue;
            }

            let want = Self::opener_for(c);
            if want != 0 {
                if top == Some(want) {
                    let _ = self.open_items.pop();
                }
            } else {
                self.open_items.push(c);
            }
        };

        self.push_back(terminator);
        self.tokens.clear();
        self.done();
        Ok(())
    }

    /// Discard the entirety of the next balanced block, then trailing
    /// whitespace.
    fn parse_malformed_selector(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const GO: u8 = 1;
        const WS: u8 = 2;

        if self.substate() == INITIAL {
            self.open_items.clear();
            self.set_substate(GO);
        }
        if self.substate() == GO {
            loop {
                let t = self.get_token()?;
                if t.ttype == TokenType::Eof {
                    self.push_back(t);
                    break;
                }
                let Some(c) = Self::recovery_char(&t) else {
                    continue;
                };
                if c == b';' {
                    continue;
                }

                let top = self.open_items.last().copied();
                let want = Self::opener_for(c);
                if want != 0 {
                    if top == Some(want) {
                        let _ = self.open_items.pop();
                    }
                } else {
                    self.open_items.push(c);
                }

                // Popping the final '{' means the block is over.
                if want == b'{' && top.is_some() && self.open_items.is_empty() {
                    break;
                }
            }
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.tokens.clear();
        self.done();
        Ok(())
    }

    /// Consume to the next `;` at depth zero or to the end of the next
    /// balanced block, whichever comes first.
    fn parse_malformed_at_rule(&mut self) -> Result<()> {
        const INITIAL: u8 = 0;
        const GO: u8 = 1;
        const WS: u8 = 2;

        if self.substate() == INITIAL {
            self.open_items.clear();
            self.set_substate(GO);
        }
        if self.substate() == GO {
            loop {
                let t = self.get_token()?;
                if t.ttype == TokenType::Eof {
                    self.push_back(t);
                    break;
                }
                let Some(c) = Self::recovery_char(&t) else {
                    continue;
                };

                let top = self.open_items.last().copied();

                if c == b';' {
                    if top.is_none() {
                        break;
                    }
                    continue;
                }

                let want = Self::opener_for(c);
                if want != 0 {
                    if top == Some(want) {
                        let _ = self.open_items.pop();
                    }
                } else {
                    self.open_items.push(c);
                }

                if want == b'{' && top.is_some() && self.open_items.is_empty() {
                    break;
                }
            }
            self.set_substate(WS);
        }

        // WS
        self.eat_ws()?;
        self.tokens.clear();
        self.done();
        Ok(())
    }
}
