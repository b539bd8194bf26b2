//! CSS 2.1 tokenization.
//!
//! The tokenizer classifies the input stream into typed tokens with
//! interned text. It is resumable at token granularity: when the stream
//! runs out of bytes mid-token before end-of-input, the cursor rewinds to
//! the token start and the lexer reports
//! [`Error::NeedData`](crate::Error::NeedData); the same token is
//! re-scanned once more bytes arrive.

mod token;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use token::{Token, TokenType};
pub use tokenizer::Tokenizer;
