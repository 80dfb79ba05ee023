use crate::{lang::source_buffer::SourceBuffer, runtime::error::{CompileError, Result}};
use std::fmt::{self, Display, Formatter};

/// A single lexical unit of the language: a tagged record with a text
/// payload (WORD/STRING) or a numeric payload (UINT/NEGINT/CHAR). Modeled
/// as a genuine sum type rather than the C tag-plus-union `struct token`.
/// No source location is attached to a token, since lex/symbol/structural
/// errors report no position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A word: anything that isn't a string literal and didn't parse as a
    /// number.
    Word(String),

    /// A string literal, delimiters excluded.
    StringLit(String),

    /// A character literal. Not produced by the surface syntax directly,
    /// but part of the tag set so callers accepting `CHAR | UINT` have
    /// somewhere to land it.
    Char(u64),

    /// An unsigned integer literal.
    UInt(u64),

    /// A negative integer literal; the payload is the magnitude, not a
    /// two's-complement value.
    NegInt(u64),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Word(text) => write!(f, "{}", text),
            Token::StringLit(text) => write!(f, "\"{}\"", text),
            Token::Char(n) => write!(f, "{}c", n),
            Token::UInt(n) => write!(f, "{}", n),
            Token::NegInt(n) => write!(f, "-{}", n),
        }
    }
}

impl Token {
    /// The word text, if this token is a `Word`.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(text) => Some(text),
            _ => None,
        }
    }

    /// Does this token's text equal `word` exactly?  Used throughout the
    /// compiler to recognize literal keywords such as `;` or `)`.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Word(text) if text == word)
    }
}

/// A finite ordered sequence of tokens, produced once by [`tokenize`].
pub type TokenList = Vec<Token>;

fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t' || byte == b'\r' || byte == b'\n'
}

/// Printable ASCII (including plain space), excluding the double quote.
fn is_string_byte_allowed(byte: u8) -> bool {
    (byte.is_ascii_graphic() || byte == b' ') && byte != b'"'
}

/// Any byte that is not whitespace, `"`, or `#` may appear in a word.
fn is_word_byte(byte: u8) -> bool {
    !is_whitespace(byte) && byte != b'"' && byte != b'#'
}

fn skip_whitespace(buffer: &mut SourceBuffer) {
    while buffer.advance_if(is_whitespace).is_some() {}
}

fn skip_rest_of_line(buffer: &mut SourceBuffer) {
    while buffer.advance_if(|b| b != b'\n').is_some() {}
}

/// Consume a string literal.  The opening `"` has already been consumed by
/// the caller.  Reads printable non-`"` bytes until the closing `"`;
/// anything else (non-printable byte, premature end of input) is a fatal
/// lex error.
fn read_string(buffer: &mut SourceBuffer) -> Result<String> {
    buffer.mark();

    loop {
        if buffer.advance_if_eq(b'"') {
            break;
        }
        if buffer.advance_if(is_string_byte_allowed).is_none() {
            return Err(CompileError::lex("Syntax error inside string"));
        }
    }

    let slice = buffer.marked_slice();
    let text = &slice[..slice.len() - 1];
    Ok(String::from_utf8_lossy(text).into_owned())
}

/// Consume a maximal run of word bytes.  An empty run is a fatal lex error.
fn read_word(buffer: &mut SourceBuffer) -> Result<String> {
    buffer.mark();
    while buffer.advance_if(is_word_byte).is_some() {}

    if buffer.marked_slice().is_empty() {
        return Err(CompileError::lex("Syntax error at top level"));
    }

    Ok(String::from_utf8_lossy(buffer.marked_slice()).into_owned())
}

/// Try to parse `text` as a number, mirroring `forthc.c::parse_number`:
/// optional leading `-`, optional base prefix (`0b`, `0o`, `0x`; default base
/// 10), then a non-empty run of digits valid in the chosen base. No floats,
/// no underscore separators. On success returns the magnitude and whether
/// the literal was negative.
fn parse_number(text: &str) -> Option<(u64, bool)> {
    const DIGITS: &str = "0123456789abcdef";

    let is_negative = text.starts_with('-');
    let rest = if is_negative { &text[1..] } else { text };

    let (base, digits) = if let Some(stripped) = rest.strip_prefix("0b") {
        (2u64, stripped)
    } else if let Some(stripped) = rest.strip_prefix("0o") {
        (8u64, stripped)
    } else if let Some(stripped) = rest.strip_prefix("0x") {
        (16u64, stripped)
    } else {
        (10u64, rest)
    };

    if digits.is_empty() {
        return None;
    }

    let mut value: u64 = 0;
    for ch in digits.chars() {
        let digit = DIGITS.find(ch)? as u64;
        if digit >= base {
            return None;
        }
        value = value.checked_mul(base)?.checked_add(digit)?;
    }

    Some((value, is_negative))
}

/// Tokenize a source buffer into a finite token list.  Not restartable:
/// each call consumes the buffer's cursor from wherever it starts.
pub fn tokenize(buffer: &mut SourceBuffer) -> Result<TokenList> {
    let mut tokens = TokenList::new();

    loop {
        skip_whitespace(buffer);

        if buffer.at_end() {
            break;
        }

        if buffer.advance_if_eq(b'\\') {
            skip_rest_of_line(buffer);
            continue;
        }

        if buffer.advance_if_eq(b'"') {
            tokens.push(Token::StringLit(read_string(buffer)?));
            continue;
        }

        let text = read_word(buffer)?;

        let token = match parse_number(&text) {
            Some((magnitude, true)) => Token::NegInt(magnitude),
            Some((magnitude, false)) => Token::UInt(magnitude),
            None => Token::Word(text),
        };

        tokens.push(token);
    }

    Ok(tokens)
}

/// Load a source file and tokenize it in one step.
pub fn tokenize_from_path(path: &str) -> Result<TokenList> {
    let mut buffer = SourceBuffer::from_path(path)?;
    tokenize(&mut buffer)
}

/// Tokenize an in-memory source string.  Used by tests and by anything
/// that already has the source text in hand.
pub fn tokenize_from_source(source: &str) -> Result<TokenList> {
    let mut buffer = SourceBuffer::new(source.as_bytes().to_vec())?;
    tokenize(&mut buffer)
}
