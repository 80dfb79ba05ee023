use sorthc::lang::tokenizing::{tokenize_from_source, Token};

#[test]
fn a_full_definition_tokenizes_word_by_word() {
    let tokens = tokenize_from_source(": square dup * ;").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Word(":".into()),
            Token::Word("square".into()),
            Token::Word("dup".into()),
            Token::Word("*".into()),
            Token::Word(";".into()),
        ]
    );
}

#[test]
fn comments_and_strings_interleave_with_words() {
    let tokens = tokenize_from_source(": greet \"hi\" shows ; \\ trailing comment").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Word(":".into()),
            Token::Word("greet".into()),
            Token::StringLit("hi".into()),
            Token::Word("shows".into()),
            Token::Word(";".into()),
        ]
    );
}

#[test]
fn null_byte_in_source_is_rejected_before_any_token_is_read() {
    let error = tokenize_from_source("abc\0def").unwrap_err();
    assert!(error.message().contains("null byte"));
}

#[test]
fn base_prefixed_literals_mixed_with_words() {
    let tokens = tokenize_from_source("0xDEAD 0b11 0o7 -3 plain").unwrap();
    // 0xDEAD contains uppercase hex digits, which are not in the
    // original's lowercase-only digit alphabet, so it stays a word.
    assert_eq!(
        tokens,
        vec![
            Token::Word("0xDEAD".into()),
            Token::UInt(3),
            Token::UInt(7),
            Token::NegInt(3),
            Token::Word("plain".into()),
        ]
    );
}
