extern crate slate_lang;

use slate_lang::token::{Location, Token, Type};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash(token: &Token) -> u64 {
    let mut hasher = DefaultHasher::new();
    token.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn create_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        Location::new(1, 3),
    );

    assert_eq!(token.r#type, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.location.line, 1);
    assert_eq!(token.location.column, 3);
}

#[test]
fn create_token_from_str() {
    let token = Token::from("init");

    assert_eq!(token.r#type, Type::Identifier);
    assert_eq!(token.lexeme, "init");
    assert_eq!(token.literal, None);
    assert_eq!(token.location.line, 0);
    assert_eq!(token.location.column, 0);
}

#[test]
fn display_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        Location::new(1, 3),
    );

    assert_eq!(format!("{}", token), "LeftParen ( @ 1:3");
}

#[test]
fn same_hash_for_same_occurrence() {
    let token = Token::from("init");
    let token_copy = Token::from("init");

    assert_eq!(hash(&token), hash(&token_copy));
}

#[test]
fn different_hash_for_different_name() {
    let token = Token::from("init");
    let other = Token::from("init2");

    assert_ne!(hash(&token), hash(&other));
}

#[test]
fn different_hash_for_different_type() {
    let token = Token::new(Type::Semicolon, ";".to_string(), None, Location::new(1, 3));
    let other = Token::new(Type::LeftParen, "(".to_string(), None, Location::new(1, 3));

    assert_ne!(hash(&token), hash(&other));
}

#[test]
fn different_hash_for_different_line() {
    let token = Token::new(Type::Semicolon, ";".to_string(), None, Location::new(2, 4));
    let other = Token::new(Type::Semicolon, ";".to_string(), None, Location::new(1, 4));

    assert_ne!(hash(&token), hash(&other));
}

#[test]
fn different_hash_for_different_column() {
    let token = Token::new(Type::Semicolon, ";".to_string(), None, Location::new(1, 3));
    let other = Token::new(Type::Semicolon, ";".to_string(), None, Location::new(1, 4));

    assert_ne!(hash(&token), hash(&other));
}
