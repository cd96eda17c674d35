use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
            column: 0,
            column_offset: 0,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    /// Scanning is total: errors are reported and the scanner keeps going, and
    /// the returned vector always ends with an `EOF` token.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(
            Token::new(
                Type::EOF,
                String::from(""),
                None,
                Location::new(self.line, 0)
            )
        );

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.chars.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the file"),
        }
    }

    /// Returns the next character without consuming it, or `'\0'` at the end.
    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the next next character without consuming it, or `'\0'` at the end.
    fn peek_next(&mut self) -> char {
        self.chars.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Returns if the character after the current one is the expected character.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == expected
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(
            Token::new(
                r#type,
                lexeme,
                literal,
                Location::new(self.line, self.column)
            )
        );
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();

        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Marks the start of a new line for column bookkeeping.
    fn new_line(&mut self) {
        self.line += 1;
        self.column_offset = self.current;
    }

    /// Handles a string literal. Strings may span multiple lines.
    fn string(&mut self) {
        self.advance(); // Move past the starting double quote.
        let line = self.line;

        while !self.is_at_end() && self.peek() != '"' {
            if self.advance() == '\n' {
                self.new_line();
            }
        }

        if self.is_at_end() {
            ScanError {
                line,
                message: String::from("Unterminated string"),
            }.throw();
            return;
        }

        self.advance(); // Move past the closing double quote.

        // The literal does not include the double quotes unlike the lexeme.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        let lexeme = self.source.substring(self.start, self.current).to_string();
        self.add_token(Type::String, lexeme, Some(Literal::String(value)));
    }

    /// Handles a number literal. A trailing dot without a fractional digit is
    /// not part of the number and is scanned as its own token.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // Consume the dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = self.source.substring(self.start, self.current).to_string();
        let value: f64 = lexeme.parse().expect("scanned number to be parsable");

        self.add_token(Type::Number, lexeme, Some(Literal::Number(value)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        // is_alphanumeric does not include underscores.
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let value = self.source.substring(self.start, self.current).to_string();
        let token_type = match value.as_str() {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Consumes a block comment. Nesting is not supported.
    fn block_comment(&mut self) {
        self.advance(); // Consume the slash.
        self.advance(); // Consume the star.

        while !self.is_at_end() && !(self.peek() == '*' && self.peek_next() == '/') {
            if self.advance() == '\n' {
                self.new_line();
            }
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated comment"),
            }.throw();
            return;
        }

        self.advance(); // Consume the star.
        self.advance(); // Consume the slash.
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        self.column = self.start - self.column_offset;

        let c = self.peek();
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),
            '?' => self.add_single_char_token(Type::Question),
            ':' => self.add_single_char_token(Type::Colon),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.new_line();
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_alphabetic() => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'"),
                }.throw();
            },
        }
    }
}
