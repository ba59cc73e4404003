use crate::token::{Token, TokenKind};
use phf::phf_map;
use std::iter::Peekable;
use std::vec::IntoIter;

/// Streaming tokenizer. Tokens are produced on demand by `next_token`;
/// once the source is drained every further call yields `EOF`.
pub struct Lexer {
    iter: Peekable<IntoIter<char>>,
    line: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            iter: source.chars().collect::<Vec<char>>().into_iter().peekable(),
            line: 1,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let c = match self.iter.next() {
            None | Some('\0') => return self.token(TokenKind::Eof, ""),
            Some(c) => c,
        };
        match c {
            '+' => self.token(TokenKind::Plus, "+"),
            '-' => self.token(TokenKind::Minus, "-"),
            '*' => self.token(TokenKind::Asterisk, "*"),
            '/' => self.token(TokenKind::Slash, "/"),
            '<' => self.token(TokenKind::Lt, "<"),
            '>' => self.token(TokenKind::Gt, ">"),
            ',' => self.token(TokenKind::Comma, ","),
            ';' => self.token(TokenKind::Semicolon, ";"),
            ':' => self.token(TokenKind::Colon, ":"),
            '(' => self.token(TokenKind::LeftParen, "("),
            ')' => self.token(TokenKind::RightParen, ")"),
            '{' => self.token(TokenKind::LeftBrace, "{"),
            '}' => self.token(TokenKind::RightBrace, "}"),
            '[' => self.token(TokenKind::LeftBracket, "["),
            ']' => self.token(TokenKind::RightBracket, "]"),
            '=' => {
                if self.next_if('=') {
                    self.token(TokenKind::Eq, "==")
                } else {
                    self.token(TokenKind::Assign, "=")
                }
            }
            '!' => {
                if self.next_if('=') {
                    self.token(TokenKind::NotEq, "!=")
                } else {
                    self.token(TokenKind::Bang, "!")
                }
            }
            '&' => {
                if self.next_if('&') {
                    self.token(TokenKind::And, "&&")
                } else {
                    self.token(TokenKind::Illegal, "&")
                }
            }
            '|' => {
                if self.next_if('|') {
                    self.token(TokenKind::Or, "||")
                } else {
                    self.token(TokenKind::Illegal, "|")
                }
            }
            '"' => self.string(),
            '0'..='9' => self.number(c),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(c),
            _ => self.token(TokenKind::Illegal, c.to_string()),
        }
    }

    fn token(&self, kind: TokenKind, literal: impl Into<String>) -> Token {
        Token::new(kind, literal, self.line)
    }
    fn next_if(&mut self, expected: char) -> bool {
        self.iter.next_if_eq(&expected).is_some()
    }
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.iter.next_if(|c| matches!(c, ' ' | '\t' | '\r' | '\n')) {
            if c == '\n' {
                self.line += 1;
            }
        }
    }
    // The closing quote is consumed; a backslash keeps the next quote inside
    // the literal. Unterminated strings run to the end of the input.
    fn string(&mut self) -> Token {
        let line = self.line;
        let mut literal = String::new();
        let mut escaped = false;
        while let Some(c) = self.iter.next() {
            if c == '"' && !escaped {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            escaped = c == '\\' && !escaped;
            literal.push(c);
        }
        Token::new(TokenKind::String, literal, line)
    }
    fn number(&mut self, first: char) -> Token {
        let mut literal = first.to_string();
        while let Some(c) = self.iter.next_if(char::is_ascii_digit) {
            literal.push(c);
        }
        self.token(TokenKind::Int, literal)
    }
    fn identifier(&mut self, first: char) -> Token {
        let mut literal = first.to_string();
        while let Some(c) = self
            .iter
            .next_if(|c| c.is_ascii_alphabetic() || *c == '_')
        {
            literal.push(c);
        }
        let kind = lookup_ident(&literal);
        self.token(kind, literal)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "func" => TokenKind::Function,
    "let" => TokenKind::Let,
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "return" => TokenKind::Return,
    "elseif" => TokenKind::ElseIf,
    "for" => TokenKind::For,
    "in" => TokenKind::In,
    "while" => TokenKind::While,
    "range" => TokenKind::Range,
};

pub fn lookup_ident(ident: &str) -> TokenKind {
    KEYWORDS.get(ident).copied().unwrap_or(TokenKind::Ident)
}
