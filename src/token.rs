use std::fmt;
use strum_macros::{Display, EnumCount};

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumCount)]
#[repr(u8)]
pub enum TokenKind {
    #[strum(serialize = "ILLEGAL")] Illegal,
    #[strum(serialize = "EOF")] Eof,

    // Identifiers and literals.
    #[strum(serialize = "IDENT")] Ident,
    #[strum(serialize = "INT")] Int,
    #[strum(serialize = "STRING")] String,

    // Operators.
    #[strum(serialize = "ASSIGN")] Assign,
    #[strum(serialize = "PLUS")] Plus,
    #[strum(serialize = "MINUS")] Minus,
    #[strum(serialize = "BANG")] Bang,
    #[strum(serialize = "ASTERISK")] Asterisk,
    #[strum(serialize = "SLASH")] Slash,
    #[strum(serialize = "LT")] Lt,
    #[strum(serialize = "GT")] Gt,
    #[strum(serialize = "EQ")] Eq,
    #[strum(serialize = "NOT_EQ")] NotEq,
    #[strum(serialize = "AND")] And,
    #[strum(serialize = "OR")] Or,

    // Delimiters.
    #[strum(serialize = "COMMA")] Comma,
    #[strum(serialize = "SEMICOLON")] Semicolon,
    #[strum(serialize = "COLON")] Colon,
    #[strum(serialize = "LPAREN")] LeftParen,
    #[strum(serialize = "RPAREN")] RightParen,
    #[strum(serialize = "LCBRACE")] LeftBrace,
    #[strum(serialize = "RCBRACE")] RightBrace,
    #[strum(serialize = "LBRACK")] LeftBracket,
    #[strum(serialize = "RBRACK")] RightBracket,

    // Keywords.
    #[strum(serialize = "FUNCTION")] Function,
    #[strum(serialize = "LET")] Let,
    #[strum(serialize = "TRUE")] True,
    #[strum(serialize = "FALSE")] False,
    #[strum(serialize = "IF")] If,
    #[strum(serialize = "ELSE")] Else,
    #[strum(serialize = "RETURN")] Return,

    // Reserved, no grammar attached.
    #[strum(serialize = "ELSEIF")] ElseIf,
    #[strum(serialize = "FOR")] For,
    #[strum(serialize = "IN")] In,
    #[strum(serialize = "WHILE")] While,
    #[strum(serialize = "RANGE")] Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Token {
        Token {
            kind,
            literal: literal.into(),
            line,
        }
    }
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Type:{} Literal:{}}}", self.kind, self.literal)
    }
}
