use crate::ast::{
    Block, Expression, FunctionLiteral, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use log::debug;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < > && ||
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // f(x) a[x]
}

type PrefixFn = fn(&mut Parser) -> Option<Expression>;
type InfixFn = fn(&mut Parser, Expression) -> Option<Expression>;

struct ParseRule {
    prefix: Option<PrefixFn>,
    infix: Option<InfixFn>,
    precedence: Precedence,
}

impl ParseRule {
    fn get_rule(kind: TokenKind) -> &'static ParseRule {
        &RULES[kind as usize]
    }
}

macro_rules! prefix_fn {
    (None) => {
        None
    };
    ($method:ident) => {
        Some(Parser::$method as PrefixFn)
    };
}

macro_rules! infix_fn {
    (None) => {
        None
    };
    ($method:ident) => {
        Some(Parser::$method as InfixFn)
    };
}

macro_rules! mkrules {
    ($($prefix:tt, $infix:tt, $precedence:tt);+) => {
        &[
        $(
            ParseRule {
                prefix: prefix_fn!($prefix),
                infix: infix_fn!($infix),
                precedence: Precedence::$precedence,
            }
        ),+
        ]
    };
}

// One row per TokenKind, in declaration order.
#[rustfmt::skip]
static RULES: &[ParseRule] = mkrules!(
    None,           None,          Lowest;      // Illegal
    None,           None,          Lowest;      // Eof
    identifier,     None,          Lowest;      // Ident
    integer,        None,          Lowest;      // Int
    string,         None,          Lowest;      // String
    None,           None,          Lowest;      // Assign
    None,           infix,         Sum;         // Plus
    prefix,         infix,         Sum;         // Minus
    prefix,         None,          Lowest;      // Bang
    None,           infix,         Product;     // Asterisk
    None,           infix,         Product;     // Slash
    None,           infix,         LessGreater; // Lt
    None,           infix,         LessGreater; // Gt
    None,           infix,         Equals;      // Eq
    None,           infix,         Equals;      // NotEq
    None,           infix,         LessGreater; // And
    None,           infix,         LessGreater; // Or
    None,           None,          Lowest;      // Comma
    None,           None,          Lowest;      // Semicolon
    None,           None,          Lowest;      // Colon
    grouping,       call,          Call;        // LeftParen
    None,           None,          Lowest;      // RightParen
    hash,           None,          Lowest;      // LeftBrace
    None,           None,          Lowest;      // RightBrace
    array,          index,         Call;        // LeftBracket
    None,           None,          Lowest;      // RightBracket
    function,       None,          Lowest;      // Function
    None,           None,          Lowest;      // Let
    boolean,        None,          Lowest;      // True
    boolean,        None,          Lowest;      // False
    if_expression,  None,          Lowest;      // If
    None,           None,          Lowest;      // Else
    None,           None,          Lowest;      // Return
    None,           None,          Lowest;      // ElseIf
    None,           None,          Lowest;      // For
    None,           None,          Lowest;      // In
    None,           None,          Lowest;      // While
    None,           None,          Lowest       // Range
);

/// Pratt parser over a token stream pulled from a `Lexer`.
///
/// Errors are collected rather than returned early, so a single pass
/// reports every problem it can find. A program that produced errors
/// must not be evaluated.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let (program, errors) = Parser::new(Lexer::new(source)).parse_program();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Parser {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut statements = Vec::new();
        while !self.current.is(TokenKind::Eof) {
            if let Some(statement) = self.statement() {
                statements.push(statement);
            }
            self.advance();
        }
        (Program { statements }, self.errors)
    }

    fn statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.let_statement(),
            TokenKind::Return => self.return_statement(),
            _ => self.expression_statement(),
        }
    }
    fn let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.literal.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();
        let value = self.expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Let { name, value })
    }
    fn return_statement(&mut self) -> Option<Statement> {
        self.advance();
        let value = self.expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Return(value))
    }
    fn expression_statement(&mut self) -> Option<Statement> {
        let expression = self.expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Expression(expression))
    }
    // Entered with `{` as the current token; leaves `}` current.
    fn block(&mut self) -> Block {
        let mut statements = Vec::new();
        self.advance();
        while !self.current.is(TokenKind::RightBrace) {
            if self.current.is(TokenKind::Eof) {
                self.error(ParseError::UnexpectedToken {
                    expected: TokenKind::RightBrace,
                    actual: TokenKind::Eof,
                });
                break;
            }
            if let Some(statement) = self.statement() {
                statements.push(statement);
            }
            self.advance();
        }
        Block { statements }
    }

    fn expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match ParseRule::get_rule(self.current.kind).prefix {
            Some(f) => f,
            None => {
                self.error(ParseError::NoPrefixParseFn(self.current.kind));
                return None;
            }
        };
        let mut left = prefix(self)?;
        while !self.peek.is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match ParseRule::get_rule(self.peek.kind).infix {
                Some(f) => f,
                None => return Some(left),
            };
            self.advance();
            left = infix(self, left)?;
        }
        Some(left)
    }

    fn identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.current.literal.clone()))
    }
    fn integer(&mut self) -> Option<Expression> {
        match self.current.literal.parse() {
            Ok(value) => Some(Expression::Integer(value)),
            Err(_) => {
                self.error(ParseError::InvalidInteger(self.current.literal.clone()));
                None
            }
        }
    }
    fn string(&mut self) -> Option<Expression> {
        Some(Expression::String(self.current.literal.clone()))
    }
    fn boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.current.is(TokenKind::True)))
    }
    fn prefix(&mut self) -> Option<Expression> {
        let operator = match self.current.kind {
            TokenKind::Bang => PrefixOperator::Bang,
            _ => PrefixOperator::Minus,
        };
        self.advance();
        let right = self.expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }
    fn grouping(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }
        Some(expression)
    }
    fn if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LeftParen) {
            return None;
        }
        self.advance();
        let condition = self.expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RightParen) || !self.expect_peek(TokenKind::LeftBrace) {
            return None;
        }
        let consequence = self.block();
        let mut alternative = None;
        if self.peek.is(TokenKind::Else) {
            self.advance();
            if !self.expect_peek(TokenKind::LeftBrace) {
                return None;
            }
            alternative = Some(self.block());
        }
        Some(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }
    fn function(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LeftParen) {
            return None;
        }
        let parameters = self.parameters()?;
        if !self.expect_peek(TokenKind::LeftBrace) {
            return None;
        }
        let body = self.block();
        Some(Expression::Function(Rc::new(FunctionLiteral {
            parameters,
            body,
        })))
    }
    fn parameters(&mut self) -> Option<Vec<String>> {
        let mut parameters = Vec::new();
        if self.peek.is(TokenKind::RightParen) {
            self.advance();
            return Some(parameters);
        }
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        parameters.push(self.current.literal.clone());
        while self.peek.is(TokenKind::Comma) {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            parameters.push(self.current.literal.clone());
        }
        if !self.expect_peek(TokenKind::RightParen) {
            return None;
        }
        Some(parameters)
    }
    fn array(&mut self) -> Option<Expression> {
        let elements = self.expression_list(TokenKind::RightBracket)?;
        Some(Expression::Array(elements))
    }
    fn hash(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();
        while !self.peek.is(TokenKind::RightBrace) {
            self.advance();
            let key = self.expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.advance();
            let value = self.expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek.is(TokenKind::RightBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }
        if !self.expect_peek(TokenKind::RightBrace) {
            return None;
        }
        Some(Expression::Hash(pairs))
    }

    fn infix(&mut self, left: Expression) -> Option<Expression> {
        let operator = match self.current.kind {
            TokenKind::Plus => InfixOperator::Plus,
            TokenKind::Minus => InfixOperator::Minus,
            TokenKind::Asterisk => InfixOperator::Asterisk,
            TokenKind::Slash => InfixOperator::Slash,
            TokenKind::Lt => InfixOperator::Lt,
            TokenKind::Gt => InfixOperator::Gt,
            TokenKind::Eq => InfixOperator::Eq,
            TokenKind::NotEq => InfixOperator::NotEq,
            TokenKind::And => InfixOperator::And,
            _ => InfixOperator::Or,
        };
        let precedence = ParseRule::get_rule(self.current.kind).precedence;
        self.advance();
        let right = self.expression(precedence)?;
        Some(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
    fn call(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.expression_list(TokenKind::RightParen)?;
        Some(Expression::Call {
            callee: Box::new(callee),
            arguments,
        })
    }
    fn index(&mut self, left: Expression) -> Option<Expression> {
        self.advance();
        let index = self.expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RightBracket) {
            return None;
        }
        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
    fn expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek.is(end) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.expression(Precedence::Lowest)?);
        while self.peek.is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.is(kind) {
            self.advance();
            true
        } else {
            self.error(ParseError::UnexpectedToken {
                expected: kind,
                actual: self.peek.kind,
            });
            false
        }
    }
    fn skip_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) {
            self.advance();
        }
    }
    fn peek_precedence(&self) -> Precedence {
        ParseRule::get_rule(self.peek.kind).precedence
    }
    fn error(&mut self, error: ParseError) {
        debug!("[line {}] parse error: {}", self.current.line, error);
        self.errors.push(error);
    }
}
