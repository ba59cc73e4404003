use crate::ast::{Block, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::callable::{Builtin, Function};
use crate::environment::Environment;
use crate::value::{HashPair, Value, ValueType, NULL, TRUE};
use log::debug;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: ValueType,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ValueType,
        operator: InfixOperator,
        right: ValueType,
    },
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ValueType,
        operator: InfixOperator,
        right: ValueType,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a function: {0}")]
    NotAFunction(ValueType),
    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount { want: usize, got: usize },
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(ValueType),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ValueType),
    #[error("wrong number of arguments. got={got}, expected={want}")]
    BuiltinArgumentCount { want: usize, got: usize },
    #[error("argument to '{builtin}' not supported, got {got}")]
    UnsupportedArgument { builtin: Builtin, got: ValueType },
    #[error("argument to '{builtin}' must be an ARRAY, got {got}")]
    ExpectedArray { builtin: Builtin, got: ValueType },
    #[error("array has no elements")]
    EmptyArray,
    #[error("second argument to 'pop' must be an INTEGER, got {0}")]
    PopIndexType(ValueType),
    #[error("index to pop from is out of bounds: {0}")]
    PopOutOfBounds(i64),
}

/// Everything that unwinds evaluation. `Return` is stopped at the nearest
/// function call or at the program; `Runtime` goes all the way out.
#[derive(Debug)]
pub enum ErrorType {
    Return(Value),
    Runtime(RuntimeError),
}

impl From<RuntimeError> for ErrorType {
    fn from(e: RuntimeError) -> ErrorType {
        ErrorType::Runtime(e)
    }
}

/// Tree-walking evaluator. The global scope lives as long as the
/// interpreter, so a REPL can feed it one program per line.
pub struct Interpreter {
    environment: Environment,
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            environment: Environment::new(),
        }
    }
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
    pub fn interpret(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let mut result = NULL;
        for statement in &program.statements {
            match self.execute(statement) {
                Ok(value) => result = value,
                Err(ErrorType::Return(value)) => return Ok(value),
                Err(ErrorType::Runtime(e)) => return Err(e),
            }
        }
        Ok(result)
    }
    /// Runs `block` with `environment` as the current scope, restoring the
    /// previous scope afterwards whatever the outcome.
    pub fn execute_block(
        &mut self,
        block: &Block,
        environment: Environment,
    ) -> Result<Value, ErrorType> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = self.evaluate_block(block);
        self.environment = previous;
        result
    }
    fn evaluate_block(&mut self, block: &Block) -> Result<Value, ErrorType> {
        let mut result = NULL;
        for statement in &block.statements {
            result = self.execute(statement)?;
        }
        Ok(result)
    }
    fn execute(&mut self, statement: &Statement) -> Result<Value, ErrorType> {
        match statement {
            Statement::Let { name, value } => {
                let value = self.evaluate(value)?;
                Ok(self.environment.set(name, value))
            }
            Statement::Return(value) => Err(ErrorType::Return(self.evaluate(value)?)),
            Statement::Expression(expression) => self.evaluate(expression),
        }
    }
    fn evaluate(&mut self, expression: &Expression) -> Result<Value, ErrorType> {
        match expression {
            Expression::Integer(x) => Ok(Value::Integer(*x)),
            Expression::Boolean(x) => Ok(Value::from(*x)),
            Expression::String(x) => Ok(Value::String(x.clone())),
            Expression::Identifier(name) => Ok(self.lookup(name)?),
            Expression::Prefix { operator, right } => {
                let right = self.evaluate(right)?;
                Ok(prefix(*operator, right)?)
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(infix(*operator, left, right)?)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.evaluate_block(alternative)
                } else {
                    Ok(NULL)
                }
            }
            Expression::Function(literal) => Ok(Value::Function(Function::new(
                literal.clone(),
                self.environment.clone(),
            ))),
            Expression::Call { callee, arguments } => {
                let callee = self.evaluate(callee)?;
                let arguments = self.evaluate_list(arguments)?;
                match callee {
                    Value::Function(function) => {
                        debug!("Calling {:?} with {} arguments", function, arguments.len());
                        Ok(function.call(self, arguments)?)
                    }
                    Value::Builtin(builtin) => Ok(builtin.call(&arguments)?),
                    other => Err(RuntimeError::NotAFunction(other.value_type()).into()),
                }
            }
            Expression::Array(elements) => Ok(Value::array(self.evaluate_list(elements)?)),
            Expression::Index { left, index } => {
                let left = self.evaluate(left)?;
                let index = self.evaluate(index)?;
                Ok(index_value(&left, &index)?)
            }
            Expression::Hash(pairs) => {
                let mut map = BTreeMap::new();
                for (key, value) in pairs {
                    let key = self.evaluate(key)?;
                    let hash_key = key
                        .hash_key()
                        .ok_or_else(|| RuntimeError::UnusableHashKey(key.value_type()))?;
                    let value = self.evaluate(value)?;
                    map.insert(hash_key, HashPair { key, value });
                }
                Ok(Value::Hash(Rc::new(map)))
            }
        }
    }
    fn evaluate_list(&mut self, expressions: &[Expression]) -> Result<Vec<Value>, ErrorType> {
        expressions.iter().map(|e| self.evaluate(e)).collect()
    }
    fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.environment
            .get(name)
            .or_else(|| Builtin::lookup(name).map(Value::Builtin))
            .ok_or_else(|| RuntimeError::IdentifierNotFound(name.to_string()))
    }
}

// Closures stored in the global scope point back at it.
impl Drop for Interpreter {
    fn drop(&mut self) {
        self.environment.clear();
    }
}

fn prefix(operator: PrefixOperator, right: Value) -> Result<Value, RuntimeError> {
    match (operator, &right) {
        (PrefixOperator::Bang, _) => Ok(Value::from(!right.is_truthy())),
        (PrefixOperator::Minus, Value::Integer(x)) => Ok(Value::Integer(x.wrapping_neg())),
        (PrefixOperator::Minus, _) => Err(RuntimeError::UnknownPrefixOperator {
            operator,
            right: right.value_type(),
        }),
    }
}

fn infix(operator: InfixOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => integer_infix(operator, *l, *r),
        (Value::String(l), Value::String(r)) if operator == InfixOperator::Plus => {
            Ok(Value::String(format!("{}{}", l, r)))
        }
        _ => match operator {
            InfixOperator::Eq => Ok(Value::from(left == right)),
            InfixOperator::NotEq => Ok(Value::from(left != right)),
            InfixOperator::And => Ok(Value::from(left == TRUE && right == TRUE)),
            InfixOperator::Or => Ok(Value::from(left == TRUE || right == TRUE)),
            _ if left.value_type() != right.value_type() => Err(RuntimeError::TypeMismatch {
                left: left.value_type(),
                operator,
                right: right.value_type(),
            }),
            _ => Err(RuntimeError::UnknownInfixOperator {
                left: left.value_type(),
                operator,
                right: right.value_type(),
            }),
        },
    }
}

fn integer_infix(operator: InfixOperator, l: i64, r: i64) -> Result<Value, RuntimeError> {
    match operator {
        InfixOperator::Plus => Ok(Value::Integer(l.wrapping_add(r))),
        InfixOperator::Minus => Ok(Value::Integer(l.wrapping_sub(r))),
        InfixOperator::Asterisk => Ok(Value::Integer(l.wrapping_mul(r))),
        InfixOperator::Slash => {
            if r == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Integer(l.wrapping_div(r)))
            }
        }
        InfixOperator::Lt => Ok(Value::from(l < r)),
        InfixOperator::Gt => Ok(Value::from(l > r)),
        InfixOperator::Eq => Ok(Value::from(l == r)),
        InfixOperator::NotEq => Ok(Value::from(l != r)),
        InfixOperator::And | InfixOperator::Or => Err(RuntimeError::UnknownInfixOperator {
            left: ValueType::Integer,
            operator,
            right: ValueType::Integer,
        }),
    }
}

fn index_value(left: &Value, index: &Value) -> Result<Value, RuntimeError> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(NULL)),
        (Value::Hash(pairs), _) => {
            let key = index
                .hash_key()
                .ok_or_else(|| RuntimeError::UnusableHashKey(index.value_type()))?;
            Ok(pairs.get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL))
        }
        _ => Err(RuntimeError::IndexNotSupported(left.value_type())),
    }
}

#[cfg(test)]
mod interpreter_tests {
    use crate::interpreter::{Interpreter, RuntimeError};
    use crate::parser;
    use crate::value::{Value, ValueType, FALSE, NULL, TRUE};

    fn eval(source: &str) -> Result<Value, RuntimeError> {
        let program = parser::parse(source).unwrap();
        Interpreter::new().interpret(&program)
    }

    fn eval_ok(source: &str) -> Value {
        match eval(source) {
            Ok(value) => value,
            Err(e) => panic!("{:?} failed: {}", source, e),
        }
    }

    fn error_message(source: &str) -> String {
        match eval(source) {
            Ok(value) => panic!("{:?} evaluated to {} instead of failing", source, value),
            Err(e) => e.to_string(),
        }
    }

    fn ints(xs: &[i64]) -> Value {
        Value::array(xs.iter().map(|x| Value::Integer(*x)).collect())
    }

    #[test]
    fn integer_arithmetic() {
        let tests = [
            ("5", 5),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("7 / 2", 3),
            ("-7 / 2", -3),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(eval_ok(source), Value::Integer(*expected), "{}", source);
        }
    }

    #[test]
    fn integer_overflow_wraps() {
        assert_eq!(
            eval_ok("9223372036854775807 + 1"),
            Value::Integer(i64::MIN)
        );
        assert_eq!(
            eval_ok("-9223372036854775807 - 2"),
            Value::Integer(i64::MAX)
        );
    }

    #[test]
    fn boolean_expressions() {
        let tests = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 > 2) == true", false),
            ("true && true", true),
            ("true && false", false),
            ("false || true", true),
            ("false || false", false),
            ("(1 < 2) && (2 < 3)", true),
            ("1 && true", false),
            ("\"a\" == \"a\"", true),
            ("\"a\" != \"b\"", true),
            ("[1, 2] == [1, 2]", true),
            ("[1, 2] == [2, 1]", false),
            ("{\"a\": 1} == {\"a\": 1}", true),
            ("1 == true", false),
            ("1 != \"1\"", true),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(eval_ok(source), Value::from(*expected), "{}", source);
        }
    }

    #[test]
    fn bang_operator() {
        let tests = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!0", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
            ("!\"\"", false),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(eval_ok(source), Value::from(*expected), "{}", source);
        }
    }

    #[test]
    fn if_else() {
        assert_eq!(eval_ok("if (true) { 10 }"), Value::Integer(10));
        assert_eq!(eval_ok("if (false) { 10 }"), NULL);
        assert_eq!(eval_ok("if (1) { 10 }"), Value::Integer(10));
        assert_eq!(eval_ok("if (0) { 10 } else { 20 }"), Value::Integer(10));
        assert_eq!(eval_ok("if (1 < 2) { 10 }"), Value::Integer(10));
        assert_eq!(eval_ok("if (1 > 2) { 10 }"), NULL);
        assert_eq!(eval_ok("if (1 > 2) { 10 } else { 20 }"), Value::Integer(20));
        assert_eq!(eval_ok("if (if (false) { 1 }) { 10 } else { 20 }"), Value::Integer(20));
        assert_eq!(eval_ok("if (true) {}"), NULL);
    }

    #[test]
    fn return_statements() {
        let tests = [
            ("return 10;", 10),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
            ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
            (
                "let f = func(x) { if (x > 1) { return 1; } return 2; }; f(5) + f(0);",
                3,
            ),
            ("let f = func() { return 1; 2; }; f() + 10;", 11),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(eval_ok(source), Value::Integer(*expected), "{}", source);
        }
    }

    #[test]
    fn error_messages() {
        let tests = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("-\"a\"", "unknown operator: -STRING"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
            ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
            ("1 && 2", "unknown operator: INTEGER && INTEGER"),
            ("\"a\" < 1", "type mismatch: STRING < INTEGER"),
            ("[1] + [2]", "unknown operator: ARRAY + ARRAY"),
            ("{\"name\": \"Monkey\"}[func(x) { x }];", "unusable as hash key: FUNCTION"),
            ("{[1]: 2}", "unusable as hash key: ARRAY"),
            ("1[0]", "index operator not supported: INTEGER"),
            ("\"abc\"[0]", "index operator not supported: STRING"),
            ("5()", "not a function: INTEGER"),
            ("\"f\"(1)", "not a function: STRING"),
            ("10 / 0", "division by zero"),
            ("func(x) { x }()", "wrong number of arguments: want=1, got=0"),
            ("func() { 1 }(1, 2)", "wrong number of arguments: want=0, got=2"),
            ("len(1)", "argument to 'len' not supported, got INTEGER"),
            ("len(\"one\", \"two\")", "wrong number of arguments. got=2, expected=1"),
            ("first([])", "array has no elements"),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(error_message(source), *expected, "{}", source);
        }
    }

    #[test]
    fn first_error_wins() {
        assert_eq!(error_message("[a, b]"), "identifier not found: a");
        assert_eq!(error_message("f(x)"), "identifier not found: f");
        assert_eq!(error_message("len(x, 1 + true)"), "identifier not found: x");
        assert_eq!(
            error_message("{1 + true: missing}"),
            "type mismatch: INTEGER + BOOLEAN"
        );
        assert_eq!(error_message("{[]: missing}"), "unusable as hash key: ARRAY");
    }

    #[test]
    fn let_statements() {
        assert_eq!(eval_ok("let a = 5; a;"), Value::Integer(5));
        assert_eq!(eval_ok("let a = 5 * 5; a;"), Value::Integer(25));
        assert_eq!(eval_ok("let a = 5; let b = a; b;"), Value::Integer(5));
        assert_eq!(
            eval_ok("let a = 5; let b = a; let c = a + b + 5; c;"),
            Value::Integer(15)
        );
        assert_eq!(eval_ok("let a = 5;"), Value::Integer(5));
        assert_eq!(eval_ok("let a = 1; let a = a + 1; a"), Value::Integer(2));
    }

    #[test]
    fn function_values() {
        let value = eval_ok("func(x) { x + 2; };");
        match &value {
            Value::Function(function) => {
                assert_eq!(function.params(), ["x".to_string()]);
                assert_eq!(function.body().to_string(), "(x + 2)");
            }
            other => panic!("expected a function, got {:?}", other),
        }
        assert_eq!(value.to_string(), "func(x) {\n(x + 2)\n}");
        assert_eq!(value.value_type(), ValueType::Function);
        assert_eq!(eval_ok("let f = func() { 1 }; f == f"), TRUE);
        assert_eq!(eval_ok("func() { 1 } == func() { 1 }"), FALSE);
    }

    #[test]
    fn function_application() {
        let tests = [
            ("let identity = func(x) { x; }; identity(5);", 5),
            ("let identity = func(x) { return x; }; identity(5);", 5),
            ("let double = func(x) { x * 2; }; double(5);", 10),
            ("let add = func(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = func(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("func(x) { x; }(5)", 5),
            ("let f = func() {}; if (f()) { 1 } else { 2 }", 2),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(eval_ok(source), Value::Integer(*expected), "{}", source);
        }
    }

    #[test]
    fn closures() {
        let source = "
            let newAdder = func(x) { func(y) { x + y }; };
            let addTwo = newAdder(2);
            addTwo(2);";
        assert_eq!(eval_ok(source), Value::Integer(4));

        // Captured scope, not the caller's.
        let source = "
            let x = 1;
            let f = func() { x };
            let g = func(x) { f() };
            g(100);";
        assert_eq!(eval_ok(source), Value::Integer(1));

        // Parameters shadow without touching the outer binding.
        assert_eq!(
            eval_ok("let x = 1; let f = func(x) { let x = x * 10; x }; f(5) + x"),
            Value::Integer(51)
        );
    }

    #[test]
    fn recursion() {
        let source = "
            let fib = func(n) {
                if (n < 2) { return n; }
                fib(n - 1) + fib(n - 2)
            };
            fib(15);";
        assert_eq!(eval_ok(source), Value::Integer(610));

        let source = "
            let map = func(arr, f) {
                let iter = func(arr, acc) {
                    if (len(arr) == 0) { acc } else {
                        iter(pop(arr, 0), push(acc, f(first(arr))))
                    }
                };
                iter(arr, []);
            };
            map([1, 2, 3], func(x) { x * x });";
        assert_eq!(eval_ok(source), ints(&[1, 4, 9]));
    }

    #[test]
    fn strings() {
        assert_eq!(
            eval_ok("\"Hello World!\""),
            Value::String("Hello World!".to_string())
        );
        assert_eq!(
            eval_ok("\"Hello\" + \" \" + \"World!\""),
            Value::String("Hello World!".to_string())
        );
    }

    #[test]
    fn builtins() {
        assert_eq!(eval_ok("len(\"\")"), Value::Integer(0));
        assert_eq!(eval_ok("len(\"four\")"), Value::Integer(4));
        assert_eq!(eval_ok("len([1, 2, 3])"), Value::Integer(3));
        assert_eq!(eval_ok("first([1, 2, 3])"), Value::Integer(1));
        assert_eq!(eval_ok("last([1, 2, 3])"), Value::Integer(3));
        assert_eq!(eval_ok("push([], 1)"), ints(&[1]));
        assert_eq!(eval_ok("pop([1, 2, 3], 0)"), ints(&[2, 3]));
        assert_eq!(eval_ok("let a = [1, 2]; pop(a, 0); a"), ints(&[1, 2]));
        assert_eq!(eval_ok("len").to_string(), "builtin function");
        // A binding shadows the builtin of the same name.
        assert_eq!(eval_ok("let len = func(x) { 42 }; len([])"), Value::Integer(42));
    }

    #[test]
    fn arrays() {
        assert_eq!(eval_ok("[1, 2 * 2, 3 + 3]"), ints(&[1, 4, 6]));
        assert_eq!(eval_ok("[]"), ints(&[]));
        let tests = [
            ("[1, 2, 3][0]", Value::Integer(1)),
            ("[1, 2, 3][1]", Value::Integer(2)),
            ("[1, 2, 3][2]", Value::Integer(3)),
            ("let i = 0; [1][i];", Value::Integer(1)),
            ("[1, 2, 3][1 + 1];", Value::Integer(3)),
            ("let myArray = [1, 2, 3]; myArray[2];", Value::Integer(3)),
            (
                "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                Value::Integer(6),
            ),
            ("[1, 2, 3][3]", NULL),
            ("[1, 2, 3][-1]", NULL),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(&eval_ok(source), expected, "{}", source);
        }
    }

    #[test]
    fn hashes() {
        let source = r#"
            let two = "two";
            {
                "one": 10 - 9,
                two: 1 + 1,
                "thr" + "ee": 6 / 2,
                4: 4,
                true: 5,
                false: 6
            }"#;
        assert_eq!(
            eval_ok(source).to_string(),
            "{4: 4, false: 6, true: 5, one: 1, three: 3, two: 2}"
        );
        let tests = [
            ("{\"foo\": 5}[\"foo\"]", Value::Integer(5)),
            ("{\"foo\": 5}[\"bar\"]", NULL),
            ("let key = \"foo\"; {\"foo\": 5}[key]", Value::Integer(5)),
            ("{}[\"foo\"]", NULL),
            ("{5: 5}[5]", Value::Integer(5)),
            ("{true: 5}[true]", Value::Integer(5)),
            ("{false: 5}[false]", Value::Integer(5)),
            ("{1: \"int\"}[true]", NULL),
            ("{\"a\": 1, \"a\": 2}[\"a\"]", Value::Integer(2)),
        ];
        for (source, expected) in tests.iter() {
            assert_eq!(&eval_ok(source), expected, "{}", source);
        }
    }

    #[test]
    fn global_scope_persists() {
        let mut interpreter = Interpreter::new();
        let first = parser::parse("let counter = func(x) { x + 1 };").unwrap();
        let second = parser::parse("counter(41)").unwrap();
        assert!(interpreter.interpret(&first).is_ok());
        assert_eq!(interpreter.interpret(&second), Ok(Value::Integer(42)));
        assert!(interpreter.environment().get("counter").is_some());
    }

    #[test]
    fn scope_restored_after_error() {
        let mut interpreter = Interpreter::new();
        let failing = parser::parse("let f = func(y) { y + true }; f(1)").unwrap();
        assert_eq!(
            interpreter.interpret(&failing).unwrap_err().to_string(),
            "type mismatch: INTEGER + BOOLEAN"
        );
        // The parameter must not have leaked into the global scope.
        assert!(interpreter.environment().get("y").is_none());
        assert!(interpreter.environment().get("f").is_some());
    }
}
