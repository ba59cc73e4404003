use crate::ast::{Block, FunctionLiteral};
use crate::environment::Environment;
use crate::interpreter::{ErrorType, Interpreter, RuntimeError};
use crate::value::Value;
use log::debug;
use std::fmt;
use std::rc::Rc;
use strum_macros::{Display, EnumIter, EnumString};

/// A user function: the literal it was created from plus the scope that was
/// current when the literal was evaluated.
#[derive(Clone)]
pub struct Function {
    data: Rc<FunctionImpl>,
}

struct FunctionImpl {
    literal: Rc<FunctionLiteral>,
    closure: Environment,
}

impl Function {
    pub fn new(literal: Rc<FunctionLiteral>, closure: Environment) -> Function {
        Function {
            data: Rc::new(FunctionImpl { literal, closure }),
        }
    }
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        if arguments.len() != self.arity() {
            return Err(RuntimeError::WrongArgumentCount {
                want: self.arity(),
                got: arguments.len(),
            });
        }
        let environment = self.closure().new_child();
        for (param, value) in self.params().iter().zip(arguments) {
            environment.set(param, value);
        }
        match interpreter.execute_block(self.body(), environment) {
            Ok(value) | Err(ErrorType::Return(value)) => Ok(value),
            Err(ErrorType::Runtime(e)) => Err(e),
        }
    }
    pub fn arity(&self) -> usize {
        self.data.literal.parameters.len()
    }
    pub fn params(&self) -> &[String] {
        &self.data.literal.parameters
    }
    pub fn body(&self) -> &Block {
        &self.data.literal.body
    }
    pub fn closure(&self) -> &Environment {
        &self.data.closure
    }
    pub fn equals(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<func({})>", self.params().join(", "))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "func({}) {{\n{}\n}}",
            self.params().join(", "),
            self.body()
        )
    }
}

/// The host-provided functions. They resolve by name only after the
/// environment chain comes up empty, so a `let` can shadow them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Builtin {
    #[strum(serialize = "len")]
    Len,
    #[strum(serialize = "first")]
    First,
    #[strum(serialize = "last")]
    Last,
    #[strum(serialize = "push")]
    Push,
    #[strum(serialize = "pop")]
    Pop,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        name.parse().ok()
    }
    pub fn call(self, arguments: &[Value]) -> Result<Value, RuntimeError> {
        debug!("Calling builtin {} with {} arguments", self, arguments.len());
        match self {
            Builtin::Len => {
                check_arity(arguments, 1)?;
                match &arguments[0] {
                    Value::String(x) => Ok(Value::Integer(x.len() as i64)),
                    Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
                    other => Err(RuntimeError::UnsupportedArgument {
                        builtin: self,
                        got: other.value_type(),
                    }),
                }
            }
            Builtin::First => {
                check_arity(arguments, 1)?;
                let elements = self.array_argument(&arguments[0])?;
                elements.first().cloned().ok_or(RuntimeError::EmptyArray)
            }
            Builtin::Last => {
                check_arity(arguments, 1)?;
                let elements = self.array_argument(&arguments[0])?;
                elements.last().cloned().ok_or(RuntimeError::EmptyArray)
            }
            Builtin::Push => {
                check_arity(arguments, 2)?;
                let elements = self.array_argument(&arguments[0])?;
                let mut pushed = Vec::with_capacity(elements.len() + 1);
                pushed.extend(elements.iter().cloned());
                pushed.push(arguments[1].clone());
                Ok(Value::array(pushed))
            }
            Builtin::Pop => {
                check_arity(arguments, 2)?;
                let elements = self.array_argument(&arguments[0])?;
                if elements.is_empty() {
                    return Err(RuntimeError::EmptyArray);
                }
                let index = match &arguments[1] {
                    Value::Integer(x) => *x,
                    other => return Err(RuntimeError::PopIndexType(other.value_type())),
                };
                if index < 0 || index as usize >= elements.len() {
                    return Err(RuntimeError::PopOutOfBounds(index));
                }
                let mut remaining = elements.as_ref().clone();
                remaining.remove(index as usize);
                Ok(Value::array(remaining))
            }
        }
    }
    fn array_argument<'v>(self, value: &'v Value) -> Result<&'v Rc<Vec<Value>>, RuntimeError> {
        match value {
            Value::Array(elements) => Ok(elements),
            other => Err(RuntimeError::ExpectedArray {
                builtin: self,
                got: other.value_type(),
            }),
        }
    }
}

fn check_arity(arguments: &[Value], want: usize) -> Result<(), RuntimeError> {
    if arguments.len() == want {
        Ok(())
    } else {
        Err(RuntimeError::BuiltinArgumentCount {
            want,
            got: arguments.len(),
        })
    }
}
