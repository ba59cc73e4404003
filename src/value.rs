use crate::callable::{Builtin, Function};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValueType {
    #[strum(serialize = "INTEGER")]
    Integer,
    #[strum(serialize = "BOOLEAN")]
    Boolean,
    #[strum(serialize = "STRING")]
    String,
    #[strum(serialize = "NULL")]
    Null,
    #[strum(serialize = "ARRAY")]
    Array,
    #[strum(serialize = "HASH")]
    Hash,
    #[strum(serialize = "FUNCTION")]
    Function,
    #[strum(serialize = "BUILTIN")]
    Builtin,
}

/// Key of a hash entry: the kind tag together with the full payload, so two
/// keys are equal exactly when the values they came from are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(Rc<Vec<Value>>),
    Hash(Rc<BTreeMap<HashKey, HashPair>>),
    Function(Function),
    Builtin(Builtin),
}

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Hash(_) => ValueType::Hash,
            Value::Function(_) => ValueType::Function,
            Value::Builtin(_) => ValueType::Builtin,
        }
    }
    pub fn inspect(&self) -> String {
        self.to_string()
    }
    /// Everything except `false` and `null` is truthy, `0` included.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(x) => *x,
            _ => true,
        }
    }
    /// Only integers, booleans and strings can key a hash.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(x) => Some(HashKey::Integer(*x)),
            Value::Boolean(x) => Some(HashKey::Boolean(*x)),
            Value::String(x) => Some(HashKey::String(x.clone())),
            _ => None,
        }
    }
    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(elements))
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Value {
        if x {
            TRUE
        } else {
            FALSE
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.equals(b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(x) => write!(f, "{}", x),
            Value::Integer(x) => write!(f, "{}", x),
            Value::String(x) => write!(f, "{}", x),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Hash(pairs) => {
                write!(f, "{{")?;
                for (idx, pair) in pairs.values().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
            Value::Function(function) => write!(f, "{}", function),
            Value::Builtin(_) => write!(f, "builtin function"),
        }
    }
}
