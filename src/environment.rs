use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A lexical scope. Cloning an `Environment` shares it: closures keep
/// their defining scope alive for as long as they exist.
#[derive(Clone, Default)]
pub struct Environment {
    data: Rc<RefCell<EnvironmentImpl>>,
}

#[derive(Default)]
struct EnvironmentImpl {
    values: BTreeMap<String, Value>,
    parent: Option<Environment>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment::default()
    }
    pub fn new_child(&self) -> Environment {
        Environment {
            data: Rc::new(RefCell::new(EnvironmentImpl {
                values: BTreeMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.data.borrow();
        match data.values.get(name) {
            Some(value) => Some(value.clone()),
            None => data.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }
    /// Binds `name` in this scope, never in a parent, and hands the value back.
    pub fn set(&self, name: &str, value: Value) -> Value {
        self.data
            .borrow_mut()
            .values
            .insert(name.to_string(), value.clone());
        value
    }
    // Dropping the bindings releases closures that point back at this scope.
    pub fn clear(&self) {
        let values = std::mem::take(&mut self.data.borrow_mut().values);
        drop(values);
    }
    pub fn equals(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

// Bindings may hold closures over this very scope, so only names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("Environment")
            .field("names", &data.values.keys().collect::<Vec<_>>())
            .field("parent", &data.parent)
            .finish()
    }
}
