use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use anyhow::Result;

use crate::{error::DefinitionError, object::Object};

/// Shared handle to a scope. Children hold their parent's handle, never the
/// other way round.
pub type Scope = Rc<RefCell<Environment>>;

/// Something that yields a value when a name is resolved.
pub trait Variable {
    fn value(&self) -> Result<Object>;
}

impl Variable for Object {
    fn value(&self) -> Result<Object> {
        Ok(self.clone())
    }
}

struct Lazy<F>(F);

impl<F> Variable for Lazy<F>
where
    F: Fn() -> Result<Object>,
{
    fn value(&self) -> Result<Object> {
        (self.0)()
    }
}

/// A host-registered callable. Arguments arrive already evaluated, left to
/// right.
pub trait Method {
    fn invoke(&self, args: Vec<Object>) -> Result<Object>;
}

impl<F> Method for F
where
    F: Fn(Vec<Object>) -> Result<Object>,
{
    fn invoke(&self, args: Vec<Object>) -> Result<Object> {
        self(args)
    }
}

/// Name and method resolution, the capability an owner needs in `a.b`.
pub trait Context {
    fn resolve_name(&self, name: &str) -> Option<Rc<dyn Variable>>;
    fn resolve_method(&self, name: &str) -> Option<Rc<dyn Method>>;
}

pub struct Environment {
    vars: HashMap<String, Rc<dyn Variable>>,
    methods: HashMap<String, Rc<dyn Method>>,
    outer: Option<Rc<dyn Context>>,
}

impl Environment {
    pub fn new() -> Scope {
        Rc::new(RefCell::new(Environment {
            vars: HashMap::new(),
            methods: HashMap::new(),
            outer: None,
        }))
    }

    /// The parent may be another scope or any host-provided `Context`.
    pub fn new_enclosed_environment(outer: Rc<dyn Context>) -> Scope {
        Rc::new(RefCell::new(Environment {
            vars: HashMap::new(),
            methods: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Binds `name` in this scope. Names are write-once per scope; an enclosed
    /// scope may shadow its parent.
    pub fn define(&mut self, name: &str, value: impl Into<Object>) -> Result<(), DefinitionError> {
        self.insert_var(name, Rc::new(value.into()))
    }

    /// Binds `name` to a closure that is run on every resolution.
    pub fn define_lazy<F>(&mut self, name: &str, f: F) -> Result<(), DefinitionError>
    where
        F: Fn() -> Result<Object> + 'static,
    {
        self.insert_var(name, Rc::new(Lazy(f)))
    }

    pub fn define_method(
        &mut self,
        name: &str,
        method: impl Method + 'static,
    ) -> Result<(), DefinitionError> {
        if self.methods.contains_key(name) {
            return Err(DefinitionError::MethodExists {
                name: name.to_string(),
            });
        }
        self.methods.insert(name.to_string(), Rc::new(method));
        Ok(())
    }

    fn insert_var(&mut self, name: &str, var: Rc<dyn Variable>) -> Result<(), DefinitionError> {
        if self.vars.contains_key(name) {
            return Err(DefinitionError::NameExists {
                name: name.to_string(),
            });
        }
        self.vars.insert(name.to_string(), var);
        Ok(())
    }

    pub fn outer(&self) -> Option<Rc<dyn Context>> {
        self.outer.clone()
    }
}

impl Context for Environment {
    fn resolve_name(&self, name: &str) -> Option<Rc<dyn Variable>> {
        match self.vars.get(name) {
            Some(var) => Some(var.clone()),
            None => match &self.outer {
                Some(outer) => outer.resolve_name(name),
                None => None,
            },
        }
    }

    fn resolve_method(&self, name: &str) -> Option<Rc<dyn Method>> {
        match self.methods.get(name) {
            Some(method) => Some(method.clone()),
            None => match &self.outer {
                Some(outer) => outer.resolve_method(name),
                None => None,
            },
        }
    }
}

/// Lets a shared scope serve as the parent of another.
impl Context for RefCell<Environment> {
    fn resolve_name(&self, name: &str) -> Option<Rc<dyn Variable>> {
        self.borrow().resolve_name(name)
    }

    fn resolve_method(&self, name: &str) -> Option<Rc<dyn Method>> {
        self.borrow().resolve_method(name)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut vars: Vec<&String> = self.vars.keys().collect();
        let mut methods: Vec<&String> = self.methods.keys().collect();
        vars.sort();
        methods.sort();
        f.debug_struct("Environment")
            .field("vars", &vars)
            .field("methods", &methods)
            .field("outer", &self.outer.is_some())
            .finish()
    }
}
