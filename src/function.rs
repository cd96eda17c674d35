use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::Unwind;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Location, Token, Type};

/// Represents a user-defined function together with the environment captured
/// at its declaration. Methods are the same thing bound to an instance.
#[derive(Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    /// Returns a copy of this function whose closure binds `this` to the given
    /// instance. Property access on instances goes through here.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    /// Returns the `this` bound in the closure. Initializers always evaluate
    /// to their instance, no matter how they return.
    fn this(&self) -> Result<Object, Unwind> {
        self.closure.borrow().get_at(0, &Token::from("this")).map_err(Unwind::Error)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, Unwind> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument);
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            Ok(()) => {
                if self.is_initializer {
                    self.this()
                } else {
                    Ok(Object::from(Literal::Nil))
                }
            },
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    self.this()
                } else {
                    Ok(value)
                }
            },
            Err(unwind) => Err(unwind),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// Represents a function implemented by the host instead of the language.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter<'_>, Vec<Object>) -> Result<Object, Unwind>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, Unwind> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    fn new(name: &str, arity: usize, function: fn(&mut Interpreter<'_>, Vec<Object>) -> Result<Object, Unwind>) -> Self {
        NativeFunction {
            name: Token::new(Type::Identifier, name.to_owned(), None, Location::new(0, 0)),
            arity,
            function,
        }
    }

    /// Returns the native functions seeded into the global environment.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction::new("clock", 0, |_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock to be past the epoch")
                    .as_secs_f64();
                Ok(Object::from(now))
            }),
            NativeFunction::new("input", 0, |_, _| {
                let mut input = String::new();
                if std::io::stdin().read_line(&mut input).is_err() {
                    return Ok(Object::from(Literal::Nil));
                }
                if input.ends_with('\n') {
                    input.pop();
                }
                Ok(Object::from(input))
            }),
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.function == other.function
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
