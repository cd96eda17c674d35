use crate::object::Object;
use crate::token::{Token, Type};

static mut HAD_ERROR: bool = false;
static mut HAD_RUNTIME_ERROR: bool = false;

/// Checks if an error occurred during scanning, parsing, resolving or interpreting.
pub fn did_error() -> bool {
    unsafe { HAD_ERROR || HAD_RUNTIME_ERROR }
}

/// Checks if an error occurred during runtime.
pub fn did_runtime_error() -> bool {
    unsafe { HAD_RUNTIME_ERROR }
}

/// Resets the error flags.
/// This is used to reset the interpreter between units when running prompts.
pub fn reset_error() {
    unsafe {
        HAD_ERROR = false;
        HAD_RUNTIME_ERROR = false;
    }
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the error flag.
    fn throw(&self);
}

/// Reports a static error in the `[line N] Error (<where>): <msg>` format.
fn report(line: usize, at: &str, message: &str) {
    eprintln!("[line {line}] Error ({at}): {message}");

    unsafe {
        HAD_ERROR = true;
    }
}

/// Formats the `<where>` part of a static error for the offending token.
fn at_token(token: &Token) -> String {
    if token.r#type == Type::EOF {
        String::from("at EOF")
    } else {
        format!("at '{}'", token.lexeme)
    }
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        report(self.line, "", &self.message);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        report(self.token.location.line, &at_token(&self.token), &self.message);
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        report(self.token.location.line, &at_token(&self.token), &self.message);
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{message}\n[line {line}]", message = self.message, line = self.token.location.line);

        unsafe {
            HAD_RUNTIME_ERROR = true;
        }
    }
}

/// Represents anything that unwinds evaluation before it runs to completion.
/// A return statement is not a real error but it rides the same channel so that
/// execution stops immediately; the enclosing function call catches it and
/// surfaces the value.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
