//! Slate is a small dynamically typed scripting language with lexical scoping,
//! first-class functions and single inheritance classes. It is implemented as
//! a tree-walk interpreter with a hand-written recursive descent parser.
//!
//! ## Scanning
//! The first step is scanning: the source text is turned into a list of
//! tokens by the [`scanner`](scanner) module. The scanner is a single pass
//! over the characters of the source and always terminates, even on malformed
//! input. Trivial problems like an unterminated string or an unexpected
//! character are reported as a [`ScanError`](error::ScanError) and scanning
//! keeps going so the user sees every lexical error at once.
//!
//! ## Parsing
//! The second step is parsing. The [`parser`](parser) module transforms the
//! token list into [`expressions`](expr::Expr), which produce a value when
//! evaluated, and [`statements`](stmt::Stmt), which perform some effect. On a
//! syntax error the parser reports a [`ParseError`](error::ParseError),
//! synchronizes to the next statement boundary and keeps parsing.
//!
//! ## Resolving
//! The third step is a static pass over the finished tree. The
//! [`resolver`](resolver) module walks every scope, records how many
//! environments up each variable occurrence lives, and rejects code that is
//! syntactically fine but semantically wrong, like `return` at the top level
//! or a class that inherits from itself. These are reported as a
//! [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The last step is the [`interpreter`](interpreter) module, which walks the
//! tree and evaluates it against a chain of [`environments`](environment).
//! Errors that can only be caught at runtime, like adding a string to a
//! number or calling something that is not callable, unwind the current
//! program unit as a [`RuntimeError`](error::RuntimeError).
//!
//! Any scan, parse or resolve error stops the pipeline before the program
//! runs; in file mode that exits with code 65, a runtime error with code 70.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

#[allow(non_camel_case_types)]
pub struct slate<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> slate<'a> {
    /// Creates a new instance of the language. Print statements write to the
    /// given output so callers can capture them.
    pub fn new(output: &'a mut dyn Write) -> Self {
        slate {
            interpreter: Interpreter::new(output),
        }
    }

    /// Runs a script from a file and exits the process on errors.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if error::did_runtime_error() {
            process::exit(70);
        }
        if error::did_error() {
            process::exit(65);
        }
    }

    /// Runs an interactive prompt until end of input. Globals persist between
    /// lines and a line ending with a space continues on the next line.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("prompt to be available");

        let history = home::home_dir().map(|dir| dir.join(".slate_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        let mut code = String::new();

        loop {
            let prompt = if code.is_empty() { "> " } else { "| " };

            match editor.readline(prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    code.push_str(&line);
                    code.push('\n');

                    // A trailing space asks for a continuation line.
                    if line.ends_with(' ') {
                        continue;
                    }

                    self.run(&code);

                    code.clear();
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) => {
                    code.clear();
                },
                Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs a unit of source code through the pipeline. Each stage only runs
    /// if the previous ones finished without reporting an error.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
