use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, TernaryData, ThisData, UnaryData, VariableData,
};
use crate::class::Class;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Returns the runtime error for a non-numeric operand pair.
fn numbers_error(operator: &Token) -> Unwind {
    RuntimeError {
        token: operator.clone(),
        message: "Operands must be numbers".to_string(),
    }.into()
}

/// Evaluates statements by walking the tree. Holds the chain of environments,
/// the globals at its root and the variable distances the resolver computed.
/// Print output goes to the supplied writer so callers can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Executes the statements in order. A runtime error is reported once and
    /// stops the rest of the program.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.throw(),
                    Unwind::Return(_) => unreachable!("return outside of a function passed resolution"),
                }
                return;
            }
        }
    }

    /// Records the scope distance of a variable occurrence.
    /// Called by the resolver before execution starts.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    /// Executes statements inside the given environment, restoring the
    /// previous one on every exit path including unwinds.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        expr.accept(self)
    }

    /// Looks up a variable at the resolved distance, or in the globals when
    /// the resolver left no entry.
    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(distance) = self.locals.get(name) {
            self.environment.borrow().get_at(*distance, name)
        } else {
            self.globals.borrow().get(name)
        }
    }
}

impl<'a> ExprVisitor<Result<Object, Unwind>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, Unwind> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> Result<Object, Unwind> {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> Result<Object, Unwind> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number".to_string(),
            }.into()),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> Result<Object, Unwind> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let operator = &binary.operator;
        match operator.r#type {
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }.into()),
            Type::Minus => (left - right).ok_or_else(|| numbers_error(operator)),
            Type::Star => (left * right).ok_or_else(|| numbers_error(operator)),
            Type::Slash => (left / right).ok_or_else(|| numbers_error(operator)),
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let Some(ordering) = left.partial_cmp(&right) else {
                    return Err(numbers_error(operator));
                };

                Ok(Object::from(match operator.r#type {
                    Type::Greater => ordering.is_gt(),
                    Type::GreaterEqual => ordering.is_ge(),
                    Type::Less => ordering.is_lt(),
                    Type::LessEqual => ordering.is_le(),
                    _ => unreachable!(),
                }))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> Result<Object, Unwind> {
        let left = self.evaluate(&logical.left)?;

        // Short-circuits to the operand value itself, not a coerced boolean.
        if logical.operator.r#type == Type::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&logical.right)
    }

    fn visit_ternary_expr(&mut self, ternary: &TernaryData) -> Result<Object, Unwind> {
        let condition = self.evaluate(&ternary.condition)?;

        if condition.is_truthy() {
            self.evaluate(&ternary.then_branch)
        } else {
            self.evaluate(&ternary.else_branch)
        }
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(&variable.name)?)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> Result<Object, Unwind> {
        let value = self.evaluate(&assign.value)?;

        if let Some(distance) = self.locals.get(&assign.name) {
            self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
        } else {
            self.globals.borrow_mut().assign(&assign.name, value.clone())?;
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> Result<Object, Unwind> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::new();
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(native) => native.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Non-callable called".to_string(),
                }.into());
            },
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {arity} arguments but got {}", arguments.len()),
            }.into());
        }

        match &callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(native) => native.call(self, arguments),
            Object::Class(class) => class.borrow().call(self, arguments),
            _ => unreachable!(),
        }
    }

    fn visit_get_expr(&mut self, get: &GetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => Ok(instance.borrow().get(&get.name, &object)?),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields".to_string(),
            }.into());
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(&this.keyword)?)
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> Result<Object, Unwind> {
        let distance = *self.locals.get(&super_expr.keyword)
            .expect("'super' to be resolved before evaluation");

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword)?;
        let Object::Class(superclass) = superclass else { unreachable!() };

        // The instance is always bound one environment closer than 'super'.
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let method = superclass.borrow().find_method(&super_expr.method.lexeme);
        match method {
            Some(method) => Ok(Object::from(method.bind(object))),
            None => Err(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'", super_expr.method.lexeme),
            }.into()),
        }
    }
}

impl<'a> StmtVisitor<Result<(), Unwind>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        writeln!(self.output, "{value}").expect("output stream to be writable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)?;
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function {
            name: data.name.clone(),
            params: data.params.clone(),
            body: data.body.clone(),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(class) => Some(class),
                _ => {
                    return Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Superclass must be a class".to_string(),
                    }.into());
                },
            },
            None => None,
        };

        // The class name is visible (as nil) while the methods are built so
        // they can refer to the class itself.
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        if let Some(superclass) = &superclass {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::from(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
        }

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            methods.insert(function.name.lexeme.clone(), Function {
                name: function.name.clone(),
                params: function.params.clone(),
                body: function.body.clone(),
                closure: Rc::clone(&self.environment),
                is_initializer: function.name.lexeme == "init",
            });
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if class.superclass.is_some() {
            let enclosing = self.environment.borrow().enclosing.clone()
                .expect("enclosing environment to exist around a class body");
            self.environment = enclosing;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(Rc::new(RefCell::new(class))))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::Location;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(1, 0))
    }

    fn number(value: f64) -> Expr {
        Expr::Literal(Literal::Number(value))
    }

    fn string(value: &str) -> Expr {
        Expr::Literal(Literal::from(value))
    }

    fn binary(left: Expr, r#type: Type, lexeme: &str, right: Expr) -> Expr {
        Expr::Binary(BinaryData {
            left: Box::new(left),
            operator: token(r#type, lexeme),
            right: Box::new(right),
        })
    }

    fn evaluate(expr: &Expr) -> Result<Object, Unwind> {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.evaluate(expr)
    }

    #[test]
    fn evaluate_literal() {
        assert_eq!(evaluate(&number(12.0)).unwrap(), Object::from(12.0));
        assert_eq!(
            evaluate(&Expr::Literal(Literal::Nil)).unwrap(),
            Object::from(Literal::Nil)
        );
    }

    #[test]
    fn evaluate_grouping() {
        let expr = Expr::Grouping(GroupingData { expr: Box::new(number(12.0)) });
        assert_eq!(evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary_minus() {
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(number(12.0)),
        });
        assert_eq!(evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_unary_minus_requires_number() {
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(string("nope")),
        });

        match evaluate(&expr) {
            Err(Unwind::Error(error)) => assert_eq!(error.message, "Operand must be a number"),
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_bang_uses_truthiness() {
        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Bang, "!"),
            expr: Box::new(Expr::Literal(Literal::Nil)),
        });
        assert_eq!(evaluate(&expr).unwrap(), Object::from(true));

        let expr = Expr::Unary(UnaryData {
            operator: token(Type::Bang, "!"),
            expr: Box::new(number(0.0)),
        });
        assert_eq!(evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_arithmetic() {
        assert_eq!(
            evaluate(&binary(number(6.0), Type::Minus, "-", number(2.0))).unwrap(),
            Object::from(4.0)
        );
        assert_eq!(
            evaluate(&binary(number(6.0), Type::Star, "*", number(2.0))).unwrap(),
            Object::from(12.0)
        );
        assert_eq!(
            evaluate(&binary(number(6.0), Type::Slash, "/", number(2.0))).unwrap(),
            Object::from(3.0)
        );
    }

    #[test]
    fn evaluate_string_concatenation() {
        assert_eq!(
            evaluate(&binary(string("Hello"), Type::Plus, "+", string("World"))).unwrap(),
            Object::from("HelloWorld")
        );
    }

    #[test]
    fn evaluate_mixed_addition_fails() {
        match evaluate(&binary(string("Hello"), Type::Plus, "+", number(12.0))) {
            Err(Unwind::Error(error)) => {
                assert_eq!(error.message, "Operands must be two numbers or two strings.");
            },
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_comparisons() {
        assert_eq!(
            evaluate(&binary(number(1.0), Type::Less, "<", number(2.0))).unwrap(),
            Object::from(true)
        );
        assert_eq!(
            evaluate(&binary(number(1.0), Type::GreaterEqual, ">=", number(2.0))).unwrap(),
            Object::from(false)
        );
        assert!(evaluate(&binary(string("a"), Type::Less, "<", string("b"))).is_err());
    }

    #[test]
    fn evaluate_equality_is_structural_and_total() {
        assert_eq!(
            evaluate(&binary(number(12.0), Type::EqualEqual, "==", number(12.0))).unwrap(),
            Object::from(true)
        );
        assert_eq!(
            evaluate(&binary(
                Expr::Literal(Literal::Nil),
                Type::EqualEqual,
                "==",
                Expr::Literal(Literal::Nil),
            )).unwrap(),
            Object::from(true)
        );
        // No coercion across types.
        assert_eq!(
            evaluate(&binary(number(1.0), Type::EqualEqual, "==", string("1"))).unwrap(),
            Object::from(false)
        );
    }

    #[test]
    fn evaluate_logical_returns_operand_values() {
        let or = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::Or, "or"),
            right: Box::new(string("fallback")),
        });
        assert_eq!(evaluate(&or).unwrap(), Object::from("fallback"));

        let and = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::And, "and"),
            right: Box::new(string("unreached")),
        });
        assert_eq!(evaluate(&and).unwrap(), Object::from(Literal::Nil));
    }

    #[test]
    fn evaluate_ternary_skips_untaken_branch() {
        // The untaken branch would fail at runtime if it were evaluated.
        let expr = Expr::Ternary(TernaryData {
            operator: token(Type::Question, "?"),
            condition: Box::new(Expr::Literal(Literal::Bool(true))),
            then_branch: Box::new(number(1.0)),
            else_branch: Box::new(binary(string("a"), Type::Minus, "-", number(1.0))),
        });
        assert_eq!(evaluate(&expr).unwrap(), Object::from(1.0));
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let expr = Expr::Variable(VariableData { name: token(Type::Identifier, "missing") });

        match evaluate(&expr) {
            Err(Unwind::Error(error)) => {
                assert_eq!(error.message, "Undefined variable 'missing'");
            },
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn globals_are_seeded_with_natives() {
        let mut output = Vec::new();
        let interpreter = Interpreter::new(&mut output);

        let clock = interpreter.globals.borrow().get(&Token::from("clock")).unwrap();
        assert_eq!(clock.to_string(), "<native fn>");
    }
}
