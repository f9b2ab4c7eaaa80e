use super::environment::Environment;
use super::errors::{RuntimeError, RuntimeResult};
use super::value::Value;
use crate::handy_frontend::grammar::{ConstDecl, FunctionCall, Node, Program, VarDecl};

use std::io::{self, Write};

/// Zero values for declarations that carry a type but no initializer.
fn default_value(type_name: &str) -> Option<Value> {
    let value = match type_name {
        "int" => Value::Int(0),
        "float" => Value::Float(0.0),
        "string" => Value::Str(String::new()),
        _ => return None,
    };
    Some(value)
}

/// Converts a literal's source spelling into a value.
fn parse_literal(text: &str) -> RuntimeResult<Value> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(Value::Str(text[1..text.len() - 1].to_owned()));
    }

    let value = if text.contains('.') {
        text.parse().map(Value::Float).ok()
    } else {
        text.parse().map(Value::Int).ok()
    };
    value.ok_or_else(|| RuntimeError::InvalidLiteral(text.to_owned()))
}

pub struct Interpreter<W: Write> {
    env: Environment,
    output: W,
}

impl Interpreter<io::Stdout> {
    /// Creates an interpreter that prints to standard output.
    pub fn new(env: Environment) -> Self {
        Interpreter::with_output(env, io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(env: Environment, output: W) -> Self {
        Interpreter { env, output }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Evaluates top-level statements in order, stopping at the first
    /// failure. Bindings and output produced before it are kept.
    pub fn run(&mut self, program: &Program) -> RuntimeResult<()> {
        for stmt in program.statements.iter() {
            tracing::trace!(kind = stmt.kind_name(), "eval statement");
            self.eval(stmt)?;
        }
        self.output.flush()?;
        Ok(())
    }

    pub fn eval(&mut self, node: &Node) -> RuntimeResult<Option<Value>> {
        match node {
            Node::VarDecl(decl) => self.eval_var_decl(decl)?,
            Node::ConstDecl(decl) => self.eval_const_decl(decl)?,
            Node::FunctionCall(call) => self.eval_function_call(call)?,
            Node::Literal(_) | Node::Identifier(_) => return self.eval_expression(node).map(Some),
            Node::Program(_)
            | Node::FunctionDef(_)
            | Node::Param(_)
            | Node::Block(_)
            | Node::IfStmt(_)
            | Node::ForStmt(_)
            | Node::MatchStmt(_)
            | Node::ReturnStmt(_)
            | Node::RaiseStmt(_)
            | Node::TryStmt(_)
            | Node::Expression(_)
            | Node::CodeBlock(_)
            | Node::MacroDef(_)
            | Node::ComptimeDef(_)
            | Node::TypeDef(_) => {
                return Err(RuntimeError::UnsupportedConstruct(node.kind_name().to_owned()))
            }
        }

        Ok(None)
    }

    /// Evaluates a node that must produce a value.
    fn eval_expression(&mut self, node: &Node) -> RuntimeResult<Value> {
        match node {
            Node::Literal(literal) => parse_literal(&literal.value),
            Node::Identifier(ident) => self.env.get_var(&ident.name),
            other => Err(RuntimeError::UnsupportedConstruct(other.kind_name().to_owned())),
        }
    }

    fn eval_var_decl(&mut self, decl: &VarDecl) -> RuntimeResult<()> {
        let value = match (&decl.value, &decl.type_name) {
            (Some(init), _) => self.eval_expression(init)?,
            (None, Some(type_name)) => default_value(type_name)
                .ok_or_else(|| RuntimeError::NoDefaultValue(type_name.clone()))?,
            (None, None) => return Err(RuntimeError::UntypedDeclaration(decl.name.clone())),
        };

        self.env.set_var(decl.name.clone(), value);
        Ok(())
    }

    fn eval_const_decl(&mut self, decl: &ConstDecl) -> RuntimeResult<()> {
        let value = self.eval_expression(&decl.value)?;
        self.env.set_const(decl.name.clone(), value)
    }

    fn eval_function_call(&mut self, call: &FunctionCall) -> RuntimeResult<()> {
        if call.name != "print" {
            return Err(RuntimeError::UnsupportedConstruct(format!(
                "function '{}'",
                call.name
            )));
        }

        for arg in call.args.iter() {
            let value = self.eval_expression(arg)?;
            writeln!(self.output, "{}", value)?;
        }
        Ok(())
    }
}
