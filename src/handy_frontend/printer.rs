use super::grammar::{Block, FunctionDef, Node, Param, Program, VarDecl};
use std::fmt::{self, Write};

/// Writes an indented, one-field-per-line dump of the tree.
struct Printer<'f, 'a> {
    out: &'f mut fmt::Formatter<'a>,
    depth: usize,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer { out: f, depth: 0 };
        printer.line("Program:")?;
        printer.nested(|p| p.nodes("statements", &self.statements))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { out: f, depth: 0 }.node(self)
    }
}

impl<'f, 'a> Printer<'f, 'a> {
    fn line(&mut self, text: &str) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str("  ")?;
        }
        self.out.write_str(text)?;
        self.out.write_char('\n')
    }

    fn nested<F>(&mut self, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn value(&mut self, name: &str, value: &str) -> fmt::Result {
        self.line(&format!("{}: {}", name, value))
    }

    fn optional(&mut self, name: &str, value: &Option<String>) -> fmt::Result {
        self.value(name, value.as_deref().unwrap_or("None"))
    }

    fn child(&mut self, name: &str, node: Option<&Node>) -> fmt::Result {
        match node {
            None => self.value(name, "None"),
            Some(node) => {
                self.line(&format!("{}:", name))?;
                self.nested(|p| p.node(node))
            }
        }
    }

    fn nodes(&mut self, name: &str, nodes: &[Node]) -> fmt::Result {
        if nodes.is_empty() {
            return self.value(name, "[]");
        }
        self.line(&format!("{}:", name))?;
        self.nested(|p| nodes.iter().try_for_each(|n| p.node(n)))
    }

    fn block(&mut self, name: &str, block: Option<&Block>) -> fmt::Result {
        match block {
            None => self.value(name, "None"),
            Some(block) => {
                self.line(&format!("{}: Block", name))?;
                self.nested(|p| p.nodes("statements", &block.statements))
            }
        }
    }

    fn params(&mut self, params: &[Param]) -> fmt::Result {
        if params.is_empty() {
            return self.value("params", "[]");
        }
        self.line("params:")?;
        self.nested(|p| params.iter().try_for_each(|param| p.param(param)))
    }

    fn param(&mut self, param: &Param) -> fmt::Result {
        self.line("Param:")?;
        self.nested(|p| {
            p.value("name", &param.name)?;
            p.optional("type", &param.type_name)?;
            p.child("default", param.default.as_deref())
        })
    }

    fn var_decl(&mut self, decl: &VarDecl) -> fmt::Result {
        self.line("VarDecl:")?;
        self.nested(|p| {
            p.value("name", &decl.name)?;
            p.optional("type", &decl.type_name)?;
            p.child("value", decl.value.as_deref())
        })
    }

    fn function_def(&mut self, def: &FunctionDef) -> fmt::Result {
        self.line("FunctionDef:")?;
        self.nested(|p| {
            p.value("name", &def.name)?;
            p.params(&def.params)?;
            p.optional("return_type", &def.return_type)?;
            p.block("body", Some(&def.body))
        })
    }

    fn node(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Program(program) => {
                self.line("Program:")?;
                self.nested(|p| p.nodes("statements", &program.statements))
            }
            Node::VarDecl(decl) => self.var_decl(decl),
            Node::ConstDecl(decl) => {
                self.line("ConstDecl:")?;
                self.nested(|p| {
                    p.value("name", &decl.name)?;
                    p.optional("type", &decl.type_name)?;
                    p.child("value", Some(&*decl.value))
                })
            }
            Node::FunctionDef(def) => self.function_def(def),
            Node::Param(param) => self.param(param),
            Node::Block(block) => {
                self.line("Block:")?;
                self.nested(|p| p.nodes("statements", &block.statements))
            }
            Node::IfStmt(stmt) => {
                self.line("IfStmt:")?;
                self.nested(|p| {
                    p.child("condition", Some(&*stmt.condition))?;
                    p.block("then_block", Some(&stmt.then_block))?;
                    p.block("else_block", stmt.else_block.as_ref())
                })
            }
            Node::ForStmt(stmt) => {
                self.line("ForStmt:")?;
                self.nested(|p| {
                    p.value("var_name", &stmt.var_name)?;
                    p.child("iterable", Some(&*stmt.iterable))?;
                    p.block("body", Some(&stmt.body))
                })
            }
            Node::MatchStmt(stmt) => {
                self.line("MatchStmt:")?;
                self.nested(|p| {
                    p.child("expr", Some(&*stmt.expr))?;
                    for (case, body) in stmt.cases.iter() {
                        p.child("case", Some(case))?;
                        p.block("then", Some(body))?;
                    }
                    p.block("else_block", stmt.else_block.as_ref())
                })
            }
            Node::FunctionCall(call) => {
                self.line("FunctionCall:")?;
                self.nested(|p| {
                    p.value("name", &call.name)?;
                    p.nodes("args", &call.args)
                })
            }
            Node::ReturnStmt(stmt) => {
                self.line("ReturnStmt:")?;
                self.nested(|p| p.child("value", stmt.value.as_deref()))
            }
            Node::RaiseStmt(stmt) => {
                self.line("RaiseStmt:")?;
                self.nested(|p| {
                    p.value("exception_type", &stmt.exception_type)?;
                    p.child("message", stmt.message.as_deref())
                })
            }
            Node::TryStmt(stmt) => {
                self.line("TryStmt:")?;
                self.nested(|p| {
                    p.block("try_block", Some(&stmt.try_block))?;
                    for (types, body) in stmt.except_blocks.iter() {
                        p.value("except", &types.join(", "))?;
                        p.block("then", Some(body))?;
                    }
                    Ok(())
                })
            }
            Node::Expression(expr) => {
                self.line("Expression:")?;
                self.nested(|p| {
                    p.child("left", Some(&*expr.left))?;
                    p.value("operator", &expr.operator)?;
                    p.child("right", Some(&*expr.right))
                })
            }
            Node::Literal(literal) => self.value("Literal", &literal.value),
            Node::Identifier(ident) => self.value("Identifier", &ident.name),
            Node::CodeBlock(code) => {
                self.line("CodeBlock:")?;
                self.nested(|p| {
                    p.params(&code.params)?;
                    p.block("body", Some(&code.body))
                })
            }
            Node::MacroDef(def) => {
                self.line("MacroDef:")?;
                self.nested(|p| {
                    p.value("name", &def.name)?;
                    p.params(&def.params)?;
                    p.block("body", Some(&def.body))
                })
            }
            Node::ComptimeDef(def) => {
                self.line("ComptimeDef:")?;
                self.nested(|p| {
                    p.value("name", &def.name)?;
                    p.params(&def.params)?;
                    p.block("body", Some(&def.body))
                })
            }
            Node::TypeDef(def) => {
                self.line("TypeDef:")?;
                self.nested(|p| {
                    p.value("name", &def.name)?;
                    p.optional("base_type", &def.base_type)?;
                    def.fields.iter().try_for_each(|field| p.var_decl(field))?;
                    def.methods.iter().try_for_each(|method| p.function_def(method))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handy_frontend::lexer::tokenize;
    use crate::handy_frontend::Parser;

    fn dump(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        Parser::new(tokens, "printer.hdy").parse().unwrap().to_string()
    }

    #[test]
    fn test_print_declarations() {
        assert_eq!(
            dump("var x: int = 1\nprint(x)"),
            "Program:\n\
             \x20 statements:\n\
             \x20   VarDecl:\n\
             \x20     name: x\n\
             \x20     type: int\n\
             \x20     value:\n\
             \x20       Literal: 1\n\
             \x20   FunctionCall:\n\
             \x20     name: print\n\
             \x20     args:\n\
             \x20       Identifier: x\n"
        );
    }

    #[test]
    fn test_print_empty_program() {
        assert_eq!(dump(""), "Program:\n  statements: []\n");
    }

    #[test]
    fn test_print_function_def() {
        let printed = dump("def f(a: int) {\n}");
        assert!(printed.contains("    FunctionDef:\n      name: f\n      params:\n        Param:\n"));
        assert!(printed.contains("      return_type: None\n      body: Block\n        statements: []\n"));
    }
}
