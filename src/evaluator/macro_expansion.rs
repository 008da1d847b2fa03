//! The two-phase macro preprocessor run over a `Program` before it's
//! handed to `eval_program`: `define_macros` strips `let name =
//! macro(...) { ... }` statements out of the top-level program and binds
//! them as `Macro` objects; `expand_macros` then rewrites every call to
//! one of those names into the AST its body produces.

use std::rc::Rc;

use crate::ast::modify::{modify, Node};
use crate::ast::{Expression, LetStatement, MacroLiteral, Program, Statement};
use crate::object::environment::Environment;
use crate::object::{MacroObject, Object};

/// Removes every top-level `let name = macro(...) { ... };` from
/// `program`, defining `name` as a `Macro` in `env` as it goes. Indices
/// are collected first and removed in reverse so that earlier removals
/// don't shift the indices of later ones.
pub fn define_macros(program: &mut Program, env: &Rc<Environment>) {
    let mut macro_indices = Vec::new();

    for (i, statement) in program.statements.iter().enumerate() {
        if let Some((name, literal)) = as_macro_definition(statement) {
            let macro_obj = MacroObject {
                parameters: literal.parameters.clone(),
                body: literal.body.clone(),
                env: Rc::clone(env),
            };
            env.set(&name, Object::Macro(macro_obj));
            macro_indices.push(i);
        }
    }

    for &index in macro_indices.iter().rev() {
        program.statements.remove(index);
    }
}

fn as_macro_definition(statement: &Statement) -> Option<(String, &MacroLiteral)> {
    let let_stmt: &LetStatement = match statement {
        Statement::Let(s) => s,
        _ => return None,
    };
    match &let_stmt.value {
        Expression::MacroLiteral(literal) => Some((let_stmt.name.value.clone(), literal)),
        _ => None,
    }
}

/// Walks `program` post-order; at every `CallExpression` whose callee
/// resolves in `env` to a `Macro`, evaluates the macro body against an
/// environment binding each parameter to a `Quote` of the (unevaluated)
/// argument AST, and splices the resulting `Quote`'s AST into the call
/// site.
pub fn expand_macros(program: Program, env: &Rc<Environment>) -> Program {
    match modify(Node::Program(program), &mut |node| expand_node(node, env)) {
        Node::Program(program) => program,
        _ => unreachable!("modify(Node::Program(_)) always returns a Node::Program"),
    }
}

fn expand_node(node: Node, env: &Rc<Environment>) -> Node {
    let expr = match node {
        Node::Expression(e) => e,
        other => return other,
    };

    let call = match expr {
        Expression::Call(call) => call,
        other => return Node::Expression(other),
    };

    let macro_obj = match call.function.as_ref() {
        Expression::Identifier(ident) => env.get(&ident.value).and_then(|obj| match obj {
            Object::Macro(m) => Some(m),
            _ => None,
        }),
        _ => None,
    };

    let macro_obj = match macro_obj {
        Some(m) => m,
        None => return Node::Expression(Expression::Call(call)),
    };

    let eval_env = Environment::enclosed(&macro_obj.env);
    for (param, arg) in macro_obj.parameters.iter().zip(call.arguments) {
        eval_env.set(&param.value, Object::Quote(arg));
    }

    let evaluated = super::eval_block_statement(&macro_obj.body, &eval_env);
    match evaluated {
        Object::Quote(node) => Node::Expression(node),
        other => panic!("macro body must evaluate to a Quote, got {}", other.type_tag()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::source::Source;
    use crate::evaluator::eval_program;
    use crate::object::Object;
    use crate::parser::Parser;

    fn run(input: &str) -> Object {
        let mut parser = Parser::new(Source::source(input));
        let mut program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());

        let macro_env = Environment::new();
        define_macros(&mut program, &macro_env);
        let expanded = expand_macros(program, &macro_env);

        let eval_env = Environment::new();
        eval_program(&expanded, &eval_env)
    }

    #[test]
    fn macro_without_unquote() {
        assert_eq!(run("let infixExpression = macro() { quote(1 + 2); }; infixExpression();"), Object::Integer(3));
    }

    #[test]
    fn macro_with_unquote_reverses_subtraction() {
        assert_eq!(
            run("let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); }; reverse(2 + 2, 10 - 5);"),
            Object::Integer(1)
        );
    }

    #[test]
    fn macro_definition_is_removed_from_the_program() {
        let mut parser = Parser::new(Source::source("let m = macro(x) { quote(unquote(x)); }; 5;"));
        let mut program = parser.parse_program();
        let env = Environment::new();

        define_macros(&mut program, &env);

        assert_eq!(program.statements.len(), 1);
        assert!(env.get("m").is_some());
    }
}
