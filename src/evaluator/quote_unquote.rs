//! `quote`/`unquote`: the evaluator special-cases a call to `quote` so
//! its argument is never evaluated, only rewritten to splice in the
//! result of any nested `unquote(...)` calls.

use std::rc::Rc;

use crate::ast::modify::{modify, Node};
use crate::ast::{BooleanLiteral, Expression, IntegerLiteral};
use crate::common::span::Spanned;
use crate::object::environment::Environment;
use crate::object::Object;
use crate::token::{Token, TokenKind};

/// `quote(expr)`: does not evaluate `expr`. First replaces every
/// `unquote(inner)` call inside it with the AST obtained from evaluating
/// `inner` in `env`, then wraps the result in `Object::Quote`.
pub fn quote(expr: Expression, env: &Rc<Environment>) -> Object {
    let expanded = modify(Node::Expression(expr), &mut |node| eval_unquote_calls(node, env)).into_expression();
    Object::Quote(expanded)
}

fn eval_unquote_calls(node: Node, env: &Rc<Environment>) -> Node {
    let expr = match node {
        Node::Expression(e) => e,
        other => return other,
    };

    let call = match &expr {
        Expression::Call(call) => call,
        _ => return Node::Expression(expr),
    };

    let is_unquote = matches!(&*call.function, Expression::Identifier(ident) if ident.value == "unquote");
    if !is_unquote || call.arguments.len() != 1 {
        return Node::Expression(expr);
    }

    let argument = match expr {
        Expression::Call(call) => call.arguments.into_iter().next().unwrap(),
        _ => unreachable!(),
    };

    let evaluated = super::eval_expression(&argument, env);
    Node::Expression(object_to_ast(evaluated))
}

/// Converts an evaluated `Object` back into an AST fragment to splice
/// into a quoted expression.
fn object_to_ast(obj: Object) -> Expression {
    match obj {
        Object::Integer(n) => Expression::IntegerLiteral(IntegerLiteral {
            token: Spanned::new(Token::new(TokenKind::Int, n.to_string()), crate::common::span::Span::empty()),
            value: n,
        }),
        Object::Boolean(b) => Expression::BooleanLiteral(BooleanLiteral {
            token: Spanned::new(
                Token::new(if b { TokenKind::True } else { TokenKind::False }, if b { "true" } else { "false" }),
                crate::common::span::Span::empty(),
            ),
            value: b,
        }),
        Object::Quote(node) => node,
        // Other object kinds have no AST representation; fall back to an
        // empty quote rather than panicking.
        _ => Expression::BooleanLiteral(BooleanLiteral {
            token: Spanned::new(Token::new(TokenKind::False, "false"), crate::common::span::Span::empty()),
            value: false,
        }),
    }
}
