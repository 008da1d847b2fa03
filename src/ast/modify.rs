//! A generic, post-order AST rewriter: walks every child first, then
//! applies the modifier function to the node itself. Used by macro
//! expansion to splice `unquote(...)` results and bound parameters into
//! a quoted AST fragment.

use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};

/// Any node `modify` can rewrite. The modifier closure receives and
/// returns a `Node`; callers downcast to the variant they expect — every
/// call site in this crate only ever replaces a node with one of the same
/// kind, so the downcast always succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl Node {
    pub fn into_expression(self) -> Expression {
        match self {
            Node::Expression(e) => e,
            other => panic!("modify: expected an Expression, got {:?}", other),
        }
    }

    pub fn into_statement(self) -> Statement {
        match self {
            Node::Statement(s) => s,
            other => panic!("modify: expected a Statement, got {:?}", other),
        }
    }

    pub fn into_block(self) -> BlockStatement {
        match self.into_statement() {
            Statement::Block(b) => b,
            other => panic!("modify: expected a BlockStatement, got {:?}", other),
        }
    }

    pub fn into_identifier(self) -> Identifier {
        match self.into_expression() {
            Expression::Identifier(i) => i,
            other => panic!("modify: expected an Identifier, got {:?}", other),
        }
    }
}

/// Walks `node`'s children (if any), applying `modify` recursively, then
/// calls `f` on the (possibly rewritten) node and returns its result.
pub fn modify(node: Node, f: &mut dyn FnMut(Node) -> Node) -> Node {
    let node = match node {
        Node::Program(mut program) => {
            program.statements = program
                .statements
                .into_iter()
                .map(|s| modify(Node::Statement(s), f).into_statement())
                .collect();
            Node::Program(program)
        }

        Node::Statement(Statement::Expression(mut s)) => {
            s.expr = modify(Node::Expression(s.expr), f).into_expression();
            Node::Statement(Statement::Expression(s))
        }

        Node::Statement(Statement::Block(mut block)) => {
            block.statements = block
                .statements
                .into_iter()
                .map(|s| modify(Node::Statement(s), f).into_statement())
                .collect();
            Node::Statement(Statement::Block(block))
        }

        Node::Statement(Statement::Return(mut s)) => {
            s.value = modify(Node::Expression(s.value), f).into_expression();
            Node::Statement(Statement::Return(s))
        }

        Node::Statement(Statement::Let(mut s)) => {
            s.value = modify(Node::Expression(s.value), f).into_expression();
            Node::Statement(Statement::Let(s))
        }

        Node::Expression(Expression::Infix(mut e)) => {
            e.left = Box::new(modify(Node::Expression(*e.left), f).into_expression());
            e.right = Box::new(modify(Node::Expression(*e.right), f).into_expression());
            Node::Expression(Expression::Infix(e))
        }

        Node::Expression(Expression::Prefix(mut e)) => {
            e.right = Box::new(modify(Node::Expression(*e.right), f).into_expression());
            Node::Expression(Expression::Prefix(e))
        }

        Node::Expression(Expression::Index(mut e)) => {
            e.left = Box::new(modify(Node::Expression(*e.left), f).into_expression());
            e.index = Box::new(modify(Node::Expression(*e.index), f).into_expression());
            Node::Expression(Expression::Index(e))
        }

        Node::Expression(Expression::If(mut e)) => {
            e.condition = Box::new(modify(Node::Expression(*e.condition), f).into_expression());
            e.consequence = modify(Node::Statement(Statement::Block(e.consequence)), f).into_block();
            e.alternative = e
                .alternative
                .map(|alt| modify(Node::Statement(Statement::Block(alt)), f).into_block());
            Node::Expression(Expression::If(e))
        }

        Node::Expression(Expression::FunctionLiteral(mut e)) => {
            e.parameters = e
                .parameters
                .into_iter()
                .map(|p| modify(Node::Expression(Expression::Identifier(p)), f).into_identifier())
                .collect();
            e.body = modify(Node::Statement(Statement::Block(e.body)), f).into_block();
            Node::Expression(Expression::FunctionLiteral(e))
        }

        Node::Expression(Expression::MacroLiteral(mut e)) => {
            e.parameters = e
                .parameters
                .into_iter()
                .map(|p| modify(Node::Expression(Expression::Identifier(p)), f).into_identifier())
                .collect();
            e.body = modify(Node::Statement(Statement::Block(e.body)), f).into_block();
            Node::Expression(Expression::MacroLiteral(e))
        }

        Node::Expression(Expression::ArrayLiteral(mut e)) => {
            e.elements = e
                .elements
                .into_iter()
                .map(|el| modify(Node::Expression(el), f).into_expression())
                .collect();
            Node::Expression(Expression::ArrayLiteral(e))
        }

        Node::Expression(Expression::HashLiteral(mut e)) => {
            e.pairs = e
                .pairs
                .into_iter()
                .map(|(k, v)| {
                    let k = modify(Node::Expression(k), f).into_expression();
                    let v = modify(Node::Expression(v), f).into_expression();
                    (k, v)
                })
                .collect();
            Node::Expression(Expression::HashLiteral(e))
        }

        Node::Expression(Expression::Call(mut e)) => {
            e.function = Box::new(modify(Node::Expression(*e.function), f).into_expression());
            e.arguments = e
                .arguments
                .into_iter()
                .map(|a| modify(Node::Expression(a), f).into_expression())
                .collect();
            Node::Expression(Expression::Call(e))
        }

        // Terminal nodes with no children to walk.
        leaf @ Node::Expression(Expression::Identifier(_))
        | leaf @ Node::Expression(Expression::IntegerLiteral(_))
        | leaf @ Node::Expression(Expression::BooleanLiteral(_))
        | leaf @ Node::Expression(Expression::StringLiteral(_)) => leaf,
    };

    f(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::span::Span;
    use crate::token::{Token, TokenKind};
    use crate::common::span::Spanned;

    fn tok(kind: TokenKind, literal: &str) -> Spanned<Token> {
        Spanned::new(Token::new(kind, literal), Span::empty())
    }

    fn one() -> Expression {
        Expression::IntegerLiteral(crate::ast::IntegerLiteral { token: tok(TokenKind::Int, "1"), value: 1 })
    }

    fn two() -> Expression {
        Expression::IntegerLiteral(crate::ast::IntegerLiteral { token: tok(TokenKind::Int, "2"), value: 2 })
    }

    use crate::ast::{ExpressionStatement, InfixExpression};

    fn turn_one_into_two(node: Node) -> Node {
        match node {
            Node::Expression(Expression::IntegerLiteral(ref lit)) if lit.value == 1 => Node::Expression(two()),
            other => other,
        }
    }

    #[test]
    fn replaces_every_integer_literal() {
        let program = Program { statements: vec![Statement::Expression(ExpressionStatement {
            token: tok(TokenKind::Int, "1"),
            expr: one(),
        })] };

        let modified = modify(Node::Program(program), &mut turn_one_into_two);
        match modified {
            Node::Program(p) => match &p.statements[0] {
                Statement::Expression(s) => assert_eq!(s.expr, two()),
                _ => panic!("expected expression statement"),
            },
            _ => panic!("expected program"),
        }
    }

    #[test]
    fn walks_infix_both_sides() {
        let expr = Expression::Infix(InfixExpression {
            token: tok(TokenKind::Plus, "+"),
            left: Box::new(one()),
            operator: "+".to_string(),
            right: Box::new(one()),
        });

        let modified = modify(Node::Expression(expr), &mut turn_one_into_two).into_expression();
        match modified {
            Expression::Infix(e) => {
                assert_eq!(*e.left, two());
                assert_eq!(*e.right, two());
            }
            _ => panic!("expected infix"),
        }
    }
}
