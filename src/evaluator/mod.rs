//! The tree-walking evaluator: `Program`/`Statement`/`Expression` × an
//! `Environment` in, an `Object` out. Total over the whole AST — every
//! variant has an arm — with the short-circuit rule from the spec: the
//! moment a sub-evaluation produces `Error`, that `Error` is returned
//! immediately without touching siblings.

pub mod builtins;
pub mod macro_expansion;
pub mod quote_unquote;

use std::rc::Rc;

use crate::ast::{
    BlockStatement, CallExpression, Expression, HashLiteral, Identifier, IfExpression, IndexExpression,
    InfixExpression, PrefixExpression, Program, Statement,
};
use crate::object::environment::Environment;
use crate::object::{FunctionObject, HashKey, MacroObject, Object};

/// Evaluates a whole program: statements run in order, the last value
/// wins, an `Error` stops everything, and a top-level `return` is
/// unwrapped exactly once (there's no further function boundary to tunnel
/// through).
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

/// Evaluates a block's statements in order. Unlike `eval_program`, a
/// `ReturnValue` is left wrapped so it keeps tunnelling outward through
/// nested blocks (`if` inside `if` inside a function body) until
/// `apply_function` unwraps it exactly once at the call boundary.
pub(crate) fn eval_block_statement(block: &BlockStatement, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Object {
    match statement {
        Statement::Let(s) => {
            let value = eval_expression(&s.value, env);
            if value.is_error() {
                return value;
            }
            env.set(&s.name.value, value);
            Object::Null
        }
        Statement::Return(s) => {
            let value = eval_expression(&s.value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression(s) => eval_expression(&s.expr, env),
        Statement::Block(b) => eval_block_statement(b, env),
    }
}

pub(crate) fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Object {
    match expr {
        Expression::IntegerLiteral(lit) => Object::Integer(lit.value),
        Expression::BooleanLiteral(lit) => Object::Boolean(lit.value),
        Expression::StringLiteral(lit) => Object::String(lit.value.clone()),
        Expression::Identifier(ident) => eval_identifier(ident, env),
        Expression::Prefix(e) => eval_prefix_expression(e, env),
        Expression::Infix(e) => eval_infix_expression(e, env),
        Expression::If(e) => eval_if_expression(e, env),
        Expression::FunctionLiteral(e) => Object::Function(FunctionObject {
            parameters: e.parameters.clone(),
            body: e.body.clone(),
            env: Rc::clone(env),
        }),
        Expression::MacroLiteral(e) => Object::Macro(MacroObject {
            parameters: e.parameters.clone(),
            body: e.body.clone(),
            env: Rc::clone(env),
        }),
        Expression::Call(e) => eval_call_expression(e, env),
        Expression::ArrayLiteral(e) => match eval_expressions(&e.elements, env) {
            Ok(elements) => Object::Array(elements),
            Err(error) => error,
        },
        Expression::Index(e) => eval_index_expression(e, env),
        Expression::HashLiteral(e) => eval_hash_literal(e, env),
    }
}

fn eval_identifier(ident: &Identifier, env: &Rc<Environment>) -> Object {
    if let Some(value) = env.get(&ident.value) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(&ident.value) {
        return Object::Builtin(builtin);
    }
    Object::Error(format!("identifier not found: {}", ident.value))
}

fn eval_prefix_expression(expr: &PrefixExpression, env: &Rc<Environment>) -> Object {
    let right = eval_expression(&expr.right, env);
    if right.is_error() {
        return right;
    }

    match expr.operator.as_str() {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("unknown operator: -{}", other.type_tag())),
        },
        other => Object::Error(format!("unknown operator: {}{}", other, right.type_tag())),
    }
}

fn eval_infix_expression(expr: &InfixExpression, env: &Rc<Environment>) -> Object {
    let left = eval_expression(&expr.left, env);
    if left.is_error() {
        return left;
    }
    let right = eval_expression(&expr.right, env);
    if right.is_error() {
        return right;
    }

    let op = expr.operator.as_str();

    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix(op, l, r),
        _ if op == "==" => Object::Boolean(left == right),
        _ if op == "!=" => Object::Boolean(left != right),
        _ if left.type_tag() != right.type_tag() => {
            Object::Error(format!("type mismatch: {} {} {}", left.type_tag(), op, right.type_tag()))
        }
        _ => Object::Error(format!("unknown operator: {} {} {}", left.type_tag(), op, right.type_tag())),
    }
}

fn eval_integer_infix(op: &str, left: i64, right: i64) -> Object {
    match op {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left / right)
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        other => Object::Error(format!("unknown operator: INTEGER {} INTEGER", other)),
    }
}

fn eval_string_infix(op: &str, left: &str, right: &str) -> Object {
    match op {
        "+" => Object::String(format!("{}{}", left, right)),
        other => Object::Error(format!("unknown operator: STRING {} STRING", other)),
    }
}

fn eval_if_expression(expr: &IfExpression, env: &Rc<Environment>) -> Object {
    let condition = eval_expression(&expr.condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(&expr.consequence, env)
    } else if let Some(alternative) = &expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Object::Null
    }
}

/// Evaluates a list of expressions left to right (call arguments, array
/// elements). Returns `Err` with just the offending `Error` the instant
/// one shows up, matching the short-circuit rule.
fn eval_expressions(exprs: &[Expression], env: &Rc<Environment>) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let evaluated = eval_expression(expr, env);
        if evaluated.is_error() {
            return Err(evaluated);
        }
        result.push(evaluated);
    }
    Ok(result)
}

fn eval_call_expression(expr: &CallExpression, env: &Rc<Environment>) -> Object {
    if let Expression::Identifier(ident) = expr.function.as_ref() {
        if ident.value == "quote" {
            return match expr.arguments.first() {
                Some(arg) if expr.arguments.len() == 1 => quote_unquote::quote(arg.clone(), env),
                _ => Object::Error(format!(
                    "wrong number of arguments. got={}, want=1",
                    expr.arguments.len()
                )),
            };
        }
    }

    let function = eval_expression(&expr.function, env);
    if function.is_error() {
        return function;
    }

    let args = match eval_expressions(&expr.arguments, env) {
        Ok(args) => args,
        Err(error) => return error,
    };

    apply_function(function, args)
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if args.len() != func.parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    func.parameters.len()
                ));
            }

            let call_env = Environment::enclosed(&func.env);
            for (param, arg) in func.parameters.iter().zip(args) {
                call_env.set(&param.value, arg);
            }

            let evaluated = eval_block_statement(&func.body, &call_env);
            unwrap_return_value(evaluated)
        }
        Object::Builtin(builtin) => builtin(&args),
        other => Object::Error(format!("not a function: {}", other.type_tag())),
    }
}

fn unwrap_return_value(obj: Object) -> Object {
    match obj {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn eval_index_expression(expr: &IndexExpression, env: &Rc<Environment>) -> Object {
    let left = eval_expression(&expr.left, env);
    if left.is_error() {
        return left;
    }
    let index = eval_expression(&expr.index, env);
    if index.is_error() {
        return index;
    }

    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Object::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Object::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => pairs
                .iter()
                .find(|(k, _, _)| *k == hash_key)
                .map(|(_, _, v)| v.clone())
                .unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", key.type_tag())),
        },
        _ => Object::Error(format!("index operator not supported: {}", left.type_tag())),
    }
}

fn eval_hash_literal(expr: &HashLiteral, env: &Rc<Environment>) -> Object {
    let mut pairs: Vec<(HashKey, Object, Object)> = Vec::with_capacity(expr.pairs.len());

    for (key_expr, value_expr) in &expr.pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => return Object::Error(format!("unusable as hash key: {}", key.type_tag())),
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        pairs.retain(|(k, _, _)| *k != hash_key);
        pairs.push((hash_key, key, value));
    }

    Object::Hash(pairs)
}
