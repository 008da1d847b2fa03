//! Property-based tests for the invariants/laws spec.md §8 calls out:
//! parser round-trip, the hash-key law, the error short-circuit rule,
//! and `rest`/`push` purity. `proptest` and `proptest_derive` are the
//! one non-std dependency the teacher itself carries end-to-end
//! specifically for this kind of test.

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use monkey::common::source::Source;
use monkey::evaluator::{builtins, eval_program};
use monkey::object::environment::Environment;
use monkey::object::Object;
use monkey::parser::Parser;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
        }
    }
}

/// Generates fully-parenthesised arithmetic expression source, e.g.
/// `"((1 + 2) * 3)"`. Because every level is already parenthesised, the
/// canonical pretty-printer's output is expected to be byte-identical
/// to the input, not just equivalent modulo redundant parens.
fn arith_source() -> impl Strategy<Value = String> {
    let leaf = (0i64..1000).prop_map(|n| n.to_string());
    leaf.prop_recursive(4, 64, 4, |inner| {
        (inner.clone(), any::<Op>(), inner)
            .prop_map(|(l, op, r)| format!("({} {} {})", l, op.symbol(), r))
    })
}

fn parse(input: &str) -> (monkey::ast::Program, Vec<String>) {
    let mut parser = Parser::new(Source::source(input));
    let program = parser.parse_program();
    (program, parser.errors())
}

proptest! {
    /// *Parser round-trip*: for a program with no parse errors,
    /// re-parsing `program.to_string()` yields an AST whose `to_string()`
    /// matches the original.
    #[test]
    fn parser_round_trip(source in arith_source()) {
        let (program, errors) = parse(&source);
        prop_assert!(errors.is_empty(), "unexpected parse errors for {:?}: {:?}", source, errors);

        let printed = program.to_string();
        let (reparsed, errors) = parse(&printed);
        prop_assert!(errors.is_empty(), "reparse errors for {:?}: {:?}", printed, errors);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    /// *Hash-key law*: two hashable values produce equal `HashKey`s iff
    /// they're equal in both value and type.
    #[test]
    fn hash_key_law_for_integers(a in any::<i64>(), b in any::<i64>()) {
        let ka = Object::Integer(a).hash_key();
        let kb = Object::Integer(b).hash_key();
        prop_assert_eq!(a == b, ka == kb);
    }

    #[test]
    fn hash_key_law_for_strings(a in ".*", b in ".*") {
        let ka = Object::String(a.clone()).hash_key();
        let kb = Object::String(b.clone()).hash_key();
        prop_assert_eq!(a == b, ka == kb);
    }

    #[test]
    fn hash_key_never_collides_across_types(n in any::<i64>()) {
        let int_key = Object::Integer(n).hash_key();
        let bool_key = Object::Boolean(n != 0).hash_key();
        prop_assert_ne!(int_key, bool_key);
    }

    /// *Built-in purity*: `rest`/`push` never mutate their input array,
    /// regardless of contents.
    #[test]
    fn rest_and_push_never_mutate_input(elements in prop::collection::vec(any::<i64>(), 0..20), extra in any::<i64>()) {
        let original = Object::Array(elements.iter().copied().map(Object::Integer).collect());

        let rest_fn = builtins::lookup("rest").expect("rest is a builtin");
        let push_fn = builtins::lookup("push").expect("push is a builtin");

        let _ = rest_fn(std::slice::from_ref(&original));
        let _ = push_fn(&[original.clone(), Object::Integer(extra)]);

        prop_assert_eq!(&original, &Object::Array(elements.into_iter().map(Object::Integer).collect()));
    }

    /// *Error short-circuit*: embedding a type-mismatch sub-expression
    /// anywhere inside a larger arithmetic expression makes the whole
    /// expression evaluate to that exact `Error`, regardless of what
    /// surrounds it.
    #[test]
    fn error_short_circuits_regardless_of_surrounding_expression(n in 0i64..1000) {
        let source = format!("{} + (true + 1)", n);
        let env = Environment::new();
        let (program, errors) = parse(&source);
        prop_assert!(errors.is_empty());

        let result = eval_program(&program, &env);
        prop_assert_eq!(result, Object::Error("type mismatch: BOOLEAN + INTEGER".to_string()));
    }
}
