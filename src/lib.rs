//! # Monkey
//! This crate is a tree-walking interpreter for Monkey, a small
//! dynamically-typed, expression-oriented scripting language.
//!
//! ## Running Monkey
//! The `monkey` binary is a REPL:
//! ```bash
//! $ cargo run --bin monkey
//! >> let add = fn(a, b) { a + b }; add(1, 2);
//! 3
//! ```
//!
//! ## Embedding Monkey in Rust
//! ```
//! use std::rc::Rc;
//! use monkey::common::source::Source;
//! use monkey::object::environment::Environment;
//! use monkey::parser::Parser;
//! use monkey::evaluator::eval_program;
//!
//! let source = Source::source("let x = 5; x * 2;");
//! let mut parser = Parser::new(source);
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//!
//! let env = Environment::new();
//! let result = eval_program(&program, &env);
//! assert_eq!(result.inspect(), "10");
//! ```
//!
//! ## Overview of the pipeline
//! Source text is represented as a [`common::source::Source`]: a
//! reference-counted path + contents pair. Regions of source are
//! referred to with a [`common::span::Span`], like a `&str` but carrying
//! a reference to the `Source` rather than the text itself, used to
//! point diagnostics at the offending code.
//!
//! [`lexer::Lexer`] turns a `Source` into a stream of `Spanned<Token>`s,
//! one token of lookahead at a time. [`parser::Parser`] is a Pratt
//! (precedence-climbing) parser that consumes that stream and produces
//! an [`ast::Program`], accumulating diagnostics in its `errors()` list
//! rather than aborting on the first syntax mistake.
//!
//! Before evaluation, [`evaluator::macro_expansion::define_macros`] and
//! [`evaluator::macro_expansion::expand_macros`] give Monkey's
//! `quote`/`unquote`/`macro` facility a chance to rewrite the AST.
//! [`evaluator::eval_program`] then walks the (possibly macro-expanded)
//! tree against an [`object::environment::Environment`], producing an
//! [`object::Object`] or a runtime `Object::Error`.
//!
//! Parse diagnostics and runtime errors are two disjoint surfaces: a
//! syntax mistake never panics, it's recorded in `Parser::errors()` for
//! the caller to inspect; a runtime mistake is an ordinary `Object::Error`
//! value that short-circuits evaluation the moment it appears.

pub mod ast;
pub mod common;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;
