//! A thin REPL wrapper around the `monkey` library: read a line, lex +
//! parse it, refuse to evaluate (printing diagnostics instead) if
//! parsing produced any errors, otherwise expand macros and evaluate
//! against a persistent environment, printing the result's `inspect()`.
//!
//! Not part of the specified interpreter core — see `monkey::evaluator`
//! for that — this binary exists only so the crate is runnable.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use monkey::common::source::Source;
use monkey::evaluator::macro_expansion::{define_macros, expand_macros};
use monkey::evaluator::eval_program;
use monkey::object::environment::Environment;
use monkey::parser::Parser;

const PROMPT: &str = ">> ";

fn main() {
    println!("Hello! This is the Monkey programming language.");
    println!("Feel free to type in commands.");

    let value_env = Environment::new();
    let macro_env = Environment::new();

    let mut rl = match Editor::<()>::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", format!("could not start the line editor: {}", err).red());
            return;
        }
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                run_line(&line, &value_env, &macro_env);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("readline error: {}", err).red());
                break;
            }
        }
    }
}

fn run_line(line: &str, value_env: &std::rc::Rc<Environment>, macro_env: &std::rc::Rc<Environment>) {
    let mut parser = Parser::new(Source::source(line));
    let mut program = parser.parse_program();

    if !parser.errors().is_empty() {
        print_parse_errors(&parser.errors());
        return;
    }

    define_macros(&mut program, macro_env);
    let expanded = expand_macros(program, macro_env);

    let result = eval_program(&expanded, value_env);
    println!("{}", result.inspect());
}

fn print_parse_errors(errors: &[String]) {
    eprintln!("{}", "woops! we ran into some monkey business here!".red());
    eprintln!("{}", " parser errors:".red());
    for error in errors {
        eprintln!("{}", format!("\t{}", error).red());
    }
}
