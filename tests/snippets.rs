//! Golden-file scenario harness: each file under `tests/snippets/` opens
//! with a `// expect: <value>` header naming the expected `inspect()`
//! output; this harness lexes, parses, expands macros, evaluates, and
//! asserts the two match. Grounded on the teacher's own
//! `tests/fledgling.rs` header-driven snippet runner, reduced to
//! Monkey's single outcome (there's no separate lex/parse/desugar/hoist
//! pipeline to target here, just "evaluates to this value").

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use monkey::common::source::Source;
use monkey::evaluator::eval_program;
use monkey::evaluator::macro_expansion::{define_macros, expand_macros};
use monkey::object::environment::Environment;
use monkey::parser::Parser;

/// Pulls the expected output out of a snippet's leading `// expect: ...`
/// comment line.
fn expected_output(contents: &str) -> String {
    let header = contents
        .lines()
        .next()
        .unwrap_or_else(|| panic!("snippet is empty"));

    let prefix = "// expect:";
    assert!(header.starts_with(prefix), "snippet must start with `{}`, got {:?}", prefix, header);

    header[prefix.len()..].trim().to_string()
}

fn run_snippet(path: &PathBuf) {
    let contents = fs::read_to_string(path).expect("could not read snippet");
    let expected = expected_output(&contents);

    // Monkey has no comment syntax (spec §3.1's token set has no comment
    // kind), so the `// expect: ...` header isn't itself valid source —
    // strip it before handing the rest of the file to the lexer.
    let body = match contents.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };

    let source: Rc<Source> = Source::source(body);
    let mut parser = Parser::new(source);
    let mut program = parser.parse_program();
    assert!(parser.errors().is_empty(), "{}: parse errors: {:?}", path.display(), parser.errors());

    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);
    let expanded = expand_macros(program, &macro_env);

    let value_env = Environment::new();
    let result = eval_program(&expanded, &value_env);

    assert_eq!(result.inspect(), expected, "snippet {} produced an unexpected result", path.display());
}

#[test]
fn snippets() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/snippets");
    let mut ran = 0;

    for entry in fs::read_dir(&dir).expect("missing tests/snippets directory") {
        let path = entry.expect("could not read directory entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("monkey") {
            continue;
        }
        run_snippet(&path);
        ran += 1;
    }

    assert!(ran > 0, "expected to find at least one .monkey snippet in {}", dir.display());
}
