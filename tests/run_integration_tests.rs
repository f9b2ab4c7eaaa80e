use handy_lang::treewalk_interpreter::{Environment, Interpreter};
use handy_lang::{run_source, HandyError};

use regex::Regex;
use test_generator::test_resources;

#[derive(Debug, PartialEq)]
struct Outcome {
    output: Vec<String>,
    error: Option<String>,
}

#[test_resources("tests/handy_test_cases/**/*.hdy")]
fn test_handy_script(file: &str) {
    let source = std::fs::read_to_string(file).unwrap();

    let expected = get_expected_outcome(&source);
    let actual = run_script(&source, file);

    assert_eq!(expected.output, actual.output, "output of {}", file);
    match (&expected.error, &actual.error) {
        (None, None) => {}
        (Some(want), Some(got)) => assert!(
            got.contains(want.as_str()),
            "error of {} should contain {:?}, got {:?}",
            file,
            want,
            got
        ),
        (want, got) => panic!("{}: expected error {:?}, got {:?}", file, want, got),
    }
}

#[test]
fn test_tokenizing_is_deterministic() {
    let source = std::fs::read_to_string("tests/handy_test_cases/declarations/print_values.hdy")
        .unwrap();

    let first = handy_lang::handy_frontend::tokenize(&source).unwrap();
    let second = handy_lang::handy_frontend::tokenize(&source).unwrap();
    assert_eq!(first, second);
}

fn run_script(source: &str, filename: &str) -> Outcome {
    let mut output = vec![];
    let mut interpreter = Interpreter::with_output(Environment::new(), &mut output);

    let error = run_source(&mut interpreter, source, filename)
        .err()
        .map(|e| describe(&e));

    Outcome {
        output: String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| l.to_owned())
            .collect(),
        error,
    }
}

/// Mirrors the prefixes the `handy` binary reports errors with.
fn describe(error: &HandyError) -> String {
    match error {
        HandyError::Lexical(e) => format!("Syntax Error: {}", e),
        HandyError::Syntax(e) => format!("Syntax Error: {}", e),
        HandyError::Runtime(e) => format!("Runtime Error: {}", e),
    }
}

fn get_expected_outcome(source: &str) -> Outcome {
    let output_regexer = Regex::new(r"# expect: (.*)$").unwrap();
    let error_regexer = Regex::new(r"# expect error: (.*)$").unwrap();

    let mut result = Outcome {
        output: vec![],
        error: None,
    };

    for line in source.lines() {
        if let Some(r) = output_regexer.captures(line) {
            result.output.push(r.get(1).unwrap().as_str().to_owned());
        }
        if let Some(r) = error_regexer.captures(line) {
            result.error.replace(r.get(1).unwrap().as_str().to_owned());
        }
    }

    result
}
