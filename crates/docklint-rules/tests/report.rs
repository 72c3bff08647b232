//! End-to-end: parse a recipe, run the built-in rules, render the report.

use docklint_core::{Analyzer, ColorChoice, Document, Outcome, TextReporter};
use docklint_rules::builtin_registry;

const RECIPE: &str = r#"FROM debian:12-slim
RUN apt-get update && apt-get install -y gnupg
RUN gpg --keyserver hkps://keys.openpgp.org --recv-keys ABC123
RUN gpg --batch --no-tty --recv-keys DEF456
CMD ["bash"]
"#;

#[test]
fn renders_builtin_report() {
    let registry = builtin_registry();
    let doc = Document::parse(RECIPE).expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    let mut reporter = TextReporter::new(Vec::new()).color(ColorChoice::Never);
    reporter.write(&result).expect("write to vec");
    let output = String::from_utf8(reporter.into_inner()).expect("utf-8 output");

    insta::assert_snapshot!(output, @r"
       Priority                         Rule                                             Details   Line(s)
       --------                         ----                                             -------   -------
   ✔     Medium   docklint:gpg-without-batch   GPG call without --batch (or --no-tty) may error.         2
   ⨯     Medium   docklint:gpg-without-batch   GPG call without --batch (or --no-tty) may error.         3
   ✔     Medium   docklint:gpg-without-batch   GPG call without --batch (or --no-tty) may error.         4
----------------------------
Failure - 1 errors/3 rules
* All rules were evaluated
");
}

#[test]
fn reference_cases() {
    let registry = builtin_registry();
    let cases = [
        ("RUN gpg --recv-keys ABC123", Outcome::Failure),
        ("RUN gpg --recv-keys ABC123 --batch --no-tty", Outcome::Success),
        ("RUN gpg --recv-keys ABC123 --batch", Outcome::Failure),
        ("RUN apt-get update", Outcome::Success),
    ];

    for (source, expected) in cases {
        let doc = Document::parse(source).expect("case should parse");
        let result = Analyzer::new(&registry).analyze(&doc);
        assert_eq!(result.evaluated.len(), 1, "{source}");
        assert_eq!(result.evaluated[0].outcome, expected, "{source}");
    }
}

#[test]
fn recipe_without_run_skips_gpg_rule() {
    let registry = builtin_registry();
    let doc = Document::parse("FROM scratch\nCOPY app /app\n").expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    assert!(result.evaluated.is_empty());
    assert_eq!(result.not_evaluated.len(), registry.len());

    let mut reporter = TextReporter::new(Vec::new()).color(ColorChoice::Never);
    reporter.write(&result).expect("write to vec");
    let output = String::from_utf8(reporter.into_inner()).expect("utf-8 output");
    assert!(output.contains("Success - 0 errors/0 rules\n"));
    assert!(output.ends_with("* 1 rules were not evaluated\n"));
}

#[test]
fn heredoc_run_is_linted_as_one_instruction() {
    let registry = builtin_registry();
    let source = "FROM debian:12-slim\nRUN <<EOF\napt-get update\ngpg --recv-keys ABC123\nEOF\nCMD [\"bash\"]\n";
    let doc = Document::parse(source).expect("heredoc recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    assert_eq!(result.evaluated.len(), 1);
    assert_eq!(result.evaluated[0].outcome, Outcome::Failure);
    assert_eq!(result.evaluated[0].lines(), vec![2]);
}
