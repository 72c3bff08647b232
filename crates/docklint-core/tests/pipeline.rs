//! Integration test: document → analyzer → text report.
//!
//! Uses a scratch registry of small rules to check the invariants that tie
//! the analysis result to the rendered report.

use docklint_core::{
    AnalysisResult, Analyzer, ColorChoice, Document, Instruction, InstructionKind, Outcome,
    Priority, Rule, RuleRegistry, TextReporter, ValidationContext, ValidationResult,
};

/// Fails any instruction whose arguments contain a forbidden word.
struct Forbid {
    name: &'static str,
    word: &'static str,
    priority: Priority,
    commands: &'static [InstructionKind],
}

impl Rule for Forbid {
    fn name(&self) -> &'static str {
        self.name
    }
    fn summary(&self) -> &'static str {
        "Forbidden word"
    }
    fn priority(&self) -> Priority {
        self.priority
    }
    fn commands(&self) -> &'static [InstructionKind] {
        self.commands
    }
    fn evaluate(&self, node: &Instruction, ctx: ValidationContext) -> ValidationResult {
        match node.arguments() {
            Some(args) if args.contains(self.word) => ValidationResult::failure(self.summary(), ctx),
            _ => ValidationResult::success(self.summary(), ctx),
        }
    }
}

fn registry() -> RuleRegistry {
    RuleRegistry::new()
        .with(Forbid {
            name: "no-sudo",
            word: "sudo",
            priority: Priority::Low,
            commands: &[InstructionKind::Run],
        })
        .with(Forbid {
            name: "no-latest",
            word: ":latest",
            priority: Priority::Critical,
            commands: &[InstructionKind::From],
        })
        .with(Forbid {
            name: "no-root-user",
            word: "root",
            priority: Priority::High,
            commands: &[InstructionKind::User],
        })
}

const RECIPE: &str = "\
FROM debian:latest
RUN apt-get update
RUN sudo make install \\
    && true
CMD [\"app\"]
";

fn render(result: &AnalysisResult<'_>, color: ColorChoice) -> String {
    let mut reporter = TextReporter::new(Vec::new()).color(color);
    reporter.write(result).expect("write to vec");
    String::from_utf8(reporter.into_inner()).expect("utf-8 output")
}

#[test]
fn every_rule_is_either_evaluated_or_skipped() {
    let registry = registry();
    let doc = Document::parse(RECIPE).expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    let run_count = doc
        .instructions()
        .iter()
        .filter(|i| i.kind() == InstructionKind::Run)
        .count();
    let sudo_rows = result
        .evaluated
        .iter()
        .filter(|v| v.rule.name() == "no-sudo")
        .count();
    assert_eq!(sudo_rows, run_count);

    for rule in registry.all() {
        let evaluated = result.evaluated.iter().any(|v| v.rule.name() == rule.name());
        let skipped = result
            .not_evaluated
            .iter()
            .any(|s| s.rule.name() == rule.name());
        assert!(evaluated != skipped, "{} must be in exactly one list", rule.name());
    }

    let skipped: Vec<_> = result.not_evaluated.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(skipped, vec!["docklint:no-root-user"]);
}

#[test]
fn printed_error_count_matches_failures() {
    let registry = registry();
    let doc = Document::parse(RECIPE).expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    let failures = result
        .evaluated
        .iter()
        .filter(|v| v.outcome == Outcome::Failure)
        .count();
    assert_eq!(failures, 2);

    let output = render(&result, ColorChoice::Never);
    assert!(output.contains(&format!(
        "Failure - {failures} errors/{} rules\n",
        result.evaluated.len()
    )));
    assert!(output.ends_with("* 1 rules were not evaluated\n"));
}

#[test]
fn report_rows_follow_priority_then_evaluation_order() {
    let registry = registry();
    let doc = Document::parse(RECIPE).expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    let output = render(&result, ColorChoice::Never);
    let rows: Vec<(String, String)> = output
        .lines()
        .filter(|l| l.contains("docklint:"))
        .map(|l| {
            let cols: Vec<&str> = l.split_whitespace().collect();
            (cols[2].to_string(), cols[cols.len() - 1].to_string())
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ("docklint:no-latest".to_string(), "1".to_string()),
            ("docklint:no-sudo".to_string(), "2".to_string()),
            ("docklint:no-sudo".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn colored_report_differs_only_by_escape_codes() {
    let registry = registry();
    let doc = Document::parse(RECIPE).expect("recipe should parse");
    let result = Analyzer::new(&registry).analyze(&doc);

    let plain = render(&result, ColorChoice::Never);
    let colored = render(&result, ColorChoice::Always);
    assert_ne!(plain, colored);

    let stripped = colored
        .replace("\x1b[92m", "")
        .replace("\x1b[91m", "")
        .replace("\x1b[0m", "");
    assert_eq!(stripped, plain);
}
