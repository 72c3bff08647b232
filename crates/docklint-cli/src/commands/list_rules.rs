//! List rules command implementation.

use docklint_rules::builtin_registry;

/// Runs the list-rules command.
pub fn run() {
    let registry = builtin_registry();

    println!("Available rules:\n");
    println!("{:<36} {:<10} Summary", "Lint ID", "Priority");
    println!("{}", "-".repeat(80));

    for rule in registry.all() {
        println!(
            "{:<36} {:<10} {}",
            rule.lint_id(),
            rule.priority(),
            rule.summary()
        );
        let applies_to: Vec<String> = rule.commands().iter().map(ToString::to_string).collect();
        println!("{:<36} applies to: {}", "", applies_to.join(", "));
        if let Some(url) = rule.url() {
            println!("{:<36} see: {url}", "");
        }
    }

    println!("\n{} rules registered", registry.len());
}
