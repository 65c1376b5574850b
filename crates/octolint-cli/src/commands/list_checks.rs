//! List checks command implementation.

use octolint_checks::all_checks;
use octolint_core::Config;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");
    println!("{:<40} {:<14} Description", "Id", "Category");
    println!("{}", "-".repeat(100));

    for check in all_checks(&Config::default()) {
        println!(
            "{:<40} {:<14} {}",
            check.id(),
            check.category().to_string(),
            check.description()
        );
    }

    println!("\nPresets (set `preset` in octolint.toml):");
    println!("  all           - Every check (default)");
    println!("  organization  - Organization checks only");
    println!("  security      - Security checks only");

    println!("\nUse --skip or --only to select checks, e.g.:");
    println!("  octolint check --snapshot space.json --skip OctoLintUnusedVariables");
    println!("  octolint check --snapshot space.json --only OctoLintInsecureK8sTargets");
}
