use colored::{Color, Colorize};

use crate::scenario::{FeatureOutcome, StepOutcome, StepStatus};

pub fn print_feature_outcome(outcome: &FeatureOutcome) {
    print!("{}", format_feature_outcome(outcome));
}

/// The feature header followed by each scenario and its steps.
pub fn format_feature_outcome(outcome: &FeatureOutcome) -> String {
    let title = outcome
        .name
        .clone()
        .unwrap_or_else(|| outcome.path.display().to_string());
    let mut rendered = format!(
        "{} {} {}\n",
        "Feature:".bold(),
        title.cyan(),
        format!("({})", outcome.path.display()).dimmed()
    );

    for scenario in &outcome.scenarios {
        let (marker, color) = if scenario.passed() {
            ("✔", Color::Green)
        } else {
            ("✘", Color::Red)
        };
        rendered.push_str(&format!(
            "  {} {} {}\n",
            marker.color(color),
            scenario.name.bold(),
            format!("(line {})", scenario.line).dimmed()
        ));
        for step in &scenario.steps {
            rendered.push_str(&format_step(step));
            rendered.push('\n');
        }
    }
    rendered
}

pub fn print_summary(outcomes: &[FeatureOutcome]) {
    let passed: usize = outcomes.iter().map(FeatureOutcome::passed_count).sum();
    let failed: usize = outcomes.iter().map(FeatureOutcome::failed_count).sum();
    println!("{}", summary_line(passed, failed));
}

/// One indented report line for a step, with the failure message underneath.
pub fn format_step(step: &StepOutcome) -> String {
    let line = format!("{} {}", step.keyword, step.text);
    match &step.status {
        StepStatus::Passed => format!("    {}", line.green()),
        StepStatus::Skipped => format!("    {} {}", line.yellow(), "(skipped)".dimmed()),
        StepStatus::Failed(message) => format!(
            "    {} {}\n      {}",
            line.red(),
            format!("(line {})", step.line).dimmed(),
            message.red()
        ),
    }
}

fn summary_line(passed: usize, failed: usize) -> String {
    let total = passed + failed;
    let noun = if total == 1 { "scenario" } else { "scenarios" };
    let counts = format!("{passed} passed, {failed} failed");
    let counts = if failed > 0 {
        counts.red()
    } else {
        counts.green()
    };
    format!("{} {} {}", total.to_string().bold(), noun.bold(), format!("({counts})"))
}
