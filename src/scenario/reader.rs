use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::fs;

use crate::env::{expand_placeholders, Variables};

use super::model::{Feature, Keyword, Scenario, StepLine};

enum Section {
    Preamble,
    Background,
    Scenario,
}

pub async fn load_feature_file(path: &Path, variables: &Variables) -> Result<Feature> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading feature file {}", path.display()))?;

    parse_feature(&raw, path, variables)
        .with_context(|| format!("parsing feature file {}", path.display()))
}

/// Parses the Gherkin subset the runner understands.
///
/// Background steps are copied to the front of every scenario.
pub fn parse_feature(contents: &str, path: &Path, variables: &Variables) -> Result<Feature> {
    let mut name = None;
    let mut background: Vec<StepLine> = Vec::new();
    let mut scenarios: Vec<Scenario> = Vec::new();
    let mut section = Section::Preamble;

    for (index, raw_line) in contents.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("Feature:") {
            let title = rest.trim();
            name = (!title.is_empty()).then(|| title.to_string());
            continue;
        }

        if trimmed.starts_with("Background:") {
            if !scenarios.is_empty() {
                bail!("line {line}: Background must come before the first scenario");
            }
            section = Section::Background;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("Scenario:") {
            scenarios.push(Scenario {
                name: rest.trim().to_string(),
                line,
                steps: background.clone(),
            });
            section = Section::Scenario;
            continue;
        }

        if trimmed.starts_with("Scenario Outline:") || trimmed.starts_with("Examples:") {
            bail!("line {line}: scenario outlines are not supported");
        }

        if trimmed.starts_with('|') || trimmed.starts_with("\"\"\"") {
            bail!("line {line}: data tables and doc strings are not supported");
        }

        // everything before the first Background or Scenario describes the feature
        let steps = match section {
            Section::Preamble => continue,
            Section::Background => &mut background,
            Section::Scenario => match scenarios.last_mut() {
                Some(scenario) => &mut scenario.steps,
                None => continue,
            },
        };

        let Some((keyword, text)) = split_keyword(trimmed) else {
            // tags and free-form description lines
            continue;
        };

        let text = expand_placeholders(text, variables).with_context(|| format!("line {line}"))?;
        steps.push(StepLine {
            keyword,
            text,
            line,
        });
    }

    Ok(Feature {
        name,
        path: path.to_path_buf(),
        scenarios,
    })
}

fn split_keyword(line: &str) -> Option<(Keyword, &str)> {
    Keyword::ALL.into_iter().find_map(|keyword| {
        let rest = line.strip_prefix(keyword.as_str())?;
        rest.starts_with(char::is_whitespace)
            .then(|| (keyword, rest.trim()))
    })
}
