use std::path::PathBuf;

use tracing::{info, warn};

use crate::{context::ScenarioContext, registry::StepTable};

use super::model::{Feature, Keyword, Scenario};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub keyword: Keyword,
    pub text: String,
    pub line: usize,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub line: usize,
    pub steps: Vec<StepOutcome>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status == StepStatus::Passed)
    }

    pub fn failure(&self) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|step| matches!(step.status, StepStatus::Failed(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOutcome {
    pub name: Option<String>,
    pub path: PathBuf,
    pub scenarios: Vec<ScenarioOutcome>,
}

impl FeatureOutcome {
    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    pub fn passed(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Runs the steps of `scenario` in order against a fresh context.
///
/// The first failing step stops the scenario; the steps after it are
/// reported as skipped.
pub async fn run_scenario(table: &StepTable, scenario: &Scenario) -> ScenarioOutcome {
    let mut context = ScenarioContext::new();
    let mut failed = false;
    let mut steps = Vec::with_capacity(scenario.steps.len());

    for step in &scenario.steps {
        let status = if failed {
            StepStatus::Skipped
        } else {
            match table.run(&context, &step.text).await {
                Ok(next) => {
                    context = next;
                    StepStatus::Passed
                }
                Err(err) => {
                    failed = true;
                    warn!(
                        scenario = %scenario.name,
                        line = step.line,
                        step = %step.text,
                        error = %err,
                        "step failed"
                    );
                    StepStatus::Failed(err.to_string())
                }
            }
        };

        steps.push(StepOutcome {
            keyword: step.keyword,
            text: step.text.clone(),
            line: step.line,
            status,
        });
    }

    if !failed {
        info!(scenario = %scenario.name, steps = steps.len(), "scenario passed");
    }

    ScenarioOutcome {
        name: scenario.name.clone(),
        line: scenario.line,
        steps,
    }
}

/// Runs every scenario of `feature`, each with its own context.
pub async fn run_feature(table: &StepTable, feature: &Feature) -> FeatureOutcome {
    let mut scenarios = Vec::with_capacity(feature.scenarios.len());
    for scenario in &feature.scenarios {
        scenarios.push(run_scenario(table, scenario).await);
    }

    let outcome = FeatureOutcome {
        name: feature.name.clone(),
        path: feature.path.clone(),
        scenarios,
    };
    info!(
        path = %outcome.path.display(),
        passed = outcome.passed_count(),
        failed = outcome.failed_count(),
        "feature finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Arc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        env::Variables,
        request::RequestDescriptor,
        response::ResponseDescriptor,
        scenario::parse_feature,
        steps::HttpSteps,
        transport::HandlerRoundTrip,
    };

    const FEATURE: &str = r#"Feature: widgets
  Scenario: listing
    When I make a GET request to "/widgets"
    Then the response code equals 200
    And the response is "[]"

  Scenario: wrong status
    When I make a GET request to "/missing"
    Then the response code equals 200
    And the response is "[]"

  Scenario: undefined step
    Given I whistle
"#;

    fn table() -> StepTable {
        let round_trip = HandlerRoundTrip::new(|request: &RequestDescriptor| {
            match request.url().path() {
                "/widgets" => ResponseDescriptor::new(200).with_body("[]"),
                _ => ResponseDescriptor::new(404),
            }
        });
        let base = url::Url::parse("http://service.test").unwrap();
        let http = HttpSteps::new(Arc::new(round_trip)).with_base_url(base);
        StepTable::with_http_steps(http).unwrap()
    }

    fn feature() -> Feature {
        parse_feature(FEATURE, Path::new("widgets.feature"), &Variables::new()).unwrap()
    }

    #[tokio::test]
    async fn passing_scenario_passes_every_step() {
        let feature = feature();
        let outcome = run_scenario(&table(), &feature.scenarios[0]).await;

        assert!(outcome.passed());
        assert!(outcome.failure().is_none());
        assert_eq!(outcome.steps.len(), 3);
    }

    #[tokio::test]
    async fn first_failure_skips_the_rest() {
        let feature = feature();
        let outcome = run_scenario(&table(), &feature.scenarios[1]).await;

        assert!(!outcome.passed());
        let statuses: Vec<_> = outcome.steps.iter().map(|s| s.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Passed,
                StepStatus::Failed("expected status code: 200 but 404 given".to_string()),
                StepStatus::Skipped,
            ]
        );
        assert_eq!(outcome.failure().map(|s| s.line), Some(9));
    }

    #[tokio::test]
    async fn feature_keeps_going_after_a_failed_scenario() {
        let outcome = run_feature(&table(), &feature()).await;

        assert_eq!(outcome.name.as_deref(), Some("widgets"));
        assert_eq!(outcome.scenarios.len(), 3);
        assert_eq!(outcome.passed_count(), 1);
        assert_eq!(outcome.failed_count(), 2);
        assert!(!outcome.passed());

        let undefined = outcome.scenarios[2].failure().unwrap();
        assert!(matches!(&undefined.status, StepStatus::Failed(msg) if msg.contains("I whistle")));
    }

    #[tokio::test]
    async fn empty_scenarios_pass() {
        let scenario = Scenario {
            name: "empty".to_string(),
            line: 1,
            steps: Vec::new(),
        };
        assert!(run_scenario(&table(), &scenario).await.passed());
    }
}
