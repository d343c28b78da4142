mod model;
mod reader;
mod runner;

pub use model::{Feature, Keyword, Scenario, StepLine};
pub use reader::{load_feature_file, parse_feature};
pub use runner::{run_feature, run_scenario, FeatureOutcome, ScenarioOutcome, StepOutcome, StepStatus};
