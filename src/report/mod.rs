mod printer;

pub use printer::{format_feature_outcome, format_step, print_feature_outcome, print_summary};
