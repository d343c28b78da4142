use std::collections::HashMap;

pub type Variables = HashMap<String, String>;

mod loader;
mod placeholders;

pub use loader::load_env_file;
pub use placeholders::expand_placeholders;
