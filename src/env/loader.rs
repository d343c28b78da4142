use std::{fs, io::Cursor, path::Path};

use anyhow::{Context, Result};

use super::Variables;

/// Merges the `KEY=value` pairs of a dotenv file into `variables`.
pub fn load_env_file(path: &Path, variables: &mut Variables) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading env file {}", path.display()))?;

    for item in dotenvy::from_read_iter(Cursor::new(content)) {
        let (key, value) = item.with_context(|| format!("parsing env file {}", path.display()))?;
        variables.insert(key, value);
    }

    Ok(())
}
