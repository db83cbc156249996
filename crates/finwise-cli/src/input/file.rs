use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use finwise_core::tax::TaxTables;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = read_contents(&canonical)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Tax tables from `--tables`, validated before use, or the built-in 2026
/// tables when no file is given.
pub fn load_tables(path: Option<&str>) -> Result<TaxTables, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(TaxTables::tax_year_2026());
    };
    let canonical = resolve_path(path)?;
    let contents = read_contents(&canonical)?;
    let tables = TaxTables::from_json(&contents)
        .map_err(|e| format!("Invalid tables in '{}': {}", canonical.display(), e))?;
    log::debug!("loaded {} tax tables from {}", tables.tax_year, canonical.display());
    Ok(tables)
}

fn read_contents(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e).into())
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_the_path() {
        let err = read_contents(Path::new("/")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read '/'"), "{err}");
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let err = read_json::<serde_json::Value>("/no/such/finwise-input.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"), "{err}");
    }

    #[test]
    fn test_no_tables_path_uses_built_in_tables() {
        let tables = load_tables(None).unwrap();
        assert_eq!(tables.tax_year, TaxTables::tax_year_2026().tax_year);
    }
}
