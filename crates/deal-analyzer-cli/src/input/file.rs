use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a deal document (a JSON object) from disk.
pub fn read_document(path: &str) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(format!("'{}' must contain a JSON object", canonical.display()).into()),
    }
}

/// Resolve the path against the working directory and check it names a file.
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
