//! Reading and writing sequencer models as JSON.

use crate::io::open_input;
use crate::models::{ModelRecord, SequencerModel};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Loads and validates a model from a JSON file (plain or gzip-compressed).
///
/// Fails if any table in the file is invalid, so a model returned from here
/// is always safe to simulate with.
pub fn load_model(path: &Path) -> Result<SequencerModel> {
    let reader = open_input(path)?;
    SequencerModel::from_json(reader)
        .with_context(|| format!("Invalid model file: {}", path.display()))
}

/// Writes a model as JSON.
pub fn write_model(model: &SequencerModel, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create model file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, &ModelRecord::from(model))
        .with_context(|| format!("Failed to write model to {}", path.display()))?;
    writer.flush().context("Failed to flush model file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registry;

    #[test]
    fn test_write_then_load() {
        let path = crate::utils::temp_path("model.json");
        let model = registry::builtin("perfect").unwrap();

        write_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.name(), "perfect");
        assert_eq!(loaded.read_len(), 125);
        assert_eq!(loaded.insert_size().max_gap(), 200);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_model_file() {
        let path = crate::utils::temp_path("bad_model.json");
        std::fs::write(&path, r#"{"name": "broken", "readLen": 10}"#).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid model file"));
        assert!(format!("{err:#}").contains("missing field"));

        std::fs::remove_file(path).ok();
    }
}
