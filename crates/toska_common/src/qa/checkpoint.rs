//! Model checkpoint loading
//!
//! A checkpoint directory holds two things:
//!   model_config.json  -- hyperparameters needed to rebuild the architecture
//!   model.mpk          -- weights, written by Burn's CompactRecorder
//!
//! The config is loaded first so the model can be constructed with the exact
//! shape the weights were saved with; the recorder refuses mismatches.

use super::model::{QaModel, QaModelConfig};
use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

const CONFIG_FILE: &str = "model_config.json";
const WEIGHTS_FILE: &str = "model";

/// Loads model config and weights from a checkpoint directory
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the model architecture config
    pub fn load_config(&self) -> Result<QaModelConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model config '{}'. Is the model directory populated?",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed model config '{}'", path.display()))
    }

    /// Load weights into a freshly initialized model
    pub fn load_model<B: Backend>(
        &self,
        model: QaModel<B>,
        device: &B::Device,
    ) -> Result<QaModel<B>> {
        let path = self.dir.join(WEIGHTS_FILE);

        let record = CompactRecorder::new().load(path.clone(), device).with_context(|| {
            format!("Cannot load model weights from '{}'", path.display())
        })?;

        Ok(model.load_record(record))
    }
}
