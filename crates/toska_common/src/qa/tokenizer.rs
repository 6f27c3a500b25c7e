//! Tokenizer loading
//!
//! The tokenizer ships with the model as a single `tokenizer.json` in the
//! model directory; it must be the one the checkpoint was trained with or
//! the token ids will not line up with the embedding table.

use anyhow::{Context, Result};
use std::path::Path;
use tokenizers::Tokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Load `tokenizer.json` from the model directory
pub fn load_tokenizer(model_dir: &Path) -> Result<Tokenizer> {
    let path = model_dir.join(TOKENIZER_FILE);
    Tokenizer::from_file(&path)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| {
            format!(
                "Cannot load tokenizer '{}'. Is the model directory populated?",
                path.display()
            )
        })
}
