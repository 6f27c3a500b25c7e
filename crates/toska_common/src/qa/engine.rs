//! QA inference engine
//!
//! Owns the tokenizer and the model on the ndarray backend. Loaded once at
//! daemon start; `answer` takes `&self` and is safe to share behind an `Arc`.

use super::checkpoint::CheckpointStore;
use super::model::QaModel;
use super::span::best_span;
use super::tokenizer::load_tokenizer;
use super::QaError;
use anyhow::Result;
use burn::prelude::*;
use std::path::Path;
use tokenizers::Tokenizer;

type InferBackend = burn::backend::NdArray;
type InferDevice = burn::backend::ndarray::NdArrayDevice;

// BERT-style defaults, used when the tokenizer has no such named tokens
const FALLBACK_CLS_ID: u32 = 101;
const FALLBACK_SEP_ID: u32 = 102;
const PAD_ID: u32 = 0;

/// An extracted answer with its joint span probability
#[derive(Debug, Clone)]
pub struct QaAnswer {
    pub text: String,
    pub score: f32,
}

pub struct QaEngine {
    model: QaModel<InferBackend>,
    tokenizer: Tokenizer,
    device: InferDevice,
    max_seq_len: usize,
    max_answer_tokens: usize,
    cls_id: u32,
    sep_id: u32,
}

impl QaEngine {
    /// Load tokenizer, config and weights from the model directory.
    pub fn load(model_dir: &Path, max_answer_tokens: usize) -> Result<Self> {
        let tokenizer = load_tokenizer(model_dir)?;
        let store = CheckpointStore::new(model_dir);

        let mut config = store.load_config()?;
        // Inference never drops activations
        config.dropout = 0.0;

        let device = InferDevice::default();
        let model: QaModel<InferBackend> = config.init(&device);
        let model = store.load_model(model, &device)?;
        let max_seq_len = model.max_seq_len();
        tracing::info!(
            "QA model loaded from {} (max_seq_len={})",
            model_dir.display(),
            max_seq_len
        );

        let cls_id = tokenizer.token_to_id("[CLS]").unwrap_or(FALLBACK_CLS_ID);
        let sep_id = tokenizer.token_to_id("[SEP]").unwrap_or(FALLBACK_SEP_ID);

        Ok(Self {
            model,
            tokenizer,
            device,
            max_seq_len,
            max_answer_tokens,
            cls_id,
            sep_id,
        })
    }

    /// Extract an answer span for `question` from `context`.
    pub fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, QaError> {
        let q_enc = self
            .tokenizer
            .encode(question, false)
            .map_err(|e| QaError::Tokenize(e.to_string()))?;
        let c_enc = self
            .tokenizer
            .encode(context, false)
            .map_err(|e| QaError::Tokenize(e.to_string()))?;

        // [CLS] question [SEP] context [SEP], truncated to max_seq_len
        let mut input_ids: Vec<u32> = vec![self.cls_id];
        input_ids.extend_from_slice(q_enc.get_ids());
        input_ids.push(self.sep_id);
        let context_start = input_ids.len();
        input_ids.extend_from_slice(c_enc.get_ids());
        input_ids.push(self.sep_id);
        input_ids.truncate(self.max_seq_len);
        let seq_len = input_ids.len();
        while input_ids.len() < self.max_seq_len {
            input_ids.push(PAD_ID);
        }

        let input_flat: Vec<i32> = input_ids.iter().map(|&id| id as i32).collect();
        let input_tensor =
            Tensor::<InferBackend, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
                .unsqueeze::<2>();

        let output = self.model.forward(input_tensor);
        let start_logits = output.start_logits.squeeze_dim::<1>(0).slice([0..seq_len]);
        let end_logits = output.end_logits.squeeze_dim::<1>(0).slice([0..seq_len]);

        let start_probs: Vec<f32> =
            burn::tensor::activation::softmax(start_logits.unsqueeze::<2>(), 1)
                .squeeze_dim::<1>(0)
                .into_data()
                .to_vec::<f32>()
                .unwrap_or_default();
        let end_probs: Vec<f32> =
            burn::tensor::activation::softmax(end_logits.unsqueeze::<2>(), 1)
                .squeeze_dim::<1>(0)
                .into_data()
                .to_vec::<f32>()
                .unwrap_or_default();

        let (best_start, best_end, score) = best_span(
            &start_probs,
            &end_probs,
            context_start,
            seq_len,
            self.max_answer_tokens,
        )
        .ok_or(QaError::EmptyAnswer)?;

        let answer_ids: Vec<u32> = input_ids[best_start..=best_end].to_vec();
        let answer = self
            .tokenizer
            .decode(&answer_ids, true)
            .map_err(|e| QaError::Decode(e.to_string()))?;

        // Strip any special tokens the decoder let through
        let answer = answer
            .replace("[CLS]", "")
            .replace("[SEP]", "")
            .replace("[PAD]", "")
            .trim()
            .to_string();

        tracing::debug!(
            "Span [{},{}] score={:.4} answer='{}'",
            best_start,
            best_end,
            score,
            answer
        );

        if answer.is_empty() {
            return Err(QaError::EmptyAnswer);
        }

        Ok(QaAnswer { text: answer, score })
    }
}
