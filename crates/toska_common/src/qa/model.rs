//! Transformer QA model definition
//!
//! A small encoder stack with a two-logit head: for every input token the
//! head emits one start score and one end score. The architecture must match
//! the saved checkpoint exactly or weight loading fails, which is why the
//! hyperparameters live in `model_config.json` next to the weights.

use burn::{
    nn::{
        attention::{MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig, Embedding, EmbeddingConfig, LayerNorm, LayerNormConfig, Linear,
        LinearConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct QaModelConfig {
    pub vocab_size: usize,
    pub max_seq_len: usize,
    pub d_model: usize,
    pub num_heads: usize,
    pub num_layers: usize,
    pub d_ff: usize,
    pub dropout: f64,
}

impl QaModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> QaModel<B> {
        let token_embedding = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.init_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let qa_head = LinearConfig::new(self.d_model, 2).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        QaModel {
            token_embedding,
            position_embedding,
            layers,
            final_norm,
            qa_head,
            dropout,
            max_seq_len: self.max_seq_len,
        }
    }

    fn init_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1 = LayerNormConfig::new(self.d_model).init(device);
        let norm2 = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock {
            self_attn,
            ffn_linear1,
            ffn_linear2,
            norm1,
            norm2,
            dropout,
        }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    self_attn: MultiHeadAttention<B>,
    ffn_linear1: Linear<B>,
    ffn_linear2: Linear<B>,
    norm1: LayerNorm<B>,
    norm2: LayerNorm<B>,
    dropout: Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        use burn::nn::attention::MhaInput;
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self
            .ffn_linear2
            .forward(burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone())));
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

#[derive(Module, Debug)]
pub struct QaModel<B: Backend> {
    token_embedding: Embedding<B>,
    position_embedding: Embedding<B>,
    layers: Vec<EncoderBlock<B>>,
    final_norm: LayerNorm<B>,
    qa_head: Linear<B>,
    dropout: Dropout,
    max_seq_len: usize,
}

pub struct QaModelOutput<B: Backend> {
    pub start_logits: Tensor<B, 2>,
    pub end_logits: Tensor<B, 2>,
}

impl<B: Backend> QaModel<B> {
    /// input_ids: [batch, seq_len] -> start/end logits, each [batch, seq_len]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> QaModelOutput<B> {
        let [batch_size, seq_len] = input_ids.dims();

        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant; position is injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let mut x = self.dropout.forward(tok_emb + pos_emb);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let x = self.final_norm.forward(x);

        // Two logits per token, split into start / end vectors.
        let logits = self.qa_head.forward(x);
        let start_logits = logits
            .clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end_logits = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        QaModelOutput {
            start_logits,
            end_logits,
        }
    }

    pub fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn init_matches_config_and_emits_per_token_logits() {
        let device = Default::default();
        let config = QaModelConfig::new(64, 16, 8, 2, 1, 16, 0.0);
        let model: QaModel<TestBackend> = config.init(&device);
        assert_eq!(model.max_seq_len(), 16);

        let input = Tensor::<TestBackend, 2, Int>::zeros([1, 16], &device);
        let output = model.forward(input);
        assert_eq!(output.start_logits.dims(), [1, 16]);
        assert_eq!(output.end_logits.dims(), [1, 16]);
    }
}
