//! Answer span selection
//!
//! Given per-token start and end probabilities, pick the span maximizing
//! `start[s] * end[e]` subject to: the span starts inside the context region
//! (never inside the question), `s <= e`, and the span is no longer than
//! `max_answer_len` tokens.

/// Best valid answer span as `(start, end, score)`, inclusive indices.
///
/// Returns `None` when the context region is empty or the probability
/// vectors are shorter than `seq_len`.
pub fn best_span(
    start_probs: &[f32],
    end_probs: &[f32],
    context_start: usize,
    seq_len: usize,
    max_answer_len: usize,
) -> Option<(usize, usize, f32)> {
    let seq_len = seq_len.min(start_probs.len()).min(end_probs.len());
    if context_start >= seq_len || max_answer_len == 0 {
        return None;
    }

    let mut best: Option<(usize, usize, f32)> = None;
    for s in context_start..seq_len {
        for e in s..(s + max_answer_len).min(seq_len) {
            let score = start_probs[s] * end_probs[e];
            if best.map_or(true, |(_, _, b)| score > b) {
                best = Some((s, e, score));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_maximal_product_span() {
        //                 0    1    2    3    4
        let start = [0.1, 0.1, 0.6, 0.1, 0.1];
        let end = [0.1, 0.1, 0.1, 0.5, 0.2];

        let (s, e, score) = best_span(&start, &end, 0, 5, 30).unwrap();
        assert_eq!((s, e), (2, 3));
        assert!((score - 0.3).abs() < 1e-6);
    }

    #[test]
    fn span_never_starts_before_context() {
        // Highest start probability sits in the question region.
        let start = [0.9, 0.05, 0.05];
        let end = [0.9, 0.05, 0.05];

        let (s, _, _) = best_span(&start, &end, 1, 3, 30).unwrap();
        assert!(s >= 1);
    }

    #[test]
    fn span_end_never_precedes_start() {
        let start = [0.0, 0.0, 0.9];
        let end = [0.9, 0.0, 0.1];

        let (s, e, _) = best_span(&start, &end, 0, 3, 30).unwrap();
        assert!(e >= s);
    }

    #[test]
    fn span_length_is_bounded() {
        let start = [0.9, 0.0, 0.0, 0.0, 0.0];
        let end = [0.0, 0.0, 0.0, 0.0, 0.9];

        // max length 3: tokens 0..=2 at most, so end 4 is out of reach from start 0
        let (s, e, _) = best_span(&start, &end, 0, 5, 3).unwrap();
        assert!(e - s < 3);
    }

    #[test]
    fn empty_context_region_yields_none() {
        let probs = [0.5, 0.5];
        assert!(best_span(&probs, &probs, 2, 2, 30).is_none());
    }
}
