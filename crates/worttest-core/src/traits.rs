//! The embedding-model capability consumed by the evaluator.
//!
//! Deliberately narrow — vocabulary membership, ranked analogy completion,
//! and odd-one-out — so the engine can be tested against a deterministic
//! mock. Implementations live in `worttest-models`.

/// A ranked candidate answer with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarWord {
    pub word: String,
    pub score: f32,
}

impl SimilarWord {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        SimilarWord {
            word: word.into(),
            score,
        }
    }
}

/// Query interface of a trained embedding model.
///
/// Single-threaded by design; evaluation is synchronous and
/// side-effect-ordered.
pub trait EmbeddingModel {
    /// Human-readable model name used in logs and reports.
    fn name(&self) -> &str;

    /// Whether `word` is in the model's vocabulary.
    fn in_vocabulary(&self, word: &str) -> bool;

    /// Rank candidate completions for `positive[0] + positive[1] - negative`,
    /// best first, at most `topn` entries. The query words themselves never
    /// appear in the result.
    fn analogy(
        &self,
        positive: [&str; 2],
        negative: &str,
        topn: usize,
    ) -> anyhow::Result<Vec<SimilarWord>>;

    /// The member of `words` least similar to the rest.
    fn odd_one_out(&self, words: &[&str]) -> anyhow::Result<String>;
}
