//! Mock embedding model for testing.
//!
//! Returns configurable canned answers so the evaluation engine can be
//! exercised with deterministic fixtures and no trained artifact.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use worttest_core::traits::{EmbeddingModel, SimilarWord};

/// The last analogy query a [`MockModel`] received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogyQuery {
    pub positive: [String; 2],
    pub negative: String,
    pub topn: usize,
}

/// A mock embedding model with a fixed vocabulary and canned rankings.
pub struct MockModel {
    vocabulary: HashSet<String>,
    /// `(positive[0], positive[1], negative)` → canned ranking.
    analogy_answers: HashMap<(String, String, String), Vec<SimilarWord>>,
    /// Sorted word set → canned odd word.
    odd_answers: HashMap<Vec<String>, String>,
    /// Fallback answer when no canned ranking matches.
    default_answer: Option<String>,
    call_count: AtomicU32,
    last_query: Mutex<Option<AnalogyQuery>>,
}

impl MockModel {
    /// Create a mock knowing the given words and nothing else.
    pub fn with_vocabulary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockModel {
            vocabulary: words.into_iter().map(Into::into).collect(),
            analogy_answers: HashMap::new(),
            odd_answers: HashMap::new(),
            default_answer: None,
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Answer every unmatched analogy query with a single fixed word.
    pub fn with_fixed_answer<I, S>(words: I, answer: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mock = Self::with_vocabulary(words);
        mock.default_answer = Some(answer.to_string());
        mock
    }

    /// Register a canned ranking for one analogy query, best match first.
    pub fn answer(mut self, positive: [&str; 2], negative: &str, ranking: &[&str]) -> Self {
        let ranking = ranking
            .iter()
            .enumerate()
            .map(|(i, w)| SimilarWord::new(*w, 1.0 - i as f32 * 0.05))
            .collect();
        self.analogy_answers.insert(
            (
                positive[0].to_string(),
                positive[1].to_string(),
                negative.to_string(),
            ),
            ranking,
        );
        self
    }

    /// Register a canned odd-one-out answer for one word set.
    pub fn odd_answer(mut self, words: &[&str], odd: &str) -> Self {
        self.odd_answers
            .insert(Self::odd_key(words), odd.to_string());
        self
    }

    fn odd_key(words: &[&str]) -> Vec<String> {
        let mut key: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        key.sort();
        key
    }

    /// Number of model queries made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recent analogy query, if any.
    pub fn last_query(&self) -> Option<AnalogyQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

impl EmbeddingModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn in_vocabulary(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    fn analogy(
        &self,
        positive: [&str; 2],
        negative: &str,
        topn: usize,
    ) -> anyhow::Result<Vec<SimilarWord>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = Some(AnalogyQuery {
            positive: [positive[0].to_string(), positive[1].to_string()],
            negative: negative.to_string(),
            topn,
        });

        let key = (
            positive[0].to_string(),
            positive[1].to_string(),
            negative.to_string(),
        );
        let mut ranking = match self.analogy_answers.get(&key) {
            Some(ranking) => ranking.clone(),
            None => self
                .default_answer
                .iter()
                .map(|w| SimilarWord::new(w.clone(), 1.0))
                .collect(),
        };
        ranking.truncate(topn);
        Ok(ranking)
    }

    fn odd_one_out(&self, words: &[&str]) -> anyhow::Result<String> {
        anyhow::ensure!(!words.is_empty(), "odd-one-out needs a non-empty word set");
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.odd_answers.get(&Self::odd_key(words)) {
            Some(odd) => Ok(odd.clone()),
            None => Ok(words[0].to_string()),
        }
    }
}
