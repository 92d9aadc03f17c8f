//! The model evaluator.
//!
//! Reads one test-set file, queries the embedding model per question, and
//! accumulates accuracy and coverage statistics per group and in total.

use std::path::Path;

use anyhow::Result;

use crate::model::{Question, QuestionGroup};
use crate::parser;
use crate::statistics::{GroupStats, TestSetStats};
use crate::traits::EmbeddingModel;

/// Evaluates test-set files against an embedding model.
pub struct Evaluator<'a> {
    model: &'a dyn EmbeddingModel,
    topn: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(model: &'a dyn EmbeddingModel, topn: usize) -> Self {
        Evaluator { model, topn }
    }

    /// Evaluate an analogy test set: per question `[a, a', b, b']`, query
    /// `analogy(positive=[a', b], negative=a)` and count top-1 and top-N
    /// hits of `b'`. Questions with any out-of-vocabulary word are skipped
    /// and tracked through the coverage counters only.
    pub fn evaluate_analogies(&self, path: &Path, fallback_label: &str) -> Result<TestSetStats> {
        self.evaluate_file(path, fallback_label, |question| {
            let words = question.tokens();
            let matches = self.model.analogy(
                [words[1].as_str(), words[2].as_str()],
                words[0].as_str(),
                self.topn,
            )?;
            let top1 = matches.first().is_some_and(|m| m.word == words[3]);
            let topn = matches.iter().take(self.topn).any(|m| m.word == words[3]);
            Ok(Outcome { top1, topn })
        })
    }

    /// Evaluate an odd-one-out test set: per question the model must name
    /// the fourth word as the one that does not fit the first three.
    pub fn evaluate_odd_one_out(&self, path: &Path, fallback_label: &str) -> Result<TestSetStats> {
        self.evaluate_file(path, fallback_label, |question| {
            let words = question.tokens();
            let odd = self.model.odd_one_out(&[
                words[0].as_str(),
                words[1].as_str(),
                words[2].as_str(),
                words[3].as_str(),
            ])?;
            let hit = odd == words[3];
            // exclusion has no ranking, so the top-N counter mirrors top-1
            Ok(Outcome {
                top1: hit,
                topn: hit,
            })
        })
    }

    fn evaluate_file<F>(&self, path: &Path, fallback_label: &str, mut judge: F) -> Result<TestSetStats>
    where
        F: FnMut(&Question) -> Result<Outcome>,
    {
        let groups = parser::read_question_groups(path, fallback_label)?;
        let mut stats = Vec::with_capacity(groups.len());
        for group in &groups {
            stats.push(self.evaluate_group(group, &mut judge)?);
        }
        Ok(TestSetStats::from_groups(stats))
    }

    fn evaluate_group<F>(&self, group: &QuestionGroup, judge: &mut F) -> Result<GroupStats>
    where
        F: FnMut(&Question) -> Result<Outcome>,
    {
        let mut stats = GroupStats::new(group.label.clone());
        stats.available = group.questions.len();

        for question in &group.questions {
            if !question
                .tokens()
                .iter()
                .all(|word| self.model.in_vocabulary(word))
            {
                // out-of-vocabulary: skipped, counted through coverage only
                continue;
            }
            stats.attempted += 1;
            let outcome = judge(question)?;
            if outcome.top1 {
                stats.correct += 1;
            }
            if outcome.topn {
                stats.correct_topn += 1;
            }
        }

        if stats.available > 0 && stats.attempted == 0 {
            tracing::warn!(
                "group '{}' has zero vocabulary coverage ({} questions skipped)",
                stats.label,
                stats.available
            );
        }
        Ok(stats)
    }
}

struct Outcome {
    top1: bool,
    topn: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SimilarWord;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io::Write as _;

    /// Minimal in-crate stand-in; the full-featured mock lives in
    /// worttest-models.
    struct FakeModel {
        vocabulary: HashSet<String>,
        ranking: Vec<SimilarWord>,
        odd: String,
        queries: RefCell<usize>,
    }

    impl FakeModel {
        fn new(vocabulary: &[&str], ranking: &[&str], odd: &str) -> Self {
            FakeModel {
                vocabulary: vocabulary.iter().map(|w| w.to_string()).collect(),
                ranking: ranking
                    .iter()
                    .enumerate()
                    .map(|(i, w)| SimilarWord::new(*w, 1.0 - i as f32 * 0.1))
                    .collect(),
                odd: odd.to_string(),
                queries: RefCell::new(0),
            }
        }
    }

    impl EmbeddingModel for FakeModel {
        fn name(&self) -> &str {
            "fake"
        }

        fn in_vocabulary(&self, word: &str) -> bool {
            self.vocabulary.contains(word)
        }

        fn analogy(
            &self,
            _positive: [&str; 2],
            _negative: &str,
            topn: usize,
        ) -> anyhow::Result<Vec<SimilarWord>> {
            *self.queries.borrow_mut() += 1;
            Ok(self.ranking.iter().take(topn).cloned().collect())
        }

        fn odd_one_out(&self, _words: &[&str]) -> anyhow::Result<String> {
            *self.queries.borrow_mut() += 1;
            Ok(self.odd.clone())
        }
    }

    fn testset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn counts_top1_and_topn_hits() {
        let model = FakeModel::new(
            &["Haus", "Häuser", "Baum", "Bäume", "Hand", "Hände"],
            &["Bäume", "Hände"],
            "",
        );
        // first question answered at rank 1, second at rank 2, third missed
        let file = testset(
            ": nouns: SI/PL\nHaus Häuser Baum Bäume\nHaus Häuser Hand Hände\nBaum Bäume Haus Häuser\n",
        );

        let stats = Evaluator::new(&model, 10)
            .evaluate_analogies(file.path(), "unnamed")
            .unwrap();

        assert_eq!(stats.groups.len(), 1);
        let group = &stats.groups[0];
        assert_eq!(group.label, "nouns: SI/PL");
        assert_eq!(group.available, 3);
        assert_eq!(group.attempted, 3);
        assert_eq!(group.correct, 1);
        assert_eq!(group.correct_topn, 2);
        assert_eq!(stats.total.attempted, 3);
    }

    #[test]
    fn out_of_vocabulary_question_is_skipped_entirely() {
        // "d" unknown: the whole question is skipped, nothing attempted
        let model = FakeModel::new(&["a", "b", "c"], &["d"], "");
        let file = testset("a b c d\n");

        let stats = Evaluator::new(&model, 10)
            .evaluate_analogies(file.path(), "opposite")
            .unwrap();

        assert_eq!(stats.total.available, 1);
        assert_eq!(stats.total.attempted, 0);
        assert_eq!(stats.total.correct, 0);
        assert_eq!(stats.total.coverage(), 0.0);
        assert_eq!(*model.queries.borrow(), 0);
    }

    #[test]
    fn topn_one_only_counts_the_first_candidate() {
        let model = FakeModel::new(&["a", "b", "c", "d", "x"], &["x", "d"], "");
        let file = testset("a b c d\n");

        let stats = Evaluator::new(&model, 1)
            .evaluate_analogies(file.path(), "opposite")
            .unwrap();

        assert_eq!(stats.total.correct, 0);
        // ranking is truncated to topn by the model, so no top-N hit either
        assert_eq!(stats.total.correct_topn, 0);
    }

    #[test]
    fn odd_one_out_compares_against_the_candidate() {
        let model = FakeModel::new(&["Hund", "Katze", "Maus", "Auto", "Tisch"], &[], "Auto");
        let file = testset("Hund Katze Maus Auto\nHund Katze Maus Tisch\n");

        let stats = Evaluator::new(&model, 10)
            .evaluate_odd_one_out(file.path(), "doesn't fit")
            .unwrap();

        assert_eq!(stats.groups[0].label, "doesn't fit");
        assert_eq!(stats.total.attempted, 2);
        assert_eq!(stats.total.correct, 1);
        assert_eq!(stats.total.correct_topn, 1);
    }

    #[test]
    fn per_group_and_total_accounting() {
        let model = FakeModel::new(&["a", "b", "c", "d"], &["d"], "");
        let file = testset(": g1\na b c d\n: g2\na b c d\na b c x\n");

        let stats = Evaluator::new(&model, 10)
            .evaluate_analogies(file.path(), "unnamed")
            .unwrap();

        assert_eq!(stats.groups.len(), 2);
        assert_eq!(stats.groups[0].attempted, 1);
        // "x" is out of vocabulary; only one of g2's questions is attempted
        assert_eq!(stats.groups[1].available, 2);
        assert_eq!(stats.groups[1].attempted, 1);
        assert_eq!(stats.total.available, 3);
        assert_eq!(stats.total.attempted, 2);
        assert_eq!(stats.total.correct, 2);
        assert!(stats.total.attempted <= stats.total.available);
        assert!(stats.total.correct <= stats.total.correct_topn);
    }

    #[test]
    fn missing_test_set_file_is_fatal() {
        let model = FakeModel::new(&[], &[], "");
        let result = Evaluator::new(&model, 10)
            .evaluate_analogies(Path::new("no/such/file.questions"), "x");
        assert!(result.is_err());
    }

    #[test]
    fn empty_group_reports_all_zero() {
        let model = FakeModel::new(&[], &[], "");
        let file = testset(": empty\n");

        let stats = Evaluator::new(&model, 10)
            .evaluate_analogies(file.path(), "unnamed")
            .unwrap();

        assert_eq!(stats.groups[0].available, 0);
        assert_eq!(stats.groups[0].accuracy(), 0.0);
        assert_eq!(stats.groups[0].coverage(), 0.0);
    }
}
