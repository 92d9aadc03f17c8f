//! Core data model types for worttest.
//!
//! These are the fundamental types the question generator, the test-set
//! writer, and the evaluation engine all operate on.

use std::fmt;

/// An ordered tuple of word forms sharing a lemma, e.g. `Haus-Häuser`.
///
/// Parsed from one lexicon line; forms are joined by [`WordGroup::DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordGroup {
    pub forms: Vec<String>,
}

impl WordGroup {
    /// The form separator used in all lexicon files.
    pub const DELIMITER: char = '-';

    /// Split a lexicon line into its forms. Always yields at least one form.
    pub fn parse(line: &str) -> Self {
        WordGroup {
            forms: line.split(Self::DELIMITER).map(str::to_string).collect(),
        }
    }

    /// Number of forms in this group.
    pub fn arity(&self) -> usize {
        self.forms.len()
    }
}

impl fmt::Display for WordGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.forms.join("-"))
    }
}

/// Which source lexicon an [`AnalogyPattern`] draws its word groups from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexicon {
    Nouns,
    Adjectives,
    Verbs,
}

/// A named rule selecting two forms of a word group to contrast,
/// e.g. singular vs. plural.
#[derive(Debug, Clone, Copy)]
pub struct AnalogyPattern {
    /// Category label, e.g. `nouns` or `verbs (past)`.
    pub category: &'static str,
    /// Short pattern code, e.g. `SI/PL`.
    pub code: &'static str,
    /// Source lexicon for this pattern.
    pub lexicon: Lexicon,
    /// Index of the first contrasted form.
    pub index_a: usize,
    /// Index of the second contrasted form.
    pub index_b: usize,
}

impl AnalogyPattern {
    /// The group label as written to the test-set header, `{category}: {code}`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.category, self.code)
    }
}

const fn pattern(
    category: &'static str,
    code: &'static str,
    lexicon: Lexicon,
    index_a: usize,
    index_b: usize,
) -> AnalogyPattern {
    AnalogyPattern {
        category,
        code,
        lexicon,
        index_a,
        index_b,
    }
}

/// The 20 syntactic inflection patterns, fixed at build time.
///
/// Noun lexicon lines carry singular/plural, adjective lines
/// positive/comparative/superlative, verb lines infinitive, 1st person
/// singular present, 2nd person plural present, 3rd person singular past,
/// 3rd person plural past.
pub const SYNTACTIC_PATTERNS: [AnalogyPattern; 20] = [
    pattern("nouns", "SI/PL", Lexicon::Nouns, 0, 1),
    pattern("nouns", "PL/SI", Lexicon::Nouns, 1, 0),
    pattern("adjectives", "GR/KOM", Lexicon::Adjectives, 0, 1),
    pattern("adjectives", "KOM/GR", Lexicon::Adjectives, 1, 0),
    pattern("adjectives", "GR/SUP", Lexicon::Adjectives, 0, 2),
    pattern("adjectives", "SUP/GR", Lexicon::Adjectives, 2, 0),
    pattern("adjectives", "KOM/SUP", Lexicon::Adjectives, 1, 2),
    pattern("adjectives", "SUP/KOM", Lexicon::Adjectives, 2, 1),
    pattern("verbs (pres)", "INF/1SP", Lexicon::Verbs, 0, 1),
    pattern("verbs (pres)", "1SP/INF", Lexicon::Verbs, 1, 0),
    pattern("verbs (pres)", "INF/2PP", Lexicon::Verbs, 0, 2),
    pattern("verbs (pres)", "2PP/INF", Lexicon::Verbs, 2, 0),
    pattern("verbs (pres)", "1SP/2PP", Lexicon::Verbs, 1, 2),
    pattern("verbs (pres)", "2PP/1SP", Lexicon::Verbs, 2, 1),
    pattern("verbs (past)", "INF/3SV", Lexicon::Verbs, 0, 3),
    pattern("verbs (past)", "3SV/INF", Lexicon::Verbs, 3, 0),
    pattern("verbs (past)", "INF/3PV", Lexicon::Verbs, 0, 4),
    pattern("verbs (past)", "3PV/INF", Lexicon::Verbs, 4, 0),
    pattern("verbs (past)", "3SV/3PV", Lexicon::Verbs, 3, 4),
    pattern("verbs (past)", "3PV/3SV", Lexicon::Verbs, 4, 3),
];

/// Four whitespace-separated word tokens.
///
/// Analogy reading: `[a, a', b, b']` encodes "a is to a' as b is to b'".
/// Exclusion reading: three context words plus one candidate.
/// Immutable once written to a test-set file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    tokens: [String; 4],
}

impl Question {
    pub fn new(tokens: [String; 4]) -> Self {
        Question { tokens }
    }

    /// Parse a test-set line. Returns `None` unless the line holds exactly
    /// four non-empty tokens.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let tokens = [words.next()?, words.next()?, words.next()?, words.next()?];
        if words.next().is_some() {
            return None;
        }
        Some(Question {
            tokens: tokens.map(str::to_string),
        })
    }

    pub fn tokens(&self) -> &[String; 4] {
        &self.tokens
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// A labeled, ordered run of questions sharing one analogy pattern or one
/// semantic category.
#[derive(Debug, Clone)]
pub struct QuestionGroup {
    pub label: String,
    pub questions: Vec<Question>,
}

impl QuestionGroup {
    pub fn new(label: impl Into<String>) -> Self {
        QuestionGroup {
            label: label.into(),
            questions: Vec::new(),
        }
    }
}
