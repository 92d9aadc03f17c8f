//! Question generation from source lexicons.
//!
//! One generator parameterized by the pattern table covers all four
//! question categories. All sampling draws come from the single `Rng`
//! handed in by the caller.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use crate::config::EvalConfig;
use crate::error::EvalError;
use crate::model::{Question, QuestionGroup, WordGroup, SYNTACTIC_PATTERNS};
use crate::parser::{self, BestmatchCluster, DoesntFitLine};
use crate::writer;

/// Build inflection questions: for every group and each of `combinate`
/// repetitions, the pair of forms at `(index_a, index_b)` concatenated with
/// the same pair of an independently sampled *different* group.
///
/// Foreign pairs may repeat across repetitions; only self-pairing is
/// excluded. `src` names the lexicon in error messages.
pub fn inflection_questions<R: Rng + ?Sized>(
    groups: &[WordGroup],
    src: &Path,
    index_a: usize,
    index_b: usize,
    combinate: usize,
    rng: &mut R,
) -> Result<Vec<Question>, EvalError> {
    let pairs = groups
        .iter()
        .enumerate()
        .map(|(i, group)| pair_at(group, index_a, index_b, src, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let mut questions = Vec::with_capacity(groups.len() * combinate);
    for (i, own) in pairs.iter().enumerate() {
        let pool: Vec<usize> = (0..groups.len())
            .filter(|&j| groups[j] != groups[i])
            .collect();
        if pool.is_empty() {
            let distinct: HashSet<&WordGroup> = groups.iter().collect();
            return Err(EvalError::InsufficientGroups {
                path: src.to_path_buf(),
                distinct: distinct.len(),
            });
        }
        for _ in 0..combinate {
            let foreign = &pairs[pool[rng.gen_range(0..pool.len())]];
            questions.push(Question::new([
                own.0.clone(),
                own.1.clone(),
                foreign.0.clone(),
                foreign.1.clone(),
            ]));
        }
    }
    Ok(questions)
}

fn pair_at(
    group: &WordGroup,
    index_a: usize,
    index_b: usize,
    src: &Path,
    line_no: usize,
) -> Result<(String, String), EvalError> {
    let form = |index: usize| {
        group.forms.get(index).cloned().ok_or_else(|| {
            EvalError::malformed(
                src,
                line_no,
                format!("no form at index {index} (group has {})", group.arity()),
            )
        })
    };
    Ok((form(index_a)?, form(index_b)?))
}

/// Build opposite questions from an antonym-pair lexicon with the same
/// pairing logic as inflections, contrasting the two forms of each line.
pub fn opposite_questions<R: Rng + ?Sized>(
    groups: &[WordGroup],
    src: &Path,
    combinate: usize,
    rng: &mut R,
) -> Result<Vec<Question>, EvalError> {
    inflection_questions(groups, src, 0, 1, combinate, rng)
}

/// Build best-match questions: one per unordered pair of distinct cluster
/// members, each question the first member's forms followed by the second's.
pub fn bestmatch_questions(clusters: &[BestmatchCluster]) -> Vec<Question> {
    let mut questions = Vec::new();
    for cluster in clusters {
        for (i, first) in cluster.members.iter().enumerate() {
            for second in &cluster.members[i + 1..] {
                questions.push(Question::new([
                    first.forms[0].clone(),
                    first.forms[1].clone(),
                    second.forms[0].clone(),
                    second.forms[1].clone(),
                ]));
            }
        }
    }
    questions
}

/// Build odd-one-out questions: the three fitting context words followed by
/// one non-fitting candidate, one question per candidate.
pub fn doesnt_fit_questions(lines: &[DoesntFitLine]) -> Vec<Question> {
    let mut questions = Vec::new();
    for line in lines {
        for misfit in &line.misfits {
            questions.push(Question::new([
                line.fitting[0].clone(),
                line.fitting[1].clone(),
                line.fitting[2].clone(),
                misfit.clone(),
            ]));
        }
    }
    questions
}

/// Generate the syntactic test set: one labeled group per entry of
/// [`SYNTACTIC_PATTERNS`], written to `config.syntactic_questions()`.
/// With `fold` set, the `.nouml` sibling is written as well.
pub fn create_syntactic_testset<R: Rng + ?Sized>(
    config: &EvalConfig,
    fold: bool,
    rng: &mut R,
) -> Result<(), EvalError> {
    let nouns = parser::read_word_groups(&config.lexicon_path(crate::model::Lexicon::Nouns))?;
    let adjectives =
        parser::read_word_groups(&config.lexicon_path(crate::model::Lexicon::Adjectives))?;
    let verbs = parser::read_word_groups(&config.lexicon_path(crate::model::Lexicon::Verbs))?;

    let mut groups = Vec::with_capacity(SYNTACTIC_PATTERNS.len());
    for pattern in &SYNTACTIC_PATTERNS {
        let word_groups = match pattern.lexicon {
            crate::model::Lexicon::Nouns => &nouns,
            crate::model::Lexicon::Adjectives => &adjectives,
            crate::model::Lexicon::Verbs => &verbs,
        };
        let src = config.lexicon_path(pattern.lexicon);
        let questions = inflection_questions(
            word_groups,
            &src,
            pattern.index_a,
            pattern.index_b,
            config.combinate_syntactic,
            rng,
        )?;
        tracing::info!("created pattern {}", pattern.code);
        groups.push(QuestionGroup {
            label: pattern.label(),
            questions,
        });
    }

    writer::write_question_groups(&config.syntactic_questions(), &groups, fold)
}

/// Generate the three semantic test sets (opposite, best match, doesn't
/// fit), each a flat file without group headers.
pub fn create_semantic_testsets<R: Rng + ?Sized>(
    config: &EvalConfig,
    fold: bool,
    rng: &mut R,
) -> Result<(), EvalError> {
    let src = config.opposite_lexicon();
    let pairs = parser::read_word_groups(&src)?;
    let questions = opposite_questions(&pairs, &src, config.combinate_opposite, rng)?;
    writer::write_questions(&config.opposite_questions(), &questions, fold)?;
    tracing::info!("created opposite questions");

    let clusters = parser::read_bestmatch_clusters(&config.bestmatch_lexicon())?;
    let questions = bestmatch_questions(&clusters);
    writer::write_questions(&config.bestmatch_questions(), &questions, fold)?;
    tracing::info!("created best-match questions");

    let lines = parser::read_doesnt_fit_lines(&config.doesntfit_lexicon())?;
    let questions = doesnt_fit_questions(&lines);
    writer::write_questions(&config.doesntfit_questions(), &questions, fold)?;
    tracing::info!("created doesn't-fit questions");

    Ok(())
}
