//! Line-oriented lexicon and test-set parsers.
//!
//! All readers fail fast on malformed lines with the offender identified;
//! silently skipping bad lines previously led to undercounted test sets.

use std::path::Path;

use crate::error::EvalError;
use crate::model::{Question, QuestionGroup, WordGroup};

/// A labeled cluster of best-match members, each member a two-form split.
#[derive(Debug, Clone)]
pub struct BestmatchCluster {
    pub label: String,
    pub members: Vec<WordGroup>,
}

/// One odd-one-out source line: three fitting context words plus the
/// non-fitting candidates.
#[derive(Debug, Clone)]
pub struct DoesntFitLine {
    pub fitting: [String; 3],
    pub misfits: Vec<String>,
}

fn read_lines(path: &Path) -> Result<Vec<String>, EvalError> {
    let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
    Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
}

/// Read a lexicon file into word groups, one group per line.
///
/// Enforces the file invariant that every group has the same arity.
pub fn read_word_groups(path: &Path) -> Result<Vec<WordGroup>, EvalError> {
    let lines = read_lines(path)?;
    let mut groups = Vec::with_capacity(lines.len());
    let mut arity = None;

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            return Err(EvalError::malformed(path, line_no, "empty line"));
        }
        let group = WordGroup::parse(line.trim());
        if group.forms.iter().any(|f| f.is_empty()) {
            return Err(EvalError::malformed(path, line_no, "empty word form"));
        }
        match arity {
            None => arity = Some(group.arity()),
            Some(expected) if expected != group.arity() => {
                return Err(EvalError::malformed(
                    path,
                    line_no,
                    format!("expected {} forms, found {}", expected, group.arity()),
                ));
            }
            Some(_) => {}
        }
        groups.push(group);
    }

    Ok(groups)
}

/// Read a best-match lexicon: clusters introduced by a colon-prefixed label
/// line, members one per line. Every member must split into exactly two
/// forms so that a pair of members always yields a 4-token question.
pub fn read_bestmatch_clusters(path: &Path) -> Result<Vec<BestmatchCluster>, EvalError> {
    let lines = read_lines(path)?;
    let mut clusters: Vec<BestmatchCluster> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            return Err(EvalError::malformed(path, line_no, "empty line"));
        }
        if let Some(label) = line.strip_prefix(':') {
            let label = label.trim();
            if label.is_empty() {
                return Err(EvalError::malformed(path, line_no, "empty cluster label"));
            }
            clusters.push(BestmatchCluster {
                label: label.to_string(),
                members: Vec::new(),
            });
            continue;
        }
        let Some(cluster) = clusters.last_mut() else {
            return Err(EvalError::malformed(
                path,
                line_no,
                "member line before the first cluster label",
            ));
        };
        let member = WordGroup::parse(line.trim());
        if member.arity() != 2 || member.forms.iter().any(|f| f.is_empty()) {
            return Err(EvalError::malformed(
                path,
                line_no,
                format!("best-match member must have exactly 2 forms, found {}", member.arity()),
            ));
        }
        cluster.members.push(member);
    }

    Ok(clusters)
}

/// Read an odd-one-out lexicon: three fitting words plus one `-`-joined
/// candidate list per line.
pub fn read_doesnt_fit_lines(path: &Path) -> Result<Vec<DoesntFitLine>, EvalError> {
    let lines = read_lines(path)?;
    let mut parsed = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [a, b, c, candidates] = tokens.as_slice() else {
            return Err(EvalError::malformed(
                path,
                line_no,
                format!(
                    "expected 3 fitting words and one candidate list, found {} tokens",
                    tokens.len()
                ),
            ));
        };
        let misfits: Vec<String> = candidates
            .split(WordGroup::DELIMITER)
            .map(str::to_string)
            .collect();
        if misfits.iter().any(|m| m.is_empty()) {
            return Err(EvalError::malformed(path, line_no, "empty candidate"));
        }
        parsed.push(DoesntFitLine {
            fitting: [a.to_string(), b.to_string(), c.to_string()],
            misfits,
        });
    }

    Ok(parsed)
}

/// Read a test-set file back into question groups.
///
/// Group boundaries are `": "` header lines with the marker stripped from
/// the label. A missing marker on the very first group is tolerated: its
/// questions land in a group named `fallback_label`.
pub fn read_question_groups(
    path: &Path,
    fallback_label: &str,
) -> Result<Vec<QuestionGroup>, EvalError> {
    let lines = read_lines(path)?;
    let mut groups: Vec<QuestionGroup> = Vec::new();
    let mut current: Option<QuestionGroup> = None;

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        if let Some(label) = line.strip_prefix(": ") {
            if label.trim().is_empty() {
                return Err(EvalError::malformed(path, line_no, "empty group label"));
            }
            if let Some(group) = current.take() {
                groups.push(group);
            }
            current = Some(QuestionGroup::new(label.trim()));
            continue;
        }
        let Some(question) = Question::parse(line) else {
            return Err(EvalError::malformed(
                path,
                line_no,
                "expected 4 whitespace-separated tokens",
            ));
        };
        current
            .get_or_insert_with(|| QuestionGroup::new(fallback_label))
            .questions
            .push(question);
    }

    if let Some(group) = current.take() {
        groups.push(group);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn word_groups_from_lexicon() {
        let file = fixture("Haus-Häuser\nBaum-Bäume\nHand-Hände\n");
        let groups = read_word_groups(file.path()).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].forms, vec!["Baum", "Bäume"]);
    }

    #[test]
    fn word_groups_reject_mixed_arity() {
        let file = fixture("Haus-Häuser\ngut-besser-beste\n");
        let err = read_word_groups(file.path()).unwrap_err();
        assert!(err.to_string().contains("expected 2 forms, found 3"), "{err}");
        assert!(err.is_data());
    }

    #[test]
    fn word_groups_reject_empty_lines() {
        let file = fixture("Haus-Häuser\n\nBaum-Bäume\n");
        let err = read_word_groups(file.path()).unwrap_err();
        assert!(err.to_string().contains(":2:"), "{err}");
    }

    #[test]
    fn missing_lexicon_is_an_io_error() {
        let err = read_word_groups(Path::new("no/such/lexicon.txt")).unwrap_err();
        assert!(matches!(err, EvalError::Io { .. }));
    }

    #[test]
    fn bestmatch_clusters_parse() {
        let file = fixture(":Währung\nEuro-Europa\nDollar-USA\nYen-Japan\n:Gefühle\nFreude-Glück\nWut-Zorn\n");
        let clusters = read_bestmatch_clusters(file.path()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].label, "Währung");
        assert_eq!(clusters[0].members.len(), 3);
        assert_eq!(clusters[1].members[1].forms, vec!["Wut", "Zorn"]);
    }

    #[test]
    fn bestmatch_member_before_label_fails() {
        let file = fixture("Euro-Europa\n:Währung\n");
        let err = read_bestmatch_clusters(file.path()).unwrap_err();
        assert!(err.to_string().contains("before the first cluster label"));
    }

    #[test]
    fn bestmatch_member_with_wrong_arity_fails() {
        let file = fixture(":Währung\nEuro\n");
        let err = read_bestmatch_clusters(file.path()).unwrap_err();
        assert!(err.to_string().contains("exactly 2 forms"));
    }

    #[test]
    fn doesnt_fit_lines_parse() {
        let file = fixture("Hund Katze Maus Auto-Tisch\nrot grün blau laut\n");
        let lines = read_doesnt_fit_lines(file.path()).unwrap();
        assert_eq!(lines[0].fitting[2], "Maus");
        assert_eq!(lines[0].misfits, vec!["Auto", "Tisch"]);
        assert_eq!(lines[1].misfits, vec!["laut"]);
    }

    #[test]
    fn doesnt_fit_wrong_token_count_fails() {
        let file = fixture("Hund Katze Auto-Tisch\n");
        let err = read_doesnt_fit_lines(file.path()).unwrap_err();
        assert!(err.to_string().contains("found 3 tokens"));
    }

    #[test]
    fn question_groups_split_on_headers() {
        let file = fixture(": nouns: SI/PL\na b c d\ne f g h\n: nouns: PL/SI\ni j k l\n");
        let groups = read_question_groups(file.path(), "unnamed").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "nouns: SI/PL");
        assert_eq!(groups[0].questions.len(), 2);
        assert_eq!(groups[1].questions.len(), 1);
    }

    #[test]
    fn question_groups_tolerate_missing_first_header() {
        let file = fixture("a b c d\n: labeled\ne f g h\n");
        let groups = read_question_groups(file.path(), "opposite").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "opposite");
        assert_eq!(groups[1].label, "labeled");
    }

    #[test]
    fn question_groups_reject_short_lines() {
        let file = fixture(": ok\na b c\n");
        let err = read_question_groups(file.path(), "x").unwrap_err();
        assert!(err.to_string().contains(":2:"), "{err}");
    }

    #[test]
    fn header_only_group_is_kept_empty() {
        let file = fixture(": empty group\n: second\na b c d\n");
        let groups = read_question_groups(file.path(), "x").unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups[0].questions.is_empty());
    }
}
