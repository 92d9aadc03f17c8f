//! Test-set configuration.
//!
//! An explicit configuration structure passed into each component, loadable
//! from a `worttest.toml` file. Components never consult global argument
//! state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::model::Lexicon;

/// Source and target paths plus generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Directory containing the source lexicons.
    pub src_dir: PathBuf,
    /// Directory the generated test-set files are written to.
    pub data_dir: PathBuf,
    /// Foreign-pair repetitions per word group for syntactic patterns.
    pub combinate_syntactic: usize,
    /// Foreign-pair repetitions per word pair for opposite questions.
    pub combinate_opposite: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from("src"),
            data_dir: PathBuf::from("data"),
            combinate_syntactic: 5,
            combinate_opposite: 10,
        }
    }
}

impl EvalConfig {
    /// Load config from an explicit path, from `worttest.toml` in the
    /// current directory, or fall back to the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            Some(p.to_path_buf())
        } else {
            let local = PathBuf::from("worttest.toml");
            local.exists().then_some(local)
        };

        match config_path {
            Some(p) => {
                let content = std::fs::read_to_string(&p)
                    .with_context(|| format!("failed to read config: {}", p.display()))?;
                let config: EvalConfig = toml::from_str(&content)
                    .with_context(|| format!("failed to parse config: {}", p.display()))?;
                Ok(config)
            }
            None => Ok(EvalConfig::default()),
        }
    }

    /// Reject parameter values the generator cannot work with.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.combinate_syntactic == 0 {
            return Err(EvalError::InvalidConfig(
                "combinate_syntactic must be at least 1".into(),
            ));
        }
        if self.combinate_opposite == 0 {
            return Err(EvalError::InvalidConfig(
                "combinate_opposite must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Source lexicon for the given pattern lexicon.
    pub fn lexicon_path(&self, lexicon: Lexicon) -> PathBuf {
        let file = match lexicon {
            Lexicon::Nouns => "nouns.txt",
            Lexicon::Adjectives => "adjectives.txt",
            Lexicon::Verbs => "verbs.txt",
        };
        self.src_dir.join(file)
    }

    pub fn opposite_lexicon(&self) -> PathBuf {
        self.src_dir.join("opposite.txt")
    }

    pub fn bestmatch_lexicon(&self) -> PathBuf {
        self.src_dir.join("bestmatch.txt")
    }

    pub fn doesntfit_lexicon(&self) -> PathBuf {
        self.src_dir.join("doesntfit.txt")
    }

    pub fn syntactic_questions(&self) -> PathBuf {
        self.data_dir.join("syntactic.questions")
    }

    pub fn opposite_questions(&self) -> PathBuf {
        self.data_dir.join("semantic_op.questions")
    }

    pub fn bestmatch_questions(&self) -> PathBuf {
        self.data_dir.join("semantic_bm.questions")
    }

    pub fn doesntfit_questions(&self) -> PathBuf {
        self.data_dir.join("semantic_df.questions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_conventional_layout() {
        let config = EvalConfig::default();
        assert_eq!(config.lexicon_path(Lexicon::Nouns), Path::new("src/nouns.txt"));
        assert_eq!(
            config.syntactic_questions(),
            Path::new("data/syntactic.questions")
        );
        assert_eq!(config.combinate_syntactic, 5);
        assert_eq!(config.combinate_opposite, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_combinate_is_rejected() {
        let config = EvalConfig {
            combinate_syntactic: 0,
            ..EvalConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("combinate_syntactic"));
    }

    #[test]
    fn load_from_parses_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worttest.toml");
        std::fs::write(
            &path,
            "src_dir = \"lexicons\"\ndata_dir = \"out\"\ncombinate_syntactic = 2\n",
        )
        .unwrap();

        let config = EvalConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.src_dir, Path::new("lexicons"));
        assert_eq!(config.data_dir, Path::new("out"));
        assert_eq!(config.combinate_syntactic, 2);
        // unspecified keys keep their defaults
        assert_eq!(config.combinate_opposite, 10);
    }

    #[test]
    fn load_from_missing_explicit_path_fails() {
        let result = EvalConfig::load_from(Some(Path::new("nonexistent.toml")));
        assert!(result.is_err());
    }
}
