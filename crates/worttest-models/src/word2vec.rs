//! word2vec-format model loading and similarity queries.
//!
//! Supports the text format and the classic binary format; `.bin` files
//! are read as binary, everything else as text. Vectors are unit-normalized
//! at load time so similarity queries reduce to dot products.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use worttest_core::traits::{EmbeddingModel, SimilarWord};

use crate::error::ModelError;

/// A loaded word2vec model with unit-normalized vectors.
#[derive(Debug)]
pub struct Word2VecModel {
    name: String,
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<f32>,
    dim: usize,
}

impl Word2VecModel {
    /// Load a model from `path`; the `.bin` extension selects the binary
    /// format.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let binary = path.extension().is_some_and(|ext| ext == "bin");
        let file = File::open(path).map_err(|e| ModelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let (words, vectors, dim) = if binary {
            read_binary(&mut reader, path)?
        } else {
            read_text(&mut reader, path)?
        };

        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        tracing::info!(
            "loaded model '{}': {} words, {} dimensions",
            name,
            words.len(),
            dim
        );

        Ok(Word2VecModel {
            name,
            words,
            index,
            vectors,
            dim,
        })
    }

    /// Vocabulary size.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Vector dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dim
    }

    fn vector(&self, i: usize) -> &[f32] {
        &self.vectors[i * self.dim..(i + 1) * self.dim]
    }

    fn lookup(&self, word: &str) -> anyhow::Result<usize> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("word not in vocabulary: {word}"))
    }
}

impl EmbeddingModel for Word2VecModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn in_vocabulary(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn analogy(
        &self,
        positive: [&str; 2],
        negative: &str,
        topn: usize,
    ) -> anyhow::Result<Vec<SimilarWord>> {
        let pos_a = self.lookup(positive[0])?;
        let pos_b = self.lookup(positive[1])?;
        let neg = self.lookup(negative)?;

        let mut target = vec![0f32; self.dim];
        for (i, t) in target.iter_mut().enumerate() {
            *t = self.vector(pos_a)[i] + self.vector(pos_b)[i] - self.vector(neg)[i];
        }
        normalize(&mut target);

        let mut ranked: Vec<(usize, f32)> = (0..self.words.len())
            .filter(|&i| i != pos_a && i != pos_b && i != neg)
            .map(|i| (i, dot(&target, self.vector(i))))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(topn);

        Ok(ranked
            .into_iter()
            .map(|(i, score)| SimilarWord::new(self.words[i].clone(), score))
            .collect())
    }

    fn odd_one_out(&self, words: &[&str]) -> anyhow::Result<String> {
        anyhow::ensure!(words.len() >= 2, "odd-one-out needs at least 2 words");
        let indices = words
            .iter()
            .map(|w| self.lookup(w))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut mean = vec![0f32; self.dim];
        for &i in &indices {
            for (m, v) in mean.iter_mut().zip(self.vector(i)) {
                *m += v;
            }
        }
        normalize(&mut mean);

        let mut odd = 0usize;
        let mut lowest = f32::INFINITY;
        for (pos, &i) in indices.iter().enumerate() {
            let similarity = dot(&mean, self.vector(i));
            if similarity < lowest {
                lowest = similarity;
                odd = pos;
            }
        }
        Ok(words[odd].to_string())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn normalize(vector: &mut [f32]) {
    let norm = dot(vector, vector).sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

fn parse_header(line: &str, path: &Path) -> Result<(usize, usize), ModelError> {
    let bad = |reason: &str| ModelError::BadHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let mut parts = line.split_whitespace();
    let vocab = parts
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .ok_or_else(|| bad("missing vocabulary size"))?;
    let dim = parts
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .ok_or_else(|| bad("missing dimensionality"))?;
    if parts.next().is_some() {
        return Err(bad("trailing tokens after vocabulary size and dimensionality"));
    }
    if dim == 0 {
        return Err(bad("zero dimensionality"));
    }
    Ok((vocab, dim))
}

type Loaded = (Vec<String>, Vec<f32>, usize);

fn read_text(reader: &mut impl BufRead, path: &Path) -> Result<Loaded, ModelError> {
    let io_err = |e: std::io::Error| ModelError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut header = String::new();
    reader.read_line(&mut header).map_err(io_err)?;
    let (vocab, dim) = parse_header(header.trim(), path)?;

    let mut words = Vec::with_capacity(vocab);
    let mut vectors = Vec::with_capacity(vocab * dim);
    let mut line = String::new();

    for i in 0..vocab {
        line.clear();
        let read = reader.read_line(&mut line).map_err(io_err)?;
        if read == 0 {
            return Err(ModelError::TruncatedVectors {
                index: i,
                word: words.last().cloned().unwrap_or_default(),
            });
        }
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(ModelError::TruncatedVectors {
                index: i,
                word: words.last().cloned().unwrap_or_default(),
            });
        };

        let row_start = vectors.len();
        for component in parts {
            let value: f32 = component.parse().map_err(|_| ModelError::BadVector {
                word: word.to_string(),
                component: component.to_string(),
            })?;
            vectors.push(value);
        }
        let actual = vectors.len() - row_start;
        if actual != dim {
            return Err(ModelError::DimensionMismatch {
                word: word.to_string(),
                expected: dim,
                actual,
            });
        }
        normalize(&mut vectors[row_start..]);
        words.push(word.to_string());
    }

    Ok((words, vectors, dim))
}

fn read_binary(reader: &mut impl BufRead, path: &Path) -> Result<Loaded, ModelError> {
    let io_err = |e: std::io::Error| ModelError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header).map_err(io_err)?;
    let header = String::from_utf8_lossy(&header);
    let (vocab, dim) = parse_header(header.trim(), path)?;

    let mut words = Vec::with_capacity(vocab);
    let mut vectors = Vec::with_capacity(vocab * dim);
    let mut row = vec![0u8; dim * 4];

    for i in 0..vocab {
        let word = match read_binary_word(reader).map_err(io_err)? {
            Some(word) => word,
            None => {
                return Err(ModelError::TruncatedVectors {
                    index: i,
                    word: words.last().cloned().unwrap_or_default(),
                })
            }
        };
        if let Err(e) = reader.read_exact(&mut row) {
            return match e.kind() {
                ErrorKind::UnexpectedEof => Err(ModelError::TruncatedVectors { index: i, word }),
                _ => Err(io_err(e)),
            };
        }
        let row_start = vectors.len();
        for chunk in row.chunks_exact(4) {
            vectors.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        normalize(&mut vectors[row_start..]);
        words.push(word);
    }

    Ok((words, vectors, dim))
}

/// Read one vocabulary entry: leading newlines skipped, word bytes up to
/// the separating space. `None` on clean end of file.
fn read_binary_word(reader: &mut impl Read) -> std::io::Result<Option<String>> {
    let mut bytes = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        match reader.read_exact(&mut byte) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                break;
            }
            Err(e) => return Err(e),
        }
        match byte[0] {
            b' ' | b'\n' | b'\r' if bytes.is_empty() => continue,
            b' ' | b'\n' => break,
            b => bytes.push(b),
        }
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
