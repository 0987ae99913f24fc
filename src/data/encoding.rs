// ============================================================
// Layer 4 — Word Encoding
// ============================================================
// Shared by the base corpus loader and the personality encoder:
// read a raw text file, split it into words, map words to ids.
//
// Words are whitespace-delimited and taken exactly as written.
// No lowercasing or punctuation stripping, because the base
// vocabulary was built the same way.

use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use crate::domain::{
    error::{TuneError, TuneResult},
    vocabulary::Vocabulary,
};

/// Read a whole UTF-8 text file.
pub fn read_text(path: &Path) -> TuneResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TuneError::MissingArtifact { path: path.to_path_buf() },
        _ => TuneError::io(path, e),
    })
}

/// Split text into words, keeping their order.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Map every word to its id.
///
/// Stops at the first word the vocabulary does not contain;
/// nothing is returned for the words before it.
pub fn encode(vocab: &Vocabulary, words: &[&str]) -> TuneResult<Vec<u32>> {
    if let Some(position) = words.iter().position(|w| !vocab.contains(w)) {
        return Err(TuneError::UnknownToken {
            token: words[position].to_string(),
            position,
        });
    }
    Ok(words.iter().filter_map(|w| vocab.id_of(w)).collect())
}

/// Build a vocabulary from a base corpus: most frequent word gets
/// id 0, ties go to whichever word appeared first.
/// Errors with the offending word if ranking produced a duplicate.
pub fn build_vocabulary(words: &[&str]) -> Result<Vocabulary, String> {
    // word → (count, first position)
    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, &word) in words.iter().enumerate() {
        stats.entry(word).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = stats
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    Vocabulary::from_ordered(ranked.into_iter().map(|(word, _, _)| word))
}
