// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// The fixed word → id mapping learned from the base corpus.
//
// Ids are dense: a vocabulary of n words uses exactly the ids
// 0..n, and the word at position i of `tokens` has id i. The
// order is the construction order from the base corpus (most
// frequent word first), so the pretrained embedding rows line
// up with these ids.
//
// Once loaded the vocabulary is never mutated by this pipeline;
// a personality corpus may only use words already in it.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Dense, immutable word-level vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// id → word (index is the id)
    tokens: Vec<String>,

    /// word → id
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from words listed in id order.
    /// Returns the first duplicated word if the list is not unique.
    pub fn from_ordered<I, S>(words: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = Vec::new();
        let mut index  = HashMap::new();

        for word in words {
            let word = word.into();
            let id   = tokens.len() as u32;
            if index.insert(word.clone(), id).is_some() {
                return Err(word);
            }
            tokens.push(word);
        }

        Ok(Self { tokens, index })
    }

    /// Build a vocabulary from an unordered word → id map.
    ///
    /// The ids must cover 0..n exactly once; anything else
    /// (gaps, repeats, ids past the end) is rejected with a
    /// description of the first problem found.
    pub fn from_ids<I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        let entries: Vec<(String, u32)> = entries.into_iter().collect();
        let n = entries.len();

        let mut slots: Vec<Option<String>> = vec![None; n];
        for (word, id) in entries {
            let slot = slots
                .get_mut(id as usize)
                .ok_or_else(|| format!("id {id} for \"{word}\" is outside 0..{n}"))?;
            if let Some(existing) = slot {
                return Err(format!("id {id} is used by both \"{existing}\" and \"{word}\""));
            }
            *slot = Some(word);
        }

        // n entries with n distinct ids in 0..n leaves no gaps
        let tokens: Vec<String> = slots.into_iter().flatten().collect();
        Self::from_ordered(tokens).map_err(|w| format!("word \"{w}\" appears twice"))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Id of a word, if the word is known.
    pub fn id_of(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }

    /// Word for an id, if the id is in range.
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Inverse mapping over a whole id sequence.
    /// Fails with the first id that has no word.
    pub fn decode(&self, ids: &[u32]) -> Result<Vec<&str>, u32> {
        ids.iter()
            .map(|&id| self.token_of(id).ok_or(id))
            .collect()
    }

    /// Words in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, w)| (i as u32, w.as_str()))
    }
}

/// Serialises as a JSON object `{ "word": id, ... }` written in id order,
/// the same shape a word-level tokenizer vocabulary file uses.
impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(id, word)| (word, id)))
    }
}
