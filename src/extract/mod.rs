//! Adjective-proximity keyword extraction from review text.
//!
//! For each mention of the target term, the extractor looks at a fixed set
//! of neighbours in the *content word* sequence (stop-words and
//! non-alphabetic tokens removed) and keeps those tagged as adjectives.
//! The neighbour offsets are -1, +2 and +3; +1 is never inspected.

mod tagger;
mod tokenize;

pub use tagger::{LexiconTagger, PosTag, Tagger};
use tokenize::content_words;

/// Offsets from a term mention, in the order their words are reported
const NEIGHBOUR_OFFSETS: [isize; 3] = [-1, 2, 3];

/// Extracts adjectives describing a target term from free text
pub struct KeywordExtractor<T: Tagger> {
    tagger: T,
}

impl<T: Tagger> KeywordExtractor<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    /// Return the adjectives found next to each mention of `term`.
    ///
    /// The result keeps discovery order and duplicates. Text that never
    /// mentions the term is not tagged at all.
    pub fn extract(&self, text: &str, term: &str) -> Vec<String> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        let words = content_words(text);
        if !words.iter().any(|w| *w == term) {
            return Vec::new();
        }

        let tagged = self.tagger.tag(&words);
        let mut keywords = Vec::new();
        for (i, (word, _)) in tagged.iter().enumerate() {
            if *word != term {
                continue;
            }
            for offset in NEIGHBOUR_OFFSETS {
                let Some(j) = i.checked_add_signed(offset) else {
                    continue;
                };
                if let Some((neighbour, tag)) = tagged.get(j) {
                    if tag.is_adjective() {
                        keywords.push(neighbour.clone());
                    }
                }
            }
        }

        tracing::debug!(
            term = %term,
            words = tagged.len(),
            found = keywords.len(),
            "Extracted review keywords"
        );
        keywords
    }

    /// Extract from optional review text; absent text yields nothing
    pub fn extract_opt(&self, text: Option<&str>, term: &str) -> Vec<String> {
        text.map(|t| self.extract(t, term)).unwrap_or_default()
    }
}

impl Default for KeywordExtractor<LexiconTagger> {
    fn default() -> Self {
        Self::new(LexiconTagger::new())
    }
}
