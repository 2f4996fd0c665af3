//! Part-of-speech tagging for review words.

use std::collections::HashMap;

/// Coarse part-of-speech tags, modelled on the Penn Treebank classes the
/// extractor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// JJ
    Adjective,
    /// JJR
    Comparative,
    /// JJS
    Superlative,
    Noun,
    Verb,
    Adverb,
    Other,
}

impl PosTag {
    /// Positive, comparative and superlative adjectives all count
    pub fn is_adjective(self) -> bool {
        matches!(
            self,
            PosTag::Adjective | PosTag::Comparative | PosTag::Superlative
        )
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosTag::Adjective => write!(f, "JJ"),
            PosTag::Comparative => write!(f, "JJR"),
            PosTag::Superlative => write!(f, "JJS"),
            PosTag::Noun => write!(f, "NN"),
            PosTag::Verb => write!(f, "VB"),
            PosTag::Adverb => write!(f, "RB"),
            PosTag::Other => write!(f, "OTHER"),
        }
    }
}

/// Tags a word sequence, returning one `(word, tag)` pair per input word in
/// the same order.
pub trait Tagger {
    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)> {
        (**self).tag(words)
    }
}

const ADJECTIVES: &[&str] = &[
    // taste and texture
    "sweet", "bitter", "creamy", "smooth", "rich", "strong", "weak", "light", "fresh",
    "delicious", "tasty", "yummy", "earthy", "grassy", "nutty", "floral", "savory", "salty",
    "sour", "milky", "sugary", "watery", "chalky", "gritty", "clumpy", "lumpy", "powdery",
    "thick", "thin", "frothy", "foamy", "silky", "velvety", "bland", "subtle", "balanced",
    "vibrant", "umami", "mild", "hot", "cold", "iced", "warm", "green", "dark", "pale",
    "bright", "authentic", "ceremonial", "premium", "organic", "vegan",
    // judgement
    "good", "great", "nice", "bad", "amazing", "awesome", "perfect", "wonderful",
    "excellent", "fantastic", "incredible", "terrible", "awful", "horrible", "decent",
    "solid", "fine", "okay", "ok", "average", "mediocre", "disappointing", "underwhelming",
    "refreshing", "satisfying", "interesting", "unique", "special", "favorite", "favourite",
    "legit", "consistent", "generous", "standard", "classic", "traditional", "original",
    "natural", "typical", "usual", "real", "true", "full", "overpriced", "expensive",
    "cheap", "pricey", "affordable", "friendly", "lovely", "cozy", "cosy", "cute", "clean",
    "quiet", "busy", "small", "large", "big", "huge", "tiny", "new", "old", "high", "low",
    "easy", "hard", "quick", "slow", "happy", "sad", "pleasant", "beautiful", "ugly",
    "japanese", "overall", "next", "last", "first",
];

const COMPARATIVES: &[&str] = &["better", "worse", "less", "lesser", "farther", "elder"];

const SUPERLATIVES: &[&str] = &["best", "worst", "least", "farthest", "eldest"];

const NOUNS: &[&str] = &[
    "matcha", "latte", "lattes", "tea", "teas", "coffee", "cafe", "café", "drink", "drinks",
    "milk", "oat", "almond", "soy", "cup", "cups", "place", "shop", "staff", "service",
    "price", "prices", "espresso", "chai", "hojicha", "powder", "foam", "flavor", "flavour",
    "taste", "sugar", "syrup", "ice", "water", "barista", "baristas", "time", "order",
    "location", "spot", "vibe", "vibes", "atmosphere", "menu", "pastry", "pastries", "food",
    "seating", "line", "wait", "size", "party", "city", "quality", "bakery", "berry",
    "strawberry", "cream", "dessert", "cake", "cookie", "croissant", "day", "way",
    "dish", "fish", "thing", "things", "something", "nothing", "everything", "morning",
    "evening", "spring", "finish", "finishes",
];

const VERBS: &[&str] = &[
    "love", "like", "get", "got", "try", "make", "made", "go", "went", "come", "came",
    "recommend", "say", "said", "think", "know", "knew", "want", "need", "give", "gave",
    "take", "took", "keep", "kept", "feel", "felt", "taste", "tastes", "seems", "seem",
    "ask", "asked", "buy", "bought", "visit",
];

const ADVERBS: &[&str] = &[
    "also", "really", "well", "even", "still", "always", "never", "though", "pretty",
    "quite", "super", "definitely", "absolutely", "almost", "already", "maybe", "rather",
    "somewhat", "actually", "however", "ever", "often", "sometimes", "usually",
];

/// Modals, numerals and pronouns the stop-word list lets through
const FUNCTION_WORDS: &[&str] = &[
    "would", "could", "might", "must", "shall", "us", "one", "two", "three", "four", "five",
    "six", "seven", "eight", "nine", "ten",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish"];

/// Lexicon-first tagger with suffix heuristics.
///
/// Explicit lexicon entries win; otherwise comparatives and superlatives
/// are recognised from a known adjective stem, and common derivational
/// suffixes decide the rest. Unknown words default to [`PosTag::Noun`].
pub struct LexiconTagger {
    lexicon: HashMap<String, PosTag>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        let mut lexicon = HashMap::new();
        let groups: [(&[&str], PosTag); 7] = [
            (NOUNS, PosTag::Noun),
            (FUNCTION_WORDS, PosTag::Other),
            (VERBS, PosTag::Verb),
            (ADVERBS, PosTag::Adverb),
            (ADJECTIVES, PosTag::Adjective),
            (COMPARATIVES, PosTag::Comparative),
            (SUPERLATIVES, PosTag::Superlative),
        ];
        for (words, tag) in groups {
            for word in words {
                lexicon.insert((*word).to_string(), tag);
            }
        }
        Self { lexicon }
    }

    /// Add words that should always be tagged as adjectives
    pub fn with_adjectives<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.lexicon.insert(word, PosTag::Adjective);
            }
        }
        self
    }

    fn tag_word(&self, word: &str) -> PosTag {
        if let Some(tag) = self.lexicon.get(word) {
            return *tag;
        }
        if let Some(stem) = word.strip_suffix("est") {
            if self.is_adjective_stem(stem) {
                return PosTag::Superlative;
            }
        }
        if let Some(stem) = word.strip_suffix("er") {
            if self.is_adjective_stem(stem) {
                return PosTag::Comparative;
            }
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|s| word.ends_with(s) && word.len() >= s.len() + 3)
        {
            return PosTag::Adjective;
        }
        if word.ends_with("ly") {
            return PosTag::Adverb;
        }
        if word.len() > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
            return PosTag::Verb;
        }
        if is_y_adjective(word) {
            return PosTag::Adjective;
        }
        PosTag::Noun
    }

    /// Resolve an inflected stem back to a known positive adjective:
    /// `sweet|er`, `nic|er`, `bigg|er`, `creami|er`.
    fn is_adjective_stem(&self, stem: &str) -> bool {
        if stem.is_empty() {
            return false;
        }
        let known = |w: &str| self.lexicon.get(w) == Some(&PosTag::Adjective);
        if known(stem) || known(&format!("{stem}e")) {
            return true;
        }
        if let Some(base) = stem.strip_suffix('i') {
            if known(&format!("{base}y")) {
                return true;
            }
        }
        let mut chars = stem.chars().rev();
        match (chars.next(), chars.next()) {
            (Some(a), Some(b)) if a == b => known(&stem[..stem.len() - a.len_utf8()]),
            _ => false,
        }
    }
}

/// Consonant + `y` words like "earthy" or "spicy", excluding `-ity` nouns
/// and `-ry` nouns.
fn is_y_adjective(word: &str) -> bool {
    let Some(stem) = word.strip_suffix('y') else {
        return false;
    };
    if stem.chars().count() < 3 || stem.ends_with("it") || stem.ends_with('r') {
        return false;
    }
    stem.chars()
        .last()
        .is_some_and(|c| c.is_alphabetic() && !"aeiou".contains(c))
}

impl Tagger for LexiconTagger {
    fn tag(&self, words: &[String]) -> Vec<(String, PosTag)> {
        words
            .iter()
            .map(|w| (w.clone(), self.tag_word(w)))
            .collect()
    }
}
