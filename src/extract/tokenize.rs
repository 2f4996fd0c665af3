//! Word tokenization and stop-word filtering for review text.
//!
//! Splits text the way Penn Treebank style tokenizers do for ordinary prose:
//! punctuation is peeled off into separate tokens and English clitics
//! (`n't`, `'s`, ...) are split from their host word. Hyphenated words and
//! words with digits stay whole so the alphabetic filter can drop them.
//! Typographic apostrophes are read as `'`. A full stop is split off only
//! where it ends a sentence, so abbreviations such as `St.` stay whole.

use regex::Regex;
use std::sync::LazyLock;

/// Standard English stop-word list.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
    "you", "you're", "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves",
    "he", "him", "his", "himself", "she", "she's", "her", "hers", "herself",
    "it", "it's", "its", "itself", "they", "them", "their", "theirs", "themselves",
    "what", "which", "who", "whom", "this", "that", "that'll", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing",
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until", "while",
    "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "in", "out",
    "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
    "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y",
    "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't",
    "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
    "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static ALWAYS_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\.\.\.|--|[;@#$%&!?\[\](){}<>"“”«»])"#).unwrap());

static COMMA_COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([:,])(\D|$)").unwrap());

static CLITIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)(n't|'s|'re|'ve|'ll|'d|'m)$").unwrap());

/// Abbreviations whose trailing period never ends a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "st", "ave", "rd", "blvd", "jr", "sr", "vs", "etc", "approx",
];

/// Compound forms that tokenize into two words
const SPLIT_WORDS: &[(&str, &str, &str)] = &[
    ("cannot", "can", "not"),
    ("gonna", "gon", "na"),
    ("gotta", "got", "ta"),
    ("wanna", "wan", "na"),
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Split text into word and punctuation tokens. Case is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.replace(['\u{2018}', '\u{2019}'], "'");
    let padded = ALWAYS_SPLIT.replace_all(&text, " $1 ");
    let padded = COMMA_COLON.replace_all(&padded, " $1 $2");

    let mut tokens = Vec::new();
    let mut chunks = padded.split_whitespace().peekable();
    while let Some(chunk) = chunks.next() {
        let sentence_end = chunks.peek().map_or(true, |next| starts_sentence(next));
        split_chunk(chunk, sentence_end, &mut tokens);
    }
    tokens
}

/// Whether a chunk can open a new sentence after a full stop
fn starts_sentence(chunk: &str) -> bool {
    chunk
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || !c.is_alphanumeric())
}

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

fn split_chunk(chunk: &str, sentence_end: bool, out: &mut Vec<String>) {
    let mut word = chunk;

    let mut leading = Vec::new();
    while let Some(rest) = word.strip_prefix('\'') {
        leading.push("'".to_string());
        word = rest;
    }
    out.extend(leading);

    let mut trailing = Vec::new();
    let mut period_peeled = false;
    while word.len() > 1 {
        if let Some(rest) = word.strip_suffix('\'') {
            trailing.push("'".to_string());
            word = rest;
        } else if let Some(rest) = word.strip_suffix('.') {
            if period_peeled || !sentence_end || is_abbreviation(rest) {
                break;
            }
            period_peeled = true;
            trailing.push(".".to_string());
            word = rest;
        } else {
            break;
        }
    }

    if !word.is_empty() {
        let lower = word.to_lowercase();
        if let Some((_, head, tail)) = SPLIT_WORDS.iter().find(|(w, _, _)| *w == lower) {
            out.push((*head).to_string());
            out.push((*tail).to_string());
        } else if let Some(caps) = CLITIC.captures(word) {
            out.push(caps[1].to_string());
            out.push(caps[2].to_string());
        } else {
            out.push(word.to_string());
        }
    }

    out.extend(trailing.into_iter().rev());
}

/// Lowercase, tokenize, and keep only alphabetic non-stop-word tokens.
pub fn content_words(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .map(|w| w.to_lowercase())
        .filter(|w| !is_stopword(w) && is_alphabetic(w))
        .collect()
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}
