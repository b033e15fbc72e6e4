//! Suggesting new keywords from a corpus of known spam.
//!
//! Texts are lower-cased, stripped of ASCII punctuation and split on
//! whitespace. Stopwords (English plus common Filipino function words) are
//! dropped and the remaining words are ranked by frequency.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::Serialize;

/// Number of suggestions returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_WORDS: usize = 30;

const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've", "you'll",
    "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "she's",
    "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "what", "which", "who", "whom", "this", "that", "that'll", "these", "those", "am",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until", "while",
    "of", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "don't",
    "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't",
    "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
    "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't",
];

const FILIPINO_STOPWORDS: &[&str] = &[
    "ang", "ng", "sa", "na", "mga", "ay", "at", "ko", "ni", "si", "ito", "yan", "yun", "diyan", "doon",
    "dito", "ikaw", "kami", "kayo", "sila", "tayo", "ako", "mo", "namin", "nila", "kanila", "akin",
    "iyo", "dapat", "hindi", "oo", "huwag", "wala", "may", "nasa", "kaya", "nang", "ngayon", "bakit",
    "paano", "kailan", "saan", "lahat", "iba", "kanya", "para",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(FILIPINO_STOPWORDS.iter())
        .copied()
        .collect()
});

/// A candidate keyword and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lower-cases `text`, removes ASCII punctuation and splits on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// The `top` most frequent non-stopwords across `texts`, most frequent first.
/// Words with equal counts are ordered alphabetically.
pub fn top_words<I, S>(texts: I, top: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for word in tokenize(text.as_ref()) {
            if !is_stopword(&word) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(top);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(tokenize("FREE!!! cash, now."), vec!["free", "cash", "now"]);
        assert_eq!(tokenize("don't"), vec!["dont"]);
    }

    #[test]
    fn test_stopwords_cover_both_languages() {
        assert!(is_stopword("the"));
        assert!(is_stopword("ang"));
        assert!(!is_stopword("gcash"));
    }

    #[test]
    fn test_top_words_ranks_by_count_then_alphabetically() {
        let texts = [
            "Claim your FREE bonus now!",
            "Free GCash bonus, claim na!",
            "Libreng bonus sa GCash",
        ];
        let top = top_words(texts, 3);
        assert_eq!(
            top,
            vec![
                WordCount { word: "bonus".into(), count: 3 },
                WordCount { word: "claim".into(), count: 2 },
                WordCount { word: "free".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_top_words_with_no_text() {
        assert!(top_words(Vec::<String>::new(), 5).is_empty());
    }
}
