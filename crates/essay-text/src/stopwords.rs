//! Stopword sets.

use std::collections::HashSet;

use serde::Deserialize;
use strum::{AsRefStr, EnumString};

/// Languages with a built-in stopword list and lemmatizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
  #[default]
  English,
}

const ENGLISH: &[&str] = &[
  "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
  "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
  "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it",
  "it's", "its", "itself", "they", "them", "their", "theirs", "themselves",
  "what", "which", "who", "whom", "this", "that", "that'll", "these", "those",
  "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
  "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
  "or", "because", "as", "until", "while", "of", "at", "by", "for", "with",
  "about", "against", "between", "into", "through", "during", "before",
  "after", "above", "below", "to", "from", "up", "down", "in", "out", "on",
  "off", "over", "under", "again", "further", "then", "once", "here", "there",
  "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
  "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
  "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "don't",
  "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
  "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
  "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
  "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't",
  "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren",
  "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// A fixed set of lowercase function words to ignore.
#[derive(Debug, Clone)]
pub struct StopWords {
  words: HashSet<&'static str>,
}

impl StopWords {
  pub fn for_language(language: Language) -> Self {
    let list = match language {
      Language::English => ENGLISH,
    };
    Self { words: list.iter().copied().collect() }
  }

  pub fn english() -> Self { Self::for_language(Language::English) }

  /// `word` must already be lowercase.
  pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;

  #[test]
  fn english_list_is_complete() {
    assert_eq!(StopWords::english().words.len(), 179);
  }

  #[test]
  fn membership_is_case_sensitive() {
    let sw = StopWords::english();
    assert!(sw.contains("the"));
    assert!(sw.contains("wouldn't"));
    assert!(!sw.contains("The"));
    assert!(!sw.contains("essay"));
  }

  #[test]
  fn language_names() {
    assert_eq!(Language::from_str("english").unwrap(), Language::English);
    assert_eq!(Language::English.as_ref(), "english");
  }
}
