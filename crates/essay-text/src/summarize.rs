//! Extractive summaries by word-frequency scoring.
//!
//! Every non-stopword is counted across the whole text. A sentence scores
//! the sum of the counts of the words it contains, and the best-scoring
//! sentences make up the summary.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use strum::{AsRefStr, EnumString};

use crate::{
  stopwords::{Language, StopWords},
  tokenize::{sentences, words},
};

/// Order of the sentences in a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SummaryOrder {
  /// As they appear in the source text.
  #[default]
  Document,
  /// Highest score first.
  Score,
}

#[derive(Debug, Clone)]
pub struct Summarizer {
  stopwords: StopWords,
  order:     SummaryOrder,
}

#[derive(Debug)]
struct Scored<'a> {
  position: usize,
  score:    usize,
  sentence: &'a str,
}

fn counted(token: &str) -> Option<String> {
  token
    .chars()
    .all(char::is_alphanumeric)
    .then(|| token.to_lowercase())
}

impl Summarizer {
  pub fn new(language: Language, order: SummaryOrder) -> Self {
    Self { stopwords: StopWords::for_language(language), order }
  }

  pub fn english() -> Self { Self::new(Language::English, SummaryOrder::default()) }

  pub fn order(&self) -> SummaryOrder { self.order }

  /// Pick at most `n` sentences of `text`.
  ///
  /// Sentences with no counted word are never picked, and a sentence that
  /// repeats verbatim is considered once. Equal scores go to the earlier
  /// sentence.
  pub fn select<'a>(&self, text: &'a str, n: usize) -> Vec<&'a str> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for token in words(text) {
      if let Some(word) = counted(token.text)
        && !self.stopwords.contains(&word)
      {
        *freq.entry(word).or_default() += 1;
      }
    }

    let mut seen = HashSet::new();
    let mut scored: Vec<Scored<'a>> = sentences(text)
      .into_iter()
      .enumerate()
      .filter(|(_, s)| seen.insert(*s))
      .map(|(position, sentence)| {
        let score = words(sentence)
          .iter()
          .filter_map(|t| counted(t.text))
          .filter_map(|w| freq.get(&w))
          .sum();
        Scored { position, score, sentence }
      })
      .filter(|s| s.score > 0)
      .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
    scored.truncate(n);
    if self.order == SummaryOrder::Document {
      scored.sort_by_key(|s| s.position);
    }

    scored.into_iter().map(|s| s.sentence).collect()
  }

  /// The selected sentences joined with single spaces.
  pub fn summarize(&self, text: &str, n: usize) -> String { self.select(text, n).join(" ") }
}

impl Default for Summarizer {
  fn default() -> Self { Self::english() }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEXT: &str = "Gardens need water. Cats sleep. Water helps gardens grow and \
                      water keeps gardens green. The end. Gardens and water matter.";

  #[test]
  fn at_most_n_verbatim_sentences() {
    let s = Summarizer::english();
    for n in 0..6 {
      let picked = s.select(TEXT, n);
      assert!(picked.len() <= n);
      for sentence in &picked {
        assert!(TEXT.contains(sentence), "{sentence:?}");
      }
    }
  }

  #[test]
  fn document_order_by_default() {
    // gardens=4 water=4, everything else once: scores 9, 2, 20, 1, 9.
    let picked = Summarizer::english().select(TEXT, 2);
    assert_eq!(picked, vec![
      "Gardens need water.",
      "Water helps gardens grow and water keeps gardens green."
    ]);
  }

  #[test]
  fn score_order_puts_best_first() {
    let s = Summarizer::new(Language::English, SummaryOrder::Score);
    let picked = s.select(TEXT, 2);
    assert_eq!(picked, vec![
      "Water helps gardens grow and water keeps gardens green.",
      "Gardens need water."
    ]);
  }

  #[test]
  fn ties_go_to_first_occurrence() {
    let s = Summarizer::new(Language::English, SummaryOrder::Score);
    assert_eq!(s.select("Red apple. Green pear. Blue plum.", 1), vec!["Red apple."]);
  }

  #[test]
  fn stopword_only_sentences_never_chosen() {
    let s = Summarizer::english();
    assert_eq!(s.select("It is what it is. Rain falls.", 5), vec!["Rain falls."]);
  }

  #[test]
  fn repeated_sentence_counted_once() {
    let s = Summarizer::english();
    assert_eq!(s.summarize("Echo echo. Echo echo. Quiet.", 3), "Echo echo. Quiet.");
  }

  #[test]
  fn empty_text() {
    assert_eq!(Summarizer::english().summarize("", 5), "");
  }
}
