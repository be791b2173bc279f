//! Canonical bag-of-words form of raw document text.

use crate::{
  lemmatize::Lemmatizer,
  stopwords::{Language, StopWords},
  tokenize::words,
};

/// Turns raw prose into space-joined, lowercase, lemmatised content words.
///
/// Build one per run and reuse it; the stopword set and lemmatizer tables
/// are built in the constructor.
#[derive(Debug, Clone)]
pub struct Normalizer {
  stopwords:  StopWords,
  lemmatizer: Lemmatizer,
}

impl Normalizer {
  pub fn new(language: Language) -> Self {
    Self {
      stopwords:  StopWords::for_language(language),
      lemmatizer: Lemmatizer::new(),
    }
  }

  pub fn english() -> Self { Self::new(Language::English) }

  /// Tokenize, keep alphabetic tokens, lowercase, drop stopwords, lemmatize.
  ///
  /// A token whose lemma is itself a stopword is dropped too, so
  /// `normalize(normalize(x)) == normalize(x)`.
  pub fn normalize(&self, raw: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for token in words(raw) {
      let lower = token.text.to_lowercase();
      if !lower.chars().all(char::is_alphabetic) || self.stopwords.contains(&lower) {
        continue;
      }
      let lemma = self.lemmatizer.lemmatize(&lower);
      if self.stopwords.contains(&lemma) {
        continue;
      }
      out.push(lemma.into_owned());
    }
    out.join(" ")
  }
}

impl Default for Normalizer {
  fn default() -> Self { Self::english() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_prose() {
    let n = Normalizer::english();
    assert_eq!(
      n.normalize("The Children were reading 3 essays, and they didn't stop!"),
      "child reading essay stop"
    );
  }

  #[test]
  fn drops_numbers_punctuation_and_hyphenated() {
    let n = Normalizer::english();
    assert_eq!(n.normalize("In 1999 -- a well-known year -- things happened."), "year thing happened");
  }

  #[test]
  fn empty_input() {
    assert_eq!(Normalizer::english().normalize(""), "");
    assert_eq!(Normalizer::english().normalize("the of and"), "");
  }

  #[test]
  fn idempotent() {
    let n = Normalizer::english();
    for raw in [
      "Studies of wolves and their lives, in classes and churches.",
      "Don't panic: the Hitchhiker's Guide says so. Datas, mens?",
      "ÉLAN and naïveté; Café owners' boxes!",
      "",
    ] {
      let once = n.normalize(raw);
      assert_eq!(n.normalize(&once), once, "{raw:?}");
    }
  }
}
