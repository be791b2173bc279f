//! Rule-based English noun lemmatizer.
//!
//! Reduces plural nouns to their dictionary form using an irregular-form
//! table and a handful of suffix rules. Words it does not recognise as
//! plurals are returned unchanged, and applying it twice gives the same
//! result as applying it once.

use std::{borrow::Cow, collections::HashMap};

/// Irregular plurals, plus words that look plural but are not.
const IRREGULAR: &[(&str, &str)] = &[
  ("children", "child"),
  ("men", "man"),
  ("women", "woman"),
  ("people", "person"),
  ("mice", "mouse"),
  ("lice", "louse"),
  ("geese", "goose"),
  ("feet", "foot"),
  ("teeth", "tooth"),
  ("oxen", "ox"),
  ("dice", "die"),
  ("data", "datum"),
  ("criteria", "criterion"),
  ("phenomena", "phenomenon"),
  ("analyses", "analysis"),
  ("theses", "thesis"),
  ("crises", "crisis"),
  ("hypotheses", "hypothesis"),
  ("indices", "index"),
  ("matrices", "matrix"),
  ("wolves", "wolf"),
  ("knives", "knife"),
  ("lives", "life"),
  ("wives", "wife"),
  ("leaves", "leaf"),
  ("halves", "half"),
  ("selves", "self"),
  ("shelves", "shelf"),
  ("thieves", "thief"),
  ("loaves", "loaf"),
  ("series", "series"),
  ("species", "species"),
  ("news", "news"),
  ("always", "always"),
  ("perhaps", "perhaps"),
  ("sometimes", "sometimes"),
  ("afterwards", "afterwards"),
  ("towards", "towards"),
  ("besides", "besides"),
  ("whereas", "whereas"),
  ("politics", "politics"),
  ("physics", "physics"),
  ("mathematics", "mathematics"),
  ("economics", "economics"),
  ("ethics", "ethics"),
];

/// Suffixes that mark a word as already singular.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Plural endings whose `es` is dropped (`boxes` → `box`).
const ES_ENDINGS: &[&str] = &["sses", "xes", "ches", "shes"];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
  irregular: HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
  fn default() -> Self { Self::new() }
}

impl Lemmatizer {
  pub fn new() -> Self { Self { irregular: IRREGULAR.iter().copied().collect() } }

  /// Base form of a lowercase `word`.
  pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
    if let Some(base) = self.irregular.get(word) {
      return Cow::Borrowed(*base);
    }
    if word.chars().count() <= 3 || SINGULAR_ENDINGS.iter().any(|e| word.ends_with(e)) {
      return Cow::Borrowed(word);
    }

    if let Some(stem) = word.strip_suffix("ies")
      && stem.chars().count() > 1
    {
      return Cow::Owned(format!("{stem}y"));
    }
    if ES_ENDINGS.iter().any(|e| word.ends_with(e)) {
      return Cow::Borrowed(&word[..word.len() - 2]);
    }
    match word.strip_suffix('s') {
      // "datas" → "data" → "datum"
      Some(stem) => Cow::Borrowed(self.irregular.get(stem).copied().unwrap_or(stem)),
      None => Cow::Borrowed(word),
    }
  }
}
