//! Named-entity extraction.
//!
//! [`EntityRecognizer`] is the seam for a real NER model. The built-in
//! [`CapitalizedSpanRecognizer`] is a surface heuristic: it finds dates and
//! runs of capitalised words and labels them from a few word lists.

use std::fmt;

use strum::{AsRefStr, Display, EnumString};

use crate::{
  stopwords::StopWords,
  tokenize::{Token, sentences, words},
  Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EntityLabel {
  Person,
  Org,
  Date,
  Misc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
  pub text:  String,
  pub label: EntityLabel,
}

impl Entity {
  pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
    Self { text: text.into(), label }
  }
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.text, self.label)
  }
}

/// Anything that can pull labelled entities out of prose.
pub trait EntityRecognizer {
  /// Entities in order of appearance. Repeats are reported each time.
  fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}

/// `"<text> (<LABEL>)"` for each entity, joined with `", "`.
pub fn format_keywords(entities: &[Entity]) -> String {
  entities
    .iter()
    .map(Entity::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── Heuristic recognizer ────────────────────────────────────────────────────

const MONTHS: &[&str] = &[
  "January", "February", "March", "April", "May", "June", "July", "August",
  "September", "October", "November", "December", "Jan", "Feb", "Mar", "Apr",
  "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
];

const HONORIFICS: &[&str] = &[
  "mr", "mrs", "ms", "miss", "dr", "prof", "professor", "sir", "dame", "lady",
  "lord", "rev", "president", "senator", "judge", "king", "queen",
];

const ORG_NOUNS: &[&str] = &[
  "university", "college", "school", "institute", "academy", "company",
  "corporation", "corp", "inc", "ltd", "bank", "society", "association",
  "party", "church", "committee", "council", "foundation", "museum",
  "ministry", "department", "agency", "press", "club", "group", "union",
  "league", "army", "navy", "court", "parliament", "congress",
];

/// Lowercase words allowed between two capitalised words of one name.
const CONNECTORS: &[&str] = &["of", "the", "and", "for", "de", "von", "van"];

fn is_capitalized(word: &str) -> bool { word.chars().next().is_some_and(char::is_uppercase) }

fn is_year(word: &str) -> bool {
  word.len() == 4
    && word.chars().all(|c| c.is_ascii_digit())
    && word.parse::<u16>().is_ok_and(|y| (1000..=2100).contains(&y))
}

fn is_day(word: &str) -> bool {
  word.len() <= 2
    && word.chars().all(|c| c.is_ascii_digit())
    && word.parse::<u8>().is_ok_and(|d| (1..=31).contains(&d))
}

fn is_month(word: &str) -> bool { MONTHS.contains(&word) }

fn in_list(list: &[&str], word: &str) -> bool { list.contains(&word.to_lowercase().as_str()) }

/// Finds dates and capitalised spans.
///
/// - Years (1000–2100) and dates anchored on a month name are `DATE`.
/// - Spans led by an honorific are `PERSON`, without the honorific.
/// - Spans containing an organisational noun, and all-caps acronyms, are
///   `ORG`.
/// - Other spans are `MISC`, except a single capitalised word opening a
///   sentence, which is usually just an ordinary word.
///
/// Leading stopwords (`The`, `It`) are trimmed from every span.
#[derive(Debug, Clone)]
pub struct CapitalizedSpanRecognizer {
  stopwords: StopWords,
}

impl CapitalizedSpanRecognizer {
  pub fn new() -> Self { Self { stopwords: StopWords::english() } }

  fn sentence_entities(&self, sentence: &str, out: &mut Vec<Entity>) {
    let tokens = words(sentence);
    let slice = |from: usize, to: usize| &sentence[tokens[from].start..tokens[to - 1].end()];

    let mut i = 0;
    while i < tokens.len() {
      if let Some(end) = date_span(&tokens, i) {
        out.push(Entity::new(slice(i, end), EntityLabel::Date));
        i = end;
        continue;
      }
      if !is_capitalized(tokens[i].text) {
        i += 1;
        continue;
      }

      let end = capitalized_span(sentence, &tokens, i, &self.stopwords);
      if let Some((first, label)) = self.classify(&tokens[..end], i) {
        out.push(Entity::new(slice(first, end), label));
      }
      i = end;
    }
  }

  /// Label for the span `tokens[start..]`, and the index its text starts at.
  fn classify(&self, tokens: &[Token<'_>], start: usize) -> Option<(usize, EntityLabel)> {
    let end = tokens.len();
    let mut first = start;

    let mut person = false;
    while first + 1 < end && in_list(HONORIFICS, tokens[first].text) {
      person = true;
      first += 1;
    }
    while first < end && self.stopwords.contains(&tokens[first].text.to_lowercase()) {
      first += 1;
    }
    if first == end {
      return None;
    }

    let span = &tokens[first..end];
    let label = if person {
      EntityLabel::Person
    } else if span.iter().any(|t| in_list(ORG_NOUNS, t.text)) {
      EntityLabel::Org
    } else if let [only] = span {
      let acronym = only.text.chars().count() >= 2
        && only.text.chars().all(|c| c.is_alphabetic() && c.is_uppercase());
      if acronym {
        EntityLabel::Org
      } else if first == 0 {
        return None;
      } else {
        EntityLabel::Misc
      }
    } else {
      EntityLabel::Misc
    };
    Some((first, label))
  }
}

impl Default for CapitalizedSpanRecognizer {
  fn default() -> Self { Self::new() }
}

impl EntityRecognizer for CapitalizedSpanRecognizer {
  fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
    let mut out = Vec::new();
    for sentence in sentences(text) {
      self.sentence_entities(sentence, &mut out);
    }
    Ok(out)
  }
}

/// End of a date starting at `tokens[i]`: `1999`, `March 1999`,
/// `March 3, 1999`, `3 March 1999`.
fn date_span(tokens: &[Token<'_>], i: usize) -> Option<usize> {
  let at = |j: usize, f: fn(&str) -> bool| tokens.get(j).is_some_and(|t| f(t.text));

  if at(i, is_month) {
    let mut j = i + 1;
    if at(j, is_day) {
      j += 1;
    }
    if at(j, is_year) {
      j += 1;
    }
    (j > i + 1).then_some(j)
  } else if at(i, is_day) && at(i + 1, is_month) {
    Some(if at(i + 2, is_year) { i + 3 } else { i + 2 })
  } else if at(i, is_year) {
    Some(i + 1)
  } else {
    None
  }
}

/// True if only whitespace, or the period of an initial, separates two tokens.
fn adjacent(sentence: &str, a: &Token<'_>, b: &Token<'_>) -> bool {
  matches!(sentence[a.end()..b.start].trim(), "" | ".")
}

/// End of the run of capitalised words starting at `tokens[i]`.
///
/// Capitalised stopwords (`I`, `The`) never extend a span.
fn capitalized_span(
  sentence: &str,
  tokens: &[Token<'_>],
  i: usize,
  stopwords: &StopWords,
) -> usize {
  let mut j = i + 1;
  while j < tokens.len() {
    let prev = &tokens[j - 1];
    let word = tokens[j].text;
    if is_capitalized(word)
      && !stopwords.contains(&word.to_lowercase())
      && adjacent(sentence, prev, &tokens[j])
    {
      j += 1;
    } else if CONNECTORS.contains(&word)
      && tokens.get(j + 1).is_some_and(|next| is_capitalized(next.text))
      && adjacent(sentence, prev, &tokens[j])
      && adjacent(sentence, &tokens[j], &tokens[j + 1])
    {
      j += 2;
    } else {
      break;
    }
  }
  j
}

#[cfg(test)]
mod tests {
  use super::*;

  fn keywords(text: &str) -> String {
    format_keywords(&CapitalizedSpanRecognizer::new().recognize(text).unwrap())
  }

  #[test]
  fn people_orgs_and_years() {
    assert_eq!(
      keywords("Dr. Jane Smith joined Harvard University in 1999."),
      "Jane Smith (PERSON), Harvard University (ORG), 1999 (DATE)"
    );
  }

  #[test]
  fn dates_acronyms_and_connectors() {
    assert_eq!(
      keywords("The meeting on March 3, 1999 was run by NASA and the Bank of England."),
      "March 3, 1999 (DATE), NASA (ORG), Bank of England (ORG)"
    );
  }

  #[test]
  fn day_first_dates() {
    assert_eq!(keywords("Born 5 May 1950 in Vienna."), "5 May 1950 (DATE), Vienna (MISC)");
  }

  #[test]
  fn punctuation_breaks_spans() {
    assert_eq!(keywords("We visited Paris, London."), "Paris (MISC), London (MISC)");
  }

  #[test]
  fn sentence_initial_words_and_pronouns_skipped() {
    assert_eq!(keywords("Yesterday I walked home. Nothing happened."), "");
  }

  #[test]
  fn repeats_are_kept() {
    let found = CapitalizedSpanRecognizer::new()
      .recognize("We met in 2001. They left in 2001.")
      .unwrap();
    assert_eq!(found, vec![
      Entity::new("2001", EntityLabel::Date),
      Entity::new("2001", EntityLabel::Date)
    ]);
  }

  #[test]
  fn labels_render_uppercase() {
    assert_eq!(EntityLabel::Org.to_string(), "ORG");
    assert_eq!(Entity::new("Rome", EntityLabel::Misc).to_string(), "Rome (MISC)");
    assert_eq!(format_keywords(&[]), "");
  }
}
