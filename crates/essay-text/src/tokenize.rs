//! Word and sentence segmentation for English prose.
//!
//! Both tokenizers return slices of the input, so every token and sentence is
//! a verbatim substring of the text it came from.

/// A word token and its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub text:  &'a str,
  pub start: usize,
}

impl Token<'_> {
  pub fn end(&self) -> usize { self.start + self.text.len() }
}

// ─── Words ───────────────────────────────────────────────────────────────────

fn is_joiner(c: char) -> bool { matches!(c, '\'' | '’' | '-') }

fn is_apostrophe(c: char) -> bool { matches!(c, '\'' | '’') }

/// Clitics split off after an apostrophe (`she's` → `she`, `'s`).
const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

/// Split a contraction into base and clitic, if it is one.
fn split_clitic(word: &str) -> Option<usize> {
  let lower = word.to_lowercase();
  for negation in ["n't", "n’t"] {
    if lower.ends_with(negation) && lower.len() > negation.len() {
      return Some(word.len() - negation.len());
    }
  }

  let (pos, apostrophe) = word.char_indices().rev().find(|(_, c)| is_apostrophe(*c))?;
  let suffix = word[pos + apostrophe.len_utf8()..].to_lowercase();
  (pos > 0 && CLITICS.contains(&suffix.as_str())).then_some(pos)
}

/// Segment `text` into word tokens.
///
/// A word is a run of alphanumerics, optionally joined by internal hyphens
/// or apostrophes (`well-known`, `o'clock`). English contractions are split
/// into base and clitic (`don't` → `do`, `n't`). Punctuation is dropped.
pub fn words(text: &str) -> Vec<Token<'_>> {
  let mut tokens = Vec::new();
  let mut iter = text.char_indices().peekable();

  while let Some((start, c)) = iter.next() {
    if !c.is_alphanumeric() {
      continue;
    }

    let mut end = start + c.len_utf8();
    while let Some(&(i, next)) = iter.peek() {
      if next.is_alphanumeric() {
        end = i + next.len_utf8();
        iter.next();
        continue;
      }
      if is_joiner(next) {
        let after = text[i + next.len_utf8()..].chars().next();
        if after.is_some_and(char::is_alphanumeric) {
          end = i + next.len_utf8();
          iter.next();
          continue;
        }
      }
      break;
    }

    let word = &text[start..end];
    match split_clitic(word) {
      Some(at) => {
        tokens.push(Token { text: &word[..at], start });
        tokens.push(Token { text: &word[at..], start: start + at });
      }
      None => tokens.push(Token { text: word, start }),
    }
  }

  tokens
}

// ─── Sentences ───────────────────────────────────────────────────────────────

/// Lowercase words that are followed by a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
  "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "fig", "inc", "ltd",
  "co", "corp", "dept", "gen", "gov", "sen", "rep", "rev", "hon", "capt", "col",
  "lt", "sgt", "approx", "cf", "al", "jan", "feb", "mar", "apr", "jun", "jul",
  "aug", "sep", "sept", "oct", "nov", "dec",
];

fn is_terminal(c: char) -> bool { matches!(c, '.' | '!' | '?') }

fn is_closing(c: char) -> bool { matches!(c, '"' | '\'' | '”' | '’' | ')' | ']') }

/// True if the period at byte `dot` belongs to an abbreviation or initial.
fn is_abbreviation(text: &str, dot: usize) -> bool {
  let before = &text[..dot];
  let word_start = before
    .rfind(char::is_whitespace)
    .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
  let word = before[word_start..].trim_start_matches(|c: char| !c.is_alphanumeric());

  if word.is_empty() {
    return false;
  }
  // "e.g", "U.S"
  if word.contains('.') {
    return true;
  }
  let mut chars = word.chars();
  if let (Some(only), None) = (chars.next(), chars.next()) {
    return only.is_uppercase();
  }
  ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// Split `text` into sentences.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// when followed by the end of text, or by whitespace and a character that
/// is not a lowercase letter. Abbreviations and initials do not end a
/// sentence. Returned sentences are trimmed slices of `text`.
pub fn sentences(text: &str) -> Vec<&str> {
  let mut out = Vec::new();
  let mut start = 0;
  let mut iter = text.char_indices().peekable();

  while let Some((i, c)) = iter.next() {
    if !is_terminal(c) {
      continue;
    }

    let mut end = i + c.len_utf8();
    while let Some(&(j, next)) = iter.peek() {
      if is_terminal(next) || is_closing(next) {
        end = j + next.len_utf8();
        iter.next();
      } else {
        break;
      }
    }

    let rest = &text[end..];
    let boundary = match rest.chars().next() {
      None => true,
      Some(ws) if ws.is_whitespace() => match rest.trim_start().chars().next() {
        None => true,
        Some(next) => {
          !next.is_lowercase() && !(c == '.' && end == i + 1 && is_abbreviation(text, i))
        }
      },
      Some(_) => false,
    };

    if boundary {
      let sentence = text[start..end].trim();
      if !sentence.is_empty() {
        out.push(sentence);
      }
      start = end;
    }
  }

  let tail = text[start..].trim();
  if !tail.is_empty() {
    out.push(tail);
  }
  out
}
