//! Office Open XML (`.docx`) text extraction.
//!
//! Reads `word/document.xml` and collects the body paragraphs (`w:p`),
//! leaving out paragraphs that live inside tables or text boxes. Paragraph text is the
//! concatenation of its `w:t` runs, with `w:tab` as a tab and `w:br` /
//! `w:cr` as a newline.

use std::path::Path;

use quick_xml::{Reader, events::Event};

use crate::{
  archive::{local_name, read_part, xml_error},
  Result,
};

const BODY_PART: &str = "word/document.xml";

pub(crate) fn read(path: &Path) -> Result<Vec<String>> {
  paragraphs(&read_part(path, BODY_PART)?)
}

#[derive(Default)]
struct State {
  paragraphs:  Vec<String>,
  current:     Option<String>,
  /// Nesting depth inside `w:tbl` / `w:txbxContent`.
  skip_depth:  usize,
  in_run:      bool,
  in_text:     bool,
}

impl State {
  fn push(&mut self, s: &str) {
    if let Some(p) = self.current.as_mut() {
      p.push_str(s);
    }
  }

  /// Run-level elements that stand for a character.
  fn marker(&mut self, local: &[u8]) {
    if !self.in_run {
      return;
    }
    match local {
      b"tab" => self.push("\t"),
      b"br" | b"cr" => self.push("\n"),
      _ => {}
    }
  }
}

fn skipped_container(local: &[u8]) -> bool { matches!(local, b"tbl" | b"txbxContent") }

/// Text of each body paragraph, in document order.
pub(crate) fn paragraphs(xml: &[u8]) -> Result<Vec<String>> {
  let mut reader = Reader::from_reader(xml);
  reader.config_mut().trim_text(false);

  let mut state = State::default();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf).map_err(xml_error)? {
      Event::Start(ref e) => {
        let name = e.name();
        match local_name(name.as_ref()) {
          local if skipped_container(local) => state.skip_depth += 1,
          _ if state.skip_depth > 0 => {}
          b"p" => state.current = Some(String::new()),
          b"r" => state.in_run = true,
          b"t" if state.in_run => state.in_text = true,
          other => state.marker(other),
        }
      }
      Event::Empty(ref e) => {
        let name = e.name();
        match local_name(name.as_ref()) {
          _ if state.skip_depth > 0 => {}
          b"p" => state.paragraphs.push(String::new()),
          other => state.marker(other),
        }
      }
      Event::Text(ref e) if state.in_text => {
        let text = e.unescape().map_err(xml_error)?;
        state.push(&text);
      }
      Event::CData(ref e) if state.in_text => {
        state.push(&String::from_utf8_lossy(e));
      }
      Event::End(ref e) => {
        let name = e.name();
        match local_name(name.as_ref()) {
          local if skipped_container(local) => {
            state.skip_depth = state.skip_depth.saturating_sub(1)
          }
          _ if state.skip_depth > 0 => {}
          b"r" => state.in_run = false,
          b"t" => state.in_text = false,
          b"p" => {
            if let Some(p) = state.current.take() {
              state.paragraphs.push(p);
            }
          }
          _ => {}
        }
      }
      Event::Eof => break,
      _ => {}
    }
    buf.clear();
  }

  Ok(state.paragraphs)
}
