//! OpenDocument Text (`.odt`) text extraction.
//!
//! Every `text:p` in `content.xml` is a paragraph, wherever it sits (body,
//! tables, frames, notes). Headings (`text:h`) are not paragraphs. Inside a
//! paragraph, `text:s` expands to its `text:c` count of spaces, `text:tab` to
//! a tab and `text:line-break` to a newline. A paragraph nested in another
//! keeps its own text and is listed at the position where it opens.

use std::path::Path;

use quick_xml::{
  Reader,
  events::{BytesStart, Event},
};

use crate::{
  archive::{local_name, read_part, xml_error},
  Result,
};

const BODY_PART: &str = "content.xml";

pub(crate) fn read(path: &Path) -> Result<Vec<String>> {
  paragraphs(&read_part(path, BODY_PART)?)
}

/// Most spaces a single `text:s` may expand to.
const MAX_SPACES: usize = 1024;

/// Number of spaces a `text:s` element stands for, at most [`MAX_SPACES`].
fn space_count(e: &BytesStart<'_>) -> usize {
  e.attributes()
    .flatten()
    .find(|a| local_name(a.key.as_ref()) == b"c")
    .and_then(|a| std::str::from_utf8(&a.value).ok()?.trim().parse::<usize>().ok())
    .unwrap_or(1)
    .min(MAX_SPACES)
}

struct State {
  paragraphs: Vec<String>,
  /// Indices into `paragraphs` of the currently open `text:p` elements.
  open:       Vec<usize>,
}

impl State {
  fn push(&mut self, s: &str) {
    if let Some(&i) = self.open.last() {
      self.paragraphs[i].push_str(s);
    }
  }

  fn element(&mut self, e: &BytesStart<'_>) {
    let name = e.name();
    match local_name(name.as_ref()) {
      b"s" => self.push(&" ".repeat(space_count(e))),
      b"tab" => self.push("\t"),
      b"line-break" => self.push("\n"),
      _ => {}
    }
  }
}

/// Text of each paragraph, in document order.
pub(crate) fn paragraphs(xml: &[u8]) -> Result<Vec<String>> {
  let mut reader = Reader::from_reader(xml);
  reader.config_mut().trim_text(false);

  let mut state = State { paragraphs: Vec::new(), open: Vec::new() };
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf).map_err(xml_error)? {
      Event::Start(ref e) => {
        if local_name(e.name().as_ref()) == b"p" {
          state.open.push(state.paragraphs.len());
          state.paragraphs.push(String::new());
        } else {
          state.element(e);
        }
      }
      Event::Empty(ref e) => {
        if local_name(e.name().as_ref()) == b"p" {
          state.paragraphs.push(String::new());
        } else {
          state.element(e);
        }
      }
      Event::Text(ref e) => {
        let text = e.unescape().map_err(xml_error)?;
        state.push(&text);
      }
      Event::End(ref e) => {
        if local_name(e.name().as_ref()) == b"p" {
          state.open.pop();
        }
      }
      Event::Eof => break,
      _ => {}
    }
    buf.clear();
  }

  Ok(state.paragraphs)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn content(body: &str) -> String {
    format!(
      r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0"><office:body><office:text>{body}</office:text></office:body></office:document-content>"#
    )
  }

  #[test]
  fn paragraphs_with_spans() {
    let xml = content(
      r#"<text:h text:outline-level="1">Heading</text:h><text:p>One <text:span>bold</text:span> line.</text:p><text:p>Fish &amp; chips</text:p>"#,
    );
    assert_eq!(paragraphs(xml.as_bytes()).unwrap(), vec!["One bold line.", "Fish & chips"]);
  }

  #[test]
  fn spaces_tabs_and_breaks() {
    let xml = content(
      r#"<text:p>a<text:s/>b<text:s text:c="3"/>c<text:tab/>d<text:line-break/>e</text:p>"#,
    );
    assert_eq!(paragraphs(xml.as_bytes()).unwrap(), vec!["a b   c\td\ne"]);
  }

  #[test]
  fn oversized_space_count_is_clamped() {
    let xml = content(r#"<text:p>a<text:s text:c="18446744073709551615"/>b</text:p>"#);
    let paras = paragraphs(xml.as_bytes()).unwrap();
    assert_eq!(paras[0].len(), MAX_SPACES + 2);
  }

  #[test]
  fn table_cells_and_empty_paragraphs() {
    let xml = content(
      r#"<text:p/><table:table><table:table-row><table:table-cell><text:p>cell</text:p></table:table-cell></table:table-row></table:table><text:p>end</text:p>"#,
    );
    assert_eq!(paragraphs(xml.as_bytes()).unwrap(), vec!["", "cell", "end"]);
  }

  #[test]
  fn nested_paragraphs_keep_their_own_text() {
    let xml = content(r#"<text:p>outer <text:note><text:p>inner</text:p></text:note>tail</text:p>"#);
    assert_eq!(paragraphs(xml.as_bytes()).unwrap(), vec!["outer tail", "inner"]);
  }
}
