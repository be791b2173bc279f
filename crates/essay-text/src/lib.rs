//! Text processing for essay records.
//!
//! Tokenization, normalisation into lemmatised content words, frequency-based
//! extractive summaries, and named-entity extraction. Everything here is
//! pure and synchronous; it knows nothing about documents or storage.
//!
//! ```
//! use essay_text::{Normalizer, Summarizer};
//!
//! let text = "Rivers carve valleys. Valleys hold rivers. Rain falls.";
//! assert_eq!(Normalizer::english().normalize("The rivers ran."), "river ran");
//! assert_eq!(Summarizer::english().summarize(text, 1), "Rivers carve valleys.");
//! ```

pub mod entities;
pub mod error;
pub mod lemmatize;
pub mod normalize;
pub mod stopwords;
pub mod summarize;
pub mod tokenize;

pub use self::{
  entities::{
    CapitalizedSpanRecognizer, Entity, EntityLabel, EntityRecognizer, format_keywords,
  },
  error::{Error, Result},
  normalize::Normalizer,
  stopwords::{Language, StopWords},
  summarize::{SummaryOrder, Summarizer},
};
