//! Operator confirmation before destructive steps.
//!
//! Pipelines take a `&mut dyn Confirm` instead of reading the console, so
//! tests can answer prompts with a closure.

use std::io::{self, BufRead as _, Write as _};

pub trait Confirm {
  /// Ask a yes/no question. `true` means go ahead.
  fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
  F: FnMut(&str) -> bool,
{
  fn confirm(&mut self, prompt: &str) -> bool { self(prompt) }
}

/// Answers yes to everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
  fn confirm(&mut self, prompt: &str) -> bool {
    tracing::debug!(prompt, "assuming yes");
    true
  }
}

/// Prompts on stdout and reads the answer from stdin. Only `y` or `Y`
/// confirms; a read failure counts as no.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
  fn confirm(&mut self, prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
      Ok(_) => is_yes(&line),
      Err(e) => {
        tracing::warn!(error = %e, "could not read confirmation");
        false
      }
    }
  }
}

fn is_yes(answer: &str) -> bool { answer.trim().eq_ignore_ascii_case("y") }
