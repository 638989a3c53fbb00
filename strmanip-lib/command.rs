//! Commands that run the text manipulations against a [`Document`].
//!
//! Every command follows the same shape: gather input (settings, regions),
//! compute the edit instructions with pure code, then hand them to the
//! document as one write action ordered bottom-up. A cancelled settings prompt
//! stops the command before the document is read.

use strmanip_core::LineEnding;
use thiserror::Error;

use crate::{
  Tendril,
  config::SettingsStore,
  document::{
    Document,
    DocumentError,
  },
  selection::CursorId,
  sort::{
    EditInstruction,
    Reconciliation,
    SortBy,
    SortSettings,
    TextUnit,
    reconcile,
    sort_lines,
    sort_units,
  },
  transform::StringTransform,
};

pub type Result<T> = std::result::Result<T, CommandError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
  #[error(transparent)]
  Document(#[from] DocumentError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
  /// The user dismissed the settings prompt; the document was not touched.
  Cancelled,
  /// Nothing to do for the current selection.
  Unchanged,
  Applied { replaced: usize, deleted: usize },
}

/// Asks the user for sort settings, starting from `initial`.
///
/// Returning `None` cancels the command.
pub trait SettingsPrompt {
  fn prompt(&mut self, initial: &SortSettings) -> Option<SortSettings>;
}

impl<F> SettingsPrompt for F
where
  F: FnMut(&SortSettings) -> Option<SortSettings>,
{
  fn prompt(&mut self, initial: &SortSettings) -> Option<SortSettings> {
    self(initial)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCommand {
  store_key: String,
}

impl Default for SortCommand {
  fn default() -> Self {
    Self::new(Self::STORE_KEY)
  }
}

impl SortCommand {
  pub const STORE_KEY: &'static str = "sort";

  pub fn new(store_key: impl Into<String>) -> Self {
    Self {
      store_key: store_key.into(),
    }
  }

  pub fn store_key(&self) -> &str {
    &self.store_key
  }

  /// Prompts for settings (pre-filled from `store`), remembers the accepted
  /// ones and sorts.
  pub fn run(
    &self,
    doc: &mut Document,
    store: &mut SettingsStore,
    prompt: &mut impl SettingsPrompt,
  ) -> Result<CommandOutcome> {
    let initial = store.read(&self.store_key);
    let Some(settings) = prompt.prompt(&initial) else {
      tracing::debug!(key = %self.store_key, "sort cancelled");
      return Ok(CommandOutcome::Cancelled);
    };
    store.store(&self.store_key, settings);

    execute_sort(doc, &settings)
  }
}

/// Sorts the document's selected regions with `settings` as one write action.
pub fn execute_sort(doc: &mut Document, settings: &SortSettings) -> Result<CommandOutcome> {
  let regions = doc.extract_regions();
  let Some(reconciliation) = plan_sort(regions, settings, doc.line_ending()) else {
    return Ok(CommandOutcome::Unchanged);
  };

  apply(doc, reconciliation)
}

/// Computes the instructions for sorting `regions` (ascending by position).
///
/// The region count picks the mode, whatever `settings.sort_by` says: several
/// regions are reordered as units and reconciled, a single region has its
/// lines sorted in place.
pub fn plan_sort(
  regions: Vec<(CursorId, Tendril)>,
  settings: &SortSettings,
  line_ending: LineEnding,
) -> Option<Reconciliation<CursorId>> {
  let mode = match regions.len() {
    0 => return None,
    1 => SortBy::Lines,
    _ => SortBy::Selections,
  };
  if mode != settings.sort_by {
    tracing::debug!(
      requested = ?settings.sort_by,
      ?mode,
      regions = regions.len(),
      "sort mode follows region count"
    );
  }

  let ids: Vec<_> = regions.iter().map(|(id, _)| *id).collect();
  match mode {
    SortBy::Lines => {
      let units = regions
        .into_iter()
        .map(|(id, text)| TextUnit::new(id, sort_lines(&text, settings, line_ending)));
      Some(reconcile(ids, units))
    },
    SortBy::Selections => {
      let units = regions
        .into_iter()
        .map(|(id, text)| TextUnit::new(id, text))
        .collect();
      Some(reconcile(ids, sort_units(units, settings)))
    },
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformCommand {
  transform: StringTransform,
}

impl TransformCommand {
  pub fn new(transform: StringTransform) -> Self {
    Self { transform }
  }

  /// Transforms every selected region line by line.
  pub fn execute(&self, doc: &mut Document) -> Result<CommandOutcome> {
    let regions = doc.extract_regions();
    if regions.is_empty() {
      return Ok(CommandOutcome::Unchanged);
    }

    let ids: Vec<_> = regions.iter().map(|(id, _)| *id).collect();
    let units = regions
      .into_iter()
      .map(|(id, text)| TextUnit::new(id, self.transform.transform_by_line(&text)));
    tracing::debug!(transform = ?self.transform, regions = ids.len(), "transforming regions");
    apply(doc, reconcile(ids, units))
  }
}

fn apply(doc: &mut Document, reconciliation: Reconciliation<CursorId>) -> Result<CommandOutcome> {
  let outcome = CommandOutcome::Applied {
    replaced: reconciliation.replacements(),
    deleted:  reconciliation.deletions(),
  };

  let instructions: Vec<EditInstruction<CursorId>> =
    reconciliation.into_application_order(|id| doc.region_order(*id));
  doc.apply_instructions(&instructions)?;
  Ok(outcome)
}
