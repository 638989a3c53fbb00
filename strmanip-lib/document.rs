//! In-memory host document: rope text plus a multi-cursor selection.
//!
//! The document exposes the two contracts commands rely on:
//!
//! - [`Document::extract_regions`] reads every selected region, in ascending
//!   document order, keyed by its [`CursorId`].
//! - [`Document::apply_instructions`] runs one write action over a batch of
//!   [`EditInstruction`]s.
//!
//! Inside a write action region offsets are taken from the selection as it was
//! when the action started and are *not* shifted while edits land, so the
//! instructions must arrive bottom-up: strictly descending selection order,
//! which is descending start order with an empty region placed after any
//! region sharing its start. The action is
//! all-or-nothing: it validates the batch, edits a copy of the text, and only
//! commits the text and the rebuilt selection once every instruction applied.

use std::collections::HashMap;

use ropey::Rope;
use smallvec::SmallVec;
use strmanip_core::{
  LineEnding,
  line_ending::auto_detect_line_ending,
};
use thiserror::Error;

use crate::{
  Tendril,
  selection::{
    CursorId,
    Range,
    Selection,
    SelectionError,
  },
  sort::EditInstruction,
};

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
  #[error("region {id} is not part of the selection")]
  UnknownRegion { id: u64 },
  #[error("region {id} is edited more than once in one write action")]
  DuplicateRegion { id: u64 },
  #[error("edit at {next} follows edit at {previous}; edits must go bottom-up")]
  NotDescending { previous: usize, next: usize },
  #[error("region {from}..{to} is out of bounds for document length {len}")]
  RegionOutOfBounds {
    from: usize,
    to:   usize,
    len:  usize,
  },
  #[error(transparent)]
  Selection(#[from] SelectionError),
}

#[derive(Debug, Clone)]
pub struct Document {
  text:        Rope,
  selection:   Selection,
  line_ending: LineEnding,
}

impl Document {
  /// Creates a document with a cursor at the start. The line ending is
  /// detected from the text, falling back to the native one.
  pub fn new(text: &str) -> Self {
    let text = Rope::from_str(text);
    let line_ending = auto_detect_line_ending(&text).unwrap_or_default();
    Self {
      text,
      selection: Selection::point(0),
      line_ending,
    }
  }

  pub fn with_selection(mut self, selection: Selection) -> Result<Self> {
    self.set_selection(selection)?;
    Ok(self)
  }

  pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
    self.line_ending = line_ending;
    self
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  pub fn line_ending(&self) -> LineEnding {
    self.line_ending
  }

  pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
    let len = self.text.len_chars();
    if let Some(range) = selection.iter().find(|range| range.to() > len) {
      return Err(DocumentError::RegionOutOfBounds {
        from: range.from(),
        to: range.to(),
        len,
      });
    }
    self.selection = selection;
    Ok(())
  }

  /// Exact content of every selected region, ascending by position.
  pub fn extract_regions(&self) -> Vec<(CursorId, Tendril)> {
    let text = self.text.slice(..);
    self
      .selection
      .iter_with_ids()
      .map(|(id, range)| (id, range.fragment(text).as_ref().into()))
      .collect()
  }

  /// Position of the region identified by `id` in document order: its start,
  /// then its index among regions sharing that start.
  pub fn region_order(&self, id: CursorId) -> Option<(usize, usize)> {
    let idx = self.selection.index_of(id)?;
    Some((self.selection.ranges()[idx].from(), idx))
  }

  /// Applies `instructions` as a single write action.
  ///
  /// Instructions must reference distinct selected regions in strictly
  /// descending start order. On error the document is left untouched.
  pub fn apply_instructions(&mut self, instructions: &[EditInstruction<CursorId>]) -> Result<()> {
    if instructions.is_empty() {
      return Ok(());
    }

    let planned = self.plan(instructions)?;

    let mut text = self.text.clone();
    for (range, instruction) in planned.iter().zip(instructions) {
      let (from, to) = (range.from(), range.to());
      let len = text.len_chars();
      if to > len {
        return Err(DocumentError::RegionOutOfBounds { from, to, len });
      }

      text.remove(from..to);
      if let EditInstruction::Replace(_, replacement) = instruction {
        text.insert(from, replacement);
      }
    }

    let selection = self.remap_selection(instructions)?;
    tracing::debug!(
      edits = instructions.len(),
      cursors = selection.len(),
      "applied write action"
    );

    self.text = text;
    self.selection = selection;
    Ok(())
  }

  /// Resolves every instruction to the range it targets, checking identity,
  /// uniqueness and ordering before anything is edited.
  fn plan(&self, instructions: &[EditInstruction<CursorId>]) -> Result<Vec<Range>> {
    let mut planned: Vec<Range> = Vec::with_capacity(instructions.len());
    let mut previous: Option<usize> = None;

    for instruction in instructions {
      let id = *instruction.region();
      let idx = self
        .selection
        .index_of(id)
        .ok_or(DocumentError::UnknownRegion { id: id.get() })?;
      let range = self.selection.ranges()[idx];

      if let Some(prev) = previous {
        if idx == prev {
          return Err(DocumentError::DuplicateRegion { id: id.get() });
        }
        if idx > prev {
          return Err(DocumentError::NotDescending {
            previous: self.selection.ranges()[prev].from(),
            next:     range.from(),
          });
        }
      }

      previous = Some(idx);
      planned.push(range);
    }

    Ok(planned)
  }

  /// Rebuilds the selection after the batch: replaced regions cover their new
  /// text, deleted regions lose their cursor, everything else shifts by the
  /// accumulated length change.
  fn remap_selection(&self, instructions: &[EditInstruction<CursorId>]) -> Result<Selection> {
    let edits: HashMap<CursorId, Option<usize>> = instructions
      .iter()
      .map(|instruction| {
        match instruction {
          EditInstruction::Replace(id, text) => (*id, Some(text.chars().count())),
          EditInstruction::Delete(id) => (*id, None),
        }
      })
      .collect();

    let mut ranges: SmallVec<[Range; 1]> = SmallVec::new();
    let mut cursor_ids: SmallVec<[CursorId; 1]> = SmallVec::new();
    let mut first_deleted = None;
    let mut delta: isize = 0;

    for (id, range) in self.selection.iter_with_ids() {
      let from = range.from().saturating_add_signed(delta);
      match edits.get(&id) {
        None => {
          ranges.push(range.with_span(from, from + range.len()));
          cursor_ids.push(id);
        },
        Some(Some(new_len)) => {
          ranges.push(range.with_span(from, from + new_len));
          cursor_ids.push(id);
          delta += *new_len as isize - range.len() as isize;
        },
        Some(None) => {
          tracing::trace!(cursor = %id, "removing cursor of deleted region");
          first_deleted.get_or_insert((id, from));
          delta -= range.len() as isize;
        },
      }
    }

    if ranges.is_empty() {
      // Every region was deleted; keep a cursor where the first one was.
      if let Some((id, pos)) = first_deleted {
        ranges.push(Range::point(pos));
        cursor_ids.push(id);
      }
    }

    Ok(Selection::from_ordered(ranges, cursor_ids)?)
  }
}
