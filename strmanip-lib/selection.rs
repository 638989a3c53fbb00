//! Cursor positions and multi-cursor selections.
//!
//! A [`Range`] has an `anchor` and a `head`, both char offsets into the
//! document. When `anchor == head` the range is a point (a bare cursor).
//!
//! ```text
//! anchor=2, head=7: "he[llo w]orld"  (forward selection)
//! anchor=7, head=2: "he]llo w[orld"  (backward selection)
//! ```
//!
//! A [`Selection`] holds one or more ranges, each tagged with a stable
//! [`CursorId`]. Commands address regions through these ids rather than
//! through offsets, since offsets go stale as soon as the document is edited.
//! Ranges are kept normalized:
//!
//! - Sorted by position
//! - No overlapping ranges (overlaps are merged, the first id survives)
//! - Always at least one range
//!
//! Edits can leave an empty range sharing its start with the next one. A
//! selection rebuilt after an edit keeps such ranges apart, each with its own
//! id, so position order and id order stay the same thing.
//!
//! # Error Handling
//!
//! Operations return [`Result<T, SelectionError>`]:
//!
//! - **EmptySelection** - Selection must have at least one range
//! - **CursorIdCountMismatch** - Every range needs exactly one id

use std::{
  borrow::Cow,
  fmt,
  num::NonZeroU64,
  sync::atomic::{
    AtomicU64,
    Ordering,
  },
};

use ropey::RopeSlice;
use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
  #[error("selection must contain at least one range")]
  EmptySelection,
  #[error("cursor id count {ids} does not match range count {ranges}")]
  CursorIdCountMismatch { ids: usize, ranges: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CursorId(NonZeroU64);

impl CursorId {
  pub fn new(id: NonZeroU64) -> Self {
    Self(id)
  }

  pub fn fresh() -> Self {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
  }

  pub fn get(self) -> u64 {
    self.0.get()
  }
}

impl fmt::Display for CursorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Forward,
  Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
  pub anchor: usize,
  pub head:   usize,
}

impl Range {
  pub fn new(anchor: usize, head: usize) -> Self {
    Self { anchor, head }
  }

  #[inline]
  pub fn point(head: usize) -> Self {
    Self::new(head, head)
  }

  /// Start of the range
  #[inline]
  #[must_use]
  pub fn from(&self) -> usize {
    std::cmp::min(self.anchor, self.head)
  }

  /// End of the range
  #[inline]
  #[must_use]
  pub fn to(&self) -> usize {
    std::cmp::max(self.anchor, self.head)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.to() - self.from()
  }

  /// When the head and anchor are in the same position, we have no range.
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  #[inline]
  #[must_use]
  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  #[inline]
  #[must_use]
  pub fn flip(&self) -> Self {
    Self::new(self.head, self.anchor)
  }

  #[inline]
  #[must_use]
  pub fn with_direction(self, direction: Direction) -> Self {
    if self.direction() == direction {
      self
    } else {
      self.flip()
    }
  }

  /// A range covering `from..to` that points the same way as `self`.
  #[must_use]
  pub fn with_span(self, from: usize, to: usize) -> Self {
    debug_assert!(from <= to);
    Self::new(from, to).with_direction(self.direction())
  }

  pub fn overlaps(&self, other: &Self) -> bool {
    self.from() == other.from() || (self.to() > other.from() && other.to() > self.from())
  }

  /// Returns a `Range` that encompasses both input ranges.
  pub fn merge(&self, other: Self) -> Self {
    let from = self.from().min(other.from());
    let to = self.to().max(other.to());
    self.with_span(from, to)
  }

  /// Returns the text inside this range given the text of the whole buffer.
  #[inline]
  pub fn fragment<'a, 'b: 'a>(&'a self, text: RopeSlice<'b>) -> Cow<'b, str> {
    self.slice(text).into()
  }

  #[inline]
  pub fn slice<'a, 'b: 'a>(&'a self, text: RopeSlice<'b>) -> RopeSlice<'b> {
    text.slice(self.from()..self.to())
  }
}

/// A selection is one or more ranges.
/// INVARIANT: A selection can never be empty (always contain at least one
/// range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  ranges:     SmallVec<[Range; 1]>,
  cursor_ids: SmallVec<[CursorId; 1]>,
}

impl Selection {
  pub fn new(ranges: SmallVec<[Range; 1]>) -> Result<Self> {
    if ranges.is_empty() {
      return Err(SelectionError::EmptySelection);
    }
    let cursor_ids = ranges.iter().map(|_| CursorId::fresh()).collect();
    Ok(Self::new_with_ids_unchecked(ranges, cursor_ids).normalize())
  }

  pub fn new_with_ids(
    ranges: SmallVec<[Range; 1]>,
    cursor_ids: SmallVec<[CursorId; 1]>,
  ) -> Result<Self> {
    if ranges.is_empty() {
      return Err(SelectionError::EmptySelection);
    }
    if ranges.len() != cursor_ids.len() {
      return Err(SelectionError::CursorIdCountMismatch {
        ids:    cursor_ids.len(),
        ranges: ranges.len(),
      });
    }

    Ok(Self::new_with_ids_unchecked(ranges, cursor_ids).normalize())
  }

  /// Builds a selection from ranges already in position order, without
  /// merging ranges that touch or share a start.
  pub(crate) fn from_ordered(
    ranges: SmallVec<[Range; 1]>,
    cursor_ids: SmallVec<[CursorId; 1]>,
  ) -> Result<Self> {
    if ranges.is_empty() {
      return Err(SelectionError::EmptySelection);
    }
    if ranges.len() != cursor_ids.len() {
      return Err(SelectionError::CursorIdCountMismatch {
        ids:    cursor_ids.len(),
        ranges: ranges.len(),
      });
    }
    debug_assert!(
      ranges
        .windows(2)
        .all(|pair| pair[0].to() <= pair[1].from() && pair[0].from() <= pair[1].from())
    );

    Ok(Self::new_with_ids_unchecked(ranges, cursor_ids))
  }

  fn new_with_ids_unchecked(
    ranges: SmallVec<[Range; 1]>,
    cursor_ids: SmallVec<[CursorId; 1]>,
  ) -> Self {
    Self { ranges, cursor_ids }
  }

  pub fn point(pos: usize) -> Self {
    Self::single(pos, pos)
  }

  /// Constructs a selection holding a single range.
  #[must_use]
  pub fn single(anchor: usize, head: usize) -> Self {
    Self::new_with_ids_unchecked(
      smallvec![Range::new(anchor, head)],
      smallvec![CursorId::fresh()],
    )
  }

  pub fn ranges(&self) -> &[Range] {
    &self.ranges
  }

  pub fn cursor_ids(&self) -> &[CursorId] {
    &self.cursor_ids
  }

  pub fn iter_with_ids(&self) -> impl DoubleEndedIterator<Item = (CursorId, &Range)> {
    self.cursor_ids.iter().copied().zip(self.ranges.iter())
  }

  pub fn index_of(&self, id: CursorId) -> Option<usize> {
    self.cursor_ids.iter().position(|cursor_id| *cursor_id == id)
  }

  pub fn range_by_id(&self, id: CursorId) -> Option<&Range> {
    self.index_of(id).and_then(|idx| self.ranges.get(idx))
  }

  /// Number of ranges (cursors) in the selection.
  #[allow(clippy::len_without_is_empty)]
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.ranges.len()
  }

  /// Ranges are sorted by [Range::from] with overlapping ranges merged.
  fn normalize(mut self) -> Self {
    if self.ranges.len() < 2 {
      return self;
    }
    let mut pairs: SmallVec<[(Range, CursorId); 1]> = self
      .ranges
      .into_iter()
      .zip(self.cursor_ids)
      .collect();
    pairs.sort_by_key(|(range, _)| range.from());

    let mut ranges: SmallVec<[Range; 1]> = SmallVec::with_capacity(pairs.len());
    let mut cursor_ids: SmallVec<[CursorId; 1]> = SmallVec::with_capacity(pairs.len());

    for (range, cursor_id) in pairs {
      if let Some(prev_range) = ranges.last_mut()
        && prev_range.overlaps(&range)
      {
        *prev_range = prev_range.merge(range);
        continue;
      }
      ranges.push(range);
      cursor_ids.push(cursor_id);
    }

    self.ranges = ranges;
    self.cursor_ids = cursor_ids;
    self
  }

  #[inline(always)]
  pub fn iter(&self) -> std::slice::Iter<'_, Range> {
    self.ranges.iter()
  }
}

impl<'a> IntoIterator for &'a Selection {
  type Item = &'a Range;
  type IntoIter = std::slice::Iter<'a, Range>;

  fn into_iter(self) -> std::slice::Iter<'a, Range> {
    self.ranges().iter()
  }
}
