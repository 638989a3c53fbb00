//! Mapping sorted units back onto the regions they were taken from.
//!
//! Regions are slots: the i-th region in document order receives the i-th
//! sorted unit. When deduplication left fewer units than regions, the
//! trailing regions are deleted together with their cursors.
//!
//! ```text
//! regions:  R0    R1    R2    R3
//! units:    "bar" "foo"
//! result:   Replace(R0, "bar") Replace(R1, "foo") Delete(R2) Delete(R3)
//! ```
//!
//! Editing a region shifts every offset after it, so instructions must be
//! applied from the bottom of the document up. Use
//! [`Reconciliation::into_application_order`] to get them in that order.

use std::cmp::Reverse;

use super::TextUnit;
use crate::Tendril;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInstruction<R> {
  /// Substitute the region's content.
  Replace(R, Tendril),
  /// Remove the region's content and the cursor attached to it.
  Delete(R),
}

impl<R> EditInstruction<R> {
  pub fn region(&self) -> &R {
    match self {
      Self::Replace(region, _) | Self::Delete(region) => region,
    }
  }

  pub fn is_delete(&self) -> bool {
    matches!(self, Self::Delete(_))
  }
}

/// Instructions for every original region, in region (slot) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<R> {
  instructions: Vec<EditInstruction<R>>,
}

impl<R> Reconciliation<R> {
  pub fn instructions(&self) -> &[EditInstruction<R>] {
    &self.instructions
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }

  pub fn replacements(&self) -> usize {
    self.len() - self.deletions()
  }

  pub fn deletions(&self) -> usize {
    self
      .instructions
      .iter()
      .filter(|instruction| instruction.is_delete())
      .count()
  }

  /// Consumes the reconciliation, returning instructions ordered by
  /// descending start position as reported by `start_of`.
  pub fn into_application_order<K, F>(self, mut start_of: F) -> Vec<EditInstruction<R>>
  where
    K: Ord,
    F: FnMut(&R) -> K,
  {
    let mut instructions = self.instructions;
    instructions.sort_by_cached_key(|instruction| Reverse(start_of(instruction.region())));
    instructions
  }
}

impl<R> IntoIterator for Reconciliation<R> {
  type Item = EditInstruction<R>;
  type IntoIter = std::vec::IntoIter<EditInstruction<R>>;

  fn into_iter(self) -> Self::IntoIter {
    self.instructions.into_iter()
  }
}

/// Pairs `regions` (in ascending document order) with `units`.
///
/// Region `i` is replaced by unit `i`; regions without a unit are deleted.
/// The unit's own region handle is irrelevant here, only its text moves.
pub fn reconcile<R, U>(
  regions: impl IntoIterator<Item = R>,
  units: impl IntoIterator<Item = TextUnit<U>>,
) -> Reconciliation<R> {
  let mut units = units.into_iter();
  let instructions: Vec<_> = regions
    .into_iter()
    .map(|region| {
      match units.next() {
        Some(unit) => EditInstruction::Replace(region, unit.into_text()),
        None => EditInstruction::Delete(region),
      }
    })
    .collect();

  let surplus = units.count();
  if surplus > 0 {
    tracing::warn!(
      surplus,
      regions = instructions.len(),
      "more sorted units than regions, dropping the surplus"
    );
  }

  let reconciliation = Reconciliation { instructions };
  tracing::debug!(
    replaced = reconciliation.replacements(),
    deleted = reconciliation.deletions(),
    "reconciled sorted units with regions"
  );
  reconciliation
}
