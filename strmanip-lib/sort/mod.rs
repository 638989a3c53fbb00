//! Line and selection sorting.
//!
//! Sorting works on [`TextUnit`]s: a piece of text plus the handle of the
//! region it came from. In [`SortBy::Lines`] mode the units are the lines of a
//! single region and the result is joined back into one string, so the region
//! count never changes. In [`SortBy::Selections`] mode every region is one
//! unit and deduplication can shrink the unit count, which
//! [`reconcile`](reconcile::reconcile) turns into deletions. Commands pick the
//! mode from the number of regions.
//!
//! ```
//! use strmanip_core::LineEnding;
//! use strmanip_lib::sort::{
//!   SortSettings,
//!   sort_lines,
//! };
//!
//! let sorted = sort_lines("banana\napple\ncherry", &SortSettings::default(), LineEnding::LF);
//! assert_eq!(sorted, "apple\nbanana\ncherry");
//! ```

pub mod comparator;
pub mod reconcile;

use serde::{
  Deserialize,
  Serialize,
};
use strmanip_core::{
  LineEnding,
  line_ending::split_lines,
};

pub use self::{
  comparator::{
    LineComparator,
    SortKey,
  },
  reconcile::{
    EditInstruction,
    Reconciliation,
    reconcile,
  },
};
use crate::Tendril;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
  /// Sort the lines contained in a single region.
  #[default]
  Lines,
  /// Treat every region as one unit and reorder the regions.
  Selections,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SortSettings {
  pub case_insensitive:          bool,
  pub natural_order:             bool,
  pub reverse:                   bool,
  pub remove_duplicates:         bool,
  pub ignore_leading_whitespace: bool,
  pub sort_by:                   SortBy,
}

/// Text extracted from a region, tagged with that region's handle.
///
/// The text is fixed at extraction; sorting only moves units around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit<R> {
  region: R,
  text:   Tendril,
}

impl<R> TextUnit<R> {
  pub fn new(region: R, text: impl Into<Tendril>) -> Self {
    Self {
      region,
      text: text.into(),
    }
  }

  pub fn region(&self) -> &R {
    &self.region
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn into_text(self) -> Tendril {
    self.text
  }
}

/// Stable sort of `units`, dropping all but the first unit of each duplicate
/// class when `remove_duplicates` is set.
pub fn sort_units<R>(units: Vec<TextUnit<R>>, settings: &SortSettings) -> Vec<TextUnit<R>> {
  if units.len() <= 1 {
    return units;
  }

  let comparator = LineComparator::new(settings);
  let order = {
    let keys: Vec<_> = units.iter().map(|unit| comparator.key(unit.text())).collect();
    let mut order: Vec<usize> = (0..units.len()).collect();
    order.sort_by(|&a, &b| comparator.compare_keys(&keys[a], &keys[b]));
    if settings.remove_duplicates {
      order.dedup_by(|next, kept| comparator.keys_equal(&keys[*kept], &keys[*next]));
    }
    order
  };

  tracing::trace!(
    units = units.len(),
    kept = order.len(),
    "sorted text units"
  );

  let mut slots: Vec<_> = units.into_iter().map(Some).collect();
  order
    .into_iter()
    .filter_map(|idx| slots[idx].take())
    .collect()
}

/// Splits `text` into one unit per line, tagged with the line index.
///
/// A final line ending produces a trailing empty unit; nothing else is added
/// or dropped.
pub fn split_units(text: &str) -> Vec<TextUnit<usize>> {
  split_lines(text)
    .enumerate()
    .map(|(idx, (line, _))| TextUnit::new(idx, line))
    .collect()
}

/// Sorts the lines of `text` and joins them with `line_ending`.
pub fn sort_lines(text: &str, settings: &SortSettings, line_ending: LineEnding) -> Tendril {
  let units = split_units(text);
  if units.len() <= 1 {
    return text.into();
  }

  let mut res = Tendril::new();
  for (idx, unit) in sort_units(units, settings).into_iter().enumerate() {
    if idx > 0 {
      res.push_str(line_ending.as_str());
    }
    res.push_str(unit.text());
  }
  res
}
