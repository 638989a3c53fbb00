//! Ordering and duplicate detection for sortable text.
//!
//! A [`LineComparator`] is derived from [`SortSettings`] once per invocation.
//! Both sides of a comparison go through the same preprocessing (leading
//! blanks stripped, case folded) without touching the original text; the
//! preprocessed form is a [`SortKey`], which callers sorting many units should
//! build once per unit with [`LineComparator::key`].
//!
//! # Natural order
//!
//! With `natural_order` set, keys are split into alternating runs of ASCII
//! digits and everything else:
//!
//! ```text
//! "item10b" -> Text("item") Digits("10") Text("b")
//! ```
//!
//! Digit runs compare by value without parsing: significant digits are
//! compared by count, then lexicographically, so runs of any length work.
//! Zero padding only breaks ties between keys that are otherwise equal, the
//! shorter spelling first (`"a1" < "a01"`). A digit run facing a text run
//! compares by first character.
//!
//! # Reverse and duplicates
//!
//! `reverse` flips the sign of non-equal results only, so equal keys stay
//! equal and a stable sort keeps their input order. Duplicate detection
//! ignores `reverse` and the zero padding tie-break.

use std::{
  borrow::Cow,
  cmp::Ordering,
};

use strmanip_core::chars::trim_leading_blanks;

use super::SortSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineComparator {
  case_insensitive:          bool,
  natural_order:             bool,
  reverse:                   bool,
  ignore_leading_whitespace: bool,
}

/// A unit's text after preprocessing, ready to be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey<'a>(Cow<'a, str>);

impl SortKey<'_> {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl LineComparator {
  pub fn new(settings: &SortSettings) -> Self {
    Self {
      case_insensitive:          settings.case_insensitive,
      natural_order:             settings.natural_order,
      reverse:                   settings.reverse,
      ignore_leading_whitespace: settings.ignore_leading_whitespace,
    }
  }

  pub fn key<'a>(&self, text: &'a str) -> SortKey<'a> {
    let text = if self.ignore_leading_whitespace {
      trim_leading_blanks(text)
    } else {
      text
    };

    if self.case_insensitive {
      SortKey(Cow::Owned(text.to_lowercase()))
    } else {
      SortKey(Cow::Borrowed(text))
    }
  }

  pub fn compare(&self, a: &str, b: &str) -> Ordering {
    self.compare_keys(&self.key(a), &self.key(b))
  }

  pub fn compare_keys(&self, a: &SortKey, b: &SortKey) -> Ordering {
    let ordering = if self.natural_order {
      let (primary, padding) = natural_cmp(a.as_str(), b.as_str());
      primary.then(padding)
    } else {
      a.as_str().cmp(b.as_str())
    };

    if self.reverse {
      ordering.reverse()
    } else {
      ordering
    }
  }

  pub fn is_duplicate(&self, a: &str, b: &str) -> bool {
    self.keys_equal(&self.key(a), &self.key(b))
  }

  pub fn keys_equal(&self, a: &SortKey, b: &SortKey) -> bool {
    if self.natural_order {
      natural_cmp(a.as_str(), b.as_str()).0 == Ordering::Equal
    } else {
      a == b
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
  Digits(&'a str),
  Text(&'a str),
}

struct Runs<'a> {
  rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
  type Item = Run<'a>;

  fn next(&mut self) -> Option<Run<'a>> {
    let first = self.rest.chars().next()?;
    let digits = first.is_ascii_digit();
    let end = self
      .rest
      .find(|ch: char| ch.is_ascii_digit() != digits)
      .unwrap_or(self.rest.len());

    let (run, rest) = self.rest.split_at(end);
    self.rest = rest;
    Some(if digits {
      Run::Digits(run)
    } else {
      Run::Text(run)
    })
  }
}

fn runs(text: &str) -> Runs<'_> {
  Runs { rest: text }
}

/// Compares two keys run by run. Returns the ordering by value and, separately,
/// the first zero padding difference to use when the values are all equal.
fn natural_cmp(a: &str, b: &str) -> (Ordering, Ordering) {
  let mut a_runs = runs(a);
  let mut b_runs = runs(b);
  let mut padding = Ordering::Equal;

  loop {
    let (a_run, b_run) = match (a_runs.next(), b_runs.next()) {
      (None, None) => return (Ordering::Equal, padding),
      (None, Some(_)) => return (Ordering::Less, Ordering::Equal),
      (Some(_), None) => return (Ordering::Greater, Ordering::Equal),
      (Some(a_run), Some(b_run)) => (a_run, b_run),
    };

    let (primary, run_padding) = compare_runs(a_run, b_run);
    if primary != Ordering::Equal {
      return (primary, Ordering::Equal);
    }
    padding = padding.then(run_padding);
  }
}

fn compare_runs(a: Run, b: Run) -> (Ordering, Ordering) {
  match (a, b) {
    (Run::Digits(a), Run::Digits(b)) => {
      let a_significant = a.trim_start_matches('0');
      let b_significant = b.trim_start_matches('0');
      let value = a_significant
        .len()
        .cmp(&b_significant.len())
        .then_with(|| a_significant.cmp(b_significant));
      (value, a.len().cmp(&b.len()))
    },
    (Run::Text(a), Run::Text(b)) => (a.cmp(b), Ordering::Equal),
    // Runs are never empty and a digit never equals a non-digit.
    (Run::Digits(a), Run::Text(b)) | (Run::Text(a), Run::Digits(b)) => {
      (a.chars().next().cmp(&b.chars().next()), Ordering::Equal)
    },
  }
}

#[cfg(test)]
mod test {
  use quickcheck::quickcheck;

  use super::*;

  fn comparator(f: impl FnOnce(&mut SortSettings)) -> LineComparator {
    let mut settings = SortSettings::default();
    f(&mut settings);
    LineComparator::new(&settings)
  }

  fn settings_from_bits(bits: u8) -> SortSettings {
    SortSettings {
      case_insensitive: bits & 1 != 0,
      natural_order: bits & 2 != 0,
      reverse: bits & 4 != 0,
      remove_duplicates: bits & 8 != 0,
      ignore_leading_whitespace: bits & 16 != 0,
      ..SortSettings::default()
    }
  }

  #[test]
  fn test_lexicographic_by_default() {
    let cmp = LineComparator::default();
    assert_eq!(cmp.compare("apple", "banana"), Ordering::Less);
    assert_eq!(cmp.compare("item10", "item2"), Ordering::Less);
    assert_eq!(cmp.compare("B", "a"), Ordering::Less);
    assert_eq!(cmp.compare("same", "same"), Ordering::Equal);
    assert_eq!(cmp.compare("", "a"), Ordering::Less);
  }

  #[test]
  fn test_case_insensitive() {
    let cmp = comparator(|s| s.case_insensitive = true);
    assert_eq!(cmp.compare("B", "a"), Ordering::Greater);
    assert_eq!(cmp.compare("FOO", "foo"), Ordering::Equal);
    assert!(cmp.is_duplicate("Straße", "STRAßE"));
    assert!(!LineComparator::default().is_duplicate("FOO", "foo"));
  }

  #[test]
  fn test_ignore_leading_whitespace() {
    let cmp = comparator(|s| s.ignore_leading_whitespace = true);
    assert_eq!(cmp.compare("   b", "a"), Ordering::Greater);
    assert_eq!(cmp.compare("\tx", "x"), Ordering::Equal);
    assert!(cmp.is_duplicate("  x", "x"));
    // Only leading blanks are skipped.
    assert!(!cmp.is_duplicate("x ", "x"));
    assert_eq!(cmp.key("  kept as is").as_str(), "kept as is");
  }

  #[test]
  fn test_natural_order() {
    let cmp = comparator(|s| s.natural_order = true);
    assert_eq!(cmp.compare("item2", "item10"), Ordering::Less);
    assert_eq!(cmp.compare("item10", "item1"), Ordering::Greater);
    assert_eq!(cmp.compare("a1", "a"), Ordering::Greater);
    assert_eq!(cmp.compare("a", "a1"), Ordering::Less);
    assert_eq!(cmp.compare("1.10", "1.9"), Ordering::Greater);
    assert_eq!(cmp.compare("x2y3", "x2y10"), Ordering::Less);
  }

  #[test]
  fn test_natural_zero_padding() {
    let cmp = comparator(|s| s.natural_order = true);
    assert_eq!(cmp.compare("a1", "a01"), Ordering::Less);
    assert_eq!(cmp.compare("a001", "a01"), Ordering::Greater);
    // Padding only matters when everything else is equal.
    assert_eq!(cmp.compare("a01b", "a1c"), Ordering::Less);
    assert_eq!(cmp.compare("007", "7"), Ordering::Greater);
    assert!(cmp.is_duplicate("a01", "a1"));
    assert!(!cmp.is_duplicate("a01", "a2"));
  }

  #[test]
  fn test_natural_huge_numbers() {
    let cmp = comparator(|s| s.natural_order = true);
    let big = "9".repeat(200);
    let bigger = format!("1{}", "0".repeat(200));
    assert_eq!(cmp.compare(&big, &bigger), Ordering::Less);
    assert_eq!(cmp.compare(&bigger, &bigger), Ordering::Equal);
    assert_eq!(
      cmp.compare(&format!("v{big}x"), &format!("v{big}y")),
      Ordering::Less
    );
  }

  #[test]
  fn test_natural_digit_against_text() {
    let cmp = comparator(|s| s.natural_order = true);
    assert_eq!(cmp.compare("1a", "a1"), Ordering::Less);
    assert_eq!(cmp.compare("!", "1"), Ordering::Less);
    assert_eq!(cmp.compare("~", "123"), Ordering::Greater);
  }

  #[test]
  fn test_reverse_keeps_equality() {
    let cmp = comparator(|s| {
      s.reverse = true;
      s.case_insensitive = true;
    });
    assert_eq!(cmp.compare("a", "b"), Ordering::Greater);
    assert_eq!(cmp.compare("A", "a"), Ordering::Equal);
    assert!(cmp.is_duplicate("A", "a"));
  }

  quickcheck! {
    fn prop_antisymmetric(bits: u8, a: String, b: String) -> bool {
      let cmp = LineComparator::new(&settings_from_bits(bits));
      cmp.compare(&a, &b) == cmp.compare(&b, &a).reverse()
    }

    fn prop_reflexive(bits: u8, a: String) -> bool {
      let cmp = LineComparator::new(&settings_from_bits(bits));
      cmp.compare(&a, &a) == Ordering::Equal && cmp.is_duplicate(&a, &a)
    }

    fn prop_transitive(bits: u8, a: String, b: String, c: String) -> bool {
      let cmp = LineComparator::new(&settings_from_bits(bits));
      let mut items = [a, b, c];
      items.sort_by(|x, y| cmp.compare(x, y));
      let [x, y, z] = &items;
      cmp.compare(x, y) != Ordering::Greater
        && cmp.compare(y, z) != Ordering::Greater
        && cmp.compare(x, z) != Ordering::Greater
    }

    fn prop_transitive_natural_digits(bits: u8, a: Vec<u8>, b: Vec<u8>, c: Vec<u8>) -> bool {
      // Digit heavy input exercises the run logic far more than random strings.
      let alphabet = b"0012a b";
      let make = |raw: Vec<u8>| -> String {
        raw
          .into_iter()
          .map(|byte| alphabet[byte as usize % alphabet.len()] as char)
          .collect()
      };
      let cmp = LineComparator::new(&SortSettings {
        natural_order: true,
        ..settings_from_bits(bits)
      });
      let (a, b, c) = (make(a), make(b), make(c));
      let ab = cmp.compare(&a, &b);
      let bc = cmp.compare(&b, &c);
      if ab == bc && ab != Ordering::Equal {
        cmp.compare(&a, &c) == ab
      } else {
        true
      }
    }

    fn prop_duplicates_compare_equal_ignoring_padding(bits: u8, a: String, b: String) -> bool {
      let settings = settings_from_bits(bits);
      let cmp = LineComparator::new(&settings);
      if settings.natural_order || !cmp.is_duplicate(&a, &b) {
        true
      } else {
        cmp.compare(&a, &b) == Ordering::Equal
      }
    }
  }
}
