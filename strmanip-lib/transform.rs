//! Single-line string transforms, applied line by line over a region.

use serde::{
  Deserialize,
  Serialize,
};
use strmanip_core::line_ending::split_lines;

use crate::{
  Tendril,
  case_convention,
  escape,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringTransform {
  UpperCase,
  LowerCase,
  SwapCase,
  Capitalize,
  CamelCase,
  PascalCase,
  SnakeCase,
  KebabCase,
  NonAsciiToUnicodeEscaped,
  UnicodeEscapedToNonAscii,
}

impl StringTransform {
  pub fn transform_line(self, line: &str) -> Tendril {
    match self {
      Self::UpperCase => case_convention::to_upper_case(line),
      Self::LowerCase => case_convention::to_lower_case(line),
      Self::SwapCase => case_convention::swap_case(line),
      Self::Capitalize => case_convention::capitalize(line),
      Self::CamelCase => case_convention::to_camel_case(line),
      Self::PascalCase => case_convention::to_pascal_case(line),
      Self::SnakeCase => case_convention::to_snake_case(line),
      Self::KebabCase => case_convention::to_kebab_case(line),
      Self::NonAsciiToUnicodeEscaped => escape::non_ascii_to_unicode(line),
      Self::UnicodeEscapedToNonAscii => escape::unicode_to_non_ascii(line),
    }
  }

  /// Transforms every line of `text` on its own, keeping each line ending
  /// as it was.
  pub fn transform_by_line(self, text: &str) -> Tendril {
    let mut res = Tendril::new();
    for (line, ending) in split_lines(text) {
      res.push_str(&self.transform_line(line));
      if let Some(ending) = ending {
        res.push_str(ending.as_str());
      }
    }
    res
  }
}
