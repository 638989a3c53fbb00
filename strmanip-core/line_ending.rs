use ropey::{
  Rope,
  RopeSlice,
};

#[cfg(target_os = "windows")]
pub const NATIVE_LINE_ENDING: LineEnding = LineEnding::Crlf;

#[cfg(not(target_os = "windows"))]
pub const NATIVE_LINE_ENDING: LineEnding = LineEnding::LF;

#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum LineEnding {
  /// CarriageReturn followed by LineFeed.
  Crlf,

  /// U+000A -- LineFeed
  LF,

  #[cfg(feature = "unicode-lines")]
  /// U+000B -- VerticalTab
  VT,

  #[cfg(feature = "unicode-lines")]
  /// U+000C -- FormFeed
  FF,

  #[cfg(feature = "unicode-lines")]
  /// U+000D -- CarriageReturn
  CR,

  #[cfg(feature = "unicode-lines")]
  /// U+0085 -- NextLine
  Nel,

  /// U+2028 -- Line Separator
  #[cfg(feature = "unicode-lines")]
  LS,

  /// U+2029 -- ParagraphSeparator
  #[cfg(feature = "unicode-lines")]
  PS,
}

impl LineEnding {
  #[inline]
  pub const fn len_chars(&self) -> usize {
    match self {
      Self::Crlf => 2,
      _ => 1,
    }
  }

  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\u{000D}\u{000A}",
      Self::LF => "\u{000A}",
      #[cfg(feature = "unicode-lines")]
      Self::VT => "\u{000B}",
      #[cfg(feature = "unicode-lines")]
      Self::FF => "\u{000C}",
      #[cfg(feature = "unicode-lines")]
      Self::CR => "\u{000D}",
      #[cfg(feature = "unicode-lines")]
      Self::Nel => "\u{0085}",
      #[cfg(feature = "unicode-lines")]
      Self::LS => "\u{2028}",
      #[cfg(feature = "unicode-lines")]
      Self::PS => "\u{2029}",
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\u{000A}' => Some(LineEnding::LF),
      #[cfg(feature = "unicode-lines")]
      '\u{000B}' => Some(LineEnding::VT),
      #[cfg(feature = "unicode-lines")]
      '\u{000C}' => Some(LineEnding::FF),
      #[cfg(feature = "unicode-lines")]
      '\u{000D}' => Some(LineEnding::CR),
      #[cfg(feature = "unicode-lines")]
      '\u{0085}' => Some(LineEnding::Nel),
      #[cfg(feature = "unicode-lines")]
      '\u{2028}' => Some(LineEnding::LS),
      #[cfg(feature = "unicode-lines")]
      '\u{2029}' => Some(LineEnding::PS),
      _ => None,
    }
  }

  // Not `FromStr`: the return type has to match `from_char`.
  #[allow(clippy::should_implement_trait)]
  #[inline]
  pub fn from_str(g: &str) -> Option<LineEnding> {
    match g {
      "\u{000D}\u{000A}" => Some(LineEnding::Crlf),
      _ => {
        let mut chars = g.chars();
        match (chars.next(), chars.next()) {
          (Some(ch), None) => LineEnding::from_char(ch),
          _ => None,
        }
      },
    }
  }
}

impl Default for LineEnding {
  fn default() -> Self {
    NATIVE_LINE_ENDING
  }
}

/// Attempts to detect what line ending the passed document uses.
pub fn auto_detect_line_ending(doc: &Rope) -> Option<LineEnding> {
  // Form feeds, vertical tabs and paragraph separators are special-use only.
  for line in doc.lines().take(100) {
    match get_line_ending(&line) {
      None => {},
      #[cfg(feature = "unicode-lines")]
      Some(LineEnding::VT) | Some(LineEnding::FF) | Some(LineEnding::PS) => {},
      ending => return ending,
    }
  }

  None
}

/// Returns the passed line's line ending, if any.
pub fn get_line_ending(line: &RopeSlice) -> Option<LineEnding> {
  let len = line.len_chars();
  if len == 0 {
    return None;
  }

  // Ropey keeps CRLF contiguous, so a non-contiguous tail can't be one.
  let tail = line.slice(len.saturating_sub(2)..);
  if let Some(ending) = tail.as_str().and_then(LineEnding::from_str) {
    return Some(ending);
  }

  LineEnding::from_char(line.char(len - 1))
}

/// Splits `text` into line segments, the way `str::split` would if it knew
/// about every [`LineEnding`].
///
/// Each item is the segment content plus the ending that terminated it. The
/// last segment never has an ending, so text ending in a line ending yields a
/// trailing empty segment and empty text yields a single empty segment.
///
/// ```
/// use strmanip_core::line_ending::split_lines;
///
/// let lines: Vec<_> = split_lines("a\r\nb\n").map(|(line, _)| line).collect();
/// assert_eq!(lines, ["a", "b", ""]);
/// ```
pub fn split_lines(text: &str) -> SplitLines<'_> {
  SplitLines {
    text,
    finished: false,
  }
}

#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
  text:     &'a str,
  finished: bool,
}

impl<'a> Iterator for SplitLines<'a> {
  type Item = (&'a str, Option<LineEnding>);

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    for (idx, ch) in self.text.char_indices() {
      let ending = if ch == '\r' && self.text[idx + 1..].starts_with('\n') {
        Some(LineEnding::Crlf)
      } else {
        LineEnding::from_char(ch)
      };

      if let Some(ending) = ending {
        let line = &self.text[..idx];
        self.text = &self.text[idx + ending.as_str().len()..];
        return Some((line, Some(ending)));
      }
    }

    self.finished = true;
    Some((self.text, None))
  }
}
