use crate::line_ending::LineEnding;

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad through Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

/// Whitespace as seen by line-oriented commands: blanks plus any line ending
/// character that ended up inside a unit.
#[inline]
pub fn char_is_blank(ch: char) -> bool {
  char_is_whitespace(ch) || char_is_line_ending(ch) || ch == '\r'
}

#[inline]
pub fn char_is_word(ch: char) -> bool {
  ch.is_alphanumeric() || ch == '_'
}

/// Returns `text` without its leading blanks.
#[inline]
pub fn trim_leading_blanks(text: &str) -> &str {
  text.trim_start_matches(char_is_blank)
}
