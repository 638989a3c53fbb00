//! `\uXXXX` escaping of non-ASCII text.
//!
//! Escapes are UTF-16 code units written as four lowercase hex digits, so
//! characters outside the basic multilingual plane become a surrogate pair.

use std::fmt::Write;

use crate::Tendril;

pub fn non_ascii_to_unicode(text: &str) -> Tendril {
  let mut res = Tendril::new();
  let mut units = [0u16; 2];
  for ch in text.chars() {
    if ch.is_ascii() {
      res.push(ch);
      continue;
    }
    for unit in ch.encode_utf16(&mut units) {
      // Writing into a string never fails.
      let _ = write!(res, "\\u{unit:04x}");
    }
  }
  res
}

/// Reverses [`non_ascii_to_unicode`]. Hex digits may be in either case;
/// malformed escapes and unpaired surrogates are kept verbatim.
pub fn unicode_to_non_ascii(text: &str) -> Tendril {
  let mut res = Tendril::new();
  let mut rest = text;
  while let Some(idx) = rest.find("\\u") {
    res.push_str(&rest[..idx]);
    let tail = &rest[idx..];
    match decode_escape(tail) {
      Some((ch, consumed)) => {
        res.push(ch);
        rest = &tail[consumed..];
      },
      None => {
        res.push_str("\\u");
        rest = &tail[2..];
      },
    }
  }
  res.push_str(rest);
  res
}

fn escape_unit(text: &str) -> Option<u16> {
  let hex = text.strip_prefix("\\u")?.get(..4)?;
  if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
    return None;
  }
  u16::from_str_radix(hex, 16).ok()
}

/// Decodes the escape at the start of `text`, returning the char and the
/// number of bytes it spans.
fn decode_escape(text: &str) -> Option<(char, usize)> {
  let first = escape_unit(text)?;
  if let Some(ch) = char::from_u32(u32::from(first)) {
    return Some((ch, 6));
  }

  let second = escape_unit(&text[6..])?;
  let ch = char::decode_utf16([first, second]).next()?.ok()?;
  Some((ch, 12))
}
