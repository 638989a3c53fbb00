//! Case conversions for a single line of text.
//!
//! Word-based conversions (camel, pascal, snake, kebab) split their input on
//! non-word characters and on case changes, so `"HTTPServer error"` is the
//! words `HTTP`, `Server`, `error`.

use strmanip_core::chars::char_is_word;

use crate::Tendril;

pub fn to_upper_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  text.chars().for_each(|c| res.extend(c.to_uppercase()));
  res
}

pub fn to_lower_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  text.chars().for_each(|c| res.extend(c.to_lowercase()));
  res
}

pub fn swap_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  for c in text.chars() {
    if c.is_uppercase() {
      res.extend(c.to_lowercase());
    } else if c.is_lowercase() {
      res.extend(c.to_uppercase());
    } else {
      res.push(c);
    }
  }
  res
}

/// Upper-cases the first letter, leaving the rest untouched.
pub fn capitalize(text: &str) -> Tendril {
  let mut res = Tendril::new();
  text.chars().fold(true, |pending, c| {
    if pending && c.is_alphabetic() {
      res.extend(c.to_uppercase());
      false
    } else {
      res.push(c);
      pending
    }
  });
  res
}

pub fn to_camel_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  for (idx, word) in words(text).into_iter().enumerate() {
    if idx == 0 {
      res.push_str(&to_lower_case(word));
    } else {
      push_title(&mut res, word);
    }
  }
  res
}

pub fn to_pascal_case(text: &str) -> Tendril {
  let mut res = Tendril::new();
  for word in words(text) {
    push_title(&mut res, word);
  }
  res
}

pub fn to_snake_case(text: &str) -> Tendril {
  to_separated_case(text, '_')
}

pub fn to_kebab_case(text: &str) -> Tendril {
  to_separated_case(text, '-')
}

fn to_separated_case(text: &str, sep: char) -> Tendril {
  let mut res = Tendril::new();
  for (idx, word) in words(text).into_iter().enumerate() {
    if idx > 0 {
      res.push(sep);
    }
    res.push_str(&to_lower_case(word));
  }
  res
}

fn push_title(buf: &mut Tendril, word: &str) {
  let mut chars = word.chars();
  if let Some(first) = chars.next() {
    buf.extend(first.to_uppercase());
    chars.for_each(|c| buf.extend(c.to_lowercase()));
  }
}

/// Splits `text` into words. Underscores separate words here even though
/// they count as word characters elsewhere.
fn words(text: &str) -> Vec<&str> {
  let mut words = Vec::new();
  let mut start = None;
  let mut chars = text.char_indices().peekable();
  let mut prev: Option<char> = None;

  while let Some((idx, c)) = chars.next() {
    if !char_is_word(c) || c == '_' {
      if let Some(from) = start.take() {
        words.push(&text[from..idx]);
      }
      prev = None;
      continue;
    }

    let boundary = match prev {
      Some(p) if c.is_uppercase() => {
        // "fooBar" and "HTTPServer": a new word starts at `B` and at `S`.
        p.is_lowercase()
          || p.is_numeric()
          || (p.is_uppercase() && chars.peek().is_some_and(|(_, next)| next.is_lowercase()))
      },
      _ => false,
    };

    if boundary && let Some(from) = start.replace(idx) {
      words.push(&text[from..idx]);
    }
    start.get_or_insert(idx);
    prev = Some(c);
  }

  if let Some(from) = start {
    words.push(&text[from..]);
  }
  words
}
