//! Text primitives shared by the string manipulation commands.

pub mod chars;
pub mod line_ending;

pub use line_ending::{
  LineEnding,
  NATIVE_LINE_ENDING,
};
