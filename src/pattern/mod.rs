//! Output matching: newline trimming and glob comparison
//!
//! Both helpers are pure. The engine trims the bytes an expect step has
//! collected so far and tests the result against the step's glob; nothing here
//! keeps state between calls.

mod glob;
mod trim;

pub use glob::{glob_match, GlobPattern};
pub use trim::trim_response;
