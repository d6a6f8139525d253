//! expect-script: scripted conversations with interactive programs
//!
//! expect-script launches a program on plain pipes and drives it the way a
//! person at a keyboard would: wait for a prompt to appear on stdout, type a
//! reply into stdin, repeat. It is meant for tools that insist on interactive
//! input, such as installers, REPLs, password prompts and wizards.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use expect_script::Script;
//!
//! fn main() -> Result<(), expect_script::ExpectError> {
//!     let report = Script::spawn("python3 -i")
//!         .expect(">>> ")
//!         .send("print(6 * 7)")
//!         .expect("42*>>> ")
//!         .send("exit()")
//!         .run()?;
//!
//!     println!("python finished with {}", report.exit_status);
//!     Ok(())
//! }
//! ```
//!
//! # How matching works
//!
//! Each expect step starts with an empty buffer and keeps appending whatever
//! the program prints. After every read, one trailing line break is trimmed
//! from the buffer and the result is compared against the step's glob
//! pattern. The glob has to describe the *whole* text, so `"Password: *"`
//! matches `"Password: "` but not `"Enter Password: "`; use a leading `*` to
//! skip earlier output.
//!
//! | Glob | Meaning |
//! |---|---|
//! | `*` | any run of characters, including none and including line breaks |
//! | `?` | exactly one character |
//! | `[abc]`, `[a-z]`, `[!0-9]` | one character from (or not from) a class |
//! | `\*` | a literal `*` |
//!
//! If the program exits before the pattern matches, the run stops early and
//! the report says so (see [`Outcome::ProcessDied`]). A program that stays
//! alive without printing a match blocks forever unless a timeout is set:
//!
//! ```rust,no_run
//! use expect_script::Script;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), expect_script::ExpectError> {
//! Script::spawn("./installer")
//!     .timeout(Duration::from_secs(30))
//!     .expect("*Continue? [y/n]*")
//!     .send("y")
//!     .run()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Diagnostics
//!
//! Scripts are silent by default. Install a [`Logger`] to follow along:
//! [`Script::debug`] prints to stdout, and [`TracingLogger`] forwards to the
//! `tracing` ecosystem (see [`logging::init_tracing`]).
//!
//! # Buffered programs
//!
//! Many programs switch to block buffering when stdout is a pipe, so their
//! prompts never show up. [`Script::unbuffer`] runs the command under the
//! `unbuffer` helper, which gives it a pseudo-terminal.

#![warn(missing_docs)]

mod buffer;
mod config;
mod engine;
pub mod logging;
mod pattern;
mod result;
mod session;

pub use buffer::strip_ansi;
pub use config::{EnvConfig, ScriptConfig};
pub use engine::{Script, Step, LINE_ENDING};
pub use logging::{ConsoleLogger, Logger, NullLogger, TracingLogger};
pub use pattern::{glob_match, trim_response, GlobPattern};
pub use result::{ExpectError, Outcome, PatternError, RunReport};
