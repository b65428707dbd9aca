//! # pike-regex
//!
//! **pike-regex** is a small regular expression engine that compiles patterns
//! to a flat bytecode program and runs them on a Pike-style virtual machine.
//!
//! ## Features
//!
//! - **Linear-time matching:** the VM simulates an NFA with at most one visit
//!   per instruction per input position, so matching is `O(program * input)`.
//! - **Capture groups:** parenthesized groups report their byte positions.
//! - **Assembly I/O:** compiled programs can be written as a line-oriented
//!   assembly text and read back, so bytecode can be inspected, hand-written
//!   and replayed.
//!
//! ## Usage
//!
//! ```rust
//! use pike_regex::Regex;
//!
//! let re = Regex::new("(a+)(b+)").unwrap();
//! let m = re.execute("aaabbb").unwrap();
//! assert_eq!(m.len(), 6);
//! assert_eq!(m.captures().get(0), Some("aaa"));
//! assert_eq!(m.captures().get(1), Some("bbb"));
//! ```
//!
//! Matching is anchored at the start of the subject: the engine reports the
//! length of the prefix it matched, or nothing. There is no implicit search
//! loop over starting positions.
//!
//! ## Surface syntax
//!
//! Literal bytes, `.` (any byte, not end-of-string), `[...]`/`[^...]` byte
//! classes with `-` ranges, `(...)` capture groups, `|` alternation, and the
//! quantifiers `+`, `*`, `?` with a trailing `?` for the non-greedy form.
//! Backslash escapes the metacharacters and `\n` is a newline.
//!
//! ## Crate Organization
//!
//! - `regex`: User-facing API tying the pipeline together
//! - `syntax`: Lexer, parse tree and recursive-descent parser
//! - `pike`: Bytecode, code generator, assembly I/O and the VM
//! - `util`: Shared types and helpers

pub mod pike;
pub mod regex;
pub mod syntax;
pub mod util;

pub use pike::asm::{read_program, write_program, write_program_string};
pub use pike::bytecode::{Inst, Program};
pub use pike::codegen::codegen;
pub use pike::vm::{State, VmMatch, execute, execute_with};
pub use regex::{Match, Regex, compile};
pub use util::{Captures, Span};
