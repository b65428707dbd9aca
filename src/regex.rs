//! Types and API for regex matching.
//!
//! This module defines the [`Regex`] struct, a wrapper tying the pipeline
//! together: pattern text through the parser and code generator into a
//! [`Program`], and subjects through the Pike VM.

use std::error::Error;
use std::io;

use log::debug;

use crate::pike::asm;
use crate::pike::bytecode::Program;
use crate::pike::codegen;
use crate::pike::vm::{self, State};
use crate::syntax;
use crate::util::Captures;

/// Parse and code-generate a pattern.
pub fn compile(pattern: &str) -> Result<Program, Box<dyn Error + Send + Sync + 'static>> {
    let tree = syntax::parse(pattern)?;
    let program = codegen::codegen(&tree)?;
    debug!(
        "compiled {:?} to {} instructions, {} capture groups",
        pattern,
        program.len(),
        program.num_captures()
    );
    Ok(program)
}

/// A compiled regular expression.
pub struct Regex {
    program: Program,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, Box<dyn Error + Send + Sync + 'static>> {
        Ok(Regex {
            program: compile(pattern)?,
        })
    }

    /// A regex straight from bytecode, e.g. from [`crate::read_program`].
    pub fn from_program(program: Program) -> Self {
        Regex { program }
    }

    /// Match the regex against the start of `subject`. Returns the matched
    /// prefix and its capture groups, or None.
    pub fn execute<'s>(&self, subject: &'s str) -> Option<Match<'s>> {
        let m = vm::execute(&self.program, subject)?;
        Some(Match {
            subject,
            len: m.len,
            captures: Captures::new(subject, m.saved),
        })
    }

    /// Like [`Regex::execute`], reusing the allocations in `state` across
    /// calls. Handy when matching many subjects in a loop.
    pub fn execute_with<'s>(&self, subject: &'s str, state: &mut State) -> Option<Match<'s>> {
        let m = vm::execute_with(&self.program, subject, state)?;
        Some(Match {
            subject,
            len: m.len,
            captures: Captures::new(subject, m.saved),
        })
    }

    /// True whenever some prefix of `subject` matches.
    pub fn is_match(&self, subject: &str) -> bool {
        self.execute(subject).is_some()
    }

    /// Number of capture groups in the pattern.
    pub fn num_captures(&self) -> usize {
        self.program.num_captures()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Fresh scratch state sized for this regex, for [`Regex::execute_with`].
    pub fn new_state(&self) -> State {
        State::new(&self.program)
    }

    /// Dump the compiled program as assembly text.
    pub fn write_asm<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        asm::write_program(&self.program, out)
    }
}

/// A successful anchored match.
#[derive(Debug, Clone)]
pub struct Match<'s> {
    subject: &'s str,
    len: usize,
    captures: Captures<'s>,
}

impl<'s> Match<'s> {
    /// Length of the matched prefix, in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The matched prefix of the subject.
    pub fn slice(&self) -> &'s str {
        &self.subject[..self.len]
    }

    pub fn captures(&self) -> &Captures<'s> {
        &self.captures
    }
}
