//! Assembly text form of bytecode programs.
//!
//! The format is line-oriented. A line is blank, a label (`name:` as the
//! only token), or one instruction; `;` starts a comment running to the end
//! of the line. A label names the instruction after it, i.e. the index equal
//! to the number of code lines seen so far, and labels may stack. Operand
//! labels are resolved against that table, so hand-written programs can be
//! read back with [`read_program`] and any program can be dumped with
//! [`write_program`]:
//!
//! ```text
//!     char a          ; one instruction per line
//! L1:
//!     char b
//!     split L1 L2     ; operands are labels, not indices
//! L2:
//!     match
//! ```
//!
//! `char`, `match`, `jump`, `split` and `save` are the core mnemonics.
//! `any`, `range` and `nrange` extend the grammar so that every compiled
//! program has a text form; `range`/`nrange` take one `lo-hi` operand per
//! inclusive pair (a single character is read as the pair `c-c`).

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;

use super::bytecode::{Inst, Program};

const COMMENT: char = ';';

/// An error in an assembly listing, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    pub line: usize,
    pub kind: AsmErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    UnknownOpcode(String),
    /// Wrong number of tokens for the opcode (too few or too many).
    WrongArity { opcode: &'static str, want: usize },
    /// A label line that is not a single `name:` token.
    BadLabel,
    /// An operand that does not parse: a multi-character `char`, a bad
    /// `save` slot, a malformed range pair.
    BadOperand(String),
    UndefinedLabel(String),
    /// A label defined after the last instruction and used as a target.
    LabelOutOfRange(String),
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            AsmErrorKind::UnknownOpcode(op) => write!(f, "unknown opcode \"{}\"", op),
            AsmErrorKind::WrongArity { opcode, want } => {
                write!(f, "require {} tokens for {}", want, opcode)
            }
            AsmErrorKind::BadLabel => write!(f, "label must be a single \"name:\" token"),
            AsmErrorKind::BadOperand(tok) => write!(f, "bad operand \"{}\"", tok),
            AsmErrorKind::UndefinedLabel(label) => write!(f, "label \"{}\" not found", label),
            AsmErrorKind::LabelOutOfRange(label) => {
                write!(f, "label \"{}\" does not name an instruction", label)
            }
        }
    }
}

impl Error for AsmError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineType<'t> {
    Blank,
    Label(&'t str),
    Code(&'t str),
}

/// Strip any comment, trim whitespace, and classify the line.
fn classify(line: &str, lineno: usize) -> Result<LineType<'_>, AsmError> {
    let line = match line.find(COMMENT) {
        Some(at) => &line[..at],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        Ok(LineType::Blank)
    } else if let Some(name) = line.strip_suffix(':') {
        if name.is_empty() || name.contains(char::is_whitespace) || name.contains(':') {
            Err(AsmError {
                line: lineno,
                kind: AsmErrorKind::BadLabel,
            })
        } else {
            Ok(LineType::Label(name))
        }
    } else {
        Ok(LineType::Code(line))
    }
}

/// Parse an assembly listing into a program.
pub fn read_program(text: &str) -> Result<Program, AsmError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        lines.push((i + 1, classify(raw, i + 1)?));
    }

    // Associate each label with the next line of code. First definition
    // wins if a name repeats.
    let mut labels: HashMap<&str, usize> = HashMap::new();
    let mut ncode = 0;
    for &(_, line) in &lines {
        match line {
            LineType::Label(name) => {
                labels.entry(name).or_insert(ncode);
            }
            LineType::Code(_) => ncode += 1,
            LineType::Blank => (),
        }
    }

    let mut insts = Vec::with_capacity(ncode);
    for &(lineno, line) in &lines {
        if let LineType::Code(code) = line {
            insts.push(read_inst(code, lineno, &labels, ncode)?);
        }
    }
    Ok(Program::new(insts))
}

/// Parse one code line, resolving label operands.
fn read_inst(
    code: &str,
    lineno: usize,
    labels: &HashMap<&str, usize>,
    ncode: usize,
) -> Result<Inst, AsmError> {
    let err = |kind| AsmError { line: lineno, kind };
    let arity = |opcode, want: usize, got: usize| {
        if got == want {
            Ok(())
        } else {
            Err(err(AsmErrorKind::WrongArity { opcode, want }))
        }
    };
    let target = |label: &str| {
        let &index = labels
            .get(label)
            .ok_or_else(|| err(AsmErrorKind::UndefinedLabel(label.to_string())))?;
        if index >= ncode {
            return Err(err(AsmErrorKind::LabelOutOfRange(label.to_string())));
        }
        Ok(index)
    };

    let tokens: Vec<&str> = code.split_whitespace().collect();
    match tokens[0] {
        "char" => {
            arity("char", 2, tokens.len())?;
            Ok(Inst::Char(code_unit(tokens[1]).ok_or_else(|| {
                err(AsmErrorKind::BadOperand(tokens[1].to_string()))
            })?))
        }
        "any" => {
            arity("any", 1, tokens.len())?;
            Ok(Inst::Any)
        }
        "match" => {
            arity("match", 1, tokens.len())?;
            Ok(Inst::Match)
        }
        "jump" => {
            arity("jump", 2, tokens.len())?;
            Ok(Inst::Jump(target(tokens[1])?))
        }
        "split" => {
            arity("split", 3, tokens.len())?;
            Ok(Inst::Split(target(tokens[1])?, target(tokens[2])?))
        }
        "save" => {
            arity("save", 2, tokens.len())?;
            let slot = tokens[1]
                .parse::<usize>()
                .map_err(|_| err(AsmErrorKind::BadOperand(tokens[1].to_string())))?;
            Ok(Inst::Save(slot))
        }
        "range" | "nrange" => {
            if tokens.len() < 2 {
                return Err(err(AsmErrorKind::WrongArity {
                    opcode: if tokens[0] == "range" { "range" } else { "nrange" },
                    want: 2,
                }));
            }
            let mut pairs = Vec::with_capacity(tokens.len() - 1);
            for tok in &tokens[1..] {
                pairs.push(
                    range_pair(tok)
                        .ok_or_else(|| err(AsmErrorKind::BadOperand(tok.to_string())))?,
                );
            }
            let pairs = pairs.into_boxed_slice();
            if tokens[0] == "range" {
                Ok(Inst::Range(pairs))
            } else {
                Ok(Inst::NRange(pairs))
            }
        }
        opcode => Err(err(AsmErrorKind::UnknownOpcode(opcode.to_string()))),
    }
}

/// A single code unit operand. Bytes above 0x7f are written as their
/// U+0080..U+00FF code points, so map such a char back to its byte.
fn code_unit(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    u8::try_from(u32::from(c)).ok()
}

/// A `lo-hi` range pair, or a single code unit standing for `c-c`.
fn range_pair(token: &str) -> Option<(u8, u8)> {
    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [c] => {
            let b = u8::try_from(u32::from(*c)).ok()?;
            Some((b, b))
        }
        [lo, '-', hi] => {
            let lo = u8::try_from(u32::from(*lo)).ok()?;
            let hi = u8::try_from(u32::from(*hi)).ok()?;
            Some((lo, hi))
        }
        _ => None,
    }
}

/// Write a program as assembly text.
///
/// Only instructions that are jump or split targets get labels, fresh
/// `L1, L2, …` in increasing instruction order; everything else is four
/// spaces of indent and one instruction per line.
pub fn write_program<W: io::Write>(prog: &Program, out: &mut W) -> io::Result<()> {
    let mut labels = vec![0usize; prog.len()];
    for inst in prog {
        match *inst {
            Inst::Jump(x) => labels[x] = 1,
            Inst::Split(x, y) => {
                labels[x] = 1;
                labels[y] = 1;
            }
            _ => (),
        }
    }
    let mut next = 1;
    for slot in labels.iter_mut() {
        if *slot > 0 {
            *slot = next;
            next += 1;
        }
    }

    for (i, inst) in prog.iter().enumerate() {
        if labels[i] > 0 {
            writeln!(out, "L{}:", labels[i])?;
        }
        match inst {
            Inst::Char(c) => writeln!(out, "    char {}", *c as char)?,
            Inst::Any => writeln!(out, "    any")?,
            Inst::Range(ranges) => {
                write!(out, "    range")?;
                for &(lo, hi) in ranges.iter() {
                    write!(out, " {}-{}", lo as char, hi as char)?;
                }
                writeln!(out)?;
            }
            Inst::NRange(ranges) => {
                write!(out, "    nrange")?;
                for &(lo, hi) in ranges.iter() {
                    write!(out, " {}-{}", lo as char, hi as char)?;
                }
                writeln!(out)?;
            }
            Inst::Match => writeln!(out, "    match")?,
            Inst::Jump(x) => writeln!(out, "    jump L{}", labels[*x])?,
            Inst::Split(x, y) => writeln!(out, "    split L{} L{}", labels[*x], labels[*y])?,
            Inst::Save(slot) => writeln!(out, "    save {}", slot)?,
        }
    }
    Ok(())
}

/// [`write_program`] into a `String`.
pub fn write_program_string(prog: &Program) -> String {
    let mut buf = Vec::new();
    write_program(prog, &mut buf).expect("write to a Vec is infallible");
    String::from_utf8(buf).expect("assembly output is UTF-8")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::pike::codegen::codegen;
    use crate::pike::vm::execute;
    use crate::syntax::parse;

    use super::*;

    fn compile(pattern: &str) -> Program {
        codegen(&parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn read_a_simple_program() {
        let prog = read_program("    char a\n    char b\n    match\n").unwrap();
        assert_eq!(
            prog.iter().cloned().collect::<Vec<_>>(),
            vec![Inst::Char(b'a'), Inst::Char(b'b'), Inst::Match]
        );
    }

    #[test]
    fn labels_comments_and_blanks() {
        let text = "
; a* as bytecode
L1:
    split L2 L3   ; greedy: repeat first
L2:
    char a
    jump L1
L3:
    match
";
        let prog = read_program(text).unwrap();
        assert_eq!(
            prog.iter().cloned().collect::<Vec<_>>(),
            vec![
                Inst::Split(1, 3),
                Inst::Char(b'a'),
                Inst::Jump(0),
                Inst::Match,
            ]
        );
        assert_eq!(execute(&prog, "aaa").unwrap().len, 3);
    }

    #[test]
    fn stacked_labels_share_an_instruction() {
        let text = "start:\nalso:\n    jump also\n";
        let prog = read_program(text).unwrap();
        assert_eq!(
            prog.iter().cloned().collect::<Vec<_>>(),
            vec![Inst::Jump(0)]
        );
    }

    #[test]
    fn range_operands() {
        let prog = read_program("    range a-z 0-9 _\n    match\n").unwrap();
        assert_eq!(
            prog[0],
            Inst::Range(Box::new([(b'a', b'z'), (b'0', b'9'), (b'_', b'_')]))
        );
    }

    #[test]
    fn save_and_split() {
        let text = "    save 0\nL1:\n    char x\n    split L1 L2\nL2:\n    save 1\n    match\n";
        let prog = read_program(text).unwrap();
        assert_eq!(prog.num_captures(), 1);
        let m = execute(&prog, "xxx").unwrap();
        assert_eq!(m.len, 3);
        assert_eq!(&*m.saved, &[0, 3]);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let e = read_program("    char a\n    weird\n").unwrap_err();
        assert_eq!(e.line, 2);
        assert_matches!(e.kind, AsmErrorKind::UnknownOpcode(op) if op == "weird");

        let e = read_program("    jump nowhere\n").unwrap_err();
        assert_matches!(e.kind, AsmErrorKind::UndefinedLabel(l) if l == "nowhere");

        let e = read_program("    char a b\n").unwrap_err();
        assert_matches!(
            e.kind,
            AsmErrorKind::WrongArity {
                opcode: "char",
                want: 2
            }
        );

        let e = read_program("    save x\n").unwrap_err();
        assert_matches!(e.kind, AsmErrorKind::BadOperand(t) if t == "x");

        let e = read_program("bad label:\n    match\n").unwrap_err();
        assert_matches!(e.kind, AsmErrorKind::BadLabel);

        let e = read_program("    jump end\nend:\n").unwrap_err();
        assert_matches!(e.kind, AsmErrorKind::LabelOutOfRange(l) if l == "end");
    }

    #[test]
    fn writer_labels_only_targets() {
        let text = write_program_string(&compile("a*"));
        assert_eq!(text, "L1:\n    split L2 L3\nL2:\n    char a\n    jump L1\nL3:\n    match\n");
    }

    #[test]
    fn writer_output_for_saves_and_ranges() {
        let text = write_program_string(&compile("([a-c]+)"));
        assert_eq!(
            text,
            "    save 0\nL1:\n    range a-c\n    split L1 L2\nL2:\n    save 1\n    match\n"
        );
    }

    #[test]
    fn round_trip_preserves_targets() {
        for pattern in [
            "a",
            "abc",
            "a*",
            "a*?",
            "a+b?",
            "a|b|c",
            "(a+)(b+)",
            "(a|b)*abb",
            "[a-z0-9]+",
            "[^x]*x",
            "((a)(b))?.",
        ] {
            let prog = compile(pattern);
            let text = write_program_string(&prog);
            let back = read_program(&text).unwrap();
            assert_eq!(back, prog, "round trip changed {:?}:\n{}", pattern, text);
        }
    }

    #[test]
    fn round_trip_of_high_bytes() {
        let prog = Program::new(vec![Inst::Char(0xe9), Inst::Match]);
        let back = read_program(&write_program_string(&prog)).unwrap();
        assert_eq!(back, prog);
    }
}
