//! The bytecode engine: instruction set, code generator, assembly text
//! format, and the Pike VM that executes programs.
//!
//! The pipeline through this module is
//! parse tree -> [`codegen`] -> [`bytecode::Program`] -> [`vm::execute`],
//! with [`asm`] providing a text form of programs on the side.
//!
//! [`codegen`]: codegen::codegen

pub mod asm;
pub mod bytecode;
pub mod codegen;
pub mod vm;
