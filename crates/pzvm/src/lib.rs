//! The public entry point for the PZ virtual machine execution core
//! (spec.md §1): wires the token vocabulary, the encoder, the value
//! cell/stacks, the dispatch loop, and the built-in foreign procedures
//! together.
//!
//! This crate stands in for an assembler and bytecode loader, both out of
//! scope (spec.md §1). It re-exports everything a caller needs to encode a
//! procedure buffer and run it, and carries the end-to-end tests for the
//! scenarios and invariants in spec.md §8.

pub use pz_encode::{EncodeError, Encoder};
pub use pz_interp::{execute, CCallFn, FatalError, Handler, Machine};
pub use pz_state::{Cell, ExpressionStack, ReturnStack};
pub use pz_token::{
    AbsoluteWidth, ImmediateType, ImmediateValue, Opcode, Token, VmConfig, Width, MAX_TOKEN_NUMBER,
};

pub mod foreign;
