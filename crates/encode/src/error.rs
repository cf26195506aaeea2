use std::fmt;

use pz_token::{AbsoluteWidth, Opcode};

/// Encoder errors: spec.md §7 class 1, "unsupported `(opcode, widths)`
/// combinations, invalid immediate type for `LOAD_IMMEDIATE_NUM`, unknown
/// normalized width". All of these are the assembler's (out of scope) fault,
/// not a runtime condition a bytecode program can trigger or recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// no token exists for this `(opcode, width1, width2)` combination.
    UnsupportedWidths {
        opcode: Opcode,
        width1: AbsoluteWidth,
        width2: AbsoluteWidth,
    },
    /// the immediate supplied does not carry the value this opcode needs
    /// (e.g. `ImmediateType::None` given to `LoadImmediateNum`).
    InvalidImmediateType {
        opcode: Opcode,
        expected: &'static str,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnsupportedWidths {
                opcode,
                width1,
                width2,
            } => write!(
                f,
                "no token for opcode {opcode:?} with widths ({width1:?}, {width2:?})"
            ),
            EncodeError::InvalidImmediateType { opcode, expected } => {
                write!(f, "opcode {opcode:?} requires an immediate of type {expected}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}
