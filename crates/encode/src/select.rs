use pz_token::{AbsoluteWidth, ImmediateType, ImmediateValue, Opcode, Token};

use crate::error::EncodeError;

/// The result of selecting a token for an instruction: the token itself,
/// and — if the token takes an immediate — the concrete value to write.
/// `None` means the instruction is emitted as a bare opcode byte, whether
/// because it genuinely takes no operand or because a peephole dropped one
/// (`ROLL 2` -> `SWAP`, `PICK 1` -> `DUP`; spec.md §4.3).
pub struct Selected {
    pub token: Token,
    pub immediate: Option<ImmediateValue>,
}

fn require_host_word(
    opcode: Opcode,
    imm_type: ImmediateType,
    imm_value: ImmediateValue,
) -> Result<ImmediateValue, EncodeError> {
    match imm_type {
        ImmediateType::HostWord => Ok(imm_value),
        _ => Err(EncodeError::InvalidImmediateType {
            opcode,
            expected: "host-word (data/code/label reference)",
        }),
    }
}

/// spec.md §4.3's "opcode -> token selection" table, verbatim: the fixed
/// relation from `(opcode, width1, width2)` to a token, including the
/// identity-conversion-to-`NOP` rule and the `ROLL 2`/`PICK 1` peepholes.
/// Grounded on `pz_write_instr`'s `PZ_WRITE_INSTR_0/1/2` macros in
/// `original_source/runtime/pz_code.c` (see SPEC_FULL.md §3).
pub fn select_token(
    opcode: Opcode,
    width1: AbsoluteWidth,
    width2: AbsoluteWidth,
    imm_type: ImmediateType,
    imm_value: ImmediateValue,
) -> Result<Selected, EncodeError> {
    use AbsoluteWidth::*;

    let unsupported = || EncodeError::UnsupportedWidths {
        opcode,
        width1,
        width2,
    };

    match opcode {
        Opcode::Nop => Ok(Selected {
            token: Token::Nop,
            immediate: None,
        }),

        Opcode::LoadImmediateNum => {
            let token = match width1 {
                W8 => Token::LoadImmediate8,
                W16 => Token::LoadImmediate16,
                W32 => Token::LoadImmediate32,
                W64 => Token::LoadImmediate64,
            };
            if matches!(imm_type, ImmediateType::None) {
                return Err(EncodeError::InvalidImmediateType {
                    opcode,
                    expected: "a numeric literal matching width1",
                });
            }
            // "coerces the immediate type to match" (spec.md §4.3): whichever
            // field the caller populated is reinterpreted at width1's size.
            let coerced = match width1 {
                W8 => ImmediateValue::U8(imm_value.coerce_u8()),
                W16 => ImmediateValue::U16(imm_value.coerce_u16()),
                W32 => ImmediateValue::U32(imm_value.coerce_u32()),
                W64 => ImmediateValue::U64(imm_value.coerce_u64()),
            };
            Ok(Selected {
                token,
                immediate: Some(coerced),
            })
        }

        Opcode::LoadImmediateData => {
            let value = require_host_word(opcode, imm_type, imm_value)?;
            Ok(Selected {
                token: Token::LoadImmediateData,
                immediate: Some(value),
            })
        }

        Opcode::Ze => {
            if width1 == width2 {
                return Ok(Selected {
                    token: Token::Nop,
                    immediate: None,
                });
            }
            let token = match (width1, width2) {
                (W8, W16) => Token::Ze8_16,
                (W8, W32) => Token::Ze8_32,
                (W8, W64) => Token::Ze8_64,
                (W16, W32) => Token::Ze16_32,
                (W16, W64) => Token::Ze16_64,
                (W32, W64) => Token::Ze32_64,
                _ => return Err(unsupported()),
            };
            Ok(Selected {
                token,
                immediate: None,
            })
        }

        Opcode::Se => {
            if width1 == width2 {
                return Ok(Selected {
                    token: Token::Nop,
                    immediate: None,
                });
            }
            let token = match (width1, width2) {
                (W8, W16) => Token::Se8_16,
                (W8, W32) => Token::Se8_32,
                (W8, W64) => Token::Se8_64,
                (W16, W32) => Token::Se16_32,
                (W16, W64) => Token::Se16_64,
                (W32, W64) => Token::Se32_64,
                _ => return Err(unsupported()),
            };
            Ok(Selected {
                token,
                immediate: None,
            })
        }

        Opcode::Trunc => {
            if width1 == width2 {
                return Ok(Selected {
                    token: Token::Nop,
                    immediate: None,
                });
            }
            let token = match (width1, width2) {
                (W16, W8) => Token::Trunc16_8,
                (W32, W8) => Token::Trunc32_8,
                (W32, W16) => Token::Trunc32_16,
                (W64, W8) => Token::Trunc64_8,
                (W64, W16) => Token::Trunc64_16,
                (W64, W32) => Token::Trunc64_32,
                _ => return Err(unsupported()),
            };
            Ok(Selected {
                token,
                immediate: None,
            })
        }

        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod
        | Opcode::And | Opcode::Or | Opcode::Xor | Opcode::LShift | Opcode::RShift
        | Opcode::LtU | Opcode::LtS | Opcode::GtU | Opcode::GtS | Opcode::Eq
        | Opcode::Not => {
            let token = binary_or_unary_token(opcode, width1)?;
            Ok(Selected {
                token,
                immediate: None,
            })
        }

        Opcode::Dup => Ok(Selected {
            token: Token::Dup,
            immediate: None,
        }),
        Opcode::Drop => Ok(Selected {
            token: Token::Drop,
            immediate: None,
        }),
        Opcode::Swap => Ok(Selected {
            token: Token::Swap,
            immediate: None,
        }),

        Opcode::Roll => {
            if !matches!(imm_type, ImmediateType::I8) {
                return Err(EncodeError::InvalidImmediateType {
                    opcode,
                    expected: "an 8-bit depth",
                });
            }
            let depth = imm_value.coerce_u8();
            if depth == 2 {
                // peephole: ROLL 2 === SWAP, immediate dropped (spec.md §4.3)
                Ok(Selected {
                    token: Token::Swap,
                    immediate: None,
                })
            } else {
                Ok(Selected {
                    token: Token::Roll,
                    immediate: Some(ImmediateValue::U8(depth)),
                })
            }
        }

        Opcode::Pick => {
            if !matches!(imm_type, ImmediateType::I8) {
                return Err(EncodeError::InvalidImmediateType {
                    opcode,
                    expected: "an 8-bit depth",
                });
            }
            let depth = imm_value.coerce_u8();
            if depth == 1 {
                // peephole: PICK 1 === DUP, immediate dropped (spec.md §4.3)
                Ok(Selected {
                    token: Token::Dup,
                    immediate: None,
                })
            } else {
                Ok(Selected {
                    token: Token::Pick,
                    immediate: Some(ImmediateValue::U8(depth)),
                })
            }
        }

        Opcode::Call => {
            let value = require_host_word(opcode, imm_type, imm_value)?;
            Ok(Selected {
                token: Token::Call,
                immediate: Some(value),
            })
        }

        Opcode::CJmp => {
            let token = match width1 {
                W8 => Token::CJmp8,
                W16 => Token::CJmp16,
                W32 => Token::CJmp32,
                W64 => Token::CJmp64,
            };
            let value = require_host_word(opcode, imm_type, imm_value)?;
            Ok(Selected {
                token,
                immediate: Some(value),
            })
        }

        Opcode::Ret => Ok(Selected {
            token: Token::Ret,
            immediate: None,
        }),
        Opcode::End => Ok(Selected {
            token: Token::End,
            immediate: None,
        }),

        Opcode::CCall => {
            let value = require_host_word(opcode, imm_type, imm_value)?;
            Ok(Selected {
                token: Token::CCall,
                immediate: Some(value),
            })
        }
    }
}

fn binary_or_unary_token(opcode: Opcode, width: AbsoluteWidth) -> Result<Token, EncodeError> {
    use AbsoluteWidth::*;
    let token = match (opcode, width) {
        (Opcode::Add, W8) => Token::Add8,
        (Opcode::Add, W16) => Token::Add16,
        (Opcode::Add, W32) => Token::Add32,
        (Opcode::Add, W64) => Token::Add64,
        (Opcode::Sub, W8) => Token::Sub8,
        (Opcode::Sub, W16) => Token::Sub16,
        (Opcode::Sub, W32) => Token::Sub32,
        (Opcode::Sub, W64) => Token::Sub64,
        (Opcode::Mul, W8) => Token::Mul8,
        (Opcode::Mul, W16) => Token::Mul16,
        (Opcode::Mul, W32) => Token::Mul32,
        (Opcode::Mul, W64) => Token::Mul64,
        (Opcode::Div, W8) => Token::Div8,
        (Opcode::Div, W16) => Token::Div16,
        (Opcode::Div, W32) => Token::Div32,
        (Opcode::Div, W64) => Token::Div64,
        (Opcode::Mod, W8) => Token::Mod8,
        (Opcode::Mod, W16) => Token::Mod16,
        (Opcode::Mod, W32) => Token::Mod32,
        (Opcode::Mod, W64) => Token::Mod64,
        (Opcode::And, W8) => Token::And8,
        (Opcode::And, W16) => Token::And16,
        (Opcode::And, W32) => Token::And32,
        (Opcode::And, W64) => Token::And64,
        (Opcode::Or, W8) => Token::Or8,
        (Opcode::Or, W16) => Token::Or16,
        (Opcode::Or, W32) => Token::Or32,
        (Opcode::Or, W64) => Token::Or64,
        (Opcode::Xor, W8) => Token::Xor8,
        (Opcode::Xor, W16) => Token::Xor16,
        (Opcode::Xor, W32) => Token::Xor32,
        (Opcode::Xor, W64) => Token::Xor64,
        (Opcode::LShift, W8) => Token::LShift8,
        (Opcode::LShift, W16) => Token::LShift16,
        (Opcode::LShift, W32) => Token::LShift32,
        (Opcode::LShift, W64) => Token::LShift64,
        (Opcode::RShift, W8) => Token::RShift8,
        (Opcode::RShift, W16) => Token::RShift16,
        (Opcode::RShift, W32) => Token::RShift32,
        (Opcode::RShift, W64) => Token::RShift64,
        (Opcode::LtU, W8) => Token::LtU8,
        (Opcode::LtU, W16) => Token::LtU16,
        (Opcode::LtU, W32) => Token::LtU32,
        (Opcode::LtU, W64) => Token::LtU64,
        (Opcode::LtS, W8) => Token::LtS8,
        (Opcode::LtS, W16) => Token::LtS16,
        (Opcode::LtS, W32) => Token::LtS32,
        (Opcode::LtS, W64) => Token::LtS64,
        (Opcode::GtU, W8) => Token::GtU8,
        (Opcode::GtU, W16) => Token::GtU16,
        (Opcode::GtU, W32) => Token::GtU32,
        (Opcode::GtU, W64) => Token::GtU64,
        (Opcode::GtS, W8) => Token::GtS8,
        (Opcode::GtS, W16) => Token::GtS16,
        (Opcode::GtS, W32) => Token::GtS32,
        (Opcode::GtS, W64) => Token::GtS64,
        (Opcode::Eq, W8) => Token::Eq8,
        (Opcode::Eq, W16) => Token::Eq16,
        (Opcode::Eq, W32) => Token::Eq32,
        (Opcode::Eq, W64) => Token::Eq64,
        (Opcode::Not, W8) => Token::Not8,
        (Opcode::Not, W16) => Token::Not16,
        (Opcode::Not, W32) => Token::Not32,
        (Opcode::Not, W64) => Token::Not64,
        _ => unreachable!("binary_or_unary_token called with a non-arithmetic opcode"),
    };
    Ok(token)
}
