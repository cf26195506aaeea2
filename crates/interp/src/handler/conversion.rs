use pz_state::Cell;
use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

/// Zero-extend and sign-extend read the top cell at the narrower width and
/// rewrite it at the wider width explicitly -- they do not rely on this
/// crate's `Cell` already zero-extending narrow writes internally (spec.md
/// §4.1: "writes of narrower widths must not be assumed to zero upper
/// bits"). `TRUNC` reads unsigned and narrows, which masks off the high
/// bits (spec.md §4.4).
macro_rules! reinterpret {
    ($name:ident, $from:ident, $to:ident) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let value = machine.expr.top().$from();
            machine.expr.set_top(Cell::$to(value as _));
            Ok(Step::Continue)
        }
    };
}

reinterpret!(ze8_16, as_u8, from_u16);
reinterpret!(ze8_32, as_u8, from_u32);
reinterpret!(ze8_64, as_u8, from_u64);
reinterpret!(ze16_32, as_u16, from_u32);
reinterpret!(ze16_64, as_u16, from_u64);
reinterpret!(ze32_64, as_u32, from_u64);

reinterpret!(se8_16, as_i8, from_i16);
reinterpret!(se8_32, as_i8, from_i32);
reinterpret!(se8_64, as_i8, from_i64);
reinterpret!(se16_32, as_i16, from_i32);
reinterpret!(se16_64, as_i16, from_i64);
reinterpret!(se32_64, as_i32, from_i64);

reinterpret!(trunc16_8, as_u16, from_u8);
reinterpret!(trunc32_8, as_u32, from_u8);
reinterpret!(trunc32_16, as_u32, from_u16);
reinterpret!(trunc64_8, as_u64, from_u8);
reinterpret!(trunc64_16, as_u64, from_u16);
reinterpret!(trunc64_32, as_u64, from_u32);

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::Ze8_16 as usize] = ze8_16;
    handlers[Token::Ze8_32 as usize] = ze8_32;
    handlers[Token::Ze8_64 as usize] = ze8_64;
    handlers[Token::Ze16_32 as usize] = ze16_32;
    handlers[Token::Ze16_64 as usize] = ze16_64;
    handlers[Token::Ze32_64 as usize] = ze32_64;

    handlers[Token::Se8_16 as usize] = se8_16;
    handlers[Token::Se8_32 as usize] = se8_32;
    handlers[Token::Se8_64 as usize] = se8_64;
    handlers[Token::Se16_32 as usize] = se16_32;
    handlers[Token::Se16_64 as usize] = se16_64;
    handlers[Token::Se32_64 as usize] = se32_64;

    handlers[Token::Trunc16_8 as usize] = trunc16_8;
    handlers[Token::Trunc32_8 as usize] = trunc32_8;
    handlers[Token::Trunc32_16 as usize] = trunc32_16;
    handlers[Token::Trunc64_8 as usize] = trunc64_8;
    handlers[Token::Trunc64_16 as usize] = trunc64_16;
    handlers[Token::Trunc64_32 as usize] = trunc64_32;
}
