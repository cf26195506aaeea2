use pz_state::Cell;
use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

/// `LT_U/LT_S/GT_U/GT_S/EQ_w`: width-parametric comparison yielding a
/// same-width 0-or-1 integer (spec.md §4.4).
macro_rules! compare {
    ($name:ident, $read:ident, $write:ident, $op:tt) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let rhs = machine.expr.pop().$read();
            let lhs = machine.expr.top().$read();
            machine.expr.set_top(Cell::$write(if lhs $op rhs { 1 } else { 0 }));
            Ok(Step::Continue)
        }
    };
}

compare!(lt_u8, as_u8, from_u8, <);
compare!(lt_u16, as_u16, from_u16, <);
compare!(lt_u32, as_u32, from_u32, <);
compare!(lt_u64, as_u64, from_u64, <);

compare!(lt_s8, as_i8, from_i8, <);
compare!(lt_s16, as_i16, from_i16, <);
compare!(lt_s32, as_i32, from_i32, <);
compare!(lt_s64, as_i64, from_i64, <);

compare!(gt_u8, as_u8, from_u8, >);
compare!(gt_u16, as_u16, from_u16, >);
compare!(gt_u32, as_u32, from_u32, >);
compare!(gt_u64, as_u64, from_u64, >);

compare!(gt_s8, as_i8, from_i8, >);
compare!(gt_s16, as_i16, from_i16, >);
compare!(gt_s32, as_i32, from_i32, >);
compare!(gt_s64, as_i64, from_i64, >);

compare!(eq8, as_u8, from_u8, ==);
compare!(eq16, as_u16, from_u16, ==);
compare!(eq32, as_u32, from_u32, ==);
compare!(eq64, as_u64, from_u64, ==);

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::LtU8 as usize] = lt_u8;
    handlers[Token::LtU16 as usize] = lt_u16;
    handlers[Token::LtU32 as usize] = lt_u32;
    handlers[Token::LtU64 as usize] = lt_u64;

    handlers[Token::LtS8 as usize] = lt_s8;
    handlers[Token::LtS16 as usize] = lt_s16;
    handlers[Token::LtS32 as usize] = lt_s32;
    handlers[Token::LtS64 as usize] = lt_s64;

    handlers[Token::GtU8 as usize] = gt_u8;
    handlers[Token::GtU16 as usize] = gt_u16;
    handlers[Token::GtU32 as usize] = gt_u32;
    handlers[Token::GtU64 as usize] = gt_u64;

    handlers[Token::GtS8 as usize] = gt_s8;
    handlers[Token::GtS16 as usize] = gt_s16;
    handlers[Token::GtS32 as usize] = gt_s32;
    handlers[Token::GtS64 as usize] = gt_s64;

    handlers[Token::Eq8 as usize] = eq8;
    handlers[Token::Eq16 as usize] = eq16;
    handlers[Token::Eq32 as usize] = eq32;
    handlers[Token::Eq64 as usize] = eq64;
}
