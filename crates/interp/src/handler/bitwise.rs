use pz_state::Cell;
use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

/// `AND_w`/`OR_w`/`XOR_w`: bitwise, unsigned (spec.md §4.4).
macro_rules! bitwise {
    ($name:ident, $read:ident, $write:ident, $op:tt) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let rhs = machine.expr.pop().$read();
            let lhs = machine.expr.top().$read();
            machine.expr.set_top(Cell::$write(lhs $op rhs));
            Ok(Step::Continue)
        }
    };
}

bitwise!(and8, as_u8, from_u8, &);
bitwise!(and16, as_u16, from_u16, &);
bitwise!(and32, as_u32, from_u32, &);
bitwise!(and64, as_u64, from_u64, &);

bitwise!(or8, as_u8, from_u8, |);
bitwise!(or16, as_u16, from_u16, |);
bitwise!(or32, as_u32, from_u32, |);
bitwise!(or64, as_u64, from_u64, |);

bitwise!(xor8, as_u8, from_u8, ^);
bitwise!(xor16, as_u16, from_u16, ^);
bitwise!(xor32, as_u32, from_u32, ^);
bitwise!(xor64, as_u64, from_u64, ^);

/// `LSHIFT_w`/`RSHIFT_w`: RHS always read as `u8`, LHS width-typed (spec.md
/// §4.4). `wrapping_sh{l,r}` already masks the shift count modulo the LHS
/// width, which is the masking spec.md §7 recommends for shift counts
/// greater than or equal to the width.
macro_rules! shift {
    ($name:ident, $read:ident, $write:ident, $op:ident) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let count = machine.expr.pop().as_u8();
            let lhs = machine.expr.top().$read();
            machine.expr.set_top(Cell::$write(lhs.$op(count as u32)));
            Ok(Step::Continue)
        }
    };
}

shift!(lshift8, as_u8, from_u8, wrapping_shl);
shift!(lshift16, as_u16, from_u16, wrapping_shl);
shift!(lshift32, as_u32, from_u32, wrapping_shl);
shift!(lshift64, as_u64, from_u64, wrapping_shl);

shift!(rshift8, as_u8, from_u8, wrapping_shr);
shift!(rshift16, as_u16, from_u16, wrapping_shr);
shift!(rshift32, as_u32, from_u32, wrapping_shr);
shift!(rshift64, as_u64, from_u64, wrapping_shr);

/// `NOT_w`: logical negation producing 0 or 1 at width `w` (spec.md §4.4).
macro_rules! not_op {
    ($name:ident, $read:ident, $write:ident) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let value = machine.expr.top().$read();
            machine.expr.set_top(Cell::$write(if value == 0 { 1 } else { 0 }));
            Ok(Step::Continue)
        }
    };
}

not_op!(not8, as_u8, from_u8);
not_op!(not16, as_u16, from_u16);
not_op!(not32, as_u32, from_u32);
not_op!(not64, as_u64, from_u64);

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::And8 as usize] = and8;
    handlers[Token::And16 as usize] = and16;
    handlers[Token::And32 as usize] = and32;
    handlers[Token::And64 as usize] = and64;

    handlers[Token::Or8 as usize] = or8;
    handlers[Token::Or16 as usize] = or16;
    handlers[Token::Or32 as usize] = or32;
    handlers[Token::Or64 as usize] = or64;

    handlers[Token::Xor8 as usize] = xor8;
    handlers[Token::Xor16 as usize] = xor16;
    handlers[Token::Xor32 as usize] = xor32;
    handlers[Token::Xor64 as usize] = xor64;

    handlers[Token::LShift8 as usize] = lshift8;
    handlers[Token::LShift16 as usize] = lshift16;
    handlers[Token::LShift32 as usize] = lshift32;
    handlers[Token::LShift64 as usize] = lshift64;

    handlers[Token::RShift8 as usize] = rshift8;
    handlers[Token::RShift16 as usize] = rshift16;
    handlers[Token::RShift32 as usize] = rshift32;
    handlers[Token::RShift64 as usize] = rshift64;

    handlers[Token::Not8 as usize] = not8;
    handlers[Token::Not16 as usize] = not16;
    handlers[Token::Not32 as usize] = not32;
    handlers[Token::Not64 as usize] = not64;
}
