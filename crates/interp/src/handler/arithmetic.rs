use pz_state::Cell;
use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

/// `ADD_w`/`SUB_w`/`MUL_w`/`DIV_w`/`MOD_w`: signed binary arithmetic
/// (spec.md §4.4: "`+ - * / %` use the signed interpretation").
///
/// `stack[esp-1] = stack[esp-1] OP stack[esp]; esp -= 1`. Arithmetic uses
/// the wrapping variants so overflow matches two's-complement hardware
/// behavior instead of Rust's debug-mode overflow panic; division and
/// remainder use the wrapping variants for the same reason (they only
/// differ from the plain operators on the `MIN / -1` corner case) -- actual
/// division by zero still panics, which is the intended "host machine's
/// signed-division behavior" spec.md §7 describes as implementation-defined.
macro_rules! arith {
    ($name:ident, $read:ident, $write:ident, $op:ident) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let rhs = machine.expr.pop().$read();
            let lhs = machine.expr.top().$read();
            machine.expr.set_top(Cell::$write(lhs.$op(rhs)));
            Ok(Step::Continue)
        }
    };
}

arith!(add8, as_i8, from_i8, wrapping_add);
arith!(add16, as_i16, from_i16, wrapping_add);
arith!(add32, as_i32, from_i32, wrapping_add);
arith!(add64, as_i64, from_i64, wrapping_add);

arith!(sub8, as_i8, from_i8, wrapping_sub);
arith!(sub16, as_i16, from_i16, wrapping_sub);
arith!(sub32, as_i32, from_i32, wrapping_sub);
arith!(sub64, as_i64, from_i64, wrapping_sub);

arith!(mul8, as_i8, from_i8, wrapping_mul);
arith!(mul16, as_i16, from_i16, wrapping_mul);
arith!(mul32, as_i32, from_i32, wrapping_mul);
arith!(mul64, as_i64, from_i64, wrapping_mul);

arith!(div8, as_i8, from_i8, wrapping_div);
arith!(div16, as_i16, from_i16, wrapping_div);
arith!(div32, as_i32, from_i32, wrapping_div);
arith!(div64, as_i64, from_i64, wrapping_div);

arith!(mod8, as_i8, from_i8, wrapping_rem);
arith!(mod16, as_i16, from_i16, wrapping_rem);
arith!(mod32, as_i32, from_i32, wrapping_rem);
arith!(mod64, as_i64, from_i64, wrapping_rem);

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::Add8 as usize] = add8;
    handlers[Token::Add16 as usize] = add16;
    handlers[Token::Add32 as usize] = add32;
    handlers[Token::Add64 as usize] = add64;

    handlers[Token::Sub8 as usize] = sub8;
    handlers[Token::Sub16 as usize] = sub16;
    handlers[Token::Sub32 as usize] = sub32;
    handlers[Token::Sub64 as usize] = sub64;

    handlers[Token::Mul8 as usize] = mul8;
    handlers[Token::Mul16 as usize] = mul16;
    handlers[Token::Mul32 as usize] = mul32;
    handlers[Token::Mul64 as usize] = mul64;

    handlers[Token::Div8 as usize] = div8;
    handlers[Token::Div16 as usize] = div16;
    handlers[Token::Div32 as usize] = div32;
    handlers[Token::Div64 as usize] = div64;

    handlers[Token::Mod8 as usize] = mod8;
    handlers[Token::Mod16 as usize] = mod16;
    handlers[Token::Mod32 as usize] = mod32;
    handlers[Token::Mod64 as usize] = mod64;
}
