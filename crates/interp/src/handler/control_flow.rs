use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

/// `CALL`: read the aligned code-address immediate, push the address
/// immediately past it onto the return stack, jump (spec.md §4.4). `ip` has
/// already been advanced past the immediate by the read, so it already
/// holds "the address immediately following the callee-reference immediate"
/// (spec.md §3's invariant on `CALL`'s pushed return address).
fn call(machine: &mut Machine) -> Result<Step, FatalError> {
    let target = machine.read_immediate_host_word();
    machine.ret.push(machine.ip);
    machine.ip = target as *const u8;
    Ok(Step::Continue)
}

macro_rules! cjmp {
    ($name:ident, $read:ident) => {
        fn $name(machine: &mut Machine) -> Result<Step, FatalError> {
            let target = machine.read_immediate_host_word();
            let condition = machine.expr.pop().$read();
            if condition != 0 {
                machine.ip = target as *const u8;
            }
            Ok(Step::Continue)
        }
    };
}

cjmp!(cjmp8, as_u8);
cjmp!(cjmp16, as_u16);
cjmp!(cjmp32, as_u32);
cjmp!(cjmp64, as_u64);

fn ret(machine: &mut Machine) -> Result<Step, FatalError> {
    machine.ip = machine.ret.pop();
    Ok(Step::Continue)
}

fn end(machine: &mut Machine) -> Result<Step, FatalError> {
    Ok(Step::Halt(machine.expr.top().as_i32()))
}

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::Call as usize] = call;
    handlers[Token::CJmp8 as usize] = cjmp8;
    handlers[Token::CJmp16 as usize] = cjmp16;
    handlers[Token::CJmp32 as usize] = cjmp32;
    handlers[Token::CJmp64 as usize] = cjmp64;
    handlers[Token::Ret as usize] = ret;
    handlers[Token::End as usize] = end;
}
