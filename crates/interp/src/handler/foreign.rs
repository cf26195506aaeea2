use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::{CCallFn, Machine};

/// `CCALL`: read the aligned host-pointer immediate, cast it to a foreign
/// function pointer, invoke it with the expression stack's base and `esp`,
/// adopt its returned `esp` (spec.md §4.2, §4.4). The transmute from a
/// bytecode-embedded integer to a function pointer is the "clearly unsafe
/// boundary around the read" SPEC_FULL.md/spec.md §9 call for; the encoder
/// only ever places real `CCallFn`-typed pointers there (out of scope: the
/// assembler's foreign-procedure registration).
fn ccall(machine: &mut Machine) -> Result<Step, FatalError> {
    let raw = machine.read_immediate_host_word();
    let base = machine.expr.as_mut_ptr();
    let esp = machine.expr.esp();
    let new_esp = unsafe {
        let func: CCallFn = std::mem::transmute::<usize, CCallFn>(raw);
        func(base, esp)
    };
    machine.expr.set_esp(new_esp);
    Ok(Step::Continue)
}

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::CCall as usize] = ccall;
}
