use pz_state::Cell;
use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

fn nop(_machine: &mut Machine) -> Result<Step, FatalError> {
    Ok(Step::Continue)
}

fn load_immediate_8(machine: &mut Machine) -> Result<Step, FatalError> {
    let value = machine.read_immediate_u8();
    machine.expr.push(Cell::from_u8(value));
    Ok(Step::Continue)
}

fn load_immediate_16(machine: &mut Machine) -> Result<Step, FatalError> {
    let value = machine.read_immediate_u16();
    machine.expr.push(Cell::from_u16(value));
    Ok(Step::Continue)
}

fn load_immediate_32(machine: &mut Machine) -> Result<Step, FatalError> {
    let value = machine.read_immediate_u32();
    machine.expr.push(Cell::from_u32(value));
    Ok(Step::Continue)
}

fn load_immediate_64(machine: &mut Machine) -> Result<Step, FatalError> {
    let value = machine.read_immediate_u64();
    machine.expr.push(Cell::from_u64(value));
    Ok(Step::Continue)
}

fn load_immediate_data(machine: &mut Machine) -> Result<Step, FatalError> {
    let value = machine.read_immediate_host_word();
    machine.expr.push(Cell::from_ptr(value));
    Ok(Step::Continue)
}

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::Nop as usize] = nop;
    handlers[Token::LoadImmediate8 as usize] = load_immediate_8;
    handlers[Token::LoadImmediate16 as usize] = load_immediate_16;
    handlers[Token::LoadImmediate32 as usize] = load_immediate_32;
    handlers[Token::LoadImmediate64 as usize] = load_immediate_64;
    handlers[Token::LoadImmediateData as usize] = load_immediate_data;
}
