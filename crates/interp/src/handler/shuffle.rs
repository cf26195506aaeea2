use pz_token::{Token, MAX_TOKEN_NUMBER};

use super::{HandleFn, Step};
use crate::error::FatalError;
use crate::machine::Machine;

fn dup(machine: &mut Machine) -> Result<Step, FatalError> {
    machine.expr.dup();
    Ok(Step::Continue)
}

fn drop_top(machine: &mut Machine) -> Result<Step, FatalError> {
    machine.expr.drop_top();
    Ok(Step::Continue)
}

fn swap(machine: &mut Machine) -> Result<Step, FatalError> {
    machine.expr.swap();
    Ok(Step::Continue)
}

fn roll(machine: &mut Machine) -> Result<Step, FatalError> {
    let depth = machine.read_immediate_u8();
    machine.expr.roll(depth).map_err(|err| {
        log::error!("pz-interp: {err}");
        FatalError::from(err)
    })?;
    Ok(Step::Continue)
}

fn pick(machine: &mut Machine) -> Result<Step, FatalError> {
    let depth = machine.read_immediate_u8();
    machine.expr.pick(depth);
    Ok(Step::Continue)
}

pub(super) fn register(handlers: &mut [HandleFn; MAX_TOKEN_NUMBER]) {
    handlers[Token::Dup as usize] = dup;
    handlers[Token::Drop as usize] = drop_top;
    handlers[Token::Swap as usize] = swap;
    handlers[Token::Roll as usize] = roll;
    handlers[Token::Pick as usize] = pick;
}
