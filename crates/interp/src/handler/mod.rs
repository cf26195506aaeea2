use pz_token::{Token, MAX_TOKEN_NUMBER};

use crate::error::FatalError;
use crate::machine::Machine;

mod arithmetic;
mod bitwise;
mod comparison;
mod control_flow;
mod conversion;
mod foreign;
mod fundamental;
mod shuffle;

/// What a handler tells the dispatch loop to do next (spec.md §4.4).
pub enum Step {
    /// keep reading tokens at the (possibly updated) `ip`.
    Continue,
    /// `END` was reached; the `i32` is the recorded exit code.
    Halt(i32),
}

pub type HandleFn = fn(&mut Machine) -> Result<Step, FatalError>;

fn unreachable_handler(_machine: &mut Machine) -> Result<Step, FatalError> {
    unreachable!(
        "no handler registered for this token -- Token::from_u8 only ever \
         yields tokens Handler::new registers a handler for"
    );
}

/// The token -> handler function table the dispatch loop indexes into.
/// Grounded on the teacher's `Handler`/`HandleFunc` (`crates/processor/src/
/// handler.rs`): a flat array sized to the token alphabet, filled with an
/// `unreachable!()` sentinel and then overwritten entry by entry.
pub struct Handler {
    handlers: [HandleFn; MAX_TOKEN_NUMBER],
}

impl Handler {
    pub fn new() -> Self {
        let mut handlers: [HandleFn; MAX_TOKEN_NUMBER] = [unreachable_handler; MAX_TOKEN_NUMBER];

        fundamental::register(&mut handlers);
        conversion::register(&mut handlers);
        arithmetic::register(&mut handlers);
        bitwise::register(&mut handlers);
        comparison::register(&mut handlers);
        shuffle::register(&mut handlers);
        control_flow::register(&mut handlers);
        foreign::register(&mut handlers);

        Self { handlers }
    }

    #[inline]
    pub fn dispatch(&self, token: Token, machine: &mut Machine) -> Result<Step, FatalError> {
        (self.handlers[token as usize])(machine)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
