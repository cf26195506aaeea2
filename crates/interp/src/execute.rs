use pz_encode::Encoder;
use pz_state::ExpressionStack;
use pz_state::ReturnStack;
use pz_token::{ImmediateType, ImmediateValue, Opcode, Token, VmConfig, Width};

use crate::error::FatalError;
use crate::handler::{Handler, Step};
use crate::machine::Machine;

/// Run a procedure to completion (spec.md §4.4's "Startup" through
/// "Termination").
///
/// `entry` is the already-resolved code pointer of the entry procedure (the
/// bytecode loader and symbol table that would resolve it are out of scope,
/// spec.md §1). Allocates the expression and return stacks and the
/// synthesized `END`-only wrapper procedure; all three are freed when this
/// function returns, on every exit path (spec.md §3's "Lifecycle", §5's
/// "Resource ownership").
pub fn execute(handler: &Handler, entry: *const u8, config: &VmConfig) -> Result<i32, FatalError> {
    if entry.is_null() {
        log::error!("pz-interp: missing entry procedure");
        return Err(FatalError::MissingEntryProcedure);
    }

    // "encode a 1-token END-only wrapper procedure; set return_stack[0] to
    // its address" (spec.md §4.4). Kept alive for the whole run: the return
    // stack holds a raw pointer into it.
    let encoder = Encoder::new(*config);
    let mut wrapper = Vec::new();
    encoder
        .encode(
            Some(&mut wrapper),
            0,
            Opcode::End,
            Width::W8,
            Width::W8,
            ImmediateType::None,
            ImmediateValue::None,
        )
        .expect("END encodes unconditionally, it takes no immediate");

    let mut machine = Machine {
        ip: entry,
        expr: ExpressionStack::new(config.expr_stack_capacity),
        ret: ReturnStack::new(config.return_stack_capacity, wrapper.as_ptr()),
    };

    // "return code (default 255)" (spec.md §4.4's "Registers (locals)").
    let mut return_code: i32 = 255;

    loop {
        let token_byte = machine.read_token_byte();
        let token = Token::from_u8(token_byte)
            .unwrap_or_else(|| panic!("invalid token byte 0x{token_byte:02x} at {:p}", machine.ip));

        match handler.dispatch(token, &mut machine)? {
            Step::Continue => {}
            Step::Halt(code) => {
                return_code = code;
                break;
            }
        }
    }

    Ok(return_code)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exit_literal() {
        // spec.md §8 scenario 1: LOAD_IMMEDIATE_32(42); END -> exit code 42
        let config = VmConfig::default();
        let encoder = Encoder::new(config);
        let mut buf = Vec::new();
        let off = encoder
            .encode(
                Some(&mut buf),
                0,
                Opcode::LoadImmediateNum,
                Width::W32,
                Width::W32,
                ImmediateType::I32,
                ImmediateValue::U32(42),
            )
            .unwrap();
        encoder
            .encode(
                Some(&mut buf),
                off,
                Opcode::End,
                Width::W8,
                Width::W8,
                ImmediateType::None,
                ImmediateValue::None,
            )
            .unwrap();

        let handler = Handler::new();
        let code = execute(&handler, buf.as_ptr(), &config).unwrap();
        assert_eq!(code, 42);
    }

    #[test]
    fn test_missing_entry_procedure_is_fatal() {
        let handler = Handler::new();
        let config = VmConfig::default();
        let err = execute(&handler, std::ptr::null(), &config).unwrap_err();
        assert_eq!(err, FatalError::MissingEntryProcedure);
    }
}
