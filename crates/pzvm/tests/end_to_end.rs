//! End-to-end scenarios from spec.md §8, exercised through the public
//! `pz_vm` surface exactly as an assembler (out of scope) would drive it:
//! build a procedure buffer instruction by instruction with `Encoder`, then
//! hand the entry pointer to `execute`.

use pz_vm::{
    execute, Encoder, Handler, ImmediateType, ImmediateValue, Opcode, VmConfig, Width,
};

fn emit(
    encoder: &Encoder,
    buf: &mut Vec<u8>,
    opcode: Opcode,
    width1: Width,
    width2: Width,
    imm_type: ImmediateType,
    imm_value: ImmediateValue,
) -> usize {
    let offset = buf.len();
    encoder
        .encode(Some(buf), offset, opcode, width1, width2, imm_type, imm_value)
        .unwrap()
}

fn no_immediate(encoder: &Encoder, buf: &mut Vec<u8>, opcode: Opcode) -> usize {
    emit(
        encoder,
        buf,
        opcode,
        Width::W8,
        Width::W8,
        ImmediateType::None,
        ImmediateValue::None,
    )
}

fn load_i32(encoder: &Encoder, buf: &mut Vec<u8>, value: i32) -> usize {
    emit(
        encoder,
        buf,
        Opcode::LoadImmediateNum,
        Width::W32,
        Width::W32,
        ImmediateType::I32,
        ImmediateValue::U32(value as u32),
    )
}

/// Back-patch a host-word immediate once the buffer's final address is
/// known (spec.md §3: "data reference, code reference, or label
/// reference" immediates). `immediate_end_offset` is the offset returned
/// by the `emit` call that wrote the placeholder.
fn patch_host_word(buf: &mut [u8], immediate_end_offset: usize, value: usize) {
    let size = pz_token::width::host_word_size_in_bytes();
    let start = immediate_end_offset - size;
    buf[start..immediate_end_offset].copy_from_slice(&value.to_ne_bytes()[..size]);
}

#[test]
fn scenario_1_exit_literal() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let mut buf = Vec::new();
    load_i32(&encoder, &mut buf, 42);
    no_immediate(&encoder, &mut buf, Opcode::End);

    let handler = Handler::new();
    let code = execute(&handler, buf.as_ptr(), &config).unwrap();
    assert_eq!(code, 42);
}

#[test]
fn scenario_2_arithmetic() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let mut buf = Vec::new();
    load_i32(&encoder, &mut buf, 7);
    load_i32(&encoder, &mut buf, 5);
    emit(
        &encoder,
        &mut buf,
        Opcode::Sub,
        Width::W32,
        Width::W32,
        ImmediateType::None,
        ImmediateValue::None,
    );
    no_immediate(&encoder, &mut buf, Opcode::End);

    let handler = Handler::new();
    let code = execute(&handler, buf.as_ptr(), &config).unwrap();
    assert_eq!(code, 2);
}

#[test]
fn scenario_3_conditional_branch_not_taken() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let mut buf = Vec::new();

    load_i32(&encoder, &mut buf, 0);
    let cjmp_imm_end = emit(
        &encoder,
        &mut buf,
        Opcode::CJmp,
        Width::W32,
        Width::W32,
        ImmediateType::HostWord,
        ImmediateValue::HostWord(0), // patched below, once L1's offset is known
    );
    load_i32(&encoder, &mut buf, 1);
    no_immediate(&encoder, &mut buf, Opcode::End);
    let l1_offset = buf.len();
    load_i32(&encoder, &mut buf, 99);
    no_immediate(&encoder, &mut buf, Opcode::End);

    let base = buf.as_ptr() as usize;
    patch_host_word(&mut buf, cjmp_imm_end, base + l1_offset);

    let handler = Handler::new();
    let code = execute(&handler, buf.as_ptr(), &config).unwrap();
    // the branch condition is 0, so it falls through and never reaches L1
    assert_eq!(code, 1);
}

#[test]
fn scenario_3_conditional_branch_taken() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let mut buf = Vec::new();

    load_i32(&encoder, &mut buf, 1);
    let cjmp_imm_end = emit(
        &encoder,
        &mut buf,
        Opcode::CJmp,
        Width::W32,
        Width::W32,
        ImmediateType::HostWord,
        ImmediateValue::HostWord(0),
    );
    load_i32(&encoder, &mut buf, 1);
    no_immediate(&encoder, &mut buf, Opcode::End);
    let l1_offset = buf.len();
    load_i32(&encoder, &mut buf, 99);
    no_immediate(&encoder, &mut buf, Opcode::End);

    let base = buf.as_ptr() as usize;
    patch_host_word(&mut buf, cjmp_imm_end, base + l1_offset);

    let handler = Handler::new();
    let code = execute(&handler, buf.as_ptr(), &config).unwrap();
    assert_eq!(code, 99);
}

#[test]
fn scenario_4_call_return() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);

    // procedure P: LOAD_IMMEDIATE_32(10); RET
    let mut proc_p = Vec::new();
    load_i32(&encoder, &mut proc_p, 10);
    no_immediate(&encoder, &mut proc_p, Opcode::Ret);
    let p_addr = proc_p.as_ptr() as usize;

    // main: CALL(P); LOAD_IMMEDIATE_32(5); ADD_32; END
    let mut main = Vec::new();
    emit(
        &encoder,
        &mut main,
        Opcode::Call,
        Width::W8,
        Width::W8,
        ImmediateType::HostWord,
        ImmediateValue::HostWord(p_addr),
    );
    load_i32(&encoder, &mut main, 5);
    emit(
        &encoder,
        &mut main,
        Opcode::Add,
        Width::W32,
        Width::W32,
        ImmediateType::None,
        ImmediateValue::None,
    );
    no_immediate(&encoder, &mut main, Opcode::End);

    let handler = Handler::new();
    let code = execute(&handler, main.as_ptr(), &config).unwrap();
    assert_eq!(code, 15);
}

/// spec.md §8 scenario 5: push 1, 2, 3; `ROLL 3` leaves the stack
/// bottom-to-top `2, 3, 1`. Each run below peels one more `DROP` off the
/// top to read the next cell down, since a single execution only ever
/// surfaces its final top-of-stack through `END`.
fn run_after_roll(
    encoder: &Encoder,
    handler: &Handler,
    config: &VmConfig,
    extra_drops: usize,
) -> i32 {
    let mut buf = Vec::new();
    load_i32(encoder, &mut buf, 1);
    load_i32(encoder, &mut buf, 2);
    load_i32(encoder, &mut buf, 3);
    emit(
        encoder,
        &mut buf,
        Opcode::Roll,
        Width::W8,
        Width::W8,
        ImmediateType::I8,
        ImmediateValue::U8(3),
    );
    for _ in 0..extra_drops {
        no_immediate(encoder, &mut buf, Opcode::Drop);
    }
    no_immediate(encoder, &mut buf, Opcode::End);
    execute(handler, buf.as_ptr(), config).unwrap()
}

#[test]
fn scenario_5_roll_3_reorders_stack() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let handler = Handler::new();

    assert_eq!(run_after_roll(&encoder, &handler, &config, 0), 1);
    assert_eq!(run_after_roll(&encoder, &handler, &config, 1), 3);
    assert_eq!(run_after_roll(&encoder, &handler, &config, 2), 2);
}

/// Redirect fd 1 to a pipe for the duration of `f`, then return everything
/// written to it as a `String`. Unix-only: the dispatch loop and the
/// foreign built-ins are themselves platform-agnostic, but this harness's
/// stdout-capture trick is not.
#[cfg(unix)]
fn capture_stdout<F: FnOnce()>(f: F) -> String {
    use std::io::{Read, Write};
    use std::os::unix::io::FromRawFd;

    std::io::stdout().flush().unwrap();

    let mut fds = [0i32; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    let (read_fd, write_fd) = (fds[0], fds[1]);

    let saved_stdout = unsafe { libc::dup(1) };
    assert!(saved_stdout >= 0);
    assert_eq!(unsafe { libc::dup2(write_fd, 1) }, 1);
    unsafe { libc::close(write_fd) };

    f();

    std::io::stdout().flush().unwrap();
    unsafe {
        libc::dup2(saved_stdout, 1);
        libc::close(saved_stdout);
    }

    let mut file = unsafe { std::fs::File::from_raw_fd(read_fd) };
    let mut output = String::new();
    file.read_to_string(&mut output).unwrap();
    output
}

#[cfg(unix)]
#[test]
fn scenario_6_foreign_call_round_trip() {
    let config = VmConfig::default();
    let encoder = Encoder::new(config);
    let mut buf = Vec::new();

    load_i32(&encoder, &mut buf, 42);
    emit(
        &encoder,
        &mut buf,
        Opcode::CCall,
        Width::W8,
        Width::W8,
        ImmediateType::HostWord,
        ImmediateValue::HostWord(pz_vm::foreign::int_to_string_address()),
    );
    emit(
        &encoder,
        &mut buf,
        Opcode::CCall,
        Width::W8,
        Width::W8,
        ImmediateType::HostWord,
        ImmediateValue::HostWord(pz_vm::foreign::print_address()),
    );
    load_i32(&encoder, &mut buf, 0);
    no_immediate(&encoder, &mut buf, Opcode::End);

    let handler = Handler::new();
    let mut exit_code = None;
    let output = capture_stdout(|| {
        exit_code = Some(execute(&handler, buf.as_ptr(), &config).unwrap());
    });

    assert_eq!(exit_code, Some(0));
    assert_eq!(output, "42");
}
