//! Built-in foreign procedures exposed to the assembler (spec.md §6).
//!
//! Each function here has exactly the `pz_interp::CCallFn` signature a
//! `CCALL` immediate is cast to and invoked through: `(stack_base, esp) ->
//! new_esp`, manipulating `stack_base[1..=esp]` directly to pop arguments
//! and push results (spec.md §4.2, §4.4). Grounded on
//! `builtin_print_func`/`builtin_int_to_string_func`/`builtin_free_func`/
//! `builtin_concat_string_func` in
//! `original_source/runtime/pz_run_generic.c`; the calling convention and
//! the exact edge-case behavior (the null-on-overflow sentinel,
//! `concat_string`'s argument order) are carried over verbatim
//! (SPEC_FULL.md §3).
//!
//! None of these functions are bounds-checked against `esp`: like the rest
//! of the dispatch loop, the bytecode producer is trusted to only wire a
//! `CCALL` to one of these with the right number of arguments already on
//! the stack (spec.md §7 class 3).

mod concat_string;
mod free;
mod int_to_string;
mod print;

pub use concat_string::concat_string;
pub use free::free;
pub use int_to_string::int_to_string;
pub use print::print;
