use pz_interp::CCallFn;
use pz_state::Cell;

/// Pops a host pointer and releases it via `libc::free` (spec.md §6).
/// Grounded on `builtin_free_func`.
///
/// # Safety
/// `stack_base[esp]` must hold a pointer previously returned by one of this
/// crate's allocating built-ins ([`crate::int_to_string`],
/// [`crate::concat_string`]), or a null pointer, which `libc::free` already
/// treats as a no-op.
pub unsafe extern "C" fn free(stack_base: *mut Cell, esp: usize) -> usize {
    let ptr = (*stack_base.add(esp)).as_ptr() as *mut libc::c_void;
    libc::free(ptr);
    esp - 1
}

const _: CCallFn = free;
