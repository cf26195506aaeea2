use pz_interp::CCallFn;
use pz_state::Cell;

/// Long enough for a 32-bit value, plus a sign, plus a NUL terminator
/// (`original_source/runtime/pz_run_generic.c`'s `INT_TO_STRING_BUFFER_SIZE`).
const INT_TO_STRING_BUFFER_SIZE: usize = 11;

/// Reads the top cell as `s32` and replaces it with a host pointer to a
/// freshly `libc::malloc`-allocated decimal ASCII representation, or a
/// null pointer if the formatted string would not fit the fixed-size
/// buffer (spec.md §6). The caller must eventually pass the result to
/// [`crate::free`]. Grounded on `builtin_int_to_string_func`.
///
/// # Safety
/// `stack_base[esp]` must currently hold an `s32` value.
pub unsafe extern "C" fn int_to_string(stack_base: *mut Cell, esp: usize) -> usize {
    let num = (*stack_base.add(esp)).as_i32();
    let formatted = format!("{num}");

    let cell = if formatted.len() + 1 > INT_TO_STRING_BUFFER_SIZE {
        Cell::from_ptr(0)
    } else {
        let buf = libc::malloc(INT_TO_STRING_BUFFER_SIZE) as *mut u8;
        std::ptr::copy_nonoverlapping(formatted.as_ptr(), buf, formatted.len());
        *buf.add(formatted.len()) = 0;
        Cell::from_ptr(buf as usize)
    };

    *stack_base.add(esp) = cell;
    esp
}

const _: CCallFn = int_to_string;

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use pretty_assertions::assert_eq;
    use pz_state::ExpressionStack;

    use super::*;
    use crate::free;

    #[test]
    fn test_int_to_string_round_trips_through_a_c_string() {
        let mut stack = ExpressionStack::new(4);
        stack.push(Cell::from_i32(42));
        let esp = stack.esp();

        let new_esp = unsafe { int_to_string(stack.as_mut_ptr(), esp) };
        assert_eq!(new_esp, esp);

        let ptr = stack.top().as_ptr() as *const std::os::raw::c_char;
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "42");

        unsafe { free(stack.as_mut_ptr(), stack.esp()) };
    }

    #[test]
    fn test_int_to_string_handles_negative_numbers() {
        let mut stack = ExpressionStack::new(4);
        stack.push(Cell::from_i32(-7));
        let esp = stack.esp();

        unsafe { int_to_string(stack.as_mut_ptr(), esp) };

        let ptr = stack.top().as_ptr() as *const std::os::raw::c_char;
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "-7");

        unsafe { free(stack.as_mut_ptr(), stack.esp()) };
    }
}
