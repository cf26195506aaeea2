//! Host-word addresses of the built-in foreign procedures (spec.md §6), for
//! an out-of-scope assembler to bake into `CCALL` immediates as
//! `ImmediateValue::HostWord`.

use pz_interp::CCallFn;

/// `print`: pops a host pointer to a NUL-terminated byte string and writes
/// it to standard output.
pub fn print_address() -> usize {
    pz_foreign::print as CCallFn as usize
}

/// `int_to_string`: replaces the top `s32` with a host pointer to a
/// freshly allocated decimal ASCII representation (null on overflow).
pub fn int_to_string_address() -> usize {
    pz_foreign::int_to_string as CCallFn as usize
}

/// `free`: pops a host pointer and releases it.
pub fn free_address() -> usize {
    pz_foreign::free as CCallFn as usize
}

/// `concat_string`: pops two host pointers, `s2` (top) then `s1`, and
/// pushes a pointer to a freshly allocated concatenation `s1 ++ s2`.
pub fn concat_string_address() -> usize {
    pz_foreign::concat_string as CCallFn as usize
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_ne;

    use super::*;

    #[test]
    fn test_addresses_are_distinct_and_nonzero() {
        let addresses = [
            print_address(),
            int_to_string_address(),
            free_address(),
            concat_string_address(),
        ];
        for addr in addresses {
            assert_ne!(addr, 0);
        }
        for i in 0..addresses.len() {
            for j in (i + 1)..addresses.len() {
                assert_ne!(addresses[i], addresses[j]);
            }
        }
    }
}
