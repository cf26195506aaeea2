use crate::width::AbsoluteWidth;

/// Runtime configuration shared by the encoder and the dispatch loop.
///
/// mirrors the shape of the teacher's `ProgramSettings`
/// (`crates/program/src/program_settings.rs`): a plain struct with a
/// `Default` impl, no config-file parsing involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// the width `Width::Fast` normalizes to (spec.md §4.3)
    pub fast_width: AbsoluteWidth,
    /// capacity of the expression stack, in cells (spec.md §3: 1024)
    pub expr_stack_capacity: usize,
    /// capacity of the return stack, in code pointers (spec.md §3: 1024)
    pub return_stack_capacity: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            fast_width: AbsoluteWidth::W64,
            expr_stack_capacity: 1024,
            return_stack_capacity: 1024,
        }
    }
}
