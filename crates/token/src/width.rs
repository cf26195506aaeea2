// Operand widths as seen by the encoder, before and after normalization.
//
// `Width` is the surface the encoder's caller (the out-of-scope assembler)
// speaks: it may ask for a concrete bit-width, or for one of the two
// "relative" widths (`Fast`, `Pointer`) that only make sense once resolved
// against a `VmConfig`. `AbsoluteWidth` is what every token-selection rule
// and every dispatch-loop handler actually switches on.

use crate::config::VmConfig;

/// An operand width as requested by the encoder's caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// the configured native integer width (32 or 64)
    Fast,
    /// the host pointer width
    Pointer,
    W8,
    W16,
    W32,
    W64,
}

/// An operand width after `Fast`/`Pointer` have been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsoluteWidth {
    W8,
    W16,
    W32,
    W64,
}

impl AbsoluteWidth {
    /// size in bytes, which is also the natural alignment (spec.md table in §6)
    pub fn size_in_bytes(self) -> usize {
        match self {
            AbsoluteWidth::W8 => 1,
            AbsoluteWidth::W16 => 2,
            AbsoluteWidth::W32 => 4,
            AbsoluteWidth::W64 => 8,
        }
    }
}

/// size/alignment of a data/code/label-reference immediate: the host word.
pub fn host_word_size_in_bytes() -> usize {
    std::mem::size_of::<usize>()
}

impl Width {
    /// Resolve `Fast`/`Pointer` against the running configuration; everything
    /// else passes through unchanged.
    ///
    /// mirrors `pz_normalize_operand_width` in `pz_run_generic.c`: that
    /// function has an `abort()` path for an "unanticipated" fast width, but
    /// `VmConfig::fast_width` is itself an `AbsoluteWidth`, so there is no
    /// value this can be constructed with that normalization could reject.
    pub fn normalize(self, config: &VmConfig) -> AbsoluteWidth {
        match self {
            Width::Fast => config.fast_width,
            Width::Pointer => {
                if host_word_size_in_bytes() == 4 {
                    AbsoluteWidth::W32
                } else {
                    AbsoluteWidth::W64
                }
            }
            Width::W8 => AbsoluteWidth::W8,
            Width::W16 => AbsoluteWidth::W16,
            Width::W32 => AbsoluteWidth::W32,
            Width::W64 => AbsoluteWidth::W64,
        }
    }
}
