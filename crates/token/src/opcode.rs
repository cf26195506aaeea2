/// The abstract opcode surface accepted by the encoder.
///
/// This is distinct from [`crate::token::Token`], the closed set of bytes
/// the dispatch loop actually understands: several opcodes here collapse to
/// a single token once widths are known (e.g. `Ze`/`Se`/`Trunc` with
/// `width1 == width2` all become `Token::Nop`), and a couple of opcodes
/// pick between two possible tokens depending on their immediate
/// (`Roll`/`Pick`, see the peephole rules in `pz-encode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop,
    /// load an immediate number of the given width (width1)
    LoadImmediateNum,
    /// load a host-word data/code reference, resolved at encode time
    LoadImmediateData,
    /// zero-extend width1 -> width2
    Ze,
    /// sign-extend width1 -> width2
    Se,
    /// truncate width1 -> width2 (width1 > width2)
    Trunc,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    LShift,
    RShift,
    LtU,
    LtS,
    GtU,
    GtS,
    Eq,
    Not,
    Dup,
    Drop,
    Swap,
    /// rotate the top `n` cells; `n` is the 8-bit immediate
    Roll,
    /// push a copy of the cell `n` down from the top; `n` is the 8-bit immediate
    Pick,
    /// call a procedure at a host-word code address
    Call,
    /// conditional jump on a width1 value, to a host-word code address
    CJmp,
    Ret,
    End,
    /// invoke a foreign function pointer (host-word immediate)
    CCall,
}
