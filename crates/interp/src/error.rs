use std::fmt;

/// Interpreter fatal errors: spec.md §7 class 2. Both are programming
/// errors in the bytecode or its invocation, not conditions a running
/// program can hit as data -- reported to diagnostic output and the
/// interpreter aborts the run, same framing as `pz_encode::EncodeError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// `ROLL` encoded/executed with an immediate depth of 0 (spec.md §4.4).
    ZeroRollDepth,
    /// `execute` was called with a null/absent entry procedure code pointer.
    MissingEntryProcedure,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::ZeroRollDepth => write!(f, "ROLL with depth 0 is a fatal error"),
            FatalError::MissingEntryProcedure => write!(f, "no entry procedure to execute"),
        }
    }
}

impl std::error::Error for FatalError {}

impl From<pz_state::ZeroRollDepth> for FatalError {
    fn from(_: pz_state::ZeroRollDepth) -> Self {
        FatalError::ZeroRollDepth
    }
}
