use crate::utils::*;

/// Knobs an [`Engine`] is built with. They do not change what is safe,
/// only how answers are arrived at and reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// The admission order of the safety check, and thus the safe
    /// sequence that gets reported.
    pub scan: ScanOrder,
}

impl Config {
    pub fn new(scan: ScanOrder) -> Self {
        Self { scan }
    }
}
