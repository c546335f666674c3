// In crates/execution/src/types.rs

use serde::Serialize;

/// Confirmation that the target accepted an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    /// The executor that delivered the instruction.
    pub executor: &'static str,
    /// HTTP status returned by the target, if there was one.
    pub status: Option<u16>,
}
