// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::TradingInstruction;
pub mod dry_run;
pub mod error;
pub mod types;
pub mod webhook;

// Re-export public types
pub use error::{Error, Result};
pub use types::DispatchReceipt;

/// The universal interface for an execution handler.
///
/// An `Executor` takes a `TradingInstruction` and delivers it to a target,
/// which could be the live order webhook or a log-only stand-in. Delivery is
/// single-shot: implementations do not retry.
#[async_trait]
pub trait Executor: Send + Sync {
    /// The name of the executor (e.g., "WebhookExecutor", "DryRunExecutor").
    fn name(&self) -> &'static str;

    /// Delivers one instruction.
    ///
    /// # Returns
    ///
    /// A `DispatchReceipt` when the target accepted the instruction, or an
    /// `Error` if it may not have been delivered.
    async fn execute(&self, instruction: &TradingInstruction) -> Result<DispatchReceipt>;
}
