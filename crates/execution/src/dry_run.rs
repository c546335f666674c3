// In crates/execution/src/dry_run.rs

use crate::{DispatchReceipt, Executor, Result};
use async_trait::async_trait;
use core_types::TradingInstruction;

/// An executor that only logs instructions. Nothing leaves the process.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for DryRunExecutor {
    fn name(&self) -> &'static str {
        "DryRunExecutor"
    }

    async fn execute(&self, instruction: &TradingInstruction) -> Result<DispatchReceipt> {
        tracing::info!(
            ticker = %instruction.ticker,
            action = %instruction.action,
            quantity = ?instruction.quantity,
            price = ?instruction.price,
            "[DRY RUN] Instruction not sent."
        );
        Ok(DispatchReceipt {
            executor: self.name(),
            status: None,
        })
    }
}
