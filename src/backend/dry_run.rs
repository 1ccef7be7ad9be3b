use std::time::Duration;

use async_trait::async_trait;

use crate::categories::DataType;
use crate::dispatch::{CapabilityError, ClearCapability, RemovalOptions};

/// Per-call pause used when a dry run is shown with a progress bar
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(400);

/// Pretends to clear. Every request is logged and succeeds, after an
/// optional simulated latency.
#[derive(Debug, Clone, Default)]
pub struct DryRunBackend {
    latency: Duration,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ClearCapability for DryRunBackend {
    async fn remove(
        &self,
        options: &RemovalOptions,
        data_types: &[DataType],
    ) -> Result<(), CapabilityError> {
        tracing::info!(
            "Mock clear: {} for scope: {}",
            DataType::payload_json(data_types),
            options.scope()
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(())
    }
}
