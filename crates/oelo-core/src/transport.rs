// ── Transport adapter ──
//
// The seam between the coordinator and the network. The coordinator
// serializes calls, so implementations never see overlapping requests.

use std::future::Future;

use oelo_api::{OeloClient, TransportConfig};
use tracing::debug;

use crate::config::CoordinatorConfig;
use crate::convert::render_batch;
use crate::error::CoreError;
use crate::model::{CommandBatch, ControllerSnapshot};

/// Request/response exchange with one controller.
pub trait Transport: Send + Sync + 'static {
    /// Fetch the state of every zone in one request.
    fn read_all(&self) -> impl Future<Output = Result<ControllerSnapshot, CoreError>> + Send;

    /// Apply every command in the batch.
    fn write_batch(
        &self,
        batch: &CommandBatch,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// [`Transport`] over the controller's local HTTP API.
pub struct HttpTransport {
    client: OeloClient,
}

impl HttpTransport {
    pub fn new(config: &CoordinatorConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.request_timeout);
        let client = OeloClient::from_address(&config.address, &transport)?;
        Ok(Self { client })
    }

    pub fn from_client(client: OeloClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &OeloClient {
        &self.client
    }
}

impl Transport for HttpTransport {
    async fn read_all(&self) -> Result<ControllerSnapshot, CoreError> {
        let reports = self.client.get_controller().await?;
        Ok(ControllerSnapshot::from(reports.as_slice()))
    }

    /// One `setPattern` per distinct command, sent in order. The first
    /// failure ends the batch.
    async fn write_batch(&self, batch: &CommandBatch) -> Result<(), CoreError> {
        let requests = render_batch(batch)?;
        debug!(requests = requests.len(), zones = batch.len(), "writing batch");
        for request in &requests {
            self.client.set_pattern(request).await?;
        }
        Ok(())
    }
}
