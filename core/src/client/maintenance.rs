use super::ApiClient;
use crate::model::MaintenanceInfo;
use crate::{BeltwatchError, Result};
use tracing::warn;

/// `/maintenance`: availability probes
pub struct MaintenanceService<'a> {
    client: &'a ApiClient,
}

/// Result of a combined server and database probe
#[derive(Debug)]
pub enum HealthReport {
    Healthy,
    ServerUnavailable(BeltwatchError),
    DatabaseUnavailable(BeltwatchError),
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthReport::Healthy)
    }
}

impl<'a> MaintenanceService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn check_server(&self) -> Result<MaintenanceInfo> {
        self.client.get_json("/maintenance/check_server").await
    }

    pub async fn check_database(&self) -> Result<MaintenanceInfo> {
        self.client.get_json("/maintenance/check_database").await
    }

    /// Probe the server, then the database. The database is only checked
    /// when the server answered.
    pub async fn health(&self) -> HealthReport {
        if let Err(e) = self.check_server().await {
            warn!(target: "client", error = %e, "Server unavailable");
            return HealthReport::ServerUnavailable(e);
        }
        match self.check_database().await {
            Ok(_) => HealthReport::Healthy,
            Err(e) => {
                warn!(target: "client", error = %e, "Database unavailable");
                HealthReport::DatabaseUnavailable(e)
            }
        }
    }
}
