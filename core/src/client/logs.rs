use super::ApiClient;
use crate::model::{LogRecord, LogsRemoved};
use crate::Result;
use reqwest::Method;

/// `/logs`: the server's action log
pub struct LogService<'a> {
    client: &'a ApiClient,
}

impl<'a> LogService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Newest first
    pub async fn all(&self) -> Result<Vec<LogRecord>> {
        self.client.get_json("/logs/all").await
    }

    pub async fn by_id(&self, id: i64) -> Result<LogRecord> {
        self.client.get_json(&format!("/logs/id={id}")).await
    }

    pub async fn of_type(&self, log_type: &str) -> Result<Vec<LogRecord>> {
        self.client.get_json(&format!("/logs/type={log_type}")).await
    }

    /// `log_deletion_event` asks the server to record the deletion itself
    pub async fn delete(&self, id: i64, log_deletion_event: bool) -> Result<LogRecord> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("/logs/id={id}/delete"))
            .query(&[("log_deletion_event", log_deletion_event)]);
        self.client.send_json(builder).await
    }

    pub async fn delete_all(&self, log_deletion_event: bool) -> Result<LogsRemoved> {
        let builder = self
            .client
            .request(Method::DELETE, "/logs/delete_all")
            .query(&[("log_deletion_event", log_deletion_event)]);
        self.client.send_json(builder).await
    }
}
