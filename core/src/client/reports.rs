use super::ApiClient;
use crate::model::ReportFormat;
use crate::Result;
use reqwest::Method;
use tracing::debug;

/// `/report`: generated PDF/CSV documents, returned as raw bytes
pub struct ReportService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn defect(&self, id: i64, format: ReportFormat) -> Result<Vec<u8>> {
        self.download(&format!("/report/id={id}/{}", format.as_str()))
            .await
    }

    pub async fn all_defects(&self, format: ReportFormat) -> Result<Vec<u8>> {
        self.download(&format!("/report/all/{}", format.as_str()))
            .await
    }

    pub async fn conveyor(&self, format: ReportFormat) -> Result<Vec<u8>> {
        self.download(&format!("/report/conveyor/{}", format.as_str()))
            .await
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .send(self.client.request(Method::POST, path))
            .await?;
        let bytes = response.bytes().await?;
        debug!(target: "client", path = %path, size = bytes.len(), "Report downloaded");
        Ok(bytes.to_vec())
    }
}
