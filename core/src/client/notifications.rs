use super::ApiClient;
use crate::model::NotificationReceipt;
use crate::Result;
use reqwest::Method;

/// `/notification`: push a message out through the server's channels
pub struct NotificationService<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn telegram(&self, message: &str) -> Result<NotificationReceipt> {
        let builder = self
            .client
            .request(Method::POST, "/notification/with_telegram")
            .query(&[("message", message)]);
        self.client.send_json(builder).await
    }

    pub async fn gmail(&self, subject: &str, text: &str) -> Result<NotificationReceipt> {
        let builder = self
            .client
            .request(Method::POST, "/notification/with_gmail")
            .query(&[("subject", subject), ("text", text)]);
        self.client.send_json(builder).await
    }
}
