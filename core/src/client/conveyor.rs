use super::ApiClient;
use crate::model::{ConveyorParameters, ConveyorStatus, NewConveyorParameters};
use crate::Result;
use reqwest::Method;

/// `/conveyor_info`: belt parameters and overall status
pub struct ConveyorService<'a> {
    client: &'a ApiClient,
}

impl<'a> ConveyorService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn parameters(&self) -> Result<ConveyorParameters> {
        self.client.get_json("/conveyor_info/parameters").await
    }

    pub async fn status(&self) -> Result<ConveyorStatus> {
        self.client.get_json("/conveyor_info/status").await
    }

    /// Replace the stored belt parameters; the server echoes the new values
    pub async fn change_parameters(
        &self,
        params: NewConveyorParameters,
    ) -> Result<ConveyorParameters> {
        let builder = self
            .client
            .request(Method::PUT, "/conveyor_info/change_parameters")
            .json(&params);
        self.client.send_json(builder).await
    }
}
