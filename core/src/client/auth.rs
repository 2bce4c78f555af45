use super::ApiClient;
use crate::model::TokenResponse;
use crate::Result;
use reqwest::Method;
use tracing::info;

/// `/auth`: OAuth2 password login
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and store it in the session
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        info!(target: "client", username = %username, "Requesting access token");
        let builder = self
            .client
            .request(Method::POST, "/auth/token")
            .form(&[("username", username), ("password", password)]);
        let token: TokenResponse = self.client.send_json(builder).await?;
        self.client.session().login(token.access_token.clone());
        Ok(token)
    }

    pub fn logout(&self) {
        self.client.session().logout();
    }

    pub fn is_signed_in(&self) -> bool {
        self.client.session().is_valid()
    }
}
