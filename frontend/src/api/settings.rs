use super::{
    client::ApiClient,
    types::{Settings, SettingsPayload},
};
use crate::api::ApiError;

impl ApiClient {
    /// The settings resource is a singleton; GET always returns the one
    /// record (created lazily by the backend).
    pub async fn get_settings(&self) -> Result<Settings, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/settings/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn update_settings(&self, payload: &SettingsPayload) -> Result<Settings, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(format!("{}/settings/", base_url))
                    .headers(headers)
                    .json(payload))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }
}
