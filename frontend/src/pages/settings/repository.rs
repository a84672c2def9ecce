use std::rc::Rc;

use crate::api::{ApiClient, ApiError, MessageResponse, Settings, SettingsPayload};

#[derive(Clone)]
pub struct SettingsRepository {
    client: Rc<ApiClient>,
}

impl SettingsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn load(&self) -> Result<Settings, ApiError> {
        self.client.get_settings().await
    }

    pub async fn save(&self, payload: &SettingsPayload) -> Result<Settings, ApiError> {
        self.client.update_settings(payload).await
    }

    pub async fn change_password(
        &self,
        old_password: String,
        new_password: String,
    ) -> Result<MessageResponse, ApiError> {
        self.client.change_password(old_password, new_password).await
    }
}
