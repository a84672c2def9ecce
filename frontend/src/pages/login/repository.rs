use std::rc::Rc;

use crate::api::{ApiClient, ApiError, LoginRequest, LoginResponse, User};

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl LoginRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.login(request).await
    }

    pub async fn logout(&self) {
        self.client.logout().await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get_me().await
    }
}
