use std::rc::Rc;

use crate::api::{ApiClient, ApiError, CreateUserRequest, User};

#[derive(Clone)]
pub struct UsersRepository {
    client: Rc<ApiClient>,
}

impl UsersRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_users().await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<User, ApiError> {
        self.client.create_user(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_user(id).await
    }
}
