use std::rc::Rc;

use crate::api::{ApiClient, ApiError, Product, ProductPayload};

#[derive(Clone)]
pub struct ProductsRepository {
    client: Rc<ApiClient>,
}

impl ProductsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.client.list_products().await
    }

    pub async fn save(
        &self,
        id: Option<i64>,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        match id {
            Some(id) => self.client.update_product(id, payload).await,
            None => self.client.create_product(payload).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_product(id).await
    }
}
