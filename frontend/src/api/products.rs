use super::{
    client::ApiClient,
    types::{Product, ProductPayload},
};
use crate::api::ApiError;

impl ApiClient {
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/products/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/products/", base_url))
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

    pub async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(format!("{}/products/{}/", base_url, id))
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

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .delete(format!("{}/products/{}/", base_url, id))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response.api_error())
        }
    }
}
