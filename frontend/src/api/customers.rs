use super::{
    client::ApiClient,
    types::{ContractorPayload, Customer},
};
use crate::api::ApiError;

impl ApiClient {
    pub async fn list_customers(&self, search: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let query: Vec<(&str, String)> = search
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                let mut request = self
                    .http_client()
                    .get(format!("{}/customers/", base_url))
                    .headers(headers);
                if !query.is_empty() {
                    request = request.query(&query);
                }
                Ok(request)
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn create_customer(&self, payload: &ContractorPayload) -> Result<Customer, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/customers/", base_url))
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

    pub async fn update_customer(
        &self,
        id: i64,
        payload: &ContractorPayload,
    ) -> Result<Customer, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(format!("{}/customers/{}/", base_url, id))
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

    pub async fn delete_customer(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .delete(format!("{}/customers/{}/", base_url, id))
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
