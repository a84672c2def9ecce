use super::{
    client::ApiClient,
    types::{Contractor, ContractorPayload},
};
use crate::api::ApiError;

impl ApiClient {
    /// `search` filters by name or NIP on the server; the pages also filter
    /// the loaded list client-side.
    pub async fn list_contractors(&self, search: Option<&str>) -> Result<Vec<Contractor>, ApiError> {
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
                    .get(format!("{}/contractors/", base_url))
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

    pub async fn create_contractor(
        &self,
        payload: &ContractorPayload,
    ) -> Result<Contractor, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/contractors/", base_url))
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

    pub async fn update_contractor(
        &self,
        id: i64,
        payload: &ContractorPayload,
    ) -> Result<Contractor, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(format!("{}/contractors/{}/", base_url, id))
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

    /// Fails with a business error when the contractor is still referenced
    /// by invoices; the caller keeps its list unchanged in that case.
    pub async fn delete_contractor(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .delete(format!("{}/contractors/{}/", base_url, id))
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
