use chrono::NaiveDate;

use super::{
    client::ApiClient,
    types::{
        Invoice, InvoicePayload, InvoiceStats, KsefFetchRequest, KsefFetchResponse,
        KsefImportRequest, KsefImportResponse,
    },
};
use crate::api::ApiError;

impl ApiClient {
    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/invoices/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn create_invoice(&self, payload: &InvoicePayload) -> Result<Invoice, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/invoices/", base_url))
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

    pub async fn update_invoice(
        &self,
        id: i64,
        payload: &InvoicePayload,
    ) -> Result<Invoice, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .put(format!("{}/invoices/{}/", base_url, id))
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

    pub async fn delete_invoice(&self, id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .delete(format!("{}/invoices/{}/", base_url, id))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response.api_error())
        }
    }

    pub async fn mark_invoice_paid(&self, id: i64) -> Result<Invoice, ApiError> {
        self.set_invoice_status(id, "mark_paid").await
    }

    pub async fn mark_invoice_unpaid(&self, id: i64) -> Result<Invoice, ApiError> {
        self.set_invoice_status(id, "mark_unpaid").await
    }

    async fn set_invoice_status(&self, id: i64, action: &str) -> Result<Invoice, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/invoices/{}/{}/", base_url, id, action))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn get_invoice_stats(&self) -> Result<InvoiceStats, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/invoices/stats/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    /// Years for which the backend has at least one invoice, used by the
    /// invoice list year filter.
    pub async fn get_available_years(&self) -> Result<Vec<i32>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/invoices/available-years/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    /// Queries KSeF (through the backend) for cost invoices issued in the
    /// given range. Candidates come back flagged with `already_exists`
    /// computed against the local store by their KSeF reference number.
    pub async fn fetch_from_ksef(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<KsefFetchResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let payload = KsefFetchRequest { date_from, date_to };
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/invoices/fetch_from_ksef/", base_url))
                    .headers(headers)
                    .json(&payload))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    /// Persists the chosen KSeF candidates as local cost invoices.
    pub async fn import_from_ksef(
        &self,
        request: &KsefImportRequest,
    ) -> Result<KsefImportResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/invoices/import_from_ksef/", base_url))
                    .headers(headers)
                    .json(request))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }
}
