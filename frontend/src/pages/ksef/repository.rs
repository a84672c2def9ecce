use std::rc::Rc;

use chrono::NaiveDate;

use crate::api::{
    ApiClient, ApiError, KsefCandidate, KsefFetchResponse, KsefImportRequest, KsefImportResponse,
    Settings,
};

#[derive(Clone)]
pub struct KsefRepository {
    client: Rc<ApiClient>,
}

impl KsefRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn load_settings(&self) -> Result<Settings, ApiError> {
        self.client.get_settings().await
    }

    pub async fn fetch(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<KsefFetchResponse, ApiError> {
        self.client.fetch_from_ksef(date_from, date_to).await
    }

    pub async fn import(
        &self,
        invoices: Vec<KsefCandidate>,
    ) -> Result<KsefImportResponse, ApiError> {
        self.client
            .import_from_ksef(&KsefImportRequest { invoices })
            .await
    }
}
