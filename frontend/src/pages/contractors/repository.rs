use std::rc::Rc;

use crate::api::{ApiClient, ApiError, Contractor, ContractorPayload};

#[derive(Clone)]
pub struct ContractorsRepository {
    client: Rc<ApiClient>,
}

impl ContractorsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Contractor>, ApiError> {
        self.client.list_contractors(None).await
    }

    pub async fn save(
        &self,
        id: Option<i64>,
        payload: &ContractorPayload,
    ) -> Result<Contractor, ApiError> {
        match id {
            Some(id) => self.client.update_contractor(id, payload).await,
            None => self.client.create_contractor(payload).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_contractor(id).await
    }
}
