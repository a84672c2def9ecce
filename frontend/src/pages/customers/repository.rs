use std::rc::Rc;

use crate::api::{ApiClient, ApiError, ContractorPayload, Customer};

#[derive(Clone)]
pub struct CustomersRepository {
    client: Rc<ApiClient>,
}

impl CustomersRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.client.list_customers(None).await
    }

    pub async fn save(
        &self,
        id: Option<i64>,
        payload: &ContractorPayload,
    ) -> Result<Customer, ApiError> {
        match id {
            Some(id) => self.client.update_customer(id, payload).await,
            None => self.client.create_customer(payload).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_customer(id).await
    }
}
