use std::rc::Rc;

use crate::api::{ApiClient, ApiError, Invoice, InvoicePayload};

#[derive(Clone)]
pub struct InvoicesRepository {
    client: Rc<ApiClient>,
}

impl InvoicesRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, ApiError> {
        self.client.list_invoices().await
    }

    pub async fn save(&self, id: Option<i64>, payload: &InvoicePayload) -> Result<Invoice, ApiError> {
        match id {
            Some(id) => self.client.update_invoice(id, payload).await,
            None => self.client.create_invoice(payload).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_invoice(id).await
    }

    pub async fn set_paid(&self, id: i64, paid: bool) -> Result<Invoice, ApiError> {
        if paid {
            self.client.mark_invoice_paid(id).await
        } else {
            self.client.mark_invoice_unpaid(id).await
        }
    }

    pub async fn available_years(&self) -> Result<Vec<i32>, ApiError> {
        self.client.get_available_years().await
    }
}
