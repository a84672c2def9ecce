use std::rc::Rc;

use crate::api::{ApiClient, ApiError, Invoice, InvoiceStats};

#[derive(Clone)]
pub struct DashboardRepository {
    client: Rc<ApiClient>,
}

impl DashboardRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Rc::new(client),
        }
    }

    pub async fn load_stats(&self) -> Result<InvoiceStats, ApiError> {
        self.client.get_invoice_stats().await
    }

    /// Recent invoices for the dashboard list; the full list lives on the
    /// invoices page.
    pub async fn load_recent_invoices(&self, limit: usize) -> Result<Vec<Invoice>, ApiError> {
        let mut invoices = self.client.list_invoices().await?;
        invoices.truncate(limit);
        Ok(invoices)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::session::{MemorySessionStore, Session};
    use crate::api::test_support::mock::*;
    use crate::api::User;
    use serde_json::json;

    fn invoice_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "numer": format!("FV/{}/2026", id),
            "data": "2026-01-05",
            "kwota": 100.0,
            "dostawca": "Dostawca",
            "termin_platnosci": "2026-01-19",
            "status": "niezaplacona"
        })
    }

    #[tokio::test]
    async fn dashboard_repository_loads_stats_and_truncates_recent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/invoices/stats/");
            then.status(200).json_body(json!({
                "total_count": 3,
                "zaplacone_count": 1,
                "niezaplacone_count": 2,
                "przeterminowane_count": 0,
                "blisko_terminu_count": 1,
                "suma_wszystkich": 300.0,
                "suma_zaplaconych": 100.0,
                "suma_niezaplaconych": 200.0,
                "suma_przeterminowanych": 0.0
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/invoices/");
            then.status(200)
                .json_body(json!([invoice_json(1), invoice_json(2), invoice_json(3)]));
        });

        let store = Rc::new(MemorySessionStore::with_session(Session {
            access: "access-1".into(),
            refresh: "refresh-1".into(),
            user: User {
                id: 1,
                username: "ksiegowa".into(),
                email: String::new(),
                first_name: None,
                last_name: None,
            },
        }));
        let repo = DashboardRepository::new(
            ApiClient::new_with_base_url(server.url("/api")).with_session_store(store),
        );

        let stats = repo.load_stats().await.unwrap();
        assert_eq!(stats.total_count, 3);

        let recent = repo.load_recent_invoices(2).await.unwrap();
        assert_eq!(recent.len(), 2);
    }
}
