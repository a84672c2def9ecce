use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// `POST /auth/refresh` returns a fresh access token; the refresh token is
/// only included when the backend rotates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Niezaplacona,
    Zaplacona,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Niezaplacona => "Niezapłacona",
            InvoiceStatus::Zaplacona => "Zapłacona",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Niezaplacona => "niezaplacona",
            InvoiceStatus::Zaplacona => "zaplacona",
        }
    }
}

/// Cost invoice, field names follow the backend wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub numer: String,
    pub data: NaiveDate,
    pub kwota: f64,
    pub dostawca: String,
    pub termin_platnosci: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub kontrahent: Option<i64>,
    #[serde(default)]
    pub kontrahent_nazwa: Option<String>,
    #[serde(default)]
    pub ksef_numer: String,
    #[serde(default)]
    pub notatki: String,
    #[serde(default)]
    pub is_overdue: bool,
    #[serde(default)]
    pub days_until_due: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub numer: String,
    pub data: NaiveDate,
    pub kwota: f64,
    pub dostawca: String,
    pub termin_platnosci: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontrahent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ksef_numer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notatki: Option<String>,
}

/// Dashboard aggregates computed by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub total_count: i64,
    pub zaplacone_count: i64,
    pub niezaplacone_count: i64,
    pub przeterminowane_count: i64,
    pub blisko_terminu_count: i64,
    pub suma_wszystkich: f64,
    pub suma_zaplaconych: f64,
    pub suma_niezaplaconych: f64,
    pub suma_przeterminowanych: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: i64,
    pub nazwa: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default)]
    pub ulica: String,
    #[serde(default)]
    pub miasto: String,
    #[serde(default)]
    pub kod_pocztowy: String,
    #[serde(default)]
    pub kraj: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub notatki: String,
    #[serde(default)]
    pub pelny_adres: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractorPayload {
    pub nazwa: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default)]
    pub ulica: String,
    #[serde(default)]
    pub miasto: String,
    #[serde(default)]
    pub kod_pocztowy: String,
    #[serde(default)]
    pub kraj: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub notatki: String,
}

/// Customers mirror contractors on the wire; the backend keeps them as a
/// separate resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub nazwa: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default)]
    pub ulica: String,
    #[serde(default)]
    pub miasto: String,
    #[serde(default)]
    pub kod_pocztowy: String,
    #[serde(default)]
    pub kraj: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub notatki: String,
    #[serde(default)]
    pub pelny_adres: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    pub unit_price: f64,
    pub tax_rate: i32,
    #[serde(default)]
    pub tax_rate_display: String,
    #[serde(default)]
    pub price_gross: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit: String,
    pub unit_price: f64,
    pub tax_rate: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KsefEnvironment {
    Production,
    Test,
    Demo,
}

impl KsefEnvironment {
    pub fn label(&self) -> &'static str {
        match self {
            KsefEnvironment::Production => "Produkcyjne",
            KsefEnvironment::Test => "Testowe",
            KsefEnvironment::Demo => "Demo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KsefEnvironment::Production => "production",
            KsefEnvironment::Test => "test",
            KsefEnvironment::Demo => "demo",
        }
    }
}

/// Singleton company settings record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    #[serde(default)]
    pub firma_nazwa: String,
    #[serde(default)]
    pub firma_nip: String,
    #[serde(default)]
    pub ksef_token: String,
    pub ksef_environment: KsefEnvironment,
    #[serde(default)]
    pub auto_fetch_ksef: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Settings {
    /// KSeF calls need both a token and the company NIP.
    pub fn ksef_configured(&self) -> bool {
        !self.ksef_token.trim().is_empty() && !self.firma_nip.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsPayload {
    pub firma_nazwa: String,
    pub firma_nip: String,
    pub ksef_token: String,
    pub ksef_environment: KsefEnvironment,
    pub auto_fetch_ksef: bool,
}

/// Invoice header returned by a KSeF range query; not yet persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KsefCandidate {
    pub ksef_numer: String,
    pub numer: String,
    #[serde(default)]
    pub data: String,
    pub kwota: f64,
    #[serde(default)]
    pub dostawca: String,
    #[serde(default)]
    pub dostawca_nip: String,
    #[serde(default)]
    pub termin_platnosci: Option<String>,
    #[serde(default)]
    pub already_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KsefFetchRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KsefFetchResponse {
    #[serde(default)]
    pub invoices: Vec<KsefCandidate>,
    #[serde(default)]
    pub total_found: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KsefImportRequest {
    pub invoices: Vec<KsefCandidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KsefImportResponse {
    #[serde(default)]
    pub imported_count: i64,
    #[serde(default)]
    pub skipped_count: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn serialize_invoice_payload_skips_absent_optionals() {
        let payload = InvoicePayload {
            numer: "FV/1/2026".into(),
            data: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            kwota: 1230.0,
            dostawca: "Hurtownia Beta".into(),
            termin_platnosci: NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(),
            status: InvoiceStatus::Niezaplacona,
            kontrahent: None,
            ksef_numer: None,
            notatki: None,
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["numer"], serde_json::json!("FV/1/2026"));
        assert_eq!(v["data"], serde_json::json!("2026-01-05"));
        assert_eq!(v["status"], serde_json::json!("niezaplacona"));
        assert!(v.get("kontrahent").is_none());
        assert!(v.get("ksef_numer").is_none());
    }

    #[wasm_bindgen_test]
    fn deserialize_ksef_candidate_defaults_already_exists() {
        let raw = r#"{
            "ksef_numer": "1111111111-20260105-AB12CD34EF56-01",
            "numer": "FV/5/2026",
            "data": "2026-01-05",
            "kwota": 450.5,
            "dostawca": "Dostawca Testowy",
            "dostawca_nip": "1111111111"
        }"#;
        let candidate: KsefCandidate = serde_json::from_str(raw).unwrap();
        assert!(!candidate.already_exists);
        assert!(candidate.termin_platnosci.is_none());
    }

    #[wasm_bindgen_test]
    fn deserialize_settings_environment_lowercase() {
        let raw = r#"{
            "id": 1,
            "firma_nazwa": "Moja Firma",
            "firma_nip": "1234567890",
            "ksef_token": "token",
            "ksef_environment": "demo",
            "auto_fetch_ksef": true
        }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.ksef_environment, KsefEnvironment::Demo);
        assert!(settings.auto_fetch_ksef);
        assert!(settings.ksef_configured());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use leptos::IntoView;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        assert_eq!(ApiError::validation("bad").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unknown("boom").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("net").code, "REQUEST_FAILED");
        assert_eq!(ApiError::unauthorized("401").code, "UNAUTHORIZED");
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");
        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn api_error_deserializes_backend_payload_without_code() {
        let err: ApiError =
            serde_json::from_str(r#"{"error": "Nieprawidłowa nazwa użytkownika lub hasło"}"#)
                .unwrap();
        assert_eq!(err.error, "Nieprawidłowa nazwa użytkownika lub hasło");
        assert!(err.code.is_empty());
    }

    #[test]
    fn api_error_can_be_converted_to_view() {
        let _: View = ApiError::request_failed("request failed").into_view();
    }

    #[test]
    fn deserialize_invoice_with_optional_contractor() {
        let raw = serde_json::json!({
            "id": 7,
            "numer": "FV/7/2026",
            "data": "2026-01-03",
            "kwota": 999.99,
            "dostawca": "Hurtownia Beta Sp. z o.o.",
            "termin_platnosci": "2026-01-17",
            "status": "zaplacona",
            "kontrahent": null,
            "kontrahent_nazwa": null,
            "ksef_numer": "",
            "notatki": "",
            "is_overdue": false,
            "days_until_due": 14,
            "created_at": "2026-01-03T09:00:00Z",
            "updated_at": "2026-01-03T09:00:00Z"
        });
        let invoice: Invoice = serde_json::from_value(raw).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Zaplacona);
        assert!(invoice.kontrahent.is_none());
        assert_eq!(invoice.data, NaiveDate::from_ymd_opt(2026, 1, 3).unwrap());
    }

    #[test]
    fn invoice_status_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_value(InvoiceStatus::Niezaplacona).unwrap(),
            serde_json::json!("niezaplacona")
        );
        let status: InvoiceStatus = serde_json::from_value(serde_json::json!("zaplacona")).unwrap();
        assert_eq!(status, InvoiceStatus::Zaplacona);
        assert_eq!(status.label(), "Zapłacona");
    }

    #[test]
    fn deserialize_ksef_fetch_response_with_error_only() {
        let response: KsefFetchResponse = serde_json::from_value(serde_json::json!({
            "error": "Brak konfiguracji KSeF"
        }))
        .unwrap();
        assert!(response.invoices.is_empty());
        assert_eq!(response.error.as_deref(), Some("Brak konfiguracji KSeF"));
    }

    #[test]
    fn settings_without_token_is_not_configured() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "id": 1,
            "firma_nazwa": "",
            "firma_nip": "1234567890",
            "ksef_token": "   ",
            "ksef_environment": "test",
            "auto_fetch_ksef": false
        }))
        .unwrap();
        assert!(!settings.ksef_configured());
    }
}
