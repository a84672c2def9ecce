use chrono::{Datelike, NaiveDate};
use leptos::*;

use crate::api::{ApiError, Invoice, InvoicePayload, InvoiceStatus};
use crate::utils::format::matches_search;

/// Accepts both "1234.56" and the Polish "1234,56".
pub fn parse_kwota(raw: &str) -> Result<f64, ApiError> {
    let normalized = raw.trim().replace(' ', "").replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| ApiError::validation("Podaj prawidłową kwotę"))?;
    if value < 0.0 {
        return Err(ApiError::validation("Kwota nie może być ujemna"));
    }
    Ok(value)
}

fn parse_required_date(raw: &str, label: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Podaj prawidłową datę ({})", label)))
}

/// Client-side filtering of the already-loaded list: substring search over
/// number / supplier / KSeF reference, optional status and issue-year
/// narrowing. Empty filter values mean "all".
pub fn filter_invoices(
    invoices: &[Invoice],
    search: &str,
    status_filter: &str,
    year_filter: &str,
) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|invoice| {
            matches_search(&invoice.numer, search)
                || matches_search(&invoice.dostawca, search)
                || matches_search(&invoice.ksef_numer, search)
        })
        .filter(|invoice| {
            status_filter.is_empty() || invoice.status.as_str() == status_filter
        })
        .filter(|invoice| {
            year_filter.is_empty() || invoice.data.year().to_string() == year_filter
        })
        .cloned()
        .collect()
}

/// Signal-backed state of the invoice editor form.
#[derive(Clone, Copy)]
pub struct InvoiceFormState {
    pub numer: RwSignal<String>,
    pub data: RwSignal<String>,
    pub kwota: RwSignal<String>,
    pub dostawca: RwSignal<String>,
    pub termin_platnosci: RwSignal<String>,
    pub status: RwSignal<String>,
    pub kontrahent: RwSignal<String>,
    pub ksef_numer: RwSignal<String>,
    pub notatki: RwSignal<String>,
}

impl Default for InvoiceFormState {
    fn default() -> Self {
        Self {
            numer: create_rw_signal(String::new()),
            data: create_rw_signal(String::new()),
            kwota: create_rw_signal(String::new()),
            dostawca: create_rw_signal(String::new()),
            termin_platnosci: create_rw_signal(String::new()),
            status: create_rw_signal("niezaplacona".to_string()),
            kontrahent: create_rw_signal(String::new()),
            ksef_numer: create_rw_signal(String::new()),
            notatki: create_rw_signal(String::new()),
        }
    }
}

impl InvoiceFormState {
    pub fn reset(&self) {
        self.numer.set(String::new());
        self.data.set(String::new());
        self.kwota.set(String::new());
        self.dostawca.set(String::new());
        self.termin_platnosci.set(String::new());
        self.status.set("niezaplacona".to_string());
        self.kontrahent.set(String::new());
        self.ksef_numer.set(String::new());
        self.notatki.set(String::new());
    }

    pub fn load_from(&self, invoice: &Invoice) {
        self.numer.set(invoice.numer.clone());
        self.data.set(invoice.data.format("%Y-%m-%d").to_string());
        self.kwota.set(format!("{:.2}", invoice.kwota));
        self.dostawca.set(invoice.dostawca.clone());
        self.termin_platnosci
            .set(invoice.termin_platnosci.format("%Y-%m-%d").to_string());
        self.status.set(invoice.status.as_str().to_string());
        self.kontrahent.set(
            invoice
                .kontrahent
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        self.ksef_numer.set(invoice.ksef_numer.clone());
        self.notatki.set(invoice.notatki.clone());
    }

    pub fn to_payload(&self) -> Result<InvoicePayload, ApiError> {
        let numer = self.numer.get_untracked().trim().to_string();
        if numer.is_empty() {
            return Err(ApiError::validation("Numer faktury jest wymagany"));
        }
        let dostawca = self.dostawca.get_untracked().trim().to_string();
        if dostawca.is_empty() {
            return Err(ApiError::validation("Nazwa dostawcy jest wymagana"));
        }

        let data = parse_required_date(&self.data.get_untracked(), "data wystawienia")?;
        let termin_platnosci =
            parse_required_date(&self.termin_platnosci.get_untracked(), "termin płatności")?;
        let kwota = parse_kwota(&self.kwota.get_untracked())?;

        let status = match self.status.get_untracked().as_str() {
            "zaplacona" => InvoiceStatus::Zaplacona,
            _ => InvoiceStatus::Niezaplacona,
        };

        let kontrahent = {
            let raw = self.kontrahent.get_untracked();
            let raw = raw.trim().to_string();
            if raw.is_empty() {
                None
            } else {
                Some(
                    raw.parse::<i64>()
                        .map_err(|_| ApiError::validation("Nieprawidłowy kontrahent"))?,
                )
            }
        };

        let ksef_numer = {
            let raw = self.ksef_numer.get_untracked().trim().to_string();
            (!raw.is_empty()).then_some(raw)
        };
        let notatki = {
            let raw = self.notatki.get_untracked().trim().to_string();
            (!raw.is_empty()).then_some(raw)
        };

        Ok(InvoicePayload {
            numer,
            data,
            kwota,
            dostawca,
            termin_platnosci,
            status,
            kontrahent,
            ksef_numer,
            notatki,
        })
    }
}
