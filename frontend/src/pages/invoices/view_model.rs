use leptos::*;

use crate::api::{ApiClient, ApiError, Invoice, InvoicePayload};
use crate::pages::invoices::{
    repository::InvoicesRepository,
    utils::{filter_invoices, InvoiceFormState},
};
use crate::utils::message::MessageState;

#[derive(Clone)]
pub struct SavePayload {
    pub id: Option<i64>,
    pub payload: InvoicePayload,
}

#[derive(Clone, Copy)]
pub struct InvoicesViewModel {
    pub form: InvoiceFormState,
    pub search: RwSignal<String>,
    pub status_filter: RwSignal<String>,
    pub year_filter: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub pending_delete: RwSignal<Option<Invoice>>,
    pub invoices_resource: Resource<u32, Result<Vec<Invoice>, ApiError>>,
    pub years_resource: Resource<u32, Result<Vec<i32>, ApiError>>,
    pub save_action: Action<SavePayload, Result<Invoice, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    pub paid_toggle_action: Action<(i64, bool), Result<Invoice, ApiError>>,
    reload: RwSignal<u32>,
}

fn apply_save_result(
    result: Option<Result<Invoice, ApiError>>,
    message: RwSignal<MessageState>,
    form_open: RwSignal<bool>,
    editing: RwSignal<Option<i64>>,
    form: InvoiceFormState,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                message.update(|m| m.set_success("Zapisano fakturę."));
                form_open.set(false);
                editing.set(None);
                form.reset();
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|m| m.set_error(err)),
        }
    }
}

fn apply_delete_result(
    result: Option<Result<(), ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                message.update(|m| m.set_success("Usunięto fakturę."));
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|m| m.set_error(err)),
        }
    }
}

fn apply_paid_toggle_result(
    result: Option<Result<Invoice, ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(invoice) => {
                let text = match invoice.status {
                    crate::api::InvoiceStatus::Zaplacona => "Oznaczono jako zapłaconą.",
                    crate::api::InvoiceStatus::Niezaplacona => "Oznaczono jako niezapłaconą.",
                };
                message.update(|m| m.set_success(text));
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|m| m.set_error(err)),
        }
    }
}

impl InvoicesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(InvoicesRepository::new(api));

        let form = InvoiceFormState::default();
        let search = create_rw_signal(String::new());
        let status_filter = create_rw_signal(String::new());
        let year_filter = create_rw_signal(String::new());
        let message = create_rw_signal(MessageState::default());
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<i64>);
        let pending_delete = create_rw_signal(None::<Invoice>);
        let reload = create_rw_signal(0u32);

        let invoices_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list().await }
            },
        );

        let years_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.available_years().await }
            },
        );

        let save_action = create_action(move |payload: &SavePayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(payload.id, &payload.payload).await }
        });

        let delete_action = create_action(move |id: &i64| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.delete(id).await }
        });

        let paid_toggle_action = create_action(move |input: &(i64, bool)| {
            let repo = repository.get_value();
            let (id, paid) = *input;
            async move { repo.set_paid(id, paid).await }
        });

        {
            create_effect(move |_| {
                apply_save_result(
                    save_action.value().get(),
                    message,
                    form_open,
                    editing,
                    form,
                    reload,
                );
            });
        }

        {
            create_effect(move |_| {
                apply_delete_result(delete_action.value().get(), message, reload);
            });
        }

        {
            create_effect(move |_| {
                apply_paid_toggle_result(paid_toggle_action.value().get(), message, reload);
            });
        }

        Self {
            form,
            search,
            status_filter,
            year_filter,
            message,
            form_open,
            editing,
            pending_delete,
            invoices_resource,
            years_resource,
            save_action,
            delete_action,
            paid_toggle_action,
            reload,
        }
    }

    pub fn filtered_invoices(&self) -> Signal<Vec<Invoice>> {
        let invoices_resource = self.invoices_resource;
        let all = create_memo(move |_| {
            invoices_resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        });
        let search = self.search;
        let status_filter = self.status_filter;
        let year_filter = self.year_filter;
        Signal::derive(move || {
            all.with(|invoices| {
                filter_invoices(
                    invoices,
                    &search.get(),
                    &status_filter.get(),
                    &year_filter.get(),
                )
            })
        })
    }

    pub fn open_create_form(&self) {
        self.form.reset();
        self.editing.set(None);
        self.message.update(|m| m.clear());
        self.form_open.set(true);
    }

    pub fn open_edit_form(&self, invoice: &Invoice) {
        self.form.load_from(invoice);
        self.editing.set(Some(invoice.id));
        self.message.update(|m| m.clear());
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.editing.set(None);
        self.form.reset();
    }

    /// Validates the form and dispatches the save; validation failures stay
    /// local to the message banner.
    pub fn submit_form(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        match self.form.to_payload() {
            Ok(payload) => {
                self.save_action.dispatch(SavePayload {
                    id: self.editing.get_untracked(),
                    payload,
                });
            }
            Err(err) => self.message.update(|m| m.set_error(err)),
        }
    }

    pub fn request_delete(&self, invoice: Invoice) {
        self.pending_delete.set(Some(invoice));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    /// Issues the delete previously confirmed in the dialog.
    pub fn confirm_delete(&self) {
        if let Some(invoice) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(invoice.id);
        }
    }

    pub fn toggle_paid(&self, invoice: &Invoice) {
        if self.paid_toggle_action.pending().get_untracked() {
            return;
        }
        let mark_paid = invoice.status == crate::api::InvoiceStatus::Niezaplacona;
        self.paid_toggle_action.dispatch((invoice.id, mark_paid));
    }

    pub fn reload(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn use_invoices_view_model() -> InvoicesViewModel {
    match use_context::<InvoicesViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = InvoicesViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::InvoiceStatus;
    use crate::test_support::ssr::with_runtime;
    use chrono::NaiveDate;

    fn invoice(id: i64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id,
            numer: format!("FV/{}/2026", id),
            data: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            kwota: 100.0,
            dostawca: "Dostawca".into(),
            termin_platnosci: NaiveDate::from_ymd_opt(2026, 1, 24).unwrap(),
            status,
            kontrahent: None,
            kontrahent_nazwa: None,
            ksef_numer: String::new(),
            notatki: String::new(),
            is_overdue: false,
            days_until_due: 14,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn apply_save_result_closes_form_and_reloads() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let form_open = create_rw_signal(true);
            let editing = create_rw_signal(Some(1i64));
            let form = InvoiceFormState::default();
            form.numer.set("FV/1/2026".into());
            let reload = create_rw_signal(0u32);

            apply_save_result(
                Some(Ok(invoice(1, InvoiceStatus::Niezaplacona))),
                message,
                form_open,
                editing,
                form,
                reload,
            );
            assert_eq!(message.get().success.as_deref(), Some("Zapisano fakturę."));
            assert!(!form_open.get());
            assert!(editing.get().is_none());
            assert!(form.numer.get().is_empty());
            assert_eq!(reload.get(), 1);

            // A failed save keeps the form open for corrections.
            form_open.set(true);
            apply_save_result(
                Some(Err(ApiError::validation("Numer faktury jest wymagany"))),
                message,
                form_open,
                editing,
                form,
                reload,
            );
            assert!(form_open.get());
            assert!(message.get().error.is_some());
            assert_eq!(reload.get(), 1);
        });
    }

    #[test]
    fn apply_delete_result_reloads_only_on_success() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let reload = create_rw_signal(0u32);

            apply_delete_result(Some(Ok(())), message, reload);
            assert_eq!(reload.get(), 1);

            // Business error (e.g. referenced contractor) leaves the list
            // as it was: no reload, error surfaced.
            apply_delete_result(
                Some(Err(ApiError::unknown("Nie można usunąć"))),
                message,
                reload,
            );
            assert_eq!(reload.get(), 1);
            assert!(message.get().error.is_some());
        });
    }

    #[test]
    fn apply_paid_toggle_result_describes_new_status() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let reload = create_rw_signal(0u32);

            apply_paid_toggle_result(
                Some(Ok(invoice(1, InvoiceStatus::Zaplacona))),
                message,
                reload,
            );
            assert_eq!(
                message.get().success.as_deref(),
                Some("Oznaczono jako zapłaconą.")
            );
            assert_eq!(reload.get(), 1);
        });
    }
}
