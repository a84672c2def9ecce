use leptos::*;

use crate::api::{ApiClient, ApiError, Contractor, ContractorPayload};
use crate::pages::contractors::repository::ContractorsRepository;
use crate::utils::format::matches_search;
use crate::utils::message::MessageState;

/// Signal-backed state of the contractor editor.
#[derive(Clone, Copy)]
pub struct ContractorFormState {
    pub nazwa: RwSignal<String>,
    pub nip: RwSignal<String>,
    pub ulica: RwSignal<String>,
    pub miasto: RwSignal<String>,
    pub kod_pocztowy: RwSignal<String>,
    pub kraj: RwSignal<String>,
    pub email: RwSignal<String>,
    pub telefon: RwSignal<String>,
    pub notatki: RwSignal<String>,
}

impl Default for ContractorFormState {
    fn default() -> Self {
        Self {
            nazwa: create_rw_signal(String::new()),
            nip: create_rw_signal(String::new()),
            ulica: create_rw_signal(String::new()),
            miasto: create_rw_signal(String::new()),
            kod_pocztowy: create_rw_signal(String::new()),
            kraj: create_rw_signal("Polska".to_string()),
            email: create_rw_signal(String::new()),
            telefon: create_rw_signal(String::new()),
            notatki: create_rw_signal(String::new()),
        }
    }
}

impl ContractorFormState {
    pub fn reset(&self) {
        self.nazwa.set(String::new());
        self.nip.set(String::new());
        self.ulica.set(String::new());
        self.miasto.set(String::new());
        self.kod_pocztowy.set(String::new());
        self.kraj.set("Polska".to_string());
        self.email.set(String::new());
        self.telefon.set(String::new());
        self.notatki.set(String::new());
    }

    pub fn load_from(&self, contractor: &Contractor) {
        self.nazwa.set(contractor.nazwa.clone());
        self.nip.set(contractor.nip.clone());
        self.ulica.set(contractor.ulica.clone());
        self.miasto.set(contractor.miasto.clone());
        self.kod_pocztowy.set(contractor.kod_pocztowy.clone());
        self.kraj.set(contractor.kraj.clone());
        self.email.set(contractor.email.clone());
        self.telefon.set(contractor.telefon.clone());
        self.notatki.set(contractor.notatki.clone());
    }

    pub fn to_payload(&self) -> Result<ContractorPayload, ApiError> {
        let nazwa = self.nazwa.get_untracked().trim().to_string();
        if nazwa.is_empty() {
            return Err(ApiError::validation("Nazwa kontrahenta jest wymagana"));
        }
        Ok(ContractorPayload {
            nazwa,
            nip: self.nip.get_untracked().trim().to_string(),
            ulica: self.ulica.get_untracked().trim().to_string(),
            miasto: self.miasto.get_untracked().trim().to_string(),
            kod_pocztowy: self.kod_pocztowy.get_untracked().trim().to_string(),
            kraj: self.kraj.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            telefon: self.telefon.get_untracked().trim().to_string(),
            notatki: self.notatki.get_untracked().trim().to_string(),
        })
    }
}

#[derive(Clone)]
pub struct ContractorSavePayload {
    pub id: Option<i64>,
    pub payload: ContractorPayload,
}

#[derive(Clone, Copy)]
pub struct ContractorsViewModel {
    pub form: ContractorFormState,
    pub search: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub pending_delete: RwSignal<Option<Contractor>>,
    pub contractors_resource: Resource<u32, Result<Vec<Contractor>, ApiError>>,
    pub save_action: Action<ContractorSavePayload, Result<Contractor, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    reload: RwSignal<u32>,
}

fn apply_save_result(
    result: Option<Result<Contractor, ApiError>>,
    message: RwSignal<MessageState>,
    form_open: RwSignal<bool>,
    editing: RwSignal<Option<i64>>,
    form: ContractorFormState,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                message.update(|m| m.set_success("Zapisano kontrahenta."));
                form_open.set(false);
                editing.set(None);
                form.reset();
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|m| m.set_error(err)),
        }
    }
}

/// On a business error (contractor referenced by invoices) the list is left
/// untouched: no reload happens and the server message is shown.
fn apply_delete_result(
    result: Option<Result<(), ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                message.update(|m| m.set_success("Usunięto kontrahenta."));
                reload.update(|value| *value = value.wrapping_add(1));
            }
            Err(err) => message.update(|m| m.set_error(err)),
        }
    }
}

impl ContractorsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(ContractorsRepository::new(api));

        let form = ContractorFormState::default();
        let search = create_rw_signal(String::new());
        let message = create_rw_signal(MessageState::default());
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<i64>);
        let pending_delete = create_rw_signal(None::<Contractor>);
        let reload = create_rw_signal(0u32);

        let contractors_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list().await }
            },
        );

        let save_action = create_action(move |payload: &ContractorSavePayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(payload.id, &payload.payload).await }
        });

        let delete_action = create_action(move |id: &i64| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.delete(id).await }
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

        Self {
            form,
            search,
            message,
            form_open,
            editing,
            pending_delete,
            contractors_resource,
            save_action,
            delete_action,
            reload,
        }
    }

    pub fn filtered_contractors(&self) -> Signal<Vec<Contractor>> {
        let resource = self.contractors_resource;
        let all = create_memo(move |_| {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        });
        let search = self.search;
        Signal::derive(move || {
            let needle = search.get();
            all.with(|contractors| {
                contractors
                    .iter()
                    .filter(|contractor| {
                        matches_search(&contractor.nazwa, &needle)
                            || matches_search(&contractor.nip, &needle)
                    })
                    .cloned()
                    .collect()
            })
        })
    }

    pub fn open_create_form(&self) {
        self.form.reset();
        self.editing.set(None);
        self.message.update(|m| m.clear());
        self.form_open.set(true);
    }

    pub fn open_edit_form(&self, contractor: &Contractor) {
        self.form.load_from(contractor);
        self.editing.set(Some(contractor.id));
        self.message.update(|m| m.clear());
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
        self.editing.set(None);
        self.form.reset();
    }

    pub fn submit_form(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        match self.form.to_payload() {
            Ok(payload) => self.save_action.dispatch(ContractorSavePayload {
                id: self.editing.get_untracked(),
                payload,
            }),
            Err(err) => self.message.update(|m| m.set_error(err)),
        }
    }

    pub fn request_delete(&self, contractor: Contractor) {
        self.pending_delete.set(Some(contractor));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(contractor) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(contractor.id);
        }
    }
}

pub fn use_contractors_view_model() -> ContractorsViewModel {
    match use_context::<ContractorsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ContractorsViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    fn contractor(id: i64, nazwa: &str, nip: &str) -> Contractor {
        Contractor {
            id,
            nazwa: nazwa.to_string(),
            nip: nip.to_string(),
            ulica: String::new(),
            miasto: String::new(),
            kod_pocztowy: String::new(),
            kraj: "Polska".to_string(),
            email: String::new(),
            telefon: String::new(),
            notatki: String::new(),
            pelny_adres: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn form_requires_a_name() {
        with_runtime(|| {
            let form = ContractorFormState::default();
            assert_eq!(form.to_payload().unwrap_err().code, "VALIDATION_ERROR");

            form.nazwa.set("Biuro Rachunkowe ALFA".into());
            form.nip.set(" 1234567890 ".into());
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.nip, "1234567890");
            assert_eq!(payload.kraj, "Polska");
        });
    }

    #[test]
    fn form_round_trips_a_contractor() {
        with_runtime(|| {
            let form = ContractorFormState::default();
            form.load_from(&contractor(1, "Biuro ALFA", "1234567890"));
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.nazwa, "Biuro ALFA");

            form.reset();
            assert!(form.nazwa.get().is_empty());
            assert_eq!(form.kraj.get(), "Polska");
        });
    }

    #[test]
    fn delete_business_error_keeps_list_unreloaded() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let reload = create_rw_signal(0u32);

            apply_delete_result(
                Some(Err(ApiError::unknown(
                    "Nie można usunąć kontrahenta - jest powiązany z fakturami",
                ))),
                message,
                reload,
            );
            assert_eq!(reload.get(), 0);
            assert!(message
                .get()
                .error
                .map(|e| e.error.contains("powiązany z fakturami"))
                .unwrap_or(false));

            apply_delete_result(Some(Ok(())), message, reload);
            assert_eq!(reload.get(), 1);
        });
    }

    #[test]
    fn save_result_closes_form_and_reloads() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let form_open = create_rw_signal(true);
            let editing = create_rw_signal(Some(1i64));
            let form = ContractorFormState::default();
            let reload = create_rw_signal(0u32);

            apply_save_result(
                Some(Ok(contractor(1, "Biuro", "123"))),
                message,
                form_open,
                editing,
                form,
                reload,
            );
            assert!(!form_open.get());
            assert!(editing.get().is_none());
            assert_eq!(reload.get(), 1);
        });
    }
}
