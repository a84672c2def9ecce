use leptos::*;

use crate::api::{ApiClient, ApiError, Customer};
use crate::pages::contractors::view_model::ContractorFormState;
use crate::pages::customers::repository::CustomersRepository;
use crate::utils::format::matches_search;
use crate::utils::message::MessageState;

// Customers share the contractor wire shape, so the editor form state is the
// contractor one; only the endpoints differ.
#[derive(Clone)]
pub struct CustomerSavePayload {
    pub id: Option<i64>,
    pub payload: crate::api::ContractorPayload,
}

#[derive(Clone, Copy)]
pub struct CustomersViewModel {
    pub form: ContractorFormState,
    pub search: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub pending_delete: RwSignal<Option<Customer>>,
    pub customers_resource: Resource<u32, Result<Vec<Customer>, ApiError>>,
    pub save_action: Action<CustomerSavePayload, Result<Customer, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    reload: RwSignal<u32>,
}

impl CustomersViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(CustomersRepository::new(api));

        let form = ContractorFormState::default();
        let search = create_rw_signal(String::new());
        let message = create_rw_signal(MessageState::default());
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<i64>);
        let pending_delete = create_rw_signal(None::<Customer>);
        let reload = create_rw_signal(0u32);

        let customers_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list().await }
            },
        );

        let save_action = create_action(move |payload: &CustomerSavePayload| {
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
                if let Some(result) = save_action.value().get() {
                    match result {
                        Ok(_) => {
                            message.update(|m| m.set_success("Zapisano klienta."));
                            form_open.set(false);
                            editing.set(None);
                            form.reset();
                            reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        {
            create_effect(move |_| {
                if let Some(result) = delete_action.value().get() {
                    match result {
                        Ok(_) => {
                            message.update(|m| m.set_success("Usunięto klienta."));
                            reload.update(|value| *value = value.wrapping_add(1));
                        }
                        Err(err) => message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        Self {
            form,
            search,
            message,
            form_open,
            editing,
            pending_delete,
            customers_resource,
            save_action,
            delete_action,
            reload,
        }
    }

    pub fn filtered_customers(&self) -> Signal<Vec<Customer>> {
        let resource = self.customers_resource;
        let all = create_memo(move |_| {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        });
        let search = self.search;
        Signal::derive(move || {
            let needle = search.get();
            all.with(|customers| {
                customers
                    .iter()
                    .filter(|customer| {
                        matches_search(&customer.nazwa, &needle)
                            || matches_search(&customer.nip, &needle)
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

    pub fn open_edit_form(&self, customer: &Customer) {
        self.form.nazwa.set(customer.nazwa.clone());
        self.form.nip.set(customer.nip.clone());
        self.form.ulica.set(customer.ulica.clone());
        self.form.miasto.set(customer.miasto.clone());
        self.form.kod_pocztowy.set(customer.kod_pocztowy.clone());
        self.form.kraj.set(customer.kraj.clone());
        self.form.email.set(customer.email.clone());
        self.form.telefon.set(customer.telefon.clone());
        self.form.notatki.set(customer.notatki.clone());
        self.editing.set(Some(customer.id));
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
            Ok(payload) => self.save_action.dispatch(CustomerSavePayload {
                id: self.editing.get_untracked(),
                payload,
            }),
            Err(err) => self.message.update(|m| m.set_error(err)),
        }
    }

    pub fn request_delete(&self, customer: Customer) {
        self.pending_delete.set(Some(customer));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(customer) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(customer.id);
        }
    }
}

pub fn use_customers_view_model() -> CustomersViewModel {
    match use_context::<CustomersViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = CustomersViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
