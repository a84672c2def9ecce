use leptos::*;

use crate::api::{ApiClient, ApiError, Product, ProductPayload};
use crate::pages::invoices::utils::parse_kwota;
use crate::pages::products::repository::ProductsRepository;
use crate::utils::format::matches_search;
use crate::utils::message::MessageState;

/// Units and VAT rates offered by the product editor, as the backend
/// defines them.
pub const UNIT_OPTIONS: &[&str] = &["szt.", "kg", "m", "m2", "m3", "l", "godz.", "usł."];
pub const TAX_RATE_OPTIONS: &[(i32, &str)] =
    &[(23, "23%"), (8, "8%"), (5, "5%"), (0, "0%"), (-1, "zw.")];

#[derive(Clone, Copy)]
pub struct ProductFormState {
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub unit: RwSignal<String>,
    pub unit_price: RwSignal<String>,
    pub tax_rate: RwSignal<String>,
    pub is_active: RwSignal<bool>,
}

impl Default for ProductFormState {
    fn default() -> Self {
        Self {
            code: create_rw_signal(String::new()),
            name: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            unit: create_rw_signal("szt.".to_string()),
            unit_price: create_rw_signal(String::new()),
            tax_rate: create_rw_signal("23".to_string()),
            is_active: create_rw_signal(true),
        }
    }
}

impl ProductFormState {
    pub fn reset(&self) {
        self.code.set(String::new());
        self.name.set(String::new());
        self.description.set(String::new());
        self.unit.set("szt.".to_string());
        self.unit_price.set(String::new());
        self.tax_rate.set("23".to_string());
        self.is_active.set(true);
    }

    pub fn load_from(&self, product: &Product) {
        self.code.set(product.code.clone());
        self.name.set(product.name.clone());
        self.description.set(product.description.clone());
        self.unit.set(product.unit.clone());
        self.unit_price.set(format!("{:.2}", product.unit_price));
        self.tax_rate.set(product.tax_rate.to_string());
        self.is_active.set(product.is_active);
    }

    pub fn to_payload(&self) -> Result<ProductPayload, ApiError> {
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("Nazwa produktu jest wymagana"));
        }
        let unit_price = parse_kwota(&self.unit_price.get_untracked())?;
        let tax_rate: i32 = self
            .tax_rate
            .get_untracked()
            .parse()
            .map_err(|_| ApiError::validation("Nieprawidłowa stawka VAT"))?;
        Ok(ProductPayload {
            code: self.code.get_untracked().trim().to_string(),
            name,
            description: self.description.get_untracked().trim().to_string(),
            unit: self.unit.get_untracked(),
            unit_price,
            tax_rate,
            is_active: self.is_active.get_untracked(),
        })
    }
}

#[derive(Clone)]
pub struct ProductSavePayload {
    pub id: Option<i64>,
    pub payload: ProductPayload,
}

#[derive(Clone, Copy)]
pub struct ProductsViewModel {
    pub form: ProductFormState,
    pub search: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub form_open: RwSignal<bool>,
    pub editing: RwSignal<Option<i64>>,
    pub pending_delete: RwSignal<Option<Product>>,
    pub products_resource: Resource<u32, Result<Vec<Product>, ApiError>>,
    pub save_action: Action<ProductSavePayload, Result<Product, ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    reload: RwSignal<u32>,
}

impl ProductsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(ProductsRepository::new(api));

        let form = ProductFormState::default();
        let search = create_rw_signal(String::new());
        let message = create_rw_signal(MessageState::default());
        let form_open = create_rw_signal(false);
        let editing = create_rw_signal(None::<i64>);
        let pending_delete = create_rw_signal(None::<Product>);
        let reload = create_rw_signal(0u32);

        let products_resource = create_resource(
            move || reload.get(),
            move |_| {
                let repo = repository.get_value();
                async move { repo.list().await }
            },
        );

        let save_action = create_action(move |payload: &ProductSavePayload| {
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
                            message.update(|m| m.set_success("Zapisano produkt."));
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
                            message.update(|m| m.set_success("Usunięto produkt."));
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
            products_resource,
            save_action,
            delete_action,
            reload,
        }
    }

    pub fn filtered_products(&self) -> Signal<Vec<Product>> {
        let resource = self.products_resource;
        let all = create_memo(move |_| {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        });
        let search = self.search;
        Signal::derive(move || {
            let needle = search.get();
            all.with(|products| {
                products
                    .iter()
                    .filter(|product| {
                        matches_search(&product.name, &needle)
                            || matches_search(&product.code, &needle)
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

    pub fn open_edit_form(&self, product: &Product) {
        self.form.load_from(product);
        self.editing.set(Some(product.id));
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
            Ok(payload) => self.save_action.dispatch(ProductSavePayload {
                id: self.editing.get_untracked(),
                payload,
            }),
            Err(err) => self.message.update(|m| m.set_error(err)),
        }
    }

    pub fn request_delete(&self, product: Product) {
        self.pending_delete.set(Some(product));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(product) = self.pending_delete.get_untracked() {
            self.pending_delete.set(None);
            self.delete_action.dispatch(product.id);
        }
    }
}

pub fn use_products_view_model() -> ProductsViewModel {
    match use_context::<ProductsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ProductsViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn product_form_validates_name_price_and_tax_rate() {
        with_runtime(|| {
            let form = ProductFormState::default();
            assert!(form.to_payload().is_err());

            form.name.set("Obsługa księgowa".into());
            form.unit_price.set("500,00".into());
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.unit_price, 500.0);
            assert_eq!(payload.tax_rate, 23);
            assert!(payload.is_active);

            // Exempt rate from the backend's choices.
            form.tax_rate.set("-1".into());
            assert_eq!(form.to_payload().unwrap().tax_rate, -1);

            form.tax_rate.set("zw.".into());
            assert!(form.to_payload().is_err());
        });
    }
}
