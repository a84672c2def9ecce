use leptos::{ev::SubmitEvent, *};

use crate::{
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::MessageBanner,
        forms::{CheckboxField, SelectField, TextAreaField, TextField},
        layout::{LoadingSpinner, PageHeader, PageLayout},
    },
    pages::products::view_model::{use_products_view_model, TAX_RATE_OPTIONS, UNIT_OPTIONS},
    utils::format::format_pln,
};

#[component]
pub fn ProductsPage() -> impl IntoView {
    let vm = use_products_view_model();
    let form = vm.form;
    let message = vm.message;
    let pending_delete = vm.pending_delete;
    let products = vm.filtered_products();
    let save_pending = vm.save_action.pending();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_form();
    };

    let delete_message = Signal::derive(move || {
        pending_delete
            .get()
            .map(|product| format!("Czy na pewno chcesz usunąć produkt {}?", product.name))
            .unwrap_or_default()
    });

    let unit_options = UNIT_OPTIONS
        .iter()
        .map(|unit| (unit.to_string(), unit.to_string()))
        .collect::<Vec<_>>();
    let tax_options = TAX_RATE_OPTIONS
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect::<Vec<_>>();

    view! {
        <PageLayout>
            <PageHeader title="Produkty" subtitle="Produkty i usługi"/>

            <div class="card">
                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label">"Szukaj"</label>
                        <input
                            type="text"
                            class="form-control"
                            placeholder="Nazwa lub kod"
                            prop:value=move || vm.search.get()
                            on:input=move |ev| vm.search.set(event_target_value(&ev))
                        />
                    </div>
                    <button class="btn btn-primary" on:click=move |_| vm.open_create_form()>
                        "Dodaj produkt"
                    </button>
                </div>
            </div>

            <MessageBanner message=message/>

            <Show when=move || vm.form_open.get()>
                <div class="card">
                    <h3>
                        {move || {
                            if vm.editing.get().is_some() { "Edytuj produkt" } else { "Nowy produkt" }
                        }}
                    </h3>
                    <form on:submit=handle_submit>
                        <div class="form-row">
                            <TextField label="Kod" value=form.code/>
                            <TextField label="Nazwa" value=form.name required=true/>
                        </div>
                        <div class="form-row">
                            <SelectField label="Jednostka" value=form.unit options=unit_options.clone()/>
                            <TextField label="Cena netto" value=form.unit_price required=true/>
                            <SelectField label="Stawka VAT" value=form.tax_rate options=tax_options.clone()/>
                        </div>
                        <TextAreaField label="Opis" value=form.description/>
                        <CheckboxField label="Aktywny" value=form.is_active/>
                        <div class="button-row">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                on:click=move |_| vm.close_form()
                            >
                                "Anuluj"
                            </button>
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || save_pending.get()
                            >
                                {move || if save_pending.get() { "Zapisywanie..." } else { "Zapisz" }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>

            <div class="card">
                <Suspense fallback=|| view! { <LoadingSpinner/> }>
                    {move || {
                        vm.products_resource
                            .get()
                            .map(|result| match result {
                                Ok(_) => {
                                    view! {
                                        <Show
                                            when=move || !products.get().is_empty()
                                            fallback=|| {
                                                view! {
                                                    <EmptyState
                                                        title="Brak produktów"
                                                        description="Dodaj pierwszy produkt lub usługę."
                                                    />
                                                }
                                            }
                                        >
                                            <table class="table">
                                                <thead>
                                                    <tr>
                                                        <th>"Kod"</th>
                                                        <th>"Nazwa"</th>
                                                        <th>"Jednostka"</th>
                                                        <th>"Cena netto"</th>
                                                        <th>"VAT"</th>
                                                        <th>"Cena brutto"</th>
                                                        <th>"Aktywny"</th>
                                                        <th></th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    <For
                                                        each=move || products.get()
                                                        key=|product| product.id
                                                        children=move |product| {
                                                            let edit_product = product.clone();
                                                            let delete_product = product.clone();
                                                            view! {
                                                                <tr class:row-muted=!product.is_active>
                                                                    <td>{product.code.clone()}</td>
                                                                    <td>{product.name.clone()}</td>
                                                                    <td>{product.unit.clone()}</td>
                                                                    <td>{format_pln(product.unit_price)}</td>
                                                                    <td>{product.tax_rate_display.clone()}</td>
                                                                    <td>{format_pln(product.price_gross)}</td>
                                                                    <td>
                                                                        {if product.is_active { "Tak" } else { "Nie" }}
                                                                    </td>
                                                                    <td class="table-actions">
                                                                        <button
                                                                            class="btn btn-sm btn-secondary"
                                                                            on:click=move |_| {
                                                                                vm.open_edit_form(&edit_product)
                                                                            }
                                                                        >
                                                                            "Edytuj"
                                                                        </button>
                                                                        <button
                                                                            class="btn btn-sm btn-danger"
                                                                            on:click=move |_| {
                                                                                vm.request_delete(delete_product.clone())
                                                                            }
                                                                        >
                                                                            "Usuń"
                                                                        </button>
                                                                    </td>
                                                                </tr>
                                                            }
                                                        }
                                                    />
                                                </tbody>
                                            </table>
                                        </Show>
                                    }
                                    .into_view()
                                }
                                Err(err) => {
                                    view! { <div class="alert alert-error">{err.error}</div> }
                                        .into_view()
                                }
                            })
                    }}
                </Suspense>
            </div>

            <ConfirmDialog
                is_open=Signal::derive(move || pending_delete.get().is_some())
                title="Usuń produkt"
                message=delete_message
                destructive=true
                confirm_label="Usuń"
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </PageLayout>
    }
}
