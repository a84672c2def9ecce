use leptos::*;

use crate::{
    components::{
        confirm_dialog::ConfirmDialog,
        error::MessageBanner,
        layout::{LoadingSpinner, PageHeader, PageLayout},
    },
    pages::invoices::{
        components::{form::InvoiceForm, list::InvoiceList},
        view_model::use_invoices_view_model,
    },
};

#[component]
pub fn InvoicesPage() -> impl IntoView {
    let vm = use_invoices_view_model();
    let message = vm.message;
    let pending_delete = vm.pending_delete;

    let delete_message = Signal::derive(move || {
        pending_delete
            .get()
            .map(|invoice| format!("Czy na pewno chcesz usunąć fakturę {}?", invoice.numer))
            .unwrap_or_default()
    });

    let years = move || {
        vm.years_resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    };

    view! {
        <PageLayout>
            <PageHeader title="Faktury" subtitle="Faktury kosztowe"/>

            <div class="card">
                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label">"Szukaj"</label>
                        <input
                            type="text"
                            class="form-control"
                            placeholder="Numer, dostawca lub numer KSeF"
                            prop:value=move || vm.search.get()
                            on:input=move |ev| vm.search.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Status"</label>
                        <select
                            class="form-control"
                            on:change=move |ev| vm.status_filter.set(event_target_value(&ev))
                        >
                            <option value="">"Wszystkie"</option>
                            <option value="niezaplacona">"Niezapłacone"</option>
                            <option value="zaplacona">"Zapłacone"</option>
                        </select>
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Rok"</label>
                        <select
                            class="form-control"
                            on:change=move |ev| vm.year_filter.set(event_target_value(&ev))
                        >
                            <option value="">"Wszystkie"</option>
                            {move || {
                                years()
                                    .into_iter()
                                    .map(|year| {
                                        view! {
                                            <option value=year.to_string()>{year.to_string()}</option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <button class="btn btn-primary" on:click=move |_| vm.open_create_form()>
                        "Dodaj fakturę"
                    </button>
                </div>
            </div>

            <MessageBanner message=message/>
            <InvoiceForm vm=vm/>

            <div class="card">
                <Suspense fallback=|| view! { <LoadingSpinner/> }>
                    {move || {
                        vm.invoices_resource
                            .get()
                            .map(|result| match result {
                                Ok(_) => view! { <InvoiceList vm=vm/> }.into_view(),
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
                title="Usuń fakturę"
                message=delete_message
                destructive=true
                confirm_label="Usuń"
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </PageLayout>
    }
}
