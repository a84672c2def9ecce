use leptos::{ev::SubmitEvent, *};

use crate::{
    components::{
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::MessageBanner,
        forms::{TextAreaField, TextField},
        layout::{LoadingSpinner, PageHeader, PageLayout},
    },
    pages::contractors::view_model::use_contractors_view_model,
};

#[component]
pub fn ContractorsPage() -> impl IntoView {
    let vm = use_contractors_view_model();
    let form = vm.form;
    let message = vm.message;
    let pending_delete = vm.pending_delete;
    let contractors = vm.filtered_contractors();
    let save_pending = vm.save_action.pending();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_form();
    };

    let delete_message = Signal::derive(move || {
        pending_delete
            .get()
            .map(|contractor| {
                format!("Czy na pewno chcesz usunąć kontrahenta {}?", contractor.nazwa)
            })
            .unwrap_or_default()
    });

    view! {
        <PageLayout>
            <PageHeader title="Kontrahenci" subtitle="Dostawcy i wystawcy faktur"/>

            <div class="card">
                <div class="form-row">
                    <div class="form-group">
                        <label class="form-label">"Szukaj"</label>
                        <input
                            type="text"
                            class="form-control"
                            placeholder="Nazwa lub NIP"
                            prop:value=move || vm.search.get()
                            on:input=move |ev| vm.search.set(event_target_value(&ev))
                        />
                    </div>
                    <button class="btn btn-primary" on:click=move |_| vm.open_create_form()>
                        "Dodaj kontrahenta"
                    </button>
                </div>
            </div>

            <MessageBanner message=message/>

            <Show when=move || vm.form_open.get()>
                <div class="card">
                    <h3>
                        {move || {
                            if vm.editing.get().is_some() {
                                "Edytuj kontrahenta"
                            } else {
                                "Nowy kontrahent"
                            }
                        }}
                    </h3>
                    <form on:submit=handle_submit>
                        <div class="form-row">
                            <TextField label="Nazwa" value=form.nazwa required=true/>
                            <TextField label="NIP" value=form.nip/>
                        </div>
                        <div class="form-row">
                            <TextField label="Ulica" value=form.ulica/>
                            <TextField label="Miasto" value=form.miasto/>
                            <TextField label="Kod pocztowy" value=form.kod_pocztowy/>
                            <TextField label="Kraj" value=form.kraj/>
                        </div>
                        <div class="form-row">
                            <TextField label="Email" value=form.email input_type="email"/>
                            <TextField label="Telefon" value=form.telefon/>
                        </div>
                        <TextAreaField label="Notatki" value=form.notatki/>
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
                        vm.contractors_resource
                            .get()
                            .map(|result| match result {
                                Ok(_) => {
                                    view! {
                                        <Show
                                            when=move || !contractors.get().is_empty()
                                            fallback=|| {
                                                view! {
                                                    <EmptyState
                                                        title="Brak kontrahentów"
                                                        description="Dodaj pierwszego kontrahenta."
                                                    />
                                                }
                                            }
                                        >
                                            <table class="table">
                                                <thead>
                                                    <tr>
                                                        <th>"Nazwa"</th>
                                                        <th>"NIP"</th>
                                                        <th>"Adres"</th>
                                                        <th>"Kontakt"</th>
                                                        <th></th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    <For
                                                        each=move || contractors.get()
                                                        key=|contractor| contractor.id
                                                        children=move |contractor| {
                                                            let edit_contractor = contractor.clone();
                                                            let delete_contractor = contractor.clone();
                                                            view! {
                                                                <tr>
                                                                    <td>{contractor.nazwa.clone()}</td>
                                                                    <td>{contractor.nip.clone()}</td>
                                                                    <td>{contractor.pelny_adres.clone()}</td>
                                                                    <td>{contractor.email.clone()}</td>
                                                                    <td class="table-actions">
                                                                        <button
                                                                            class="btn btn-sm btn-secondary"
                                                                            on:click=move |_| {
                                                                                vm.open_edit_form(&edit_contractor)
                                                                            }
                                                                        >
                                                                            "Edytuj"
                                                                        </button>
                                                                        <button
                                                                            class="btn btn-sm btn-danger"
                                                                            on:click=move |_| {
                                                                                vm.request_delete(delete_contractor.clone())
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
                title="Usuń kontrahenta"
                message=delete_message
                destructive=true
                confirm_label="Usuń"
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </PageLayout>
    }
}
