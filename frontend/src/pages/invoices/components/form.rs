use leptos::{ev::SubmitEvent, *};

use crate::{
    components::forms::{DateField, SelectField, TextAreaField, TextField},
    pages::invoices::view_model::InvoicesViewModel,
};

#[component]
pub fn InvoiceForm(vm: InvoicesViewModel) -> impl IntoView {
    let form = vm.form;
    let pending = vm.save_action.pending();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_form();
    };

    let title = move || {
        if vm.editing.get().is_some() {
            "Edytuj fakturę"
        } else {
            "Nowa faktura"
        }
    };

    view! {
        <Show when=move || vm.form_open.get()>
            <div class="card">
                <h3>{title}</h3>
                <form on:submit=handle_submit>
                    <div class="form-row">
                        <TextField label="Numer faktury" value=form.numer required=true/>
                        <TextField label="Dostawca" value=form.dostawca required=true/>
                    </div>
                    <div class="form-row">
                        <DateField label="Data wystawienia" value=form.data required=true/>
                        <DateField label="Termin płatności" value=form.termin_platnosci required=true/>
                    </div>
                    <div class="form-row">
                        <TextField label="Kwota brutto" value=form.kwota required=true/>
                        <SelectField
                            label="Status"
                            value=form.status
                            options=vec![
                                ("niezaplacona".into(), "Niezapłacona".into()),
                                ("zaplacona".into(), "Zapłacona".into()),
                            ]
                        />
                    </div>
                    <div class="form-row">
                        <TextField label="Numer KSeF" value=form.ksef_numer/>
                        <TextField label="Kontrahent (id)" value=form.kontrahent/>
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
                        <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                            {move || if pending.get() { "Zapisywanie..." } else { "Zapisz" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
