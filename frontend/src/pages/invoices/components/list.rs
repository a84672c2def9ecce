use leptos::*;

use crate::{
    api::{Invoice, InvoiceStatus},
    components::empty_state::EmptyState,
    pages::invoices::view_model::InvoicesViewModel,
    utils::format::{format_date, format_pln},
};

#[component]
pub fn InvoiceList(vm: InvoicesViewModel) -> impl IntoView {
    let invoices = vm.filtered_invoices();

    view! {
        <Show
            when=move || !invoices.get().is_empty()
            fallback=|| {
                view! {
                    <EmptyState
                        title="Brak faktur"
                        description="Dodaj pierwszą fakturę lub pobierz je z KSeF."
                    />
                }
            }
        >
            <table class="table">
                <thead>
                    <tr>
                        <th>"Numer"</th>
                        <th>"Data"</th>
                        <th>"Dostawca"</th>
                        <th>"Kwota"</th>
                        <th>"Termin płatności"</th>
                        <th>"Status"</th>
                        <th>"KSeF"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || invoices.get()
                        key=|invoice| (invoice.id, invoice.updated_at.clone())
                        children=move |invoice: Invoice| {
                            let edit_invoice = invoice.clone();
                            let delete_invoice = invoice.clone();
                            let toggle_invoice = invoice.clone();
                            let overdue = invoice.is_overdue
                                && invoice.status == InvoiceStatus::Niezaplacona;
                            let toggle_label = match invoice.status {
                                InvoiceStatus::Niezaplacona => "Oznacz zapłaconą",
                                InvoiceStatus::Zaplacona => "Oznacz niezapłaconą",
                            };
                            view! {
                                <tr class:row-overdue=overdue>
                                    <td>{invoice.numer.clone()}</td>
                                    <td>{format_date(&invoice.data.format("%Y-%m-%d").to_string())}</td>
                                    <td>
                                        {invoice
                                            .kontrahent_nazwa
                                            .clone()
                                            .unwrap_or_else(|| invoice.dostawca.clone())}
                                    </td>
                                    <td>{format_pln(invoice.kwota)}</td>
                                    <td>
                                        {format_date(
                                            &invoice.termin_platnosci.format("%Y-%m-%d").to_string(),
                                        )}
                                    </td>
                                    <td>
                                        <span class=match invoice.status {
                                            InvoiceStatus::Zaplacona => "badge badge-success",
                                            InvoiceStatus::Niezaplacona => "badge badge-warning",
                                        }>
                                            {invoice.status.label()}
                                        </span>
                                    </td>
                                    <td>
                                        {if invoice.ksef_numer.is_empty() {
                                            "-".to_string()
                                        } else {
                                            invoice.ksef_numer.clone()
                                        }}
                                    </td>
                                    <td class="table-actions">
                                        <button
                                            class="btn btn-sm btn-secondary"
                                            on:click=move |_| vm.toggle_paid(&toggle_invoice)
                                        >
                                            {toggle_label}
                                        </button>
                                        <button
                                            class="btn btn-sm btn-secondary"
                                            on:click=move |_| vm.open_edit_form(&edit_invoice)
                                        >
                                            "Edytuj"
                                        </button>
                                        <button
                                            class="btn btn-sm btn-danger"
                                            on:click=move |_| vm.request_delete(delete_invoice.clone())
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
}
