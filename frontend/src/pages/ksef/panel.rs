use leptos::*;

use crate::{
    components::{
        error::MessageBanner,
        forms::DateField,
        layout::{PageHeader, PageLayout},
    },
    pages::ksef::view_model::use_ksef_view_model,
    utils::format::{format_date, format_pln},
};

#[component]
pub fn KsefPage() -> impl IntoView {
    let vm = use_ksef_view_model();
    let workflow = vm.workflow;
    let message = vm.message;

    let fetch_pending = vm.fetch_action.pending();
    let import_pending = vm.import_action.pending();

    let configured = {
        let vm = vm.clone();
        create_memo(move |_| vm.is_configured())
    };
    let settings_snapshot = {
        let vm = vm.clone();
        move || vm.settings()
    };

    let on_fetch = {
        let vm = vm.clone();
        move |_| vm.dispatch_fetch()
    };
    let on_import = {
        let vm = vm.clone();
        move |_| vm.dispatch_import()
    };
    let on_select_all = {
        let vm = vm.clone();
        move |_| vm.select_all()
    };
    let on_deselect_all = {
        let vm = vm.clone();
        move |_| vm.deselect_all()
    };

    let quick_buttons = {
        let vm = vm.clone();
        [
            ("Ostatnie 7 dni", 7i64),
            ("Ostatnie 30 dni", 30),
            ("Ostatnie 90 dni", 90),
        ]
        .into_iter()
        .map(|(label, days)| {
            let vm = vm.clone();
            view! {
                <button
                    type="button"
                    class="btn btn-sm btn-secondary"
                    on:click=move |_| vm.set_quick_range(days)
                >
                    {label}
                </button>
            }
        })
        .collect_view()
    };

    let month_buttons = {
        let current_vm = vm.clone();
        let previous_vm = vm.clone();
        view! {
            <button
                type="button"
                class="btn btn-sm btn-secondary"
                on:click=move |_| current_vm.set_month_range(false)
            >
                "Bieżący miesiąc"
            </button>
            <button
                type="button"
                class="btn btn-sm btn-secondary"
                on:click=move |_| previous_vm.set_month_range(true)
            >
                "Poprzedni miesiąc"
            </button>
        }
    };

    let toggle_vm = store_value(vm.clone());

    view! {
        <PageLayout>
            <PageHeader
                title="KSeF"
                subtitle="Krajowy System e-Faktur - pobieranie faktur kosztowych"
            />

            <div class="card">
                <h3>"Status połączenia"</h3>
                <Show
                    when=move || configured.get()
                    fallback=|| {
                        view! {
                            <div class="alert alert-warning">
                                <strong>"Uwaga: "</strong>
                                "Aby pobierać faktury, przejdź do "
                                <a href="/settings">"Ustawień"</a>
                                " i skonfiguruj token KSeF oraz NIP firmy."
                            </div>
                        }
                    }
                >
                    <div class="status-grid">
                        <div class="stat-card stat-ok">"Skonfigurowano"</div>
                        {
                            let settings_snapshot = settings_snapshot.clone();
                            move || {
                            settings_snapshot().map(|settings| {
                                view! {
                                    <div class="stat-card">
                                        <div class="stat-label">"NIP firmy"</div>
                                        <div class="stat-value">{settings.firma_nip.clone()}</div>
                                    </div>
                                    <div class="stat-card">
                                        <div class="stat-label">"Środowisko"</div>
                                        <div class="stat-value">
                                            {settings.ksef_environment.label()}
                                        </div>
                                    </div>
                                }
                            })
                        }}
                    </div>
                </Show>
            </div>

            <div class="card">
                <h3>"Pobierz faktury"</h3>
                <p>
                    "Wybierz zakres dat, z którego chcesz pobrać faktury kosztowe z \
                     Krajowego Systemu e-Faktur."
                </p>
                <div class="form-row">
                    <DateField label="Data od" value=vm.date_from/>
                    <DateField label="Data do" value=vm.date_to/>
                    <button
                        class="btn btn-primary"
                        on:click=on_fetch
                        disabled=move || {
                            fetch_pending.get() || import_pending.get() || !configured.get()
                        }
                    >
                        {move || if fetch_pending.get() { "Pobieranie..." } else { "Pobierz z KSeF" }}
                    </button>
                </div>
                <div class="button-row">
                    {quick_buttons}
                    {month_buttons}
                </div>
            </div>

            <MessageBanner message=message/>

            <Show when=move || workflow.get().has_results()>
                <div class="card">
                    <div class="card-header-row">
                        <h3>
                            {move || {
                                format!("Znalezione faktury ({})", workflow.get().candidates().len())
                            }}
                        </h3>
                        <div class="button-row">
                            <button
                                type="button"
                                class="btn btn-sm btn-secondary"
                                on:click=on_select_all.clone()
                            >
                                "Zaznacz wszystkie"
                            </button>
                            <button
                                type="button"
                                class="btn btn-sm btn-secondary"
                                on:click=on_deselect_all.clone()
                            >
                                "Odznacz wszystkie"
                            </button>
                            <button
                                class="btn btn-primary"
                                on:click=on_import.clone()
                                disabled=move || {
                                    import_pending.get() || workflow.get().selected_count() == 0
                                }
                            >
                                {move || {
                                    if import_pending.get() {
                                        "Importowanie...".to_string()
                                    } else {
                                        format!(
                                            "Importuj zaznaczone ({})",
                                            workflow.get().selected_count()
                                        )
                                    }
                                }}
                            </button>
                        </div>
                    </div>
                    <Show
                        when=move || !workflow.get().candidates().is_empty()
                        fallback=|| {
                            view! {
                                <p class="empty-state-description">
                                    "Brak faktur w wybranym okresie."
                                </p>
                            }
                        }
                    >
                        <table class="table">
                            <thead>
                                <tr>
                                    <th></th>
                                    <th>"Numer"</th>
                                    <th>"Data"</th>
                                    <th>"Dostawca"</th>
                                    <th>"NIP"</th>
                                    <th>"Kwota"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || workflow.get().candidates().to_vec()
                                    key=|candidate| candidate.ksef_numer.clone()
                                    children=move |candidate| {
                                        let id = candidate.ksef_numer.clone();
                                        let toggle_id = id.clone();
                                        let checked_id = id.clone();
                                        view! {
                                            <tr class:row-muted=candidate.already_exists>
                                                <td>
                                                    <input
                                                        type="checkbox"
                                                        disabled=candidate.already_exists
                                                        prop:checked=move || {
                                                            workflow.get().is_selected(&checked_id)
                                                        }
                                                        on:change=move |_| toggle_vm.get_value().toggle(&toggle_id)
                                                    />
                                                </td>
                                                <td>{candidate.numer.clone()}</td>
                                                <td>{format_date(&candidate.data)}</td>
                                                <td>{candidate.dostawca.clone()}</td>
                                                <td>{candidate.dostawca_nip.clone()}</td>
                                                <td>{format_pln(candidate.kwota)}</td>
                                                <td>
                                                    {if candidate.already_exists {
                                                        "Już w systemie"
                                                    } else {
                                                        "Nowa"
                                                    }}
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </div>
            </Show>
        </PageLayout>
    }
}
