use leptos::*;

use crate::{
    api::ApiClient,
    components::layout::{LoadingSpinner, PageHeader, PageLayout},
    pages::dashboard::repository::DashboardRepository,
    utils::format::{format_date, format_pln},
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(DashboardRepository::new(api));

    let stats_resource = create_resource(
        || 0u32,
        move |_| {
            let repo = repository.get_value();
            async move { repo.load_stats().await }
        },
    );
    let recent_resource = create_resource(
        || 0u32,
        move |_| {
            let repo = repository.get_value();
            async move { repo.load_recent_invoices(5).await }
        },
    );

    view! {
        <PageLayout>
            <PageHeader title="Pulpit" subtitle="Podsumowanie faktur kosztowych"/>

            <Suspense fallback=|| view! { <LoadingSpinner/> }>
                {move || {
                    stats_resource
                        .get()
                        .map(|result| match result {
                            Ok(stats) => {
                                view! {
                                    <div class="stats-grid">
                                        <div class="stat-card">
                                            <div class="stat-label">"Wszystkie faktury"</div>
                                            <div class="stat-value">{stats.total_count}</div>
                                            <div class="stat-detail">
                                                {format_pln(stats.suma_wszystkich)}
                                            </div>
                                        </div>
                                        <div class="stat-card stat-ok">
                                            <div class="stat-label">"Zapłacone"</div>
                                            <div class="stat-value">{stats.zaplacone_count}</div>
                                            <div class="stat-detail">
                                                {format_pln(stats.suma_zaplaconych)}
                                            </div>
                                        </div>
                                        <div class="stat-card stat-warning">
                                            <div class="stat-label">"Niezapłacone"</div>
                                            <div class="stat-value">{stats.niezaplacone_count}</div>
                                            <div class="stat-detail">
                                                {format_pln(stats.suma_niezaplaconych)}
                                            </div>
                                        </div>
                                        <div class="stat-card stat-danger">
                                            <div class="stat-label">"Przeterminowane"</div>
                                            <div class="stat-value">
                                                {stats.przeterminowane_count}
                                            </div>
                                            <div class="stat-detail">
                                                {format_pln(stats.suma_przeterminowanych)}
                                            </div>
                                        </div>
                                    </div>
                                }
                                .into_view()
                            }
                            Err(err) => view! {
                                <div class="alert alert-error">{err.error}</div>
                            }
                            .into_view(),
                        })
                }}
            </Suspense>

            <div class="card">
                <h3>"Ostatnie faktury"</h3>
                <Suspense fallback=|| view! { <LoadingSpinner/> }>
                    {move || {
                        recent_resource
                            .get()
                            .map(|result| match result {
                                Ok(invoices) if invoices.is_empty() => view! {
                                    <p class="empty-state-description">"Brak faktur."</p>
                                }
                                .into_view(),
                                Ok(invoices) => view! {
                                    <table class="table">
                                        <thead>
                                            <tr>
                                                <th>"Numer"</th>
                                                <th>"Data"</th>
                                                <th>"Dostawca"</th>
                                                <th>"Kwota"</th>
                                                <th>"Status"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {invoices
                                                .into_iter()
                                                .map(|invoice| {
                                                    view! {
                                                        <tr>
                                                            <td>{invoice.numer.clone()}</td>
                                                            <td>
                                                                {format_date(
                                                                    &invoice.data.format("%Y-%m-%d").to_string(),
                                                                )}
                                                            </td>
                                                            <td>{invoice.dostawca.clone()}</td>
                                                            <td>{format_pln(invoice.kwota)}</td>
                                                            <td>{invoice.status.label()}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                .into_view(),
                                Err(err) => view! {
                                    <div class="alert alert-error">{err.error}</div>
                                }
                                .into_view(),
                            })
                    }}
                </Suspense>
            </div>
        </PageLayout>
    }
}
