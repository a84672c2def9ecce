use leptos::{ev::SubmitEvent, *};

use crate::{
    components::{
        error::MessageBanner,
        forms::{CheckboxField, SelectField, TextField},
        layout::{LoadingSpinner, PageHeader, PageLayout},
    },
    pages::settings::view_model::use_settings_view_model,
};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let vm = use_settings_view_model();
    let form = vm.form;
    let save_pending = vm.save_action.pending();
    let password_pending = vm.password_action.pending();

    let handle_settings_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_settings();
    };
    let handle_password_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_password_change();
    };

    view! {
        <PageLayout>
            <PageHeader title="Ustawienia" subtitle="Firma, KSeF i konto"/>

            <Suspense fallback=|| view! { <LoadingSpinner/> }>
                {move || {
                    vm.settings_resource
                        .get()
                        .map(|result| match result {
                            Ok(_) => ().into_view(),
                            Err(err) => {
                                view! { <div class="alert alert-error">{err.error}</div> }
                                    .into_view()
                            }
                        })
                }}
            </Suspense>

            <div class="card">
                <h3>"Dane firmy i KSeF"</h3>
                <MessageBanner message=vm.message/>
                <form on:submit=handle_settings_submit>
                    <div class="form-row">
                        <TextField label="Nazwa firmy" value=form.firma_nazwa/>
                        <TextField label="NIP firmy" value=form.firma_nip/>
                    </div>
                    <TextField label="Token KSeF" value=form.ksef_token/>
                    <div class="form-row">
                        <SelectField
                            label="Środowisko KSeF"
                            value=form.ksef_environment
                            options=vec![
                                ("production".into(), "Produkcyjne".into()),
                                ("test".into(), "Testowe".into()),
                                ("demo".into(), "Demo".into()),
                            ]
                        />
                        <CheckboxField
                            label="Automatyczne pobieranie z KSeF"
                            value=form.auto_fetch_ksef
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || save_pending.get()>
                        {move || if save_pending.get() { "Zapisywanie..." } else { "Zapisz ustawienia" }}
                    </button>
                </form>
            </div>

            <div class="card">
                <h3>"Zmiana hasła"</h3>
                <MessageBanner message=vm.password_message/>
                <form on:submit=handle_password_submit>
                    <div class="form-row">
                        <TextField
                            label="Obecne hasło"
                            value=vm.old_password
                            input_type="password"
                            required=true
                        />
                        <TextField
                            label="Nowe hasło"
                            value=vm.new_password
                            input_type="password"
                            required=true
                        />
                        <TextField
                            label="Powtórz nowe hasło"
                            value=vm.confirm_password
                            input_type="password"
                            required=true
                        />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || password_pending.get()
                    >
                        {move || if password_pending.get() { "Zmienianie..." } else { "Zmień hasło" }}
                    </button>
                </form>
            </div>
        </PageLayout>
    }
}
