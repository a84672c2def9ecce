use leptos::{ev::SubmitEvent, *};

use crate::{
    components::{
        confirm_dialog::ConfirmDialog,
        error::MessageBanner,
        forms::TextField,
        layout::{LoadingSpinner, PageHeader, PageLayout},
    },
    pages::users::view_model::use_users_view_model,
};

#[component]
pub fn UsersPage() -> impl IntoView {
    let vm = use_users_view_model();
    let message = vm.message;
    let pending_delete = vm.pending_delete;
    let create_pending = vm.create_action.pending();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit_new_user();
    };

    let delete_message = Signal::derive(move || {
        pending_delete
            .get()
            .map(|user| format!("Czy na pewno chcesz usunąć użytkownika {}?", user.username))
            .unwrap_or_default()
    });

    view! {
        <PageLayout>
            <PageHeader title="Użytkownicy" subtitle="Konta z dostępem do aplikacji"/>

            <MessageBanner message=message/>

            <div class="card">
                <h3>"Nowy użytkownik"</h3>
                <form on:submit=handle_submit>
                    <div class="form-row">
                        <TextField label="Nazwa użytkownika" value=vm.username required=true/>
                        <TextField label="Email" value=vm.email input_type="email" required=true/>
                        <TextField label="Hasło" value=vm.password input_type="password" required=true/>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || create_pending.get()
                        >
                            {move || if create_pending.get() { "Tworzenie..." } else { "Utwórz" }}
                        </button>
                    </div>
                </form>
            </div>

            <div class="card">
                <Suspense fallback=|| view! { <LoadingSpinner/> }>
                    {move || {
                        vm.users_resource
                            .get()
                            .map(|result| match result {
                                Ok(users) => view! {
                                    <table class="table">
                                        <thead>
                                            <tr>
                                                <th>"Nazwa użytkownika"</th>
                                                <th>"Email"</th>
                                                <th>"Imię i nazwisko"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {users
                                                .into_iter()
                                                .map(|user| {
                                                    let delete_user = user.clone();
                                                    let full_name = [
                                                        user.first_name.clone().unwrap_or_default(),
                                                        user.last_name.clone().unwrap_or_default(),
                                                    ]
                                                    .join(" ")
                                                    .trim()
                                                    .to_string();
                                                    view! {
                                                        <tr>
                                                            <td>{user.username.clone()}</td>
                                                            <td>{user.email.clone()}</td>
                                                            <td>{full_name}</td>
                                                            <td class="table-actions">
                                                                <button
                                                                    class="btn btn-sm btn-danger"
                                                                    on:click=move |_| {
                                                                        vm.request_delete(delete_user.clone())
                                                                    }
                                                                >
                                                                    "Usuń"
                                                                </button>
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                .into_view(),
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
                title="Usuń użytkownika"
                message=delete_message
                destructive=true
                confirm_label="Usuń"
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
            />
        </PageLayout>
    }
}
