use crate::{api::LoginRequest, pages::login::utils, state::auth};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    {
        create_effect(move |_| {
            if let Some(result) = login_action.value().get() {
                match result {
                    Ok(_) => {
                        set_error.set(None);
                        #[cfg(target_arch = "wasm32")]
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/");
                        }
                    }
                    Err(err) => set_error.set(Some(err.error)),
                }
            }
        });
    }

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let pword = password.get_untracked();

        if let Err(msg) = utils::validate_credentials(&uname, &pword) {
            set_error.set(Some(msg));
            return;
        }

        set_error.set(None);
        login_action.dispatch(LoginRequest {
            username: uname,
            password: pword,
        });
    };

    view! {
        <div class="login-page">
            <div class="card login-card">
                <h1 class="login-title">"Fakturex Next"</h1>
                <p class="login-subtitle">"Zaloguj się, aby zarządzać fakturami"</p>
                <form on:submit=handle_submit>
                    <div class="form-group">
                        <label class="form-label">"Nazwa użytkownika"</label>
                        <input
                            type="text"
                            class="form-control"
                            required
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Hasło"</label>
                        <input
                            type="password"
                            class="form-control"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <Show when=move || error.get().is_some()>
                        <div class="alert alert-error">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>
                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Logowanie..." } else { "Zaloguj się" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_page_renders_form_fields() {
        let html = render_to_string(|| view! { <LoginPage/> });
        assert!(html.contains("Nazwa użytkownika"));
        assert!(html.contains("Hasło"));
        assert!(html.contains("Zaloguj się"));
    }
}
