use crate::api::ApiError;
use crate::utils::message::MessageState;
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="alert alert-error">
                <div class="alert-text">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let code = e.code;
                    if code != "UNKNOWN" && !code.is_empty() {
                        view! { <div class="alert-code">{"Kod: "}{code}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

/// Success-or-error banner fed by a [`MessageState`], dismissable like the
/// alerts of the original UI.
#[component]
pub fn MessageBanner(message: RwSignal<MessageState>) -> impl IntoView {
    view! {
        <Show when=move || !message.get().is_empty() fallback=|| ()>
            {move || {
                let state = message.get();
                let (class, text) = if let Some(error) = state.error {
                    ("alert alert-error", error.error)
                } else {
                    ("alert alert-success", state.success.unwrap_or_default())
                };
                view! {
                    <div class=class>
                        <span class="alert-text">{text}</span>
                        <button
                            type="button"
                            class="alert-close"
                            on:click=move |_| message.update(|m| m.clear())
                        >
                            "×"
                        </button>
                    </div>
                }
            }}
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn inline_error_renders_message_and_code() {
        let html = render_to_string(move || {
            let error = ApiError::request_failed("Żądanie nie powiodło się");
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()}/> }
        });
        assert!(html.contains("Żądanie nie powiodło się"));
        assert!(html.contains("Kod: REQUEST_FAILED"));
    }

    #[test]
    fn message_banner_prefers_error_over_success() {
        let html = render_to_string(move || {
            let mut state = MessageState::default();
            state.set_error(ApiError::unknown("nie działa"));
            let message = create_rw_signal(state);
            view! { <MessageBanner message=message/> }
        });
        assert!(html.contains("alert-error"));
        assert!(html.contains("nie działa"));
    }

    #[test]
    fn message_banner_renders_success() {
        let html = render_to_string(move || {
            let mut state = MessageState::default();
            state.set_success("Zapisano ustawienia.");
            let message = create_rw_signal(state);
            view! { <MessageBanner message=message/> }
        });
        assert!(html.contains("alert-success"));
        assert!(html.contains("Zapisano ustawienia."));
    }
}
