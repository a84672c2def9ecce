use crate::state::auth::{self, use_auth};
use leptos::*;

const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Pulpit"),
    ("/invoices", "Faktury"),
    ("/contractors", "Kontrahenci"),
    ("/customers", "Klienci"),
    ("/products", "Produkty"),
    ("/ksef", "KSeF"),
    ("/settings", "Ustawienia"),
    ("/users", "Użytkownicy"),
];

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);

    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    {
        create_effect(move |_| {
            if logout_action.value().get().is_some() {
                #[cfg(target_arch = "wasm32")]
                if let Some(win) = web_sys::window() {
                    let _ = win.location().set_href("/login");
                }
            }
        });
    }
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        set_menu_open.set(false);
        logout_action.dispatch(());
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    let username = move || {
        auth.get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };

    view! {
        <header class="navbar">
            <div class="navbar-inner">
                <a href="/" class="navbar-brand">"Fakturex Next"</a>
                <nav class="navbar-nav">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! { <a href=*href class="nav-link">{*label}</a> }
                        })
                        .collect_view()}
                </nav>
                <div class="navbar-user">
                    <span class="nav-username">{username}</span>
                    <button
                        class="btn btn-sm btn-secondary"
                        on:click=on_logout
                        disabled=move || logout_pending.get()
                    >
                        "Wyloguj"
                    </button>
                    <button
                        type="button"
                        class="navbar-toggle"
                        on:click=toggle_menu
                        aria-expanded=move || menu_open.get()
                        aria-controls="mobile-nav"
                    >
                        "☰"
                    </button>
                </div>
            </div>
            <Show when=move || menu_open.get()>
                <nav id="mobile-nav" class="navbar-mobile">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <a
                                    href=*href
                                    class="nav-link"
                                    on:click=move |_| set_menu_open.set(false)
                                >
                                    {*label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </Show>
        </header>
    }
}

/// Standard page chrome: header bar plus the content container.
#[component]
pub fn PageLayout(children: Children) -> impl IntoView {
    view! {
        <div class="app">
            <Header/>
            <main class="page">{children()}</main>
        </div>
    }
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div>
                <h1 class="page-title">{title}</h1>
                {subtitle.map(|text| view! { <p class="page-subtitle">{text}</p> })}
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner animate-spin"></div>
        </div>
    }
}
