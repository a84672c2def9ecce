use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h3 class="empty-state-title">{title}</h3>
            {description.map(|desc| view! { <p class="empty-state-description">{desc}</p> })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn empty_state_renders_title_and_description() {
        let html = render_to_string(|| {
            view! {
                <EmptyState
                    title="Brak faktur"
                    description="Dodaj pierwszą fakturę lub pobierz je z KSeF."
                />
            }
        });
        assert!(html.contains("Brak faktur"));
        assert!(html.contains("Dodaj pierwszą fakturę"));
    }
}
