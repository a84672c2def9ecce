use leptos::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: RwSignal<String>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_string());
    view! {
        <div class="form-group">
            <label class="form-label">{label}</label>
            <input
                type=input_type
                class="form-control"
                required=required
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn DateField(
    #[prop(into)] label: String,
    #[prop(into)] value: RwSignal<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label">{label}</label>
            <input
                type="date"
                class="form-control"
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    #[prop(into)] value: RwSignal<String>,
    options: Vec<(String, String)>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label">{label}</label>
            <select
                class="form-control"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option_value, option_label)| {
                        let selected = {
                            let option_value = option_value.clone();
                            move || value.get() == option_value
                        };
                        view! {
                            <option value=option_value selected=selected>{option_label}</option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label class="form-label">{label}</label>
            <textarea
                class="form-control"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

#[component]
pub fn CheckboxField(
    #[prop(into)] label: String,
    #[prop(into)] value: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group form-group-checkbox">
            <label class="form-label">
                <input
                    type="checkbox"
                    prop:checked=move || value.get()
                    on:change=move |ev| value.set(event_target_checked(&ev))
                />
                {label}
            </label>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn text_field_renders_label_and_required_flag() {
        let html = render_to_string(|| {
            let value = create_rw_signal(String::new());
            view! { <TextField label="Numer faktury" value=value required=true/> }
        });
        assert!(html.contains("Numer faktury"));
        assert!(html.contains("required"));
    }

    #[test]
    fn select_field_renders_options() {
        let html = render_to_string(|| {
            let value = create_rw_signal("test".to_string());
            view! {
                <SelectField
                    label="Środowisko KSeF"
                    value=value
                    options=vec![
                        ("production".into(), "Produkcyjne".into()),
                        ("test".into(), "Testowe".into()),
                        ("demo".into(), "Demo".into()),
                    ]
                />
            }
        });
        assert!(html.contains("Środowisko KSeF"));
        assert!(html.contains("Produkcyjne"));
        assert!(html.contains("Demo"));
    }
}
