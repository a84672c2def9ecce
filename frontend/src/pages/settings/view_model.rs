use leptos::*;

use crate::api::{ApiClient, ApiError, KsefEnvironment, Settings, SettingsPayload};
use crate::pages::settings::repository::SettingsRepository;
use crate::utils::message::MessageState;

pub(super) fn parse_environment(raw: &str) -> KsefEnvironment {
    match raw {
        "production" => KsefEnvironment::Production,
        "demo" => KsefEnvironment::Demo,
        _ => KsefEnvironment::Test,
    }
}

pub(super) fn validate_password_change(
    old_password: &str,
    new_password: &str,
    confirm: &str,
) -> Result<(), ApiError> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err(ApiError::validation("Podaj obecne i nowe hasło"));
    }
    if new_password.len() < 8 {
        return Err(ApiError::validation(
            "Nowe hasło musi mieć co najmniej 8 znaków",
        ));
    }
    if new_password != confirm {
        return Err(ApiError::validation("Hasła nie są identyczne"));
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct SettingsFormState {
    pub firma_nazwa: RwSignal<String>,
    pub firma_nip: RwSignal<String>,
    pub ksef_token: RwSignal<String>,
    pub ksef_environment: RwSignal<String>,
    pub auto_fetch_ksef: RwSignal<bool>,
}

impl Default for SettingsFormState {
    fn default() -> Self {
        Self {
            firma_nazwa: create_rw_signal(String::new()),
            firma_nip: create_rw_signal(String::new()),
            ksef_token: create_rw_signal(String::new()),
            ksef_environment: create_rw_signal("test".to_string()),
            auto_fetch_ksef: create_rw_signal(false),
        }
    }
}

impl SettingsFormState {
    pub fn load_from(&self, settings: &Settings) {
        self.firma_nazwa.set(settings.firma_nazwa.clone());
        self.firma_nip.set(settings.firma_nip.clone());
        self.ksef_token.set(settings.ksef_token.clone());
        self.ksef_environment
            .set(settings.ksef_environment.as_str().to_string());
        self.auto_fetch_ksef.set(settings.auto_fetch_ksef);
    }

    pub fn to_payload(&self) -> SettingsPayload {
        SettingsPayload {
            firma_nazwa: self.firma_nazwa.get_untracked().trim().to_string(),
            firma_nip: self.firma_nip.get_untracked().trim().to_string(),
            ksef_token: self.ksef_token.get_untracked().trim().to_string(),
            ksef_environment: parse_environment(&self.ksef_environment.get_untracked()),
            auto_fetch_ksef: self.auto_fetch_ksef.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct SettingsViewModel {
    pub form: SettingsFormState,
    pub message: RwSignal<MessageState>,
    pub password_message: RwSignal<MessageState>,
    pub old_password: RwSignal<String>,
    pub new_password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub settings_resource: Resource<u32, Result<Settings, ApiError>>,
    pub save_action: Action<SettingsPayload, Result<Settings, ApiError>>,
    pub password_action: Action<(String, String), Result<String, ApiError>>,
}

impl SettingsViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(SettingsRepository::new(api));

        let form = SettingsFormState::default();
        let message = create_rw_signal(MessageState::default());
        let password_message = create_rw_signal(MessageState::default());
        let old_password = create_rw_signal(String::new());
        let new_password = create_rw_signal(String::new());
        let confirm_password = create_rw_signal(String::new());

        let settings_resource = create_resource(
            || 0u32,
            move |_| {
                let repo = repository.get_value();
                async move { repo.load().await }
            },
        );

        // Fill the form once the settings arrive.
        {
            create_effect(move |_| {
                if let Some(Ok(settings)) = settings_resource.get() {
                    form.load_from(&settings);
                }
            });
        }

        let save_action = create_action(move |payload: &SettingsPayload| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.save(&payload).await }
        });

        let password_action = create_action(move |input: &(String, String)| {
            let repo = repository.get_value();
            let (old, new) = input.clone();
            async move {
                repo.change_password(old, new)
                    .await
                    .map(|response| response.message)
            }
        });

        {
            create_effect(move |_| {
                if let Some(result) = save_action.value().get() {
                    match result {
                        Ok(settings) => {
                            form.load_from(&settings);
                            message.update(|m| m.set_success("Zapisano ustawienia."));
                        }
                        Err(err) => message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        {
            create_effect(move |_| {
                if let Some(result) = password_action.value().get() {
                    match result {
                        Ok(text) => {
                            old_password.set(String::new());
                            new_password.set(String::new());
                            confirm_password.set(String::new());
                            let text = if text.is_empty() {
                                "Hasło zostało zmienione.".to_string()
                            } else {
                                text
                            };
                            password_message.update(|m| m.set_success(text));
                        }
                        Err(err) => password_message.update(|m| m.set_error(err)),
                    }
                }
            });
        }

        Self {
            form,
            message,
            password_message,
            old_password,
            new_password,
            confirm_password,
            settings_resource,
            save_action,
            password_action,
        }
    }

    pub fn submit_settings(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        self.save_action.dispatch(self.form.to_payload());
    }

    pub fn submit_password_change(&self) {
        if self.password_action.pending().get_untracked() {
            return;
        }
        let old = self.old_password.get_untracked();
        let new = self.new_password.get_untracked();
        let confirm = self.confirm_password.get_untracked();
        if let Err(err) = validate_password_change(&old, &new, &confirm) {
            self.password_message.update(|m| m.set_error(err));
            return;
        }
        self.password_message.update(|m| m.clear());
        self.password_action.dispatch((old, new));
    }
}

pub fn use_settings_view_model() -> SettingsViewModel {
    match use_context::<SettingsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = SettingsViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn parse_environment_defaults_to_test() {
        assert_eq!(parse_environment("production"), KsefEnvironment::Production);
        assert_eq!(parse_environment("demo"), KsefEnvironment::Demo);
        assert_eq!(parse_environment("anything"), KsefEnvironment::Test);
    }

    #[test]
    fn password_change_validation_catches_common_errors() {
        assert!(validate_password_change("", "nowehaslo", "nowehaslo").is_err());
        assert!(validate_password_change("stare", "krotkie", "krotkie").is_err());
        assert!(validate_password_change("stare", "nowehaslo", "innehaslo").is_err());
        assert!(validate_password_change("stare", "nowehaslo", "nowehaslo").is_ok());
    }

    #[test]
    fn settings_form_round_trips() {
        with_runtime(|| {
            let form = SettingsFormState::default();
            form.load_from(&Settings {
                id: 1,
                firma_nazwa: "Moja Firma".into(),
                firma_nip: "1111111111".into(),
                ksef_token: "token".into(),
                ksef_environment: KsefEnvironment::Demo,
                auto_fetch_ksef: true,
                created_at: String::new(),
                updated_at: String::new(),
            });

            let payload = form.to_payload();
            assert_eq!(payload.firma_nip, "1111111111");
            assert_eq!(payload.ksef_environment, KsefEnvironment::Demo);
            assert!(payload.auto_fetch_ksef);
        });
    }
}
