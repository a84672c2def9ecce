use std::cell::Cell;
use std::rc::Rc;

use crate::api::Settings;

/// The optional background fetch polls KSeF once an hour while the setting
/// is enabled and a session is live.
pub const AUTO_FETCH_INTERVAL_MINUTES: u64 = 60;

pub fn should_auto_fetch(settings: Option<&Settings>, is_authenticated: bool) -> bool {
    is_authenticated
        && settings
            .map(|s| s.auto_fetch_ksef && s.ksef_configured())
            .unwrap_or(false)
}

/// Cancellable periodic task with explicit start/stop. The loop re-checks
/// the flag after every sleep and before applying results, so a stopped
/// handle never writes into state that outlived its page.
#[derive(Clone, Default)]
pub struct AutoFetchHandle {
    cancelled: Rc<Cell<bool>>,
}

impl AutoFetchHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.cancelled.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.get()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn spawn<F>(&self, tick: F)
    where
        F: Fn() + 'static,
    {
        use gloo_timers::future::sleep;
        use std::time::Duration;

        let cancelled = self.cancelled.clone();
        leptos::spawn_local(async move {
            loop {
                sleep(Duration::from_secs(AUTO_FETCH_INTERVAL_MINUTES * 60)).await;
                if cancelled.get() {
                    break;
                }
                tick();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::KsefEnvironment;

    fn settings(auto_fetch: bool, token: &str, nip: &str) -> Settings {
        Settings {
            id: 1,
            firma_nazwa: "Moja Firma".into(),
            firma_nip: nip.into(),
            ksef_token: token.into(),
            ksef_environment: KsefEnvironment::Test,
            auto_fetch_ksef: auto_fetch,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn auto_fetch_requires_setting_session_and_configuration() {
        let configured = settings(true, "token", "1111111111");
        assert!(should_auto_fetch(Some(&configured), true));
        assert!(!should_auto_fetch(Some(&configured), false));

        let disabled = settings(false, "token", "1111111111");
        assert!(!should_auto_fetch(Some(&disabled), true));

        let unconfigured = settings(true, "", "1111111111");
        assert!(!should_auto_fetch(Some(&unconfigured), true));

        assert!(!should_auto_fetch(None, true));
    }

    #[test]
    fn handle_stops_exactly_once_and_stays_stopped() {
        let handle = AutoFetchHandle::new();
        assert!(!handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());

        // Clones observe the same flag.
        let clone = handle.clone();
        assert!(clone.is_stopped());
    }
}
