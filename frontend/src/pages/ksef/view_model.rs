use chrono::{Datelike, NaiveDate};
use leptos::*;

use crate::api::{ApiClient, ApiError, KsefCandidate, KsefFetchResponse, KsefImportResponse, Settings};
use crate::pages::ksef::{
    auto_fetch::{should_auto_fetch, AutoFetchHandle},
    repository::KsefRepository,
    workflow::ImportWorkflow,
};
use crate::state::auth::use_auth;
use crate::utils::message::MessageState;

#[derive(Clone)]
pub struct KsefViewModel {
    pub workflow: RwSignal<ImportWorkflow>,
    pub date_from: RwSignal<String>,
    pub date_to: RwSignal<String>,
    pub message: RwSignal<MessageState>,
    pub settings_resource: Resource<u32, Result<Settings, ApiError>>,
    pub fetch_action: Action<(NaiveDate, NaiveDate), Result<KsefFetchResponse, ApiError>>,
    pub import_action: Action<Vec<KsefCandidate>, Result<KsefImportResponse, ApiError>>,
    last_submitted: RwSignal<Vec<String>>,
    auto_fetch: AutoFetchHandle,
}

pub(super) fn parse_date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let date_from = NaiveDate::parse_from_str(from, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Podaj prawidłową datę początkową"))?;
    let date_to = NaiveDate::parse_from_str(to, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Podaj prawidłową datę końcową"))?;
    if date_from > date_to {
        return Err(ApiError::validation(
            "Data początkowa nie może być późniejsza niż końcowa",
        ));
    }
    Ok((date_from, date_to))
}

pub(super) fn quick_range(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - chrono::Duration::days(days), today)
}

pub(super) fn month_range(today: NaiveDate, previous: bool) -> (NaiveDate, NaiveDate) {
    if previous {
        let first_of_current = today.with_day(1).unwrap_or(today);
        let last_of_previous = first_of_current - chrono::Duration::days(1);
        let first_of_previous = last_of_previous.with_day(1).unwrap_or(last_of_previous);
        (first_of_previous, last_of_previous)
    } else {
        (today.with_day(1).unwrap_or(today), today)
    }
}

/// Polish plural of "faktura" for the import summary.
pub(super) fn import_success_message(count: i64) -> String {
    let noun = match count {
        1 => "fakturę",
        2..=4 => "faktury",
        _ => "faktur",
    };
    format!("Zaimportowano {} {} do systemu.", count, noun)
}

pub(super) fn fetch_summary(response: &KsefFetchResponse) -> String {
    if response.invoices.is_empty() {
        if response.message.trim().is_empty() {
            "Brak nowych faktur w wybranym okresie.".to_string()
        } else {
            response.message.clone()
        }
    } else {
        let new_count = response
            .invoices
            .iter()
            .filter(|candidate| !candidate.already_exists)
            .count();
        format!(
            "Znaleziono {} faktur, w tym {} nowych.",
            response.invoices.len(),
            new_count
        )
    }
}

pub(super) fn apply_fetch_result(
    result: Option<Result<KsefFetchResponse, ApiError>>,
    workflow: RwSignal<ImportWorkflow>,
    message: RwSignal<MessageState>,
) {
    if let Some(result) = result {
        match result {
            Ok(response) => {
                // The backend reports KSeF-side failures inside an OK
                // response; those count as fetch errors.
                if let Some(error) = response.error {
                    workflow.update(|w| w.fail_fetch());
                    message.update(|m| m.set_error(ApiError::unknown(error)));
                } else {
                    let summary = fetch_summary(&response);
                    workflow.update(|w| w.complete_fetch(response.invoices));
                    message.update(|m| m.set_success(summary));
                }
            }
            Err(err) => {
                workflow.update(|w| w.fail_fetch());
                message.update(|m| m.set_error(err));
            }
        }
    }
}

pub(super) fn apply_import_result(
    result: Option<Result<KsefImportResponse, ApiError>>,
    submitted: Vec<String>,
    workflow: RwSignal<ImportWorkflow>,
    message: RwSignal<MessageState>,
) {
    if let Some(result) = result {
        match result {
            Ok(response) => {
                if let Some(error) = response.error {
                    workflow.update(|w| w.fail_import());
                    message.update(|m| m.set_error(ApiError::unknown(error)));
                } else {
                    workflow.update(|w| w.complete_import(&submitted));
                    message.update(|m| m.set_success(import_success_message(response.imported_count)));
                }
            }
            Err(err) => {
                workflow.update(|w| w.fail_import());
                message.update(|m| m.set_error(err));
            }
        }
    }
}

impl KsefViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(KsefRepository::new(api));

        let today = chrono::Local::now().date_naive();
        let (default_from, default_to) = quick_range(today, 30);

        let workflow = create_rw_signal(ImportWorkflow::default());
        let date_from = create_rw_signal(default_from.format("%Y-%m-%d").to_string());
        let date_to = create_rw_signal(default_to.format("%Y-%m-%d").to_string());
        let message = create_rw_signal(MessageState::default());
        let last_submitted = create_rw_signal(Vec::<String>::new());

        let settings_resource = create_resource(
            || 0u32,
            move |_| {
                let repo = repository.get_value();
                async move { repo.load_settings().await }
            },
        );

        let fetch_action = create_action(move |range: &(NaiveDate, NaiveDate)| {
            let repo = repository.get_value();
            let (from, to) = *range;
            async move { repo.fetch(from, to).await }
        });

        let import_action = create_action(move |candidates: &Vec<KsefCandidate>| {
            let repo = repository.get_value();
            let candidates = candidates.clone();
            async move { repo.import(candidates).await }
        });

        {
            create_effect(move |_| {
                apply_fetch_result(fetch_action.value().get(), workflow, message);
            });
        }

        {
            create_effect(move |_| {
                apply_import_result(
                    import_action.value().get(),
                    last_submitted.get_untracked(),
                    workflow,
                    message,
                );
            });
        }

        let vm = Self {
            workflow,
            date_from,
            date_to,
            message,
            settings_resource,
            fetch_action,
            import_action,
            last_submitted,
            auto_fetch: AutoFetchHandle::new(),
        };
        vm.start_auto_fetch_when_enabled();
        vm
    }

    pub fn settings(&self) -> Option<Settings> {
        self.settings_resource.get().and_then(|result| result.ok())
    }

    pub fn is_configured(&self) -> bool {
        self.settings()
            .map(|settings| settings.ksef_configured())
            .unwrap_or(false)
    }

    /// Validates the date range and starts a fetch unless one is already in
    /// flight.
    pub fn dispatch_fetch(&self) {
        let range = parse_date_range(
            &self.date_from.get_untracked(),
            &self.date_to.get_untracked(),
        );
        let range = match range {
            Ok(range) => range,
            Err(err) => {
                self.message.update(|m| m.set_error(err));
                return;
            }
        };

        let mut started = false;
        self.workflow.update(|w| started = w.begin_fetch());
        if !started {
            return;
        }
        self.message.update(|m| m.clear());
        self.fetch_action.dispatch(range);
    }

    /// Submits the current selection; no-op when nothing is selected.
    pub fn dispatch_import(&self) {
        let mut payload = None;
        self.workflow.update(|w| payload = w.begin_import());
        let Some(candidates) = payload else {
            return;
        };
        self.last_submitted.set(
            candidates
                .iter()
                .map(|candidate| candidate.ksef_numer.clone())
                .collect(),
        );
        self.message.update(|m| m.clear());
        self.import_action.dispatch(candidates);
    }

    pub fn toggle(&self, ksef_numer: &str) {
        let id = ksef_numer.to_string();
        self.workflow.update(|w| w.toggle(&id));
    }

    pub fn select_all(&self) {
        self.workflow.update(|w| w.select_all());
    }

    pub fn deselect_all(&self) {
        self.workflow.update(|w| w.deselect_all());
    }

    pub fn set_quick_range(&self, days: i64) {
        let today = chrono::Local::now().date_naive();
        let (from, to) = quick_range(today, days);
        self.date_from.set(from.format("%Y-%m-%d").to_string());
        self.date_to.set(to.format("%Y-%m-%d").to_string());
    }

    pub fn set_month_range(&self, previous: bool) {
        let today = chrono::Local::now().date_naive();
        let (from, to) = month_range(today, previous);
        self.date_from.set(from.format("%Y-%m-%d").to_string());
        self.date_to.set(to.format("%Y-%m-%d").to_string());
    }

    /// Hourly background fetch, started once the settings confirm it is
    /// wanted and stopped with the page.
    fn start_auto_fetch_when_enabled(&self) {
        let (auth, _) = use_auth();
        let settings_resource = self.settings_resource;
        let handle = self.auto_fetch.clone();
        let vm = self.clone();

        {
            let handle = handle.clone();
            on_cleanup(move || handle.stop());
        }

        create_effect(move |started: Option<bool>| {
            if started.unwrap_or(false) || handle.is_stopped() {
                return started.unwrap_or(false);
            }
            let settings = settings_resource.get().and_then(|result| result.ok());
            let enabled = should_auto_fetch(settings.as_ref(), auth.get().is_authenticated);
            if !enabled {
                return false;
            }
            #[cfg(target_arch = "wasm32")]
            {
                let vm = vm.clone();
                handle.spawn(move || {
                    if !vm.workflow.get_untracked().is_busy() {
                        vm.dispatch_fetch();
                    }
                });
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = &vm;
            true
        });
    }
}

pub fn use_ksef_view_model() -> KsefViewModel {
    match use_context::<KsefViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = KsefViewModel::new();
            provide_context(vm.clone());
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    fn candidate(ksef_numer: &str, already_exists: bool) -> KsefCandidate {
        KsefCandidate {
            ksef_numer: ksef_numer.to_string(),
            numer: format!("FV/{}", ksef_numer),
            data: "2026-01-05".to_string(),
            kwota: 100.0,
            dostawca: "Dostawca".to_string(),
            dostawca_nip: "1111111111".to_string(),
            termin_platnosci: None,
            already_exists,
        }
    }

    #[test]
    fn parse_date_range_validates_order_and_format() {
        let (from, to) = parse_date_range("2026-01-01", "2026-01-31").unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());

        assert_eq!(
            parse_date_range("zly", "2026-01-31").unwrap_err().code,
            "VALIDATION_ERROR"
        );
        assert!(parse_date_range("2026-02-01", "2026-01-31").is_err());
    }

    #[test]
    fn quick_and_month_ranges_match_the_calendar() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(
            quick_range(today, 7),
            (NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(), today)
        );

        assert_eq!(
            month_range(today, false),
            (NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), today)
        );
        assert_eq!(
            month_range(today, true),
            (
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
            )
        );
    }

    #[test]
    fn import_success_message_uses_polish_plurals() {
        assert_eq!(import_success_message(1), "Zaimportowano 1 fakturę do systemu.");
        assert_eq!(import_success_message(3), "Zaimportowano 3 faktury do systemu.");
        assert_eq!(import_success_message(7), "Zaimportowano 7 faktur do systemu.");
    }

    #[test]
    fn fetch_summary_counts_new_candidates() {
        let response = KsefFetchResponse {
            invoices: vec![candidate("a", false), candidate("b", true)],
            total_found: 2,
            message: "Pobrano 2 faktury".into(),
            error: None,
        };
        assert_eq!(fetch_summary(&response), "Znaleziono 2 faktur, w tym 1 nowych.");

        let empty = KsefFetchResponse::default();
        assert_eq!(fetch_summary(&empty), "Brak nowych faktur w wybranym okresie.");
    }

    #[test]
    fn apply_fetch_result_handles_success_inline_error_and_failure() {
        with_runtime(|| {
            let workflow = create_rw_signal(ImportWorkflow::default());
            let message = create_rw_signal(MessageState::default());

            workflow.update(|w| {
                w.begin_fetch();
            });
            apply_fetch_result(
                Some(Ok(KsefFetchResponse {
                    invoices: vec![candidate("a", false)],
                    total_found: 1,
                    message: String::new(),
                    error: None,
                })),
                workflow,
                message,
            );
            assert!(workflow.get().has_results());
            assert_eq!(workflow.get().selected_count(), 1);
            assert!(message.get().success.is_some());

            // KSeF-side failure reported inside an OK payload.
            workflow.update(|w| {
                w.begin_fetch();
            });
            apply_fetch_result(
                Some(Ok(KsefFetchResponse {
                    error: Some("Błąd autoryzacji KSeF".into()),
                    ..Default::default()
                })),
                workflow,
                message,
            );
            assert!(!workflow.get().has_results());
            assert_eq!(
                message.get().error.map(|e| e.error),
                Some("Błąd autoryzacji KSeF".into())
            );

            // Transport failure.
            workflow.update(|w| {
                w.begin_fetch();
            });
            apply_fetch_result(
                Some(Err(ApiError::request_failed("timeout"))),
                workflow,
                message,
            );
            assert!(!workflow.get().has_results());
            assert!(workflow.get().candidates().is_empty());
        });
    }

    #[test]
    fn apply_import_result_reflags_and_clears_selection() {
        with_runtime(|| {
            let workflow = create_rw_signal(ImportWorkflow::default());
            let message = create_rw_signal(MessageState::default());

            workflow.update(|w| {
                w.begin_fetch();
                w.complete_fetch(vec![candidate("a", false), candidate("b", true)]);
            });
            let mut submitted = Vec::new();
            workflow.update(|w| {
                submitted = w
                    .begin_import()
                    .unwrap()
                    .into_iter()
                    .map(|c| c.ksef_numer)
                    .collect();
            });

            apply_import_result(
                Some(Ok(KsefImportResponse {
                    imported_count: 1,
                    ..Default::default()
                })),
                submitted,
                workflow,
                message,
            );

            let snapshot = workflow.get();
            assert!(snapshot.candidates().iter().all(|c| c.already_exists));
            assert_eq!(snapshot.selected_count(), 0);
            assert_eq!(
                message.get().success.as_deref(),
                Some("Zaimportowano 1 fakturę do systemu.")
            );
        });
    }

    #[test]
    fn apply_import_result_failure_keeps_flags() {
        with_runtime(|| {
            let workflow = create_rw_signal(ImportWorkflow::default());
            let message = create_rw_signal(MessageState::default());

            workflow.update(|w| {
                w.begin_fetch();
                w.complete_fetch(vec![candidate("a", false)]);
            });
            let mut submitted = Vec::new();
            workflow.update(|w| {
                submitted = w
                    .begin_import()
                    .unwrap()
                    .into_iter()
                    .map(|c| c.ksef_numer)
                    .collect();
            });

            apply_import_result(
                Some(Err(ApiError::request_failed("timeout"))),
                submitted,
                workflow,
                message,
            );

            let snapshot = workflow.get();
            assert!(!snapshot.candidates()[0].already_exists);
            assert!(snapshot.is_selected("a"));
            assert!(message.get().error.is_some());
        });
    }
}
