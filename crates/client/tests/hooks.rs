//! Integration tests for the per-view query handles.

use std::sync::Arc;

use shipcheck_client::config::ClientConfig;
use shipcheck_client::hooks::{
    use_checklist_responses, use_checklist_templates, use_media_evidence, use_survey,
    use_survey_notes, use_surveys, use_utility_dashboard,
};
use shipcheck_client::services::SurveyService;
use shipcheck_client::AppState;
use shipcheck_core::survey::SurveyStatus;
use shipcheck_core::utility::SupplierPalette;
use shipcheck_db::backend::memory::Op;
use shipcheck_db::models::survey::SurveyInput;
use shipcheck_db::repositories::survey_repo::TABLE;
use shipcheck_db::MemoryBackend;
use uuid::Uuid;

// ---- Helpers ----

fn setup() -> (Arc<MemoryBackend>, AppState) {
    let backend = Arc::new(MemoryBackend::new());
    let state = AppState::with_backend(
        Arc::clone(&backend),
        ClientConfig::new("memory://", "anon-key"),
    );
    (backend, state)
}

fn survey(ship: &str) -> SurveyInput {
    SurveyInput {
        client_name: "Acme".to_string(),
        ship_name: ship.to_string(),
        status: SurveyStatus::Draft,
        ..Default::default()
    }
}

// ---- Tests ----

#[tokio::test]
async fn surveys_load_and_refetch() {
    let (_, state) = setup();
    let service = SurveyService::new(state.clone());
    service.save_survey(survey("MV One"), None).await;

    let query = use_surveys(&state);
    let loaded = query.settled().await;
    assert!(!loaded.loading);
    assert_eq!(loaded.error, None);
    assert_eq!(loaded.data.map(|s| s.len()), Some(1));

    service.save_survey(survey("MV Two"), None).await;
    assert_eq!(query.snapshot().data.map(|s| s.len()), Some(1));

    query.refetch().await;
    let refreshed = query.snapshot();
    assert!(!refreshed.loading);
    assert_eq!(refreshed.data.map(|s| s.len()), Some(2));
}

#[tokio::test]
async fn failed_fetch_sets_error() {
    let (backend, state) = setup();
    backend.fail_on(Op::Select, TABLE).await;

    let query = use_surveys(&state);
    let failed = query.settled().await;

    assert!(!failed.loading);
    assert_eq!(failed.data, None);
    assert_eq!(
        failed.error.as_deref(),
        Some("Something went wrong. Please try again.")
    );

    backend.clear_failures().await;
    query.refetch().await;
    let recovered = query.snapshot();
    assert_eq!(recovered.error, None);
    assert_eq!(recovered.data, Some(vec![]));
}

#[tokio::test]
async fn missing_survey_reports_not_found() {
    let (_, state) = setup();

    let query = use_survey(&state, Uuid::new_v4());
    let state = query.settled().await;

    assert_eq!(state.data, None);
    assert_eq!(state.error.as_deref(), Some("Survey not found"));
}

#[tokio::test]
async fn handles_are_independent() {
    let (backend, state) = setup();
    let survey_id = Uuid::new_v4();

    let responses = use_checklist_responses(&state, survey_id);
    let notes = use_survey_notes(&state, survey_id);
    let media = use_media_evidence(&state, Uuid::new_v4());
    let templates = use_checklist_templates(&state);
    let dashboard = use_utility_dashboard(&state, SupplierPalette::default(), None);

    assert_eq!(responses.settled().await.data, Some(vec![]));
    assert_eq!(notes.settled().await.data, Some(vec![]));
    assert_eq!(media.settled().await.data, Some(vec![]));
    assert_eq!(templates.settled().await.data, Some(vec![]));

    let dashboard = dashboard.settled().await.data.expect("dashboard");
    assert!(dashboard.readings.is_empty());
    assert_eq!(dashboard.summary.total_cost, 0.0);

    let selects = backend
        .calls()
        .await
        .iter()
        .filter(|c| c.op == Op::Select)
        .count();
    assert_eq!(selects, 5);
}
