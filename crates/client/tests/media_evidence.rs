//! Integration tests for media evidence: upload then metadata, no rollback.

use std::sync::Arc;

use assert_matches::assert_matches;
use shipcheck_client::config::{ClientConfig, DEFAULT_MEDIA_BUCKET};
use shipcheck_client::services::{MediaEvidenceService, MediaUpload};
use shipcheck_client::{AppState, ClientError};
use shipcheck_core::checklist::EvidenceType;
use shipcheck_core::error::CoreError;
use shipcheck_core::media::MAX_MEDIA_BYTES;
use shipcheck_db::backend::memory::Op;
use shipcheck_db::repositories::media_evidence_repo::TABLE;
use shipcheck_db::{BackendError, MemoryBackend};
use uuid::Uuid;

// ---- Helpers ----

fn setup() -> (Arc<MemoryBackend>, MediaEvidenceService) {
    let backend = Arc::new(MemoryBackend::new());
    let state = AppState::with_backend(
        Arc::clone(&backend),
        ClientConfig::new("memory://", "anon-key"),
    );
    (backend, MediaEvidenceService::new(state))
}

fn photo(survey_id: Uuid, response_id: Uuid) -> MediaUpload {
    MediaUpload {
        survey_id,
        response_id,
        original_name: "hull crack.jpg".to_string(),
        mime_type: Some("image/jpeg".to_string()),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        evidence_type: EvidenceType::Defect,
    }
}

// ---- save_media_evidence ----

#[tokio::test]
async fn upload_then_metadata_row() {
    let (backend, service) = setup();
    let survey_id = Uuid::new_v4();
    let response_id = Uuid::new_v4();

    let media_id = service
        .save_media_evidence(photo(survey_id, response_id))
        .await
        .unwrap();

    let paths = backend.blob_paths(DEFAULT_MEDIA_BUCKET).await;
    assert_eq!(paths.len(), 1);
    let prefix = format!("checklist/{survey_id}/{media_id}/defect_");
    assert!(paths[0].starts_with(&prefix), "path: {}", paths[0]);
    assert!(paths[0].ends_with("_hull crack.jpg"), "path: {}", paths[0]);

    let blob = backend
        .blob(DEFAULT_MEDIA_BUCKET, &paths[0])
        .await
        .expect("stored object");
    assert_eq!(blob.content_type, "image/jpeg");
    assert_eq!(blob.bytes.len(), 4);

    let rows = backend.rows(TABLE).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], media_id.to_string());
    assert_eq!(rows[0]["storage_path"], paths[0].as_str());
    assert_eq!(rows[0]["file_size"], 4);
    assert_eq!(rows[0]["evidence_type"], "defect");

    let ops: Vec<Op> = backend.calls().await.iter().map(|c| c.op).collect();
    assert_eq!(ops, vec![Op::Upload, Op::Insert]);
}

#[tokio::test]
async fn upload_failure_leaves_no_metadata() {
    let (backend, service) = setup();
    backend.fail_on(Op::Upload, DEFAULT_MEDIA_BUCKET).await;

    let result = service
        .save_media_evidence(photo(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert_matches!(result, Err(ClientError::Backend(BackendError::Unavailable(_))));
    assert!(backend.rows(TABLE).await.is_empty());
    assert!(backend.blob_paths(DEFAULT_MEDIA_BUCKET).await.is_empty());
}

#[tokio::test]
async fn metadata_failure_leaves_uploaded_object() {
    let (backend, service) = setup();
    backend.fail_on(Op::Insert, TABLE).await;

    let result = service
        .save_media_evidence(photo(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert_matches!(result, Err(ClientError::Backend(_)));
    assert!(backend.rows(TABLE).await.is_empty());
    assert_eq!(backend.blob_paths(DEFAULT_MEDIA_BUCKET).await.len(), 1);
}

#[tokio::test]
async fn invalid_uploads_are_rejected_before_any_call() {
    let (backend, service) = setup();

    let mut empty = photo(Uuid::new_v4(), Uuid::new_v4());
    empty.bytes.clear();
    assert_matches!(
        service.save_media_evidence(empty).await,
        Err(ClientError::Core(CoreError::Validation(_)))
    );

    let mut huge = photo(Uuid::new_v4(), Uuid::new_v4());
    huge.bytes = vec![0; MAX_MEDIA_BYTES as usize + 1];
    assert_matches!(
        service.save_media_evidence(huge).await,
        Err(ClientError::Core(CoreError::Validation(_)))
    );

    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn missing_mime_type_falls_back_to_octet_stream() {
    let (backend, service) = setup();
    let mut upload = photo(Uuid::new_v4(), Uuid::new_v4());
    upload.mime_type = None;
    upload.original_name = "../report.pdf".to_string();
    upload.evidence_type = EvidenceType::Reference;

    service.save_media_evidence(upload).await.unwrap();

    let rows = backend.rows(TABLE).await;
    assert_eq!(rows[0]["mime_type"], "application/octet-stream");
    let file_name = rows[0]["file_name"].as_str().unwrap();
    assert!(file_name.starts_with("reference_"));
    assert!(file_name.ends_with("_.._report.pdf"));
}

// ---- reads and delete ----

#[tokio::test]
async fn list_and_public_url() {
    let (_, service) = setup();
    let survey_id = Uuid::new_v4();
    let response_id = Uuid::new_v4();
    let other_response = Uuid::new_v4();

    service
        .save_media_evidence(photo(survey_id, response_id))
        .await
        .unwrap();
    service
        .save_media_evidence(photo(survey_id, other_response))
        .await
        .unwrap();

    let for_response = service.list_for_response(response_id).await.unwrap();
    assert_eq!(for_response.len(), 1);
    assert_eq!(for_response[0].response_id, response_id);
    assert_eq!(for_response[0].evidence_type, EvidenceType::Defect);

    let for_survey = service.list_for_survey(survey_id).await.unwrap();
    assert_eq!(for_survey.len(), 2);

    assert_eq!(
        service.public_url(&for_response[0]),
        format!(
            "memory://{DEFAULT_MEDIA_BUCKET}/{}",
            for_response[0].storage_path
        )
    );
}

#[tokio::test]
async fn delete_removes_row_and_object() {
    let (backend, service) = setup();
    let media_id = service
        .save_media_evidence(photo(Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap();

    service.delete_media_evidence(media_id).await.unwrap();

    assert!(backend.rows(TABLE).await.is_empty());
    assert!(backend.blob_paths(DEFAULT_MEDIA_BUCKET).await.is_empty());
    assert_matches!(
        service.delete_media_evidence(media_id).await,
        Err(ClientError::Core(CoreError::NotFound { .. }))
    );
}
