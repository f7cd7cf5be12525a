//! Integration tests for checklist responses, notes, media metadata,
//! templates and utility readings against the in-memory backend.

use chrono::NaiveDate;
use serde_json::json;
use shipcheck_core::checklist::{EvidenceType, ResponseValue};
use shipcheck_core::types::RecordId;
use shipcheck_core::utility::UtilityKind;
use shipcheck_db::models::checklist_response::CreateChecklistResponse;
use shipcheck_db::models::media_evidence::CreateMediaEvidence;
use shipcheck_db::models::survey_note::{CreateSurveyNote, UpdateSurveyNote};
use shipcheck_db::models::utility_reading::CreateUtilityReading;
use shipcheck_db::repositories::{
    checklist_template_repo, ChecklistResponseRepo, ChecklistTemplateRepo, MediaEvidenceRepo,
    SurveyNoteRepo, UtilityReadingRepo,
};
use shipcheck_db::MemoryBackend;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn answer(survey_id: RecordId, question_id: &str, value: ResponseValue) -> CreateChecklistResponse {
    CreateChecklistResponse {
        survey_id,
        question_id: question_id.to_string(),
        category: "hull".to_string(),
        question_text: "Is the hull free of visible corrosion?".to_string(),
        response: value,
        is_mandatory: true,
        notes: None,
        zone: Some("bow".to_string()),
        asset_tag: None,
        qr_code: None,
        rfid_tag: None,
    }
}

fn note(survey_id: RecordId, zone: &str, content: &str) -> CreateSurveyNote {
    CreateSurveyNote {
        survey_id,
        zone: zone.to_string(),
        section: None,
        content: content.to_string(),
    }
}

fn reading(utility: UtilityKind, date: (i32, u32, u32), usage: f64) -> CreateUtilityReading {
    CreateUtilityReading {
        user_id: None,
        utility,
        supplier: "Volt".to_string(),
        reading_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        usage,
        unit: None,
        cost: usage * 0.3,
        notes: None,
    }
    .with_default_unit()
}

// ---------------------------------------------------------------------------
// Checklist responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_save_and_overwrite() {
    let backend = MemoryBackend::new();
    let survey_id = RecordId::new_v4();

    let id = ChecklistResponseRepo::save(&backend, &answer(survey_id, "q1", ResponseValue::No), None)
        .await
        .unwrap();
    let same = ChecklistResponseRepo::save(
        &backend,
        &answer(survey_id, "q1", ResponseValue::Yes),
        Some(id),
    )
    .await
    .unwrap();
    assert_eq!(id, same);

    let found = ChecklistResponseRepo::find_for_question(&backend, survey_id, "q1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.response, ResponseValue::Yes);
    assert_eq!(found.zone.as_deref(), Some("bow"));

    let all = ChecklistResponseRepo::list_by_survey(&backend, survey_id).await.unwrap();
    assert_eq!(all.len(), 1);

    assert!(ChecklistResponseRepo::delete(&backend, id).await.unwrap());
    assert!(ChecklistResponseRepo::find_by_id(&backend, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notes_are_listed_in_creation_order_and_by_zone() {
    let backend = MemoryBackend::new();
    let survey_id = RecordId::new_v4();

    let first = SurveyNoteRepo::create(&backend, &note(survey_id, "bridge", "Radar ok"))
        .await
        .unwrap();
    let second = SurveyNoteRepo::create(&backend, &note(survey_id, "engine", "Oil leak"))
        .await
        .unwrap();
    SurveyNoteRepo::create(&backend, &note(RecordId::new_v4(), "bridge", "Other survey"))
        .await
        .unwrap();

    let notes = SurveyNoteRepo::list_by_survey(&backend, survey_id).await.unwrap();
    let ids: Vec<_> = notes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let engine = SurveyNoteRepo::list_by_zone(&backend, survey_id, "engine")
        .await
        .unwrap();
    assert_eq!(engine.len(), 1);
    assert_eq!(engine[0].content, "Oil leak");
}

#[tokio::test]
async fn note_update_changes_only_given_fields() {
    let backend = MemoryBackend::new();
    let created = SurveyNoteRepo::create(&backend, &note(RecordId::new_v4(), "bridge", "Draft"))
        .await
        .unwrap();

    let update = UpdateSurveyNote {
        content: Some("Final".to_string()),
        ..Default::default()
    };
    let updated = SurveyNoteRepo::update(&backend, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.content, "Final");
    assert_eq!(updated.zone, "bridge");

    let missing = SurveyNoteRepo::update(&backend, RecordId::new_v4(), &update)
        .await
        .unwrap();
    assert!(missing.is_none());

    assert!(SurveyNoteRepo::delete(&backend, created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Media metadata
// ---------------------------------------------------------------------------

#[tokio::test]
async fn media_metadata_keeps_client_generated_id() {
    let backend = MemoryBackend::new();
    let survey_id = RecordId::new_v4();
    let response_id = RecordId::new_v4();
    let media_id = RecordId::new_v4();

    let created = MediaEvidenceRepo::create(
        &backend,
        &CreateMediaEvidence {
            id: media_id,
            response_id,
            survey_id,
            file_name: "defect_1_hull.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            file_size: 1024,
            storage_path: format!("checklist/{survey_id}/{media_id}/defect_1_hull.jpg"),
            evidence_type: EvidenceType::Defect,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.id, media_id);
    assert!(created.created_at.is_some());

    let by_response = MediaEvidenceRepo::list_by_response(&backend, response_id)
        .await
        .unwrap();
    assert_eq!(by_response.len(), 1);
    let by_survey = MediaEvidenceRepo::list_by_survey(&backend, survey_id).await.unwrap();
    assert_eq!(by_survey[0].evidence_type, EvidenceType::Defect);
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn templates_are_listed_by_name() {
    let backend = MemoryBackend::new();
    let id = RecordId::new_v4();
    backend
        .seed(
            checklist_template_repo::TABLE,
            json!({
                "id": id.to_string(),
                "name": "Tanker",
                "category": "hull",
                "questions": [
                    { "id": "q1", "category": "hull", "text": "Hull plating", "is_mandatory": true },
                    { "id": "q2", "text": "Paint condition" }
                ]
            }),
        )
        .await;
    backend
        .seed(
            checklist_template_repo::TABLE,
            json!({ "id": RecordId::new_v4().to_string(), "name": "Bulk carrier" }),
        )
        .await;

    let templates = ChecklistTemplateRepo::list(&backend).await.unwrap();
    let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Bulk carrier", "Tanker"]);

    let tanker = ChecklistTemplateRepo::find_by_id(&backend, id).await.unwrap().unwrap();
    assert_eq!(tanker.questions.len(), 2);
    assert_eq!(tanker.mandatory_questions().count(), 1);
    assert_eq!(tanker.questions[1].category, "");

    let hull = ChecklistTemplateRepo::list_by_category(&backend, "hull").await.unwrap();
    assert_eq!(hull.len(), 1);
}

// ---------------------------------------------------------------------------
// Utility readings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readings_are_listed_newest_first() {
    let backend = MemoryBackend::new();
    UtilityReadingRepo::create(&backend, &reading(UtilityKind::Electricity, (2024, 1, 31), 100.0))
        .await
        .unwrap();
    let latest =
        UtilityReadingRepo::create(&backend, &reading(UtilityKind::Electricity, (2024, 2, 29), 90.0))
            .await
            .unwrap();
    UtilityReadingRepo::create(&backend, &reading(UtilityKind::Water, (2024, 2, 1), 5.0))
        .await
        .unwrap();

    let all = UtilityReadingRepo::list(&backend, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, latest.id);
    assert_eq!(all[0].unit, "kWh");

    let water = UtilityReadingRepo::list_by_utility(&backend, UtilityKind::Water)
        .await
        .unwrap();
    assert_eq!(water.len(), 1);
    assert_eq!(water[0].unit, "m3");

    assert!(UtilityReadingRepo::delete(&backend, latest.id).await.unwrap());
    assert_eq!(UtilityReadingRepo::list(&backend, None).await.unwrap().len(), 2);
}
