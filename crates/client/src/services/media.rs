//! Media evidence: object upload followed by a metadata row.
//!
//! The two writes are sequential and not transactional. If the upload fails
//! nothing is recorded; if the metadata insert fails the uploaded object is
//! left in the bucket and only logged.

use chrono::Utc;
use shipcheck_core::checklist::EvidenceType;
use shipcheck_core::error::CoreError;
use shipcheck_core::media::{
    media_file_name, media_storage_path, validate_media_upload, DEFAULT_MIME_TYPE,
};
use shipcheck_core::types::RecordId;
use shipcheck_db::models::media_evidence::{CreateMediaEvidence, MediaEvidence};
use shipcheck_db::repositories::MediaEvidenceRepo;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::state::AppState;

/// A file attached to a checklist response, as picked by the user.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub survey_id: RecordId,
    pub response_id: RecordId,
    pub original_name: String,
    /// Falls back to `application/octet-stream` when unknown.
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
    pub evidence_type: EvidenceType,
}

#[derive(Clone)]
pub struct MediaEvidenceService {
    state: AppState,
}

impl MediaEvidenceService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Upload the file and record its metadata. Returns the new media id.
    pub async fn save_media_evidence(&self, upload: MediaUpload) -> ClientResult<RecordId> {
        let size = upload.bytes.len() as u64;
        validate_media_upload(&upload.original_name, size)?;

        let media_id = Uuid::new_v4();
        let file_name = media_file_name(
            upload.evidence_type,
            Utc::now().timestamp_millis(),
            &upload.original_name,
        );
        let storage_path = media_storage_path(upload.survey_id, media_id, &file_name);
        let mime_type = upload
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let bucket = self.state.bucket();

        if let Err(e) = self
            .state
            .blobs
            .upload(bucket, &storage_path, upload.bytes, &mime_type)
            .await
        {
            tracing::error!(path = %storage_path, error = %e, "Media upload failed");
            return Err(e.into());
        }
        tracing::debug!(path = %storage_path, size, "Media uploaded");

        let metadata = CreateMediaEvidence {
            id: media_id,
            response_id: upload.response_id,
            survey_id: upload.survey_id,
            file_name,
            mime_type,
            file_size: size as i64,
            storage_path,
            evidence_type: upload.evidence_type,
        };

        if let Err(e) = MediaEvidenceRepo::create(self.state.records.as_ref(), &metadata).await {
            tracing::warn!(
                media_id = %media_id,
                path = %metadata.storage_path,
                error = %e,
                "Media metadata insert failed; uploaded object left in storage"
            );
            return Err(e.into());
        }

        tracing::info!(
            media_id = %media_id,
            response_id = %upload.response_id,
            evidence_type = upload.evidence_type.as_str(),
            "Media evidence saved"
        );
        Ok(media_id)
    }

    pub async fn list_for_response(&self, response_id: RecordId) -> ClientResult<Vec<MediaEvidence>> {
        Ok(MediaEvidenceRepo::list_by_response(self.state.records.as_ref(), response_id).await?)
    }

    pub async fn list_for_survey(&self, survey_id: RecordId) -> ClientResult<Vec<MediaEvidence>> {
        Ok(MediaEvidenceRepo::list_by_survey(self.state.records.as_ref(), survey_id).await?)
    }

    /// Public URL of the stored object.
    pub fn public_url(&self, media: &MediaEvidence) -> String {
        self.state
            .blobs
            .public_url(self.state.bucket(), &media.storage_path)
    }

    /// Delete the metadata row, then the object.
    pub async fn delete_media_evidence(&self, id: RecordId) -> ClientResult<()> {
        let media = MediaEvidenceRepo::find_by_id(self.state.records.as_ref(), id)
            .await?
            .ok_or_else(|| {
                ClientError::Core(CoreError::NotFound {
                    entity: "Media evidence",
                    id: id.to_string(),
                })
            })?;

        MediaEvidenceRepo::delete(self.state.records.as_ref(), id).await?;
        self.state
            .blobs
            .remove(self.state.bucket(), &[media.storage_path.clone()])
            .await?;

        tracing::info!(media_id = %id, path = %media.storage_path, "Media evidence deleted");
        Ok(())
    }
}
