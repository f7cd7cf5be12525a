//! Data-loading handles, one per view.
//!
//! A [`Query`] owns the `{data, loading, error}` state of one read and can
//! re-run it with [`Query::refetch`]. Handles share nothing with each other;
//! two handles over the same rows fetch independently. Fetches are never
//! cancelled: a result that arrives late still lands in the state.
//!
//! The `use_*` constructors start their first fetch immediately and must be
//! called from within a Tokio runtime.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use shipcheck_core::types::RecordId;
use shipcheck_core::utility::SupplierPalette;
use shipcheck_db::models::checklist_response::ChecklistResponse;
use shipcheck_db::models::checklist_template::ChecklistTemplate;
use shipcheck_db::models::media_evidence::MediaEvidence;
use shipcheck_db::models::survey::Survey;
use shipcheck_db::models::survey_note::SurveyNote;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::ClientResult;
use crate::services::{
    ChecklistService, MediaEvidenceService, NoteService, SurveyService, UtilityDashboard,
    UtilityService,
};
use crate::state::AppState;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;

/// Observable state of a [`Query`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Result of the last successful fetch. Kept across failed refetches.
    pub data: Option<T>,
    /// `true` while at least one fetch is in flight.
    pub loading: bool,
    /// User-facing message of the last failed fetch, cleared when a new
    /// fetch starts.
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

struct Slot<T> {
    state: QueryState<T>,
    in_flight: usize,
}

/// A re-runnable read with observable state.
pub struct Query<T> {
    slot: Arc<watch::Sender<Slot<T>>>,
    fetcher: Fetcher<T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<T> Query<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle handle. Nothing is fetched until [`refetch`](Self::refetch).
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let (slot, _) = watch::channel(Slot {
            state: QueryState::default(),
            in_flight: 0,
        });
        Self {
            slot: Arc::new(slot),
            fetcher: Arc::new(move || fetch().boxed()),
        }
    }

    /// Create a handle and start its first fetch in the background.
    pub fn mount<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let query = Self::new(fetch);
        query.spawn_refetch();
        query
    }

    pub fn snapshot(&self) -> QueryState<T> {
        self.slot.borrow().state.clone()
    }

    /// Run the fetch again and wait for it to land.
    pub async fn refetch(&self) {
        self.begin();
        let result = (self.fetcher)().await;
        self.finish(result);
    }

    /// Run the fetch again in the background. `loading` is set before this
    /// returns.
    pub fn spawn_refetch(&self) -> JoinHandle<()> {
        self.begin();
        let fetch = (self.fetcher)();
        let query = self.clone();
        tokio::spawn(async move {
            let result = fetch.await;
            query.finish(result);
        })
    }

    /// Wait until no fetch is in flight and return the state at that point.
    pub async fn settled(&self) -> QueryState<T> {
        let mut rx = self.slot.subscribe();
        let settled = rx
            .wait_for(|slot| slot.in_flight == 0)
            .await
            .map(|slot| slot.state.clone());
        // The sender lives in `self`, so the channel cannot close here.
        settled.unwrap_or_else(|_| self.snapshot())
    }

    fn begin(&self) {
        self.slot.send_modify(|slot| {
            slot.in_flight += 1;
            slot.state.loading = true;
            slot.state.error = None;
        });
    }

    fn finish(&self, result: ClientResult<T>) {
        let result = result.map_err(|e| {
            tracing::warn!(error = %e, "Query fetch failed");
            e.user_message()
        });
        self.slot.send_modify(|slot| {
            slot.in_flight = slot.in_flight.saturating_sub(1);
            slot.state.loading = slot.in_flight > 0;
            match result {
                Ok(data) => slot.state.data = Some(data),
                Err(message) => slot.state.error = Some(message),
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Per-view constructors
// ---------------------------------------------------------------------------

/// All surveys, most recently updated first.
pub fn use_surveys(state: &AppState) -> Query<Vec<Survey>> {
    let service = SurveyService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.list_surveys().await }
    })
}

pub fn use_survey(state: &AppState, survey_id: RecordId) -> Query<Survey> {
    let service = SurveyService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.get_survey(survey_id).await }
    })
}

pub fn use_checklist_responses(
    state: &AppState,
    survey_id: RecordId,
) -> Query<Vec<ChecklistResponse>> {
    let service = ChecklistService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.list_responses(survey_id).await }
    })
}

/// Evidence attached to one checklist response.
pub fn use_media_evidence(state: &AppState, response_id: RecordId) -> Query<Vec<MediaEvidence>> {
    let service = MediaEvidenceService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.list_for_response(response_id).await }
    })
}

pub fn use_survey_notes(state: &AppState, survey_id: RecordId) -> Query<Vec<SurveyNote>> {
    let service = NoteService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.list_notes(survey_id).await }
    })
}

pub fn use_checklist_templates(state: &AppState) -> Query<Vec<ChecklistTemplate>> {
    let service = ChecklistService::new(state.clone());
    Query::mount(move || {
        let service = service.clone();
        async move { service.list_templates().await }
    })
}

pub fn use_utility_dashboard(
    state: &AppState,
    palette: SupplierPalette,
    user_id: Option<RecordId>,
) -> Query<UtilityDashboard> {
    let service = UtilityService::new(state.clone(), palette);
    Query::mount(move || {
        let service = service.clone();
        async move { service.dashboard(user_id).await }
    })
}
