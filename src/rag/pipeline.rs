//! Staged answer pipeline: Analyze -> Search -> Match -> Generate -> Complete
//!
//! Each submitted query runs in its own task and walks the stages in strict
//! order. Progress is published over a channel as [`PipelineEvent`]s; the
//! caller consumes them through a [`PipelineRunHandle`], either by pulling
//! events or by registering callbacks and awaiting [`PipelineRunHandle::wait`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::info_span;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::config::StagePacing;
use crate::errors::AskDeskError;
use crate::errors::Result;
use crate::models::{AnswerTurn, PipelineRun, PipelineStatus};
use crate::rag::{FollowUpCatalog, ResponseComposer, Retriever};
use crate::store::DocumentStore;

/// Progress published by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The run entered a new stage; carries a snapshot of the run
    Stage(PipelineRun),
    /// The run finished with an answer
    Completed(AnswerTurn),
    /// The run was cancelled; nothing follows
    Cancelled,
}

impl PipelineEvent {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Stage(_))
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(AnswerTurn),
    Cancelled,
}

impl RunOutcome {
    #[must_use]
    pub fn into_answer(self) -> Option<AnswerTurn> {
        match self {
            Self::Completed(answer) => Some(answer),
            Self::Cancelled => None,
        }
    }
}

type StageCallback = Box<dyn FnMut(&PipelineRun) + Send>;
type CompleteCallback = Box<dyn FnOnce(&AnswerTurn) + Send>;

/// Caller's handle on one in-flight run.
///
/// Dropping the handle cancels the run.
pub struct PipelineRunHandle {
    run_id: Uuid,
    events: mpsc::UnboundedReceiver<PipelineEvent>,
    cancel: CancellationToken,
    finished: bool,
    stage_callbacks: Vec<StageCallback>,
    complete_callbacks: Vec<CompleteCallback>,
}

impl PipelineRunHandle {
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Call `callback` for every stage event, in stage order
    #[must_use]
    pub fn on_stage_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&PipelineRun) + Send + 'static,
    {
        self.stage_callbacks.push(Box::new(callback));
        self
    }

    /// Call `callback` once with the answer if the run completes
    #[must_use]
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&AnswerTurn) + Send + 'static,
    {
        self.complete_callbacks.push(Box::new(callback));
        self
    }

    /// Abandon the run. No stage or completion event is delivered afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this run, usable from callbacks or other tasks
    #[must_use]
    pub fn canceller(&self) -> CancellationToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Next event of the run, or `None` once a terminal event was returned
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        if self.finished {
            return None;
        }

        // Cancellation wins over anything already queued
        let event = if self.cancel.is_cancelled() {
            PipelineEvent::Cancelled
        } else {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => PipelineEvent::Cancelled,
                received = self.events.recv() => received.unwrap_or(PipelineEvent::Cancelled),
            }
        };

        if event.is_terminal() {
            self.finished = true;
        }
        Some(event)
    }

    /// Drive the run to its end, dispatching registered callbacks
    pub async fn wait(mut self) -> RunOutcome {
        while let Some(event) = self.next_event().await {
            match event {
                PipelineEvent::Stage(run) => {
                    for callback in &mut self.stage_callbacks {
                        callback(&run);
                    }
                }
                PipelineEvent::Completed(answer) => {
                    for callback in self.complete_callbacks.drain(..) {
                        callback(&answer);
                    }
                    return RunOutcome::Completed(answer);
                }
                PipelineEvent::Cancelled => return RunOutcome::Cancelled,
            }
        }
        RunOutcome::Cancelled
    }
}

impl Drop for PipelineRunHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for PipelineRunHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunHandle")
            .field("run_id", &self.run_id)
            .field("finished", &self.finished)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Complete answer pipeline
#[derive(Clone)]
pub struct RagPipeline {
    retriever: Retriever,
    composer: ResponseComposer,
    pacing: StagePacing,
}

impl RagPipeline {
    /// Build a pipeline over `store` using retrieval, follow-up and pacing settings from `config`
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        let retriever = Retriever::new(store.clone(), config.top_k());
        let follow_ups =
            FollowUpCatalog::builtin().with_overrides(config.follow_ups.categories.clone());
        let composer = ResponseComposer::new(store, follow_ups, config.max_sources());
        Self::from_parts(retriever, composer, config.stage_pacing())
    }

    /// Create from existing components
    #[must_use]
    pub fn from_parts(retriever: Retriever, composer: ResponseComposer, pacing: StagePacing) -> Self {
        Self {
            retriever,
            composer,
            pacing,
        }
    }

    /// Start a run for `query`. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// - `EmptyQuery` when the query is empty or whitespace; no run is started
    pub fn submit(&self, query: &str) -> Result<PipelineRunHandle> {
        if query.trim().is_empty() {
            return Err(AskDeskError::EmptyQuery);
        }

        let run = PipelineRun::new(query);
        let run_id = run.run_id;
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        info!("Submitting query {}: {}", run_id, query);

        let pipeline = self.clone();
        let token = cancel.clone();
        let span = info_span!("pipeline_run", run_id = %run_id);
        tokio::spawn(async move { pipeline.drive(run, tx, token).await }.instrument(span));

        Ok(PipelineRunHandle {
            run_id,
            events: rx,
            cancel,
            finished: false,
            stage_callbacks: Vec::new(),
            complete_callbacks: Vec::new(),
        })
    }

    async fn drive(
        self,
        mut run: PipelineRun,
        events: mpsc::UnboundedSender<PipelineEvent>,
        cancel: CancellationToken,
    ) {
        let started = Instant::now();
        let documents_scanned = self.retriever.store().len();
        let mut stages = Stages {
            events: &events,
            cancel: &cancel,
            pacing: self.pacing,
        };

        // Step 1: Understand the question
        if !stages.enter(&mut run, PipelineStatus::Analyzing).await {
            return;
        }

        // Step 2: Search the knowledge base
        if !stages.enter(&mut run, PipelineStatus::Searching).await {
            return;
        }
        let outcome = self.retriever.search(&run.query);

        // Step 3: Publish matches
        run.record_search(&outcome, documents_scanned);
        if !stages.enter(&mut run, PipelineStatus::Matching).await {
            return;
        }

        // Step 4: Compose the answer
        let mut answer = self.composer.compose(&run.query, &outcome.results);
        if !stages.enter(&mut run, PipelineStatus::Generating).await {
            return;
        }

        run.elapsed_ms = started.elapsed().as_millis() as u64;
        if !stages.enter(&mut run, PipelineStatus::Completed).await {
            return;
        }

        info!(
            "Run completed in {}ms: {} keywords, {}/{} documents matched, confidence {}",
            run.elapsed_ms,
            run.matched_keywords.len(),
            run.documents_matched,
            run.documents_scanned,
            answer.confidence
        );

        answer.process = Some(run);
        let _ = events.send(PipelineEvent::Completed(answer));
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.retriever.store()
    }
}

/// Publishes stage transitions for one run
struct Stages<'a> {
    events: &'a mpsc::UnboundedSender<PipelineEvent>,
    cancel: &'a CancellationToken,
    pacing: StagePacing,
}

impl Stages<'_> {
    /// Advance `run` to `status`, publish it, then dwell for the configured pacing.
    /// Returns false when the run was cancelled or nobody is listening.
    async fn enter(&mut self, run: &mut PipelineRun, status: PipelineStatus) -> bool {
        if self.cancel.is_cancelled() {
            debug!("Run cancelled before {}", status);
            return false;
        }

        if !run.advance(status) {
            return false;
        }
        debug!("Stage {} ({}/{})", status, run.current_step, run.total_steps);

        if self.events.send(PipelineEvent::Stage(run.clone())).is_err() {
            self.cancel.cancel();
            return false;
        }

        let delay = self.pacing.delay_for(status);
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::select! {
                () = self.cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {}
            }
        }

        !self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::models::{AnswerOutcome, Document};
    use crate::store::InMemoryStore;

    fn doc(id: &str, category: &str, keywords: &[&str], content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: format!("title-{id}"),
            category: category.to_string(),
            last_updated: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            content: content.to_string(),
            snippet: String::new(),
        }
    }

    fn pipeline() -> RagPipeline {
        let store = InMemoryStore::new(vec![
            doc("hr", "人力资源", &["休假", "年假"], "年假制度"),
            doc("it", "IT支持", &["电脑", "网络"], "网络故障"),
        ])
        .unwrap();
        RagPipeline::new(Arc::new(store), &AppConfig::default())
    }

    /// Lists every document but cannot resolve `missing`
    struct DanglingStore {
        documents: Vec<Document>,
        missing: String,
    }

    impl DocumentStore for DanglingStore {
        fn list_documents(&self) -> &[Document] {
            &self.documents
        }

        fn get_document(&self, id: &str) -> Option<&Document> {
            if id == self.missing {
                return None;
            }
            self.documents.iter().find(|d| d.id == id)
        }
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let p = pipeline();
        assert!(matches!(p.submit(""), Err(AskDeskError::EmptyQuery)));
        assert!(matches!(p.submit("   \n"), Err(AskDeskError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_stages_arrive_in_order() {
        let mut handle = pipeline().submit("如何申请年假").unwrap();
        let mut statuses = Vec::new();
        let mut answer = None;

        while let Some(event) = handle.next_event().await {
            match event {
                PipelineEvent::Stage(run) => statuses.push(run.status),
                PipelineEvent::Completed(a) => answer = Some(a),
                PipelineEvent::Cancelled => panic!("unexpected cancel"),
            }
        }

        assert_eq!(statuses, PipelineStatus::PUBLISHED.to_vec());
        let answer = answer.unwrap();
        assert_eq!(answer.outcome, AnswerOutcome::Answered);
        assert_eq!(answer.content, "年假制度");
        assert!(handle.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_matching_stage_publishes_results() {
        let mut handle = pipeline().submit("如何申请年假").unwrap();
        let mut snapshots = Vec::new();
        while let Some(PipelineEvent::Stage(run)) = handle.next_event().await {
            snapshots.push(run);
        }

        let searching = &snapshots[1];
        assert_eq!(searching.status, PipelineStatus::Searching);
        assert!(searching.matched_keywords.is_empty());
        assert_eq!(searching.documents_scanned, 0);

        let matching = &snapshots[2];
        assert_eq!(matching.status, PipelineStatus::Matching);
        assert_eq!(matching.current_step, 3);
        assert_eq!(matching.matched_keywords, vec!["年假"]);
        assert_eq!(matching.documents_scanned, 2);
        assert_eq!(matching.documents_matched, 1);
        assert_eq!(matching.top_results[0].document_id, "hr");
    }

    #[tokio::test]
    async fn test_callbacks_and_process_snapshot() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let completed = Arc::new(Mutex::new(None));

        let seen_in_cb = seen.clone();
        let completed_in_cb = completed.clone();
        let outcome = pipeline()
            .submit("网络连不上")
            .unwrap()
            .on_stage_change(move |run| seen_in_cb.lock().unwrap().push(run.current_step))
            .on_complete(move |answer| *completed_in_cb.lock().unwrap() = Some(answer.confidence))
            .wait()
            .await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4, 4]);
        let answer = outcome.into_answer().unwrap();
        assert_eq!(*completed.lock().unwrap(), Some(answer.confidence));

        let process = answer.process.unwrap();
        assert_eq!(process.status, PipelineStatus::Completed);
        assert_eq!(process.documents_matched, 1);
        assert_eq!(answer.related_questions[2], "VPN配置方法");
    }

    #[tokio::test]
    async fn test_no_match_completes_with_fallback() {
        let outcome = pipeline().submit("xyz123").unwrap().wait().await;
        let answer = outcome.into_answer().unwrap();
        assert_eq!(answer.outcome, AnswerOutcome::NoMatch);
        assert_eq!(answer.confidence, 0);
        assert!(answer.process.unwrap().matched_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_before_first_event() {
        let handle = pipeline().submit("如何申请年假").unwrap();
        handle.cancel();
        assert_eq!(handle.wait().await, RunOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_during_matching_stops_delivery() {
        let handle = pipeline().submit("如何申请年假").unwrap();
        let token = handle.canceller();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let fired = Arc::new(Mutex::new(false));

        let seen_in_cb = seen.clone();
        let fired_in_cb = fired.clone();
        let outcome = handle
            .on_stage_change(move |run| {
                seen_in_cb.lock().unwrap().push(run.status);
                if run.status == PipelineStatus::Matching {
                    token.cancel();
                }
            })
            .on_complete(move |_| *fired_in_cb.lock().unwrap() = true)
            .wait()
            .await;

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(!*fired.lock().unwrap());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                PipelineStatus::Analyzing,
                PipelineStatus::Searching,
                PipelineStatus::Matching
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_run_can_be_cancelled_mid_stage() {
        let store = InMemoryStore::new(vec![doc("hr", "人力资源", &["年假"], "年假")]).unwrap();
        let mut config = AppConfig::default();
        config.pipeline.stage_pacing_ms = StagePacing::animated();
        let p = RagPipeline::new(Arc::new(store), &config);

        let mut handle = p.submit("年假").unwrap();
        let first = handle.next_event().await.unwrap();
        assert!(matches!(first, PipelineEvent::Stage(ref run) if run.status == PipelineStatus::Analyzing));

        handle.cancel();
        assert_eq!(handle.next_event().await, Some(PipelineEvent::Cancelled));
        assert_eq!(handle.next_event().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_run_elapsed_time() {
        let store = InMemoryStore::new(vec![doc("hr", "人力资源", &["年假"], "年假")]).unwrap();
        let mut config = AppConfig::default();
        config.pipeline.stage_pacing_ms = StagePacing::animated();
        let p = RagPipeline::new(Arc::new(store), &config);

        let answer = p.submit("年假").unwrap().wait().await.into_answer().unwrap();
        // analyzing + searching + matching + generating dwell before completion is stamped
        assert!(answer.process.unwrap().elapsed_ms >= 2000);
    }

    #[tokio::test]
    async fn test_unresolvable_top_result_still_completes() {
        let store = DanglingStore {
            documents: vec![
                doc("ghost", "人力资源", &["年假", "休假"], "不可见"),
                doc("hr", "人力资源", &["年假"], "年假制度"),
            ],
            missing: "ghost".to_string(),
        };
        let mut handle = RagPipeline::new(Arc::new(store), &AppConfig::default())
            .submit("年假和休假")
            .unwrap();

        let mut statuses = Vec::new();
        let mut answer = None;
        while let Some(event) = handle.next_event().await {
            match event {
                PipelineEvent::Stage(run) => statuses.push(run.status),
                PipelineEvent::Completed(a) => answer = Some(a),
                PipelineEvent::Cancelled => panic!("unexpected cancel"),
            }
        }

        assert_eq!(statuses.last(), Some(&PipelineStatus::Completed));
        let answer = answer.unwrap();
        assert_eq!(answer.outcome, AnswerOutcome::CorpusInconsistency);
        assert_eq!(answer.content, crate::rag::composer::CORPUS_ERROR_MESSAGE);
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].title, "title-hr");
    }
}
