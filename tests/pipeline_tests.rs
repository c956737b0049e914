//! End-to-end tests for retrieval and the staged pipeline over fixture corpora

use std::sync::Arc;
use std::sync::Mutex;

use askdesk::config::{AppConfig, StagePacing};
use askdesk::models::{AnswerOutcome, Document, PipelineStatus};
use askdesk::rag::{
    extract_keywords, fallback_message, rank, PipelineEvent, RagPipeline, RelevanceScorer,
    Retriever, RunOutcome,
};
use askdesk::store::{sample_corpus, DocumentStore, InMemoryStore};
use chrono::NaiveDate;

fn doc(id: &str, keywords: &[&str], content: &str) -> Document {
    Document {
        id: id.to_string(),
        title: format!("Title {id}"),
        category: "人力资源".to_string(),
        last_updated: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        keywords: keywords.iter().map(ToString::to_string).collect(),
        content: content.to_string(),
        snippet: format!("snippet {id}"),
    }
}

fn store(docs: Vec<Document>) -> Arc<dyn DocumentStore> {
    Arc::new(InMemoryStore::new(docs).unwrap())
}

fn pipeline(docs: Vec<Document>) -> RagPipeline {
    RagPipeline::new(store(docs), &AppConfig::default())
}

const QUERIES: [&str; 8] = [
    "如何申请年假",
    "报销需要什么发票",
    "电脑坏了 IT 怎么报修",
    "本月销售数据",
    "营销活动 ROI 复盘",
    "xyz123",
    "病假 年假 调休 福利 请假 假期 休假",
    "差旅费用报销审批预算",
];

// ====== Scoring and Ranking Properties ======

#[test]
fn test_scores_are_bounded() {
    let corpus = InMemoryStore::new(sample_corpus()).unwrap();
    let scorer = RelevanceScorer::default();
    for query in QUERIES {
        let keywords = extract_keywords(query, corpus.list_documents());
        for document in corpus.list_documents() {
            let score = scorer.score(&keywords, document);
            assert!(score <= 100, "{query} / {}: {score}", document.id);
        }
    }
}

#[test]
fn test_rank_is_sorted_stable_and_bounded() {
    let corpus = InMemoryStore::new(sample_corpus()).unwrap();
    let documents = corpus.list_documents();
    let scorer = RelevanceScorer::default();

    for query in QUERIES {
        let keywords = extract_keywords(query, documents);
        for k in [1, 2, 5] {
            let ranked = rank(documents, &keywords, &scorer, k);
            assert!(ranked.len() <= k);

            for pair in ranked.windows(2) {
                assert!(pair[0].relevance_score >= pair[1].relevance_score);
                if pair[0].relevance_score == pair[1].relevance_score {
                    let first = documents.iter().position(|d| d.id == pair[0].document_id);
                    let second = documents.iter().position(|d| d.id == pair[1].document_id);
                    assert!(first < second, "tie reordered for {query}");
                }
            }
        }
    }
}

#[test]
fn test_search_is_idempotent() {
    let retriever = Retriever::new(store(sample_corpus()), 5);
    for query in QUERIES {
        let first = serde_json::to_vec(&retriever.search(query).results).unwrap();
        let second = serde_json::to_vec(&retriever.search(query).results).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_no_keywords_means_no_results() {
    // Bodies mention the query, the vocabulary does not
    let retriever = Retriever::new(
        store(vec![doc("a", &["休假"], "hello world"), doc("b", &["年假"], "hello")]),
        5,
    );
    let outcome = retriever.search("hello");
    assert!(outcome.matched_keywords.is_empty());
    assert!(outcome.results.is_empty());
}

// ====== Scenarios ======

#[tokio::test]
async fn test_leave_question_finds_leave_policy() {
    let p = pipeline(vec![
        doc("other", &["报销"], "报销流程"),
        doc("leave", &["休假", "年假"], "年假制度说明"),
    ]);

    let outcome = p.retriever().search("如何申请年假");
    assert!(outcome.matched_keywords.contains(&"年假".to_string()));
    assert_eq!(outcome.results[0].document_id, "leave");
    assert!(outcome.results[0].relevance_score >= 20);

    let answer = p.submit("如何申请年假").unwrap().wait().await.into_answer().unwrap();
    assert_eq!(answer.content, "年假制度说明");
}

#[tokio::test]
async fn test_unmatched_query_falls_back() {
    let p = pipeline(sample_corpus());
    let outcome = p.retriever().search("xyz123");
    assert!(outcome.matched_keywords.is_empty());
    assert!(outcome.results.is_empty());

    let answer = p.submit("xyz123").unwrap().wait().await.into_answer().unwrap();
    assert_eq!(answer.outcome, AnswerOutcome::NoMatch);
    assert_eq!(answer.content, fallback_message("xyz123"));
    assert_eq!(answer.confidence, 0);
    assert!(answer.sources.is_empty());
}

#[test]
fn test_tied_scores_keep_corpus_order() {
    let retriever = Retriever::new(
        store(vec![
            doc("first", &["alpha", "beta"], "alpha"),
            doc("second", &["alpha", "beta"], "alpha"),
        ]),
        5,
    );
    let outcome = retriever.search("alpha beta");
    let ranked: Vec<_> = outcome
        .results
        .iter()
        .map(|r| (r.document_id.as_str(), r.relevance_score))
        .collect();
    assert_eq!(ranked, vec![("first", 45), ("second", 45)]);
}

#[tokio::test]
async fn test_cancel_in_matching_suppresses_completion() {
    let p = pipeline(sample_corpus());
    let handle = p.submit("如何申请年假").unwrap();
    let token = handle.canceller();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(0_u32));
    let seen_cb = seen.clone();
    let completed_cb = completed.clone();

    let outcome = handle
        .on_stage_change(move |run| {
            seen_cb.lock().unwrap().push(run.status);
            if run.status == PipelineStatus::Matching {
                token.cancel();
            }
        })
        .on_complete(move |_| *completed_cb.lock().unwrap() += 1)
        .wait()
        .await;

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(*completed.lock().unwrap(), 0);
    assert_eq!(seen.lock().unwrap().last(), Some(&PipelineStatus::Matching));
    assert!(!seen.lock().unwrap().contains(&PipelineStatus::Generating));
}

#[tokio::test]
async fn test_sources_are_min_of_three_and_ranked() {
    for n in 0..6 {
        let docs: Vec<_> = (0..n)
            .map(|i| doc(&format!("d{i}"), &["alpha"], ""))
            .chain(std::iter::once(doc("filler", &["omega"], "")))
            .collect();
        let p = pipeline(docs);
        let answer = p.submit("alpha").unwrap().wait().await.into_answer().unwrap();
        let ranked = answer.process.as_ref().unwrap().documents_matched;
        assert_eq!(answer.sources.len(), ranked.min(3), "n = {n}");
    }
}

// ====== Stage Machine ======

#[tokio::test]
async fn test_stage_snapshots_are_monotonic() {
    let p = pipeline(sample_corpus());
    for query in QUERIES {
        let mut handle = p.submit(query).unwrap();
        let mut previous = PipelineStatus::Idle;
        let mut completions = 0;

        while let Some(event) = handle.next_event().await {
            match event {
                PipelineEvent::Stage(run) => {
                    assert!(run.status > previous);
                    assert!(run.documents_matched <= run.documents_scanned);
                    assert!(run.top_results.len() <= 5);
                    previous = run.status;
                }
                PipelineEvent::Completed(_) => completions += 1,
                PipelineEvent::Cancelled => panic!("{query} cancelled"),
            }
        }

        assert_eq!(previous, PipelineStatus::Completed);
        assert_eq!(completions, 1);
    }
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let p = pipeline(sample_corpus());
    let runs: Vec<_> = QUERIES.iter().map(|q| p.submit(q).unwrap()).collect();
    let ids: std::collections::HashSet<_> = runs.iter().map(|h| h.run_id()).collect();
    assert_eq!(ids.len(), QUERIES.len());

    let outcomes = futures::future::join_all(runs.into_iter().map(|h| h.wait())).await;
    for (query, outcome) in QUERIES.iter().zip(outcomes) {
        let answer = outcome.into_answer().unwrap();
        assert_eq!(&answer.process.unwrap().query, query);
    }
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_paced_run() {
    let mut config = AppConfig::default();
    config.pipeline.stage_pacing_ms = StagePacing::animated();
    let p = RagPipeline::new(store(sample_corpus()), &config);

    let mut handle = p.submit("如何申请年假").unwrap();
    let token = handle.canceller();
    assert!(matches!(handle.next_event().await, Some(PipelineEvent::Stage(_))));

    drop(handle);
    assert!(token.is_cancelled());
}

#[test]
fn test_empty_query_starts_no_run() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let p = pipeline(sample_corpus());
        assert!(p.submit("").is_err());
        assert!(p.submit(" \t ").is_err());
    });
}
