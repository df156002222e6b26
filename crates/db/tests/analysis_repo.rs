//! Repository tests for the `analyses` table, each against its own
//! migrated Postgres database.

use codesense_core::report::{Issue, Report};
use codesense_db::models::analysis::NewAnalysis;
use codesense_db::repositories::AnalysisRepo;
use sqlx::PgPool;

fn sample_report(score: i32) -> Report {
    Report {
        score,
        verdict: "Fair".to_string(),
        verdict_explanation: "Works but could be tighter.".to_string(),
        strengths: vec!["short".to_string()],
        issues: vec![Issue {
            title: "Magic number".to_string(),
            description: "Unexplained constant 86400.".to_string(),
            fix: "Name it SECONDS_PER_DAY.".to_string(),
            severity: "Low".to_string(),
        }],
        actionable_improvements: vec!["add a test".to_string()],
        refactored_code: "const SECONDS_PER_DAY: u64 = 86400;".to_string(),
    }
}

fn new_analysis(user_id: i64, score: i32) -> NewAnalysis {
    NewAnalysis {
        user_id,
        language: "rust".to_string(),
        source_code: "fn main() {}".to_string(),
        filename: "snippet.rs".to_string(),
        score,
        report: sample_report(score),
    }
}

/// Pin a record's creation time so ordering assertions are deterministic.
async fn set_created_at(pool: &PgPool, id: i64, ts: &str) {
    sqlx::query("UPDATE analyses SET created_at = $1::timestamptz WHERE id = $2")
        .bind(ts)
        .bind(id)
        .execute(pool)
        .await
        .expect("pinning created_at should succeed");
}

#[sqlx::test]
async fn create_returns_the_persisted_row(pool: PgPool) {
    let input = new_analysis(1, 72);
    let record = AnalysisRepo::create(&pool, &input)
        .await
        .expect("insert should succeed");

    assert!(record.id > 0);
    assert_eq!(record.user_id, 1);
    assert_eq!(record.language, "rust");
    assert_eq!(record.source_code, "fn main() {}");
    assert_eq!(record.filename, "snippet.rs");
    assert_eq!(record.score, 72);
}

#[sqlx::test]
async fn report_round_trips_through_jsonb(pool: PgPool) {
    let input = new_analysis(1, 72);
    let record = AnalysisRepo::create(&pool, &input)
        .await
        .expect("insert should succeed");

    let fetched = AnalysisRepo::find_by_id(&pool, record.id)
        .await
        .expect("lookup should succeed")
        .expect("row must exist");

    assert_eq!(fetched.report.0, input.report);
}

#[sqlx::test]
async fn find_by_id_returns_none_for_unknown(pool: PgPool) {
    let found = AnalysisRepo::find_by_id(&pool, 999_999)
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}

#[sqlx::test]
async fn list_by_owner_orders_newest_first_and_scopes_to_owner(pool: PgPool) {
    let first = AnalysisRepo::create(&pool, &new_analysis(1, 10)).await.unwrap();
    let second = AnalysisRepo::create(&pool, &new_analysis(1, 20)).await.unwrap();
    let third = AnalysisRepo::create(&pool, &new_analysis(1, 30)).await.unwrap();
    let other = AnalysisRepo::create(&pool, &new_analysis(2, 40)).await.unwrap();

    set_created_at(&pool, first.id, "2024-01-01T00:00:00Z").await;
    set_created_at(&pool, second.id, "2024-01-02T00:00:00Z").await;
    set_created_at(&pool, third.id, "2024-01-03T00:00:00Z").await;

    let history = AnalysisRepo::list_by_owner(&pool, 1)
        .await
        .expect("listing should succeed");

    let ids: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert!(!ids.contains(&other.id));
}

#[sqlx::test]
async fn delete_by_id_reports_whether_a_row_matched(pool: PgPool) {
    let record = AnalysisRepo::create(&pool, &new_analysis(1, 10)).await.unwrap();

    let deleted = AnalysisRepo::delete_by_id(&pool, record.id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    let gone = AnalysisRepo::find_by_id(&pool, record.id)
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none());

    let again = AnalysisRepo::delete_by_id(&pool, record.id)
        .await
        .expect("delete should succeed");
    assert!(!again);
}
