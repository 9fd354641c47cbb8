use sqlx::SqlitePool;
use tracing::debug;

use super::dto::SummaryResponse;
use super::repo;
use super::streak::{best_sequence, StreakRule};

/// Counts and best on-diet sequence for one session. The queries run separately,
/// so a concurrent write may land between them.
pub async fn summarize(
    db: &SqlitePool,
    session_id: &str,
    rule: StreakRule,
) -> anyhow::Result<SummaryResponse> {
    let total_meals = repo::count_by_session(db, session_id).await?;
    let total_on_the_diet_meals = repo::count_on_diet_by_session(db, session_id).await?;
    let flags = repo::diet_flags_chronological(db, session_id).await?;
    let best_sequence_of_on_diet_meals = best_sequence(&flags, rule);

    debug!(%rule, total_meals, best_sequence_of_on_diet_meals, "summary computed");
    Ok(SummaryResponse {
        total_meals,
        total_on_the_diet_meals,
        total_off_diet_meals: off_diet_count(total_meals, total_on_the_diet_meals),
        best_sequence_of_on_diet_meals,
    })
}

/// `total - on_diet`, never below zero.
pub fn off_diet_count(total: i64, on_diet: i64) -> i64 {
    total.checked_sub(on_diet).unwrap_or(0).max(0)
}
