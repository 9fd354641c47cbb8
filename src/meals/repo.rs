use anyhow::Context;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::repo_types::{unix_millis, Meal, MealRow};
use super::validate::MealInput;

const MEAL_COLUMNS: &str = "id, session_id, name, description, created_at, is_on_the_diet";

pub async fn insert(
    db: &SqlitePool,
    id: Uuid,
    session_id: &str,
    input: &MealInput,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meals (id, session_id, name, description, created_at, is_on_the_diet)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.hyphenated())
    .bind(session_id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(unix_millis(input.created_at))
    .bind(input.is_on_the_diet)
    .execute(db)
    .await
    .context("insert meal")?;
    Ok(())
}

/// Replaces the mutable fields of the session's meal. Returns affected rows (0 or 1).
pub async fn update(
    db: &SqlitePool,
    session_id: &str,
    id: Uuid,
    input: &MealInput,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        r#"
        UPDATE meals
           SET name = ?, description = ?, created_at = ?, is_on_the_diet = ?
         WHERE id = ? AND session_id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(unix_millis(input.created_at))
    .bind(input.is_on_the_diet)
    .bind(id.hyphenated())
    .bind(session_id)
    .execute(db)
    .await
    .context("update meal")?;
    Ok(res.rows_affected())
}

pub async fn delete(db: &SqlitePool, session_id: &str, id: Uuid) -> anyhow::Result<u64> {
    let res = sqlx::query("DELETE FROM meals WHERE id = ? AND session_id = ?")
        .bind(id.hyphenated())
        .bind(session_id)
        .execute(db)
        .await
        .context("delete meal")?;
    Ok(res.rows_affected())
}

/// All meals of a session, oldest first; ties keep insertion order.
pub async fn list_by_session(db: &SqlitePool, session_id: &str) -> anyhow::Result<Vec<Meal>> {
    let rows = sqlx::query_as::<_, MealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE session_id = ? ORDER BY created_at ASC, rowid ASC"
    ))
    .bind(session_id)
    .fetch_all(db)
    .await
    .context("list meals by session")?;
    rows.into_iter().map(Meal::try_from).collect()
}

pub async fn find_by_id(
    db: &SqlitePool,
    session_id: &str,
    id: Uuid,
) -> anyhow::Result<Option<Meal>> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = ? AND session_id = ? LIMIT 1"
    ))
    .bind(id.hyphenated())
    .bind(session_id)
    .fetch_optional(db)
    .await
    .context("get meal by id")?;
    row.map(Meal::try_from).transpose()
}

pub async fn count_by_session(db: &SqlitePool, session_id: &str) -> anyhow::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM meals WHERE session_id = ?")
        .bind(session_id)
        .fetch_one(db)
        .await
        .context("count meals")
}

pub async fn count_on_diet_by_session(db: &SqlitePool, session_id: &str) -> anyhow::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(id) FROM meals WHERE session_id = ? AND is_on_the_diet = ?",
    )
    .bind(session_id)
    .bind(true)
    .fetch_one(db)
    .await
    .context("count on-diet meals")
}

/// Diet flags of a session's meals in creation order, oldest first.
pub async fn diet_flags_chronological(db: &SqlitePool, session_id: &str) -> anyhow::Result<Vec<bool>> {
    sqlx::query_scalar::<_, bool>(
        "SELECT is_on_the_diet FROM meals WHERE session_id = ? ORDER BY created_at ASC, rowid ASC",
    )
    .bind(session_id)
    .fetch_all(db)
    .await
    .context("list diet flags")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::streak::StreakRule;
    use crate::state::AppState;
    use time::macros::datetime;

    fn input(name: &str, at: time::OffsetDateTime, on: bool) -> MealInput {
        MealInput {
            name: name.into(),
            description: format!("{name} description"),
            created_at: at,
            is_on_the_diet: on,
        }
    }

    #[tokio::test]
    async fn insert_and_find_roundtrip_scoped_by_session() {
        let state = AppState::in_memory(StreakRule::Consecutive).await;
        let id = Uuid::new_v4();
        let meal = input("Lunch", datetime!(2023-05-26 12:00:00.250 UTC), true);
        insert(&state.db, id, "alice", &meal).await.unwrap();

        let found = find_by_id(&state.db, "alice", id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.session_id, "alice");
        assert_eq!(found.name, "Lunch");
        assert_eq!(found.created_at, meal.created_at);
        assert!(found.is_on_the_diet);

        assert!(find_by_id(&state.db, "bob", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_and_delete_only_touch_owned_rows() {
        let state = AppState::in_memory(StreakRule::Consecutive).await;
        let id = Uuid::new_v4();
        insert(&state.db, id, "alice", &input("Dinner", datetime!(2023-05-26 20:00 UTC), false))
            .await
            .unwrap();

        let changed = input("Late dinner", datetime!(2023-05-26 22:00 UTC), true);
        assert_eq!(update(&state.db, "bob", id, &changed).await.unwrap(), 0);
        assert_eq!(update(&state.db, "alice", id, &changed).await.unwrap(), 1);
        let found = find_by_id(&state.db, "alice", id).await.unwrap().unwrap();
        assert_eq!(found.name, "Late dinner");
        assert_eq!(found.created_at, changed.created_at);
        assert!(found.is_on_the_diet);

        assert_eq!(delete(&state.db, "bob", id).await.unwrap(), 0);
        assert_eq!(delete(&state.db, "alice", id).await.unwrap(), 1);
        assert_eq!(delete(&state.db, "alice", id).await.unwrap(), 0);
        assert!(find_by_id(&state.db, "alice", id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_and_counts_follow_creation_time() {
        let state = AppState::in_memory(StreakRule::Consecutive).await;
        // inserted out of order on purpose
        insert(&state.db, Uuid::new_v4(), "s", &input("c", datetime!(2023-05-03 00:00 UTC), true))
            .await
            .unwrap();
        insert(&state.db, Uuid::new_v4(), "s", &input("a", datetime!(2023-05-01 00:00 UTC), true))
            .await
            .unwrap();
        insert(&state.db, Uuid::new_v4(), "s", &input("b", datetime!(2023-05-02 00:00 UTC), false))
            .await
            .unwrap();
        insert(&state.db, Uuid::new_v4(), "other", &input("x", datetime!(2023-05-02 00:00 UTC), true))
            .await
            .unwrap();

        let names: Vec<_> = list_by_session(&state.db, "s")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(
            diet_flags_chronological(&state.db, "s").await.unwrap(),
            vec![true, false, true]
        );
        assert_eq!(count_by_session(&state.db, "s").await.unwrap(), 3);
        assert_eq!(count_on_diet_by_session(&state.db, "s").await.unwrap(), 2);
        assert_eq!(count_by_session(&state.db, "nobody").await.unwrap(), 0);
    }
}
