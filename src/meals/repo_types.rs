use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::{fmt::Hyphenated, Uuid};

/// Row as stored in `meals`; `created_at` is Unix milliseconds, UTC.
#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: Hyphenated,
    pub session_id: String,
    pub name: String,
    pub description: String,
    pub created_at: i64,
    pub is_on_the_diet: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub is_on_the_diet: bool,
}

impl TryFrom<MealRow> for Meal {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id.into_uuid(),
            session_id: r.session_id,
            name: r.name,
            description: r.description,
            created_at: from_unix_millis(r.created_at)?,
            is_on_the_diet: r.is_on_the_diet,
        })
    }
}

pub fn unix_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_unix_millis(ms: i64) -> anyhow::Result<OffsetDateTime> {
    Ok(OffsetDateTime::from_unix_timestamp_nanos(
        i128::from(ms) * 1_000_000,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn millis_conversion_keeps_precision() {
        let t = datetime!(2023-05-26 19:47:00.123 UTC);
        let ms = unix_millis(t);
        assert_eq!(ms, 1_685_130_420_123);
        assert_eq!(from_unix_millis(ms).unwrap(), t);
    }

    #[test]
    fn row_converts_and_serializes_with_column_names() {
        let id = Uuid::new_v4();
        let meal = Meal::try_from(MealRow {
            id: id.hyphenated(),
            session_id: "s-1".into(),
            name: "Lunch".into(),
            description: "Rice and beans".into(),
            created_at: 0,
            is_on_the_diet: true,
        })
        .unwrap();
        assert_eq!(meal.id, id);

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
        assert_eq!(json["is_on_the_diet"], true);
    }
}
