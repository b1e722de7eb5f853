use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Outcome of a student's average in a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Approved,
    Failed,
    NoGrades,
}

impl Standing {
    /// Averages at or above this pass.
    pub const PASSING_AVERAGE: f64 = 5.0;

    pub fn from_average(average: Option<f64>) -> Self {
        match average {
            Some(avg) if avg >= Self::PASSING_AVERAGE => Standing::Approved,
            Some(_) => Standing::Failed,
            None => Standing::NoGrades,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub course_id: i64,
    pub course_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub final_average: f64,
    /// Unrounded average; standing is decided on this value.
    pub raw_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub course_id: i64,
    pub course_name: String,
    pub class_id: i64,
    pub class_name: String,
    pub final_average: f64,
    pub status: Standing,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            status: Standing::from_average(Some(row.raw_average)),
            course_id: row.course_id,
            course_name: row.course_name,
            class_id: row.class_id,
            class_name: row.class_name,
            final_average: row.final_average,
        }
    }
}
