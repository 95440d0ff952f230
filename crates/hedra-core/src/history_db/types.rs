//! Types used by the history database.

/// Lecture row identifier.
pub type LectureId = i64;

/// Processing status stored as a string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LectureStatus {
    Processing,
    Completed,
    Failed,
}

impl LectureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LectureStatus::Processing => "processing",
            LectureStatus::Completed => "completed",
            LectureStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "processing" => LectureStatus::Processing,
            "completed" => LectureStatus::Completed,
            _ => LectureStatus::Failed,
        }
    }
}

/// Fields of a lecture row at insert time.
#[derive(Debug, Clone)]
pub struct NewLecture<'a> {
    pub file_name: &'a str,
    pub file_size: i64,
    pub sha256: &'a str,
    pub mime_type: &'a str,
    pub artifact_kind: &'a str,
}

/// Full lecture row, used by `history` and the pipeline.
#[derive(Debug, Clone)]
pub struct LectureRecord {
    pub id: LectureId,
    pub file_name: String,
    pub file_size: i64,
    pub sha256: String,
    pub mime_type: String,
    pub artifact_kind: String,
    pub status: LectureStatus,
    pub error_text: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One usage counter (artifact kind -> successful generations).
#[derive(Debug, Clone)]
pub struct UsageCounter {
    pub name: String,
    pub count: i64,
    pub updated_at: i64,
}
