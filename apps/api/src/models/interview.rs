use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Question sourcing mode for an interview definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewKind {
    /// Questions generated from the job description.
    Jd,
    /// HR-authored comma-delimited questions only.
    Custom,
    /// Generated questions first, then the custom list.
    Both,
}

impl InterviewKind {
    pub fn includes_jd(self) -> bool {
        matches!(self, InterviewKind::Jd | InterviewKind::Both)
    }

    pub fn includes_custom(self) -> bool {
        matches!(self, InterviewKind::Custom | InterviewKind::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewKind::Jd => "jd",
            InterviewKind::Custom => "custom",
            InterviewKind::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jd" => Some(InterviewKind::Jd),
            "custom" => Some(InterviewKind::Custom),
            "both" => Some(InterviewKind::Both),
            _ => None,
        }
    }
}

/// A shareable interview definition, owned by exactly one HR.
/// The link token is globally unique and immutable once issued.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub link_token: String,
    pub kind: String,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_desc: Option<String>,
    pub custom_questions: Option<String>,
    pub num_questions: i32,
    pub used: bool,
    pub hr_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl InterviewRow {
    /// The parsed kind; rows persisted by this application always hold a
    /// valid value, anything else falls back to the custom-only mode so a
    /// malformed row never produces a generator call.
    pub fn kind(&self) -> InterviewKind {
        InterviewKind::parse(&self.kind).unwrap_or(InterviewKind::Custom)
    }

    pub fn job_title_or_default(&self) -> &str {
        self.job_title.as_deref().unwrap_or("N/A")
    }

    pub fn company_name_or_default(&self) -> &str {
        self.company_name.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [InterviewKind::Jd, InterviewKind::Custom, InterviewKind::Both] {
            assert_eq!(InterviewKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kind_membership() {
        assert!(InterviewKind::Jd.includes_jd());
        assert!(!InterviewKind::Jd.includes_custom());
        assert!(InterviewKind::Custom.includes_custom());
        assert!(!InterviewKind::Custom.includes_jd());
        assert!(InterviewKind::Both.includes_jd());
        assert!(InterviewKind::Both.includes_custom());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert_eq!(InterviewKind::parse("resume"), None);
    }
}
