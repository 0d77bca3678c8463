//! Draft Candidate Record: the transient, unpersisted guess handed to the
//! profile form for human review.

use serde::{Deserialize, Serialize};

/// One work-history entry opened by a year-range line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub organization: String,
    pub period: String,
}

/// One education entry opened by a year-range line inside an education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formation {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Whether the segmenter found anything to pre-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted,
    /// Decoding succeeded but no heuristic matched. Not an error.
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftCandidateRecord {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Insertion-ordered, no duplicates.
    pub skills: Vec<String>,
    /// Insertion-ordered, no duplicates.
    pub languages: Vec<String>,
    pub experiences: Vec<Experience>,
    pub formations: Vec<Formation>,
}

impl DraftCandidateRecord {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.skills.is_empty()
            && self.languages.is_empty()
            && self.experiences.is_empty()
            && self.formations.is_empty()
    }

    pub fn status(&self) -> ExtractionStatus {
        if self.is_empty() {
            ExtractionStatus::Empty
        } else {
            ExtractionStatus::Extracted
        }
    }
}

/// Appends `term` unless already present. Keeps first-seen order.
pub(crate) fn push_unique(set: &mut Vec<String>, term: &str) {
    if !set.iter().any(|existing| existing == term) {
        set.push(term.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let draft = DraftCandidateRecord::default();
        assert!(draft.is_empty());
        assert_eq!(draft.status(), ExtractionStatus::Empty);
    }

    #[test]
    fn test_single_field_makes_record_extracted() {
        let draft = DraftCandidateRecord {
            phone: Some("621 11 22 33".to_string()),
            ..Default::default()
        };
        assert!(!draft.is_empty());
        assert_eq!(draft.status(), ExtractionStatus::Extracted);
    }

    #[test]
    fn test_formation_alone_counts_as_extracted() {
        let draft = DraftCandidateRecord {
            formations: vec![Formation::default()],
            ..Default::default()
        };
        assert_eq!(draft.status(), ExtractionStatus::Extracted);
    }

    #[test]
    fn test_push_unique_preserves_first_seen_order() {
        let mut set = Vec::new();
        push_unique(&mut set, "Excel");
        push_unique(&mut set, "SQL");
        push_unique(&mut set, "Excel");
        assert_eq!(set, vec!["Excel".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExtractionStatus::Empty).unwrap(),
            r#""empty""#
        );
        assert_eq!(
            serde_json::to_string(&ExtractionStatus::Extracted).unwrap(),
            r#""extracted""#
        );
    }

    #[test]
    fn test_record_serializes_with_snake_case_keys() {
        let draft = DraftCandidateRecord {
            full_name: Some("Jean Kouyaté".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["full_name"], "Jean Kouyaté");
        assert!(json["email"].is_null());
        assert_eq!(json["skills"].as_array().unwrap().len(), 0);
    }
}
