//! Maps a reviewed draft onto the candidate profile form.
//!
//! A draft field only overrides the form when it is non-empty, so whatever
//! the candidate already typed survives a weak extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cv::draft::{DraftCandidateRecord, Experience, Formation};

/// Experience row in the shape the profile form expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRow {
    #[serde(rename = "Poste occupé", default)]
    pub position: String,
    #[serde(rename = "Entreprise", default)]
    pub company: String,
    #[serde(rename = "Période", default)]
    pub period: String,
    #[serde(rename = "Missions principales", default)]
    pub missions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationRow {
    #[serde(rename = "Diplôme obtenu", default)]
    pub degree: String,
    #[serde(rename = "Établissement", default)]
    pub institution: String,
    #[serde(rename = "Année d'obtention", default)]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experiences: Vec<ExperienceRow>,
    pub formations: Vec<FormationRow>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    /// Raw draft kept alongside the form for reference.
    pub cv_parsed_data: Option<DraftCandidateRecord>,
    pub cv_parsed_at: Option<DateTime<Utc>>,
}

impl From<&Experience> for ExperienceRow {
    fn from(exp: &Experience) -> Self {
        Self {
            position: exp.title.clone(),
            company: exp.organization.clone(),
            period: exp.period.clone(),
            missions: String::new(),
        }
    }
}

impl From<&Formation> for FormationRow {
    fn from(formation: &Formation) -> Self {
        Self {
            degree: formation.degree.clone(),
            institution: formation.institution.clone(),
            year: formation.year.clone(),
        }
    }
}

pub fn prefill_form(
    draft: &DraftCandidateRecord,
    current: ProfileForm,
    parsed_at: DateTime<Utc>,
) -> ProfileForm {
    ProfileForm {
        full_name: prefer(draft.full_name.as_deref(), current.full_name),
        email: prefer(draft.email.as_deref(), current.email),
        phone: prefer(draft.phone.as_deref(), current.phone),
        experiences: prefer_rows(&draft.experiences, current.experiences),
        formations: prefer_rows(&draft.formations, current.formations),
        skills: prefer_list(&draft.skills, current.skills),
        languages: prefer_list(&draft.languages, current.languages),
        cv_parsed_data: Some(draft.clone()),
        cv_parsed_at: Some(parsed_at),
    }
}

fn prefer(extracted: Option<&str>, current: String) -> String {
    match extracted {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => current,
    }
}

fn prefer_list(extracted: &[String], current: Vec<String>) -> Vec<String> {
    if extracted.is_empty() {
        current
    } else {
        extracted.to_vec()
    }
}

fn prefer_rows<'a, T, R>(extracted: &'a [T], current: Vec<R>) -> Vec<R>
where
    R: From<&'a T>,
{
    if extracted.is_empty() {
        current
    } else {
        extracted.iter().map(R::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parsed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn typed_form() -> ProfileForm {
        ProfileForm {
            full_name: "Jean K.".to_string(),
            email: "jean@perso.gn".to_string(),
            phone: "620 00 00 00".to_string(),
            skills: vec!["Sage".to_string()],
            formations: vec![FormationRow {
                degree: "BTS".to_string(),
                institution: "ISC Conakry".to_string(),
                year: "2015".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_extracted_fields_override_typed_values() {
        let draft = DraftCandidateRecord {
            full_name: Some("Jean Kouyaté".to_string()),
            email: Some("jean.kouyate@example.com".to_string()),
            skills: vec!["Excel".to_string()],
            experiences: vec![Experience {
                title: "Chef de projet".to_string(),
                organization: "ACME Corp".to_string(),
                period: "2019 - 2022".to_string(),
            }],
            ..Default::default()
        };

        let form = prefill_form(&draft, typed_form(), parsed_at());
        assert_eq!(form.full_name, "Jean Kouyaté");
        assert_eq!(form.email, "jean.kouyate@example.com");
        assert_eq!(form.skills, vec!["Excel"]);
        assert_eq!(form.experiences.len(), 1);
        assert_eq!(form.experiences[0].position, "Chef de projet");
        assert_eq!(form.experiences[0].company, "ACME Corp");
        assert_eq!(form.experiences[0].missions, "");
    }

    #[test]
    fn test_empty_draft_fields_keep_typed_values() {
        let draft = DraftCandidateRecord {
            full_name: Some("Jean Kouyaté".to_string()),
            ..Default::default()
        };
        let form = prefill_form(&draft, typed_form(), parsed_at());
        assert_eq!(form.phone, "620 00 00 00");
        assert_eq!(form.skills, vec!["Sage"]);
        assert_eq!(form.formations[0].degree, "BTS");
        assert!(form.languages.is_empty());
    }

    #[test]
    fn test_draft_and_timestamp_are_attached() {
        let draft = DraftCandidateRecord::default();
        let form = prefill_form(&draft, ProfileForm::default(), parsed_at());
        assert_eq!(form.cv_parsed_data, Some(draft));
        assert_eq!(form.cv_parsed_at, Some(parsed_at()));
    }

    #[test]
    fn test_rows_serialize_with_form_labels() {
        let row = ExperienceRow::from(&Experience {
            title: "Chef de projet".to_string(),
            organization: "ACME Corp".to_string(),
            period: "2019 - 2022".to_string(),
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Poste occupé"], "Chef de projet");
        assert_eq!(json["Entreprise"], "ACME Corp");
        assert_eq!(json["Période"], "2019 - 2022");
    }

    #[test]
    fn test_partial_form_deserializes_with_defaults() {
        let form: ProfileForm = serde_json::from_str(r#"{"email": "a@b.gn"}"#).unwrap();
        assert_eq!(form.email, "a@b.gn");
        assert!(form.experiences.is_empty());
        assert!(form.cv_parsed_at.is_none());
    }
}
