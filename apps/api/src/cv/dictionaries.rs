//! Closed vocabularies driving the segmenter and the skill suggester.
//!
//! Kept as plain data so the lists can be extended (or replaced through a
//! JSON override file) without touching the parsing logic. Any key missing
//! from an override file keeps its default list.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Job-title keywords mapped to the skills typically expected for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSuggestion {
    pub keywords: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dictionaries {
    pub skill_headers: Vec<String>,
    pub skills: Vec<String>,
    pub language_headers: Vec<String>,
    pub languages: Vec<String>,
    pub experience_headers: Vec<String>,
    pub education_headers: Vec<String>,
    pub skill_suggestions: Vec<DomainSuggestion>,
}

const SKILL_HEADERS: &[&str] = &[
    "compétences",
    "competences",
    "skills",
    "savoir-faire",
    "capacités",
    "aptitudes",
    "connaissances",
];

const SKILLS: &[&str] = &[
    "Microsoft Office",
    "Excel",
    "Word",
    "PowerPoint",
    "Gestion de projet",
    "Management",
    "Communication",
    "Travail d'équipe",
    "Leadership",
    "Analyse",
    "Planification",
    "Organisation",
    "Négociation",
    "Python",
    "JavaScript",
    "SQL",
    "HTML",
    "CSS",
    "Comptabilité",
    "Finance",
    "Budgétisation",
    "Ressources Humaines",
    "Recrutement",
    "Formation",
    "Logistique",
    "Supply Chain",
    "Procurement",
];

const LANGUAGE_HEADERS: &[&str] = &["langues", "languages", "idiomas"];

const LANGUAGES: &[&str] = &[
    "Français", "Anglais", "Espagnol", "Arabe", "Soussou", "Malinké", "Peul",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "expérience",
    "experience",
    "parcours professionnel",
    "career",
];

const EDUCATION_HEADERS: &[&str] = &["formation", "education", "études", "diplôme"];

const SKILL_SUGGESTIONS: &[(&[&str], &[&str])] = &[
    (
        &["développeur", "developer", "programmeur"],
        &["JavaScript", "Python", "React", "Node.js", "Git", "SQL"],
    ),
    (
        &["rh", "ressources humaines", "recrutement"],
        &["Recrutement", "Gestion RH", "Paie", "Formation", "SIRH"],
    ),
    (
        &["comptable", "comptabilité", "finance"],
        &["Comptabilité", "Excel", "Sage", "Fiscalité", "Analyse financière"],
    ),
    (
        &["marketing", "communication"],
        &[
            "Marketing digital",
            "Réseaux sociaux",
            "SEO",
            "Content marketing",
            "Google Analytics",
        ],
    ),
    (
        &["commercial", "vente"],
        &["Prospection", "Négociation", "CRM", "Relation client", "Closing"],
    ),
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Dictionaries {
    fn default() -> Self {
        Self {
            skill_headers: owned(SKILL_HEADERS),
            skills: owned(SKILLS),
            language_headers: owned(LANGUAGE_HEADERS),
            languages: owned(LANGUAGES),
            experience_headers: owned(EXPERIENCE_HEADERS),
            education_headers: owned(EDUCATION_HEADERS),
            skill_suggestions: SKILL_SUGGESTIONS
                .iter()
                .map(|(keywords, skills)| DomainSuggestion {
                    keywords: owned(keywords),
                    skills: owned(skills),
                })
                .collect(),
        }
    }
}

impl Dictionaries {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut dictionaries: Dictionaries =
            serde_json::from_str(raw).context("Invalid dictionary JSON")?;
        dictionaries.normalize_headers();
        Ok(dictionaries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file '{}'", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to load dictionary file '{}'", path.display()))
    }

    /// Header keywords are matched against lowercased lines.
    fn normalize_headers(&mut self) {
        for list in [
            &mut self.skill_headers,
            &mut self.language_headers,
            &mut self.experience_headers,
            &mut self.education_headers,
        ] {
            for keyword in list.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
        for domain in &mut self.skill_suggestions {
            for keyword in domain.keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
    }
}
