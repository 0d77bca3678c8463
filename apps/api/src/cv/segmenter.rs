//! Heuristic Field Segmenter: flat CV text to [`DraftCandidateRecord`].
//!
//! Algorithm (best effort, misses are silent):
//! 1. Split into trimmed, non-empty lines.
//! 2. Name: first proper-name shaped line (or `Nom:` / `Name:` label) among
//!    the first [`NAME_SCAN_LINES`] lines.
//! 3. Email / phone: first match anywhere in the text.
//! 4. Skills / languages: a header keyword opens a list section; dictionary
//!    terms found on the following lines are collected until an all-caps
//!    `LABEL:` line or a prose-length line closes it.
//! 5. Experiences / formations: every year-range line opens a new record,
//!    the next lines fill its fields positionally. Formations only open
//!    inside an education section.
//!
//! All scan state lives in [`ScanState`], built fresh per call, so a single
//! `Segmenter` can be shared across concurrent parses.

use anyhow::{Context, Result};
use regex::Regex;

use crate::cv::dictionaries::Dictionaries;
use crate::cv::draft::{push_unique, DraftCandidateRecord, Experience, Formation};

pub const NAME_SCAN_LINES: usize = 10;
/// A name capture must be longer than this (in characters).
pub const MIN_NAME_CHARS: usize = 5;
/// List sections close on lines at least this long (prose, not a list).
pub const PROSE_LINE_CHARS: usize = 100;

/// Compiled patterns, built once at startup.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub proper_name: Regex,
    pub name_label: Regex,
    pub email: Regex,
    pub phone: Regex,
    pub section_break: Regex,
    pub experience_period: Regex,
    pub education_period: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            proper_name: Regex::new(
                r"^([A-Z][a-zàâäéèêëïîôùûüÿæœç]+(?:\s+[A-Z][a-zàâäéèêëïîôùûüÿæœç]+)+)",
            )
            .context("failed to compile proper-name regex")?,
            name_label: Regex::new(r"(?i)^(?:nom|name)\s*:\s*(.+)")
                .context("failed to compile name-label regex")?,
            email: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .context("failed to compile email regex")?,
            phone: Regex::new(r"(\+?224\s?)?[0-9]{3}\s?[0-9]{2}\s?[0-9]{2}\s?[0-9]{2}")
                .context("failed to compile phone regex")?,
            section_break: Regex::new(r"^[A-Z\s]+:")
                .context("failed to compile section-break regex")?,
            experience_period: Regex::new(
                r"(?i)([0-9]{4})\s*[-–]\s*([0-9]{4}|présent|present|actuel)",
            )
            .context("failed to compile experience period regex")?,
            education_period: Regex::new(r"([0-9]{4})\s*[-–]\s*([0-9]{4})")
                .context("failed to compile education period regex")?,
        })
    }
}

/// Stateless once built; see the module docs for the algorithm.
#[derive(Debug, Clone)]
pub struct Segmenter {
    patterns: Patterns,
    dictionaries: Dictionaries,
}

impl Segmenter {
    pub fn new(dictionaries: Dictionaries) -> Result<Self> {
        Ok(Self {
            patterns: Patterns::new()?,
            dictionaries,
        })
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    pub fn segment(&self, text: &str) -> DraftCandidateRecord {
        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut draft = DraftCandidateRecord {
            full_name: self.find_name(&lines),
            email: first_match(&self.patterns.email, text),
            phone: first_match(&self.patterns.phone, text),
            ..Default::default()
        };

        let mut state = ScanState::default();
        for line in &lines {
            let lower = line.to_lowercase();
            self.scan_skills(&mut state.skills, line, &lower, &mut draft.skills);
            self.scan_languages(&mut state.languages, line, &lower, &mut draft.languages);
            self.scan_experience(&mut state.experience, line, &lower, &mut draft.experiences);
            self.scan_education(&mut state.education, line, &lower, &mut draft.formations);
        }

        if let Some(open) = state.experience.take() {
            draft.experiences.push(open);
        }
        if let Some(open) = state.education.open.take() {
            draft.formations.push(open);
        }

        draft
    }

    fn find_name(&self, lines: &[&str]) -> Option<String> {
        lines.iter().take(NAME_SCAN_LINES).find_map(|line| {
            [&self.patterns.proper_name, &self.patterns.name_label]
                .into_iter()
                .find_map(|pattern| {
                    let captured = pattern.captures(line)?.get(1)?.as_str().trim();
                    (captured.chars().count() > MIN_NAME_CHARS).then(|| captured.to_string())
                })
        })
    }

    fn scan_skills(&self, in_section: &mut bool, line: &str, lower: &str, out: &mut Vec<String>) {
        self.scan_list_section(
            in_section,
            line,
            lower,
            &self.dictionaries.skill_headers,
            &self.dictionaries.skills,
            out,
        );
    }

    fn scan_languages(
        &self,
        in_section: &mut bool,
        line: &str,
        lower: &str,
        out: &mut Vec<String>,
    ) {
        self.scan_list_section(
            in_section,
            line,
            lower,
            &self.dictionaries.language_headers,
            &self.dictionaries.languages,
            out,
        );
    }

    fn scan_list_section(
        &self,
        in_section: &mut bool,
        line: &str,
        lower: &str,
        headers: &[String],
        vocabulary: &[String],
        out: &mut Vec<String>,
    ) {
        if contains_any(lower, headers) {
            *in_section = true;
            return;
        }
        if !*in_section {
            return;
        }
        if self.is_section_break(line) || line.chars().count() > PROSE_LINE_CHARS {
            *in_section = false;
            return;
        }
        for term in vocabulary {
            if lower.contains(&term.to_lowercase()) {
                push_unique(out, term);
            }
        }
    }

    fn scan_experience(
        &self,
        open: &mut Option<Experience>,
        line: &str,
        lower: &str,
        out: &mut Vec<Experience>,
    ) {
        if contains_any(lower, &self.dictionaries.experience_headers) {
            return;
        }
        if let Some(period) = self.patterns.experience_period.find(line) {
            if let Some(done) = open.replace(Experience {
                period: period.as_str().to_string(),
                ..Default::default()
            }) {
                out.push(done);
            }
            return;
        }
        if let Some(record) = open.as_mut() {
            fill_positionally(&mut record.title, &mut record.organization, line);
        }
    }

    fn scan_education(
        &self,
        scope: &mut EducationScope,
        line: &str,
        lower: &str,
        out: &mut Vec<Formation>,
    ) {
        if contains_any(lower, &self.dictionaries.education_headers) {
            scope.active = true;
            return;
        }
        if !scope.active {
            return;
        }
        if self.is_other_section_header(line, lower) {
            scope.active = false;
            if let Some(done) = scope.open.take() {
                out.push(done);
            }
            return;
        }
        if let Some(period) = self.patterns.education_period.find(line) {
            if let Some(done) = scope.open.replace(Formation {
                year: period.as_str().to_string(),
                ..Default::default()
            }) {
                out.push(done);
            }
            return;
        }
        if let Some(record) = scope.open.as_mut() {
            fill_positionally(&mut record.degree, &mut record.institution, line);
        }
    }

    fn is_section_break(&self, line: &str) -> bool {
        self.patterns.section_break.is_match(line)
    }

    fn is_other_section_header(&self, line: &str, lower: &str) -> bool {
        self.is_section_break(line)
            || contains_any(lower, &self.dictionaries.skill_headers)
            || contains_any(lower, &self.dictionaries.language_headers)
            || contains_any(lower, &self.dictionaries.experience_headers)
    }
}

#[derive(Debug, Default)]
struct ScanState {
    skills: bool,
    languages: bool,
    experience: Option<Experience>,
    education: EducationScope,
}

#[derive(Debug, Default)]
struct EducationScope {
    active: bool,
    open: Option<Formation>,
}

fn first_match(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}

fn contains_any(lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| lower.contains(keyword.as_str()))
}

/// First free slot wins: a line of 11..=99 chars fills the first field,
/// otherwise a line of 6..=99 chars fills the second. No semantic check.
fn fill_positionally(first: &mut String, second: &mut String, line: &str) {
    let len = line.chars().count();
    if first.is_empty() && len > 10 && len < 100 {
        *first = line.to_string();
    } else if second.is_empty() && len > 5 && len < 100 {
        *second = line.to_string();
    }
}
