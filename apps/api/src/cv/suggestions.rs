//! Skill suggestions from a job title, used when the CV itself listed none
//! the dictionary recognizes.

use crate::cv::dictionaries::Dictionaries;
use crate::cv::draft::push_unique;

/// Skills of every domain whose keywords appear in `title`, deduplicated in
/// first-seen order.
pub fn suggest_skills(title: &str, dictionaries: &Dictionaries) -> Vec<String> {
    let title = title.to_lowercase();
    let mut suggestions = Vec::new();

    for domain in &dictionaries.skill_suggestions {
        if domain
            .keywords
            .iter()
            .any(|keyword| title.contains(keyword.as_str()))
        {
            for skill in &domain.skills {
                push_unique(&mut suggestions, skill);
            }
        }
    }

    suggestions
}
