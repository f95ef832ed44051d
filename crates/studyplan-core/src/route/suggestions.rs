//! Complementary course suggestions from the catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{LearnerCourse, LearningRouteBuilder};
use crate::catalog::{CourseCatalog, DifficultyLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    High,
    Medium,
}

/// A catalog course that fills a gap in the learner's route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplementaryCourse {
    pub course_id: String,
    pub title: String,
    pub category: String,
    pub level: DifficultyLevel,
    pub priority: SuggestionPriority,
    pub reason: String,
}

impl LearningRouteBuilder {
    /// Suggest catalog courses covering a missing beginner or intermediate
    /// level in the learner's categories. Courses the learner already has are
    /// never suggested.
    pub fn suggest_complementary(
        &self,
        courses: &[LearnerCourse],
        catalog: &dyn CourseCatalog,
    ) -> Vec<ComplementaryCourse> {
        let limit = self.settings().max_suggestions;
        let known: BTreeSet<&str> = courses.iter().map(|c| c.course_id.as_str()).collect();

        let mut categories: Vec<&str> = Vec::new();
        for course in courses {
            let category = course.category.trim();
            if !category.is_empty()
                && !categories.iter().any(|c| c.eq_ignore_ascii_case(category))
            {
                categories.push(category);
            }
        }

        let mut suggestions = Vec::new();
        for category in categories {
            let present: BTreeSet<u8> = courses
                .iter()
                .filter(|c| c.category.trim().eq_ignore_ascii_case(category))
                .map(|c| c.level.rank())
                .collect();
            let candidates = catalog.courses_in_category(category);

            for (missing, priority) in [
                (DifficultyLevel::Beginner, SuggestionPriority::High),
                (DifficultyLevel::Intermediate, SuggestionPriority::Medium),
            ] {
                if suggestions.len() >= limit {
                    return suggestions;
                }
                if present.contains(&missing.rank()) {
                    continue;
                }
                let pick = candidates.iter().find(|c| {
                    c.level == missing
                        && !known.contains(c.id.as_str())
                        && !suggestions.iter().any(|s: &ComplementaryCourse| s.course_id == c.id)
                });
                if let Some(course) = pick {
                    suggestions.push(ComplementaryCourse {
                        course_id: course.id.clone(),
                        title: course.title.clone(),
                        category: course.category.clone(),
                        level: course.level,
                        priority,
                        reason: format!(
                            "Adds the missing {} level in {}",
                            missing.display_name(),
                            category
                        ),
                    });
                }
            }
        }

        suggestions.truncate(limit);
        suggestions
    }
}
