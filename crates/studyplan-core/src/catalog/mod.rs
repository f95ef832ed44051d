//! Course catalog snapshot and the collaborator trait the engine queries.
//!
//! Catalog data is fetched by the calling layer once per request; the engine
//! only ever reads from an immutable snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CatalogError;

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
    /// Missing or unrecognized level; ranked as intermediate.
    #[default]
    #[serde(other)]
    Unknown,
}

impl DifficultyLevel {
    /// Ordering rank (beginner < intermediate < advanced).
    pub fn rank(&self) -> u8 {
        match self {
            DifficultyLevel::Beginner => 0,
            DifficultyLevel::Intermediate | DifficultyLevel::Unknown => 1,
            DifficultyLevel::Advanced => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
            DifficultyLevel::Unknown => "unspecified",
        }
    }
}

/// Kind of lesson content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Activity,
    /// Reading and downloadable materials.
    Reading,
}

/// One piece of lesson content with its duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonContent {
    pub kind: ContentKind,
    pub minutes: u32,
}

/// A lesson inside a course module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    #[serde(default)]
    pub module_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contents: Vec<LessonContent>,
}

/// A catalog course with its ordered lessons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: DifficultyLevel,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Read-only catalog queries the engine relies on.
pub trait CourseCatalog {
    /// Look up a course by identifier.
    fn course(&self, id: &str) -> Option<&Course>;

    /// All courses in a category, in catalog order.
    fn courses_in_category(&self, category: &str) -> Vec<&Course>;
}

/// Catalog backed by a request snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting duplicate identifiers.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(courses.len());
        for (i, course) in courses.iter().enumerate() {
            if index.insert(course.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCourse(course.id.clone()));
            }
        }
        Ok(Self { courses, index })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

impl CourseCatalog for InMemoryCatalog {
    fn course(&self, id: &str) -> Option<&Course> {
        self.index.get(id).map(|&i| &self.courses[i])
    }

    fn courses_in_category(&self, category: &str) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, category: &str) -> Course {
        Course {
            id: id.to_string(),
            title: id.to_uppercase(),
            category: category.to_string(),
            level: DifficultyLevel::Beginner,
            lessons: Vec::new(),
        }
    }

    #[test]
    fn unknown_level_ranks_as_intermediate() {
        assert_eq!(DifficultyLevel::Unknown.rank(), DifficultyLevel::Intermediate.rank());
        assert!(DifficultyLevel::Beginner.rank() < DifficultyLevel::Advanced.rank());
    }

    #[test]
    fn unrecognized_level_deserializes_as_unknown() {
        let level: DifficultyLevel = serde_json::from_str(r#""expert""#).unwrap();
        assert_eq!(level, DifficultyLevel::Unknown);
    }

    #[test]
    fn lookup_and_category_query() {
        let catalog = InMemoryCatalog::new(vec![
            course("rust-101", "programming"),
            course("excel", "office"),
            course("rust-201", "Programming"),
        ])
        .unwrap();

        assert_eq!(catalog.course("excel").map(|c| c.title.as_str()), Some("EXCEL"));
        assert!(catalog.course("missing").is_none());
        let ids: Vec<_> = catalog
            .courses_in_category("programming")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rust-101", "rust-201"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = InMemoryCatalog::new(vec![course("a", "x"), course("a", "y")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCourse(id) if id == "a"));
    }
}
