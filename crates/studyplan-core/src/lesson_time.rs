//! Lesson and course time estimation.
//!
//! Each lesson's estimate is the sum of its content durations plus a fixed
//! interaction overhead covering navigation and comprehension time that the
//! raw content length does not capture.

use serde::{Deserialize, Serialize};

use crate::catalog::{ContentKind, Course, CourseCatalog, Lesson};

/// Default per-lesson interaction overhead (minutes).
pub const DEFAULT_INTERACTION_OVERHEAD_MINUTES: u32 = 3;

/// Time estimate for one lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonTimeEstimate {
    pub lesson_id: String,
    pub module_id: String,
    pub title: String,
    pub video_minutes: u32,
    pub activity_minutes: u32,
    pub reading_minutes: u32,
    pub overhead_minutes: u32,
    pub total_minutes: u32,
}

/// Aggregated estimate for a course. Derived from its lessons on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTimeEstimate {
    pub course_id: String,
    pub title: String,
    pub lessons: Vec<LessonTimeEstimate>,
    pub total_minutes: u32,
    pub average_lesson_minutes: f64,
    pub min_lesson_minutes: u32,
    pub max_lesson_minutes: u32,
    pub lesson_count: usize,
}

impl CourseTimeEstimate {
    /// Zero-valued estimate for a course without lessons.
    pub fn empty(course_id: &str, title: &str) -> Self {
        Self::from_lessons(course_id, title, Vec::new())
    }

    fn from_lessons(course_id: &str, title: &str, lessons: Vec<LessonTimeEstimate>) -> Self {
        let lesson_count = lessons.len();
        let total_minutes: u32 = lessons.iter().map(|l| l.total_minutes).sum();
        let min_lesson_minutes = lessons.iter().map(|l| l.total_minutes).min().unwrap_or(0);
        let max_lesson_minutes = lessons.iter().map(|l| l.total_minutes).max().unwrap_or(0);
        let average_lesson_minutes = if lesson_count == 0 {
            0.0
        } else {
            total_minutes as f64 / lesson_count as f64
        };

        Self {
            course_id: course_id.to_string(),
            title: title.to_string(),
            lessons,
            total_minutes,
            average_lesson_minutes,
            min_lesson_minutes,
            max_lesson_minutes,
            lesson_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lesson_count == 0
    }
}

/// Cross-course figures used to size study sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSetAnalysis {
    pub courses: Vec<CourseTimeEstimate>,
    pub total_minutes: u32,
    pub total_lessons: usize,
    pub min_lesson_minutes: u32,
    pub max_lesson_minutes: u32,
    pub average_lesson_minutes: f64,
    /// Longest lesson across the set, so any single lesson fits one session.
    pub recommended_min_session_minutes: u32,
}

impl CourseSetAnalysis {
    pub fn course(&self, course_id: &str) -> Option<&CourseTimeEstimate> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }
}

/// Builds lesson and course estimates from catalog data.
#[derive(Debug, Clone)]
pub struct LessonTimeAnalyzer {
    overhead_minutes: u32,
}

impl LessonTimeAnalyzer {
    pub fn new() -> Self {
        Self {
            overhead_minutes: DEFAULT_INTERACTION_OVERHEAD_MINUTES,
        }
    }

    pub fn with_overhead(overhead_minutes: u32) -> Self {
        Self { overhead_minutes }
    }

    pub fn overhead_minutes(&self) -> u32 {
        self.overhead_minutes
    }

    pub fn estimate_lesson(&self, lesson: &Lesson) -> LessonTimeEstimate {
        let sum_of = |kind: ContentKind| -> u32 {
            lesson
                .contents
                .iter()
                .filter(|c| c.kind == kind)
                .map(|c| c.minutes)
                .sum()
        };
        let video_minutes = sum_of(ContentKind::Video);
        let activity_minutes = sum_of(ContentKind::Activity);
        let reading_minutes = sum_of(ContentKind::Reading);

        LessonTimeEstimate {
            lesson_id: lesson.id.clone(),
            module_id: lesson.module_id.clone(),
            title: lesson.title.clone(),
            video_minutes,
            activity_minutes,
            reading_minutes,
            overhead_minutes: self.overhead_minutes,
            total_minutes: video_minutes
                + activity_minutes
                + reading_minutes
                + self.overhead_minutes,
        }
    }

    pub fn estimate_course(&self, course: &Course) -> CourseTimeEstimate {
        let lessons = course.lessons.iter().map(|l| self.estimate_lesson(l)).collect();
        CourseTimeEstimate::from_lessons(&course.id, &course.title, lessons)
    }

    /// Estimate a course by identifier. Unknown courses yield a zero-valued estimate.
    pub fn analyze_course(
        &self,
        catalog: &dyn CourseCatalog,
        course_id: &str,
    ) -> CourseTimeEstimate {
        match catalog.course(course_id) {
            Some(course) => self.estimate_course(course),
            None => {
                tracing::warn!(course_id, "course not in catalog, using zero estimate");
                CourseTimeEstimate::empty(course_id, "")
            }
        }
    }

    /// Analyze a set of courses, keeping the order given.
    pub fn analyze_courses<S: AsRef<str>>(
        &self,
        catalog: &dyn CourseCatalog,
        course_ids: &[S],
    ) -> CourseSetAnalysis {
        let courses: Vec<CourseTimeEstimate> = course_ids
            .iter()
            .map(|id| self.analyze_course(catalog, id.as_ref()))
            .collect();
        Self::summarize(courses)
    }

    fn summarize(courses: Vec<CourseTimeEstimate>) -> CourseSetAnalysis {
        let lesson_minutes =
            || courses.iter().flat_map(|c| c.lessons.iter().map(|l| l.total_minutes));

        let total_lessons = lesson_minutes().count();
        let total_minutes: u32 = lesson_minutes().sum();
        let min_lesson_minutes = lesson_minutes().min().unwrap_or(0);
        let max_lesson_minutes = lesson_minutes().max().unwrap_or(0);
        let average_lesson_minutes = if total_lessons == 0 {
            0.0
        } else {
            total_minutes as f64 / total_lessons as f64
        };

        tracing::debug!(
            courses = courses.len(),
            total_lessons,
            max_lesson_minutes,
            "analyzed course set"
        );

        CourseSetAnalysis {
            courses,
            total_minutes,
            total_lessons,
            min_lesson_minutes,
            max_lesson_minutes,
            average_lesson_minutes,
            recommended_min_session_minutes: max_lesson_minutes,
        }
    }
}

impl Default for LessonTimeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
