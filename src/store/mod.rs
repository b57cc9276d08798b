//! Course content store
//!
//! Courses own chapters, chapters own notes and engagement events.
//! Announcements optionally point at a course. Reads and engagement
//! tracking are public; every other write needs an `AdminSession`.

mod catalog;
mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, CatalogAnnouncement, CatalogChapter, CatalogCourse, CatalogNote};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::session::AdminSession;

pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: Id,
    pub course_id: Id,
    pub title: String,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Id,
    pub chapter_id: Id,
    /// Raw note text, fenced code blocks included
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub course_id: Option<Id>,
    pub is_active: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Shown on the portal: active and not archived
    pub fn is_visible(&self) -> bool {
        self.is_active && self.archived_at.is_none()
    }
}

/// Time spent on a chapter, recorded by the portal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub id: Id,
    pub chapter_id: Id,
    /// Seconds
    pub time_spent: u64,
    pub viewed_at: DateTime<Utc>,
}

/// Aggregated engagement for one chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterStats {
    pub chapter_id: Id,
    pub total_views: u64,
    pub avg_time_spent: f64,
    pub max_time_spent: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewChapter {
    pub course_id: Id,
    pub title: String,
    #[serde(default)]
    pub order_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub chapter_id: Id,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub course_id: Option<Id>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Full replacement of an announcement's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub archived_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Storage for courses, chapters, notes, announcements and engagement
pub trait ContentStore {
    /// All courses, newest first
    fn courses(&self) -> Vec<Course>;
    fn create_course(&mut self, admin: &AdminSession, course: NewCourse) -> Result<Course>;
    fn update_course(&mut self, admin: &AdminSession, id: Id, course: NewCourse) -> Result<Course>;
    /// Deletes the course's chapters, notes and events; detaches announcements
    fn delete_course(&mut self, admin: &AdminSession, id: Id) -> Result<()>;

    /// Chapters of a course by `order_index`
    fn chapters(&self, course_id: Id) -> Vec<Chapter>;
    fn create_chapter(&mut self, admin: &AdminSession, chapter: NewChapter) -> Result<Chapter>;
    fn update_chapter(&mut self, admin: &AdminSession, id: Id, title: &str, order_index: i64) -> Result<Chapter>;
    /// Deletes the chapter's notes and events
    fn delete_chapter(&mut self, admin: &AdminSession, id: Id) -> Result<()>;

    fn notes(&self, chapter_id: Id) -> Vec<Note>;
    fn create_note(&mut self, admin: &AdminSession, note: NewNote) -> Result<Note>;
    fn update_note(&mut self, admin: &AdminSession, id: Id, content: &str, is_published: bool) -> Result<Note>;
    fn delete_note(&mut self, admin: &AdminSession, id: Id) -> Result<()>;

    /// Visible announcements, newest first
    fn active_announcements(&self) -> Vec<Announcement>;
    /// Every announcement including archived ones, newest first
    fn all_announcements(&self) -> Vec<Announcement>;
    fn create_announcement(&mut self, admin: &AdminSession, announcement: NewAnnouncement) -> Result<Announcement>;
    fn update_announcement(
        &mut self,
        admin: &AdminSession,
        id: Id,
        update: AnnouncementUpdate,
    ) -> Result<Announcement>;
    fn delete_announcement(&mut self, admin: &AdminSession, id: Id) -> Result<()>;

    /// Record time spent on a chapter (no session needed)
    fn track_engagement(&mut self, chapter_id: Id, time_spent: u64) -> Result<EngagementEvent>;
    /// Per-chapter statistics, most viewed first
    fn engagement_stats(&self) -> Vec<ChapterStats>;
}
