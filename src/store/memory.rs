//! In-memory content store

use std::collections::BTreeMap;

use chrono::Utc;

use super::{
    Announcement, AnnouncementUpdate, Chapter, ChapterStats, ContentStore, Course, EngagementEvent, Id,
    NewAnnouncement, NewChapter, NewCourse, NewNote, Note,
};
use crate::error::{NotesError, Result};
use crate::session::AdminSession;

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(NotesError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// Content store held in ordered maps, ids assigned per table
#[derive(Debug, Default)]
pub struct MemoryStore {
    courses: BTreeMap<Id, Course>,
    chapters: BTreeMap<Id, Chapter>,
    notes: BTreeMap<Id, Note>,
    announcements: BTreeMap<Id, Announcement>,
    events: BTreeMap<Id, EngagementEvent>,
    last_id: [Id; 5],
}

const COURSES: usize = 0;
const CHAPTERS: usize = 1;
const NOTES: usize = 2;
const ANNOUNCEMENTS: usize = 3;
const EVENTS: usize = 4;

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self, table: usize) -> Id {
        self.last_id[table] += 1;
        self.last_id[table]
    }

    pub fn course(&self, id: Id) -> Option<&Course> {
        self.courses.get(&id)
    }

    pub fn chapter(&self, id: Id) -> Option<&Chapter> {
        self.chapters.get(&id)
    }

    pub fn note(&self, id: Id) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Published notes of a chapter, in creation order
    pub fn published_notes(&self, chapter_id: Id) -> Vec<Note> {
        self.notes(chapter_id)
            .into_iter()
            .filter(|n| n.is_published)
            .collect()
    }

    pub(crate) fn insert_course(&mut self, course: NewCourse) -> Result<Course> {
        require_title(&course.title)?;
        let course = Course {
            id: self.next_id(COURSES),
            title: course.title,
            description: course.description,
            created_at: Utc::now(),
        };
        self.courses.insert(course.id, course.clone());
        Ok(course)
    }

    pub(crate) fn insert_chapter(&mut self, chapter: NewChapter) -> Result<Chapter> {
        require_title(&chapter.title)?;
        if !self.courses.contains_key(&chapter.course_id) {
            return Err(NotesError::NotFound { kind: "Course", id: chapter.course_id });
        }
        let chapter = Chapter {
            id: self.next_id(CHAPTERS),
            course_id: chapter.course_id,
            title: chapter.title,
            order_index: chapter.order_index,
            created_at: Utc::now(),
        };
        self.chapters.insert(chapter.id, chapter.clone());
        Ok(chapter)
    }

    pub(crate) fn insert_note(&mut self, note: NewNote) -> Result<Note> {
        if !self.chapters.contains_key(&note.chapter_id) {
            return Err(NotesError::NotFound { kind: "Chapter", id: note.chapter_id });
        }
        let now = Utc::now();
        let note = Note {
            id: self.next_id(NOTES),
            chapter_id: note.chapter_id,
            content: note.content,
            is_published: note.is_published,
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    pub(crate) fn insert_announcement(&mut self, announcement: NewAnnouncement) -> Result<Announcement> {
        require_title(&announcement.title)?;
        if let Some(course_id) = announcement.course_id {
            if !self.courses.contains_key(&course_id) {
                return Err(NotesError::NotFound { kind: "Course", id: course_id });
            }
        }
        let announcement = Announcement {
            id: self.next_id(ANNOUNCEMENTS),
            title: announcement.title,
            content: announcement.content,
            course_id: announcement.course_id,
            is_active: announcement.is_active,
            archived_at: None,
            created_at: Utc::now(),
        };
        self.announcements.insert(announcement.id, announcement.clone());
        Ok(announcement)
    }

    fn remove_chapter_cascade(&mut self, chapter_id: Id) {
        self.chapters.remove(&chapter_id);
        self.notes.retain(|_, n| n.chapter_id != chapter_id);
        self.events.retain(|_, e| e.chapter_id != chapter_id);
    }
}

/// Newest first; ids break ties between equal timestamps
fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> (chrono::DateTime<Utc>, Id),
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl ContentStore for MemoryStore {
    fn courses(&self) -> Vec<Course> {
        let mut courses: Vec<_> = self.courses.values().cloned().collect();
        newest_first(&mut courses, |c| (c.created_at, c.id));
        courses
    }

    fn create_course(&mut self, admin: &AdminSession, course: NewCourse) -> Result<Course> {
        let course = self.insert_course(course)?;
        log::info!("{} created course {}", admin.username(), course.id);
        Ok(course)
    }

    fn update_course(&mut self, admin: &AdminSession, id: Id, course: NewCourse) -> Result<Course> {
        require_title(&course.title)?;
        let existing = self
            .courses
            .get_mut(&id)
            .ok_or(NotesError::NotFound { kind: "Course", id })?;
        existing.title = course.title;
        existing.description = course.description;
        log::info!("{} updated course {}", admin.username(), id);
        Ok(existing.clone())
    }

    fn delete_course(&mut self, admin: &AdminSession, id: Id) -> Result<()> {
        if self.courses.remove(&id).is_none() {
            return Err(NotesError::NotFound { kind: "Course", id });
        }
        let chapter_ids: Vec<Id> = self
            .chapters
            .values()
            .filter(|c| c.course_id == id)
            .map(|c| c.id)
            .collect();
        for chapter_id in chapter_ids {
            self.remove_chapter_cascade(chapter_id);
        }
        for announcement in self.announcements.values_mut() {
            if announcement.course_id == Some(id) {
                announcement.course_id = None;
            }
        }
        log::info!("{} deleted course {}", admin.username(), id);
        Ok(())
    }

    fn chapters(&self, course_id: Id) -> Vec<Chapter> {
        let mut chapters: Vec<_> = self
            .chapters
            .values()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect();
        chapters.sort_by_key(|c| (c.order_index, c.id));
        chapters
    }

    fn create_chapter(&mut self, admin: &AdminSession, chapter: NewChapter) -> Result<Chapter> {
        let chapter = self.insert_chapter(chapter)?;
        log::info!("{} created chapter {}", admin.username(), chapter.id);
        Ok(chapter)
    }

    fn update_chapter(&mut self, admin: &AdminSession, id: Id, title: &str, order_index: i64) -> Result<Chapter> {
        require_title(title)?;
        let existing = self
            .chapters
            .get_mut(&id)
            .ok_or(NotesError::NotFound { kind: "Chapter", id })?;
        existing.title = title.to_string();
        existing.order_index = order_index;
        log::info!("{} updated chapter {}", admin.username(), id);
        Ok(existing.clone())
    }

    fn delete_chapter(&mut self, admin: &AdminSession, id: Id) -> Result<()> {
        if !self.chapters.contains_key(&id) {
            return Err(NotesError::NotFound { kind: "Chapter", id });
        }
        self.remove_chapter_cascade(id);
        log::info!("{} deleted chapter {}", admin.username(), id);
        Ok(())
    }

    fn notes(&self, chapter_id: Id) -> Vec<Note> {
        self.notes
            .values()
            .filter(|n| n.chapter_id == chapter_id)
            .cloned()
            .collect()
    }

    fn create_note(&mut self, admin: &AdminSession, note: NewNote) -> Result<Note> {
        let note = self.insert_note(note)?;
        log::info!("{} created note {}", admin.username(), note.id);
        Ok(note)
    }

    fn update_note(&mut self, admin: &AdminSession, id: Id, content: &str, is_published: bool) -> Result<Note> {
        let existing = self
            .notes
            .get_mut(&id)
            .ok_or(NotesError::NotFound { kind: "Note", id })?;
        existing.content = content.to_string();
        existing.is_published = is_published;
        existing.updated_at = Utc::now();
        log::info!("{} updated note {}", admin.username(), id);
        Ok(existing.clone())
    }

    fn delete_note(&mut self, admin: &AdminSession, id: Id) -> Result<()> {
        self.notes
            .remove(&id)
            .ok_or(NotesError::NotFound { kind: "Note", id })?;
        log::info!("{} deleted note {}", admin.username(), id);
        Ok(())
    }

    fn active_announcements(&self) -> Vec<Announcement> {
        let mut visible: Vec<_> = self
            .announcements
            .values()
            .filter(|a| a.is_visible())
            .cloned()
            .collect();
        newest_first(&mut visible, |a| (a.created_at, a.id));
        visible
    }

    fn all_announcements(&self) -> Vec<Announcement> {
        let mut all: Vec<_> = self.announcements.values().cloned().collect();
        newest_first(&mut all, |a| (a.created_at, a.id));
        all
    }

    fn create_announcement(&mut self, admin: &AdminSession, announcement: NewAnnouncement) -> Result<Announcement> {
        let announcement = self.insert_announcement(announcement)?;
        log::info!("{} created announcement {}", admin.username(), announcement.id);
        Ok(announcement)
    }

    fn update_announcement(
        &mut self,
        admin: &AdminSession,
        id: Id,
        update: AnnouncementUpdate,
    ) -> Result<Announcement> {
        let existing = self
            .announcements
            .get_mut(&id)
            .ok_or(NotesError::NotFound { kind: "Announcement", id })?;
        existing.title = update.title;
        existing.content = update.content;
        existing.is_active = update.is_active;
        existing.archived_at = update.archived_at;
        log::info!("{} updated announcement {}", admin.username(), id);
        Ok(existing.clone())
    }

    fn delete_announcement(&mut self, admin: &AdminSession, id: Id) -> Result<()> {
        self.announcements
            .remove(&id)
            .ok_or(NotesError::NotFound { kind: "Announcement", id })?;
        log::info!("{} deleted announcement {}", admin.username(), id);
        Ok(())
    }

    fn track_engagement(&mut self, chapter_id: Id, time_spent: u64) -> Result<EngagementEvent> {
        if !self.chapters.contains_key(&chapter_id) {
            return Err(NotesError::NotFound { kind: "Chapter", id: chapter_id });
        }
        let event = EngagementEvent {
            id: self.next_id(EVENTS),
            chapter_id,
            time_spent,
            viewed_at: Utc::now(),
        };
        self.events.insert(event.id, event.clone());
        log::debug!("Tracked {}s on chapter {}", time_spent, chapter_id);
        Ok(event)
    }

    fn engagement_stats(&self) -> Vec<ChapterStats> {
        let mut grouped: BTreeMap<Id, (u64, u64, u64)> = BTreeMap::new();
        for event in self.events.values() {
            let entry = grouped.entry(event.chapter_id).or_insert((0, 0, 0));
            entry.0 += 1;
            entry.1 += event.time_spent;
            entry.2 = entry.2.max(event.time_spent);
        }

        let mut stats: Vec<ChapterStats> = grouped
            .into_iter()
            .map(|(chapter_id, (views, total, max))| ChapterStats {
                chapter_id,
                total_views: views,
                avg_time_spent: total as f64 / views as f64,
                max_time_spent: max,
            })
            .collect();
        // Stable sort keeps chapter id order among equal view counts
        stats.sort_by(|a, b| b.total_views.cmp(&a.total_views));
        stats
    }
}
