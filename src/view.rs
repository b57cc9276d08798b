//! Portal view state
//!
//! Selection and panel state of the reading portal, kept in one
//! serialisable value owned by the presentation layer instead of
//! scattered globals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Announcement, Chapter, Course, Id};

/// Seconds between engagement reports while a chapter is open
pub const ENGAGEMENT_INTERVAL_SECS: i64 = 30;

/// Active announcements shown on the portal at once
pub const MAX_VISIBLE_ANNOUNCEMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalView {
    pub selected_course: Option<Id>,
    pub selected_chapter: Option<Id>,
    pub selected_note: Option<Id>,
    pub sidebar_open: bool,
    pub show_announcement_history: bool,
    pub show_analytics: bool,
    pub active_announcement: usize,
}

impl Default for PortalView {
    fn default() -> Self {
        Self {
            selected_course: None,
            selected_chapter: None,
            selected_note: None,
            sidebar_open: true,
            show_announcement_history: false,
            show_analytics: false,
            active_announcement: 0,
        }
    }
}

impl PortalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a course; chapter and note selection are cleared
    pub fn select_course(&mut self, course_id: Id) {
        self.selected_course = Some(course_id);
        self.selected_chapter = None;
        self.selected_note = None;
    }

    /// Select a chapter and start timing it; note selection is cleared
    pub fn select_chapter(&mut self, chapter_id: Id, now: DateTime<Utc>) -> EngagementTimer {
        self.selected_chapter = Some(chapter_id);
        self.selected_note = None;
        EngagementTimer::start(chapter_id, now)
    }

    pub fn select_note(&mut self, note_id: Id) {
        self.selected_note = Some(note_id);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn toggle_announcement_history(&mut self) {
        self.show_announcement_history = !self.show_announcement_history;
    }

    pub fn toggle_analytics(&mut self) {
        self.show_analytics = !self.show_analytics;
    }

    /// Advance to the next visible announcement, wrapping around
    pub fn cycle_announcement(&mut self, count: usize) {
        let count = count.min(MAX_VISIBLE_ANNOUNCEMENTS);
        self.active_announcement = if count == 0 {
            0
        } else {
            (self.active_announcement + 1) % count
        };
    }
}

/// The announcements the portal shows (at most three, newest first)
pub fn visible_announcements(active: &[Announcement]) -> &[Announcement] {
    &active[..active.len().min(MAX_VISIBLE_ANNOUNCEMENTS)]
}

/// Course title for breadcrumbs, `Course` if unknown
pub fn course_name(courses: &[Course], id: Id) -> &str {
    courses
        .iter()
        .find(|c| c.id == id)
        .map_or("Course", |c| c.title.as_str())
}

/// Chapter title for breadcrumbs, `Chapter` if unknown
pub fn chapter_name(chapters: &[Chapter], id: Id) -> &str {
    chapters
        .iter()
        .find(|c| c.id == id)
        .map_or("Chapter", |c| c.title.as_str())
}

/// Measures time spent on the open chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementTimer {
    pub chapter_id: Id,
    started_at: DateTime<Utc>,
    last_report: DateTime<Utc>,
}

impl EngagementTimer {
    pub fn start(chapter_id: Id, now: DateTime<Utc>) -> Self {
        Self {
            chapter_id,
            started_at: now,
            last_report: now,
        }
    }

    /// Whole seconds since the chapter was opened
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    /// Time spent to report if a report interval has passed
    ///
    /// Like the portal's interval timer, each report carries the total
    /// time since the chapter was opened.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<u64> {
        if (now - self.last_report).num_seconds() >= ENGAGEMENT_INTERVAL_SECS {
            self.last_report = now;
            Some(self.elapsed_secs(now))
        } else {
            None
        }
    }
}
