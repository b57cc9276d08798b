//! TOML catalog import
//!
//! Seeds a `MemoryStore` from a file such as:
//!
//! ```toml
//! [[courses]]
//! title = "Rust Basics"
//! description = "Ownership and borrowing"
//!
//! [[courses.chapters]]
//! title = "Ownership"
//!
//! [[courses.chapters.notes]]
//! content = "Moves transfer ownership."
//! is_published = true
//!
//! [[courses.announcements]]
//! title = "Quiz on Friday"
//!
//! [[announcements]]
//! title = "Welcome"
//! ```
//!
//! Chapters without `order_index` are ordered as written. Course
//! announcements are linked to their course; top-level ones are global.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::memory::MemoryStore;
use super::{NewAnnouncement, NewChapter, NewCourse, NewNote};
use crate::error::Result;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<CatalogCourse>,
    #[serde(default)]
    pub announcements: Vec<CatalogAnnouncement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chapters: Vec<CatalogChapter>,
    #[serde(default)]
    pub announcements: Vec<CatalogAnnouncement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogChapter {
    pub title: String,
    pub order_index: Option<i64>,
    #[serde(default)]
    pub notes: Vec<CatalogNote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogNote {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAnnouncement {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Catalog {
    /// Parse a catalog from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::parse(&contents)?;
        log::info!(
            "Loaded catalog {} ({} course(s))",
            path.display(),
            catalog.courses.len()
        );
        Ok(catalog)
    }

    /// Build a store holding everything in the catalog
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();

        for course in self.courses {
            let created = store.insert_course(NewCourse {
                title: course.title,
                description: course.description,
            })?;

            for (position, chapter) in course.chapters.into_iter().enumerate() {
                let order_index = chapter.order_index.unwrap_or(position as i64 + 1);
                let new_chapter = store.insert_chapter(NewChapter {
                    course_id: created.id,
                    title: chapter.title,
                    order_index,
                })?;
                for note in chapter.notes {
                    store.insert_note(NewNote {
                        chapter_id: new_chapter.id,
                        content: note.content,
                        is_published: note.is_published,
                    })?;
                }
            }

            for announcement in course.announcements {
                store.insert_announcement(announcement.into_new(Some(created.id)))?;
            }
        }

        for announcement in self.announcements {
            store.insert_announcement(announcement.into_new(None))?;
        }

        Ok(store)
    }
}

impl CatalogAnnouncement {
    fn into_new(self, course_id: Option<i64>) -> NewAnnouncement {
        NewAnnouncement {
            title: self.title,
            content: self.content,
            course_id,
            is_active: self.is_active,
        }
    }
}
