//! course-notes - note rendering for a course-notes portal
//!
//! The core is a pure text transform: `segment` splits raw note content
//! into prose and fenced code blocks, and `highlight` turns a code body
//! into styled spans. Around it sit the renderers, the content store,
//! admin sessions and the portal view state.

pub mod config;
pub mod error;
pub mod render;
pub mod segment;
pub mod session;
pub mod store;
pub mod syntax;
pub mod view;

pub use error::{NotesError, Result};
pub use render::{render, render_checked, Block, Document};
pub use segment::{reassemble, segment, Segment};
pub use syntax::{highlight, LanguageRegistry, StyledSpan};
