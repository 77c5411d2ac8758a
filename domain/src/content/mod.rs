//! Repository content types

pub mod entities;

pub use entities::{Content, ContentLocation, EntryKind, FolderEntry};
