/// In-memory session note board
///
/// Short notes jotted down during a focus session, kept newest-first with a
/// small set of toggleable context tags per note. Nothing is persisted; the
/// board lives and dies with its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Board-local id, monotonically increasing
    pub id: u64,

    /// Note text
    pub text: String,

    /// Context tags, sorted and deduplicated
    pub tags: BTreeSet<String>,

    /// When the note was added
    pub created_at: DateTime<Utc>,

    /// When the note was last edited
    pub updated_at: DateTime<Utc>,
}

/// Note collection, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteBoard {
    next_id: u64,
    notes: Vec<Note>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notes on the board
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Adds a note and returns its id
    ///
    /// New notes go to the front of the board.
    pub fn add(&mut self, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let now = Utc::now();
        self.notes.insert(
            0,
            Note {
                id,
                text: text.into(),
                tags: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            },
        );

        id
    }

    /// Looks up a note by id
    pub fn get(&self, id: u64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Replaces a note's text
    ///
    /// Returns false if no note with that id exists.
    pub fn edit(&mut self, id: u64, text: impl Into<String>) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.text = text.into();
                note.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Removes a note
    ///
    /// Returns false if no note with that id exists.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    /// Toggles a tag on a note
    ///
    /// Adds the tag if absent, removes it if present. Returns the tag's new
    /// presence, or None if the note doesn't exist.
    pub fn toggle_tag(&mut self, id: u64, tag: &str) -> Option<bool> {
        let note = self.notes.iter_mut().find(|n| n.id == id)?;

        let added = if note.tags.contains(tag) {
            note.tags.remove(tag);
            false
        } else {
            note.tags.insert(tag.to_string());
            true
        };

        note.updated_at = Utc::now();
        Some(added)
    }

    /// Iterates notes newest-first
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }
}
