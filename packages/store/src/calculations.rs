//! # Calculations: note and calculation access for one component subtree
//!
//! [`Calculations`] is the narrow service the UI uses to read calculations and
//! persist their notes. It is generic over the [`BackendClient`] so the same code
//! runs against the hosted backend and against [`crate::MemoryBackend`] in tests.
//!
//! Every method is exactly one backend round trip. There is no caching and no
//! optimistic update; two editors saving the same calculation race at the
//! backend and the last write wins.

use crate::backend::BackendClient;
use crate::error::Result;
use crate::models::{Calculation, Note};

/// The write a note session wants to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    /// No note is known for the calculation yet.
    Create {
        calculation_id: String,
        content: String,
    },
    /// The note exists; overwrite its content.
    Update { note_id: String, content: String },
}

/// Note and calculation operations backed by a [`BackendClient`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Calculations<B> {
    backend: B,
}

impl<B: BackendClient> Calculations<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Fetch the note attached to a calculation, if any.
    pub async fn get_note(&self, calculation_id: &str) -> Result<Option<Note>> {
        tracing::debug!(calculation_id, "fetching note");
        self.backend.get_note(calculation_id).await
    }

    /// Create the note for a calculation.
    pub async fn save_note(&self, calculation_id: &str, content: &str) -> Result<Note> {
        tracing::debug!(calculation_id, "creating note");
        self.backend.create_note(calculation_id, content).await
    }

    /// Overwrite the content of an existing note.
    pub async fn update_note(&self, note_id: &str, content: &str) -> Result<Note> {
        tracing::debug!(note_id, "updating note");
        self.backend.update_note(note_id, content).await
    }

    /// Dispatch a [`SaveRequest`] to create or update.
    pub async fn submit(&self, request: &SaveRequest) -> Result<Note> {
        match request {
            SaveRequest::Create {
                calculation_id,
                content,
            } => self.save_note(calculation_id, content).await,
            SaveRequest::Update { note_id, content } => self.update_note(note_id, content).await,
        }
    }

    /// Calculations visible to the current user, newest first.
    pub async fn list_calculations(&self) -> Result<Vec<Calculation>> {
        tracing::debug!("listing calculations");
        self.backend.list_calculations().await
    }

    pub async fn get_calculation(&self, id: &str) -> Result<Option<Calculation>> {
        tracing::debug!(id, "fetching calculation");
        self.backend.get_calculation(id).await
    }
}
