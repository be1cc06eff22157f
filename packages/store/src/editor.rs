//! # Note session: the state machine behind the note editor
//!
//! A [`NoteSession`] tracks one editing session of the note attached to a
//! calculation. It decides whether the next save creates or updates, and which
//! controls are enabled, without doing any I/O itself:
//!
//! ```text
//! Idle ─► Loading ─► Loaded | LoadedEmpty | LoadFailed
//! Loaded | LoadedEmpty | Saved | SaveFailed ─► Saving ─► Saved | SaveFailed
//! LoadFailed ─► Loading            (retry)
//! Saved ─► Loaded                  (acknowledged, or edited)
//! ```
//!
//! Callers drive it in two halves around each await point
//! (`begin_load`/`finish_load`, `begin_save`/`finish_save`) so that UI state
//! is never borrowed across a request. [`NoteSession::load`] and
//! [`NoteSession::save`] bundle both halves for callers that own the session.
//!
//! The note id moves from `None` to a concrete id at most once per session;
//! after that every save is an update against that id.

use crate::backend::BackendClient;
use crate::calculations::{Calculations, SaveRequest};
use crate::error::{Error, Result};
use crate::models::Note;

/// Where an editing session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Idle,
    Loading,
    /// A note exists for the calculation.
    Loaded,
    /// No note exists yet; the first save will create one.
    LoadedEmpty,
    LoadFailed(Error),
    Saving,
    /// Last save succeeded; shown as a transient acknowledgment.
    Saved,
    SaveFailed(Error),
}

/// One editing session of the note for a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteSession {
    calculation_id: String,
    note_id: Option<String>,
    content: String,
    dirty: bool,
    state: EditorState,
    /// Content sent with the in-flight save.
    pending: Option<String>,
    /// Number of saves started in this session.
    saves: u64,
}

impl NoteSession {
    pub fn new(calculation_id: impl Into<String>) -> Self {
        Self {
            calculation_id: calculation_id.into(),
            note_id: None,
            content: String::new(),
            dirty: false,
            state: EditorState::Idle,
            pending: None,
            saves: 0,
        }
    }

    pub fn calculation_id(&self) -> &str {
        &self.calculation_id
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Generation of the latest save, passed back to [`NoteSession::acknowledge`].
    pub fn save_generation(&self) -> u64 {
        self.saves
    }

    /// Whether the content differs from what the backend last confirmed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The failure to show the user, if the last load or save failed.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            EditorState::LoadFailed(e) | EditorState::SaveFailed(e) => Some(e),
            _ => None,
        }
    }

    /// The text area accepts input once the note has been fetched.
    pub fn input_enabled(&self) -> bool {
        !matches!(
            self.state,
            EditorState::Idle | EditorState::Loading | EditorState::LoadFailed(_)
        )
    }

    /// The save control is enabled once loaded and while no save is in flight.
    pub fn save_enabled(&self) -> bool {
        matches!(
            self.state,
            EditorState::Loaded
                | EditorState::LoadedEmpty
                | EditorState::Saved
                | EditorState::SaveFailed(_)
        )
    }

    /// Enter `Loading`. Allowed from `Idle` and, as a retry, from `LoadFailed`.
    pub fn begin_load(&mut self) -> bool {
        match self.state {
            EditorState::Idle | EditorState::LoadFailed(_) => {
                self.state = EditorState::Loading;
                true
            }
            _ => false,
        }
    }

    /// Apply the result of fetching the note for `calculation_id`.
    ///
    /// Results for another calculation, or arriving when no load is in
    /// flight, are stale and ignored.
    pub fn finish_load(&mut self, calculation_id: &str, result: Result<Option<Note>>) {
        if calculation_id != self.calculation_id || self.state != EditorState::Loading {
            tracing::debug!(calculation_id, "ignoring stale note load");
            return;
        }
        match result {
            Ok(Some(note)) => {
                self.content = note.content;
                self.note_id = Some(note.id);
                self.dirty = false;
                self.state = EditorState::Loaded;
            }
            Ok(None) => {
                self.content.clear();
                self.dirty = false;
                self.state = EditorState::LoadedEmpty;
            }
            Err(e) => {
                self.state = EditorState::LoadFailed(e);
            }
        }
    }

    /// Replace the content. Ignored while input is disabled.
    pub fn edit(&mut self, content: impl Into<String>) {
        if !self.input_enabled() {
            return;
        }
        self.content = content.into();
        self.dirty = true;
        if self.state == EditorState::Saved {
            self.state = EditorState::Loaded;
        }
    }

    /// Enter `Saving` and return the write to perform, or `None` if the save
    /// control is disabled.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if !self.save_enabled() {
            return None;
        }
        let content = self.content.clone();
        let request = match &self.note_id {
            Some(note_id) => SaveRequest::Update {
                note_id: note_id.clone(),
                content: content.clone(),
            },
            None => SaveRequest::Create {
                calculation_id: self.calculation_id.clone(),
                content: content.clone(),
            },
        };
        self.pending = Some(content);
        self.saves += 1;
        self.state = EditorState::Saving;
        Some(request)
    }

    /// Apply the result of the in-flight save.
    pub fn finish_save(&mut self, result: Result<Note>) {
        if self.state != EditorState::Saving {
            return;
        }
        let sent = self.pending.take();
        match result {
            Ok(note) => {
                if self.note_id.is_none() {
                    self.note_id = Some(note.id);
                }
                // Typing during the save keeps the session dirty.
                self.dirty = sent.as_deref() != Some(self.content.as_str());
                self.state = EditorState::Saved;
            }
            Err(e) => {
                self.state = EditorState::SaveFailed(e);
            }
        }
    }

    /// Clear the transient "Saved" acknowledgment of save `generation`.
    ///
    /// A timer from an earlier save does nothing once a later save started.
    pub fn acknowledge(&mut self, generation: u64) {
        if self.state == EditorState::Saved && generation == self.saves {
            self.state = EditorState::Loaded;
        }
    }

    /// Fetch the note and apply the result.
    pub async fn load<B: BackendClient>(&mut self, calculations: &Calculations<B>) -> Result<()> {
        if !self.begin_load() {
            return Ok(());
        }
        let calculation_id = self.calculation_id.clone();
        let result = calculations.get_note(&calculation_id).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Error::clone);
        self.finish_load(&calculation_id, result);
        outcome
    }

    /// Perform one save. Returns `Ok(None)` when saving is currently disabled.
    pub async fn save<B: BackendClient>(
        &mut self,
        calculations: &Calculations<B>,
    ) -> Result<Option<Note>> {
        let Some(request) = self.begin_save() else {
            return Ok(None);
        };
        let result = calculations.submit(&request).await;
        self.finish_save(result.clone());
        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{calculation, Call, RecordingBackend};

    fn setup() -> (RecordingBackend, Calculations<RecordingBackend>) {
        let backend = RecordingBackend::new();
        for id in ["calc-1", "calc-7"] {
            backend.inner.insert_calculation(calculation(id));
        }
        let calcs = Calculations::new(backend.clone());
        (backend, calcs)
    }

    #[tokio::test]
    async fn test_create_then_update_scenario() {
        let (backend, calcs) = setup();
        let mut session = NoteSession::new("calc-1");

        assert!(!session.input_enabled());
        session.load(&calcs).await.unwrap();
        assert_eq!(session.state(), &EditorState::LoadedEmpty);
        assert_eq!(session.content(), "");
        assert!(session.save_enabled());

        session.edit("Client is optimistic");
        let note = session.save(&calcs).await.unwrap().unwrap();
        assert_eq!(session.state(), &EditorState::Saved);
        assert_eq!(session.note_id(), Some(note.id.as_str()));

        session.edit("Client is optimistic, follow up in May");
        session.save(&calcs).await.unwrap();

        let writes: Vec<Call> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateNote { .. } | Call::UpdateNote { .. }))
            .collect();
        assert_eq!(
            writes,
            vec![
                Call::CreateNote {
                    calculation_id: "calc-1".to_string(),
                    content: "Client is optimistic".to_string(),
                },
                Call::UpdateNote {
                    note_id: note.id.clone(),
                    content: "Client is optimistic, follow up in May".to_string(),
                },
            ]
        );
        assert_eq!(backend.inner.note_count(), 1);
    }

    #[tokio::test]
    async fn test_existing_note_always_updates() {
        let (backend, calcs) = setup();
        let existing = backend
            .inner
            .create_note("calc-7", "Earlier session")
            .await
            .unwrap();

        let mut session = NoteSession::new("calc-7");
        session.load(&calcs).await.unwrap();
        assert_eq!(session.state(), &EditorState::Loaded);
        assert_eq!(session.content(), "Earlier session");
        assert_eq!(session.note_id(), Some(existing.id.as_str()));

        for content in ["", "x", "Earlier session"] {
            session.edit(content);
            session.save(&calcs).await.unwrap();
        }

        assert_eq!(backend.creates(), 0);
        assert_eq!(backend.updates(), 3);
    }

    #[tokio::test]
    async fn test_saving_empty_content_is_allowed() {
        let (backend, calcs) = setup();
        let mut session = NoteSession::new("calc-1");
        session.load(&calcs).await.unwrap();

        let note = session.save(&calcs).await.unwrap().unwrap();
        assert_eq!(note.content, "");
        assert_eq!(backend.creates(), 1);
    }

    #[test]
    fn test_controls_follow_state() {
        let mut session = NoteSession::new("calc-1");
        assert!(!session.input_enabled());
        assert!(!session.save_enabled());
        assert!(session.begin_save().is_none());

        assert!(session.begin_load());
        assert!(!session.begin_load());
        assert!(!session.input_enabled());
        session.edit("ignored while loading");
        assert_eq!(session.content(), "");

        session.finish_load("calc-1", Ok(None));
        session.edit("draft");
        assert!(session.is_dirty());

        let request = session.begin_save().unwrap();
        assert_eq!(
            request,
            SaveRequest::Create {
                calculation_id: "calc-1".to_string(),
                content: "draft".to_string(),
            }
        );
        assert_eq!(session.state(), &EditorState::Saving);
        assert!(!session.save_enabled());
        assert!(session.input_enabled());
        assert!(session.begin_save().is_none());
    }

    #[test]
    fn test_edit_during_save_stays_dirty() {
        let mut session = NoteSession::new("calc-1");
        session.begin_load();
        session.finish_load("calc-1", Ok(None));
        session.edit("first");
        session.begin_save();
        session.edit("first and more");

        session.finish_save(Ok(Note {
            id: "note-1".to_string(),
            calculation_id: "calc-1".to_string(),
            content: "first".to_string(),
            updated_at: String::new(),
        }));

        assert_eq!(session.state(), &EditorState::Saved);
        assert!(session.is_dirty());
        assert_eq!(session.content(), "first and more");
        assert_eq!(
            session.begin_save(),
            Some(SaveRequest::Update {
                note_id: "note-1".to_string(),
                content: "first and more".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_surfaced_and_retryable() {
        let (backend, calcs) = setup();
        let mut session = NoteSession::new("calc-1");

        backend.fail_next(Error::Backend("connection reset".to_string()));
        let err = session.load(&calcs).await.unwrap_err();
        assert_eq!(err, Error::Backend("connection reset".to_string()));
        assert_eq!(session.error(), Some(&err));
        assert!(!session.input_enabled());
        assert!(!session.save_enabled());

        session.load(&calcs).await.unwrap();
        assert_eq!(session.state(), &EditorState::LoadedEmpty);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_create_pending() {
        let (backend, calcs) = setup();
        let mut session = NoteSession::new("calc-1");
        session.load(&calcs).await.unwrap();
        session.edit("keep me");

        backend.fail_next(Error::Backend("timeout".to_string()));
        assert!(session.save(&calcs).await.is_err());
        assert!(matches!(session.state(), EditorState::SaveFailed(_)));
        assert!(session.note_id().is_none());
        assert!(session.is_dirty());
        assert!(session.save_enabled());

        session.save(&calcs).await.unwrap();
        assert_eq!(backend.creates(), 2);
        assert_eq!(backend.inner.note_count(), 1);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut session = NoteSession::new("calc-2");
        session.begin_load();
        session.finish_load(
            "calc-1",
            Ok(Some(Note {
                id: "note-1".to_string(),
                calculation_id: "calc-1".to_string(),
                content: "belongs elsewhere".to_string(),
                updated_at: String::new(),
            })),
        );
        assert_eq!(session.state(), &EditorState::Loading);
        assert!(session.note_id().is_none());

        session.finish_load("calc-2", Ok(None));
        assert_eq!(session.state(), &EditorState::LoadedEmpty);
    }

    #[test]
    fn test_note_id_is_assigned_once() {
        let mut session = NoteSession::new("calc-1");
        session.begin_load();
        session.finish_load("calc-1", Ok(None));

        let saved = |id: &str| Note {
            id: id.to_string(),
            calculation_id: "calc-1".to_string(),
            content: String::new(),
            updated_at: String::new(),
        };
        session.begin_save();
        session.finish_save(Ok(saved("note-1")));
        session.begin_save();
        session.finish_save(Ok(saved("note-9")));

        assert_eq!(session.note_id(), Some("note-1"));
    }

    #[test]
    fn test_acknowledge_clears_saved() {
        let mut session = NoteSession::new("calc-1");
        session.begin_load();
        session.finish_load("calc-1", Ok(None));
        session.begin_save();
        session.finish_save(Ok(Note {
            id: "note-1".to_string(),
            calculation_id: "calc-1".to_string(),
            content: String::new(),
            updated_at: String::new(),
        }));
        assert_eq!(session.state(), &EditorState::Saved);
        let generation = session.save_generation();
        session.acknowledge(generation);
        assert_eq!(session.state(), &EditorState::Loaded);
        session.acknowledge(generation);
        assert_eq!(session.state(), &EditorState::Loaded);
    }

    #[tokio::test]
    async fn test_earlier_acknowledgment_keeps_later_saved() {
        let (_backend, calcs) = setup();
        let mut session = NoteSession::new("calc-1");
        session.load(&calcs).await.unwrap();

        session.edit("first");
        session.save(&calcs).await.unwrap();
        let first = session.save_generation();
        session.edit("second");
        session.save(&calcs).await.unwrap();
        let second = session.save_generation();
        assert_ne!(first, second);

        session.acknowledge(first);
        assert_eq!(session.state(), &EditorState::Saved);
        session.acknowledge(second);
        assert_eq!(session.state(), &EditorState::Loaded);
    }
}
