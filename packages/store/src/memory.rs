use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::BackendClient;
use crate::error::{Error, Result};
use crate::models::{Calculation, Note, Profile, Role, UserInfo};

#[derive(Debug, Clone)]
struct Account {
    user: UserInfo,
    role: Role,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    /// Index into `accounts` of the signed-in user.
    session: Option<usize>,
    notes: HashMap<String, Note>,
    calculations: Vec<Calculation>,
    next_id: u64,
}

impl State {
    fn session_account(&self) -> Result<&Account> {
        self.session
            .and_then(|i| self.accounts.get(i))
            .ok_or(Error::NotAuthenticated)
    }

    fn require_calculation(&self, calculation_id: &str) -> Result<()> {
        if self.calculations.iter().any(|c| c.id == calculation_id) {
            Ok(())
        } else {
            Err(Error::CalculationNotFound(calculation_id.to_string()))
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory BackendClient for testing and local development.
///
/// Clones share the same state. Passwords are kept in plain text; this backend
/// never leaves the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the maps are still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an account and return its identity.
    pub fn add_user(&self, email: &str, password: &str, role: Role) -> UserInfo {
        let mut state = self.lock();
        let user = UserInfo {
            id: state.next_id("user"),
            email: email.trim().to_lowercase(),
            name: None,
        };
        state.accounts.push(Account {
            user: user.clone(),
            role,
            password: password.to_string(),
        });
        user
    }

    /// Store a calculation as if it had been produced by the calculator.
    pub fn insert_calculation(&self, calculation: Calculation) {
        let mut state = self.lock();
        state.calculations.retain(|c| c.id != calculation.id);
        state.calculations.push(calculation);
    }

    /// Number of stored notes, across all calculations.
    pub fn note_count(&self) -> usize {
        self.lock().notes.len()
    }
}

fn now() -> String {
    // Stable timestamp keeps test fixtures deterministic.
    "1970-01-01T00:00:00Z".to_string()
}

impl BackendClient for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo> {
        let mut state = self.lock();
        let email = email.trim().to_lowercase();
        let index = state
            .accounts
            .iter()
            .position(|a| a.user.email == email && a.password == password)
            .ok_or_else(|| Error::Authentication("Invalid email or password".to_string()))?;
        state.session = Some(index);
        Ok(state.accounts[index].user.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.lock().session = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<UserInfo>> {
        let state = self.lock();
        Ok(state.session_account().ok().map(|a| a.user.clone()))
    }

    async fn current_profile(&self) -> Result<Option<Profile>> {
        let state = self.lock();
        Ok(state.session_account().ok().map(|a| Profile {
            user_id: a.user.id.clone(),
            display_name: a.user.name.clone(),
            role: a.role,
        }))
    }

    async fn update_email(&self, new_email: &str) -> Result<UserInfo> {
        let mut state = self.lock();
        let index = state.session.ok_or(Error::NotAuthenticated)?;
        let account = state
            .accounts
            .get_mut(index)
            .ok_or(Error::NotAuthenticated)?;
        account.user.email = new_email.trim().to_lowercase();
        Ok(account.user.clone())
    }

    async fn update_password(&self, new_password: &str) -> Result<()> {
        let mut state = self.lock();
        let index = state.session.ok_or(Error::NotAuthenticated)?;
        let account = state
            .accounts
            .get_mut(index)
            .ok_or(Error::NotAuthenticated)?;
        account.password = new_password.to_string();
        Ok(())
    }

    async fn get_note(&self, calculation_id: &str) -> Result<Option<Note>> {
        let state = self.lock();
        state.require_calculation(calculation_id)?;
        Ok(state
            .notes
            .values()
            .find(|n| n.calculation_id == calculation_id)
            .cloned())
    }

    async fn create_note(&self, calculation_id: &str, content: &str) -> Result<Note> {
        let mut state = self.lock();
        state.require_calculation(calculation_id)?;
        let existing = state
            .notes
            .values()
            .find(|n| n.calculation_id == calculation_id)
            .map(|n| n.id.clone());
        let id = match existing {
            Some(id) => id,
            None => state.next_id("note"),
        };
        let note = Note {
            id: id.clone(),
            calculation_id: calculation_id.to_string(),
            content: content.to_string(),
            updated_at: now(),
        };
        state.notes.insert(id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, note_id: &str, content: &str) -> Result<Note> {
        let mut state = self.lock();
        let note = state
            .notes
            .get_mut(note_id)
            .ok_or_else(|| Error::NoteNotFound(note_id.to_string()))?;
        note.content = content.to_string();
        note.updated_at = now();
        Ok(note.clone())
    }

    async fn list_calculations(&self) -> Result<Vec<Calculation>> {
        let state = self.lock();
        let mut calculations = state.calculations.clone();
        calculations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(calculations)
    }

    async fn get_calculation(&self, id: &str) -> Result<Option<Calculation>> {
        let state = self.lock();
        Ok(state.calculations.iter().find(|c| c.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::calculation;

    #[tokio::test]
    async fn test_note_lifecycle() {
        let backend = MemoryBackend::new();
        backend.insert_calculation(calculation("calc-1"));

        assert!(backend.get_note("calc-1").await.unwrap().is_none());

        let created = backend.create_note("calc-1", "First").await.unwrap();
        assert_eq!(created.calculation_id, "calc-1");

        let updated = backend.update_note(&created.id, "Second").await.unwrap();
        assert_eq!(updated.id, created.id);

        let fetched = backend.get_note("calc-1").await.unwrap().unwrap();
        assert_eq!(fetched.content, "Second");
        assert_eq!(backend.note_count(), 1);
    }

    #[tokio::test]
    async fn test_create_never_duplicates_a_calculation_note() {
        let backend = MemoryBackend::new();
        backend.insert_calculation(calculation("calc-1"));

        let first = backend.create_note("calc-1", "From editor A").await.unwrap();
        let second = backend.create_note("calc-1", "From editor B").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(backend.note_count(), 1);
        let stored = backend.get_note("calc-1").await.unwrap().unwrap();
        assert_eq!(stored.content, "From editor B");
    }

    #[tokio::test]
    async fn test_notes_need_a_known_calculation() {
        let backend = MemoryBackend::new();
        let missing = Error::CalculationNotFound("calc-404".to_string());

        assert_eq!(backend.get_note("calc-404").await.unwrap_err(), missing);
        assert_eq!(
            backend.create_note("calc-404", "x").await.unwrap_err(),
            missing
        );
        assert_eq!(backend.note_count(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_note() {
        let backend = MemoryBackend::new();
        let err = backend.update_note("note-404", "x").await.unwrap_err();
        assert_eq!(err, Error::NoteNotFound("note-404".to_string()));
    }

    #[tokio::test]
    async fn test_sign_in_and_profile() {
        let backend = MemoryBackend::new();
        backend.add_user("admin@example.com", "correct horse", Role::Admin);

        assert!(backend.current_user().await.unwrap().is_none());
        assert!(backend.current_profile().await.unwrap().is_none());

        let err = backend
            .sign_in("admin@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));

        let user = backend
            .sign_in("Admin@Example.com ", "correct horse")
            .await
            .unwrap();
        assert_eq!(user.email, "admin@example.com");

        let profile = backend.current_profile().await.unwrap().unwrap();
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.user_id, user.id);

        backend.sign_out().await.unwrap();
        assert!(backend.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_account_updates_need_a_session() {
        let backend = MemoryBackend::new();
        backend.add_user("c@example.com", "password1", Role::Consultant);

        assert_eq!(
            backend.update_password("password2").await.unwrap_err(),
            Error::NotAuthenticated
        );

        backend.sign_in("c@example.com", "password1").await.unwrap();
        backend.update_password("password2").await.unwrap();
        let user = backend.update_email("new@example.com").await.unwrap();
        assert_eq!(user.email, "new@example.com");

        backend.sign_out().await.unwrap();
        assert!(backend.sign_in("new@example.com", "password1").await.is_err());
        assert!(backend.sign_in("new@example.com", "password2").await.is_ok());
    }

    #[tokio::test]
    async fn test_calculations_newest_first() {
        let backend = MemoryBackend::new();
        let mut older = calculation("calc-old");
        older.created_at = "2024-01-01T00:00:00Z".to_string();
        let mut newer = calculation("calc-new");
        newer.created_at = "2024-06-01T00:00:00Z".to_string();
        backend.insert_calculation(older);
        backend.insert_calculation(newer);

        let listed = backend.list_calculations().await.unwrap();
        assert_eq!(listed[0].id, "calc-new");
        assert_eq!(listed[1].id, "calc-old");

        assert!(backend.get_calculation("calc-old").await.unwrap().is_some());
        assert!(backend.get_calculation("calc-none").await.unwrap().is_none());
    }
}
