//! Test doubles shared by the unit tests in this crate.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::BackendClient;
use crate::error::{Error, Result};
use crate::memory::MemoryBackend;
use crate::models::{Calculation, CalculationKind, Note, Profile, UserInfo};

/// A backend call as observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SignIn { email: String },
    SignOut,
    CurrentUser,
    CurrentProfile,
    UpdateEmail { new_email: String },
    UpdatePassword,
    GetNote { calculation_id: String },
    CreateNote { calculation_id: String, content: String },
    UpdateNote { note_id: String, content: String },
    ListCalculations,
    GetCalculation { id: String },
}

/// Wraps a [`MemoryBackend`], recording every call and optionally failing the next one.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub inner: MemoryBackend,
    calls: Rc<RefCell<Vec<Call>>>,
    fail_next: Rc<RefCell<Option<Error>>>,
    fail_sign_in: Rc<RefCell<Option<Error>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Make the next call fail with `error` without reaching the inner backend.
    pub fn fail_next(&self, error: Error) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    /// Make the next `sign_in` fail with `error`, whatever calls come first.
    pub fn fail_sign_in(&self, error: Error) {
        *self.fail_sign_in.borrow_mut() = Some(error);
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateNote { .. }))
            .count()
    }

    pub fn updates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::UpdateNote { .. }))
            .count()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl BackendClient for RecordingBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo> {
        self.record(Call::SignIn {
            email: email.to_string(),
        })?;
        if let Some(error) = self.fail_sign_in.borrow_mut().take() {
            return Err(error);
        }
        self.inner.sign_in(email, password).await
    }

    async fn sign_out(&self) -> Result<()> {
        self.record(Call::SignOut)?;
        self.inner.sign_out().await
    }

    async fn current_user(&self) -> Result<Option<UserInfo>> {
        self.record(Call::CurrentUser)?;
        self.inner.current_user().await
    }

    async fn current_profile(&self) -> Result<Option<Profile>> {
        self.record(Call::CurrentProfile)?;
        self.inner.current_profile().await
    }

    async fn update_email(&self, new_email: &str) -> Result<UserInfo> {
        self.record(Call::UpdateEmail {
            new_email: new_email.to_string(),
        })?;
        self.inner.update_email(new_email).await
    }

    async fn update_password(&self, new_password: &str) -> Result<()> {
        self.record(Call::UpdatePassword)?;
        self.inner.update_password(new_password).await
    }

    async fn get_note(&self, calculation_id: &str) -> Result<Option<Note>> {
        self.record(Call::GetNote {
            calculation_id: calculation_id.to_string(),
        })?;
        self.inner.get_note(calculation_id).await
    }

    async fn create_note(&self, calculation_id: &str, content: &str) -> Result<Note> {
        self.record(Call::CreateNote {
            calculation_id: calculation_id.to_string(),
            content: content.to_string(),
        })?;
        self.inner.create_note(calculation_id, content).await
    }

    async fn update_note(&self, note_id: &str, content: &str) -> Result<Note> {
        self.record(Call::UpdateNote {
            note_id: note_id.to_string(),
            content: content.to_string(),
        })?;
        self.inner.update_note(note_id, content).await
    }

    async fn list_calculations(&self) -> Result<Vec<Calculation>> {
        self.record(Call::ListCalculations)?;
        self.inner.list_calculations().await
    }

    async fn get_calculation(&self, id: &str) -> Result<Option<Calculation>> {
        self.record(Call::GetCalculation { id: id.to_string() })?;
        self.inner.get_calculation(id).await
    }
}

/// A basic calculation fixture.
pub fn calculation(id: &str) -> Calculation {
    Calculation {
        id: id.to_string(),
        kind: CalculationKind::Basic,
        created_at: "2024-03-01T10:00:00Z".to_string(),
        client_name: "Client".to_string(),
        birth_date: "1988-11-02".to_string(),
        partner_name: None,
        partner_birth_date: None,
        target_date: None,
        results: serde_json::json!({ "life_path": 3 }),
    }
}
