//! Wizard state for the screen being edited.
//!
//! DESIGN
//! ======
//! Wraps the `wire::Wizard` aggregate with the per-screen concerns the views
//! need: which screen it belongs to, a draft waiting for the user's
//! restore/start-new decision, and save feedback. Editing goes through
//! [`WizardState::edit`] so rule violations land in `error` instead of
//! panicking in view code.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use wire::api::{DraftSaveResponse, GenerateRequest};
use wire::wizard::{Step1Data, WizardError};
use wire::{Wizard, WizardDraft};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WizardState {
    pub wizard: Wizard,
    pub screen_id: Option<i64>,
    /// Draft found on entry, awaiting restore or discard.
    pub pending_draft: Option<WizardDraft>,
    pub saving: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl WizardState {
    /// Start a fresh wizard for `screen_id`, pre-filling the screen name.
    pub fn open_screen(&mut self, screen_id: i64, screen_name: &str) {
        *self = Self { screen_id: Some(screen_id), ..Self::default() };
        self.wizard.update_step1(Step1Data { screen_name: screen_name.to_owned(), description: String::new() });
    }

    /// Keep `draft` for the restore prompt if it carries restorable data.
    pub fn offer_draft(&mut self, draft: WizardDraft) -> bool {
        if draft.restorable().is_none() {
            return false;
        }
        self.pending_draft = Some(draft);
        true
    }

    pub fn restore_draft(&mut self) {
        let Some(draft) = self.pending_draft.take() else {
            return;
        };
        if let Some(data) = draft.wizard_data.filter(|_| draft.has_draft) {
            self.wizard.load(data);
            self.wizard.go_to_step(1);
            self.notice = Some(match draft.saved_at {
                Some(at) => format!("Draft restored (saved {at})"),
                None => "Draft restored".to_owned(),
            });
        }
    }

    pub fn discard_draft(&mut self) {
        self.pending_draft = None;
    }

    /// Mark a save as in flight. Returns `false` without a screen or while a
    /// save is already running.
    pub fn begin_save(&mut self) -> bool {
        if self.saving || self.screen_id.is_none() {
            return false;
        }
        self.saving = true;
        self.error = None;
        true
    }

    pub fn draft_saved(&mut self, response: &DraftSaveResponse) {
        self.saving = false;
        self.notice = Some(format!("Draft saved ({} bytes)", response.data_size));
    }

    pub fn draft_failed(&mut self, error: String) {
        self.saving = false;
        self.error = Some(format!("Draft save failed: {error}"));
    }

    /// Apply an edit, recording a rule violation as the current error.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Wizard) -> Result<T, WizardError>) -> Option<T> {
        match f(&mut self.wizard) {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Generation request for the current aggregate, when it may be sent.
    #[must_use]
    pub fn generate_request(&self, menu_name: &str) -> Option<GenerateRequest> {
        let screen_id = self.screen_id?;
        if !self.wizard.can_generate() {
            return None;
        }
        let data = self.wizard.data();
        Some(GenerateRequest {
            screen_id,
            prompt: None,
            wizard_data: Some(data.clone()),
            menu_name: menu_name.to_owned(),
            screen_name: data.step1.screen_name.trim().to_owned(),
        })
    }
}
