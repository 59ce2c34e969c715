use super::commands::UiCommand;
use crate::constants::{ACCESS_CODE, PATREON_PANEL_ID};

pub const ACCESS_GRANTED_MESSAGE: &str = "Secret Room Unlocked! Look for the hidden portal...";
pub const ACCESS_DENIED_MESSAGE: &str =
    "Invalid access code. Check your Patreon for the correct code.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// First successful unlock.
    Unlocked,
    /// Correct code, room was already open.
    AlreadyUnlocked,
    Rejected,
}

#[inline]
pub fn access_code_matches(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(ACCESS_CODE)
}

/// Tracks which overlays are open and keeps pointer capture consistent:
/// released while any panel is visible, re-requested once all are closed.
#[derive(Debug, Default)]
pub struct PanelController {
    open: Vec<String>,
    captured: bool,
    secret_unlocked: bool,
}

impl PanelController {
    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|p| p == id)
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn open_panels(&self) -> &[String] {
        &self.open
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    pub fn secret_unlocked(&self) -> bool {
        self.secret_unlocked
    }

    /// Record the browser's pointer-lock state.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn show_panel(&mut self, id: &str, out: &mut Vec<UiCommand>) {
        if self.captured {
            out.push(UiCommand::ReleaseCapture);
        }
        if !self.is_open(id) {
            self.open.push(id.to_string());
        }
        log::info!("[panel] show {}", id);
        out.push(UiCommand::show(id));
    }

    pub fn close_panel(&mut self, id: &str, out: &mut Vec<UiCommand>) {
        self.open.retain(|p| p != id);
        log::info!("[panel] close {}", id);
        out.push(UiCommand::hide(id));
        if self.open.is_empty() && !self.captured {
            out.push(UiCommand::RequestCapture);
        }
    }

    /// Check an access code. Success closes the access panel; the caller
    /// adds the secret light on [`AccessOutcome::Unlocked`].
    pub fn submit_access_code(&mut self, input: &str, out: &mut Vec<UiCommand>) -> AccessOutcome {
        if !access_code_matches(input) {
            log::info!("[panel] access code rejected");
            out.push(UiCommand::AccessStatus(ACCESS_DENIED_MESSAGE.to_string()));
            return AccessOutcome::Rejected;
        }
        let outcome = if self.secret_unlocked {
            AccessOutcome::AlreadyUnlocked
        } else {
            self.secret_unlocked = true;
            log::info!("[panel] secret room unlocked");
            AccessOutcome::Unlocked
        };
        out.push(UiCommand::AccessStatus(ACCESS_GRANTED_MESSAGE.to_string()));
        self.close_panel(PATREON_PANEL_ID, out);
        outcome
    }
}
