// SPDX-License-Identifier: PMPL-1.0-or-later

//! Password gate state machine.
//!
//! Two states and one transition: `Locked -> Unlocked` on the correct
//! secret. There is no way back. The gate is a cosmetic affordance that
//! keeps casual visitors on the overlay; the secret is a shared plaintext
//! constant and nothing here is an access control.

use serde::Serialize;

/// Value persisted under `isUnlocked` once the gate has opened.
pub const UNLOCKED_MARKER: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    #[default]
    Locked,
    Unlocked,
}

/// What a submission did to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// Correct secret while locked.
    Opened,
    /// Wrong secret while locked.
    Rejected,
    /// Gate already open; nothing happens.
    Ignored,
}

impl GateState {
    /// Initial state from the persisted marker. Anything but `"true"` locks.
    pub fn from_persisted(value: Option<&str>) -> Self {
        match value {
            Some(UNLOCKED_MARKER) => GateState::Unlocked,
            _ => GateState::Locked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, GateState::Unlocked)
    }

    /// Feed one submission through the state machine.
    pub fn submit(&mut self, attempt: &str, secret: &str) -> GateTransition {
        match self {
            GateState::Unlocked => GateTransition::Ignored,
            GateState::Locked if attempt == secret => {
                *self = GateState::Unlocked;
                GateTransition::Opened
            }
            GateState::Locked => GateTransition::Rejected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GateState::Locked => "gate.locked",
            GateState::Unlocked => "gate.unlocked",
        }
    }
}
