//! Entry/exit alert transitions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cdlradar_core::domain::ActionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Entry,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: String,
    pub kind: AlertKind,
    pub at: DateTime<Utc>,
}

/// Remembers the last action per symbol and fires on edges only.
#[derive(Debug, Clone, Default)]
pub struct AlertTracker {
    last_action: HashMap<String, ActionType>,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` for `symbol`. Returns an alert when the action just
    /// became `EnterNow` or `Exit`.
    pub fn observe(&mut self, symbol: &str, action: ActionType, at: DateTime<Utc>) -> Option<Alert> {
        let previous = self.last_action.insert(symbol.to_string(), action);
        if previous == Some(action) {
            return None;
        }
        let kind = match action {
            ActionType::EnterNow => AlertKind::Entry,
            ActionType::Exit => AlertKind::Exit,
            _ => return None,
        };
        Some(Alert {
            symbol: symbol.to_string(),
            kind,
            at,
        })
    }
}
