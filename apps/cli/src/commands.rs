//! # Script Commands
//!
//! Loading an action script, replaying it through a store, and shaping
//! the result for output.
//!
//! ## Script Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  JSON text ──► load_script ──► Vec<CartAction>                          │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                          replay(store, actions)                         │
//! │                            │               │                            │
//! │                       accepted         rejected                         │
//! │                    (store updates)  (skipped, or abort with --strict)   │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                CartResponse::build(store, report)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopcart_core::{CartAction, CartItem, CartTotals};
use shopcart_store::CartStore;
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::error::CliError;

/// Parses a JSON array of cart actions.
pub fn load_script(json: &str) -> Result<Vec<CartAction>, CliError> {
    let actions: Vec<CartAction> = serde_json::from_str(json)?;
    debug!(actions = actions.len(), "action script loaded");
    Ok(actions)
}

/// An action the store refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAction {
    /// Zero-based position in the script.
    pub index: usize,
    pub message: String,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedAction>,
}

/// Dispatches `actions` in order.
///
/// ## Behavior
/// - `strict = false`: rejected actions are logged, recorded and skipped
/// - `strict = true`: the first rejected action aborts the replay; actions
///   before it stay applied
pub fn replay(
    store: &CartStore,
    actions: Vec<CartAction>,
    strict: bool,
) -> Result<ReplayReport, CliError> {
    let mut report = ReplayReport::default();

    for (index, action) in actions.into_iter().enumerate() {
        match store.dispatch(action) {
            Ok(()) => report.applied += 1,
            Err(source) if strict => return Err(CliError::Rejected { index, source }),
            Err(err) => {
                warn!(index, error = %err, "skipping rejected action");
                report.rejected.push(RejectedAction {
                    index,
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Final cart as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub total_display: String,
    pub revision: u64,
    pub rejected: Vec<RejectedAction>,
}

impl CartResponse {
    pub fn build(store: &CartStore, report: ReplayReport, config: &CliConfig) -> Self {
        let cart = store.snapshot();
        let totals = cart.totals();

        CartResponse {
            items: cart.to_items(),
            total_display: config.format_currency(totals.total),
            totals,
            revision: store.revision(),
            rejected: report.rejected,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, CliError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|err| CliError::Write(err.into()))
    }
}
