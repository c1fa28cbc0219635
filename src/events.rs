use std::collections::VecDeque;

use serde::Serialize;

use crate::config::GrowthStrategy;
use crate::error::OracleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum OracleEvent {
    Sieved { bound: i64, strategy: GrowthStrategy },
    Grown {
        from: i64,
        to: i64,
        query: Option<i64>,
        strategy: GrowthStrategy,
    },
    /// `attempts` counts back-to-back failures for the same target.
    GrowthFailed {
        requested: i64,
        reason: String,
        attempts: usize,
    },
}

pub fn render_json(events: &VecDeque<OracleEvent>) -> Result<String, OracleError> {
    serde_json::to_string_pretty(events).map_err(|e| OracleError::Render(e.to_string()))
}

pub fn render_lines<'a>(events: impl IntoIterator<Item = &'a OracleEvent>) -> String {
    let mut out = String::new();
    for ev in events {
        match ev {
            OracleEvent::Sieved { bound, strategy } => {
                out.push_str(&format!("sieve 1..={} ({:?})\n", bound, strategy));
            }
            OracleEvent::Grown { from, to, query: Some(n), strategy } => {
                out.push_str(&format!("grow {} -> {} for {} ({:?})\n", from, to, n, strategy));
            }
            OracleEvent::Grown { from, to, query: None, strategy } => {
                out.push_str(&format!("grow {} -> {} ({:?})\n", from, to, strategy));
            }
            OracleEvent::GrowthFailed { requested, reason, attempts: 1 } => {
                out.push_str(&format!("! grow to {} failed: {}\n", requested, reason));
            }
            OracleEvent::GrowthFailed { requested, reason, attempts } => {
                out.push_str(&format!("! grow to {} failed: {} (x{})\n", requested, reason, attempts));
            }
        }
    }
    out
}
