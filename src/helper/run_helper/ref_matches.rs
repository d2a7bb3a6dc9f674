use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::config::ReferenceDescriptor;
use crate::helper::run_helper::{MATCH_TOTAL_KEY, RefMatchTable};

/// Share of a sample's reads matching one reference of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefIdentity {
    Percent(f64),
    /// The sample has no reads matched to this reference.
    NoData,
    /// The table cannot produce a percentage: missing or zero total, or a
    /// count that is not a non-negative integer.
    InsufficientData,
}

impl Display for RefIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefIdentity::Percent(p) => write!(f, "{:.2}%", p),
            RefIdentity::NoData => write!(f, "-"),
            RefIdentity::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIdentity {
    pub reference: String,
    pub identity: RefIdentity,
}

pub fn percent_identity(matches: &RefMatchTable, reference: &str) -> RefIdentity {
    // a null entry is an unmatched reference, not a malformed one
    let Some(raw_count) = matches.get(reference).filter(|c| !c.is_null()) else {
        return RefIdentity::NoData;
    };

    let count = raw_count.parse();
    let total = matches.get(MATCH_TOTAL_KEY).and_then(|t| t.parse());

    match (count, total) {
        (Some(count), Some(total)) if total > 0 && count <= total => {
            RefIdentity::Percent(100.0 * count as f64 / total as f64)
        }
        _ => RefIdentity::InsufficientData,
    }
}

/// Scores every reference of the panel in panel order, whether or not the
/// sample matched it.
pub fn score_panel(
    matches: &RefMatchTable,
    panel: &[ReferenceDescriptor],
) -> Vec<ReferenceIdentity> {
    panel
        .iter()
        .map(|r| ReferenceIdentity {
            reference: r.name.clone(),
            identity: percent_identity(matches, &r.name),
        })
        .collect()
}
