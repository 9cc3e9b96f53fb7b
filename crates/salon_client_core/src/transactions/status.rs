//! Display status of a transaction and the mapping from the UI's status vocabulary to the
//! backend's `status` / `is_paid` query fields.

use crate::models::{Transaction, TransactionStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Badge shown on a row. Computed at render time and never sent back to the server, so it only
/// serializes (for UI bindings) and has no `Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Blocked,
    Paid,
    Overdue,
    Available,
    Open,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Blocked => "Blocked",
            DisplayStatus::Paid => "Paid",
            DisplayStatus::Overdue => "Overdue",
            DisplayStatus::Available => "Available",
            DisplayStatus::Open => "Open",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// True when `date` falls before the start of `today`.
pub fn is_before_today(date: NaiveDateTime, today: NaiveDate) -> bool {
    date.date() < today
}

/// Order matters: blocked beats paid, paid beats overdue, overdue beats liquidated.
pub fn display_status(
    status: TransactionStatus,
    is_paid: bool,
    date: NaiveDateTime,
    today: NaiveDate,
) -> DisplayStatus {
    if status == TransactionStatus::Blocked {
        DisplayStatus::Blocked
    } else if is_paid {
        DisplayStatus::Paid
    } else if status == TransactionStatus::Planned && is_before_today(date, today) {
        DisplayStatus::Overdue
    } else if status == TransactionStatus::Liquidated {
        DisplayStatus::Available
    } else {
        DisplayStatus::Open
    }
}

impl Transaction {
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        display_status(self.status, self.is_paid, self.date, today)
    }
}

/// Status tokens offered by the filter panel. A superset of the backend's lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiStatus {
    Blocked,
    Available,
    Open,
    Overdue,
    Paid,
}

impl UiStatus {
    pub const ALL: [UiStatus; 5] = [
        UiStatus::Blocked,
        UiStatus::Available,
        UiStatus::Open,
        UiStatus::Overdue,
        UiStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiStatus::Blocked => "blocked",
            UiStatus::Available => "available",
            UiStatus::Open => "open",
            UiStatus::Overdue => "overdue",
            UiStatus::Paid => "paid",
        }
    }

    /// Fine-grained predicate applied to fetched rows. `available` means settled and not yet
    /// confirmed as paid, the same reading the server query uses when `available` is selected
    /// without `paid`.
    pub fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        match self {
            UiStatus::Blocked => txn.status == TransactionStatus::Blocked,
            UiStatus::Paid => txn.is_paid,
            UiStatus::Overdue => {
                txn.status == TransactionStatus::Planned && is_before_today(txn.date, today)
            }
            UiStatus::Open => {
                txn.status == TransactionStatus::Planned && !is_before_today(txn.date, today)
            }
            UiStatus::Available => txn.status == TransactionStatus::Liquidated && !txn.is_paid,
        }
    }
}

impl FromStr for UiStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiStatus::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status filter {:?}", s))
    }
}

/// Backend-side status filter. An empty `status` set with no `is_paid` means "no filtering".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusQuery {
    pub status: BTreeSet<TransactionStatus>,
    pub is_paid: Option<bool>,
}

impl StatusQuery {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.is_paid.is_none()
    }

    /// `is_paid` as sent to the backend: only when every requested status is `liquidated`.
    /// The backend applies it to all rows, so mixed selections leave the split to the local refine.
    pub fn server_is_paid(&self) -> Option<bool> {
        let only_liquidated =
            self.status.len() == 1 && self.status.contains(&TransactionStatus::Liquidated);
        if only_liquidated {
            self.is_paid
        } else {
            None
        }
    }
}

/// Union of each token's contribution; order and duplicates are irrelevant.
pub fn map_status_filter(tokens: &[UiStatus]) -> StatusQuery {
    let selected: BTreeSet<UiStatus> = tokens.iter().copied().collect();
    let mut status = BTreeSet::new();
    for token in &selected {
        match token {
            UiStatus::Blocked => {
                status.insert(TransactionStatus::Blocked);
            }
            UiStatus::Open | UiStatus::Overdue => {
                status.insert(TransactionStatus::Planned);
            }
            UiStatus::Available | UiStatus::Paid => {
                status.insert(TransactionStatus::Liquidated);
            }
        }
    }
    let paid = selected.contains(&UiStatus::Paid);
    let available = selected.contains(&UiStatus::Available);
    let is_paid = match (paid, available) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    };
    StatusQuery { status, is_paid }
}
