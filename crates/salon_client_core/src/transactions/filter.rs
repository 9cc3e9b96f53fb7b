//! Filter panel state and the client-side refine pass over a fetched page.

use crate::ids::{AccountId, CategoryId, ClientId};
use crate::models::{Transaction, TransactionType};
use crate::transactions::status::UiStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which date the backend filters and sorts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    #[default]
    Due,
    Availability,
    Competency,
    Payment,
}

impl DateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::Due => "due",
            DateType::Availability => "availability",
            DateType::Competency => "competency",
            DateType::Payment => "payment",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Ephemeral, per-session filter selection. Empty lists mean "any".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilters {
    pub types: Vec<TransactionType>,
    pub statuses: Vec<UiStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client_id: Option<ClientId>,
    pub payment_methods: Vec<String>,
    pub account_ids: Vec<AccountId>,
    pub category_ids: Vec<CategoryId>,
    pub date_type: DateType,
}

impl TransactionFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Local predicate, checked in order and short-circuiting: type, status, payment method,
    /// account, category, then free-text search.
    pub fn matches(&self, txn: &Transaction, search: &str, today: NaiveDate) -> bool {
        if !self.types.is_empty() && !self.types.contains(&txn.type_) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.iter().any(|s| s.matches(txn, today)) {
            return false;
        }
        if !self.payment_methods.is_empty() {
            let ok = txn
                .payment_method
                .as_ref()
                .map(|m| self.payment_methods.iter().any(|p| p == m))
                .unwrap_or(false);
            if !ok {
                return false;
            }
        }
        if !self.account_ids.is_empty() {
            let ok = txn
                .account
                .as_ref()
                .map(|a| self.account_ids.contains(&a.id))
                .unwrap_or(false);
            if !ok {
                return false;
            }
        }
        if !self.category_ids.is_empty() {
            let ok = txn
                .category
                .as_ref()
                .map(|c| self.category_ids.contains(&c.id))
                .unwrap_or(false);
            if !ok {
                return false;
            }
        }
        matches_search(txn, search)
    }
}

/// Case-insensitive substring match on client name, description, category name or the id.
pub fn matches_search(txn: &Transaction, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |s: &str| s.to_lowercase().contains(&needle);
    txn.client.as_ref().map(|c| hit(&c.full_name)).unwrap_or(false)
        || txn.description.as_deref().map(hit).unwrap_or(false)
        || txn.category.as_ref().map(|c| hit(&c.name)).unwrap_or(false)
        || txn.id.to_string().contains(&needle)
}

/// Filter then sort by date. Pure: the output depends only on the arguments, is a subset of
/// `transactions`, and rows with equal dates keep their input order.
pub fn refine(
    transactions: &[Transaction],
    filters: &TransactionFilters,
    search: &str,
    direction: SortDirection,
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filters.matches(t, search, today))
        .cloned()
        .collect();
    // slice::sort_by is stable.
    match direction {
        SortDirection::Asc => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortDirection::Desc => out.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TransactionId;
    use crate::models::{ClientRef, EntityRef, Origin, TransactionStatus};
    use chrono::{Duration, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn date(s: &str) -> NaiveDateTime {
        crate::utils::date::parse_timestamp(s).unwrap()
    }

    fn txn(id: i64, when: &str) -> Transaction {
        Transaction {
            id: TransactionId(id),
            type_: TransactionType::Income,
            value: Decimal::from(100),
            net_value: None,
            fee_percentage: None,
            fee_value: None,
            date: date(when),
            status: TransactionStatus::Planned,
            is_paid: false,
            description: None,
            payment_method: None,
            account: None,
            category: None,
            client: None,
            origin: Origin::Manual,
            origin_id: None,
        }
    }

    fn ids(v: &[Transaction]) -> Vec<i64> {
        v.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let rows = vec![txn(1, "2024-01-01"), txn(2, "2024-01-01"), txn(3, "2024-01-02")];
        let f = TransactionFilters::default();
        assert_eq!(ids(&refine(&rows, &f, "", SortDirection::Asc, today())), vec![1, 2, 3]);
        assert_eq!(ids(&refine(&rows, &f, "", SortDirection::Desc, today())), vec![3, 1, 2]);

        let swapped = vec![txn(2, "2024-01-01"), txn(1, "2024-01-01"), txn(3, "2024-01-02")];
        assert_eq!(ids(&refine(&swapped, &f, "", SortDirection::Asc, today())), vec![2, 1, 3]);
        assert_eq!(ids(&refine(&swapped, &f, "", SortDirection::Desc, today())), vec![3, 2, 1]);
    }

    #[test]
    fn refine_never_adds_rows() {
        let yesterday = (today() - Duration::days(1)).to_string();
        let tomorrow = (today() + Duration::days(1)).to_string();
        let mut rows = vec![txn(1, &yesterday), txn(2, &tomorrow), txn(3, &yesterday)];
        rows[1].status = TransactionStatus::Liquidated;
        rows[2].is_paid = true;
        rows[2].type_ = TransactionType::Expense;

        let filter_sets = vec![
            TransactionFilters::default(),
            TransactionFilters { statuses: vec![UiStatus::Overdue], ..Default::default() },
            TransactionFilters { statuses: vec![UiStatus::Available, UiStatus::Paid], ..Default::default() },
            TransactionFilters { types: vec![TransactionType::Expense], ..Default::default() },
            TransactionFilters { account_ids: vec![AccountId(9)], ..Default::default() },
        ];
        for f in &filter_sets {
            for search in ["", "1", "zzz"] {
                let out = refine(&rows, f, search, SortDirection::Asc, today());
                assert!(out.len() <= rows.len());
                assert!(out.iter().all(|o| rows.contains(o)));
            }
        }
    }

    #[test]
    fn overdue_or_paid_keeps_only_matching_rows() {
        let yesterday = (today() - Duration::days(1)).to_string();
        let tomorrow = (today() + Duration::days(1)).to_string();
        let overdue = txn(1, &yesterday);
        let open = txn(2, &tomorrow);
        let mut paid = txn(3, &tomorrow);
        paid.status = TransactionStatus::Liquidated;
        paid.is_paid = true;
        let mut available = txn(4, &tomorrow);
        available.status = TransactionStatus::Liquidated;

        let f = TransactionFilters {
            statuses: vec![UiStatus::Overdue, UiStatus::Paid],
            ..Default::default()
        };
        let out = refine(&[overdue, open, paid, available], &f, "", SortDirection::Asc, today());
        assert_eq!(ids(&out), vec![1, 3]);
    }

    #[test]
    fn available_excludes_paid_settled_rows() {
        let mut settled_paid = txn(1, "2024-06-01");
        settled_paid.status = TransactionStatus::Liquidated;
        settled_paid.is_paid = true;
        let mut settled = txn(2, "2024-06-01");
        settled.status = TransactionStatus::Liquidated;
        let f = TransactionFilters { statuses: vec![UiStatus::Available], ..Default::default() };
        assert_eq!(ids(&refine(&[settled_paid, settled], &f, "", SortDirection::Asc, today())), vec![2]);
    }

    #[test]
    fn search_covers_client_description_category_and_id() {
        let mut a = txn(101, "2024-06-01");
        a.client = Some(ClientRef { id: ClientId(1), full_name: "Ana Lima".into() });
        let mut b = txn(2, "2024-06-01");
        b.description = Some("Escova progressiva".into());
        let mut c = txn(3, "2024-06-01");
        c.category = Some(EntityRef { id: CategoryId(5), name: "Manicure".into() });
        let rows = vec![a, b, c];
        let f = TransactionFilters::default();

        assert_eq!(ids(&refine(&rows, &f, "ana", SortDirection::Asc, today())), vec![101]);
        assert_eq!(ids(&refine(&rows, &f, "PROGRESSIVA", SortDirection::Asc, today())), vec![2]);
        assert_eq!(ids(&refine(&rows, &f, "manicure", SortDirection::Asc, today())), vec![3]);
        assert_eq!(ids(&refine(&rows, &f, "10", SortDirection::Asc, today())), vec![101]);
    }

    #[test]
    fn payment_account_category_filters_reject_missing_refs() {
        let mut pix = txn(1, "2024-06-01");
        pix.payment_method = Some("pix".into());
        pix.account = Some(EntityRef { id: AccountId(2), name: "Caixa".into() });
        let bare = txn(2, "2024-06-01");
        let rows = vec![pix, bare];

        let by_method = TransactionFilters { payment_methods: vec!["pix".into()], ..Default::default() };
        assert_eq!(ids(&refine(&rows, &by_method, "", SortDirection::Asc, today())), vec![1]);

        let by_account = TransactionFilters { account_ids: vec![AccountId(2)], ..Default::default() };
        assert_eq!(ids(&refine(&rows, &by_account, "", SortDirection::Asc, today())), vec![1]);

        let by_category = TransactionFilters { category_ids: vec![CategoryId(1)], ..Default::default() };
        assert!(refine(&rows, &by_category, "", SortDirection::Asc, today()).is_empty());
    }

    #[test]
    fn clear_restores_defaults() {
        let mut f = TransactionFilters {
            statuses: vec![UiStatus::Paid],
            date_type: DateType::Payment,
            ..Default::default()
        };
        assert!(!f.is_default());
        f.clear();
        assert!(f.is_default());
        assert_eq!(f.date_type, DateType::Due);
    }
}
