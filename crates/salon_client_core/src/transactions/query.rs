//! Query string for `/financial/transactions` and its totals endpoint. Both go through
//! `filter_params` so the list and the totals always describe the same selection.

use crate::client::Query;
use crate::transactions::filter::TransactionFilters;
use crate::transactions::pagination::Pagination;
use crate::transactions::status::map_status_filter;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn filter_params(filters: &TransactionFilters) -> Query {
    let mut q: Query = Vec::new();
    for t in &filters.types {
        q.push(("type[]".to_string(), t.as_str().to_string()));
    }
    let status = map_status_filter(&filters.statuses);
    for s in &status.status {
        q.push(("status[]".to_string(), s.as_str().to_string()));
    }
    if let Some(paid) = status.server_is_paid() {
        q.push(("is_paid".to_string(), paid.to_string()));
    }
    if let Some(d) = filters.start_date {
        q.push(("start_date".to_string(), d.format(DATE_FORMAT).to_string()));
    }
    if let Some(d) = filters.end_date {
        q.push(("end_date".to_string(), d.format(DATE_FORMAT).to_string()));
    }
    if let Some(c) = filters.client_id {
        q.push(("client_id".to_string(), c.to_string()));
    }
    for m in &filters.payment_methods {
        q.push(("payment_method[]".to_string(), m.clone()));
    }
    for a in &filters.account_ids {
        q.push(("account_id[]".to_string(), a.to_string()));
    }
    for c in &filters.category_ids {
        q.push(("category_id[]".to_string(), c.to_string()));
    }
    q.push(("date_type".to_string(), filters.date_type.as_str().to_string()));
    q
}

pub fn list_params(filters: &TransactionFilters, pagination: &Pagination) -> Query {
    let mut q = vec![
        ("skip".to_string(), pagination.skip().to_string()),
        ("limit".to_string(), pagination.limit().to_string()),
    ];
    q.extend(filter_params(filters));
    q
}
