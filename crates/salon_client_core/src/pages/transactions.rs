//! Transactions screen: server page + totals fetched together, then refined locally.
//!
//! Every fetch takes a ticket from a [`FetchGeneration`]. Filter changes invalidate outstanding
//! tickets, so a slow response for an old filter can never overwrite a newer one.

use crate::error::{Action, ApiError};
use crate::ids::TransactionId;
use crate::models::{Transaction, TransactionPayload, TransactionTotals};
use crate::pages::fetch::FetchGeneration;
use crate::pages::notice::{LoadState, Notice, ReloadOutcome};
use crate::services::FinancialService;
use crate::transactions::{
    refine, DisplayStatus, Pagination, SortDirection, TransactionFilters, PAGE_LIMIT,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One rendered row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub display_status: DisplayStatus,
    pub origin_link: Option<String>,
}

#[derive(Debug)]
struct PageState {
    filters: TransactionFilters,
    search: String,
    direction: SortDirection,
    pagination: Pagination,
    rows: LoadState<Vec<Transaction>>,
    totals: Option<TransactionTotals>,
}

pub struct TransactionsPage {
    financial: FinancialService,
    generation: FetchGeneration,
    state: Mutex<PageState>,
}

impl TransactionsPage {
    pub fn new(financial: FinancialService) -> Self {
        Self {
            financial,
            generation: FetchGeneration::new(),
            state: Mutex::new(PageState {
                filters: TransactionFilters::default(),
                search: String::new(),
                direction: SortDirection::default(),
                pagination: Pagination::new(PAGE_LIMIT),
                rows: LoadState::Idle,
                totals: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn filters(&self) -> TransactionFilters {
        self.lock().filters.clone()
    }

    pub fn search(&self) -> String {
        self.lock().search.clone()
    }

    pub fn direction(&self) -> SortDirection {
        self.lock().direction
    }

    pub fn pagination(&self) -> Pagination {
        self.lock().pagination.clone()
    }

    pub fn totals(&self) -> Option<TransactionTotals> {
        self.lock().totals.clone()
    }

    pub fn load_state(&self) -> LoadState<Vec<Transaction>> {
        self.lock().rows.clone()
    }

    /// Fetch the current page and the totals for the same filters, concurrently.
    /// Returns `Superseded` when a newer fetch or a filter change happened meanwhile; the
    /// state is left untouched in that case. If the total shrank below the current page, the
    /// pager moves back to the last page and that page is fetched instead.
    pub async fn reload(&self) -> Result<ReloadOutcome, ApiError> {
        loop {
            let (filters, pagination, ticket) = {
                let mut st = self.lock();
                st.rows = LoadState::Loading;
                (st.filters.clone(), st.pagination.clone(), self.generation.begin())
            };
            log::debug!(
                "[salon_core] loading transactions page {} ({:?})",
                pagination.page(),
                ticket
            );

            let (list, totals) = tokio::join!(
                self.financial.list_transactions(&filters, &pagination),
                self.financial.totals(&filters)
            );

            let mut st = self.lock();
            if !self.generation.is_current(ticket) {
                log::debug!("[salon_core] dropping superseded transactions response {:?}", ticket);
                return Ok(ReloadOutcome::Superseded);
            }
            match totals {
                Ok(t) => st.totals = Some(t),
                Err(e) => {
                    log::warn!("[salon_core] totals failed: {}", e);
                    st.totals = None;
                }
            }
            match list {
                Ok(page) => {
                    if st.pagination.record_page(page.items.len(), page.total) {
                        log::debug!(
                            "[salon_core] page out of range, moving to page {}",
                            st.pagination.page()
                        );
                        continue;
                    }
                    st.rows = if page.items.is_empty() {
                        LoadState::Empty
                    } else {
                        LoadState::Loaded(page.items)
                    };
                    return Ok(ReloadOutcome::Applied);
                }
                Err(e) => {
                    log::warn!("[salon_core] transactions failed: {}", e);
                    st.rows = LoadState::Failed {
                        message: e.user_message(Action::Load),
                    };
                    return Err(e);
                }
            }
        }
    }

    pub fn set_filters(&self, filters: TransactionFilters) {
        let mut st = self.lock();
        st.filters = filters;
        st.pagination.reset();
        self.generation.invalidate();
    }

    pub fn clear_filters(&self) {
        self.set_filters(TransactionFilters::default());
    }

    /// Refines the loaded page only; the pager and in-flight fetches are left alone.
    pub fn set_search(&self, search: impl Into<String>) {
        self.lock().search = search.into();
    }

    pub fn toggle_sort(&self) -> SortDirection {
        let mut st = self.lock();
        st.direction = st.direction.toggled();
        st.direction
    }

    /// Out-of-range pages are ignored and return false; otherwise the caller should reload.
    pub fn go_to_page(&self, page: u32) -> bool {
        let mut st = self.lock();
        let moved = st.pagination.go_to(page);
        if moved {
            self.generation.invalidate();
        }
        moved
    }

    pub fn visible(&self) -> Vec<TransactionRow> {
        self.visible_on(chrono::Local::now().date_naive())
    }

    /// The loaded page refined by filters and search, sorted by date.
    pub fn visible_on(&self, today: NaiveDate) -> Vec<TransactionRow> {
        let st = self.lock();
        let rows = match &st.rows {
            LoadState::Loaded(rows) => rows,
            _ => return Vec::new(),
        };
        refine(rows, &st.filters, &st.search, st.direction, today)
            .into_iter()
            .map(|t| TransactionRow {
                display_status: t.display_status(today),
                origin_link: t.origin_link(),
                transaction: t,
            })
            .collect()
    }

    async fn after_mutation<T>(&self, result: Result<T, ApiError>, action: Action, success: &str) -> Notice {
        let notice = Notice::from_result(&result, action, success);
        if result.is_ok() {
            if let Err(e) = self.reload().await {
                log::warn!("[salon_core] reload after mutation failed: {}", e);
            }
        }
        notice
    }

    pub async fn create(&self, payload: &TransactionPayload) -> Notice {
        let r = self.financial.create_transaction(payload).await;
        self.after_mutation(r, Action::Save, "Transação criada").await
    }

    pub async fn update(&self, id: TransactionId, payload: &TransactionPayload) -> Notice {
        let r = self.financial.update_transaction(id, payload).await;
        self.after_mutation(r, Action::Save, "Transação atualizada").await
    }

    pub async fn delete(&self, id: TransactionId) -> Notice {
        let r = self.financial.delete_transaction(id).await;
        self.after_mutation(r, Action::Delete, "Transação excluída").await
    }

    pub async fn toggle_paid(&self, id: TransactionId) -> Notice {
        let r = self.financial.toggle_paid(id).await;
        self.after_mutation(r, Action::Save, "Status de pagamento atualizado").await
    }
}
