//! 1-indexed page cursor with a fixed page size.

pub const PAGE_LIMIT: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_LIMIT)
    }
}

impl Pagination {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Move to page `n` if `1 <= n <= page_count()`; anything else is ignored.
    pub fn go_to(&mut self, n: u32) -> bool {
        if n == 0 || n > self.page_count() {
            return false;
        }
        self.page = n;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Back to page 1, e.g. after a filter change. The known total is kept until the next fetch.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Record the outcome of fetching the current page. A server-reported count wins. Without
    /// one the total is a lower bound: everything up to this page, plus one more row when the
    /// page came back full so the next page stays reachable.
    ///
    /// When the total no longer reaches the current page (rows deleted meanwhile) the page is
    /// moved back to the last one that exists. Returns true in that case; the rows just fetched
    /// belong to the old page and should be fetched again.
    pub fn record_page(&mut self, rows: usize, reported_total: Option<u64>) -> bool {
        self.total = match reported_total {
            Some(t) => t,
            None => {
                let seen = self.skip() + rows as u64;
                if rows as u64 >= u64::from(self.limit) {
                    seen + 1
                } else {
                    seen
                }
            }
        };
        let last = self.page_count().max(1);
        if self.page > last {
            self.page = last;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_follows_page() {
        let mut p = Pagination::default();
        p.record_page(20, Some(95));
        assert_eq!(p.skip(), 0);
        assert!(p.go_to(3));
        assert_eq!(p.skip(), 40);
        assert_eq!(p.page_count(), 5);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut p = Pagination::default();
        p.record_page(20, Some(45));
        assert!(!p.go_to(0));
        assert_eq!(p.page(), 1);
        assert!(!p.go_to(4));
        assert_eq!(p.page(), 1);
        assert!(p.go_to(3));
        assert!(!p.next());
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn nothing_is_reachable_without_rows() {
        let mut p = Pagination::default();
        p.record_page(0, None);
        assert_eq!(p.page_count(), 0);
        assert!(!p.go_to(1));
        assert!(!p.prev());
    }

    #[test]
    fn full_page_without_count_keeps_next_page_reachable() {
        let mut p = Pagination::default();
        p.record_page(20, None);
        assert_eq!(p.total(), 21);
        assert!(p.next());
        p.record_page(7, None);
        assert_eq!(p.total(), 27);
        assert_eq!(p.page_count(), 2);
        assert!(!p.next());
    }

    #[test]
    fn shrinking_total_moves_back_to_last_page() {
        let mut p = Pagination::default();
        p.record_page(20, Some(41));
        assert!(p.go_to(3));
        assert!(p.record_page(0, Some(40)));
        assert_eq!(p.page(), 2);
        assert_eq!(p.page_count(), 2);

        assert!(p.go_to(2));
        assert!(p.record_page(0, None), "empty page without count pins total to skip");
        assert_eq!(p.page(), 1);

        assert!(!p.record_page(0, Some(0)));
        assert_eq!(p.page(), 1);
        assert!(!p.record_page(20, Some(95)));
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut p = Pagination::default();
        p.record_page(20, Some(100));
        p.go_to(4);
        p.reset();
        assert_eq!(p.page(), 1);
    }
}
