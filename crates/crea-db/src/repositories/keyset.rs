//! Keyset pagination over Snowflake ids
//!
//! Rows are always filtered with `($n IS NULL OR id < $n) AND ($m IS NULL OR id > $m)`.
//! The scan runs toward the cursor so the page sits next to it; rows are
//! flipped back into presentation order afterwards.

use crea_core::traits::PageQuery;

use super::error::page_limit;

#[derive(Debug, Clone, Copy)]
pub struct Keyset {
    pub before: Option<i64>,
    pub after: Option<i64>,
    pub limit: i64,
    scan_ascending: bool,
    present_ascending: bool,
}

impl Keyset {
    /// Newest first; an `after`-only cursor scans upward from it.
    pub fn newest_first(page: PageQuery) -> Self {
        Self::new(page, false)
    }

    /// Oldest first; a `before`-only cursor scans downward from it.
    pub fn oldest_first(page: PageQuery) -> Self {
        Self::new(page, true)
    }

    fn new(page: PageQuery, present_ascending: bool) -> Self {
        let scan_ascending = match (page.before, page.after) {
            (None, Some(_)) => true,
            (Some(_), None) => false,
            _ => present_ascending,
        };
        Self {
            before: page.before.map(crea_core::Snowflake::into_inner),
            after: page.after.map(crea_core::Snowflake::into_inner),
            limit: page_limit(page.limit),
            scan_ascending,
            present_ascending,
        }
    }

    /// `ASC` or `DESC` for the `ORDER BY id` clause
    pub fn order(&self) -> &'static str {
        if self.scan_ascending {
            "ASC"
        } else {
            "DESC"
        }
    }

    pub fn finish<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if self.scan_ascending != self.present_ascending {
            rows.reverse();
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::Snowflake;

    fn page(before: Option<i64>, after: Option<i64>) -> PageQuery {
        PageQuery {
            before: before.map(Snowflake::new),
            after: after.map(Snowflake::new),
            limit: 10,
        }
    }

    #[test]
    fn test_newest_first_scans() {
        assert_eq!(Keyset::newest_first(page(None, None)).order(), "DESC");
        assert_eq!(Keyset::newest_first(page(Some(5), None)).order(), "DESC");

        let after = Keyset::newest_first(page(None, Some(5)));
        assert_eq!(after.order(), "ASC");
        assert_eq!(after.finish(vec![6, 7, 8]), vec![8, 7, 6]);
    }

    #[test]
    fn test_oldest_first_scans() {
        let ks = Keyset::oldest_first(page(None, Some(3)));
        assert_eq!(ks.order(), "ASC");
        assert_eq!(ks.finish(vec![4, 5]), vec![4, 5]);

        let back = Keyset::oldest_first(page(Some(9), None));
        assert_eq!(back.order(), "DESC");
        assert_eq!(back.finish(vec![8, 7]), vec![7, 8]);
    }
}
