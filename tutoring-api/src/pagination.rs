//! Offset/limit pagination for list endpoints
//!
//! Lists are ordered by id (insertion order). An offset at or beyond the
//! row count yields an empty page, never an error.

use serde::Deserialize;
use tutoring_common::{Error, Result};

/// Page size used when the caller gives no `limit`
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated offset/limit pair, ready for SQL `LIMIT ? OFFSET ?`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Validate raw query values
    ///
    /// # Examples
    /// ```
    /// use tutoring_api::pagination::Page;
    ///
    /// let p = Page::new(Some(20), Some(5)).unwrap();
    /// assert_eq!((p.offset, p.limit), (20, 5));
    ///
    /// // Absent values fall back to offset 0, limit 10
    /// let p = Page::new(None, None).unwrap();
    /// assert_eq!((p.offset, p.limit), (0, 10));
    ///
    /// assert!(Page::new(Some(-1), None).is_err());
    /// assert!(Page::new(None, Some(0)).is_err());
    ///
    /// // No upper bound: a large limit returns every remaining row
    /// assert!(Page::new(None, Some(5000)).is_ok());
    /// ```
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let offset = offset.unwrap_or(0);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if offset < 0 {
            return Err(Error::invalid("skip", format!("must be >= 0 (got {})", offset)));
        }
        if limit < 1 {
            return Err(Error::invalid("limit", format!("must be >= 1 (got {})", limit)));
        }

        Ok(Self { offset, limit })
    }
}

/// Query parameters shared by every list endpoint
///
/// `skip` is the historical parameter name; `offset` is accepted as well.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(alias = "offset")]
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page> {
        Page::new(self.skip, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(Page::new(None, None).unwrap(), Page::default());
    }

    #[test]
    fn test_page_limit_bounds() {
        assert!(Page::new(None, Some(1)).is_ok());
        assert!(Page::new(None, Some(5000)).is_ok());
        assert!(Page::new(None, Some(i64::MAX)).is_ok());
        assert!(Page::new(None, Some(0)).is_err());
        assert!(Page::new(None, Some(-3)).is_err());
    }

    #[test]
    fn test_large_offset_accepted() {
        // Past-the-end offsets are a valid request; the store returns an empty page
        let p = Page::new(Some(1_000_000), Some(10)).unwrap();
        assert_eq!(p.offset, 1_000_000);
    }

    #[test]
    fn test_negative_offset_names_skip() {
        match Page::new(Some(-1), None) {
            Err(Error::InvalidInput { field, .. }) => assert_eq!(field, "skip"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
