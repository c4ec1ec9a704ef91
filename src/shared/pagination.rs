use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 50;
/// Highest page whose offset still fits a Postgres `BIGINT` at any page size.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Clamps page to 1..=MAX_PAGE and per_page to 1..=MAX_PER_PAGE.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn first(per_page: u64) -> Self {
        Self::new(1, per_page)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Query string shape shared by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageParams {
    pub fn to_request(&self, default_per_page: u64) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(default_per_page),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            per_page: request.per_page,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_bounds() {
        let req = PageRequest::new(0, 500);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, MAX_PER_PAGE);

        let req = PageRequest::new(3, 0);
        assert_eq!(req.per_page, 1);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_huge_page_is_capped_and_offset_does_not_overflow() {
        let req = PageParams {
            page: Some(u64::MAX),
            per_page: Some(MAX_PER_PAGE),
        }
        .to_request(DEFAULT_PER_PAGE);

        assert_eq!(req.page, MAX_PAGE);
        assert!(req.offset() <= i64::MAX as u64);
        assert_eq!(req.offset(), (MAX_PAGE - 1) * MAX_PER_PAGE);
    }

    #[test]
    fn test_offset_saturates_on_hand_built_request() {
        let req = PageRequest {
            page: u64::MAX,
            per_page: u64::MAX,
        };
        assert_eq!(req.offset(), u64::MAX);
    }

    #[test]
    fn test_page_params_fall_back_to_defaults() {
        let params = PageParams::default();
        assert_eq!(params.to_request(20), PageRequest::new(1, 20));

        let params = PageParams {
            page: Some(2),
            per_page: None,
        };
        assert_eq!(params.to_request(20), PageRequest::new(2, 20));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<i32> = Page {
            items: vec![],
            page: 1,
            per_page: 20,
            total: 41,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
