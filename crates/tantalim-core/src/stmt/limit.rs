/// `LIMIT n [OFFSET m]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: Option<u64>,
}

impl Limit {
    /// Limit for a 1-based page. Pages at or below 1 have no offset.
    pub fn page(limit: u64, page_number: Option<u64>) -> Self {
        let offset = match page_number {
            Some(page) if page > 1 => Some(limit.saturating_mul(page - 1)),
            _ => None,
        };

        Self { limit, offset }
    }
}
