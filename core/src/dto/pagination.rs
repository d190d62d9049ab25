use serde::{Deserialize, Serialize};

/// Paged list envelope as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    #[serde(default)]
    pub next_page: Option<u32>,
    pub last_page: u32,
    pub total: u64,
}

/// One page of items plus the metadata needed to fetch the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub last_page: u32,
    pub total: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

impl<T> RawPage<T> {
    /// Convert every item, keeping order, and carry the metadata over. Stops
    /// at the first item that fails.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PaginatedResponse<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PaginatedResponse {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            current_page: self.current_page,
            next_page: self.next_page,
            last_page: self.last_page,
            total: self.total,
        })
    }
}
