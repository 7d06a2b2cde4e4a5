//! Pagination utilities shared by the service and server layers.

use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64` (0-based page index, page size)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 500);
        ((page - 1) as u64, per_page as u64)
    }

    /// Offset of the first item on this page.
    pub fn offset(self) -> usize {
        let (idx, per) = self.normalize();
        (idx * per) as usize
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 100 } }
}

/// Raw `?page=&per_page=` query. Absent parameters mean "no paging".
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// `None` when neither parameter was supplied; otherwise missing fields
    /// take the `Pagination` defaults.
    pub fn pagination(self) -> Option<Pagination> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let d = Pagination::default();
        Some(Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) })
    }
}
