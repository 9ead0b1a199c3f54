use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ordering requested by a caller. The attribute name is resolved to a
/// column by each repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub attribute: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Build a sort from loose query parameters.
    ///
    /// No attribute means unsorted. Only `desc` (any case) sorts descending,
    /// every other direction value sorts ascending.
    pub fn from_params(attribute: Option<&str>, direction: Option<&str>) -> Option<Self> {
        let attribute = attribute.map(str::trim).filter(|a| !a.is_empty())?;
        match direction {
            Some(d) if d.eq_ignore_ascii_case("desc") => Some(Self::desc(attribute)),
            _ => Some(Self::asc(attribute)),
        }
    }
}

/// Page request (1-based page number)
///
/// Only built through [`PageRequest::new`], so `page >= 1` and
/// `1 <= size <= MAX_PAGE_SIZE` always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Clamps `page` to >= 1 and `size` to 1..=100.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
        }
    }

    pub fn from_params(page: Option<u32>, size: Option<u32>) -> Self {
        Self::new(page.unwrap_or(1), size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    pub fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// A bounded slice of a larger result set plus paging metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let total_pages = total.div_ceil(u64::from(request.size())) as u32;
        Self {
            items,
            total,
            page: request.page(),
            size: request.size(),
            total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
        }
    }
}
