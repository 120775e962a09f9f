use crate::error::FetchError;
use crate::models::{PageEnvelope, Recipe};
use crate::query::{FilterKey, Filters, PageSize, SearchRequest};

/// A fetch the caller must run and report back through [`ViewState::complete`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: SearchRequest,
}

/// What the table body shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableBody<'a> {
    Loading,
    /// An envelope exists but holds nothing
    NoResults,
    /// No fetch has succeeded yet
    NoData,
    Rows(&'a [Recipe]),
}

/// State behind the recipe table.
///
/// Every change to filters, page or page size hands out a [`FetchTicket`]
/// tagged with a new generation. Only the completion carrying the latest
/// generation is applied; older ones are dropped whatever order they arrive in.
#[derive(Debug, Clone)]
pub struct ViewState {
    filters: Filters,
    page: u32,
    page_size: PageSize,
    envelope: Option<PageEnvelope>,
    loading: bool,
    error: Option<String>,
    selected: Option<Recipe>,
    generation: u64,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        ViewState {
            filters: Filters::default(),
            page: 1,
            page_size,
            envelope: None,
            loading: false,
            error: None,
            selected: None,
            generation: 0,
        }
    }

    /// Fetch for the current filters and page, used on startup
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn set_filter(&mut self, key: FilterKey, value: impl Into<String>) -> Option<FetchTicket> {
        let value = value.into();
        if self.filters.get(key) == value && self.page == 1 {
            return None;
        }

        self.filters.set(key, value);
        self.page = 1;
        Some(self.issue())
    }

    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        if self.filters.is_empty() && self.page == 1 {
            return None;
        }

        self.filters.clear();
        self.page = 1;
        Some(self.issue())
    }

    pub fn set_page_size(&mut self, size: PageSize) -> Option<FetchTicket> {
        if self.page_size == size && self.page == 1 {
            return None;
        }

        self.page_size = size;
        self.page = 1;
        Some(self.issue())
    }

    /// Jump to a page. Bounds are the caller's business, see [`ViewState::has_next`].
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket> {
        let page = page.max(1);
        if self.page == page {
            return None;
        }

        self.page = page;
        Some(self.issue())
    }

    pub fn select(&mut self, recipe: Option<Recipe>) {
        self.selected = recipe;
    }

    /// Select a snapshot of the n-th (0-based) row of the current page
    pub fn select_row(&mut self, index: usize) -> Option<&Recipe> {
        let recipe = self.envelope.as_ref()?.content.get(index)?.clone();
        self.selected = Some(recipe);
        self.selected.as_ref()
    }

    /// Apply the outcome of a fetch. Returns false when the fetch was superseded.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<PageEnvelope, FetchError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }

        match result {
            Ok(envelope) => self.envelope = Some(envelope),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
        true
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        FetchTicket {
            generation: self.generation,
            request: self.request(),
        }
    }

    pub fn request(&self) -> SearchRequest {
        SearchRequest::new(self.filters.clone(), self.page, self.page_size)
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn envelope(&self) -> Option<&PageEnvelope> {
        self.envelope.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    /// Generation of the most recently issued fetch
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_elements(&self) -> u64 {
        self.envelope.as_ref().map(|e| e.total_elements).unwrap_or(0)
    }

    /// Computed from the local page size, never taken from the server
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_elements(), self.page_size.get())
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn table_body(&self) -> TableBody<'_> {
        if self.loading {
            return TableBody::Loading;
        }

        match &self.envelope {
            None => TableBody::NoData,
            Some(envelope) if envelope.content.is_empty() || envelope.total_elements == 0 => {
                TableBody::NoResults
            }
            Some(envelope) => TableBody::Rows(&envelope.content),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(PageSize::default())
    }
}

/// `max(1, ceil(total_elements / page_size))`
pub fn total_pages(total_elements: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    total_elements.div_ceil(page_size).max(1)
}
