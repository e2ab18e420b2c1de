//! Account query engine
//!
//! Produces the filtered, searched and paginated dashboard listing:
//!
//! 1. Filter by service type (`All`, or an exact, case-sensitive type name)
//! 2. Search: case-insensitive substring of the name, or substring of the
//!    decimal account id
//! 3. Paginate: 1-based pages of `page_size` items
//!
//! Results keep the store's registration order. Every function here is pure;
//! the mutable view state lives in [`DashboardView`].

use crate::types::{Account, BillingError, ServiceType};
use std::fmt;
use std::str::FromStr;

/// Default number of accounts per dashboard page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Service type filter for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Only(ServiceType),
}

impl ServiceFilter {
    pub fn matches(&self, account: &Account) -> bool {
        match self {
            ServiceFilter::All => true,
            ServiceFilter::Only(service) => account.service_type == *service,
        }
    }
}

impl FromStr for ServiceFilter {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(ServiceFilter::All)
        } else {
            s.parse().map(ServiceFilter::Only)
        }
    }
}

impl fmt::Display for ServiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFilter::All => f.write_str("All"),
            ServiceFilter::Only(service) => service.fmt(f),
        }
    }
}

/// Query parameters for one dashboard listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountQuery {
    pub filter: ServiceFilter,

    /// Search term; empty matches every account
    pub search: String,

    /// 1-based page number; 0 is treated as 1
    pub page: usize,

    pub page_size: usize,
}

impl Default for AccountQuery {
    fn default() -> Self {
        AccountQuery {
            filter: ServiceFilter::All,
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of query results
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    /// Accounts on the requested page, in store order
    pub items: Vec<&'a Account>,

    /// ceil(filtered_count / page_size)
    pub total_pages: usize,

    /// Accounts matching filter and search across all pages
    pub filtered_count: usize,
}

/// Whether an account matches the search term
///
/// The name is compared case-insensitively; the id is matched verbatim
/// against its decimal form.
pub fn matches_search(account: &Account, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    account.name.to_lowercase().contains(&search.to_lowercase())
        || account.id.to_string().contains(search)
}

/// Apply filter then search, keeping store order
pub fn filter_accounts<'a>(
    accounts: &'a [Account],
    filter: ServiceFilter,
    search: &str,
) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|account| filter.matches(account))
        .filter(|account| matches_search(account, search))
        .collect()
}

/// Run a dashboard query
///
/// Pages past the end are empty. A `page_size` of 0 yields no items and zero
/// pages.
pub fn query<'a>(accounts: &'a [Account], query: &AccountQuery) -> QueryPage<'a> {
    let filtered = filter_accounts(accounts, query.filter, &query.search);
    let filtered_count = filtered.len();

    if query.page_size == 0 {
        return QueryPage {
            items: Vec::new(),
            total_pages: 0,
            filtered_count,
        };
    }

    let total_pages = filtered_count.div_ceil(query.page_size);
    let start = query
        .page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(query.page_size);

    let items = filtered
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    QueryPage {
        items,
        total_pages,
        filtered_count,
    }
}

/// Dashboard view state: the current filter, search term and page
///
/// Changing the filter or the search term always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    filter: ServiceFilter,
    search: String,
    page: usize,
}

impl DashboardView {
    pub fn new() -> Self {
        DashboardView {
            filter: ServiceFilter::All,
            search: String::new(),
            page: 1,
        }
    }

    pub fn filter(&self) -> ServiceFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_filter(&mut self, filter: ServiceFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Jump to a page; 0 is clamped to 1
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, stopping at `total_pages`
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page, stopping at 1
    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Query for the current view
    pub fn to_query(&self, page_size: usize) -> AccountQuery {
        AccountQuery {
            filter: self.filter,
            search: self.search.clone(),
            page: self.page,
            page_size,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
