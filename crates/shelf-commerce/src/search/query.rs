//! Query builders for the book list and the transaction history.

use crate::catalog::BookCondition;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort options for the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookSort {
    /// Title A-Z.
    #[default]
    TitleAsc,
    /// Title Z-A.
    TitleDesc,
    /// Oldest publication first.
    DateAsc,
    /// Newest publication first.
    DateDesc,
}

impl BookSort {
    /// Value of the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookSort::TitleAsc => "title-asc",
            BookSort::TitleDesc => "title-desc",
            BookSort::DateAsc => "date-asc",
            BookSort::DateDesc => "date-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookSort::TitleAsc => "Title: A-Z",
            BookSort::TitleDesc => "Title: Z-A",
            BookSort::DateAsc => "Published: oldest",
            BookSort::DateDesc => "Published: newest",
        }
    }
}

impl FromStr for BookSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title-asc" => Ok(BookSort::TitleAsc),
            "title-desc" => Ok(BookSort::TitleDesc),
            "date-asc" => Ok(BookSort::DateAsc),
            "date-desc" => Ok(BookSort::DateDesc),
            other => Err(format!("unknown book sort: {}", other)),
        }
    }
}

/// Filters and page for `GET /books`.
///
/// Changing the search text, condition or sort sends the listing back to
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    /// Current page (1-indexed).
    pub page: u32,
    pub search: Option<String>,
    pub condition: Option<BookCondition>,
    pub sort: BookSort,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            condition: None,
            sort: BookSort::default(),
        }
    }
}

impl BookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text. Blank text clears the filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search.into());
        self.page = 1;
        self
    }

    pub fn with_condition(mut self, condition: Option<BookCondition>) -> Self {
        self.condition = condition;
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, sort: BookSort) -> Self {
        self.sort = sort;
        self.page = 1;
        self
    }

    /// Jump to a page; page numbers below 1 are clamped.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Query parameters, omitting unset filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(condition) = self.condition {
            params.push(("condition", condition.as_str().to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        params
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Column the transaction history is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionSortField {
    #[default]
    CreatedAt,
    Id,
    TotalAmount,
}

impl TransactionSortField {
    /// Value of the `sortBy` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSortField::CreatedAt => "createdAt",
            TransactionSortField::Id => "id",
            TransactionSortField::TotalAmount => "totalAmount",
        }
    }
}

impl FromStr for TransactionSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created-at" | "date" => Ok(TransactionSortField::CreatedAt),
            "id" => Ok(TransactionSortField::Id),
            "totalAmount" | "total-amount" | "total" => Ok(TransactionSortField::TotalAmount),
            other => Err(format!("unknown transaction sort field: {}", other)),
        }
    }
}

/// Filters and page for `GET /transactions`. Newest first by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub page: u32,
    pub search: Option<String>,
    pub sort_by: TransactionSortField,
    pub order_by: SortOrder,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: None,
            sort_by: TransactionSortField::CreatedAt,
            order_by: SortOrder::Desc,
        }
    }
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search.into());
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, sort_by: TransactionSortField, order_by: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order_by = order_by;
        self.page = 1;
        self
    }

    /// Apply a combined `field-order` value such as `totalAmount-asc`.
    pub fn with_sort_key(self, key: &str) -> Result<Self, String> {
        let (field, order) = key
            .rsplit_once('-')
            .ok_or_else(|| format!("expected <field>-<asc|desc>, got {}", key))?;
        Ok(self.with_sort(field.parse()?, order.parse()?))
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("sortBy", self.sort_by.as_str().to_string()));
        params.push(("orderBy", self.order_by.as_str().to_string()));
        params
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
