use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Path of the search endpoint, relative to the API base URL
pub const SEARCH_PATH: &str = "/api/recipes/search";

/// Page sizes offered to the user
pub const PAGE_SIZES: [u32; 6] = [15, 20, 25, 30, 40, 50];

/// A filterable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Title,
    Cuisine,
    /// Comparator-prefixed, e.g. ">=4"
    Rating,
    /// Comparator-prefixed, e.g. "<=60"
    TotalTime,
    Calories,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Title,
        FilterKey::Cuisine,
        FilterKey::Rating,
        FilterKey::TotalTime,
        FilterKey::Calories,
    ];

    /// Query parameter name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Title => "title",
            FilterKey::Cuisine => "cuisine",
            FilterKey::Rating => "rating",
            FilterKey::TotalTime => "total_time",
            FilterKey::Calories => "calories",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(FilterKey::Title),
            "cuisine" => Ok(FilterKey::Cuisine),
            "rating" => Ok(FilterKey::Rating),
            "total_time" | "time" => Ok(FilterKey::TotalTime),
            "calories" => Ok(FilterKey::Calories),
            other => Err(InputError::UnknownFilter(other.to_string())),
        }
    }
}

/// Free-text search constraints. An empty value means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub title: String,
    pub cuisine: String,
    pub rating: String,
    pub total_time: String,
    pub calories: String,
}

impl Filters {
    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Title => &self.title,
            FilterKey::Cuisine => &self.cuisine,
            FilterKey::Rating => &self.rating,
            FilterKey::TotalTime => &self.total_time,
            FilterKey::Calories => &self.calories,
        }
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let slot = match key {
            FilterKey::Title => &mut self.title,
            FilterKey::Cuisine => &mut self.cuisine,
            FilterKey::Rating => &mut self.rating,
            FilterKey::TotalTime => &mut self.total_time,
            FilterKey::Calories => &mut self.calories,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Filters::default();
    }

    /// Non-empty filters in column order
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        FilterKey::ALL
            .into_iter()
            .map(move |key| (key, self.get(key)))
            .filter(|(_, value)| !value.is_empty())
    }
}

/// Number of records per page, restricted to [`PAGE_SIZES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(PAGE_SIZES[0])
    }
}

impl TryFrom<u32> for PageSize {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if PAGE_SIZES.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(InputError::InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to issue one search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub filters: Filters,
    /// 1-based, forwarded to the server untouched
    pub page: u32,
    pub page_size: PageSize,
}

impl SearchRequest {
    pub fn new(filters: Filters, page: u32, page_size: PageSize) -> Self {
        Self {
            filters,
            page,
            page_size,
        }
    }

    /// Query parameters: non-empty filters, then `page` and `limit`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .filters
            .active()
            .map(|(key, value)| (key.as_str(), value.to_string()))
            .collect();

        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.page_size.to_string()));
        pairs
    }

    /// URL-encoded query string, without the leading `?`
    pub fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.query_pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }

    /// Path and query, e.g. `/api/recipes/search?cuisine=fr&page=1&limit=15`
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", SEARCH_PATH, self.query_string())
    }
}
