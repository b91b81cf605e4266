use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod product;

pub const ALL_CATEGORIES: &str = "all";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum SortKey {
    #[default]
    #[display("default")]
    Default,
    #[display("price-low")]
    PriceLow,
    #[display("price-high")]
    PriceHigh,
    #[display("name-asc")]
    NameAsc,
    #[display("name-desc")]
    NameDesc,
    #[display("rating")]
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Default,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::NameAsc => "Name: A to Z",
            SortKey::NameDesc => "Name: Z to A",
            SortKey::Rating => "Highest Rated",
        }
    }

    /// Unknown keys yield `None`; callers fall back to [`SortKey::Default`].
    pub fn parse<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref().trim().to_lowercase().as_str() {
            "" | "default" => Some(SortKey::Default),
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "name-asc" => Some(SortKey::NameAsc),
            "name-desc" => Some(SortKey::NameDesc),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum ViewMode {
    #[default]
    #[display("grid")]
    Grid,
    #[display("list")]
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, ViewMode::Grid)
    }

    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        match s.as_ref().trim().to_lowercase().as_str() {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        match s.as_ref().trim() {
            "" | ALL_CATEGORIES => CategoryFilter::All,
            other => CategoryFilter::Only(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(c) => c,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}
