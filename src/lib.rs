#![deny(clippy::unwrap_used)]

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::IntoDeserializer;
use serde::Deserialize;

pub mod catalog;
pub mod control;
pub mod data_source;
pub mod detail;
pub mod dom;
pub mod lazy;
pub mod meta;
pub mod render;
pub mod settings;

pub use hub_types::catalog::{Catalog, CatalogData};
pub use hub_types::product::Product;
pub use hub_types::{CategoryFilter, SortKey, ViewMode};

pub const PRODUCT_PAGE: &str = "product.html";

/// Link to the detail page of the product with `id`.
pub fn product_url(id: &str) -> String {
    let query = serde_urlencoded::to_string([("id", id)]).unwrap_or_default();
    format!("{PRODUCT_PAGE}?{query}")
}

/// Two decimals, half away from zero.
pub fn format_price(price: &Decimal) -> String {
    format!(
        "${:.2}",
        price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::deserialize(s.into_deserializer()).map(Some),
    }
}
