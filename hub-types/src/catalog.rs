use crate::product::Product;
use crate::ALL_CATEGORIES;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The data source document as it is stored on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CatalogData {
    #[serde(default)]
    pub categories: Vec<String>,
    pub products: Vec<Product>,
}

/// Validated, read-only product list for one page load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<String>,
    products: Vec<Product>,
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        let mut seen = HashSet::new();
        let products = data
            .products
            .into_iter()
            .filter(|p| match p.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Skipping product {:?}: {err}", p.id);
                    false
                }
            })
            .filter(|p| {
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    log::warn!("Skipping product {:?}: duplicate id", p.id);
                }
                fresh
            })
            .collect();
        let categories = data
            .categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unique()
            .collect();
        Catalog {
            categories,
            products,
        }
    }
}

impl Catalog {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Categories shown as filter options, i.e. everything except "all".
    pub fn selectable_categories(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|c| *c != ALL_CATEGORIES)
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// Uppercases the first character, leaves the rest as is.
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
