use crate::data_source::CatalogSource;
use crate::dom::Document;
use crate::render::product_cards;
use crate::{Catalog, CategoryFilter, Product, SortKey, ViewMode};
use askama::Template;
use hub_types::catalog::category_label;
use hub_types::ALL_CATEGORIES;
use std::cmp::Ordering;

pub const PRODUCTS_GRID: &str = "productsGrid";
pub const NO_PRODUCTS: &str = "noProducts";
pub const CATEGORY_FILTER: &str = "categoryFilter";
pub const SORT_FILTER: &str = "sortFilter";
pub const VIEW_INPUT: &str = "viewMode";
pub const GRID_VIEW_BTN: &str = "gridViewBtn";
pub const LIST_VIEW_BTN: &str = "listViewBtn";

pub const LOAD_ERROR: &str = r#"<div class="col-12"><p class="text-center text-danger">Error loading products. Please try again later.</p></div>"#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub category: CategoryFilter,
    pub sort: SortKey,
    pub view: ViewMode,
}

struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "partials/options.html")]
struct SelectOptions {
    options: Vec<SelectOption>,
}

/// Indices of `products` in `category`, source order kept.
pub fn filter_products(products: &[Product], category: &CategoryFilter) -> Vec<usize> {
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| category.matches(&p.category))
        .map(|(i, _)| i)
        .collect()
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
}

/// Stable sort of `working` by `key`. [`SortKey::Default`] keeps the order given.
pub fn sort_products(products: &[Product], working: &mut [usize], key: SortKey) {
    let by: fn(&Product, &Product) -> Ordering = match key {
        SortKey::Default => return,
        SortKey::PriceLow => |a: &Product, b: &Product| a.price.cmp(&b.price),
        SortKey::PriceHigh => |a: &Product, b: &Product| b.price.cmp(&a.price),
        SortKey::NameAsc => compare_titles,
        SortKey::NameDesc => |a: &Product, b: &Product| compare_titles(b, a),
        SortKey::Rating => |a: &Product, b: &Product| b.rating.cmp(&a.rating),
    };
    working.sort_by(|a, b| by(&products[*a], &products[*b]));
}

pub fn catalog_href(state: &UiState, view: ViewMode) -> String {
    let query = serde_urlencoded::to_string([
        ("category", state.category.as_str()),
        ("sort", state.sort.as_str()),
        ("view", view.as_str()),
    ])
    .unwrap_or_default();
    format!("?{query}")
}

/// Keeps the filter, sort and view controls in line with `state`.
fn sync_controls(
    state: &UiState,
    categories: &[&str],
    doc: &mut Document,
) -> Result<(), askama::Error> {
    let mut options = vec![SelectOption {
        value: ALL_CATEGORIES.to_string(),
        label: "All Categories".to_string(),
        selected: state.category == CategoryFilter::All,
    }];
    options.extend(categories.iter().map(|c| SelectOption {
        value: c.to_string(),
        label: category_label(c),
        selected: state.category.matches(c) && state.category != CategoryFilter::All,
    }));
    doc.el(CATEGORY_FILTER)
        .set_html(SelectOptions { options }.render()?);

    let options = SortKey::ALL
        .iter()
        .map(|k| SelectOption {
            value: k.as_str().to_string(),
            label: k.label().to_string(),
            selected: *k == state.sort,
        })
        .collect();
    doc.el(SORT_FILTER)
        .set_html(SelectOptions { options }.render()?);

    doc.el(VIEW_INPUT).set_attr("value", state.view.as_str());
    doc.el(GRID_VIEW_BTN)
        .set_attr("href", catalog_href(state, ViewMode::Grid))
        .toggle_class("active", state.view == ViewMode::Grid);
    doc.el(LIST_VIEW_BTN)
        .set_attr("href", catalog_href(state, ViewMode::List))
        .toggle_class("active", state.view == ViewMode::List);
    Ok(())
}

/// Empty catalog page with default controls, before anything is loaded.
pub fn catalog_document(site_name: &str) -> Result<Document, askama::Error> {
    let mut doc = Document::new(
        site_name,
        &[
            PRODUCTS_GRID,
            NO_PRODUCTS,
            CATEGORY_FILTER,
            SORT_FILTER,
            VIEW_INPUT,
            GRID_VIEW_BTN,
            LIST_VIEW_BTN,
        ],
    );
    doc.el(PRODUCTS_GRID).set_class("product-grid");
    doc.el(NO_PRODUCTS).hide();
    sync_controls(&UiState::default(), &[], &mut doc)?;
    Ok(doc)
}

/// Filter, sort and view state of one catalog page load.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    catalog: Catalog,
    working: Vec<usize>,
    state: UiState,
}

impl CatalogSession {
    pub fn new(catalog: Catalog) -> Self {
        let working = (0..catalog.products().len()).collect();
        CatalogSession {
            catalog,
            working,
            state: UiState::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn working_set(&self) -> impl Iterator<Item = &Product> {
        let products = self.catalog.products();
        self.working.iter().map(move |i| &products[*i])
    }

    fn recompute(&mut self) {
        let products = self.catalog.products();
        self.working = filter_products(products, &self.state.category);
        sort_products(products, &mut self.working, self.state.sort);
    }

    pub fn filter_by_category(
        &mut self,
        category: CategoryFilter,
        doc: &mut Document,
    ) -> Result<(), askama::Error> {
        self.state.category = category;
        self.recompute();
        self.render(doc)
    }

    /// Sorting always starts from the filtered source order, so switching back
    /// to [`SortKey::Default`] restores it.
    pub fn set_sort(&mut self, key: SortKey, doc: &mut Document) -> Result<(), askama::Error> {
        self.state.sort = key;
        self.recompute();
        self.render(doc)
    }

    pub fn set_view(&mut self, view: ViewMode, doc: &mut Document) -> Result<(), askama::Error> {
        self.state.view = view;
        self.render(doc)
    }

    pub fn render(&self, doc: &mut Document) -> Result<(), askama::Error> {
        let categories: Vec<&str> = self.catalog.selectable_categories().collect();
        sync_controls(&self.state, &categories, doc)?;

        if self.working.is_empty() {
            doc.el(PRODUCTS_GRID).set_html("").hide();
            doc.el(NO_PRODUCTS).show();
            return Ok(());
        }
        let (html, images) = product_cards(self.working_set(), self.state.view)?;
        let layout = match self.state.view {
            ViewMode::Grid => "product-grid",
            ViewMode::List => "product-list",
        };
        doc.el(PRODUCTS_GRID)
            .set_class(layout)
            .set_html_with_images(html, images)
            .show();
        doc.el(NO_PRODUCTS).hide();
        doc.lazy_load_images();
        Ok(())
    }
}

/// Fetches the catalog and renders the unfiltered grid.
///
/// A failed fetch replaces the grid with an error message and yields `None`.
pub async fn load(
    source: &dyn CatalogSource,
    doc: &mut Document,
) -> Result<Option<CatalogSession>, askama::Error> {
    match source.fetch().await {
        Ok(catalog) => {
            log::debug!(
                "Loaded {} products from {}",
                catalog.products().len(),
                source.location()
            );
            let session = CatalogSession::new(catalog);
            session.render(doc)?;
            Ok(Some(session))
        }
        Err(err) => {
            log::error!("Error loading products from {}: {err}", source.location());
            doc.el(PRODUCTS_GRID).set_html(LOAD_ERROR).show();
            doc.el(NO_PRODUCTS).hide();
            Ok(None)
        }
    }
}
