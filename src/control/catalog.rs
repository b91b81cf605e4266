use crate::catalog::{self, catalog_document};
use crate::control::{render_page, CatalogPage, Response};
use crate::data_source::CatalogSource;
use crate::settings::Settings;
use crate::{empty_string_as_none, CategoryFilter, SortKey, ViewMode};
use actix_web::http::StatusCode;
use actix_web::routes;
use actix_web::web::{Data, Query};
use std::sync::Arc;

#[derive(Debug, Default, serde::Deserialize)]
pub struct CatalogParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub view: Option<String>,
}

#[routes]
#[get("/")]
#[get("/index.html")]
pub async fn index(
    settings: Data<Settings>,
    source: Data<Arc<dyn CatalogSource>>,
    params: Query<CatalogParams>,
) -> Response {
    let mut doc = catalog_document(&settings.site_name)?;
    let status = match catalog::load(source.get_ref().as_ref(), &mut doc).await? {
        Some(mut session) => {
            if let Some(category) = &params.category {
                session.filter_by_category(CategoryFilter::parse(category), &mut doc)?;
            }
            if let Some(sort) = &params.sort {
                let key = SortKey::parse(sort).unwrap_or_else(|| {
                    log::debug!("Unknown sort key {sort:?}, keeping source order");
                    SortKey::Default
                });
                session.set_sort(key, &mut doc)?;
            }
            if let Some(view) = &params.view {
                session.set_view(ViewMode::parse(view), &mut doc)?;
            }
            StatusCode::OK
        }
        None => StatusCode::SERVICE_UNAVAILABLE,
    };

    render_page(
        status,
        CatalogPage {
            site_name: &settings.site_name,
            doc: &doc,
        },
    )
}
