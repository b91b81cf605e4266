use crate::control::{render_page, ProductPage, Response};
use crate::data_source::CatalogSource;
use crate::detail::{self, detail_document, DetailOutcome};
use crate::empty_string_as_none;
use crate::settings::Settings;
use actix_web::http::StatusCode;
use actix_web::routes;
use actix_web::web::{Data, Query};
use actix_web::HttpRequest;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Default, serde::Deserialize)]
pub struct ProductParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<String>,
}

/// Canonical URL of the requested page on the configured origin.
fn page_url(origin: &Url, req: &HttpRequest) -> Url {
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    origin.join(path).unwrap_or_else(|_| origin.clone())
}

#[routes]
#[get("/product")]
#[get("/product.html")]
pub async fn view(
    req: HttpRequest,
    settings: Data<Settings>,
    source: Data<Arc<dyn CatalogSource>>,
    params: Query<ProductParams>,
) -> Response {
    let page_url = page_url(&settings.site_origin, &req);
    let mut doc = detail_document(&settings.site_name);
    let outcome = detail::load(
        params.id.as_deref(),
        source.get_ref().as_ref(),
        &settings.site_name,
        &settings.site_origin,
        &page_url,
        &mut doc,
    )
    .await?;
    let status = match outcome {
        DetailOutcome::Rendered(_) => StatusCode::OK,
        DetailOutcome::NotFound => StatusCode::NOT_FOUND,
        DetailOutcome::LoadFailed => StatusCode::SERVICE_UNAVAILABLE,
    };

    render_page(
        status,
        ProductPage {
            site_name: &settings.site_name,
            doc: &doc,
        },
    )
}
