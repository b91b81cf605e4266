use crate::dom::Document;
use crate::settings::SITE_NAME;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use anyhow::anyhow;
use askama::Template;
use derive_more::{Display, Error};
use log_error::LogError;

pub mod catalog;
pub mod product;

pub type Response = Result<HttpResponse, ControllerError>;

#[derive(Debug, Display, Error)]
pub enum ControllerError {
    NotFound,
    #[error(ignore)]
    InternalServerError(anyhow::Error),
}

impl From<anyhow::Error> for ControllerError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalServerError(err)
    }
}

impl From<askama::Error> for ControllerError {
    fn from(err: askama::Error) -> Self {
        Self::InternalServerError(anyhow!(err))
    }
}

impl actix_web::error::ResponseError for ControllerError {
    fn error_response(&self) -> HttpResponse {
        log::warn!("{self:?}");
        use ControllerError::*;
        match self {
            NotFound => NotFoundPage {
                site_name: &SITE_NAME,
            }
            .render()
            .log_error("Unable to render error template")
            .map(|res| {
                HttpResponse::NotFound()
                    .content_type(ContentType::html())
                    .body(res)
            })
            .unwrap_or_else(|| HttpResponse::NotFound().body(())),
            InternalServerError(err) => InternalServerErrorPage {
                site_name: &SITE_NAME,
                error: format!("{err:?}"),
            }
            .render()
            .log_error("Unable to render error template")
            .map(|res| {
                HttpResponse::InternalServerError()
                    .content_type(ContentType::html())
                    .body(res)
            })
            .unwrap_or_else(|| HttpResponse::InternalServerError().body(err.to_string())),
        }
    }
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundPage<'a> {
    site_name: &'a str,
}

#[derive(Template)]
#[template(path = "500.html")]
pub struct InternalServerErrorPage<'a> {
    site_name: &'a str,
    error: String,
}

#[derive(Template)]
#[template(path = "catalog.html")]
pub struct CatalogPage<'a> {
    pub site_name: &'a str,
    pub doc: &'a Document,
}

#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductPage<'a> {
    pub site_name: &'a str,
    pub doc: &'a Document,
}

pub fn render_page(status: StatusCode, t: impl Template) -> Response {
    let result = t
        .render()
        .map_err(|x| ControllerError::InternalServerError(anyhow!(x)))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(result))
}

pub async fn not_found() -> Response {
    Err(ControllerError::NotFound)
}
