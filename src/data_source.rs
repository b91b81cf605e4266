use anyhow::Context;
use async_trait::async_trait;
use derive_more::{Display, Error};
use hub_types::catalog::{Catalog, CatalogData};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Display, Error)]
pub enum FetchError {
    #[display("Unable to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[display("Request failed: {_0}")]
    Http(reqwest::Error),
    #[display("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[display("Malformed catalog document: {_0}")]
    Parse(serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Where a page load reads the products document from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Catalog, FetchError>;

    fn location(&self) -> String;
}

pub fn parse(input: &[u8]) -> Result<Catalog, FetchError> {
    let data: CatalogData = serde_json::from_slice(input)?;
    Ok(data.into())
}

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        let input = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse(&input)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        let res = self.client.get(self.url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.url.to_string(),
            });
        }
        let body = res.bytes().await?;
        parse(&body)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}

/// Picks the HTTP source for `http(s)://` locations and the filesystem one otherwise.
pub fn from_location(location: &str) -> Result<Arc<dyn CatalogSource>, anyhow::Error> {
    let location = location.trim();
    let lower = location.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let url = Url::parse(location)
            .with_context(|| format!("Invalid data source URL {location}"))?;
        let client = reqwest::Client::builder()
            .gzip(true)
            .build()
            .context("Unable to build HTTP client")?;
        Ok(Arc::new(HttpCatalogSource::new(client, url)))
    } else {
        Ok(Arc::new(FileCatalogSource::new(location)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Serves a fixed document, or fails like a malformed one.
    pub(crate) struct StubSource(pub Option<String>);

    #[async_trait]
    impl CatalogSource for StubSource {
        async fn fetch(&self) -> Result<Catalog, FetchError> {
            match &self.0 {
                Some(json) => parse(json.as_bytes()),
                None => Err(FetchError::Parse(
                    serde_json::from_str::<CatalogData>("{").unwrap_err(),
                )),
            }
        }

        fn location(&self) -> String {
            "stub".to_string()
        }
    }

    pub(crate) const SAMPLE: &str = r#"{
        "categories": ["all", "skincare", "makeup"],
        "products": [
            {"id": "p1", "title": "Glow Serum", "description": "Vitamin C serum.", "shortDescription": "Brightening serum",
             "price": 24.99, "originalPrice": 34.99, "rating": 4.5, "reviews": 120, "category": "skincare",
             "image": "static/images/p1.jpg", "affiliateLink": "https://shop.example.com/p1", "tags": ["vegan", "bestseller"]},
            {"id": "p2", "title": "matte Lipstick", "description": "Long lasting.", "shortDescription": "Matte finish",
             "price": 12, "rating": 3.5, "reviews": 40, "category": "makeup",
             "image": "static/images/p2.jpg", "affiliateLink": "https://shop.example.com/p2", "tags": []},
            {"id": "p3", "title": "Aloe Cleanser", "description": "Gentle cleanser.", "shortDescription": "Daily cleanser",
             "price": 12, "originalPrice": 12, "rating": 5, "reviews": 8, "category": "skincare",
             "image": "https://cdn.example.com/p3.jpg", "affiliateLink": "https://shop.example.com/p3", "tags": ["gentle"]}
        ]
    }"#;

    #[actix_web::test]
    async fn file_source_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let source = FileCatalogSource::new(file.path());
        let catalog = source.fetch().await.unwrap();
        assert_eq!(catalog.products().len(), 3);
        assert_eq!(catalog.categories().len(), 3);
    }

    #[actix_web::test]
    async fn file_source_reports_missing_and_malformed_files() {
        let missing = FileCatalogSource::new("does/not/exist.json");
        assert!(matches!(missing.fetch().await, Err(FetchError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"products\": [").unwrap();
        let malformed = FileCatalogSource::new(file.path());
        assert!(matches!(malformed.fetch().await, Err(FetchError::Parse(_))));
    }

    #[actix_web::test]
    async fn bundled_catalog_loads_with_local_images() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        let source = FileCatalogSource::new(root.join("data/products.json"));
        let catalog = source.fetch().await.unwrap();
        assert!(!catalog.products().is_empty());
        for product in catalog.products() {
            assert!(
                root.join(&product.image).is_file(),
                "missing image {} for {}",
                product.image,
                product.id
            );
        }
    }

    #[test]
    fn picks_source_by_location_scheme() {
        assert_eq!(
            from_location("https://cdn.example.com/products.json")
                .unwrap()
                .location(),
            "https://cdn.example.com/products.json"
        );
        assert_eq!(
            from_location(" data/products.json ").unwrap().location(),
            "data/products.json"
        );
    }
}
