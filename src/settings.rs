use anyhow::Context;
use once_cell::sync::Lazy;
use url::Url;

pub const DEFAULT_SITE_NAME: &str = "Beauty finds hub";

/// Site name for pages rendered outside a handler, such as error pages.
pub static SITE_NAME: Lazy<String> = Lazy::new(|| envmnt::get_or("SITE_NAME", DEFAULT_SITE_NAME));

#[derive(Clone, Debug)]
pub struct Settings {
    pub listen_addr: String,
    pub port: u16,
    /// Filesystem path or `http(s)://` URL of the products document.
    pub data_source: String,
    /// Origin that relative image paths and canonical page URLs resolve against.
    pub site_origin: Url,
    pub site_name: String,
    pub static_dir: String,
    pub data_dir: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let port = envmnt::get_or("PORT", "8080");
        let port = port
            .trim()
            .parse()
            .with_context(|| format!("PORT is not a valid port: {port}"))?;
        let site_origin = envmnt::get_or("SITE_ORIGIN", "http://localhost:8080");
        let site_origin = Url::parse(site_origin.trim())
            .with_context(|| format!("SITE_ORIGIN is not a valid URL: {site_origin}"))?;
        Ok(Settings {
            listen_addr: envmnt::get_or("LISTEN_ADDR", "0.0.0.0"),
            port,
            data_source: envmnt::get_or("DATA_SOURCE", "data/products.json"),
            site_origin,
            site_name: SITE_NAME.clone(),
            static_dir: envmnt::get_or("STATIC_DIR", "static"),
            data_dir: envmnt::get_or("DATA_DIR", "data"),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_addr: "0.0.0.0".to_string(),
            port: 8080,
            data_source: "data/products.json".to_string(),
            site_origin: Url::parse("http://localhost:8080")
                .expect("default origin is a valid URL"),
            site_name: DEFAULT_SITE_NAME.to_string(),
            static_dir: "static".to_string(),
            data_dir: "data".to_string(),
        }
    }
}
