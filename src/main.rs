use actix_web::middleware::{Compress, Logger};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use finds_hub::{control, data_source, settings::Settings};
use std::env;

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    if let Err(env::VarError::NotPresent) = env::var("RUST_LOG") {
        env::set_var("RUST_LOG", "INFO");
    }
    pretty_env_logger::formatted_timed_builder()
        .parse_default_env()
        .init();

    match std::fs::File::open(".env") {
        Ok(_) => envmnt::load_file(".env")?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No .env file, using process environment");
        }
        Err(err) => {
            return Err(anyhow::anyhow!("Unable to open .env file: {err}"));
        }
    }

    let settings = Settings::from_env()?;
    let source = data_source::from_location(&settings.data_source)?;
    log::info!(
        "Serving {} on {}:{} with products from {}",
        settings.site_name,
        settings.listen_addr,
        settings.port,
        source.location()
    );

    let bind = (settings.listen_addr.clone(), settings.port);
    let static_dir = settings.static_dir.clone();
    let data_dir = settings.data_dir.clone();
    let settings = Data::new(settings);
    let source = Data::new(source);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(Logger::default())
            .app_data(settings.clone())
            .app_data(source.clone())
            .service(actix_files::Files::new("/static", &static_dir))
            .service(actix_files::Files::new("/data", &data_dir).use_etag(true))
            .service(control::catalog::index)
            .service(control::product::view)
            .default_service(web::to(control::not_found))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
