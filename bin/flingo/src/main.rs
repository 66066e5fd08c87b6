//! # Flingo Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_web::{web, App, HttpServer};
use fl_api::{configure_routes, middleware, AppState};
use fl_core::code::RandomCodes;
use fl_core::services::{FileShareService, TextShareService};
use fl_core::traits::ContentStore;
use std::sync::Arc;

#[cfg(feature = "db-sqlite")]
use fl_db_sqlite::SqliteShareRepo;

#[cfg(feature = "storage-local")]
use fl_storage_local::LocalContentStore;

use settings::Settings;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo = Arc::new(SqliteShareRepo::new(&settings.database_url).await?);

    // 2. Initialize Storage Implementation
    #[cfg(feature = "storage-local")]
    let store = Arc::new(LocalContentStore::new(&settings.upload_dir)?);

    log::info!("content store at {}", store.root().display());

    // 3. Wire the services
    let codes = Arc::new(RandomCodes);
    let state = web::Data::new(AppState::new(
        TextShareService::new(repo.clone(), codes.clone()),
        FileShareService::new(repo, store, codes),
    ));

    let bind = (settings.host.clone(), settings.port);
    let static_dir = settings.static_dir.clone();

    log::info!("Flingo starting on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .app_data(state.clone())
            .configure(configure_routes);

        // Registered last so it never shadows an API route
        match &static_dir {
            Some(dir) => app.service(actix_files::Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
