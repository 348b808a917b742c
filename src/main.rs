use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};

use rigforge::db::establish_connection_pool;
use rigforge::models::config::ServerConfig;
use rigforge::repository::DieselRepository;
use rigforge::routes::api;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", config.database_url);
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let secret_key = if config.session_secret.len() >= 32 {
        Key::derive_from(config.session_secret.as_bytes())
    } else {
        log::warn!("session_secret is unset or too short; sessions reset on restart");
        Key::generate()
    };

    let bind_address = config.bind_address.clone();
    let port = config.port;
    log::info!("Starting server on {bind_address}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .service(api::list_categories)
            .service(api::list_components)
            .service(api::get_compatible)
            .service(api::validate_build)
            .service(api::auto_build)
            .service(api::get_options)
            .service(api::save_build)
            .service(api::list_builds)
            .service(api::get_build)
            .service(api::delete_build)
    })
    .bind((bind_address, port))?
    .run()
    .await
}
