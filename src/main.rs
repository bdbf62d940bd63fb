use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use study_assistant_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let allowed_origin = config.cors_allowed_origin.clone();
    let jwt_service = web::Data::new(JwtService::new(&config.jwt_secret));

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = web::Data::new(state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new("%a \"%r\" %s %b %Dms %{x-request-id}o"))
            .wrap(cors)
            .configure(handlers::configure_health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(handlers::configure_api),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
