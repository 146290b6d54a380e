use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use garden_layout::{
    api::{openapi::ApiDoc, routes, state::AppState},
    config::AppConfig,
    data::catalog::load_catalog,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let catalog = load_catalog(config.catalog_path.as_deref()).map_err(std::io::Error::other)?;
    let bind_addr = config.bind_addr.clone();

    log::info!("Garden layout API started at http://{bind_addr}");
    log::info!("   GET   /api/variants?category=&q=");
    log::info!("   GET   /api/variants/{{id}}");
    log::info!("   GET   /api/categories");
    log::info!("   POST  /api/gardens");
    log::info!("   POST  /api/gardens/{{occupancy,selectable,place,generate,score,resize}}");
    log::info!("   PATCH /api/gardens/season");
    log::info!("   Swagger UI -> http://{bind_addr}/swagger-ui/");
    log::info!("   OpenAPI spec -> http://{bind_addr}/api-docs/openapi.json");

    let state = web::Data::new(AppState::new(catalog, config));
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
