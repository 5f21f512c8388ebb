use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use inferscope::gateway::{InferenceGateway, SageMakerGateway};
use inferscope::server::{self, routes};
use inferscope::settings::Settings;
use std::sync::Arc;
use std::{env, io, process};

use tracing::info;

const USAGE: &str = "usage: ./inferscope [config file]";

fn get_args() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    match args.len() - 1 {
        0 => None,
        1 => Some(args[1].clone()),
        _ => {
            println!("{USAGE}");
            process::exit(1);
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let config_file = get_args();
    let settings = Settings::load(config_file.as_deref()).expect("invalid configuration");
    info!("loaded settings: {settings:?}");

    let gateway: Arc<dyn InferenceGateway> = Arc::new(SageMakerGateway::new(
        settings.runtime_base.clone(),
        settings.api_base.clone(),
    ));
    let gateway = web::Data::from(gateway);
    let body_limit = settings.body_limit;

    info!("starting server on {}:{}", settings.bind, settings.port);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .app_data(server::json_config(body_limit))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .service(routes::inference)
            .service(routes::endpoints)
            .service(routes::sagemaker_health)
            .service(routes::health)
    })
    .bind(format!("{}:{}", settings.bind, settings.port))?
    .run()
    .await
}
