use std::io;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use crate::cep::client::ViaCepClient;
use crate::cep::validation::Validator;
use crate::config::Config;

mod api;
mod cep;
mod config;
mod utils;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let client = ViaCepClient::new(config.base_url.clone(), config.upstream_timeout)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let client = web::Data::new(client);
    let validator = web::Data::new(Validator::default());

    info!(
        "Listening on {}, forwarding to {} (timeout {:?})",
        config.bind_address,
        client.base_url(),
        config.upstream_timeout
    );

    HttpServer::new(move || {
        App::new()
            .app_data(validator.clone())
            .app_data(client.clone())
            .wrap(Logger::default())
            .configure(api::routes)
    })
    .bind(config.bind_address)?
    .run()
    .await
}
