use actix_web::web;

pub mod response;
pub mod search;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/search-cep/{cep}", web::get().to(search::search_cep))
        .route(
            "/search-cep/{uf}/{cidade}/{logradouro}",
            web::get().to(search::search_address)
        );
}
