use actix_web::{web, HttpResponse};

use crate::api::response::{respond, Lookup};
use crate::cep::client::ViaCepClient;
use crate::cep::mapper::{map_list, map_single, Outcome};
use crate::cep::models::{AddressQuery, PostalCodeQuery};
use crate::cep::validation::Validator;

pub async fn search_cep(
    query: web::Path<PostalCodeQuery>,
    validator: web::Data<Validator>,
    client: web::Data<ViaCepClient>
) -> HttpResponse {
    let outcome = lookup_postal_code(&query, &validator, &client).await;
    respond(Lookup::PostalCode, outcome)
}

pub async fn search_address(
    query: web::Path<AddressQuery>,
    validator: web::Data<Validator>,
    client: web::Data<ViaCepClient>
) -> HttpResponse {
    let outcome = lookup_address(&query, &validator, &client).await;
    respond(Lookup::Address, outcome)
}

async fn lookup_postal_code(
    query: &PostalCodeQuery,
    validator: &Validator,
    client: &ViaCepClient
) -> Outcome {
    if let Err(err) = validator.validate_postal_code(&query.cep) {
        return err.into();
    }

    match client.fetch_by_postal_code(&query.cep).await {
        Ok(raw) => map_single(&raw),
        Err(err) => err.into(),
    }
}

async fn lookup_address(
    query: &AddressQuery,
    validator: &Validator,
    client: &ViaCepClient
) -> Outcome {
    if let Err(err) = validator.validate_address_query(&query.uf, &query.cidade, &query.logradouro) {
        return err.into();
    }

    match client.fetch_by_address(&query.uf, &query.cidade, &query.logradouro).await {
        Ok(raw) => map_list(&raw),
        Err(err) => err.into(),
    }
}
