use crate::store::{Store, StoreError};
use actix_web::http::StatusCode;
use actix_web::{route, web, HttpResponse, ResponseError};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
pub struct ItemQuery {
    #[serde(default)]
    item: String,
}

#[derive(Deserialize)]
pub struct PriceQuery {
    #[serde(default)]
    item: String,
    #[serde(default)]
    price: String,
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict { .. } => StatusCode::CONFLICT,
            StoreError::InvalidValue(_) => StatusCode::NOT_ACCEPTABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        text(HttpResponse::build(self.status_code()), format!("{}\n", self))
    }
}

fn text(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type("text/plain; charset=utf-8").body(body)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(price)
        .service(create)
        .service(update)
        .service(delete);
}

#[route("/list", method = "GET", method = "POST")]
async fn list(store: web::Data<Store>) -> HttpResponse {
    info!("LIST");
    let body = store
        .list()
        .await
        .into_iter()
        .map(|record| format!("{}: {}\n", record.name, record.price))
        .collect::<String>();
    text(HttpResponse::Ok(), body)
}

#[route("/price", method = "GET", method = "POST")]
async fn price(
    query: web::Query<ItemQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, StoreError> {
    info!(item = %query.item, "PRICE");
    let price = store.read(&query.item).await?;
    Ok(text(HttpResponse::Ok(), format!("{}\n", price)))
}

#[route("/create", method = "GET", method = "POST")]
async fn create(
    query: web::Query<PriceQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, StoreError> {
    info!(item = %query.item, price = %query.price, "CREATE");
    let record = store.create(&query.item, &query.price).await?;
    Ok(text(
        HttpResponse::Ok(),
        format!(
            "Item {} created with price {:.2}\n",
            record.name,
            record.price.amount()
        ),
    ))
}

#[route("/update", method = "GET", method = "POST", method = "PUT")]
async fn update(
    query: web::Query<PriceQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, StoreError> {
    info!(item = %query.item, price = %query.price, "UPDATE");
    let record = store.update(&query.item, &query.price).await?;
    Ok(text(
        HttpResponse::Ok(),
        format!(
            "Item {} updated with price {:.2}\n",
            record.name,
            record.price.amount()
        ),
    ))
}

#[route("/delete", method = "GET", method = "POST", method = "DELETE")]
async fn delete(
    query: web::Query<ItemQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, StoreError> {
    info!(item = %query.item, "DELETE");
    let name = store.delete(&query.item).await?;
    Ok(text(HttpResponse::Ok(), format!("{:?} deleted\n", name)))
}
