use crate::routes;
use crate::store::Store;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::SocketAddr;

/// Binds an HTTP server that hands every worker the same store.
///
/// Returns the server future together with the addresses actually bound, so
/// callers asking for port 0 can find out where to connect.
pub fn bind(
    store: web::Data<Store>,
    host: &str,
    port: u16,
    workers: Option<usize>,
) -> std::io::Result<(Server, Vec<SocketAddr>)> {
    let mut http_server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(routes::configure)
    });
    if let Some(workers) = workers {
        http_server = http_server.workers(workers);
    }

    let http_server = http_server.bind((host, port))?;
    let addrs = http_server.addrs();
    Ok((http_server.run(), addrs))
}
