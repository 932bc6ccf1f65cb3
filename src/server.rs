use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use spdlog::{debug, info};

use crate::config::Config;
use crate::site::Routes;

/// Response for `path`: the generated route, a redirect to the route with a
/// trailing slash, or 404.
pub fn route_response(routes: &Routes, path: &str) -> web::HttpResponse {
    if let Some(route) = routes.get(path) {
        return web::HttpResponse::Ok()
            .content_type(route.content_type)
            .body(route.body.clone());
    }

    if !path.ends_with('/') {
        let with_slash = format!("{}/", path);
        if routes.get(&with_slash).is_some() {
            return web::HttpResponse::TemporaryRedirect()
                .header("Location", with_slash)
                .content_type("text/html; charset=utf-8")
                .finish();
        }
    }

    debug!("No route for {}", path);
    web::HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Not found: {}", path))
}

async fn serve_route(req: HttpRequest, routes: web::types::State<Arc<Routes>>) -> web::HttpResponse {
    route_response(&routes, req.path())
}

pub async fn server_run(config: &Config, routes: Routes) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let routes = Arc::new(routes);

    info!("Serving {} routes on {}:{}", routes.len(), bind_addr, bind_port);

    web::HttpServer::new(move || {
        web::App::new()
            .state(routes.clone())
            .default_service(web::route().to(serve_route))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
