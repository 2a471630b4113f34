use actix_web::{web, HttpResponse};

/// Public welcome page.
async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to Taskboard")
}

/// Root document. Stands in for the SPA index in this build.
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<!doctype html><title>Taskboard</title><p>Taskboard backend is running.</p>")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)));
    cfg.service(web::resource("/index.html").route(web::get().to(index)));
    cfg.service(web::resource("/welcome").route(web::get().to(welcome)));
}
