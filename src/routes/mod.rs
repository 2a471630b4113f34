use actix_web::web;

pub mod auth;
pub mod users;
pub mod welcome;

/// Configure application routes.
///
/// Authentication and authorization are enforced by the `AuthGuard`
/// middleware, which classifies these same paths; route registration here
/// carries no security semantics of its own.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Login: POST /api/login
    cfg.configure(auth::configure_routes);

    // User CRUD: /api/users/**
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // Public documents: /, /index.html, /welcome
    cfg.configure(welcome::configure_routes);
}
