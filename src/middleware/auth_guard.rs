//! Request authentication and authorization middleware
//!
//! For every request this guard classifies the route, resolves a principal
//! from the Authorization header (bearer token or basic credentials), and
//! evaluates the access policy. Allowed requests proceed with the principal
//! stored in request extensions; denied requests terminate with 401 or 403
//! before any handler runs.

use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::jwt::verify_access_token;
use crate::auth::policy::{classify, decide, AccessDecision, DenyReason, RouteClass};
use crate::auth::Principal;
use crate::error::AppError;
use crate::services::auth::check_password;
use crate::state::app_state::AppState;

pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware { service }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let route = classify(req.method(), req.path());

        // Public routes skip authentication entirely.
        if route == RouteClass::Public {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let app_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.clone(),
            None => {
                return Box::pin(ready(Ok(req
                    .error_response(AppError::internal("AppState not available".to_string()))
                    .map_into_right_body())))
            }
        };

        let principal = match authenticate(&req, &app_state) {
            Ok(principal) => principal,
            Err(e) => return Box::pin(ready(Ok(req.error_response(e).map_into_right_body()))),
        };

        // Ownership fact for owned mutations; a failed lookup denies.
        let owner = match &route {
            RouteClass::OwnedMutation { resource_id } => {
                match app_state.users.owner_identity(*resource_id) {
                    Ok(owner) => owner,
                    Err(e) => {
                        warn!(resource_id, error = %e, "ownership lookup failed, denying");
                        None
                    }
                }
            }
            _ => None,
        };

        match decide(principal.as_ref(), &route, owner.as_deref()) {
            AccessDecision::Allow => {
                if let Some(principal) = principal {
                    // Store the principal in request extensions BEFORE
                    // calling the downstream service.
                    req.extensions_mut().insert(principal);
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            AccessDecision::Deny(DenyReason::Unauthenticated) => Box::pin(ready(Ok(req
                .error_response(AppError::unauthorized())
                .map_into_right_body()))),
            AccessDecision::Deny(DenyReason::Forbidden) => Box::pin(ready(Ok(req
                .error_response(AppError::forbidden())
                .map_into_right_body()))),
        }
    }
}

/// Resolve a principal from the Authorization header, if any.
///
/// - No header at all is not an error; the policy decides whether the route
///   tolerates an anonymous request.
/// - A header that is present but unusable (bad scheme, bad encoding, bad
///   token, bad credentials) is always a 401.
fn authenticate(req: &ServiceRequest, app_state: &AppState) -> Result<Option<Principal>, AppError> {
    let Some(header_value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header_value.to_str().map_err(|_| {
        debug!("authorization header is not valid UTF-8");
        AppError::unauthorized()
    })?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => {
            verify_access_token(token, SystemTime::now(), &app_state.security)
                .map(Some)
                .map_err(|e| {
                    debug!(reason = %e, "bearer token rejected");
                    AppError::unauthorized()
                })
        }
        ["Basic", encoded] => check_basic(encoded, app_state).map(Some),
        _ => {
            debug!("unsupported authorization scheme");
            Err(AppError::unauthorized())
        }
    }
}

/// Decode basic credentials and run them through the same credential check
/// the login endpoint uses.
fn check_basic(encoded: &str, app_state: &AppState) -> Result<Principal, AppError> {
    let decoded = BASE64.decode(encoded).map_err(|_| {
        debug!("basic credentials are not valid base64");
        AppError::unauthorized()
    })?;
    let text = String::from_utf8(decoded).map_err(|_| {
        debug!("basic credentials are not valid UTF-8");
        AppError::unauthorized()
    })?;

    let Some((username, password)) = text.split_once(':') else {
        debug!("basic credentials missing separator");
        return Err(AppError::unauthorized());
    };

    check_password(&*app_state.users, username, password)
}
