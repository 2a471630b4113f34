//! Authorization policy
//!
//! Route classification plus a pure access decision, evaluated by the auth
//! guard middleware for every request. The policy owns no state: given the
//! same (principal, route class, ownership fact) it always answers the same
//! way, and every path ends in an explicit allow or a named deny.

use actix_web::http::Method;

use crate::auth::Principal;

/// What the policy needs to know about a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// No authentication required (login endpoint, root document, assets).
    Public,
    /// Requires an authenticated principal, nothing more.
    Protected,
    /// Mutation of one specific resource; additionally requires the
    /// principal to own it.
    OwnedMutation { resource_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No principal could be established for a protected route.
    Unauthenticated,
    /// The principal does not own the resource it tries to mutate.
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

/// Classify a request by method and path.
///
/// Public paths mirror the original filter chain: the login endpoint, the
/// root document, and static assets, plus the welcome page.
pub fn classify(method: &Method, path: &str) -> RouteClass {
    if *method == Method::POST && path == "/api/login" {
        return RouteClass::Public;
    }

    if *method == Method::GET {
        if matches!(path, "/" | "/index.html" | "/welcome") || path.starts_with("/assets/") {
            return RouteClass::Public;
        }
    }

    if *method == Method::PUT || *method == Method::DELETE {
        if let Some(resource_id) = user_resource_id(path) {
            return RouteClass::OwnedMutation { resource_id };
        }
    }

    RouteClass::Protected
}

/// `/api/users/{id}` with a numeric id and no trailing segments.
fn user_resource_id(path: &str) -> Option<i64> {
    let rest = path.strip_prefix("/api/users/")?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    rest.parse::<i64>().ok()
}

/// Decide whether a request may proceed.
///
/// `owner` is the owning identity of the targeted resource, as reported by
/// the ownership lookup; the caller passes `None` when the lookup missed or
/// failed, which denies (fail closed).
pub fn decide(
    principal: Option<&Principal>,
    route: &RouteClass,
    owner: Option<&str>,
) -> AccessDecision {
    match route {
        RouteClass::Public => AccessDecision::Allow,
        RouteClass::Protected | RouteClass::OwnedMutation { .. } => {
            let Some(principal) = principal else {
                return AccessDecision::Deny(DenyReason::Unauthenticated);
            };
            match route {
                RouteClass::OwnedMutation { .. } => match owner {
                    Some(owner) if owner == principal.identity => AccessDecision::Allow,
                    _ => AccessDecision::Deny(DenyReason::Forbidden),
                },
                _ => AccessDecision::Allow,
            }
        }
    }
}
