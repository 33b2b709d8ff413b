use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, ServiceRequest, ServiceResponse, Transform},
    web::Data,
    Error, HttpMessage, ResponseError,
};
use chrono::Utc;
use diesel::prelude::*;
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::constants::middleware_constants::{is_guest_only, requires_admin, requires_login};
use crate::db::{get_conn, DbConn, DbPool};
use crate::error::AppError;
use crate::models::session_models::{CurrentUser, Session};
use crate::models::user_models::User;
use crate::schema::{sessions, users};

/// Resolves the acting identity from the session token and enforces the
/// guest/login/admin gates before any handler runs. Ownership checks stay in
/// the handlers, where the resource is loaded.
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: actix_web::dev::Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Arc::new(service),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: Arc<S>,
}

impl<S, B> actix_web::dev::Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: actix_web::dev::Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let pool = req
                .app_data::<Data<DbPool>>()
                .expect("DbPool missing from app data")
                .clone();

            // Session cookie first, Bearer header as fallback.
            let token = req
                .cookie("session")
                .map(|c| c.value().to_string())
                .or_else(|| {
                    req.headers()
                        .get("Authorization")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|h| h.strip_prefix("Bearer "))
                        .map(str::to_string)
                });

            let mut conn = match get_conn(&pool) {
                Ok(c) => c,
                Err(e) => return Ok(short_circuit(req, e)),
            };

            let current = match token {
                Some(t) => match resolve_user(&t, &mut conn) {
                    Ok(c) => c,
                    Err(e) => return Ok(short_circuit(req, e)),
                },
                None => None,
            };
            drop(conn);

            let path = req.path().to_string();
            let method = req.method().clone();

            if is_guest_only(&path) && current.is_some() {
                tracing::debug!(%path, "guest gate tripped by logged-in user");
                return Ok(short_circuit(req, AppError::AlreadyLogged));
            }

            if requires_admin(&path) {
                match &current {
                    None => return Ok(short_circuit(req, AppError::Unauthorized)),
                    Some(user) if !user.is_admin() => {
                        tracing::warn!(user = %user.username, %path, "admin route refused");
                        return Ok(short_circuit(req, AppError::Forbidden));
                    }
                    Some(_) => {}
                }
            } else if requires_login(&path, &method) && current.is_none() {
                tracing::debug!(%path, "login gate tripped by guest");
                return Ok(short_circuit(req, AppError::Unauthorized));
            }

            if let Some(user) = current {
                req.extensions_mut().insert(user);
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Turn a gate failure into its redirect/flash response without invoking the
/// wrapped service.
fn short_circuit<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let res = err.error_response().map_into_right_body();
    let (req, _payload) = req.into_parts();
    ServiceResponse::new(req, res)
}

/// Look the token up in the sessions table; expired rows count as no session.
fn resolve_user(token: &str, conn: &mut DbConn) -> Result<Option<CurrentUser>, AppError> {
    let session = sessions::table
        .filter(sessions::token.eq(token))
        .first::<Session>(conn)
        .optional()?;

    let session = match session {
        Some(s) if s.expires_at > Utc::now().naive_utc() => s,
        _ => return Ok(None),
    };

    let user = users::table
        .find(session.user_id)
        .select(User::as_select())
        .first::<User>(conn)
        .optional()?;

    Ok(user.map(|u| CurrentUser {
        id: u.id,
        username: u.username.clone(),
        role: u.role(),
    }))
}
