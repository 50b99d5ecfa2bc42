//! Bearer API-key guard for the business routes.
//!
//! Requests must carry `Authorization: Bearer <key>`. The key is passed in
//! at construction; the middleware never reads the environment.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, warn};

use crate::domain::Error as DomainError;

const BEARER_PREFIX: &str = "Bearer ";

/// API-key authentication middleware.
///
/// Without a configured key every guarded request answers 500, so a
/// deployment that forgot the key fails closed.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use rollcall::middleware::ApiKeyAuth;
///
/// let app = App::new().service(web::scope("/api/v1").wrap(ApiKeyAuth::new(Some("secret"))));
/// ```
#[derive(Clone)]
pub struct ApiKeyAuth {
    key: Option<Arc<str>>,
}

impl ApiKeyAuth {
    /// Guard requests with `key`; `None` rejects everything as misconfigured.
    pub fn new(key: Option<impl AsRef<str>>) -> Self {
        Self {
            key: key
                .map(|key| key.as_ref().trim().to_owned())
                .filter(|key| !key.is_empty())
                .map(Arc::from),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service,
            key: self.key.clone(),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyAuth`].
pub struct ApiKeyMiddleware<S> {
    service: S,
    key: Option<Arc<str>>,
}

impl<S> ApiKeyMiddleware<S> {
    fn authorise(&self, req: &ServiceRequest) -> Result<(), DomainError> {
        let Some(expected) = self.key.as_deref() else {
            error!(path = %req.path(), "no API key configured; rejecting request");
            return Err(DomainError::internal("API key authentication is not configured"));
        };
        let presented = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim);
        match presented {
            Some(token) if token == expected => Ok(()),
            Some(_) => {
                warn!(path = %req.path(), "rejected request with wrong API key");
                Err(DomainError::unauthorized("invalid API key"))
            }
            None => Err(DomainError::unauthorized("missing bearer API key")),
        }
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Err(err) = self.authorise(&req) {
            let response = err.error_response();
            return Box::pin(async move {
                Ok(req.into_response(response).map_into_right_body())
            });
        }
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
