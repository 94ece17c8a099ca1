use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::domain::auth::entities::Session;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Cookie-based session gate for protected pages
///
/// Resolves the `session_token` cookie to a live session and attaches the
/// session to request extensions. A missing, malformed, unknown, or expired
/// token redirects to the login page; a session store failure answers 500,
/// never a redirect.
pub struct AccessGate {
  auth_service: Arc<AuthService>,
}

impl AccessGate {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = AccessGateService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AccessGateService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct AccessGateService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

fn redirect_to_login<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
  req
    .into_response(
      HttpResponse::Found()
        .insert_header(("Location", "/login"))
        .finish(),
    )
    .map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for AccessGateService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = req.cookie("session_token").map(|c| c.value().to_string());

    let auth_service = self.auth_service.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let Some(token_str) = token else {
        return Ok(redirect_to_login(req));
      };

      // A token that is not even well-formed cannot name a session
      let Ok(session_token) = SessionToken::from_string(token_str) else {
        return Ok(redirect_to_login(req));
      };

      match auth_service.session_for(&session_token).await {
        Ok(Some(session)) => {
          req.extensions_mut().insert::<Session>(session);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        Ok(None) => Ok(redirect_to_login(req)),
        Err(e) => {
          // Store failure is a hard error, not an auth decision
          tracing::error!("Session lookup failed: {}", e);
          let res = req.into_response(
            HttpResponse::InternalServerError()
              .content_type("text/plain")
              .body("Internal server error"),
          );
          Ok(res.map_into_right_body())
        }
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::test_support::test_service;
  use actix_web::{
    App, HttpRequest,
    cookie::Cookie,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };
  use chrono::NaiveDate;

  async fn guarded_handler(req: HttpRequest) -> HttpResponse {
    let username = req
      .extensions()
      .get::<Session>()
      .map(|s| s.username.clone())
      .unwrap_or_default();
    HttpResponse::Ok().body(username)
  }

  #[actix_web::test]
  async fn test_no_cookie_redirects_to_login() {
    let (auth_service, _) = test_service();

    let app = test::init_service(
      App::new().service(
        web::scope("/profile")
          .wrap(AccessGate::new(auth_service))
          .route("", web::get().to(guarded_handler)),
      ),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/profile").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
  }

  #[actix_web::test]
  async fn test_malformed_cookie_redirects_to_login() {
    let (auth_service, _) = test_service();

    let app = test::init_service(
      App::new().service(
        web::scope("/profile")
          .wrap(AccessGate::new(auth_service))
          .route("", web::get().to(guarded_handler)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/profile")
      .cookie(Cookie::new("session_token", "garbage"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
  }

  #[actix_web::test]
  async fn test_valid_session_passes_through() {
    let (auth_service, _) = test_service();
    let birthdate = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    auth_service
      .sign_up(
        crate::domain::auth::value_objects::Username::new("alice").unwrap(),
        crate::domain::auth::value_objects::Password::new("pw123").unwrap(),
        birthdate,
      )
      .await
      .unwrap();
    let session = auth_service
      .log_in(
        crate::domain::auth::value_objects::Username::new("alice").unwrap(),
        crate::domain::auth::value_objects::Password::new("pw123").unwrap(),
      )
      .await
      .unwrap();

    let app = test::init_service(
      App::new().service(
        web::scope("/profile")
          .wrap(AccessGate::new(auth_service))
          .route("", web::get().to(guarded_handler)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/profile")
      .cookie(Cookie::new("session_token", session.token.as_str().to_string()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "alice");
  }
}
