use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::CurrentSessionUseCase;
use crate::domain::auth::entities::Session;

/// Render home page
///
/// Public: an anonymous visitor gets the logged-out view. When the session
/// cookie resolves, the page shows the logged-in view instead. A session
/// store failure is a 500, never a silent logged-out render.
pub async fn home_page(
  templates: web::Data<TemplateEngine>,
  use_case: web::Data<Arc<CurrentSessionUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let mut context = tera::Context::new();
  context.insert("title", "Home");

  if let Some(cookie) = req.cookie("session_token") {
    let current = use_case
      .execute(cookie.value().to_string())
      .await
      .map_err(|e| {
        tracing::error!("Session lookup failed on home page: {}", e);
        actix_web::error::ErrorInternalServerError("Internal server error")
      })?;

    if let Some(current) = current {
      context.insert("username", &current.username);
    }
  }

  let html = templates
    .render("pages/home.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render the static about page
///
/// Plain public content: no session, no form.
pub async fn about_page(
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let mut context = tera::Context::new();
  context.insert("title", "About");

  let html = templates
    .render("pages/about.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render signup page
pub async fn signup_page(
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let mut context = tera::Context::new();
  context.insert("title", "Sign up");

  let html = templates
    .render("pages/signup.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render login page
pub async fn login_page(
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let mut context = tera::Context::new();
  context.insert("title", "Log in");

  let html = templates
    .render("pages/login.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Render profile page (behind the access gate)
pub async fn profile_page(
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  // Set by the access gate middleware
  let session = req
    .extensions()
    .get::<Session>()
    .cloned()
    .ok_or_else(|| actix_web::error::ErrorUnauthorized("Not authenticated"))?;

  let mut context = tera::Context::new();
  context.insert("title", "Profile");
  context.insert("username", &session.username);
  context.insert(
    "user",
    &serde_json::json!({
        "username": session.username,
        "birthdate": session.birthdate.format("%Y-%m-%d").to_string(),
        "session_expires_at": session.expires_at.to_rfc3339(),
    }),
  );

  let html = templates
    .render("pages/profile.html.tera", &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
