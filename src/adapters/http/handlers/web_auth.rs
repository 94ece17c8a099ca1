use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, cookie::SameSite, web};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{
  CurrentSessionUseCase, LogInCommand, LogInUseCase, LogOutUseCase, SignUpCommand, SignUpUseCase,
};
use crate::domain::auth::errors::AuthError;

/// Signup form, posted as multipart so the profile image can ride along
///
/// The optional `profile_image` upload is accepted and discarded; account
/// creation does not depend on it.
#[derive(MultipartForm)]
pub struct SignupForm {
  username: Text<String>,
  password: Text<String>,
  birthdate: Text<String>,
  #[multipart(rename = "profile_image")]
  _profile_image: Option<TempFile>,
}

#[derive(Deserialize)]
pub struct LoginFormData {
  username: String,
  password: String,
}

fn render_page(
  templates: &TemplateEngine,
  template: &str,
  context: &tera::Context,
) -> Result<String, actix_web::Error> {
  templates
    .render(template, context)
    .map_err(actix_web::error::ErrorInternalServerError)
}

/// Handle signup form submission
///
/// Every outcome re-renders the signup page: a success message, "Username
/// already in use" for duplicates, the validation text for bad input, and a
/// generic message otherwise. The page itself always answers 200.
pub async fn signup_submit(
  form: MultipartForm<SignupForm>,
  use_case: web::Data<Arc<SignUpUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let form = form.into_inner();

  let command = SignUpCommand {
    username: form.username.into_inner(),
    password: form.password.into_inner(),
    birthdate: form.birthdate.into_inner(),
  };

  let mut context = tera::Context::new();
  context.insert("title", "Sign up");

  match use_case.execute(command).await {
    Ok(response) => {
      tracing::info!("Signup successful for user_id={}", response.user_id);
      context.insert("success_message", "Signup complete. You can now log in.");
    }
    Err(AuthError::DuplicateUsername) => {
      context.insert("error_message", "Username already in use");
    }
    Err(AuthError::Validation(e)) => {
      context.insert("error_message", &e.to_string());
    }
    Err(e) => {
      tracing::error!("Signup failed: {}", e);
      context.insert("error_message", "Signup failed. Please try again.");
    }
  }

  let html = render_page(&templates, "pages/signup.html.tera", &context)?;
  Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Handle login form submission
///
/// Success sets the session cookie and redirects home. The two credential
/// failures answer 401 with distinct messages; anything else is a 500.
pub async fn login_submit(
  form: web::Form<LoginFormData>,
  use_case: web::Data<Arc<LogInUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let command = LogInCommand {
    username: form.username.clone(),
    password: form.password.clone(),
  };

  match use_case.execute(command).await {
    Ok(response) => {
      tracing::info!("Login successful for user_id={}", response.user_id);

      // Cookie lives as long as the session
      let max_age = (response.expires_at - Utc::now()).num_seconds().max(0);

      let cookie = Cookie::build("session_token", response.session_token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::seconds(max_age))
        .finish();

      Ok(
        HttpResponse::Found()
          .cookie(cookie)
          .insert_header(("Location", "/"))
          .finish(),
      )
    }
    Err(e @ (AuthError::UserNotFound | AuthError::InvalidCredentials)) => {
      let message = match e {
        AuthError::UserNotFound => "User not found",
        _ => "Password mismatch",
      };

      let mut context = tera::Context::new();
      context.insert("title", "Log in");
      context.insert("error_message", message);
      context.insert("entered_username", &form.username);

      let html = render_page(&templates, "pages/login.html.tera", &context)?;
      Ok(
        HttpResponse::Unauthorized()
          .content_type("text/html")
          .body(html),
      )
    }
    Err(e) => {
      tracing::error!("Login failed: {}", e);
      Err(actix_web::error::ErrorInternalServerError(
        "Internal server error",
      ))
    }
  }
}

/// Handle logout
///
/// Not behind the access gate: a visitor without a live session is sent
/// home, a logged-in user gets their session destroyed and lands on the
/// login page. A store failure during either step is a 500.
pub async fn logout(
  current_session: web::Data<Arc<CurrentSessionUseCase>>,
  log_out: web::Data<Arc<LogOutUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let Some(cookie) = req.cookie("session_token") else {
    return Ok(
      HttpResponse::Found()
        .insert_header(("Location", "/"))
        .finish(),
    );
  };
  let token = cookie.value().to_string();

  let session = current_session.execute(token.clone()).await.map_err(|e| {
    tracing::error!("Session lookup failed during logout: {}", e);
    actix_web::error::ErrorInternalServerError("Internal server error")
  })?;

  if session.is_none() {
    return Ok(
      HttpResponse::Found()
        .insert_header(("Location", "/"))
        .finish(),
    );
  }

  log_out.execute(token).await.map_err(|e| {
    tracing::error!("Session destroy failed during logout: {}", e);
    actix_web::error::ErrorInternalServerError("Internal server error")
  })?;

  // Expire the cookie along with the session
  let cleared = Cookie::build("session_token", "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(actix_web::cookie::time::Duration::seconds(0))
    .finish();

  Ok(
    HttpResponse::Found()
      .cookie(cleared)
      .insert_header(("Location", "/login"))
      .finish(),
  )
}
