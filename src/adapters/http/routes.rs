use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  CurrentSessionUseCase, LogInUseCase, LogOutUseCase, SignUpUseCase,
};
use crate::domain::auth::services::AuthService;

use super::handlers::{pages, web_auth};
use super::middleware::AccessGate;
use super::templates::TemplateEngine;

/// Everything the web routes need, wired once in main
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub auth_service: Arc<AuthService>,
  pub sign_up_use_case: Arc<SignUpUseCase>,
  pub log_in_use_case: Arc<LogInUseCase>,
  pub log_out_use_case: Arc<LogOutUseCase>,
  pub current_session_use_case: Arc<CurrentSessionUseCase>,
}

/// Configure web UI routes
///
/// # Routes
///
/// - GET  /        - Home page, public, session-aware
/// - GET  /about   - Static about page, public
/// - GET  /signup  - Signup page
/// - POST /signup  - Signup form submission (multipart)
/// - GET  /login   - Login page
/// - POST /login   - Login form submission
/// - GET  /profile - Profile page, behind the access gate
/// - POST /logout  - Destroy the current session (not gated)
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates.clone()))
    .app_data(web::Data::new(deps.sign_up_use_case))
    .app_data(web::Data::new(deps.log_in_use_case))
    .app_data(web::Data::new(deps.log_out_use_case))
    .app_data(web::Data::new(deps.current_session_use_case));

  // Public routes
  cfg
    .route("/", web::get().to(pages::home_page))
    .route("/about", web::get().to(pages::about_page))
    .route("/signup", web::get().to(pages::signup_page))
    .route("/signup", web::post().to(web_auth::signup_submit))
    .route("/login", web::get().to(pages::login_page))
    .route("/login", web::post().to(web_auth::login_submit))
    // Logout decides for itself where to send sessionless visitors
    .route("/logout", web::post().to(web_auth::logout));

  // Protected routes
  cfg.service(
    web::scope("/profile")
      .wrap(AccessGate::new(deps.auth_service))
      .app_data(web::Data::new(deps.templates))
      .route("", web::get().to(pages::profile_page)),
  );
}
