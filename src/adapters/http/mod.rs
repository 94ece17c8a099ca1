pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

pub use middleware::{AccessGate, RequestIdMiddleware};
pub use routes::{WebRouteDependencies, configure_web_routes};
pub use templates::TemplateEngine;
