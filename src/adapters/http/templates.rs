use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML pages
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Create a new template engine instance
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::new("templates/**/*.html.tera")?;
    tera.autoescape_on(vec!["html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_renders_login_page() {
    let templates = TemplateEngine::new().unwrap();

    let html = templates
      .render("pages/login.html.tera", &tera::Context::new())
      .unwrap();
    assert!(html.contains("<form"));
  }

  #[test]
  fn test_error_message_is_escaped() {
    let templates = TemplateEngine::new().unwrap();

    let mut context = tera::Context::new();
    context.insert("error_message", "<script>alert(1)</script>");

    let html = templates.render("pages/login.html.tera", &context).unwrap();
    assert!(!html.contains("<script>alert(1)</script>"));
  }
}
