//! Page rendering with the Tera template engine.
//!
//! Templates are looked up by logical name in a fixed table handed to
//! [`TemplateRenderer::new`]; [`BUILTIN_TEMPLATES`] is the table compiled
//! into the binary.

mod filters;

use tera::{Context, Tera};

pub use filters::format_date;

pub const HOME: &str = "home.html";
pub const POST_LIST: &str = "post_list.html";
pub const POST_DETAIL: &str = "post_detail.html";

/// Standalone error page; rendered without the renderer, see `AppError`.
pub const ERROR_PAGE: &str = include_str!("../../templates/error.html");

/// Logical template name to template source.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    (HOME, include_str!("../../templates/home.html")),
    (POST_LIST, include_str!("../../templates/post_list.html")),
    (POST_DETAIL, include_str!("../../templates/post_detail.html")),
];

/// Renders pages from an injected set of templates.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Compile `templates` and register the blog filters.
    pub fn new(templates: &[(&str, &str)]) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;

        tera.register_filter("truncatewords", filters::truncatewords);
        tera.register_filter("linebreaks", filters::linebreaks);
        tera.register_filter("pubdate", filters::pubdate);

        Ok(Self { tera })
    }

    /// Render a template with the given context.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template_name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_compile() {
        let renderer = TemplateRenderer::new(BUILTIN_TEMPLATES).unwrap();
        let html = renderer.render(HOME, &Context::new()).unwrap();
        assert!(html.contains("href=\"/posts/\""));
    }

    #[test]
    fn test_injected_templates_replace_builtins() {
        let renderer = TemplateRenderer::new(&[(HOME, "custom {{ 1 + 1 }}")]).unwrap();
        assert_eq!(renderer.render(HOME, &Context::new()).unwrap(), "custom 2");
        assert!(renderer.render(POST_LIST, &Context::new()).is_err());
    }

    #[test]
    fn test_syntax_errors_surface_at_construction() {
        assert!(TemplateRenderer::new(&[("broken.html", "{% if %}")]).is_err());
    }
}
