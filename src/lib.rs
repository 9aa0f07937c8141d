mod cache;
mod config;
mod error;
mod escape;
mod markup;
mod pipeline;
mod stage;

pub use cache::RenderCache;
pub use config::{ClassConfig, Config, LinksConfig};
pub use error::{Error, Result};
pub use escape::escape_html;
pub use markup::Element;
pub use pipeline::Renderer;
pub use stage::{Stage, StageContext};

/// Render an assistant message to markup using the default config.
pub fn render(text: &str) -> String {
    render_with_config(text, &Config::compiled_default())
}

/// Render a possibly missing message; `None` yields an empty string.
pub fn render_option(text: Option<&str>) -> String {
    text.map(render).unwrap_or_default()
}

/// Render an assistant message to markup with custom config.
pub fn render_with_config(text: &str, config: &Config) -> String {
    Renderer::new(config.clone()).render(text)
}
