// src/services/renderer.rs

//! Structure depiction adapter.
//!
//! The catalog never talks to a depiction toolkit directly. It holds a
//! [`RendererHandle`], which lazily initializes a [`StructureRenderer`] the
//! first time a depiction is requested. Concurrent first requests share one
//! initialization; a failed initialization is retried on the next request.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tokio::sync::OnceCell;

use crate::error::{AppError, Result};
use crate::models::RenderConfig;
use crate::utils::http::{create_async_client, encode_query_value};

/// A rendered 2D structure as SVG markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depiction {
    svg: String,
}

impl Depiction {
    /// Markup shorter than this is treated as a broken depiction.
    pub const MIN_SVG_LEN: usize = 100;

    /// Wrap SVG markup, rejecting output that is not a usable depiction.
    pub fn from_svg(svg: impl Into<String>) -> Result<Self> {
        let svg = svg.into();
        if !svg.contains("<svg") {
            return Err(AppError::render("depiction", "output is not SVG markup"));
        }
        if svg.len() < Self::MIN_SVG_LEN {
            return Err(AppError::render(
                "depiction",
                format!("generated SVG is too short ({} bytes)", svg.len()),
            ));
        }
        Ok(Self { svg })
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }

    /// Make the root `<svg>` element scale to its container.
    pub fn fit_to_container(self) -> Self {
        let Some(start) = self.svg.find("<svg") else {
            return self;
        };
        let Some(len) = self.svg[start..].find('>') else {
            return self;
        };
        let end = start + len;

        let mut tag = self.svg[start..end].to_string();
        for name in ["width", "height"] {
            tag = set_attribute(&tag, name, "100%");
        }

        Self {
            svg: format!("{}{}{}", &self.svg[..start], tag, &self.svg[end..]),
        }
    }
}

fn set_attribute(tag: &str, name: &str, value: &str) -> String {
    let pattern = format!(r#"(\s){name}\s*=\s*("[^"]*"|'[^']*')"#);
    match Regex::new(&pattern) {
        Ok(re) if re.is_match(tag) => re
            .replace(tag, format!(r#"${{1}}{name}="{value}""#))
            .into_owned(),
        _ => match tag.strip_suffix('/') {
            Some(open) => format!(r#"{open} {name}="{value}"/"#),
            None => format!(r#"{tag} {name}="{value}""#),
        },
    }
}

/// Anything that can turn a SMILES string into a depiction.
#[async_trait]
pub trait StructureRenderer: Send + Sync {
    async fn render(&self, structure: &str) -> Result<Depiction>;
}

/// Produces the renderer on first use.
#[async_trait]
pub trait RendererLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn StructureRenderer>>;
}

/// Loader for a renderer that is already constructed.
struct Ready(Arc<dyn StructureRenderer>);

#[async_trait]
impl RendererLoader for Ready {
    async fn load(&self) -> Result<Arc<dyn StructureRenderer>> {
        Ok(Arc::clone(&self.0))
    }
}

struct HandleInner {
    loader: Box<dyn RendererLoader>,
    renderer: OnceCell<Arc<dyn StructureRenderer>>,
}

/// Shared, lazily initialized access to a structure renderer.
///
/// Cloning the handle shares the same renderer.
#[derive(Clone)]
pub struct RendererHandle {
    inner: Arc<HandleInner>,
}

impl RendererHandle {
    pub fn new(loader: impl RendererLoader + 'static) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                loader: Box::new(loader),
                renderer: OnceCell::new(),
            }),
        }
    }

    /// Handle around an existing renderer.
    pub fn ready(renderer: Arc<dyn StructureRenderer>) -> Self {
        Self::new(Ready(renderer))
    }

    /// Handle backed by the HTTP depiction service.
    pub fn http(config: RenderConfig) -> Self {
        Self::new(HttpRendererLoader::new(config))
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.renderer.initialized()
    }

    /// Get the renderer, initializing it if this is the first use.
    pub async fn renderer(&self) -> Result<Arc<dyn StructureRenderer>> {
        let renderer = self
            .inner
            .renderer
            .get_or_try_init(|| async {
                log::debug!("Initializing structure renderer");
                self.inner.loader.load().await
            })
            .await
            .inspect_err(|e| log::warn!("Structure renderer unavailable: {}", e))?;
        Ok(Arc::clone(renderer))
    }

    pub async fn render(&self, structure: &str) -> Result<Depiction> {
        self.renderer().await?.render(structure).await
    }
}

/// Renderer backed by a depiction web service returning SVG.
pub struct HttpRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderer {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Request URL for a SMILES string.
    pub fn request_url(&self, structure: &str) -> String {
        self.endpoint
            .replace("{smiles}", &encode_query_value(structure))
    }
}

#[async_trait]
impl StructureRenderer for HttpRenderer {
    async fn render(&self, structure: &str) -> Result<Depiction> {
        if structure.trim().is_empty() {
            return Err(AppError::render("structure", "empty SMILES string"));
        }

        let url = self.request_url(structure);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        Depiction::from_svg(body)
            .map_err(|e| AppError::render(structure, format!("invalid depiction: {e}")))
    }
}

/// Builds an [`HttpRenderer`] after checking the endpoint template.
pub struct HttpRendererLoader {
    config: RenderConfig,
}

impl HttpRendererLoader {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl RendererLoader for HttpRendererLoader {
    async fn load(&self) -> Result<Arc<dyn StructureRenderer>> {
        if !self.config.endpoint.contains("{smiles}") {
            return Err(AppError::config(
                "render.endpoint must contain a {smiles} placeholder",
            ));
        }
        let sample_url = self.config.endpoint.replace("{smiles}", "C");
        url::Url::parse(&sample_url)?;

        let renderer = HttpRenderer::new(&self.config)?;
        log::info!("Structure renderer ready ({})", self.config.endpoint);
        Ok(Arc::new(renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const SVG: &str = r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="250px" height='200px' viewBox="0 0 250 200"><path d="M 10 10 L 20 20" stroke-width="2"/></svg>"#;

    struct EchoRenderer;

    #[async_trait]
    impl StructureRenderer for EchoRenderer {
        async fn render(&self, structure: &str) -> Result<Depiction> {
            if structure == "invalid" {
                return Err(AppError::render(structure, "Invalid SMILES string"));
            }
            Depiction::from_svg(SVG)
        }
    }

    struct CountingLoader {
        loads: Arc<AtomicUsize>,
        fail_first: bool,
    }

    #[async_trait]
    impl RendererLoader for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn StructureRenderer>> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && attempt == 0 {
                return Err(AppError::render("loader", "toolkit failed to load"));
            }
            Ok(Arc::new(EchoRenderer))
        }
    }

    #[test]
    fn test_depiction_validation() {
        assert!(Depiction::from_svg(SVG).is_ok());
        assert!(Depiction::from_svg("<svg></svg>").is_err());
        assert!(Depiction::from_svg("x".repeat(200)).is_err());
    }

    #[test]
    fn test_fit_to_container() {
        let fitted = Depiction::from_svg(SVG).unwrap().fit_to_container();
        let svg = fitted.svg();
        assert!(svg.contains(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%""#));
        // Nested attributes are untouched
        assert!(svg.contains(r#"stroke-width="2""#));
        assert!(svg.starts_with(r#"<?xml version="1.0"?>"#));
    }

    #[test]
    fn test_fit_to_container_adds_missing_attributes() {
        let raw = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">{}</svg>"#,
            "<g/>".repeat(20)
        );
        let fitted = Depiction::from_svg(raw).unwrap().fit_to_container();
        assert!(fitted.svg().starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="100%" height="100%">"#
        ));
    }

    #[tokio::test]
    async fn test_concurrent_first_use_initializes_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = RendererHandle::new(CountingLoader {
            loads: Arc::clone(&loads),
            fail_first: false,
        });
        assert!(!handle.is_initialized());

        let results =
            futures::future::join_all((0..8).map(|_| handle.render("CCO"))).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(handle.is_initialized());
    }

    #[tokio::test]
    async fn test_failed_initialization_is_retried() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = RendererHandle::new(CountingLoader {
            loads: Arc::clone(&loads),
            fail_first: true,
        });

        assert!(handle.render("CCO").await.is_err());
        assert!(!handle.is_initialized());
        assert!(handle.render("CCO").await.is_ok());
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clones_share_renderer() {
        let loads = Arc::new(AtomicUsize::new(0));
        let handle = RendererHandle::new(CountingLoader {
            loads: Arc::clone(&loads),
            fail_first: false,
        });
        let clone = handle.clone();

        handle.render("C").await.unwrap();
        clone.render("CC").await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_error_passes_through() {
        let handle = RendererHandle::ready(Arc::new(EchoRenderer));
        let err = handle.render("invalid").await.unwrap_err();
        assert!(err.to_string().contains("Invalid SMILES string"));
    }

    #[test]
    fn test_http_request_url() {
        let renderer = HttpRenderer::new(&RenderConfig::default()).unwrap();
        assert_eq!(
            renderer.request_url("C=O"),
            "https://www.simolecule.com/cdkdepict/depict/bow/svg?smi=C%3DO"
        );
    }

    #[tokio::test]
    async fn test_http_loader_rejects_bad_endpoint() {
        let config = RenderConfig {
            endpoint: "not a url {smiles}".to_string(),
            ..RenderConfig::default()
        };
        let handle = RendererHandle::http(config);
        assert!(handle.render("C").await.is_err());
        assert!(!handle.is_initialized());
    }
}
