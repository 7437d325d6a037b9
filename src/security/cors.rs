use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<Method>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
            ],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "Accept".to_string(),
            ],
            allow_credentials: true,
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins
            .into_iter()
            .filter(|origin| {
                let valid = is_valid_origin_format(origin);
                if !valid {
                    warn!("Ignoring malformed CORS origin: {origin}");
                }
                valid
            })
            .collect();
        self
    }

    pub fn build(self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        if origins.is_empty() {
            warn!("No CORS origins configured; cross-origin requests will be refused");
        }

        let headers: Vec<header::HeaderName> = self
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();

        let mut cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(self.allowed_methods)
            .allow_headers(headers)
            .max_age(std::time::Duration::from_secs(self.max_age_secs));

        if self.allow_credentials {
            cors = cors.allow_credentials(true);
        }

        cors
    }
}

fn is_valid_origin_format(origin: &str) -> bool {
    let Some(host) = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    else {
        return false;
    };

    if host.is_empty() || host.contains('/') || host.contains("..") {
        return false;
    }

    let origin_lower = origin.to_lowercase();
    !["<script", "javascript:", "%3c", "%3e"]
        .iter()
        .any(|pattern| origin_lower.contains(pattern))
}

pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    info!("Creating CORS layer for origins: {:?}", allowed_origins);
    CorsConfig::new().with_origins(allowed_origins).build()
}
