//! CORS (Cross-Origin Resource Sharing) middleware configuration

use std::time::Duration;

use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

use crate::config::CorsConfig;

/// Wide-open CORS: `Access-Control-Allow-Origin: *` on every response, any method and header
/// on preflight. The website is static and may be hosted on a different origin than the relay.
pub fn cors_layer_permissive(max_age: Duration) -> TowerCorsLayer {
    TowerCorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(max_age)
}

pub fn cors_layer_from_config(config: &CorsConfig) -> Option<TowerCorsLayer> {
    config
        .enabled
        .then(|| cors_layer_permissive(Duration::from_secs(config.max_age_seconds)))
}
