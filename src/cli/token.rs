use chrono::Utc;

use crate::{catalog::CatalogService, error, info, success};

use super::spinner;

/// Makes sure a usable access token exists, optionally forcing a new one.
///
/// The token value itself is never printed.
pub async fn token(service: &CatalogService, refresh: bool) {
    let tokens = service.client().tokens();

    let pb = spinner("Requesting access token...");
    let result = if refresh {
        tokens.refresh_token().await
    } else {
        tokens.get_token().await
    };
    pb.finish_and_clear();

    if let Err(e) = result {
        error!("Failed to obtain access token: {}", e);
    }

    match tokens.current_token().await {
        Some(token) => {
            let remaining = token.expires_at - Utc::now();
            success!("Obtained a new access token.");
            info!(
                "Expires at {} (in {} minutes)",
                token.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
                remaining.num_minutes()
            );
        }
        None => success!("A cached access token is still valid."),
    }
}
