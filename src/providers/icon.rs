use crate::core::icon::IconResolver;
use tracing::{debug, instrument};

/// Resolves icon URLs, checking that the asset loads before handing it out.
pub struct HttpIconResolver {
    resolver: IconResolver,
    client: reqwest::Client,
}

impl HttpIconResolver {
    pub fn new(resolver: IconResolver) -> Self {
        Self {
            resolver,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the currency's icon URL, or the fallback icon when it cannot
    /// be loaded.
    #[instrument(name = "IconResolve", skip(self))]
    pub async fn resolve(&self, currency: &str) -> String {
        let url = self.resolver.icon_url(currency);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => url,
            Ok(response) => {
                debug!(status = %response.status(), %url, "Icon missing, using fallback");
                self.resolver.fallback_url()
            }
            Err(e) => {
                debug!(error = %e, %url, "Icon request failed, using fallback");
                self.resolver.fallback_url()
            }
        }
    }
}
