//! Token icon lookup

use std::collections::HashMap;

pub const DEFAULT_ICON_BASE: &str = "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens";
pub const DEFAULT_FALLBACK_ICON: &str = "SWTH";

/// Wrapped and liquid-staking tokens that reuse their underlying asset's icon.
pub fn default_aliases() -> HashMap<String, String> {
    [
        ("bNEO", "NEO"),
        ("axlUSDC", "USDC"),
        ("ampLUNA", "LUNA"),
        ("wstETH", "ETH"),
    ]
    .into_iter()
    .map(|(code, icon)| (code.to_string(), icon.to_string()))
    .collect()
}

#[derive(Debug, Clone)]
pub struct IconResolver {
    base_url: String,
    fallback: String,
    aliases: HashMap<String, String>,
}

impl IconResolver {
    pub fn new(base_url: &str, fallback: &str, aliases: HashMap<String, String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback: fallback.to_string(),
            aliases,
        }
    }

    pub fn icon_name<'a>(&'a self, currency: &'a str) -> &'a str {
        self.aliases
            .get(currency)
            .map(String::as_str)
            .unwrap_or(currency)
    }

    pub fn icon_url(&self, currency: &str) -> String {
        format!("{}/{}.svg", self.base_url, self.icon_name(currency))
    }

    pub fn fallback_url(&self) -> String {
        format!("{}/{}.svg", self.base_url, self.fallback)
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE, DEFAULT_FALLBACK_ICON, default_aliases())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url_uses_alias() {
        let resolver = IconResolver::default();
        assert_eq!(
            resolver.icon_url("wstETH"),
            format!("{DEFAULT_ICON_BASE}/ETH.svg")
        );
        assert_eq!(
            resolver.icon_url("axlUSDC"),
            format!("{DEFAULT_ICON_BASE}/USDC.svg")
        );
    }

    #[test]
    fn test_icon_url_verbatim() {
        let resolver = IconResolver::new("http://icons.test/", "SWTH", HashMap::new());
        assert_eq!(resolver.icon_url("BLUR"), "http://icons.test/BLUR.svg");
        assert_eq!(resolver.fallback_url(), "http://icons.test/SWTH.svg");
    }
}
