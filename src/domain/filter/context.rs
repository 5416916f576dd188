use std::str::FromStr;

/// Where the current request is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestContext {
    /// Customer-facing page showing exactly one product.
    StorefrontSingleItem,
    /// Catalog management screens.
    AdminArea,
    /// Async, background or API-style requests.
    #[default]
    BackgroundOrApi,
}

impl RequestContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestContext::StorefrontSingleItem => "storefront-single-item",
            RequestContext::AdminArea => "admin",
            RequestContext::BackgroundOrApi => "background",
        }
    }
}

impl FromStr for RequestContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "storefront-single-item" | "storefront" | "single-product" => {
                Ok(RequestContext::StorefrontSingleItem)
            }
            "admin" | "admin-area" => Ok(RequestContext::AdminArea),
            "background" | "ajax" | "api" | "rest" | "cron" => Ok(RequestContext::BackgroundOrApi),
            other => Err(format!("unknown render context: {}", other)),
        }
    }
}

impl std::fmt::Display for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filtering only ever happens on a storefront single-product view.
pub fn is_filterable_context(ctx: RequestContext) -> bool {
    matches!(ctx, RequestContext::StorefrontSingleItem)
}
