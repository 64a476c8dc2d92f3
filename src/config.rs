use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

/// `<meta name="gym-api-base" content="https://api.example.com">` in index.html
/// overrides everything else, so one build can be pointed at any backend.
const META_NAME: &str = "gym-api-base";
const DEFAULT_BASE: &str = "http://localhost:8081";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base: String,
}

impl ApiConfig {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Reads the deployment meta tag, then `GYM_API_BASE` from build time.
    pub fn from_environment() -> Self {
        let cfg = Self::new(&resolve_base(read_meta_base(), option_env!("GYM_API_BASE")));
        log::info!("gym backend: {}", cfg.base());
        cfg
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn subscriptions_url(&self) -> String {
        format!("{}/api/members/subscriptions", self.base)
    }

    pub fn subscription_url(&self, id: &str) -> String {
        format!(
            "{}/api/members/subscriptions/{}",
            self.base,
            urlencoding::encode(id)
        )
    }

    pub fn register_url(&self) -> String {
        format!("{}/api/gyms/register", self.base)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

fn resolve_base(meta: Option<String>, build_env: Option<&str>) -> String {
    meta.filter(|m| !m.trim().is_empty())
        .or_else(|| {
            build_env
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_BASE.to_string())
}

fn read_meta_base() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let el = document
        .query_selector(&format!("meta[name=\"{META_NAME}\"]"))
        .ok()??;
    let meta = el.dyn_into::<HtmlMetaElement>().ok()?;
    Some(meta.content())
}
