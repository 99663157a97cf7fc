use std::sync::OnceLock;

/// Backend used when the build does not set `LEXLY_API_BASE`
pub const DEFAULT_API_BASE: &str = "https://lexly-backend.vercel.app/api";

/// Timing and geometry knobs shared by the content script and the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionConfig {
    /// Backend root, without trailing slash
    pub api_base: String,
    /// Quiet period after a pointer release before the selection is inspected
    pub selection_debounce_ms: u32,
    /// Fade-out time before the bubble element is detached
    pub hide_grace_ms: u32,
    /// Dismiss delay after a success or informational toast
    pub info_toast_ms: u32,
    /// Dismiss delay after an error toast
    pub error_toast_ms: u32,
    /// Distance of the bubble above the selection
    pub bubble_offset_px: f64,
    /// Minimum gap between the bubble and the top of the viewport
    pub bubble_top_margin_px: f64,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            selection_debounce_ms: 80,
            hide_grace_ms: 250,
            info_toast_ms: 1800,
            error_toast_ms: 2500,
            bubble_offset_px: 70.0,
            bubble_top_margin_px: 10.0,
        }
    }
}

impl ExtensionConfig {
    /// Build-time configuration. `LEXLY_API_BASE` overrides the backend root.
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("LEXLY_API_BASE"))
    }

    pub fn with_api_base(api_base: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base,
            ..Self::default()
        }
    }
}

/// Computed once per WASM instance
static CONFIG: OnceLock<ExtensionConfig> = OnceLock::new();

pub fn config() -> &'static ExtensionConfig {
    CONFIG.get_or_init(ExtensionConfig::from_build_env)
}

pub fn api_base() -> &'static str {
    config().api_base.as_str()
}
