/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOOM_FABRIC_CONTENT_GROUP | Fabric Content | Category group that lists fabric materials |
/// | LOOM_PROTECTED_GROUPS | Fabric Type | Comma list of groups whose rows cannot be removed |
/// | LOOM_SINGLE_SELECT_ATTRIBUTE | Solid / Pattern | Variant attribute limited to one value |
/// | LOOM_DEFAULT_PRODUCT_NAME | Product | Variant name prefix when the article has no name |
/// | LOOM_COMPOSITION_TOTAL | 100 | Required composition total at submit |
/// | LOOM_LOG_LEVEL | info | Log level |
/// | LOOM_LOG_DIR | (unset) | Directory for daily rolling log files |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub fabric_content_group: String,
    pub protected_groups: Vec<String>,
    pub single_select_attribute: String,
    pub default_product_name: String,
    pub composition_total: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
}

pub const DEFAULT_FABRIC_CONTENT_GROUP: &str = "Fabric Content";
pub const DEFAULT_PROTECTED_GROUP: &str = "Fabric Type";
pub const DEFAULT_SINGLE_SELECT_ATTRIBUTE: &str = "Solid / Pattern";
pub const DEFAULT_PRODUCT_NAME: &str = "Product";
pub const DEFAULT_COMPOSITION_TOTAL: u32 = 100;

impl EngineConfig {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            fabric_content_group: std::env::var("LOOM_FABRIC_CONTENT_GROUP")
                .unwrap_or_else(|_| DEFAULT_FABRIC_CONTENT_GROUP.into()),
            protected_groups: std::env::var("LOOM_PROTECTED_GROUPS")
                .map(|v| parse_list(&v))
                .unwrap_or_else(|_| vec![DEFAULT_PROTECTED_GROUP.into()]),
            single_select_attribute: std::env::var("LOOM_SINGLE_SELECT_ATTRIBUTE")
                .unwrap_or_else(|_| DEFAULT_SINGLE_SELECT_ATTRIBUTE.into()),
            default_product_name: std::env::var("LOOM_DEFAULT_PRODUCT_NAME")
                .unwrap_or_else(|_| DEFAULT_PRODUCT_NAME.into()),
            composition_total: std::env::var("LOOM_COMPOSITION_TOTAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COMPOSITION_TOTAL),
            log_level: std::env::var("LOOM_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOOM_LOG_DIR").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Built-in defaults, ignoring the environment
    ///
    /// Mostly for tests.
    pub fn defaults() -> Self {
        Self {
            fabric_content_group: DEFAULT_FABRIC_CONTENT_GROUP.into(),
            protected_groups: vec![DEFAULT_PROTECTED_GROUP.into()],
            single_select_attribute: DEFAULT_SINGLE_SELECT_ATTRIBUTE.into(),
            default_product_name: DEFAULT_PRODUCT_NAME.into(),
            composition_total: DEFAULT_COMPOSITION_TOTAL,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    pub fn with_protected_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_product_name(mut self, name: impl Into<String>) -> Self {
        self.default_product_name = name.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn is_protected_group(&self, group: &str) -> bool {
        self.protected_groups.iter().any(|g| g == group)
    }

    /// Whether `group` is the fabric material group (case-insensitive)
    pub fn is_fabric_content_group(&self, group: &str) -> bool {
        group.eq_ignore_ascii_case(&self.fabric_content_group)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
