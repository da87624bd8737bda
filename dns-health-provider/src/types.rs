use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Maximum number of items a single page request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Offset-based pagination parameters for list operations.
///
/// # Default
///
/// The default is `offset = 0, limit = 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Number of items to skip.
    pub offset: u32,
    /// Maximum number of items to return.
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Clamp `limit` to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn validated(&self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Parameters for the page directly after this one.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

/// One page of a paginated listing.
///
/// `next` is the cursor for the following page; `None` marks the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of items across all pages, as reported by the API.
    pub total_count: u32,
    /// Cursor of the next page, if any.
    pub next: Option<PageParams>,
}

impl<T> Page<T> {
    /// A page with no successor.
    pub fn last(items: Vec<T>, total_count: u32) -> Self {
        Self {
            items,
            total_count,
            next: None,
        }
    }
}

// ============ Provider Types ============

/// Credentials for a hosting provider account.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// WP Engine API credentials (HTTP basic auth). Requires feature `wpengine`.
    #[cfg(feature = "wpengine")]
    #[serde(rename = "wpengine")]
    WpEngine {
        /// API username.
        username: String,
        /// API password.
        password: String,
        /// Override of the API base URL (defaults to the public endpoint).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "wpengine")]
            Self::WpEngine {
                username, base_url, ..
            } => f
                .debug_struct("WpEngine")
                .field("username", username)
                .field("password", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

// ============ Install / Domain Types ============

/// A hosted site environment ("install") and the domains attached to it.
///
/// Built wholesale on every listing; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Install {
    /// Provider-side install identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Environment tag (`production`, `staging`, `development`, ...).
    pub environment: Option<String>,
    /// Primary domain of the install.
    pub primary_domain: Option<String>,
    /// Canonical CNAME target the provider assigned to this install.
    pub cname: Option<String>,
    /// Domains owned by this install. Empty until domains are fetched.
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// Network status declared by the provider for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkStatus {
    /// Network is live.
    Active,
    /// Network is being provisioned.
    Pending,
    /// Network was removed.
    Deleted,
    /// Any other value reported by the provider, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl NetworkStatus {
    /// Parse a raw provider value, case-insensitively.
    ///
    /// Blank input means the provider declared nothing and yields `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.to_ascii_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "PENDING" => Self::Pending,
            "DELETED" => Self::Deleted,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl std::fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Pending => write!(f, "PENDING"),
            Self::Deleted => write!(f, "DELETED"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// DNS targets the provider expects a domain to point at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedTargets {
    /// Expected CNAME target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    /// Expected A-record addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub a_records: Vec<String>,
}

impl ExpectedTargets {
    /// Whether the provider declared any target at all.
    pub fn is_empty(&self) -> bool {
        self.cname.is_none() && self.a_records.is_empty()
    }
}

/// A domain attached to an install.
///
/// Names are unique within an install but not across installs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Provider-side domain identifier.
    pub id: String,
    /// Fully qualified name, lower-cased, without trailing dot.
    pub name: String,
    /// Whether this is the install's primary domain.
    pub primary: bool,
    /// Provider network type (`AN`, `GES`, `LEGACY`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
    /// Name of the domain this one redirects to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirects_to: Option<String>,
    /// `true` for provider-internal names, `false` for customer-controlled ones.
    ///
    /// Providers set this only when their API reports it. The refresh pipeline
    /// also sets it for names matching the configured system suffixes.
    pub is_system: bool,
    /// Declared network status; `None` for legacy domains without a network record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_status: Option<NetworkStatus>,
    /// Declared SSL status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_status: Option<String>,
    /// Targets the provider expects DNS to point at.
    #[serde(default)]
    pub expected: ExpectedTargets,
}
