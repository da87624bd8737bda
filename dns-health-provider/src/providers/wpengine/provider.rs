//! WP Engine HostingProvider trait 实现

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, HostingProvider, MAX_PAGES, ProviderErrorMapper};
use crate::types::{Domain, ExpectedTargets, Install, NetworkStatus, Page, PageParams};

use super::{WpEngineProvider, WpeDomain, WpeInstall};

impl WpEngineProvider {
    pub(crate) fn wpe_install_to_install(install: WpeInstall) -> Install {
        Install {
            id: install.id,
            name: install.name,
            environment: install.environment.filter(|e| !e.is_empty()),
            primary_domain: install
                .primary_domain
                .map(|d| normalize_domain_name(&d))
                .filter(|d| !d.is_empty()),
            cname: install
                .cname
                .map(|c| normalize_domain_name(&c))
                .filter(|c| !c.is_empty()),
            domains: Vec::new(),
        }
    }

    /// 将 WP Engine 域名转换为 `Domain`
    /// 网络状态：ACTIVE, PENDING, DELETED；legacy 域名没有 network_details
    ///
    /// The API carries no internal-domain flag, so `is_system` stays `false`;
    /// system domains are recognised by the configured fingerprints.
    pub(crate) fn wpe_domain_to_domain(domain: WpeDomain) -> Domain {
        let name = normalize_domain_name(&domain.name);

        let details = domain.network_details.unwrap_or_default();
        let dns_config = details.dns_config_info.unwrap_or_default();
        let network_info = details.network_info.unwrap_or_default();

        let expected = ExpectedTargets {
            cname: dns_config
                .cname
                .map(|c| normalize_domain_name(&c))
                .filter(|c| !c.is_empty()),
            a_records: dns_config
                .a_records
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        };

        Domain {
            id: domain.id,
            name,
            primary: domain.primary,
            network_type: domain.network_type.filter(|t| !t.is_empty()),
            redirects_to: domain.redirects_to.and_then(|r| r.name),
            is_system: false,
            network_status: network_info
                .status
                .as_deref()
                .and_then(NetworkStatus::from_raw),
            ssl_status: network_info.ssl.and_then(|s| s.status),
            expected,
        }
    }
}

#[async_trait]
impl HostingProvider for WpEngineProvider {
    fn id(&self) -> &'static str {
        "wpengine"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct UserResponse {
            #[allow(dead_code)]
            id: Option<String>,
        }

        match self
            .get::<UserResponse>("/user", &[], ErrorContext::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(crate::ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_installs_page(&self, params: &PageParams) -> Result<Page<Install>> {
        let page: Page<WpeInstall> = self
            .get_page("/installs", params, ErrorContext::default())
            .await?;

        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(Self::wpe_install_to_install)
                .collect(),
            total_count: page.total_count,
            next: page.next,
        })
    }

    async fn list_domains(&self, install_id: &str) -> Result<Vec<Domain>> {
        let path = format!("/installs/{}/domains", urlencoding::encode(install_id));
        let mut domains = Vec::new();
        let mut cursor = Some(PageParams::default());
        let mut pages = 0;

        while let Some(params) = cursor {
            if pages >= MAX_PAGES {
                log::warn!(
                    "[{}] Stopped following domain pages for install {install_id}",
                    self.provider_name()
                );
                break;
            }
            let page: Page<WpeDomain> = self
                .get_page(&path, &params, ErrorContext::install(install_id))
                .await?;
            pages += 1;
            domains.extend(page.items.into_iter().map(Self::wpe_domain_to_domain));
            cursor = page.next;
        }

        log::debug!(
            "[{}] Install {install_id} has {} domains",
            self.provider_name(),
            domains.len()
        );
        Ok(domains)
    }
}
