use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Domain, Install, Page, PageParams};

/// Upper bound on pages followed by [`HostingProvider::list_installs`].
///
/// Guards against an API that keeps returning a `next` cursor forever.
pub(crate) const MAX_PAGES: usize = 1000;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Install ID（用于 `InstallNotFound`）
    pub install_id: Option<String>,
}

impl ErrorContext {
    pub fn install(install_id: &str) -> Self {
        Self {
            install_id: Some(install_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: Some(raw.status.to_string()),
            raw_message: raw.message,
        }
    }
}

/// Hosting provider trait
///
/// The source of declared state: which installs exist, which domains they own,
/// and what the provider believes each domain's network status and DNS targets are.
#[async_trait]
pub trait HostingProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 获取单页 install 列表
    ///
    /// Returned installs carry an empty `domains` list; use [`list_domains`](Self::list_domains).
    async fn list_installs_page(&self, params: &PageParams) -> Result<Page<Install>>;

    /// 获取全部 install（跟随 `next` 游标直到最后一页）
    ///
    /// Any page failure aborts the whole listing.
    async fn list_installs(&self) -> Result<Vec<Install>> {
        let mut installs = Vec::new();
        let mut cursor = Some(PageParams::default());
        let mut pages = 0;

        while let Some(params) = cursor {
            if pages >= MAX_PAGES {
                log::warn!(
                    "[{}] Stopped following install pages after {MAX_PAGES} pages",
                    self.id()
                );
                break;
            }
            let page = self.list_installs_page(&params).await?;
            pages += 1;
            log::debug!(
                "[{}] Install page offset={} returned {} of {}",
                self.id(),
                params.offset,
                page.items.len(),
                page.total_count
            );
            installs.extend(page.items);
            cursor = page.next;
        }

        Ok(installs)
    }

    /// 获取 install 下的全部域名
    async fn list_domains(&self, install_id: &str) -> Result<Vec<Domain>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct PagedProvider {
        total: u32,
        requested: Mutex<Vec<PageParams>>,
        fail_at_offset: Option<u32>,
    }

    fn install(n: u32) -> Install {
        Install {
            id: format!("install-{n}"),
            name: format!("site{n}"),
            environment: Some("production".to_string()),
            primary_domain: None,
            cname: None,
            domains: Vec::new(),
        }
    }

    #[async_trait]
    impl HostingProvider for PagedProvider {
        fn id(&self) -> &'static str {
            "paged"
        }

        async fn validate_credentials(&self) -> Result<bool> {
            Ok(true)
        }

        async fn list_installs_page(&self, params: &PageParams) -> Result<Page<Install>> {
            self.requested.lock().unwrap().push(*params);
            if self.fail_at_offset == Some(params.offset) {
                return Err(ProviderError::NetworkError {
                    provider: "paged".to_string(),
                    detail: "boom".to_string(),
                });
            }
            let end = (params.offset + params.limit).min(self.total);
            let items = (params.offset..end).map(install).collect();
            let next = (end < self.total).then(|| params.next_page());
            Ok(Page {
                items,
                total_count: self.total,
                next,
            })
        }

        async fn list_domains(&self, _install_id: &str) -> Result<Vec<Domain>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn list_installs_follows_next_cursor() {
        let provider = PagedProvider {
            total: 250,
            requested: Mutex::new(Vec::new()),
            fail_at_offset: None,
        };

        let installs = provider.list_installs().await.unwrap();

        assert_eq!(installs.len(), 250);
        assert_eq!(installs[0].id, "install-0");
        assert_eq!(installs[249].id, "install-249");
        let offsets: Vec<u32> = provider
            .requested
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.offset)
            .collect();
        assert_eq!(offsets, vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn list_installs_single_empty_page() {
        let provider = PagedProvider {
            total: 0,
            requested: Mutex::new(Vec::new()),
            fail_at_offset: None,
        };

        assert!(provider.list_installs().await.unwrap().is_empty());
        assert_eq!(provider.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_installs_page_failure_aborts() {
        let provider = PagedProvider {
            total: 250,
            requested: Mutex::new(Vec::new()),
            fail_at_offset: Some(100),
        };

        let result = provider.list_installs().await;
        assert!(matches!(result, Err(ProviderError::NetworkError { .. })));
    }
}
