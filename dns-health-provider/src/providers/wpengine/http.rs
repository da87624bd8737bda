//! WP Engine HTTP 请求方法

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{Page, PageParams};

use super::types::WpeErrorResponse;
use super::{WpEngineProvider, WpeListResponse};

impl WpEngineProvider {
    /// 执行 GET 请求，非 2xx 状态映射为 `ProviderError`
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(query);

        let (status, body) =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url).await?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<WpeErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            log::warn!("[{}] API 错误 ({status}): {message}", self.provider_name());
            return Err(self.map_error(RawApiError::new(status, message), context));
        }

        HttpUtils::parse_json(&body, self.provider_name())
    }

    /// 执行分页 GET 请求
    ///
    /// `next` (a URL in the response) only signals whether another page exists; the
    /// following offset is derived from the request parameters.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &PageParams,
        context: ErrorContext,
    ) -> Result<Page<T>> {
        let params = params.validated();
        let query = [
            ("offset", params.offset.to_string()),
            ("limit", params.limit.to_string()),
        ];
        let response: WpeListResponse<T> = self.get(path, &query, context).await?;

        let next = response
            .next
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|_| params.next_page());

        Ok(Page {
            items: response.results,
            total_count: response.count,
            next,
        })
    }
}
