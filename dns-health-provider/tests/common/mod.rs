//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_health_provider::{HostingProvider, ProviderCredentials, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {:?}",
            format_args!($($msg)+),
            res.as_ref().err()
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 测试上下文 - 封装 Provider
pub struct TestContext {
    pub provider: Arc<dyn HostingProvider>,
}

impl TestContext {
    /// 创建 WP Engine 测试上下文
    pub fn wpengine() -> Option<Self> {
        let username = env::var("WPE_API_USER").ok()?;
        let password = env::var("WPE_API_PASSWORD").ok()?;

        let credentials = ProviderCredentials::WpEngine {
            username,
            password,
            base_url: env::var("WPE_API_BASE_URL").ok(),
        };
        let provider = create_provider(credentials).ok()?;

        Some(Self { provider })
    }
}
