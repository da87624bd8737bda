//! DNS verification toolbox for DNS Health
//!
//! 对本地解析器做尽力而为的查询：A 记录和 CNAME 链。
//! 查询失败不会作为错误返回，而是降级为空结果。

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use hickory_resolver::TokioResolver;
pub use services::ToolboxService;
pub use types::DnsResult;
