//! DNS 查询模块

use hickory_resolver::TokioResolver;
use hickory_resolver::proto::rr::RecordType;

use crate::types::DnsResult;

/// 规范化名称：去空白、小写、去掉末尾的点
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

/// 尽力而为的查询：A 记录 + CNAME 链
///
/// 任意一种查询失败（NXDOMAIN、超时、解析器错误）都只记录 debug 日志，
/// 对应列表保持为空。
pub(crate) async fn resolve_domain(resolver: &TokioResolver, name: &str) -> DnsResult {
    let name = normalize_name(name);
    if name.is_empty() {
        return DnsResult::unresolved();
    }

    let mut a_records = Vec::new();
    let mut cnames = Vec::new();

    match resolver.ipv4_lookup(name.as_str()).await {
        Ok(response) => {
            // answer 段里同时包含 CNAME 链和最终的 A 记录
            for record in response.as_lookup().record_iter() {
                if let Some(cname) = record.data().as_cname() {
                    push_unique(&mut cnames, normalize_name(&cname.0.to_string()));
                } else if let Some(a) = record.data().as_a() {
                    push_unique(&mut a_records, a.0.to_string());
                }
            }
        }
        Err(e) => log::debug!("A lookup failed for {name}: {e}"),
    }

    if cnames.is_empty() {
        match resolver.lookup(name.as_str(), RecordType::CNAME).await {
            Ok(response) => {
                for record in response.record_iter() {
                    if let Some(cname) = record.data().as_cname() {
                        push_unique(&mut cnames, normalize_name(&cname.0.to_string()));
                    }
                }
            }
            Err(e) => log::debug!("CNAME lookup failed for {name}: {e}"),
        }
    }

    DnsResult::new(a_records, cnames)
}
