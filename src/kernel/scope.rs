use super::docs::{LookupSpec, ScopeMap};

/// 从编辑器给出的 scope 路径中取出用于分发的 token
///
/// `text.html.basic source.php.embedded.block.html keyword.other.new.php` -> `php`
pub fn extract_scope(scope_path: &str) -> &str {
    scope_path
        .split_whitespace()
        .last()
        .and_then(|token| token.rsplit('.').next())
        .unwrap_or("")
}

/// Exact match first, then `fallback_scope`. No prefix matching.
pub fn resolve<'a>(scope: &str, map: &'a ScopeMap, fallback_scope: &str) -> Option<&'a LookupSpec> {
    map.get(scope).or_else(|| {
        tracing::debug!(scope, fallback_scope, "scope not mapped, trying fallback");
        map.get(fallback_scope)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/scope.rs"]
mod tests;
