//! Substring filter builder / 子串过滤条件构建
//!
//! Produces `(f1 LIKE ? ESCAPE '\' OR f2 LIKE ? ...)` over folded shadow
//! columns (`*_lower`, filled with `str::to_lowercase` on write). The term is
//! folded the same way before binding, so matching is case-insensitive for
//! all of Unicode, not just ASCII.

use sqlx::{QueryBuilder, Sqlite};

/// Escape LIKE wildcards so user input matches literally / 转义LIKE通配符
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%term%` pattern with wildcards escaped / 包含匹配模式
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Push a disjunctive case-insensitive substring predicate / 追加OR子串匹配条件
///
/// `fields` must be folded `*_lower` columns. An empty field list pushes
/// `(0)`, which matches nothing.
pub fn push_contains_any(qb: &mut QueryBuilder<'_, Sqlite>, fields: &[&str], term: &str) {
    if fields.is_empty() {
        qb.push("(0)");
        return;
    }

    let pattern = contains_pattern(&term.to_lowercase());
    qb.push("(");
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*field)
            .push(" LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\'");
    }
    qb.push(")");
}
