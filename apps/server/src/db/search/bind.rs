//! Bind-parameter helpers shared by the SQL builders.

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i32),
}

/// Push a text bind and return its 1-based `$n` placeholder index.
pub(super) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

/// Push an integer bind and return its 1-based `$n` placeholder index.
pub(super) fn push_int(bind_params: &mut Vec<BindValue>, value: i32) -> usize {
    bind_params.push(BindValue::Int(value));
    bind_params.len()
}
