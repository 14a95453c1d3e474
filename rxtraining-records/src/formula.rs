//! Filter-formula construction.

/// Quotes `value` as a formula string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Formula matching records whose id is any of `ids`.
///
/// An empty list yields `FALSE()`, which matches nothing.
pub fn record_id_in<S: AsRef<str>>(ids: &[S]) -> String {
    let predicates: Vec<String> = ids
        .iter()
        .map(|id| format!("RECORD_ID()={}", string_literal(id.as_ref())))
        .collect();
    match predicates.len() {
        0 => "FALSE()".to_string(),
        1 => predicates.into_iter().next().unwrap_or_default(),
        _ => format!("OR({})", predicates.join(",")),
    }
}
