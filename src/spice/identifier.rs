//! SPICE identifier sanitizing.

/// Turn an arbitrary name into a SPICE-safe identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`. Names that start with
/// a digit are prefixed with `<prefix>_`, and missing or empty names become
/// the bare prefix.
pub fn sanitize_identifier(value: Option<&str>, prefix: &str) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return prefix.to_string();
    };

    let sanitized: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}_{}", prefix, sanitized)
    } else {
        sanitized
    }
}
