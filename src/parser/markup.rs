//! Inline markup stripping for attribute values

/// Characters that open or close inline emphasis and code spans
const MARKERS: [char; 3] = ['*', '_', '`'];

/// Strips any run of whitespace, `*`, `_` and `` ` `` from both ends of the
/// value. Markers inside the value are left alone.
///
/// ```
/// use mdtasks::parser::strip_markup;
///
/// assert_eq!(strip_markup(" _*`my:attribute_*` "), "my:attribute");
/// assert_eq!(strip_markup("snake_case"), "snake_case");
/// ```
pub fn strip_markup(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || MARKERS.contains(&c))
}
