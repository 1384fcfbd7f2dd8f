//! Destination filename derivation and sanitization.

use crate::manifest::WorkItem;

/// Builds the destination filename for a manifest entry.
///
/// Pattern: `{spec_id}_{country}_{language}_{product}.pdf`, with spaces in
/// the product name replaced by underscores, then sanitized.
#[must_use]
pub fn destination_filename(item: &WorkItem) -> String {
    let product = item.product_name.replace(' ', "_");
    sanitize_filename(&format!(
        "{}_{}_{}_{}.pdf",
        item.spec_id, item.country_code, item.language_code, product
    ))
}

/// Sanitizes a filename by removing problematic characters.
///
/// Keeps alphanumerics, `_`, `-`, `.`, and spaces; trims trailing
/// whitespace. Lossy: distinct inputs can sanitize to the same name.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
        .collect::<String>()
        .trim_end()
        .to_string()
}
