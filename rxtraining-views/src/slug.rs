//! URL slugs for records without a canonical `Slug` field.

/// Derives a slug from a display title.
///
/// ASCII letters and digits are lowercased and kept; every run of other
/// characters becomes a single `-`, never leading or trailing. The result
/// depends on `title` alone.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut separator_pending = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if separator_pending && !slug.is_empty() {
                slug.push('-');
            }
            separator_pending = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            separator_pending = true;
        }
    }

    slug
}
