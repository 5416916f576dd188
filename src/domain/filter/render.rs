use crate::domain::catalog::CategoryRecord;

/// Class marking the labeled category wrapper in storefront markup.
const POSTED_IN_CLASS: &str = "posted_in";

fn category_label(count: usize) -> &'static str {
    if count == 1 {
        "Category:"
    } else {
        "Categories:"
    }
}

const FILTERED_LABEL: &str = "Categories (filtered):";

/// Only http(s) and relative URLs make it into an href.
fn safe_href(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(parsed.to_string()),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

/// Anchor tags for every record with a usable link, in record order.
fn category_links(records: &[CategoryRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| {
            let href = safe_href(record.link.as_deref()?)?;
            Some(format!(
                r#"<a href="{}">{}</a>"#,
                html_escape::encode_double_quoted_attribute(&href),
                html_escape::encode_text(&record.name)
            ))
        })
        .collect()
}

/// Rebuild a category link list from already-filtered records.
///
/// Reuses the labeled `posted_in` wrapper when the original markup had one.
/// Returns an empty string, not an empty wrapper, when no link remains.
pub fn render_category_list(records: &[CategoryRecord], original_markup: &str) -> String {
    let links = category_links(records);
    if links.is_empty() {
        return String::new();
    }

    if original_markup.contains(POSTED_IN_CLASS) {
        format!(
            r#"<span class="posted_in">{} {}</span>"#,
            category_label(links.len()),
            links.join(", ")
        )
    } else {
        links.join(", ")
    }
}

/// Block appended at the end of the product metadata section.
pub fn render_product_meta(records: &[CategoryRecord]) -> String {
    let links = category_links(records);
    if links.is_empty() {
        return String::new();
    }

    format!(
        r#"<div class="product_meta category-exclusions"><span class="posted_in category-exclusions__categories">{} {}</span></div>"#,
        FILTERED_LABEL,
        links.join(", ")
    )
}
