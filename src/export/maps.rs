//! Map search links for venues.

use tracing::warn;
use url::Url;

/// Builds a map search link for a venue name and address.
///
/// Returns `None` when both are empty or the base URL does not parse.
///
/// # Example
///
/// ```
/// use meetup_engine::export::maps_url;
///
/// let base = "https://www.google.com/maps/search/";
/// assert_eq!(
///     maps_url(base, Some("Strangeways"), Some("Dallas, TX")).as_deref(),
///     Some("https://www.google.com/maps/search/?api=1&query=Strangeways%2C+Dallas%2C+TX")
/// );
/// assert_eq!(maps_url(base, None, Some("  ")), None);
/// ```
pub fn maps_url(base: &str, name: Option<&str>, address: Option<&str>) -> Option<String> {
    let query = [name, address]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if query.is_empty() {
        return None;
    }

    let mut url = match Url::parse(base) {
        Ok(url) => url,
        Err(e) => {
            warn!(base = %base, error = %e, "Invalid maps base URL");
            return None;
        }
    };
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", &query);
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.google.com/maps/search/";

    #[test]
    fn test_name_only() {
        let link = maps_url(BASE, Some("Magnolia Motor Lounge"), None).unwrap();
        assert_eq!(
            link,
            "https://www.google.com/maps/search/?api=1&query=Magnolia+Motor+Lounge"
        );
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(maps_url(BASE, None, None), None);
        assert_eq!(maps_url(BASE, Some(""), Some("")), None);
    }

    #[test]
    fn test_bad_base_is_none() {
        assert_eq!(maps_url("::", Some("Venue"), None), None);
    }
}
