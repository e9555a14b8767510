//! Project ids in URLs
//!
//! A project is addressed as `?proyecto=<id>`; a hash such as
//! `#trabajo?proyecto=<id>` is the fallback form. Home is `/`.

use vitrina_ports::{Navigator, ProjectId};

/// URL of the home view
pub const HOME_URL: &str = "/";

/// URL of a project view, with the id percent-encoded
pub fn project_url(param: &str, id: &ProjectId) -> String {
    format!("?{}={}", param, urlencoding::encode(id.as_str()))
}

/// Project id from the query string
pub fn project_from_query<N: Navigator + ?Sized>(navigator: &N, param: &str) -> Option<ProjectId> {
    navigator
        .query_param(param)
        .filter(|id| !id.is_empty())
        .map(ProjectId::new)
}

/// Project id from a `#...<param>=<id>...` fragment
///
/// The key must start the fragment or follow `?`, `&` or `;`, and the
/// value runs to the next `&` or `;`. The value is percent-decoded; a
/// malformed escape is kept as written.
pub fn project_from_hash(hash: &str, param: &str) -> Option<ProjectId> {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    let key = format!("{}=", param);
    let mut search = 0;
    while let Some(found) = hash[search..].find(&key) {
        let start = search + found;
        let at_boundary = start == 0 || matches!(hash.as_bytes()[start - 1], b'?' | b'&' | b';');
        if at_boundary {
            let value = &hash[start + key.len()..];
            let end = value.find(|c: char| c == '&' || c == ';').unwrap_or(value.len());
            let raw = &value[..end];
            if raw.is_empty() {
                return None;
            }
            let id = urlencoding::decode(raw)
                .map(|id| id.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            return Some(ProjectId::new(id));
        }
        search = start + key.len();
    }
    None
}

/// Project id named by the current location: query first, then hash
pub fn project_from_location<N: Navigator + ?Sized>(navigator: &N, param: &str) -> Option<ProjectId> {
    project_from_query(navigator, param).or_else(|| project_from_hash(&navigator.hash(), param))
}

/// Whether an in-page anchor should be intercepted for smooth scrolling
///
/// Anchors that encode a project id are left to the browser.
pub fn is_scroll_anchor(href: &str, param: &str) -> bool {
    href.starts_with('#') && !href.contains(&format!("{}=", param))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_url() {
        assert_eq!(project_url("proyecto", &ProjectId::new("07")), "?proyecto=07");
        assert_eq!(project_url("proyecto", &ProjectId::new("a&b")), "?proyecto=a%26b");
        assert_eq!(project_url("proyecto", &ProjectId::new("año 1")), "?proyecto=a%C3%B1o%201");
    }

    #[test]
    fn test_encoded_id_survives_hash_form() {
        let id = ProjectId::new("a&b=c");
        let url = project_url("proyecto", &id);
        let hash = format!("#trabajo{}&x=1", url);
        assert_eq!(project_from_hash(&hash, "proyecto"), Some(id));
        assert_eq!(
            project_from_hash("#proyecto=%zz", "proyecto").map(|p| p.as_str().to_string()).as_deref(),
            Some("%zz")
        );
    }

    #[test]
    fn test_hash_fallback_forms() {
        let id = |h: &str| project_from_hash(h, "proyecto").map(|p| p.as_str().to_string());
        assert_eq!(id("#proyecto=03").as_deref(), Some("03"));
        assert_eq!(id("#trabajo?proyecto=03&x=1").as_deref(), Some("03"));
        assert_eq!(id("#a=1;proyecto=12").as_deref(), Some("12"));
        assert_eq!(id("#subproyecto=03"), None);
        assert_eq!(id("#subproyecto=03&proyecto=04").as_deref(), Some("04"));
        assert_eq!(id("#proyecto="), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_scroll_anchor_filter() {
        assert!(is_scroll_anchor("#contacto", "proyecto"));
        assert!(is_scroll_anchor("#", "proyecto"));
        assert!(!is_scroll_anchor("#x?proyecto=03", "proyecto"));
        assert!(!is_scroll_anchor("/about", "proyecto"));
    }
}
