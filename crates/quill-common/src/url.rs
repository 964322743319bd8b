//! URL resolution utilities.
//!
//! [§ 4.2.3 The base element](https://html.spec.whatwg.org/multipage/semantics.html#the-base-element)
//! [URL Standard](https://url.spec.whatwg.org/)

pub use ::url::{ParseError, Url};

/// [§ 2.4 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative URL against a document base URL.
///
/// # Algorithm
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// Both steps are delegated to the URL Standard parser in the `url` crate,
/// which handles protocol-relative references, absolute paths, dot segments,
/// queries and fragments.
///
/// # Errors
///
/// Returns [`ParseError`] if `href` cannot be parsed. A relative `href`
/// with no base fails with [`ParseError::RelativeUrlWithoutBase`].
pub fn resolve_url(href: &str, base_url: Option<&Url>) -> Result<Url, ParseError> {
    let href = href.trim();
    match base_url {
        // STEP 1 + STEP 2: `join` returns `href` unchanged when it is
        // already absolute.
        Some(base) => base.join(href),
        None => Url::parse(href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/docs/page.html").unwrap()
    }

    #[test]
    fn absolute_href_ignores_base() {
        let url = resolve_url("https://other.org/x", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://other.org/x");
    }

    #[test]
    fn relative_path_joins_base_directory() {
        let url = resolve_url("next.html", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "http://example.com/docs/next.html");
    }

    #[test]
    fn absolute_path_keeps_origin() {
        let url = resolve_url("/root.html", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "http://example.com/root.html");
    }

    #[test]
    fn dot_segments_are_normalized() {
        let url = resolve_url("../up.html", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "http://example.com/up.html");
    }

    #[test]
    fn relative_without_base_is_an_error() {
        assert_eq!(
            resolve_url("next.html", None),
            Err(ParseError::RelativeUrlWithoutBase)
        );
    }

    #[test]
    fn malformed_absolute_is_an_error() {
        assert!(resolve_url("http://[::1", None).is_err());
    }
}
