//! Page-token translation between DOS (`page_token` / `next_page_token`) and
//! DSS (`search_after` carried in a `Link: <...>; rel="next"` header).

use tracing::warn;
use url::Url;

/// Query parameter DSS uses as its continuation cursor.
pub const SEARCH_AFTER_PARAM: &str = "search_after";

/// Paging parameters received from a DOS caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl PageRequest {
    pub fn new(page_size: u32, page_token: Option<String>) -> Self {
        Self {
            page_size,
            // An empty token means "first page".
            page_token: page_token.filter(|t| !t.is_empty()),
        }
    }

    /// Upstream query pairs: `per_page` plus `search_after` when continuing.
    pub fn upstream_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("per_page", self.page_size.to_string())];
        if let Some(token) = &self.page_token {
            query.push((SEARCH_AFTER_PARAM, token.clone()));
        }
        query
    }
}

/// Why a `next` link did not yield a token.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NextLinkError {
    #[error("unparseable next link '{link}': {reason}")]
    InvalidUrl { link: String, reason: String },

    #[error("next link '{link}' has no search_after parameter")]
    MissingCursor { link: String },
}

/// Find the target of the link with relation `rel` in a `Link` header value.
pub fn find_link<'a>(header: &'a str, rel: &str) -> Option<&'a str> {
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = &after[..end];

        let tail = &after[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());
        let params = &tail[..params_end];

        let matches = params.split(';').any(|param| {
            let param = param.trim().trim_end_matches(',').trim();
            match param.split_once('=') {
                Some((key, value)) if key.trim().eq_ignore_ascii_case("rel") => value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case(rel)),
                _ => false,
            }
        });
        if matches {
            return Some(target);
        }

        rest = &tail[params_end..];
    }

    None
}

/// Extract the `search_after` value of a DSS next-page link.
pub fn next_page_token(link: &str) -> Result<String, NextLinkError> {
    let url = Url::parse(link).map_err(|e| NextLinkError::InvalidUrl {
        link: link.to_string(),
        reason: e.to_string(),
    })?;

    url.query_pairs()
        .find(|(key, _)| key == SEARCH_AFTER_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| NextLinkError::MissingCursor {
            link: link.to_string(),
        })
}

/// Token for the caller's next page, if the upstream advertised one.
///
/// A malformed link drops the token rather than failing the page.
pub fn next_token_from_link_header(link_header: Option<&str>) -> Option<String> {
    let next = find_link(link_header?, "next")?;
    match next_page_token(next) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!(error = %e, "dropping next page token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_query() {
        let first = PageRequest::new(10, None);
        assert_eq!(first.upstream_query(), vec![("per_page", "10".to_string())]);

        let next = PageRequest::new(25, Some("abc".to_string()));
        assert_eq!(
            next.upstream_query(),
            vec![
                ("per_page", "25".to_string()),
                ("search_after", "abc".to_string())
            ]
        );

        let empty = PageRequest::new(5, Some(String::new()));
        assert_eq!(empty.page_token, None);
    }

    #[test]
    fn test_find_link_picks_rel() {
        let header = r#"<https://dss.test/v1/search?replica=aws&per_page=10&search_after=tok1>; rel="next", <https://dss.test/v1/search?page=last>; rel="last""#;
        assert_eq!(
            find_link(header, "next"),
            Some("https://dss.test/v1/search?replica=aws&per_page=10&search_after=tok1")
        );
        assert_eq!(
            find_link(header, "last"),
            Some("https://dss.test/v1/search?page=last")
        );
        assert_eq!(find_link(header, "prev"), None);
    }

    #[test]
    fn test_find_link_unquoted_and_multi_rel() {
        assert_eq!(find_link("<http://a/b?x=1>; rel=next", "next"), Some("http://a/b?x=1"));
        assert_eq!(
            find_link(r#"<http://a/b>; title="x"; rel="prev next""#, "next"),
            Some("http://a/b")
        );
    }

    #[test]
    fn test_next_token_equals_search_after() {
        let header = "<https://dss.test/v1/search?replica=aws&search_after=1528406270.0%2Cabc>; rel=\"next\"";
        assert_eq!(
            next_token_from_link_header(Some(header)),
            Some("1528406270.0,abc".to_string())
        );
    }

    #[test]
    fn test_next_token_absent() {
        assert_eq!(next_token_from_link_header(None), None);
        assert_eq!(
            next_token_from_link_header(Some("<https://dss.test/x>; rel=\"last\"")),
            None
        );
    }

    #[test]
    fn test_malformed_link_is_dropped() {
        assert_eq!(next_token_from_link_header(Some("<not a url>; rel=\"next\"")), None);
        assert!(matches!(
            next_page_token("not a url"),
            Err(NextLinkError::InvalidUrl { .. })
        ));
        assert_eq!(
            next_page_token("https://dss.test/v1/search?per_page=10"),
            Err(NextLinkError::MissingCursor {
                link: "https://dss.test/v1/search?per_page=10".to_string()
            })
        );
    }
}
