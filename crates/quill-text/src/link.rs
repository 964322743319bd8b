//! Hyperlink activation.
//!
//! A rendering surface reports activated links as raw `href` strings. The
//! [`LinkBridge`] resolves them against the document base and hands the
//! result to the document's [`LinkOpener`], if there is one.

use std::fmt;
use std::rc::Rc;

use quill_common::url::{ParseError, Url, resolve_url};
use quill_common::warning::warn_once;
use thiserror::Error;

/// Document-level collaborator that opens resolved links.
pub trait LinkOpener {
    /// Open `url`, typically by navigating the owning document.
    fn open_link(&self, url: &Url);
}

/// Why a link target could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The target does not parse as a URL, alone or against the base.
    #[error("malformed link target {href:?}: {source}")]
    Malformed {
        /// The raw target.
        href: String,
        /// What the URL parser rejected.
        #[source]
        source: ParseError,
    },
}

/// What happened to an activated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The target was resolved and handed to the opener.
    Opened(Url),
    /// No opener is registered; nothing happened.
    NoOpener,
    /// The target was malformed and has been reported.
    Malformed(LinkError),
}

/// Resolves activated links and forwards them to an opener.
#[derive(Clone, Default)]
pub struct LinkBridge {
    base_url: Option<Url>,
    opener: Option<Rc<dyn LinkOpener>>,
}

impl fmt::Debug for LinkBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkBridge")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("has_opener", &self.opener.is_some())
            .finish()
    }
}

impl LinkBridge {
    /// A bridge resolving against `base_url` and opening through `opener`.
    #[must_use]
    pub fn new(base_url: Option<Url>, opener: Option<Rc<dyn LinkOpener>>) -> Self {
        Self { base_url, opener }
    }

    /// The document base links resolve against.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Register or replace the opener.
    pub fn set_opener(&mut self, opener: Option<Rc<dyn LinkOpener>>) {
        self.opener = opener;
    }

    /// Handle activation of the link with target `href`.
    ///
    /// Without an opener this is a silent no-op and the target is not even
    /// parsed. A malformed target is reported once through the warning log
    /// and otherwise ignored.
    #[must_use]
    pub fn activate(&self, href: &str) -> LinkOutcome {
        let Some(opener) = &self.opener else {
            return LinkOutcome::NoOpener;
        };
        match resolve_url(href, self.base_url.as_ref()) {
            Ok(url) => {
                tracing::debug!(%url, "opening link");
                opener.open_link(&url);
                LinkOutcome::Opened(url)
            }
            Err(source) => {
                let error = LinkError::Malformed {
                    href: href.to_string(),
                    source,
                };
                let _ = warn_once("Link", &error.to_string());
                LinkOutcome::Malformed(error)
            }
        }
    }
}
