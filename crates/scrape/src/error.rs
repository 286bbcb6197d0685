// ABOUTME: Error types for the scraping core: ErrorCode enum and ScrapeError struct.
// ABOUTME: Only UnsupportedSite escapes a scrape; Registry covers loading custom site tables.

use std::fmt;

/// Error codes representing the failure categories the core surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnsupportedSite,
    Registry,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::UnsupportedSite => "This website is not supported",
            ErrorCode::Registry => "invalid site registry",
        };
        write!(f, "{}", s)
    }
}

/// The error type for classification, scraping and registry loading.
///
/// `target` is the page address for scrape failures and a short description
/// of the offending entry for registry failures.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub target: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            // Shown verbatim by hosts as the disabling message.
            ErrorCode::UnsupportedSite => write!(f, "{}", self.code),
            ErrorCode::Registry => {
                write!(f, "{} ({})", self.code, self.target)?;
                if let Some(ref src) = self.source {
                    write!(f, ": {}", src)?;
                }
                Ok(())
            }
        }
    }
}

impl ScrapeError {
    /// Create an UnsupportedSite error for the given page address.
    pub fn unsupported_site(address: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::UnsupportedSite,
            target: address.into(),
            source: None,
        }
    }

    /// Create a Registry error.
    pub fn registry(target: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::Registry,
            target: target.into(),
            source,
        }
    }

    /// Returns true if the page's site has no registry entry.
    pub fn is_unsupported_site(&self) -> bool {
        self.code == ErrorCode::UnsupportedSite
    }

    /// Returns true if a site table failed to load.
    pub fn is_registry(&self) -> bool {
        self.code == ErrorCode::Registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unsupported_site_message_is_exact() {
        let err = ScrapeError::unsupported_site("https://example.com/jobs/1");
        assert_eq!(err.to_string(), "This website is not supported");
        assert_eq!(err.target, "https://example.com/jobs/1");
        assert!(err.is_unsupported_site());
        assert!(!err.is_registry());
    }

    #[test]
    fn registry_message_includes_target_and_source() {
        let err = ScrapeError::registry(
            "indeed.com/role",
            Some(anyhow::anyhow!("selector is empty")),
        );
        assert_eq!(
            err.to_string(),
            "invalid site registry (indeed.com/role): selector is empty"
        );
        assert!(err.is_registry());
    }
}
