//! Public Path Allow-List
//!
//! Exact paths plus `:param` placeholders matching one path segment.

use regex::Regex;

use crate::domain::GateError;

/// Routes reachable without a session
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/create-account",
    "/forgot-password",
    "/auth/callback",
    "/auth/reset-password",
    "/auth/auth-error",
    "/profile/:id",
];

/// Compiled, anchored allow-list
#[derive(Debug, Clone)]
pub struct PublicPaths {
    patterns: Vec<Regex>,
}

/// `"/profile/:id"` -> `^/profile/[^/]+$`
fn compile(path: &str) -> Result<Regex, GateError> {
    let pattern = path
        .split('/')
        .map(|segment| {
            if segment.starts_with(':') {
                "[^/]+".to_string()
            } else {
                regex::escape(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    let pattern = format!("^{}$", pattern);
    Regex::new(&pattern).map_err(|source| GateError::InvalidPattern { pattern, source })
}

impl PublicPaths {
    pub fn new(paths: &[&str]) -> Result<Self, GateError> {
        let patterns = paths.iter().map(|p| compile(p)).collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PublicPaths {
        PublicPaths::new(PUBLIC_PATHS).unwrap()
    }

    #[test]
    fn test_exact_paths() {
        let paths = defaults();
        assert!(paths.is_public("/"));
        assert!(paths.is_public("/login"));
        assert!(paths.is_public("/auth/callback"));
        assert!(!paths.is_public("/projects"));
        assert!(!paths.is_public("/login/extra"));
        assert!(!paths.is_public("/loginx"));
    }

    #[test]
    fn test_single_segment_wildcard() {
        let paths = defaults();
        assert!(paths.is_public("/profile/42"));
        assert!(paths.is_public("/profile/ab-cd"));
        assert!(!paths.is_public("/profile/"));
        assert!(!paths.is_public("/profile/42/edit"));
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let paths = PublicPaths::new(&["/a.b"]).unwrap();
        assert!(paths.is_public("/a.b"));
        assert!(!paths.is_public("/axb"));
    }
}
