//! Artifact filters.
//!
//! A filter is a pure predicate over an artifact's coordinate. It narrows the
//! collection delivered to the processor, never the set of artifacts that get
//! resolved: an artifact rejected here is still materialized.
//!
//! Any `Fn(&ArtifactCoordinate) -> bool` is a filter. [`PatternFilter`] covers
//! the common include/exclude case with glob patterns.
//!
//! # Pattern Syntax
//!
//! Patterns are colon-separated glob segments matched against
//! `group:name:version:type:classifier`. Trailing segments may be omitted and
//! then match anything:
//!
//! ```text
//! org.slf4j            every artifact in group org.slf4j
//! com.example:*-api    every *-api artifact of com.example
//! *:*:*:pom            every pom-typed artifact
//! *:*:*:*:sources      every sources classifier
//! ```

use anyhow::{Context, Result, bail};
use glob::Pattern;

use crate::core::ArtifactCoordinate;

/// Predicate deciding whether an artifact is delivered to the processor.
pub trait ArtifactFilter: Send + Sync {
    /// Return `true` to keep the artifact.
    fn keep(&self, coordinate: &ArtifactCoordinate) -> bool;
}

impl<F> ArtifactFilter for F
where
    F: Fn(&ArtifactCoordinate) -> bool + Send + Sync,
{
    fn keep(&self, coordinate: &ArtifactCoordinate) -> bool {
        self(coordinate)
    }
}

/// Evaluate an optional filter; an absent filter keeps everything.
pub fn keeps(filter: Option<&dyn ArtifactFilter>, coordinate: &ArtifactCoordinate) -> bool {
    filter.is_none_or(|filter| filter.keep(coordinate))
}

/// A single `group[:name[:version[:type[:classifier]]]]` glob pattern.
#[derive(Debug, Clone)]
pub struct CoordinatePattern {
    segments: Vec<Pattern>,
    original: String,
}

impl CoordinatePattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern is empty, has more than five
    /// segments, or a segment is not valid glob syntax.
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            bail!("Empty artifact pattern");
        }

        let raw: Vec<&str> = trimmed.split(':').collect();
        if raw.len() > 5 {
            bail!(
                "Artifact pattern '{pattern}' has {} segments; at most 5 (group:name:version:type:classifier) are allowed",
                raw.len()
            );
        }

        let segments = raw
            .iter()
            .map(|segment| {
                Pattern::new(segment)
                    .with_context(|| format!("Invalid glob segment '{segment}' in pattern '{pattern}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            segments,
            original: trimmed.to_string(),
        })
    }

    /// Check whether the coordinate matches every given segment.
    pub fn matches(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.segments
            .iter()
            .zip(coordinate.segments())
            .all(|(pattern, value)| pattern.matches(value))
    }

    /// The pattern text as written.
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

/// Include/exclude filter over coordinate patterns.
///
/// An artifact is kept when it matches at least one include pattern (or the
/// include list is empty) and matches no exclude pattern.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    includes: Vec<CoordinatePattern>,
    excludes: Vec<CoordinatePattern>,
}

impl PatternFilter {
    /// Compile include and exclude patterns.
    pub fn new<I, E>(includes: I, excludes: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let includes = includes
            .into_iter()
            .map(|p| CoordinatePattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let excludes = excludes
            .into_iter()
            .map(|p| CoordinatePattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            includes,
            excludes,
        })
    }

    /// True when the filter keeps everything.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl ArtifactFilter for PatternFilter {
    fn keep(&self, coordinate: &ArtifactCoordinate) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|p| p.matches(coordinate));
        included && !self.excludes.iter().any(|p| p.matches(coordinate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: &str) -> ArtifactCoordinate {
        s.parse().unwrap()
    }

    #[test]
    fn test_group_only_pattern() {
        let pattern = CoordinatePattern::new("org.slf4j").unwrap();
        assert!(pattern.matches(&coord("org.slf4j:slf4j-api:2.0.9")));
        assert!(!pattern.matches(&coord("org.slf4jx:slf4j-api:2.0.9")));
    }

    #[test]
    fn test_wildcard_segments() {
        let pattern = CoordinatePattern::new("com.example:*-api").unwrap();
        assert!(pattern.matches(&coord("com.example:billing-api:1.0")));
        assert!(!pattern.matches(&coord("com.example:billing-impl:1.0")));
    }

    #[test]
    fn test_type_and_classifier_segments() {
        let poms = CoordinatePattern::new("*:*:*:pom").unwrap();
        assert!(poms.matches(&coord("g:parent:1:pom")));
        assert!(!poms.matches(&coord("g:lib:1")));

        let sources = CoordinatePattern::new("*:*:*:*:sources").unwrap();
        assert!(sources.matches(&coord("g:lib:1:jar:sources")));
        assert!(!sources.matches(&coord("g:lib:1")));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(CoordinatePattern::new("").is_err());
        assert!(CoordinatePattern::new("a:b:c:d:e:f").is_err());
        assert!(CoordinatePattern::new("com.[example").is_err());
    }

    #[test]
    fn test_pattern_filter_include_and_exclude() {
        let filter = PatternFilter::new(["com.example"], ["com.example:*-test*"]).unwrap();
        assert!(filter.keep(&coord("com.example:core:1.0")));
        assert!(!filter.keep(&coord("com.example:core-testkit:1.0")));
        assert!(!filter.keep(&coord("org.other:core:1.0")));
    }

    #[test]
    fn test_empty_pattern_filter_keeps_everything() {
        let filter = PatternFilter::new(Vec::<String>::new(), Vec::<String>::new()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.keep(&coord("any:thing:1")));
    }

    #[test]
    fn test_closure_filter_and_absent_filter() {
        let not_a = |c: &ArtifactCoordinate| c.name() != "a";
        assert!(!keeps(Some(&not_a), &coord("g:a:1")));
        assert!(keeps(Some(&not_a), &coord("g:b:1")));
        assert!(keeps(None, &coord("g:a:1")));
    }
}
