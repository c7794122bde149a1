use crate::error::ConfigError;

///
/// SourceSpec
///
/// One configured rule describing which field contributes to the derived
/// key, parsed from `"path[.child][:format]"`. `child` is set when `path`
/// names a to-one relationship and a field on the referenced entity
/// supplies the actual value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceSpec {
    pub path: String,
    pub format: Option<String>,
    pub child: Option<String>,
}

impl SourceSpec {
    /// Parse one `"path[.child][:format]"` configuration string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let (head, format) = match raw.split_once(':') {
            Some((head, format)) if !format.is_empty() => (head, Some(format.to_string())),
            Some((head, _)) => (head, None),
            None => (raw, None),
        };

        // Only the first hop of a dotted path is dereferenced; deeper
        // segments are ignored.
        let mut segments = head.splitn(3, '.');
        let path = segments.next().unwrap_or_default();
        let child = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if path.is_empty() {
            return Err(ConfigError::EmptySourcePath {
                spec: raw.to_string(),
            });
        }

        Ok(Self {
            path: path.to_string(),
            format,
            child,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path() {
        let spec = SourceSpec::parse("title").unwrap();
        assert_eq!(spec.path, "title");
        assert_eq!(spec.format, None);
        assert_eq!(spec.child, None);
    }

    #[test]
    fn path_with_format() {
        let spec = SourceSpec::parse("createdAt:YYYY").unwrap();
        assert_eq!(spec.path, "createdAt");
        assert_eq!(spec.format.as_deref(), Some("YYYY"));
        assert_eq!(spec.child, None);
    }

    #[test]
    fn relationship_child() {
        let spec = SourceSpec::parse("author.name").unwrap();
        assert_eq!(spec.path, "author");
        assert_eq!(spec.child.as_deref(), Some("name"));
    }

    #[test]
    fn relationship_child_with_format() {
        let spec = SourceSpec::parse("author.name:short").unwrap();
        assert_eq!(spec.path, "author");
        assert_eq!(spec.child.as_deref(), Some("name"));
        assert_eq!(spec.format.as_deref(), Some("short"));
    }

    #[test]
    fn deep_segments_beyond_first_hop_are_ignored() {
        let spec = SourceSpec::parse("a.b.c").unwrap();
        assert_eq!(spec.path, "a");
        assert_eq!(spec.child.as_deref(), Some("b"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = SourceSpec::parse("").unwrap_err();
        assert!(matches!(err, ConfigError::EmptySourcePath { .. }));

        let err = SourceSpec::parse(".name").unwrap_err();
        assert!(matches!(err, ConfigError::EmptySourcePath { .. }));
    }

    #[test]
    fn trailing_empty_format_is_dropped() {
        let spec = SourceSpec::parse("title:").unwrap();
        assert_eq!(spec.path, "title");
        assert_eq!(spec.format, None);
    }
}
