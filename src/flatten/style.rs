//! Separator styles and the path encoder shared by flatten and unflatten

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How a non-root path segment is rendered: `before + middle + key + after`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorStyle {
    pub before: String,
    pub middle: String,
    pub after: String,
}

impl SeparatorStyle {
    pub fn new(
        before: impl Into<String>,
        middle: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        SeparatorStyle {
            before: before.into(),
            middle: middle.into(),
            after: after.into(),
        }
    }

    /// `a.b.0.c`
    pub fn dot() -> Self {
        Self::new("", ".", "")
    }

    /// `a/b/0/c`
    pub fn path() -> Self {
        Self::new("", "/", "")
    }

    /// `a[b][0][c]`
    pub fn rails() -> Self {
        Self::new("[", "", "]")
    }

    /// `a_b_0_c`
    pub fn underscore() -> Self {
        Self::new("", "_", "")
    }

    /// Look up a preset by name: `dot`, `path`, `rails` or `underscore`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dot" => Some(Self::dot()),
            "path" => Some(Self::path()),
            "rails" | "bracket" => Some(Self::rails()),
            "underscore" => Some(Self::underscore()),
            _ => None,
        }
    }

    /// Build the path of `key` below `prefix`.
    ///
    /// Top-level keys are appended to the prefix as-is; every deeper key is
    /// wrapped in the style's separators.
    pub fn encode(&self, top: bool, prefix: &str, key: &str) -> String {
        let mut path = String::with_capacity(
            prefix.len() + self.before.len() + self.middle.len() + key.len() + self.after.len(),
        );
        path.push_str(prefix);
        if top {
            path.push_str(key);
        } else {
            path.push_str(&self.before);
            path.push_str(&self.middle);
            path.push_str(key);
            path.push_str(&self.after);
        }
        path
    }

    /// Split an encoded path back into its segments.
    ///
    /// Inverse of [`encode`](Self::encode) for keys that do not themselves
    /// contain the style's separators.
    pub fn decode(&self, path: &str) -> Result<Vec<String>> {
        let open = format!("{}{}", self.before, self.middle);
        if open.is_empty() {
            return Err(Error::InvalidStyle);
        }
        let close = self.after.as_str();

        let (first, mut rest) = match path.find(&open) {
            Some(idx) => (&path[..idx], &path[idx..]),
            None => (path, ""),
        };
        let mut segments = vec![first.to_string()];

        while let Some(tail) = rest.strip_prefix(open.as_str()) {
            if close.is_empty() {
                let end = tail.find(&open).unwrap_or(tail.len());
                segments.push(tail[..end].to_string());
                rest = &tail[end..];
            } else {
                let end = tail.find(close).ok_or_else(|| {
                    Error::InvalidInput(format!("unterminated segment in `{}`", path))
                })?;
                segments.push(tail[..end].to_string());
                rest = &tail[end + close.len()..];
            }
        }

        if !rest.is_empty() {
            return Err(Error::InvalidInput(format!(
                "unexpected `{}` in `{}`",
                rest, path
            )));
        }

        Ok(segments)
    }
}

/// True for a segment that names a list position (`0`, `17`, ...)
pub(crate) fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_presets() {
        assert_eq!(SeparatorStyle::dot().encode(true, "", "a"), "a");
        assert_eq!(SeparatorStyle::dot().encode(false, "a", "b"), "a.b");
        assert_eq!(SeparatorStyle::path().encode(false, "a", "b"), "a/b");
        assert_eq!(SeparatorStyle::rails().encode(false, "a", "b"), "a[b]");
        assert_eq!(SeparatorStyle::underscore().encode(false, "a", "0"), "a_0");
    }

    #[test]
    fn test_top_level_key_is_appended_to_prefix() {
        assert_eq!(SeparatorStyle::dot().encode(true, "doc", "a"), "doca");
    }

    #[test]
    fn test_decode_dot_and_rails() {
        assert_eq!(
            SeparatorStyle::dot().decode("a.b.0").unwrap(),
            vec!["a", "b", "0"]
        );
        assert_eq!(
            SeparatorStyle::rails().decode("a[b][0]").unwrap(),
            vec!["a", "b", "0"]
        );
        assert_eq!(SeparatorStyle::dot().decode("plain").unwrap(), vec!["plain"]);
    }

    #[test]
    fn test_decode_rejects_malformed_rails_path() {
        assert!(matches!(
            SeparatorStyle::rails().decode("a[b"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            SeparatorStyle::rails().decode("a[b]c"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_needs_an_opening_separator() {
        let style = SeparatorStyle::new("", "", "]");
        assert!(matches!(style.decode("a]"), Err(Error::InvalidStyle)));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(SeparatorStyle::from_name("Rails"), Some(SeparatorStyle::rails()));
        assert_eq!(SeparatorStyle::from_name("nope"), None);
    }

    #[test]
    fn test_index_segment() {
        assert!(is_index_segment("0"));
        assert!(is_index_segment("42"));
        assert!(!is_index_segment(""));
        assert!(!is_index_segment("-1"));
        assert!(!is_index_segment("1.5"));
        assert!(!is_index_segment("C0002"));
    }
}
