use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// Names from the root's child down to a node. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, `None` for the root.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl FromStr for CategoryPath {
    type Err = EngineError;

    /// Parses `Education/Programming`. `""` and `"/"` are the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(EngineError::Invalid(format!(
                    "Category path '{}' has an empty segment",
                    s
                )));
            }
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_path() {
        let path: CategoryPath = "Education/Programming".parse().unwrap();
        assert_eq!(path.segments(), ["Education", "Programming"]);
        assert_eq!(path.leaf(), Some("Programming"));
        assert_eq!(path.to_string(), "Education/Programming");

        assert!("".parse::<CategoryPath>().unwrap().is_root());
        assert!("/".parse::<CategoryPath>().unwrap().is_root());
        assert_eq!(
            "/Technology/".parse::<CategoryPath>().unwrap(),
            CategoryPath::from_iter(["Technology"])
        );
        assert!(matches!(
            "Education//Programming".parse::<CategoryPath>(),
            Err(EngineError::Invalid(_))
        ));
    }

    #[test]
    fn test_child_path() {
        let path = CategoryPath::root().child("Education").child("Programming");
        assert_eq!(path.to_string(), "Education/Programming");
        assert_eq!(CategoryPath::root().to_string(), "/");
    }
}
