use crate::utils::error::IntegrationError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    /// Array position, negative values count from the end (`-1` is the last element).
    Index(isize),
    /// `[*]`, every element of an array.
    Wildcard,
}

/// A parsed field path such as `awards[0].suppliers[*].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }

    fn invalid(path: &str, reason: impl Into<String>) -> IntegrationError {
        IntegrationError::InvalidPathError {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// 解析單一段落，例如 `awards[0][-1]`
    fn parse_part(path: &str, part: &str, segments: &mut Vec<Segment>) -> Result<(), IntegrationError> {
        let (key, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };

        if key.is_empty() && rest.is_empty() {
            return Err(Self::invalid(path, "empty segment"));
        }
        if key.contains(']') {
            return Err(Self::invalid(path, format!("unexpected ']' in '{}'", part)));
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key.to_string()));
        }

        while !rest.is_empty() {
            let inner_end = rest
                .find(']')
                .ok_or_else(|| Self::invalid(path, format!("unclosed '[' in '{}'", part)))?;
            let inner = &rest[1..inner_end];

            let segment = match inner {
                "*" => Segment::Wildcard,
                "" => return Err(Self::invalid(path, format!("empty index in '{}'", part))),
                n => n.parse::<isize>().map(Segment::Index).map_err(|_| {
                    Self::invalid(path, format!("index '{}' is not an integer", n))
                })?,
            };
            segments.push(segment);

            rest = &rest[inner_end + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(Self::invalid(path, format!("unexpected '{}' after index", rest)));
            }
        }

        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Self::invalid(s, "path is empty"));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            Self::parse_part(trimmed, part, &mut segments)?;
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
