use std::fmt;

pub const SLUG_SEPARATOR: char = '-';

/// Lowercases `value` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, trimming hyphens at both ends.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;
    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Returns the slug to write when the slug field is still empty.
pub fn autofill_slug(current_slug: &str, name: &str) -> Option<Slug> {
    if !current_slug.is_empty() {
        return None;
    }
    Slug::from_name(name).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn parse(value: &str) -> Result<Self, SlugError> {
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if value.starts_with(SLUG_SEPARATOR) || value.ends_with(SLUG_SEPARATOR) {
            return Err(SlugError::EdgeHyphen);
        }
        let mut previous = None;
        for (idx, ch) in value.chars().enumerate() {
            if ch == SLUG_SEPARATOR && previous == Some(SLUG_SEPARATOR) {
                return Err(SlugError::RepeatedHyphen { index: idx });
            }
            if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == SLUG_SEPARATOR) {
                return Err(SlugError::InvalidCharacter { ch, index: idx });
            }
            previous = Some(ch);
        }
        Ok(Self(value.to_string()))
    }

    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        Self::parse(&slugify(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    Empty,
    EdgeHyphen,
    RepeatedHyphen { index: usize },
    InvalidCharacter { ch: char, index: usize },
}

impl fmt::Display for SlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugError::Empty => write!(f, "slug is empty"),
            SlugError::EdgeHyphen => write!(f, "slug must not start or end with a hyphen"),
            SlugError::RepeatedHyphen { index } => {
                write!(f, "repeated hyphen at position {index}")
            }
            SlugError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
        }
    }
}

impl std::error::Error for SlugError {}
