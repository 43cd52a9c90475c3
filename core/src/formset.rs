use std::fmt;

pub const IMAGE_PREFIX: &str = "images";
pub const TOTAL_FORMS: &str = "TOTAL_FORMS";
pub const MAX_NUM_FORMS: &str = "MAX_NUM_FORMS";
pub const FEATURED_FIELD: &str = "is_featured";
pub const DELETE_FIELD: &str = "DELETE";

/// A formset field name of the shape `<prefix>-<index>-<field>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName {
    pub prefix: String,
    pub index: usize,
    pub field: String,
}

impl FieldName {
    pub fn new(prefix: &str, index: usize, field: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            index,
            field: field.to_string(),
        }
    }

    pub fn parse(value: &str, prefix: &str) -> Option<Self> {
        let rest = value.strip_prefix(prefix)?.strip_prefix('-')?;
        let (digits, field) = rest.split_once('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || field.is_empty() {
            return None;
        }
        let index = digits.parse().ok()?;
        Some(Self::new(prefix, index, field))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.index, self.field)
    }
}

/// Rewrites every `<prefix>-<digits>-` segment of `value` to carry `index`.
///
/// Works on any attribute derived from a field name, so `id_images-0-alt_text`
/// and `images-0-alt_text` both follow the row.
pub fn reindex(value: &str, prefix: &str, index: usize) -> String {
    let needle = format!("{prefix}-");
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find(&needle) {
        let after = &rest[pos + needle.len()..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && after[digits..].starts_with('-') {
            out.push_str(&rest[..pos]);
            out.push_str(&needle);
            out.push_str(&index.to_string());
            out.push('-');
            rest = &after[digits + 1..];
        } else {
            out.push_str(&rest[..pos + needle.len()]);
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    pub index: usize,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormsetError {
    NoTemplate,
    AtCapacity { max: usize },
}

impl fmt::Display for FormsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormsetError::NoTemplate => write!(f, "no image row to use as a template"),
            FormsetError::AtCapacity { max } => write!(f, "formset already holds {max} rows"),
        }
    }
}

impl std::error::Error for FormsetError {}

/// Row view-models of the product image formset.
#[derive(Debug, Clone)]
pub struct ImageFormset {
    prefix: String,
    rows: Vec<ImageRow>,
    total_forms: usize,
    max_forms: Option<usize>,
}

impl ImageFormset {
    pub fn from_rows(
        prefix: &str,
        featured: &[bool],
        total_forms: usize,
        max_forms: Option<usize>,
    ) -> Self {
        let rows = featured
            .iter()
            .enumerate()
            .map(|(index, featured)| ImageRow {
                index,
                featured: *featured,
            })
            .collect();
        Self {
            prefix: prefix.to_string(),
            rows,
            total_forms,
            max_forms,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ImageRow] {
        &self.rows
    }

    pub fn total_forms(&self) -> usize {
        self.total_forms
    }

    pub fn max_forms(&self) -> Option<usize> {
        self.max_forms
    }

    pub fn management_id(&self, field: &str) -> String {
        format!("id_{}-{}", self.prefix, field)
    }

    pub fn field_name(&self, index: usize, field: &str) -> String {
        FieldName::new(&self.prefix, index, field).to_string()
    }

    pub fn reindex(&self, value: &str, index: usize) -> String {
        reindex(value, &self.prefix, index)
    }

    pub fn row_index(&self, name: &str) -> Option<usize> {
        FieldName::parse(name, &self.prefix).map(|name| name.index)
    }

    /// Index the next row takes when the page reports `total` rows.
    pub fn plan_row(&self, total: usize) -> Result<usize, FormsetError> {
        if self.rows.is_empty() {
            return Err(FormsetError::NoTemplate);
        }
        if let Some(max) = self.max_forms {
            if total >= max {
                return Err(FormsetError::AtCapacity { max });
            }
        }
        Ok(total)
    }

    /// Records a row that was added to the page at `index`.
    pub fn commit_row(&mut self, index: usize) {
        if !self.rows.iter().any(|row| row.index == index) {
            self.rows.push(ImageRow {
                index,
                featured: false,
            });
        }
        self.total_forms = index + 1;
    }

    pub fn add_row(&mut self) -> Result<usize, FormsetError> {
        let index = self.plan_row(self.total_forms)?;
        self.commit_row(index);
        Ok(index)
    }

    /// Replaces the featured flags with the checked state read from the page.
    pub fn sync_featured(&mut self, observed: &[(usize, bool)]) {
        for &(index, checked) in observed {
            match self.rows.iter_mut().find(|row| row.index == index) {
                Some(row) => row.featured = checked,
                None => self.rows.push(ImageRow {
                    index,
                    featured: checked,
                }),
            }
        }
    }

    /// Records the featured checkbox of `index` and returns the rows whose
    /// featured checkbox must be cleared.
    pub fn set_featured(&mut self, index: usize, checked: bool) -> Vec<usize> {
        let mut cleared = Vec::new();
        for row in &mut self.rows {
            if row.index == index {
                row.featured = checked;
            } else if checked && row.featured {
                row.featured = false;
                cleared.push(row.index);
            }
        }
        cleared
    }

    pub fn featured(&self) -> Option<usize> {
        self.rows.iter().find(|row| row.featured).map(|row| row.index)
    }
}
