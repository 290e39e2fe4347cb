use std::collections::HashSet;

use thiserror::Error;

use super::layout::FormLayout;

/// Structural errors in a configured form layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("field name cannot be empty")]
    EmptyFieldName,
    #[error("field name cannot contain whitespace: {0:?}")]
    InvalidFieldName(String),
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    #[error("category id cannot be empty")]
    EmptyCategory,
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),
    #[error("section tagged with unknown category: {0}")]
    UnknownCategory(String),
    #[error("more than one section tagged with category: {0}")]
    DuplicateSection(String),
    #[error("expected exactly one untagged fallback section, found {0}")]
    FallbackCount(usize),
    #[error("fallback section has no fields")]
    EmptyFallback,
}

/// Validates a field name: must be non-empty and free of whitespace.
pub fn validate_field_name(name: &str) -> Result<(), LayoutError> {
    if name.is_empty() {
        Err(LayoutError::EmptyFieldName)
    } else if name.chars().any(char::is_whitespace) {
        Err(LayoutError::InvalidFieldName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Checks the invariants the controller relies on.
///
/// Field names (including the selector's) are unique, every section tag names
/// a configured category, no category tags more than one section, and exactly
/// one untagged section with at least one field exists.
pub fn validate_layout(layout: &FormLayout) -> Result<(), LayoutError> {
    let mut categories = HashSet::new();
    for category in &layout.selector.categories {
        if category.id.is_empty() {
            return Err(LayoutError::EmptyCategory);
        }
        if !categories.insert(category.id.as_str()) {
            return Err(LayoutError::DuplicateCategory(category.id.clone()));
        }
    }

    let mut names = HashSet::new();
    validate_field_name(&layout.selector.name)?;
    names.insert(layout.selector.name.as_str());
    let section_fields = layout.sections.iter().flat_map(|s| s.fields.iter());
    for field in layout.general.iter().chain(section_fields) {
        validate_field_name(&field.name)?;
        if !names.insert(field.name.as_str()) {
            return Err(LayoutError::DuplicateField(field.name.clone()));
        }
    }

    let mut tagged = HashSet::new();
    let mut fallbacks = 0;
    for section in &layout.sections {
        match &section.category {
            Some(tag) if !categories.contains(tag.as_str()) => {
                return Err(LayoutError::UnknownCategory(tag.clone()));
            }
            Some(tag) => {
                if !tagged.insert(tag.as_str()) {
                    return Err(LayoutError::DuplicateSection(tag.clone()));
                }
            }
            None => {
                fallbacks += 1;
                if section.fields.is_empty() {
                    return Err(LayoutError::EmptyFallback);
                }
            }
        }
    }
    if fallbacks != 1 {
        return Err(LayoutError::FallbackCount(fallbacks));
    }

    Ok(())
}
