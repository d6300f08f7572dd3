//! # Schema Forms
//!
//! A schema node is in exactly one of eight forms. [`FormKind`] names them
//! without their payload; the payload-carrying representation lives in
//! `jddf-schema` as `Form`.
//!
//! The variant order is the precedence order used to classify a node:
//! `ref` > `type` > `enum` > `elements` > `properties` > `values` >
//! `discriminator`, with `empty` when none of the form fields are present.

use serde::{Deserialize, Serialize};

/// The eight mutually exclusive schema forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// No constraint at all.
    Empty,
    /// Indirection through a root-level definition.
    Ref,
    /// A primitive type.
    Type,
    /// One of a fixed set of strings.
    Enum,
    /// A homogeneous array.
    Elements,
    /// An object with declared required and optional members.
    Properties,
    /// A homogeneous map.
    Values,
    /// A tagged union of properties-form variants.
    Discriminator,
}

/// Total number of schema forms.
pub const FORM_COUNT: usize = 8;

impl FormKind {
    /// Returns all forms, `empty` first and then in precedence order.
    pub fn all() -> &'static [FormKind] {
        &[
            Self::Empty,
            Self::Ref,
            Self::Type,
            Self::Enum,
            Self::Elements,
            Self::Properties,
            Self::Values,
            Self::Discriminator,
        ]
    }

    /// Returns the form name as written in the JDDF documentation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ref => "ref",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Elements => "elements",
            Self::Properties => "properties",
            Self::Values => "values",
            Self::Discriminator => "discriminator",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_forms_count() {
        assert_eq!(FormKind::all().len(), FORM_COUNT);
    }

    #[test]
    fn test_all_forms_sorted_by_precedence() {
        let forms = FormKind::all();
        assert!(forms.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_display_matches_as_str() {
        for form in FormKind::all() {
            assert_eq!(form.to_string(), form.as_str());
        }
    }
}
