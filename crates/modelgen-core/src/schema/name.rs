use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Naming rules turning table and column identifiers into model, file and
/// attribute names.
///
/// Every method is a pure function of its input and the options, so a table
/// always gets the same names within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Convert model names to UpperCamelCase.
    pub camel_case: bool,

    /// Convert attribute names to lowerCamelCase.
    pub attr_camel_case: bool,

    /// Convert file names to lowerCamelCase.
    pub file_name_camel_case: bool,

    /// Use the model name as the file name.
    pub file_name_matches_model: bool,

    /// Suffix appended to model names, `None` to leave names bare.
    pub model_suffix: Option<String>,

    /// Singularize table names before deriving model names.
    pub singular: bool,
}

impl Naming {
    /// The model name for `table`.
    ///
    /// The suffix is cased like the base name: `user_model` by default,
    /// `UserModel` with camel case enabled.
    pub fn model_name(&self, table: &str) -> String {
        let base = if self.singular {
            pluralizer::pluralize(table, 1, false)
        } else {
            table.to_string()
        };

        match (&self.model_suffix, self.camel_case) {
            (None, false) => base,
            (None, true) => base.to_upper_camel_case(),
            (Some(suffix), false) => format!("{base}_{suffix}"),
            (Some(suffix), true) => format!(
                "{}{}",
                base.to_upper_camel_case(),
                suffix.to_upper_camel_case()
            ),
        }
    }

    /// The file name (without extension) for the model generated from `table`.
    pub fn file_name(&self, model_name: &str, table: &str) -> String {
        if self.file_name_matches_model {
            model_name.to_string()
        } else if self.file_name_camel_case {
            table.to_lower_camel_case()
        } else {
            table.to_string()
        }
    }

    /// The attribute name for `column`.
    pub fn attr_name(&self, column: &str) -> String {
        if self.attr_camel_case {
            column.to_lower_camel_case()
        } else {
            column.to_string()
        }
    }
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            camel_case: false,
            attr_camel_case: false,
            file_name_camel_case: false,
            file_name_matches_model: false,
            model_suffix: Some("model".to_string()),
            singular: false,
        }
    }
}
