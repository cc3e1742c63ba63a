use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// One or more required columns are absent from the corpus header.
    #[error("corpus is missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The corpus source could not be read or parsed.
    #[error("cannot read corpus source {path}: {message}")]
    DataSource { path: String, message: String },

    /// A row has no value for one of the required columns.
    #[error("line {line} has no value for required column `{column}`")]
    MissingField { line: u64, column: &'static str },
}

impl Error {
    /// Returns `true` when the source lacks required columns.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Returns `true` when the source itself is unreadable or its rows are
    /// malformed.
    pub fn is_data_source(&self) -> bool {
        matches!(self, Self::DataSource { .. } | Self::MissingField { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = Error::Schema {
            missing: vec!["artist".to_string(), "text".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "corpus is missing required column(s): artist, text"
        );
        assert!(err.is_schema());
        assert!(!err.is_data_source());
    }

    #[test]
    fn test_missing_field_is_data_source() {
        let err = Error::MissingField {
            line: 3,
            column: "song",
        };
        assert!(err.is_data_source());
        assert!(err.to_string().contains("`song`"));
    }
}
