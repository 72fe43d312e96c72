//! Declared-type normalization and quoting classification.
//!
//! A declared SQL type arrives as raw text (`VARCHAR(255)`, `NUMERIC(10,2)`,
//! `TIMESTAMP WITH TIME ZONE`). Stripping the parenthesized suffix yields the
//! base type; stripping any trailing modifier words yields the normalized
//! name used for classification. Classification decides how a value of that
//! type is rendered inside an INSERT statement.

/// How values of a SQL type are rendered as literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Wrapped in single quotes (character, date and time types).
    Quoted,
    /// Emitted verbatim (numeric, boolean and bit types).
    Unquoted,
    /// Not recognized; values render as NULL.
    Unknown,
}

pub struct TypeClassifier;

impl TypeClassifier {
    /// Types whose literals are single-quoted
    const QUOTED_TYPES: &'static [&'static str] = &[
        "CHAR",
        "VARCHAR",
        "TEXT",
        "NVARCHAR",
        "DATE",
        "DATETIME",
        "TIMESTAMP",
        "TIME",
        "YEAR",
    ];

    /// Types whose literals pass through unquoted
    const UNQUOTED_TYPES: &'static [&'static str] = &[
        "INTEGER", "INT", "BIGINT", "SMALLINT", "FLOAT", "DOUBLE", "NUMERIC", "DECIMAL",
        "BOOLEAN", "BIT",
    ];

    /// Classify a normalized type name. Comparison is case-insensitive.
    pub fn classify(base_type: &str) -> TypeClass {
        let upper = base_type.to_uppercase();
        if Self::QUOTED_TYPES.contains(&upper.as_str()) {
            TypeClass::Quoted
        } else if Self::UNQUOTED_TYPES.contains(&upper.as_str()) {
            TypeClass::Unquoted
        } else {
            TypeClass::Unknown
        }
    }

    /// Strip a parenthesized length/precision suffix: `VARCHAR(255)` -> `VARCHAR`.
    pub fn strip_length(declared: &str) -> &str {
        match declared.find('(') {
            Some(idx) => declared[..idx].trim(),
            None => declared.trim(),
        }
    }

    /// Reduce a declared type to its classification key: strip the length
    /// suffix, then keep only the leading word so collation/charset
    /// modifiers (`TIMESTAMP WITH TIME ZONE`) do not defeat the lookup.
    pub fn normalize(declared: &str) -> &str {
        let base = Self::strip_length(declared);
        match base.find(' ') {
            Some(idx) => &base[..idx],
            None => base,
        }
    }

    /// Parse the length out of a trailing `(n)` suffix, if there is one.
    ///
    /// Multi-argument suffixes like `NUMERIC(10,2)` carry precision rather
    /// than a character length and yield `None`.
    pub fn declared_length(declared: &str) -> Option<usize> {
        let open = declared.find('(')?;
        let close = declared.rfind(')')?;
        if close <= open {
            return None;
        }
        declared[open + 1..close].trim().parse().ok()
    }
}
