//! Literal values on the right-hand side of a comparison.

use std::fmt;

/// A literal compared against a field.
///
/// Text renders double-quoted, booleans as `true`/`false`, and numbers and
/// raw values through their `Display` output.
///
/// Embedded double quotes in text are not escaped. A value containing `"`
/// produces an expression the server will reject or misread.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(String),
    Text(String),
    Bool(bool),
    /// Emitted verbatim, e.g. a server macro such as `@now` or a field reference.
    Raw(String),
}

impl FilterValue {
    /// Wrap any displayable value to be emitted without quoting.
    pub fn raw(value: impl fmt::Display) -> Self {
        FilterValue::Raw(value.to_string())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => f.write_str(n),
            FilterValue::Text(s) => write!(f, "\"{s}\""),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Raw(r) => f.write_str(r),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::Text(value.clone())
    }
}

impl From<char> for FilterValue {
    fn from(value: char) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<Number> for FilterValue {
    fn from(value: Number) -> Self {
        FilterValue::Number(value.0)
    }
}

/// A numeric literal, accepted by the ordering comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(String);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_literals {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(value.to_string())
                }
            }

            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Number(value.to_string())
                }
            }
        )*
    };
}

numeric_literals!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_kind() {
        assert_eq!(FilterValue::from(37).to_string(), "37");
        assert_eq!(FilterValue::from(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::from("admin").to_string(), "\"admin\"");
        assert_eq!(FilterValue::from('x').to_string(), "\"x\"");
        assert_eq!(FilterValue::from(true).to_string(), "true");
        assert_eq!(FilterValue::from(false).to_string(), "false");
        assert_eq!(FilterValue::raw("@now").to_string(), "@now");
    }

    #[test]
    fn embedded_quotes_are_left_alone() {
        assert_eq!(
            FilterValue::from(r#"say "hi""#).to_string(),
            r#""say "hi"""#
        );
    }
}
