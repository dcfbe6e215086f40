//! Constant value literals.

/// Tagged literal tree used for constants and field defaults.
///
/// The literal's own tag is kept separate from the declared type: a double
/// field may carry an [`ConstValue::Integer`] literal, and the renderer
/// formats it from the tag, not the field type.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    /// Integer literal. Also the source form of booleans and enum values.
    Integer(i64),
    /// Floating-point literal.
    Double(f64),
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    String(String),
    /// List literal in source order.
    List(Vec<ConstValue>),
    /// Set literal in source order.
    Set(Vec<ConstValue>),
    /// Map literal in source order.
    Map(Vec<(ConstValue, ConstValue)>),
    /// Struct literal: field name to value, in source order.
    Struct(Vec<(String, ConstValue)>),
}

impl ConstValue {
    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a struct literal.
    #[must_use]
    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, ConstValue)>,
        S: Into<String>,
    {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the integer form of the literal, if it has one.
    ///
    /// Booleans map to 1 and 0.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Returns the elements of a list or set literal.
    #[must_use]
    pub fn as_elements(&self) -> Option<&[ConstValue]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the literal form, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
        }
    }
}
