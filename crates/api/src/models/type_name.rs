use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const OBJECT: &str = "java.lang.Object";
pub const VOID: &str = "void";
pub const STRING: &str = "java.lang.String";
pub const INTEGER: &str = "java.lang.Integer";
pub const BOOLEAN: &str = "java.lang.Boolean";
pub const CLASS: &str = "java.lang.Class";

/// Canonical JVM type name, e.g. `java.util.List<pkg.Foo>` or `int[]`.
///
/// Only a single generic parameter is modelled. Multi-parameter generics are
/// represented by their raw type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct TypeName {
    /// Dotted name (`java.lang.String`) or primitive keyword (`int`).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Box<TypeName>>,
    /// Number of trailing `[]`.
    #[serde(default, skip_serializing_if = "is_scalar")]
    pub dimensions: u8,
}

fn is_scalar(dimensions: &u8) -> bool {
    *dimensions == 0
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter: None,
            dimensions: 0,
        }
    }

    pub fn object() -> Self {
        Self::new(OBJECT)
    }

    pub fn void() -> Self {
        Self::new(VOID)
    }

    pub fn string() -> Self {
        Self::new(STRING)
    }

    /// Build from a JVM internal name (`pkg/Foo`).
    pub fn from_internal(internal: &str) -> Self {
        Self::new(internal.replace('/', "."))
    }

    pub fn with_parameter(mut self, parameter: TypeName) -> Self {
        self.parameter = Some(Box::new(parameter));
        self
    }

    /// Add `dims` array dimensions on top of the current ones.
    pub fn into_array(mut self, dims: u8) -> Self {
        self.dimensions = self.dimensions.saturating_add(dims);
        self
    }

    pub fn is_object(&self) -> bool {
        self.dimensions == 0 && self.parameter.is_none() && self.name == OBJECT
    }

    pub fn is_void(&self) -> bool {
        self.dimensions == 0 && self.name == VOID
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }

    /// True for `java.lang.Object` and `void`, the two types that carry no
    /// information for a schema.
    pub fn is_uninformative(&self) -> bool {
        self.is_object() || self.is_void()
    }

    /// Component type of an array, `None` for non-arrays.
    pub fn element_type(mut self) -> Option<Self> {
        if self.dimensions == 0 {
            return None;
        }
        self.dimensions -= 1;
        Some(self)
    }

    /// Same name and dimensions, ignoring the generic parameter.
    pub fn same_raw_type(&self, other: &TypeName) -> bool {
        self.name == other.name && self.dimensions == other.dimensions
    }

    /// Wrapper class for a primitive (`int` -> `java.lang.Integer`), otherwise `self`.
    pub fn boxed(self) -> Self {
        if self.dimensions > 0 {
            return self;
        }
        match primitive_wrapper(&self.name) {
            Some(wrapper) => Self::new(wrapper),
            None => self,
        }
    }
}

fn primitive_wrapper(name: &str) -> Option<&'static str> {
    let wrapper = match name {
        "boolean" => BOOLEAN,
        "byte" => "java.lang.Byte",
        "char" => "java.lang.Character",
        "short" => "java.lang.Short",
        "int" => INTEGER,
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        "void" => "java.lang.Void",
        _ => return None,
    };
    Some(wrapper)
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "<{}>", parameter)?;
        }
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_canonical_form() {
        let list = TypeName::new("java.util.List").with_parameter(TypeName::new("pkg.Foo"));
        assert_eq!(list.to_string(), "java.util.List<pkg.Foo>");

        let arr = TypeName::new("pkg.Foo").into_array(2);
        assert_eq!(arr.to_string(), "pkg.Foo[][]");
    }

    #[test]
    fn test_boxed_primitives() {
        assert_eq!(TypeName::new("int").boxed().to_string(), INTEGER);
        assert_eq!(TypeName::new("boolean").boxed().to_string(), BOOLEAN);
        assert_eq!(TypeName::new("int").into_array(1).boxed().to_string(), "int[]");
        assert_eq!(TypeName::string().boxed(), TypeName::string());
    }

    #[test]
    fn test_element_type() {
        let grid = TypeName::new("pkg.Foo").into_array(2);
        assert_eq!(grid.element_type().map(|t| t.to_string()), Some("pkg.Foo[]".into()));
        assert_eq!(TypeName::string().element_type(), None);
    }

    #[test]
    fn test_uninformative() {
        assert!(TypeName::object().is_uninformative());
        assert!(TypeName::void().is_uninformative());
        assert!(!TypeName::object().into_array(1).is_uninformative());
    }
}
