//! Erased descriptors (`(Ljava/lang/String;)I`, `[Lpkg/Foo;`).

use crate::signature;
use ristretto_classfile::{BaseType, FieldType};
use sigscope_api::TypeName;
use tracing::debug;

pub fn convert_type(ty: &FieldType) -> TypeName {
    match ty {
        FieldType::Base(BaseType::Byte) => TypeName::new("byte"),
        FieldType::Base(BaseType::Char) => TypeName::new("char"),
        FieldType::Base(BaseType::Double) => TypeName::new("double"),
        FieldType::Base(BaseType::Float) => TypeName::new("float"),
        FieldType::Base(BaseType::Int) => TypeName::new("int"),
        FieldType::Base(BaseType::Long) => TypeName::new("long"),
        FieldType::Base(BaseType::Short) => TypeName::new("short"),
        FieldType::Base(BaseType::Boolean) => TypeName::new("boolean"),
        FieldType::Object(name) => TypeName::from_internal(name),
        FieldType::Array(component) => {
            let mut dimensions = 1u8;
            let mut current = component.as_ref();
            while let FieldType::Array(inner) = current {
                dimensions = dimensions.saturating_add(1);
                current = inner.as_ref();
            }
            convert_type(current).into_array(dimensions)
        }
    }
}

/// Return type of a method descriptor; `void` when there is none.
pub fn return_type(descriptor: &str) -> TypeName {
    match FieldType::parse_method_descriptor(descriptor) {
        Ok((_, Some(ret))) => convert_type(&ret),
        Ok((_, None)) => TypeName::void(),
        Err(e) => {
            debug!("Unparseable method descriptor {}: {:?}", descriptor, e);
            signature::parse(signature::method_return_tail(descriptor))
        }
    }
}

pub fn argument_types(descriptor: &str) -> Vec<TypeName> {
    match FieldType::parse_method_descriptor(descriptor) {
        Ok((params, _)) => params.iter().map(convert_type).collect(),
        Err(e) => {
            debug!("Unparseable method descriptor {}: {:?}", descriptor, e);
            Vec::new()
        }
    }
}

pub fn argument_count(descriptor: &str) -> usize {
    argument_types(descriptor).len()
}

/// Type of a field descriptor.
pub fn field_type(descriptor: &str) -> TypeName {
    signature::parse(descriptor)
}

/// Type named by a class constant or `anewarray` operand, which may be either
/// an internal name (`pkg/Foo`) or a descriptor (`Lpkg/Foo;`, `[I`).
pub fn object_type(name: &str) -> TypeName {
    if name.starts_with('[') {
        return signature::parse(name);
    }
    match internal_name(name) {
        Some(internal) => TypeName::from_internal(internal),
        None => TypeName::from_internal(name),
    }
}

/// `pkg/Foo` out of `Lpkg/Foo;`.
pub fn internal_name(descriptor: &str) -> Option<&str> {
    descriptor.strip_prefix('L')?.strip_suffix(';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_type() {
        assert_eq!(return_type("()V"), TypeName::void());
        assert_eq!(return_type("(I)Ljava/lang/String;").to_string(), "java.lang.String");
        assert_eq!(return_type("()[[J").to_string(), "long[][]");
    }

    #[test]
    fn test_argument_count() {
        assert_eq!(argument_count("()V"), 0);
        assert_eq!(argument_count("(Ljava/lang/Object;Ljava/lang/String;)V"), 2);
        assert_eq!(argument_count("(IJ[Lpkg/Foo;)V"), 3);
    }

    #[test]
    fn test_argument_types() {
        let args: Vec<_> = argument_types("(Ljava/lang/Class;)Ljava/lang/Object;")
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(args, vec!["java.lang.Class"]);
    }

    #[test]
    fn test_object_type_accepts_both_forms() {
        assert_eq!(object_type("pkg/Foo").to_string(), "pkg.Foo");
        assert_eq!(object_type("Lpkg/Foo;").to_string(), "pkg.Foo");
        assert_eq!(object_type("[I").to_string(), "int[]");
        assert_eq!(object_type("[Lpkg/Foo;").to_string(), "pkg.Foo[]");
    }

    #[test]
    fn test_field_type() {
        assert_eq!(field_type("Ljava/util/List;").to_string(), "java.util.List");
        assert_eq!(field_type("Z").to_string(), "boolean");
    }
}
