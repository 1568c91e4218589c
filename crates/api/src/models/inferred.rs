use super::type_name::TypeName;
use indexmap::IndexSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered set of inferred return types, in first-seen order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct InferredTypes {
    types: IndexSet<TypeName>,
}

impl InferredTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(ty: TypeName) -> Self {
        let mut types = Self::new();
        types.insert(ty);
        types
    }

    /// Insert unless an equal type was already seen. Returns `true` when added.
    pub fn insert(&mut self, ty: TypeName) -> bool {
        self.types.insert(ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn first(&self) -> Option<&TypeName> {
        self.types.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.types.iter()
    }

    /// Canonical string form of every type, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.types.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<TypeName> for InferredTypes {
    fn from_iter<I: IntoIterator<Item = TypeName>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for InferredTypes {
    type Item = TypeName;
    type IntoIter = indexmap::set::IntoIter<TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

/// Inference outcome for one method, as handed to schema assembly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodReport {
    /// Dotted name of the declaring class.
    pub class: String,
    pub method: String,
    pub descriptor: String,
    /// Canonical type names, e.g. `java.util.List<pkg.Foo>`.
    pub types: Vec<String>,
}
