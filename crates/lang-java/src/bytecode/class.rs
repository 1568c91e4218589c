use super::method::MethodModel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldModel {
    pub name: String,
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// A loaded class: name, generic signature, declared interfaces and members.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassModel {
    /// Internal name, e.g. `pkg/Foo`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldModel>,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Read-only lookup of loaded classes by internal name.
///
/// Types outside the analysed set are simply absent; callers treat them as
/// opaque.
pub trait ClassIndex: Send + Sync {
    fn lookup(&self, internal_name: &str) -> Option<&ClassModel>;
}

/// Class index backed by an insertion-ordered map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassIndex {
    classes: IndexMap<String, ClassModel>,
}

impl InMemoryClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a class, keyed by its internal name.
    pub fn insert(&mut self, class: ClassModel) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn with_class(mut self, class: ClassModel) -> Self {
        self.insert(class);
        self
    }

    /// Parse a JSON array of classes.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let classes: Vec<ClassModel> = serde_json::from_str(json)?;
        Ok(classes.into_iter().collect())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let classes: Vec<&ClassModel> = self.classes.values().collect();
        serde_json::to_string_pretty(&classes)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values()
    }
}

impl FromIterator<ClassModel> for InMemoryClassIndex {
    fn from_iter<I: IntoIterator<Item = ClassModel>>(iter: I) -> Self {
        let mut index = Self::new();
        for class in iter {
            index.insert(class);
        }
        index
    }
}

impl ClassIndex for InMemoryClassIndex {
    fn lookup(&self, internal_name: &str) -> Option<&ClassModel> {
        if internal_name.contains('.') {
            return self.classes.get(&internal_name.replace('.', "/"));
        }
        self.classes.get(internal_name)
    }
}
