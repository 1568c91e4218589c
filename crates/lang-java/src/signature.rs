//! Generic signature parsing.
//!
//! Signatures are reduced to [`TypeName`]s with at most one generic parameter.
//! A single type argument is kept (wildcard bounds are dropped); an unbounded
//! wildcard or several arguments collapse to the raw type.

use sigscope_api::TypeName;
use std::iter::Peekable;
use std::str::Chars;

/// Parse a field type signature or descriptor. Malformed input and bare type
/// variables degrade to `java.lang.Object`.
pub fn parse(fragment: &str) -> TypeName {
    try_parse(fragment).unwrap_or_else(TypeName::object)
}

/// Like [`parse`] but reports failure instead of degrading.
pub fn try_parse(fragment: &str) -> Option<TypeName> {
    let mut reader = SignatureReader::new(fragment);
    match reader.read_type()? {
        Sig::Type(ty) => Some(ty),
        Sig::Variable | Sig::Wildcard => None,
    }
}

/// Return part of a method signature (everything after `)`).
pub fn method_return_tail(signature: &str) -> &str {
    match signature.find(')') {
        Some(pos) if pos > 0 => &signature[pos + 1..],
        _ => signature,
    }
}

/// A class type found inside a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeRef {
    /// Internal name, e.g. `kotlin/jvm/functions/Function1`.
    pub internal_name: String,
    pub ty: TypeName,
}

/// Every class type referenced by a class, method or field signature, outer
/// types before their arguments, in textual order. Bounds of formal type
/// parameters are not reported.
pub fn class_types(signature: &str) -> Vec<ClassTypeRef> {
    let mut reader = SignatureReader::recording(signature);
    if reader.skip_formal_parameters().is_some() {
        while let Some(c) = reader.peek() {
            if matches!(c, '(' | ')' | '^') {
                reader.bump();
                continue;
            }
            if reader.read_type().is_none() {
                break;
            }
        }
    }
    reader.into_recorded()
}

/// First class type in `signature` whose internal name satisfies `predicate`.
pub fn first_type_where<F>(signature: &str, predicate: F) -> Option<TypeName>
where
    F: Fn(&str) -> bool,
{
    class_types(signature)
        .into_iter()
        .find(|found| predicate(&found.internal_name))
        .map(|found| found.ty)
}

/// Whether `signature` mentions the class `internal_name` anywhere.
pub fn references(signature: &str, internal_name: &str) -> bool {
    class_types(signature)
        .iter()
        .any(|found| found.internal_name == internal_name)
}

fn primitive(code: char) -> Option<&'static str> {
    let keyword = match code {
        'B' => "byte",
        'C' => "char",
        'D' => "double",
        'F' => "float",
        'I' => "int",
        'J' => "long",
        'S' => "short",
        'Z' => "boolean",
        'V' => "void",
        _ => return None,
    };
    Some(keyword)
}

enum Sig {
    Type(TypeName),
    Variable,
    Wildcard,
}

struct SignatureReader<'a> {
    chars: Peekable<Chars<'a>>,
    recorded: Option<Vec<Option<ClassTypeRef>>>,
}

impl<'a> SignatureReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            recorded: None,
        }
    }

    fn recording(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            recorded: Some(Vec::new()),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) {
        self.chars.next();
    }

    fn into_recorded(self) -> Vec<ClassTypeRef> {
        self.recorded
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect()
    }

    fn read_type(&mut self) -> Option<Sig> {
        match self.chars.next()? {
            '[' => {
                let mut dims: u8 = 1;
                while self.chars.next_if_eq(&'[').is_some() {
                    dims = dims.saturating_add(1);
                }
                let element = match self.read_type()? {
                    Sig::Type(ty) => ty,
                    Sig::Variable | Sig::Wildcard => TypeName::object(),
                };
                Some(Sig::Type(element.into_array(dims)))
            }
            'L' => self.read_class().map(Sig::Type),
            'T' => {
                while self.chars.next()? != ';' {}
                Some(Sig::Variable)
            }
            code => primitive(code).map(|keyword| Sig::Type(TypeName::new(keyword))),
        }
    }

    fn read_class(&mut self) -> Option<TypeName> {
        let slot = self.reserve();
        let mut internal = String::new();
        let mut arguments = Vec::new();
        loop {
            match self.chars.next()? {
                ';' => break,
                '<' => arguments = self.read_arguments()?,
                // Outer<..>.Inner
                '.' => {
                    internal.push('$');
                    arguments.clear();
                }
                c => internal.push(c),
            }
        }
        if internal.is_empty() {
            return None;
        }

        let mut ty = TypeName::from_internal(&internal);
        if arguments.len() == 1 {
            if let Some(Sig::Type(parameter)) = arguments.pop() {
                ty = ty.with_parameter(parameter);
            }
        }
        self.fill(slot, internal, &ty);
        Some(ty)
    }

    fn read_arguments(&mut self) -> Option<Vec<Sig>> {
        let mut arguments = Vec::new();
        loop {
            match self.peek()? {
                '>' => {
                    self.bump();
                    return Some(arguments);
                }
                '*' => {
                    self.bump();
                    arguments.push(Sig::Wildcard);
                }
                '+' | '-' => {
                    self.bump();
                    arguments.push(self.read_type()?);
                }
                _ => arguments.push(self.read_type()?),
            }
        }
    }

    fn skip_formal_parameters(&mut self) -> Option<()> {
        if self.chars.next_if_eq(&'<').is_none() {
            return Some(());
        }
        let recorded = self.recorded.take();
        let outcome = self.read_formal_parameters();
        self.recorded = recorded;
        outcome
    }

    fn read_formal_parameters(&mut self) -> Option<()> {
        loop {
            if self.chars.next_if_eq(&'>').is_some() {
                return Some(());
            }
            while self.chars.next()? != ':' {}
            if matches!(self.peek()?, 'L' | 'T' | '[') {
                self.read_type()?;
            }
            while self.chars.next_if_eq(&':').is_some() {
                self.read_type()?;
            }
        }
    }

    fn reserve(&mut self) -> Option<usize> {
        self.recorded.as_mut().map(|recorded| {
            recorded.push(None);
            recorded.len() - 1
        })
    }

    fn fill(&mut self, slot: Option<usize>, internal_name: String, ty: &TypeName) {
        if let (Some(slot), Some(recorded)) = (slot, self.recorded.as_mut()) {
            recorded[slot] = Some(ClassTypeRef {
                internal_name,
                ty: ty.clone(),
            });
        }
    }
}
