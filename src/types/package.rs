//! Documentation Package Model
//!
//! In-memory model of one Go package's declared surface, built once by the
//! loader and only read afterwards. Ordering of every list is source
//! declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tag::StructTag;

/// One loaded Go package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentationPackage {
    pub name: String,
    /// Package-level functions (no receiver)
    pub functions: Vec<FunctionDoc>,
    pub types: Vec<TypeDoc>,
}

impl DocumentationPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    /// True when the package declares no functions and no types at all
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.types.is_empty()
    }

    /// Number of functions, types and methods declared
    pub fn symbol_count(&self) -> usize {
        self.functions.len()
            + self
                .types
                .iter()
                .map(|t| 1 + t.methods.len())
                .sum::<usize>()
    }
}

/// A declared type together with its methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDoc {
    pub name: String,
    pub doc: String,
    pub declaration: TypeDecl,
    pub methods: Vec<FunctionDoc>,
}

impl TypeDoc {
    pub fn new(name: impl Into<String>, doc: impl Into<String>, declaration: TypeDecl) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            declaration,
            methods: Vec::new(),
        }
    }

    pub fn with_methods(mut self, methods: Vec<FunctionDoc>) -> Self {
        self.methods = methods;
        self
    }

    /// Struct fields, if this type is a composite record
    pub fn fields(&self) -> Option<&[FieldDoc]> {
        match &self.declaration {
            TypeDecl::Struct(fields) => Some(fields),
            TypeDecl::Other(_) => None,
        }
    }
}

/// Right-hand side of a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDecl {
    Struct(Vec<FieldDoc>),
    Other(TypeExpr),
}

/// One struct field.
///
/// Embedded fields are kept in the model with `embedded` set; they carry the
/// embedded type's text as their name and are never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDoc {
    pub name: String,
    pub field_type: TypeExpr,
    pub embedded: bool,
    /// Trailing same-line comment without markers
    pub comment: String,
    /// Bare `json` tag name, options dropped
    pub serialization_tag: String,
    /// `dynamodbav` tag value
    pub storage_tag: String,
    pub inferred_storage_type: StorageType,
}

impl FieldDoc {
    pub fn new(name: impl Into<String>, field_type: TypeExpr) -> Self {
        let inferred_storage_type = StorageType::infer(&field_type.to_string());
        Self {
            name: name.into(),
            field_type,
            embedded: false,
            comment: String::new(),
            serialization_tag: String::new(),
            storage_tag: String::new(),
            inferred_storage_type,
        }
    }

    pub fn embedded(field_type: TypeExpr) -> Self {
        let mut field = Self::new(field_type.to_string(), field_type);
        field.embedded = true;
        field
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Populate the serialization and storage tags from a struct tag
    pub fn with_tag(mut self, tag: &StructTag) -> Self {
        if let Some(json) = tag.get("json") {
            self.serialization_tag = json
                .split_once(',')
                .map_or(json.as_str(), |(name, _)| name)
                .to_string();
        }
        if let Some(storage) = tag.get("dynamodbav") {
            self.storage_tag = storage;
        }
        self
    }
}

/// Storage schema type inferred from a field's declared Go type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StorageType {
    #[default]
    String,
    Number,
    Boolean,
}

impl StorageType {
    /// Map a rendered Go type to its storage type.
    ///
    /// One leading `*` is stripped; only builtin scalar names are recognized
    /// and everything else falls back to `String`.
    pub fn infer(type_text: &str) -> Self {
        let base = type_text.strip_prefix('*').unwrap_or(type_text);
        match base {
            "string" => Self::String,
            "bool" => Self::Boolean,
            "int" | "int64" | "int32" | "int16" | "int8" => Self::Number,
            "float32" | "float64" => Self::Number,
            _ => Self::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDoc {
    pub name: String,
    pub doc: String,
    /// `None` for package-level functions
    pub receiver: Option<Receiver>,
    pub type_params: Vec<ParamGroup>,
    pub params: Vec<ParamGroup>,
    pub results: Vec<ParamGroup>,
}

impl FunctionDoc {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            receiver: None,
            type_params: Vec::new(),
            params: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<ParamGroup>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_params(mut self, params: Vec<ParamGroup>) -> Self {
        self.params = params;
        self
    }

    pub fn with_results(mut self, results: Vec<ParamGroup>) -> Self {
        self.results = results;
        self
    }

    /// Name of the receiver type, or `None` for package-level functions
    pub fn receiver_type_name(&self) -> Option<String> {
        self.receiver.as_ref().map(Receiver::type_name)
    }
}

/// A parameter or result group as declared, e.g. `a, b int`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGroup {
    pub names: Vec<String>,
    pub param_type: TypeExpr,
    pub variadic: bool,
}

impl ParamGroup {
    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>, param_type: TypeExpr) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            param_type,
            variadic: false,
        }
    }

    pub fn unnamed(param_type: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            param_type,
            variadic: false,
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Method receiver, resolved once by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    /// Receiver identifier, e.g. `u` in `(u *User)`
    pub binding: Option<String>,
    pub kind: ReceiverKind,
    /// Generic receiver arguments, e.g. `T` in `(l *List[T])`
    pub type_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiverKind {
    Value(String),
    Pointer(String),
    Qualified { package: String, name: String },
}

impl Receiver {
    pub fn new(binding: Option<String>, kind: ReceiverKind) -> Self {
        Self {
            binding,
            kind,
            type_args: Vec::new(),
        }
    }

    pub fn with_type_args(mut self, type_args: Vec<String>) -> Self {
        self.type_args = type_args;
        self
    }

    /// Receiver type name as shown in method headings
    pub fn type_name(&self) -> String {
        match &self.kind {
            ReceiverKind::Value(name) | ReceiverKind::Pointer(name) => name.clone(),
            ReceiverKind::Qualified { package, name } => format!("{}.{}", package, name),
        }
    }

    /// Name of the package-local type this receiver binds to
    pub fn local_type(&self) -> Option<&str> {
        match &self.kind {
            ReceiverKind::Value(name) | ReceiverKind::Pointer(name) => Some(name),
            ReceiverKind::Qualified { .. } => None,
        }
    }
}

/// Declared type expression.
///
/// Forms the renderer does not model are kept as their collapsed source text
/// in `Other`, which is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Named(String),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Qualified { package: String, name: String },
    EmptyInterface,
    Other(String),
}

/// Placeholder used when a fallback expression has no text
pub const UNKNOWN_TYPE: &str = "unknown";

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    pub fn slice(element: TypeExpr) -> Self {
        Self::Slice(Box::new(element))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Fallback from raw source text, whitespace runs collapsed to one space
    pub fn other(text: &str) -> Self {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            Self::Other(UNKNOWN_TYPE.to_string())
        } else {
            Self::Other(collapsed)
        }
    }
}
