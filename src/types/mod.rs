pub mod error;
pub mod package;
pub mod tag;

pub use error::{GodocError, Result};
pub use package::{
    DocumentationPackage, FieldDoc, FunctionDoc, ParamGroup, Receiver, ReceiverKind,
    StorageType, TypeDecl, TypeDoc, TypeExpr,
};
pub use tag::StructTag;
