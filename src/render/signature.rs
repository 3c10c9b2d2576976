//! Declaration-to-text formatting
//!
//! Renders type expressions and function declarations back into one-line Go
//! syntax without bodies.

use std::fmt;

use crate::types::{FunctionDoc, ParamGroup, Receiver, ReceiverKind, TypeExpr};

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(element) => write!(f, "[]{}", element),
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::EmptyInterface => f.write_str("interface{}"),
            TypeExpr::Other(text) => f.write_str(text),
        }
    }
}

/// Render a full `func` signature line.
///
/// ```rust,ignore
/// // func (u *User) Rename(first, last string) (bool, error)
/// let line = render_signature(&method);
/// ```
pub fn render_signature(func: &FunctionDoc) -> String {
    let mut buf = String::from("func ");

    if let Some(receiver) = &func.receiver {
        buf.push('(');
        if let Some(binding) = &receiver.binding {
            buf.push_str(binding);
            buf.push(' ');
        }
        buf.push_str(&render_receiver_type(receiver));
        buf.push_str(") ");
    }

    buf.push_str(&func.name);

    if !func.type_params.is_empty() {
        buf.push('[');
        buf.push_str(&join_groups(&func.type_params));
        buf.push(']');
    }

    buf.push('(');
    buf.push_str(&join_groups(&func.params));
    buf.push(')');

    match func.results.as_slice() {
        [] => {}
        [single] if single.names.len() <= 1 => {
            buf.push(' ');
            buf.push_str(&render_group(single));
        }
        results => {
            buf.push_str(" (");
            buf.push_str(&join_groups(results));
            buf.push(')');
        }
    }

    buf
}

/// Receiver type as written in source, e.g. `*List[T]`
pub fn render_receiver_type(receiver: &Receiver) -> String {
    let args = if receiver.type_args.is_empty() {
        String::new()
    } else {
        format!("[{}]", receiver.type_args.join(", "))
    };

    match &receiver.kind {
        ReceiverKind::Value(name) => format!("{}{}", name, args),
        ReceiverKind::Pointer(name) => format!("*{}{}", name, args),
        ReceiverKind::Qualified { package, name } => format!("{}.{}{}", package, name, args),
    }
}

/// One declared group: names first, the shared type once
pub fn render_group(group: &ParamGroup) -> String {
    let ellipsis = if group.variadic { "..." } else { "" };
    if group.names.is_empty() {
        format!("{}{}", ellipsis, group.param_type)
    } else {
        format!("{} {}{}", group.names.join(", "), ellipsis, group.param_type)
    }
}

fn join_groups(groups: &[ParamGroup]) -> String {
    groups
        .iter()
        .map(render_group)
        .collect::<Vec<_>>()
        .join(", ")
}
