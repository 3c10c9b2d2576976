use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use tree_sitter::Node;

use super::{ParsedFile, Parser, create_ts_parser, first_error_position, get_node_text};
use crate::types::{
    FieldDoc, FunctionDoc, GodocError, ParamGroup, Receiver, ReceiverKind, Result, StructTag,
    TypeDecl, TypeDoc, TypeExpr,
};

/// Tool directives such as `//go:generate` or `//line` are not documentation
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//(line |extern |export |[a-z0-9]+:[a-z0-9])")
        .expect("directive pattern is valid")
});

pub struct GoParser;

impl GoParser {
    pub fn new() -> Result<Self> {
        // Validate parser creation at construction time
        let _ = create_ts_parser(tree_sitter_go::LANGUAGE, "Go")?;
        Ok(Self)
    }
}

impl Parser for GoParser {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedFile> {
        let mut parser =
            create_ts_parser(tree_sitter_go::LANGUAGE, "Go").map_err(|e| e.with_path(path))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| GodocError::parse(path, "Failed to parse Go file"))?;
        let root = tree.root_node();

        if let Some((line, column)) = first_error_position(root) {
            return Err(GodocError::parse(
                path,
                format!("syntax error at {}:{}", line, column),
            ));
        }

        let source = content.as_bytes();
        let mut cursor = root.walk();
        let decls: Vec<Node> = root.named_children(&mut cursor).collect();

        let package = decls
            .iter()
            .find(|n| n.kind() == "package_clause")
            .and_then(|n| package_name(*n, source))
            .ok_or_else(|| GodocError::parse(path, "missing package clause"))?;

        let mut file = ParsedFile::new(path, package);
        for node in decls {
            match node.kind() {
                "function_declaration" => {
                    if let Some(func) = extract_function(node, source) {
                        file.functions.push(func);
                    }
                }
                "method_declaration" => match extract_method(node, source) {
                    Some(method) => file.methods.push(method),
                    None => debug!(
                        "{}:{}: skipping method with unsupported receiver",
                        path,
                        node.start_position().row + 1
                    ),
                },
                "type_declaration" => file.types.extend(extract_types(node, source)),
                _ => {}
            }
        }

        Ok(file)
    }
}

// =============================================================================
// Declarations
// =============================================================================

fn package_name(clause: Node, source: &[u8]) -> Option<String> {
    let mut cursor = clause.walk();
    clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .map(|n| get_node_text(n, source).to_string())
}

fn extract_function(node: Node, source: &[u8]) -> Option<FunctionDoc> {
    let name = node.child_by_field_name("name")?;
    let mut func = FunctionDoc::new(get_node_text(name, source), doc_comment(node, source));

    if let Some(type_params) = node.child_by_field_name("type_parameters") {
        func = func.with_type_params(type_param_groups(type_params, source));
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        func = func.with_params(param_groups(params, source));
    }
    if let Some(result) = node.child_by_field_name("result") {
        func = func.with_results(result_groups(result, source));
    }
    Some(func)
}

fn extract_method(node: Node, source: &[u8]) -> Option<FunctionDoc> {
    let receiver = node
        .child_by_field_name("receiver")
        .and_then(|list| extract_receiver(list, source))?;
    extract_function(node, source).map(|func| func.with_receiver(receiver))
}

fn extract_receiver(list: Node, source: &[u8]) -> Option<Receiver> {
    let mut cursor = list.walk();
    let decl = list
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;

    let binding = decl
        .child_by_field_name("name")
        .map(|n| get_node_text(n, source).to_string());
    let (kind, type_args) = receiver_kind(decl.child_by_field_name("type")?, source, false)?;

    Some(Receiver::new(binding, kind).with_type_args(type_args))
}

/// Resolve the receiver's type node into its variant plus generic arguments
fn receiver_kind(node: Node, source: &[u8], pointer: bool) -> Option<(ReceiverKind, Vec<String>)> {
    match node.kind() {
        "type_identifier" => {
            let name = get_node_text(node, source).to_string();
            let kind = if pointer {
                ReceiverKind::Pointer(name)
            } else {
                ReceiverKind::Value(name)
            };
            Some((kind, Vec::new()))
        }
        "pointer_type" if !pointer => receiver_kind(first_named_child(node)?, source, true),
        "parenthesized_type" => receiver_kind(first_named_child(node)?, source, pointer),
        "generic_type" => {
            let (kind, _) = receiver_kind(node.child_by_field_name("type")?, source, pointer)?;
            let args = node
                .child_by_field_name("type_arguments")
                .map(|args| {
                    named_children(args)
                        .into_iter()
                        .map(|arg| collapse(get_node_text(arg, source)))
                        .collect()
                })
                .unwrap_or_default();
            Some((kind, args))
        }
        "qualified_type" => {
            let package = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            Some((
                ReceiverKind::Qualified {
                    package: get_node_text(package, source).to_string(),
                    name: get_node_text(name, source).to_string(),
                },
                Vec::new(),
            ))
        }
        _ => None,
    }
}

fn extract_types(decl: Node, source: &[u8]) -> Vec<TypeDoc> {
    let specs: Vec<Node> = named_children(decl)
        .into_iter()
        .filter(|n| matches!(n.kind(), "type_spec" | "type_alias"))
        .collect();
    let single = specs.len() == 1;
    let decl_doc = doc_comment(decl, source);

    specs
        .into_iter()
        .filter_map(|spec| {
            let name = spec.child_by_field_name("name")?;
            let ty = spec.child_by_field_name("type")?;

            let mut doc = doc_comment(spec, source);
            if doc.is_empty() && single {
                doc = decl_doc.clone();
            }

            let declaration = match ty.kind() {
                "struct_type" => TypeDecl::Struct(extract_fields(ty, source)),
                _ => TypeDecl::Other(type_expr(ty, source)),
            };
            Some(TypeDoc::new(get_node_text(name, source), doc, declaration))
        })
        .collect()
}

fn extract_fields(struct_type: Node, source: &[u8]) -> Vec<FieldDoc> {
    let Some(list) = first_named_child(struct_type) else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    for decl in named_children(list)
        .into_iter()
        .filter(|n| n.kind() == "field_declaration")
    {
        let Some(ty) = decl.child_by_field_name("type") else {
            continue;
        };
        let field_type = type_expr(ty, source);
        let tag = decl
            .child_by_field_name("tag")
            .map(|t| StructTag::from_literal(get_node_text(t, source)));
        let comment = trailing_comment(decl, source);
        let names = field_texts(decl, "name", source);

        let tagged = |field: FieldDoc| match &tag {
            Some(tag) => field.with_tag(tag),
            None => field,
        };

        if names.is_empty() {
            // `*T` embeds keep the star as an anonymous token
            let embedded_type = if get_node_text(decl, source).starts_with('*') {
                TypeExpr::pointer(field_type)
            } else {
                field_type
            };
            fields.push(tagged(FieldDoc::embedded(embedded_type).with_comment(comment)));
            continue;
        }

        // `X, Y int` stays one row so its tag is listed once
        fields.push(tagged(
            FieldDoc::new(names.join(", "), field_type).with_comment(comment),
        ));
    }
    fields
}

// =============================================================================
// Parameters and types
// =============================================================================

fn param_groups(list: Node, source: &[u8]) -> Vec<ParamGroup> {
    named_children(list)
        .into_iter()
        .filter_map(|param| {
            let ty = type_expr(param.child_by_field_name("type")?, source);
            let names = field_texts(param, "name", source);
            match param.kind() {
                "parameter_declaration" => Some(ParamGroup::named(names, ty)),
                "variadic_parameter_declaration" => Some(ParamGroup::named(names, ty).variadic()),
                _ => None,
            }
        })
        .collect()
}

fn result_groups(result: Node, source: &[u8]) -> Vec<ParamGroup> {
    if result.kind() == "parameter_list" {
        param_groups(result, source)
    } else {
        vec![ParamGroup::unnamed(type_expr(result, source))]
    }
}

fn type_param_groups(list: Node, source: &[u8]) -> Vec<ParamGroup> {
    named_children(list)
        .into_iter()
        .filter(|n| n.kind() == "type_parameter_declaration")
        .filter_map(|param| {
            let constraint = param.child_by_field_name("type")?;
            let names = field_texts(param, "name", source);
            Some(ParamGroup::named(names, constraint_expr(constraint, source)))
        })
        .collect()
}

/// A constraint with a single term renders like that type; unions fall back to text
fn constraint_expr(node: Node, source: &[u8]) -> TypeExpr {
    if node.kind() != "type_constraint" {
        return type_expr(node, source);
    }
    match named_children(node).as_slice() {
        [term] => type_expr(*term, source),
        _ => TypeExpr::other(get_node_text(node, source)),
    }
}

fn type_expr(node: Node, source: &[u8]) -> TypeExpr {
    let fallback = || TypeExpr::other(get_node_text(node, source));
    match node.kind() {
        "type_identifier" => TypeExpr::named(get_node_text(node, source)),
        "pointer_type" => first_named_child(node)
            .map(|inner| TypeExpr::pointer(type_expr(inner, source)))
            .unwrap_or_else(fallback),
        "slice_type" => node
            .child_by_field_name("element")
            .map(|element| TypeExpr::slice(type_expr(element, source)))
            .unwrap_or_else(fallback),
        "map_type" => match (
            node.child_by_field_name("key"),
            node.child_by_field_name("value"),
        ) {
            (Some(key), Some(value)) => TypeExpr::map(type_expr(key, source), type_expr(value, source)),
            _ => fallback(),
        },
        "qualified_type" => match (
            node.child_by_field_name("package"),
            node.child_by_field_name("name"),
        ) {
            (Some(package), Some(name)) => {
                TypeExpr::qualified(get_node_text(package, source), get_node_text(name, source))
            }
            _ => fallback(),
        },
        "interface_type" if first_named_child(node).is_none() => TypeExpr::EmptyInterface,
        "parenthesized_type" => first_named_child(node)
            .map(|inner| type_expr(inner, source))
            .unwrap_or_else(fallback),
        _ => fallback(),
    }
}

// =============================================================================
// Comments
// =============================================================================

/// Doc comment for a declaration: the run of comments directly above it.
///
/// A comment that trails an earlier declaration on its own line ends the run.
fn doc_comment(node: Node, source: &[u8]) -> String {
    let mut comments = Vec::new();
    let mut current = node;

    while let Some(prev) = current.prev_named_sibling() {
        if prev.kind() != "comment" || prev.end_position().row + 1 < current.start_position().row
        {
            break;
        }
        if let Some(before) = prev.prev_named_sibling()
            && before.kind() != "comment"
            && before.end_position().row == prev.start_position().row
        {
            break;
        }
        comments.push(prev);
        current = prev;
    }

    comments
        .into_iter()
        .rev()
        .map(|n| get_node_text(n, source))
        .filter(|raw| !DIRECTIVE.is_match(raw))
        .flat_map(comment_lines)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Same-line comment after a field, markers stripped
fn trailing_comment(decl: Node, source: &[u8]) -> String {
    let row = decl.end_position().row;
    let mut cursor = decl.walk();
    let inner = decl
        .named_children(&mut cursor)
        .find(|n| n.kind() == "comment");
    let comment = inner.or_else(|| {
        decl.next_named_sibling()
            .filter(|n| n.kind() == "comment" && n.start_position().row == row)
    });

    comment
        .map(|n| comment_lines(get_node_text(n, source)).join(" ").trim().to_string())
        .unwrap_or_default()
}

fn comment_lines(raw: &str) -> Vec<String> {
    if let Some(line) = raw.strip_prefix("//") {
        let line = line.strip_prefix(' ').unwrap_or(line);
        return vec![line.trim_end().to_string()];
    }
    let inner = raw
        .strip_prefix("/*")
        .and_then(|s| s.strip_suffix("*/"))
        .unwrap_or(raw);
    inner.lines().map(|l| l.trim_end().to_string()).collect()
}

// =============================================================================
// Node helpers
// =============================================================================

/// Named children without interleaved comments
fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn first_named_child(node: Node) -> Option<Node> {
    named_children(node).into_iter().next()
}

fn field_texts(node: Node, field: &str, source: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .map(|n| get_node_text(n, source).to_string())
        .collect()
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
