//! Struct field rendering
//!
//! Produces the aligned pseudo-source block for a struct plus the optional
//! JSON and DynamoDB metadata blocks derived from field tags.

use std::io::Write;

use crate::constants::markdown::{
    FIELD_INDENT, JSON_FENCE, SOURCE_FENCE, STORAGE_COLUMN_WIDTH, STORAGE_FENCE,
};
use crate::types::{FieldDoc, Result};

/// Named fields only; embedded fields take no part in any block
fn named_fields(fields: &[FieldDoc]) -> impl Iterator<Item = &FieldDoc> {
    fields.iter().filter(|f| !f.embedded)
}

/// Render `type <name> struct { ... }` with name and type columns aligned.
pub fn render_struct(type_name: &str, fields: &[FieldDoc]) -> String {
    let rows: Vec<(&FieldDoc, String)> = named_fields(fields)
        .map(|f| (f, f.field_type.to_string()))
        .collect();

    let name_width = rows
        .iter()
        .map(|(f, _)| f.name.chars().count())
        .max()
        .unwrap_or(0);
    let type_width = rows
        .iter()
        .map(|(_, ty)| ty.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("type {} struct {{\n", type_name);
    for (field, ty) in &rows {
        let mut line = format!(
            "{}{:<name_width$} {:<type_width$}",
            FIELD_INDENT, field.name, ty
        );
        if !field.comment.is_empty() {
            line.push_str(" // ");
            line.push_str(&field.comment);
        }
        out.push_str(&line);
        out.push('\n');
    }
    out.push('}');
    out
}

/// JSON block listing serialization tag names, or `None` when no field has one
pub fn render_json_block(fields: &[FieldDoc]) -> Option<String> {
    let tags: Vec<&str> = named_fields(fields)
        .map(|f| f.serialization_tag.as_str())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return None;
    }

    let mut out = format!("#### JSON\n\n```{}\n{{\n", JSON_FENCE);
    for tag in tags {
        out.push_str(&format!("  \"{}\",\n", tag));
    }
    out.push_str("}\n```");
    Some(out)
}

/// DynamoDB block mapping storage tags to inferred types, or `None` when untagged
pub fn render_storage_block(fields: &[FieldDoc]) -> Option<String> {
    let lines: Vec<String> = named_fields(fields)
        .filter(|f| !f.storage_tag.is_empty())
        .map(|f| {
            format!(
                "{:<width$} {}",
                f.storage_tag,
                f.inferred_storage_type,
                width = STORAGE_COLUMN_WIDTH
            )
        })
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut out = format!("#### DynamoDB\n\n```{}\n", STORAGE_FENCE);
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("```\n");
    Some(out)
}

/// Write the struct block followed by any metadata blocks
pub fn write_struct<W: Write + ?Sized>(
    out: &mut W,
    type_name: &str,
    fields: &[FieldDoc],
) -> Result<()> {
    write!(
        out,
        "```{}\n{}\n```\n\n",
        SOURCE_FENCE,
        render_struct(type_name, fields)
    )?;
    if let Some(json) = render_json_block(fields) {
        writeln!(out, "{}", json)?;
    }
    if let Some(storage) = render_storage_block(fields) {
        writeln!(out, "{}", storage)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StorageType, StructTag, TypeExpr};
    use proptest::prelude::*;

    fn user_fields() -> Vec<FieldDoc> {
        vec![
            FieldDoc::new("Name", TypeExpr::named("string"))
                .with_tag(&StructTag::new(r#"json:"name" dynamodbav:"username""#)),
            FieldDoc::new("Age", TypeExpr::named("int"))
                .with_tag(&StructTag::new(r#"json:"age,omitempty" dynamodbav:"user_age""#)),
        ]
    }

    #[test]
    fn test_struct_rows_are_aligned() {
        let text = render_struct("User", &user_fields());
        assert_eq!(
            text,
            "type User struct {\n    Name string\n    Age  int   \n}"
        );
    }

    #[test]
    fn test_trailing_comment_is_appended() {
        let fields = vec![
            FieldDoc::new("ID", TypeExpr::named("string")).with_comment("primary key"),
            FieldDoc::new("Tags", TypeExpr::slice(TypeExpr::named("string"))),
        ];
        let text = render_struct("Item", &fields);
        assert!(text.contains("    ID   string   // primary key\n"));
        assert!(text.contains("    Tags []string\n"));
    }

    #[test]
    fn test_embedded_fields_are_skipped() {
        let fields = vec![
            FieldDoc::embedded(TypeExpr::pointer(TypeExpr::qualified("sync", "Mutex")))
                .with_tag(&StructTag::new(r#"json:"mu" dynamodbav:"mu""#)),
            FieldDoc::new("A", TypeExpr::named("int")),
        ];
        assert_eq!(
            render_struct("S", &fields),
            "type S struct {\n    A int\n}"
        );
        assert!(render_json_block(&fields).is_none());
        assert!(render_storage_block(&fields).is_none());
    }

    #[test]
    fn test_empty_struct() {
        assert_eq!(render_struct("Empty", &[]), "type Empty struct {\n}");
    }

    #[test]
    fn test_json_block_strips_options() {
        let block = render_json_block(&user_fields()).unwrap();
        assert_eq!(
            block,
            "#### JSON\n\n```json\n{\n  \"name\",\n  \"age\",\n}\n```"
        );
        assert!(!block.contains("omitempty"));
    }

    #[test]
    fn test_json_block_omits_untagged_fields() {
        let fields = vec![
            FieldDoc::new("A", TypeExpr::named("int")),
            FieldDoc::new("B", TypeExpr::named("int")).with_tag(&StructTag::new(r#"json:"b""#)),
        ];
        let block = render_json_block(&fields).unwrap();
        assert!(block.contains("  \"b\",\n"));
        assert!(!block.contains("\"A\""));
    }

    #[test]
    fn test_storage_block_pads_to_column() {
        let block = render_storage_block(&user_fields()).unwrap();
        let expected = format!(
            "#### DynamoDB\n\n```sql\n{:<25} String\n{:<25} Number\n```\n",
            "username", "user_age"
        );
        assert_eq!(block, expected);
    }

    #[test]
    fn test_storage_block_types() {
        let fields = vec![
            FieldDoc::new("Active", TypeExpr::pointer(TypeExpr::named("bool")))
                .with_tag(&StructTag::new(r#"dynamodbav:"active""#)),
            FieldDoc::new("Address", TypeExpr::named("Address"))
                .with_tag(&StructTag::new(r#"dynamodbav:"addr""#)),
        ];
        assert_eq!(fields[0].inferred_storage_type, StorageType::Boolean);
        let block = render_storage_block(&fields).unwrap();
        assert!(block.contains(&format!("{:<25} Boolean", "active")));
        assert!(block.contains(&format!("{:<25} String", "addr")));
    }

    #[test]
    fn test_no_tags_no_blocks() {
        let fields = vec![FieldDoc::new("A", TypeExpr::named("int"))];
        assert!(render_json_block(&fields).is_none());
        assert!(render_storage_block(&fields).is_none());

        let mut out = Vec::new();
        write_struct(&mut out, "T", &fields).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "```go\ntype T struct {\n    A int\n}\n```\n\n");
    }

    proptest! {
        #[test]
        fn test_type_column_starts_at_same_offset(
            names in prop::collection::vec("[A-Z][a-zA-Z0-9]{0,15}", 1..8)
        ) {
            let fields: Vec<FieldDoc> = names
                .iter()
                .map(|n| FieldDoc::new(n.clone(), TypeExpr::named("string")))
                .collect();
            let text = render_struct("T", &fields);
            let width = names.iter().map(|n| n.len()).max().unwrap();
            for row in text.lines().skip(1).filter(|l| l.starts_with("    ")) {
                prop_assert_eq!(&row[4 + width + 1..], "string");
            }
        }
    }
}
