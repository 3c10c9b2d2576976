//! Markdown document assembly
//!
//! Walks one documentation package in declaration order and writes the
//! filtered functions, types and methods as Markdown sections.

use std::io::Write;

use tracing::debug;

use super::fields::write_struct;
use super::filter::RenderOptions;
use super::signature::render_signature;
use crate::constants::markdown::SOURCE_FENCE;
use crate::types::{DocumentationPackage, FunctionDoc, Result, TypeDoc};

/// Write the Markdown document for `pkg` to `out`.
///
/// The output always starts with the `# Package` header. When filtering
/// leaves no functions and no types, a single notice line follows and
/// nothing else is written.
pub fn write_markdown<W: Write + ?Sized>(
    pkg: &DocumentationPackage,
    out: &mut W,
    options: RenderOptions,
) -> Result<()> {
    write!(out, "# Package {}\n\n", pkg.name)?;

    let functions: Vec<&FunctionDoc> = pkg
        .functions
        .iter()
        .filter(|f| options.includes(&f.name, &f.doc))
        .collect();
    let types: Vec<&TypeDoc> = pkg
        .types
        .iter()
        .filter(|t| options.includes(&t.name, &t.doc))
        .collect();

    if functions.is_empty() && types.is_empty() {
        debug!("Package {} has no symbols after filtering", pkg.name);
        writeln!(out, "_No exported symbols in package `{}`._", pkg.name)?;
        return Ok(());
    }

    for func in functions {
        write_function(out, func)?;
    }

    for ty in types {
        write_type(out, ty, options)?;
    }

    Ok(())
}

fn write_function<W: Write + ?Sized>(out: &mut W, func: &FunctionDoc) -> Result<()> {
    writeln!(out, "\n---")?;
    match func.receiver_type_name() {
        Some(receiver) => write!(
            out,
            "## <small><em>{}.</em></small>{}\n\n",
            receiver, func.name
        )?,
        None => write!(out, "## {}\n\n", func.name)?,
    }

    write!(
        out,
        "```{}\n{}\n```\n\n",
        SOURCE_FENCE,
        render_signature(func)
    )?;

    let doc = format_doc_comment(&func.doc);
    if !doc.is_empty() {
        writeln!(out, "{}", doc)?;
    }
    Ok(())
}

fn write_type<W: Write + ?Sized>(out: &mut W, ty: &TypeDoc, options: RenderOptions) -> Result<()> {
    writeln!(out, "\n---")?;
    write!(out, "## {}\n\n", ty.name)?;

    let doc = format_doc_comment(&ty.doc);
    if !doc.is_empty() {
        writeln!(out, "{}", doc)?;
        writeln!(out)?;
    }

    if let Some(fields) = ty.fields() {
        write_struct(out, &ty.name, fields)?;
    }

    for method in ty
        .methods
        .iter()
        .filter(|m| options.includes(&m.name, &m.doc))
    {
        write_function(out, method)?;
    }
    Ok(())
}

/// Strip leading `//` markers per line and trim the whole block
pub fn format_doc_comment(doc: &str) -> String {
    doc.lines()
        .map(|line| line.strip_prefix("//").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::{GoParser, Parser};
    use crate::types::{
        FieldDoc, ParamGroup, Receiver, ReceiverKind, StructTag, TypeDecl, TypeExpr,
    };

    fn render_markdown(pkg: &DocumentationPackage, options: RenderOptions) -> Result<String> {
        let mut buf = Vec::new();
        write_markdown(pkg, &mut buf, options)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn user_package() -> DocumentationPackage {
        let fields = vec![
            FieldDoc::new("Name", TypeExpr::named("string"))
                .with_tag(&StructTag::new(r#"json:"name" dynamodbav:"username""#)),
            FieldDoc::new("Age", TypeExpr::named("int"))
                .with_tag(&StructTag::new(r#"json:"age,omitempty" dynamodbav:"user_age""#)),
        ];
        let mut pkg = DocumentationPackage::new("testpkg");
        pkg.types.push(TypeDoc::new(
            "User",
            "User represents a system user.",
            TypeDecl::Struct(fields),
        ));
        pkg
    }

    fn method(recv: &str, name: &str, doc: &str) -> FunctionDoc {
        FunctionDoc::new(name, doc).with_receiver(Receiver::new(
            Some("r".into()),
            ReceiverKind::Pointer(recv.into()),
        ))
    }

    fn mixed_package() -> DocumentationPackage {
        let mut pkg = DocumentationPackage::new("mixed");
        pkg.functions = vec![
            FunctionDoc::new("New", "New builds a Store.")
                .with_results(vec![ParamGroup::unnamed(TypeExpr::pointer(
                    TypeExpr::named("Store"),
                ))]),
            FunctionDoc::new("helper", "helper is internal."),
            FunctionDoc::new("Undocumented", ""),
        ];
        pkg.types = vec![
            TypeDoc::new(
                "Store",
                "Store keeps items.",
                TypeDecl::Other(TypeExpr::map(
                    TypeExpr::named("string"),
                    TypeExpr::named("int"),
                )),
            )
            .with_methods(vec![
                method("Store", "Get", "Get returns an item."),
                method("Store", "evict", "evict drops an item."),
                method("Store", "Len", ""),
            ]),
            TypeDoc::new("cache", "cache is private.", TypeDecl::Struct(vec![])),
            TypeDoc::new("Bare", "", TypeDecl::Struct(vec![]))
                .with_methods(vec![method("Bare", "Touch", "Touch marks it.")]),
        ];
        pkg
    }

    fn headings(markdown: &str) -> Vec<&str> {
        markdown.lines().filter(|l| l.starts_with("## ")).collect()
    }

    #[test]
    fn test_user_struct_scenario() {
        let out = render_markdown(&user_package(), RenderOptions::default()).unwrap();

        assert!(out.starts_with("# Package testpkg\n\n"));
        assert!(out.contains("## User\n\nUser represents a system user.\n\n"));
        assert!(out.contains("```go\ntype User struct {\n    Name string\n    Age  int   \n}\n```"));
        assert!(out.contains("\"name\","));
        assert!(out.contains("\"age\","));
        assert!(!out.contains("omitempty"));
        assert!(out.contains(&format!("{:<25} String", "username")));
        assert!(out.contains(&format!("{:<25} Number", "user_age")));
    }

    #[test]
    fn test_exact_type_section_layout() {
        let out = render_markdown(&user_package(), RenderOptions::default()).unwrap();
        let expected = format!(
            "# Package testpkg\n\n\n---\n## User\n\nUser represents a system user.\n\n\
             ```go\ntype User struct {{\n    Name string\n    Age  int   \n}}\n```\n\n\
             #### JSON\n\n```json\n{{\n  \"name\",\n  \"age\",\n}}\n```\n\
             #### DynamoDB\n\n```sql\n{:<25} String\n{:<25} Number\n```\n\n",
            "username", "user_age"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_package_notice() {
        let pkg = DocumentationPackage::new("empty");
        let out = render_markdown(&pkg, RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "# Package empty\n\n_No exported symbols in package `empty`._\n"
        );
    }

    #[test]
    fn test_notice_when_filter_removes_everything() {
        let mut pkg = DocumentationPackage::new("internal");
        pkg.functions.push(FunctionDoc::new("run", "run starts it."));
        pkg.types
            .push(TypeDoc::new("Config", "", TypeDecl::Struct(vec![])));

        let out = render_markdown(&pkg, RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "# Package internal\n\n_No exported symbols in package `internal`._\n"
        );

        let all = render_markdown(&pkg, RenderOptions::all()).unwrap();
        assert!(all.contains("## run"));
        assert!(all.contains("## Config"));
    }

    #[test]
    fn test_function_section_layout() {
        let mut pkg = DocumentationPackage::new("calc");
        pkg.functions.push(
            FunctionDoc::new("Add", "Add returns the sum of two integers.")
                .with_params(vec![ParamGroup::named(["a", "b"], TypeExpr::named("int"))])
                .with_results(vec![ParamGroup::unnamed(TypeExpr::named("int"))]),
        );
        let out = render_markdown(&pkg, RenderOptions::default()).unwrap();
        assert_eq!(
            out,
            "# Package calc\n\n\n---\n## Add\n\n```go\nfunc Add(a, b int) int\n```\n\n\
             Add returns the sum of two integers.\n"
        );
    }

    #[test]
    fn test_shared_field_declaration_lists_tag_once() {
        let source = "package geo\n\n// Point is a location.\ntype Point struct {\n\tX, Y  int `json:\"coord\" dynamodbav:\"c\"`\n\tLabel string\n}\n";
        let file = GoParser::new().unwrap().parse("geo.go", source).unwrap();
        let mut pkg = DocumentationPackage::new("geo");
        pkg.types = file.types;

        let out = render_markdown(&pkg, RenderOptions::default()).unwrap();
        assert!(out.contains("type Point struct {\n    X, Y  int   \n    Label string\n}"));
        assert_eq!(out.matches("\"coord\",").count(), 1);
        assert_eq!(out.matches(&format!("{:<25} Number", "c")).count(), 1);
    }

    #[test]
    fn test_method_heading_prefixes_receiver() {
        let out = render_markdown(&mixed_package(), RenderOptions::default()).unwrap();
        assert!(out.contains("## <small><em>Store.</em></small>Get\n\n```go\nfunc (r *Store) Get()\n```"));
    }

    #[test]
    fn test_default_filters_only_exported_documented() {
        let out = render_markdown(&mixed_package(), RenderOptions::default()).unwrap();
        assert_eq!(
            headings(&out),
            vec!["## New", "## Store", "## <small><em>Store.</em></small>Get"]
        );
    }

    #[test]
    fn test_all_filters_render_every_symbol_once() {
        let out = render_markdown(&mixed_package(), RenderOptions::all()).unwrap();
        let expected = [
            "## New",
            "## helper",
            "## Undocumented",
            "## Store",
            "## <small><em>Store.</em></small>Get",
            "## <small><em>Store.</em></small>evict",
            "## <small><em>Store.</em></small>Len",
            "## cache",
            "## Bare",
            "## <small><em>Bare.</em></small>Touch",
        ];
        assert_eq!(headings(&out), expected);
    }

    #[test]
    fn test_methods_hidden_with_their_type() {
        // Bare is undocumented, so its documented method is not rendered either
        let out = render_markdown(&mixed_package(), RenderOptions::default()).unwrap();
        assert!(!out.contains("Touch"));
    }

    #[test]
    fn test_non_struct_type_has_no_code_block() {
        let mut pkg = DocumentationPackage::new("p");
        pkg.types.push(TypeDoc::new(
            "Level",
            "Level is a log level.",
            TypeDecl::Other(TypeExpr::named("int")),
        ));
        let out = render_markdown(&pkg, RenderOptions::default()).unwrap();
        assert!(out.ends_with("## Level\n\nLevel is a log level.\n\n"));
    }

    #[test]
    fn test_format_doc_comment() {
        assert_eq!(format_doc_comment("// Hello\n// world"), "Hello\n world");
        assert_eq!(format_doc_comment("\n\nLine one.\nLine two.\n\n"), "Line one.\nLine two.");
        assert_eq!(format_doc_comment("   "), "");
    }

    #[test]
    fn test_write_error_is_propagated() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_markdown(&user_package(), &mut Broken, RenderOptions::default());
        assert!(matches!(err, Err(crate::types::GodocError::Io(_))));
    }
}
