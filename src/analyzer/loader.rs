//! Package Loader
//!
//! Builds a [`DocumentationPackage`] from the Go files of one directory.
//! Files are read in lexical name order and declarations keep file order, so
//! the resulting package is deterministic for a given directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::parser::{GoParser, ParsedFile, Parser};
use crate::constants::scanner::{GO_EXTENSION, TEST_FILE_SUFFIX};
use crate::types::{DocumentationPackage, GodocError, Result};

pub struct PackageLoader {
    parser: Box<dyn Parser>,
}

impl PackageLoader {
    pub fn new() -> Result<Self> {
        Ok(Self::with_parser(Box::new(GoParser::new()?)))
    }

    pub fn with_parser(parser: Box<dyn Parser>) -> Self {
        Self { parser }
    }

    /// Load the package declared by the non-test Go files directly in `dir`.
    pub fn load(&self, dir: &Path) -> Result<DocumentationPackage> {
        let files = source_files(dir)?;

        let mut parsed = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path).map_err(|source| GodocError::Read {
                path: path.clone(),
                source,
            })?;
            parsed.push(self.parser.parse(&path.to_string_lossy(), &content)?);
        }

        let package =
            assemble(parsed).ok_or_else(|| GodocError::NoPackage(dir.to_path_buf()))?;
        debug!(
            "Loaded package {} from {} ({} symbols)",
            package.name,
            dir.display(),
            package.symbol_count()
        );
        Ok(package)
    }
}

/// Non-test `.go` files directly inside `dir`, sorted by name
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source: std::io::Error| GodocError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();
        if !entry.file_type().map_err(read_error)?.is_file() {
            continue;
        }
        let is_go = path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION);
        let is_test = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX));
        if is_go && !is_test {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Merge parsed files into one package and attach methods to their types.
///
/// The first file names the package; files declaring another package are
/// skipped. Returns `None` when there are no files.
pub fn assemble(files: Vec<ParsedFile>) -> Option<DocumentationPackage> {
    let name = files.first()?.package.clone();
    let mut package = DocumentationPackage::new(name.clone());
    let mut methods = Vec::new();

    for file in files {
        if file.package != name {
            debug!(
                "Skipping {}: declares package {}, expected {}",
                file.path, file.package, name
            );
            continue;
        }
        package.functions.extend(file.functions);
        package.types.extend(file.types);
        methods.extend(file.methods);
    }

    for method in methods {
        let Some(type_name) = method
            .receiver
            .as_ref()
            .and_then(|r| r.local_type())
            .map(str::to_string)
        else {
            debug!("Dropping method {}: receiver is not a local type", method.name);
            continue;
        };

        match package.types.iter_mut().find(|t| t.name == type_name) {
            Some(ty) => ty.methods.push(method),
            None => debug!(
                "Dropping method {}.{}: type not declared in package {}",
                type_name, method.name, package.name
            ),
        }
    }

    Some(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionDoc, Receiver, ReceiverKind, TypeDecl, TypeDoc};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn method(recv: ReceiverKind, name: &str) -> FunctionDoc {
        FunctionDoc::new(name, "").with_receiver(Receiver::new(None, recv))
    }

    #[test]
    fn test_load_merges_files_in_name_order() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "b_user.go",
            "package users\n\n// User is a user.\ntype User struct {\n\tName string\n}\n\n// NewUser builds a user.\nfunc NewUser() *User { return nil }\n",
        );
        write(
            temp.path(),
            "a_methods.go",
            "package users\n\n// Greet says hello.\nfunc (u *User) Greet() string { return \"hi\" }\n\n// Helper helps.\nfunc Helper() {}\n",
        );

        let package = PackageLoader::new().unwrap().load(temp.path()).unwrap();

        assert_eq!(package.name, "users");
        let functions: Vec<&str> = package.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["Helper", "NewUser"]);
        assert_eq!(package.types.len(), 1);
        assert_eq!(package.types[0].methods.len(), 1);
        assert_eq!(package.types[0].methods[0].name, "Greet");
        assert_eq!(package.symbol_count(), 4);
    }

    #[test]
    fn test_load_skips_test_and_non_go_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "api.go", "package api\n\n// Ping pings.\nfunc Ping() {}\n");
        write(temp.path(), "api_test.go", "package api\n\nfunc TestPing() {}\n");
        write(temp.path(), "README.md", "# api\n");
        fs::create_dir(temp.path().join("nested.go")).unwrap();

        let package = PackageLoader::new().unwrap().load(temp.path()).unwrap();
        let functions: Vec<&str> = package.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["Ping"]);
    }

    #[test]
    fn test_load_empty_directory_is_no_package() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "only_test.go", "package p\n");

        let err = PackageLoader::new().unwrap().load(temp.path()).unwrap_err();
        assert!(matches!(err, GodocError::NoPackage(_)));
        assert!(err.is_load_error());
    }

    #[test]
    fn test_load_missing_directory_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = PackageLoader::new()
            .unwrap()
            .load(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, GodocError::Read { .. }));
    }

    #[test]
    fn test_load_syntax_error_fails() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.go", "package bad\n\nfunc Broken( {\n");

        let err = PackageLoader::new().unwrap().load(temp.path()).unwrap_err();
        assert!(matches!(err, GodocError::Parse { .. }));
    }

    #[test]
    fn test_assemble_skips_foreign_package_files() {
        let mut first = ParsedFile::new("a.go", "main");
        first.functions.push(FunctionDoc::new("Run", "Run runs."));
        let mut other = ParsedFile::new("b.go", "tools");
        other.functions.push(FunctionDoc::new("Tool", "Tool tools."));

        let package = assemble(vec![first, other]).unwrap();
        assert_eq!(package.name, "main");
        assert_eq!(package.functions.len(), 1);
    }

    #[test]
    fn test_assemble_attaches_and_drops_methods() {
        let mut file = ParsedFile::new("a.go", "shapes");
        file.types.push(TypeDoc::new("Circle", "", TypeDecl::Struct(vec![])));
        file.methods = vec![
            method(ReceiverKind::Pointer("Circle".into()), "Area"),
            method(ReceiverKind::Value("Circle".into()), "String"),
            method(ReceiverKind::Value("Square".into()), "Area"),
            method(
                ReceiverKind::Qualified {
                    package: "geo".into(),
                    name: "Point".into(),
                },
                "Move",
            ),
        ];

        let package = assemble(vec![file]).unwrap();
        let methods: Vec<&str> = package.types[0]
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(methods, vec!["Area", "String"]);
        assert!(package.functions.is_empty());
    }

    #[test]
    fn test_assemble_no_files() {
        assert!(assemble(Vec::new()).is_none());
    }

    #[test]
    fn test_custom_parser_is_used() {
        struct Canned;
        impl Parser for Canned {
            fn parse(&self, path: &str, _content: &str) -> Result<ParsedFile> {
                let mut file = ParsedFile::new(path, "canned");
                file.functions.push(FunctionDoc::new("Fixed", "Fixed is canned."));
                Ok(file)
            }
        }

        let temp = TempDir::new().unwrap();
        write(temp.path(), "x.go", "not go at all");
        write(temp.path(), "y.go", "still not go");

        let package = PackageLoader::with_parser(Box::new(Canned))
            .load(temp.path())
            .unwrap();
        assert_eq!(package.name, "canned");
        assert_eq!(package.functions.len(), 2);
    }
}
