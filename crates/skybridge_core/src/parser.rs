use log::{debug, trace, warn};
use std::fs;
use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::{
    error::{Error, Result},
    types::{Extraction, FileImports, SourceFile},
};

/// Location of the first syntax error in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid syntax at line {line}, column {column}")]
pub struct ParseFailure {
    pub line: usize,
    pub column: usize,
}

/// Extracts import identities from Python source.
///
/// Wraps a tree-sitter parser loaded with the Python grammar. A parser is not
/// `Sync`, so each worker thread owns its own instance.
pub struct ImportParser {
    parser: Parser,
}

impl ImportParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Read `file` and extract its imports.
    ///
    /// A syntax error is not fatal: it is logged and the file contributes
    /// nothing. Read and decoding failures are returned as errors.
    pub fn imports_for(&mut self, file: &SourceFile) -> Result<Extraction> {
        trace!("Parsing file for imports: {}", file);
        let src = fs::read_to_string(file.path())
            .map_err(|source| Error::Read { path: file.path().to_path_buf(), source })?;

        match self.extract_imports(&src) {
            Ok(imports) => {
                debug!("Found {} import identities in {}", imports.len(), file);
                Ok(Extraction::Parsed(imports))
            }
            Err(failure) => {
                warn!("Syntax error in {}: {}", file, failure);
                Ok(Extraction::SyntaxError)
            }
        }
    }

    /// Extract direct and from-import identities from `source`.
    ///
    /// Every import statement in the tree is visited, including those nested
    /// inside functions, classes and conditionals.
    pub fn extract_imports(
        &mut self,
        source: &str,
    ) -> std::result::Result<FileImports, ParseFailure> {
        let tree = self.parser.parse(source, None).ok_or(ParseFailure { line: 1, column: 1 })?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(first_error(root));
        }

        let src = source.as_bytes();
        let mut imports = FileImports::default();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_statement" => collect_direct(node, src, &mut imports),
                "import_from_statement" => {
                    let module = node
                        .child_by_field_name("module_name")
                        .map(|m| module_path(m, src))
                        .unwrap_or_default();
                    collect_from(node, module, src, &mut imports);
                }
                "future_import_statement" => {
                    collect_from(node, "__future__".to_string(), src, &mut imports);
                }
                _ => {
                    let mut cursor = node.walk();
                    stack.extend(node.named_children(&mut cursor));
                }
            }
        }

        Ok(imports)
    }
}

fn collect_direct(node: Node, src: &[u8], imports: &mut FileImports) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(path) = imported_name(name, src) {
            trace!("Found direct import: '{}'", path);
            imports.direct.insert(path);
        }
    }
}

fn collect_from(node: Node, module: String, src: &[u8], imports: &mut FileImports) {
    let mut cursor = node.walk();
    let mut names: Vec<String> = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|n| imported_name(n, src))
        .collect();

    let mut cursor = node.walk();
    if node.named_children(&mut cursor).any(|c| c.kind() == "wildcard_import") {
        names.push("*".to_string());
    }

    for name in names {
        let identity = format!("{module}.{name}");
        trace!("Found from import: '{}'", identity);
        imports.from.insert(identity);
    }
}

/// Dotted path bound by one entry of an import list, ignoring any alias.
fn imported_name(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "aliased_import" => node.child_by_field_name("name").and_then(|n| imported_name(n, src)),
        "dotted_name" => Some(dotted_name(node, src)),
        "identifier" => node.utf8_text(src).ok().map(str::to_string),
        _ => None,
    }
}

fn dotted_name(node: Node, src: &[u8]) -> String {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() == "identifier")
        .filter_map(|n| n.utf8_text(src).ok())
        .collect::<Vec<_>>()
        .join(".")
}

/// Module of a from-import. Relative prefixes are dropped, so `from .a import b`
/// yields `a` and `from . import x` yields the empty module.
fn module_path(node: Node, src: &[u8]) -> String {
    match node.kind() {
        "dotted_name" => dotted_name(node, src),
        "relative_import" => {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|n| n.kind() == "dotted_name")
                .map(|n| dotted_name(n, src))
                .unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn first_error(root: Node) -> ParseFailure {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return ParseFailure { line: pos.row + 1, column: pos.column + 1 };
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    let pos = root.start_position();
    ParseFailure { line: pos.row + 1, column: pos.column + 1 }
}
