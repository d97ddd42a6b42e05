//! Statement IR produced by the line grammar
//!
//! One variant per statement shape, each carrying only its own fields.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Directory(DirectoryDecl),
    File(FileDecl),
    Component(ComponentDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Reference(ReferenceDecl),
    Note(NoteDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryDecl {
    pub name: String,
}

/// `name` is the full file name including the extension, e.g. `index.test.ts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDecl {
    pub name: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDecl {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDecl {
    pub name: String,
    pub value: String,
}

/// Dotted target such as `utils.validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceDecl {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDecl {
    pub text: String,
}

impl Statement {
    /// Human readable statement kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Directory(_) => "Directory",
            Statement::File(_) => "File",
            Statement::Component(_) => "Component",
            Statement::Function(_) => "Function",
            Statement::Variable(_) => "Variable",
            Statement::Reference(_) => "Reference",
            Statement::Note(_) => "Note",
        }
    }
}
