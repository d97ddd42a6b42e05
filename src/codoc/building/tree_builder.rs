//! Tree Builder - builds the node forest from outline lines
//!
//! # Responsibilities
//!
//! 1. Measure indentation and flag widths that are not a multiple of the unit
//! 2. Parse each line into a statement and turn it into a node
//! 3. Reduce the indentation stack and attach the node to a legal parent
//! 4. Derive canonical paths once the parent is known, merging repeated directories and files

use std::collections::HashMap;
use tracing::{debug, trace};

use super::rules::is_legal_child;
use super::{ParseOptions, ParseResult};
use crate::codoc::ast::diagnostics::codes;
use crate::codoc::ast::{content_hash, Diagnostic, Forest, NodeId, NodeKind, SchemaNode};
use crate::codoc::parsing::{parse_line, LineOutcome, Statement};

/// Stateful builder for a single source text.
///
/// A builder is consumed by [TreeBuilder::build]; build a new one per parse.
pub struct TreeBuilder {
    indent_width: usize,
    forest: Forest,
    /// Open nodes, innermost last, with the indent level they were declared at
    stack: Vec<(NodeId, usize)>,
    /// Directory and file nodes by path, so a repeated declaration reopens the first
    containers: HashMap<String, NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl TreeBuilder {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            indent_width: options.indent_width.max(1),
            forest: Forest::new(),
            stack: Vec::new(),
            containers: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn build(mut self, source: &str) -> ParseResult {
        for (index, line) in source.lines().enumerate() {
            self.process_line(index + 1, line);
        }

        debug!(
            nodes = self.forest.len(),
            roots = self.forest.roots().len(),
            diagnostics = self.diagnostics.len(),
            "built outline forest"
        );

        ParseResult {
            forest: self.forest,
            diagnostics: self.diagnostics,
        }
    }

    fn process_line(&mut self, line_number: usize, line: &str) {
        let body = line.trim_start_matches(' ');
        let leading_spaces = line.len() - body.len();

        let statement = match parse_line(line) {
            Ok(LineOutcome::Statement(statement)) => statement,
            Ok(LineOutcome::Blank) => return,
            Ok(LineOutcome::Incomplete) => {
                trace!(line = line_number, "skipping incomplete input");
                return;
            }
            Err(err) => {
                debug!(line = line_number, error = %err, "dropping line");
                self.check_indentation(line_number, leading_spaces);
                self.diagnostics.push(
                    Diagnostic::error(line_number, capitalize(&err.to_string()))
                        .with_code(codes::SYNTAX_ERROR),
                );
                return;
            }
        };

        self.check_indentation(line_number, leading_spaces);
        let indent_level = leading_spaces / self.indent_width;

        let Some(mut node) = node_for(statement, line_number) else {
            return;
        };
        node.content_hash = content_hash(line);
        node.indent_level = indent_level;
        node.column = indent_level * self.indent_width;

        while matches!(self.stack.last(), Some(&(_, level)) if level >= indent_level) {
            self.stack.pop();
        }

        let parent = self.resolve_parent(&node, indent_level, line_number);
        node.path = self.path_for(&node, parent);

        if node.kind.is_container() {
            if let Some(&existing) = self.containers.get(&node.path) {
                self.diagnostics.push(
                    Diagnostic::warning(
                        line_number,
                        format!(
                            "{} '{}' is already declared; merged into the earlier declaration",
                            node.kind, node.path
                        ),
                    )
                    .with_code(codes::DUPLICATE_PATH),
                );
                self.stack.push((existing, indent_level));
                return;
            }
        }

        let id = self.forest.push(node);
        match parent {
            Some(parent) => self.forest.attach(id, parent),
            None => self.forest.add_root(id),
        }
        if self.forest[id].kind.is_container() {
            self.containers.insert(self.forest[id].path.clone(), id);
        }
        trace!(
            line = line_number,
            kind = %self.forest[id].kind,
            path = %self.forest[id].path,
            "added node"
        );
        self.stack.push((id, indent_level));
    }

    fn check_indentation(&mut self, line_number: usize, leading_spaces: usize) {
        if leading_spaces % self.indent_width != 0 {
            self.diagnostics.push(
                Diagnostic::warning(
                    line_number,
                    format!(
                        "Indentation of {} spaces is not a multiple of {}",
                        leading_spaces, self.indent_width
                    ),
                )
                .with_code(codes::INDENTATION),
            );
        }
    }

    /// Innermost legal node on the stack for `node`, or `None` for top-level.
    fn resolve_parent(
        &mut self,
        node: &SchemaNode,
        indent_level: usize,
        line_number: usize,
    ) -> Option<NodeId> {
        let kind = node.kind;

        let Some(&(parent, _)) = self.stack.last() else {
            if indent_level > 0 {
                let message = format!(
                    "{} '{}' is indented but has no enclosing parent; made top-level",
                    kind, node.name
                );
                self.diagnostics.push(
                    Diagnostic::warning(line_number, message).with_code(codes::MADE_TOP_LEVEL),
                );
            }
            return None;
        };

        let parent_kind = self.forest[parent].kind;
        if is_legal_child(parent_kind, kind) {
            return Some(parent);
        }

        let ancestor = self
            .stack
            .iter()
            .rev()
            .map(|&(candidate, _)| candidate)
            .find(|candidate| is_legal_child(self.forest[*candidate].kind, kind));

        match ancestor {
            Some(ancestor) => {
                let message = format!(
                    "{} cannot be nested under {}; attached to {} '{}' instead",
                    kind, parent_kind, self.forest[ancestor].kind, self.forest[ancestor].name
                );
                debug!(line = line_number, %kind, %parent_kind, "auto-corrected parent");
                self.diagnostics.push(
                    Diagnostic::warning(line_number, message)
                        .with_code(codes::AUTO_CORRECTED_PARENT),
                );
                Some(ancestor)
            }
            None => {
                let message = format!(
                    "{} cannot be nested under {}; made top-level",
                    kind, parent_kind
                );
                debug!(line = line_number, %kind, %parent_kind, "made top-level");
                self.diagnostics.push(
                    Diagnostic::warning(line_number, message).with_code(codes::MADE_TOP_LEVEL),
                );
                None
            }
        }
    }

    /// Directory and file paths are the `/`-joined container chain. Everything else
    /// is `<owning file path>#<name>` once it has a parent.
    fn path_for(&self, node: &SchemaNode, parent: Option<NodeId>) -> String {
        let Some(parent) = parent else {
            return node.name.clone();
        };
        let prefix = self.forest.container_path(parent);
        match (node.kind.is_container(), prefix.is_empty()) {
            (_, true) => node.name.clone(),
            (true, false) => format!("{}/{}", prefix, node.name),
            (false, false) => format!("{}#{}", prefix, node.name),
        }
    }
}

/// Node for a statement. Variables produce none.
fn node_for(statement: Statement, line_number: usize) -> Option<SchemaNode> {
    let node = match statement {
        Statement::Directory(decl) => SchemaNode::new(NodeKind::Directory, decl.name),
        Statement::File(decl) => {
            SchemaNode::new(NodeKind::File, decl.name).with_extension(decl.extension)
        }
        Statement::Component(decl) => SchemaNode::new(NodeKind::Component, decl.name),
        Statement::Function(decl) => SchemaNode::new(NodeKind::Function, decl.name),
        Statement::Reference(decl) => {
            let dependencies = vec![decl.name.clone()];
            SchemaNode::new(NodeKind::Reference, decl.name).with_dependencies(dependencies)
        }
        Statement::Note(decl) => {
            SchemaNode::new(NodeKind::Note, decl.text.clone()).with_content(decl.text)
        }
        Statement::Variable(decl) => {
            trace!(line = line_number, name = %decl.name, "discarding variable");
            return None;
        }
    };
    Some(node.with_position(line_number, 0))
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
