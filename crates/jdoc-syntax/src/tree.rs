//! Arena-backed mutable syntax tree for pre-parsed Java declarations.
//!
//! The tree models exactly the structure the documentation engine needs:
//! declaration nodes carrying their parsed [`Signature`], plus leaf nodes for
//! doc comments, whitespace, and raw code text. Nodes are addressed by
//! [`NodeId`] handles into an arena; handles stay stable across edits, and a
//! deleted node simply becomes detached.

use crate::error::{Result, TreeError};

/// Index of a node within its [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Node kinds distinguished by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a source file.
    File,
    /// A class declaration.
    Class,
    /// An interface declaration.
    Interface,
    /// An enum declaration.
    Enum,
    /// A method or constructor declaration.
    Method,
    /// A field declaration.
    Field,
    /// An enum constant. Structurally a field, but its following token is
    /// not separated from a leading comment by the parser.
    EnumConstant,
    /// A `/** ... */` documentation comment leaf.
    DocComment,
    /// A whitespace leaf.
    Whitespace,
    /// Any other source text the tree does not model structurally.
    Code,
}

impl NodeKind {
    /// Returns `true` for kinds that carry text and never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::DocComment | NodeKind::Whitespace | NodeKind::Code
        )
    }

    /// Returns `true` for class-like declarations that can contain members.
    pub fn is_class_like(self) -> bool {
        matches!(self, NodeKind::Class | NodeKind::Interface | NodeKind::Enum)
    }

    /// Returns `true` for declarations the engine can document.
    pub fn is_declaration(self) -> bool {
        self.is_class_like()
            || matches!(self, NodeKind::Method | NodeKind::Field | NodeKind::EnumConstant)
    }
}

/// A formal parameter of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Declared type as written in source.
    pub type_name: String,
}

impl Param {
    /// Creates a parameter from name and declared type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Parsed signature facts attached to a declaration node.
///
/// The host parser fills this in; the tree only stores it. Fields that do not
/// apply to a declaration kind stay empty (a field has no parameters, a
/// constructor has no return type).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Declared name (class name, method name, field name).
    pub name: String,
    /// Generic type parameter names, in declaration order.
    pub type_params: Vec<String>,
    /// Formal parameters, in declaration order.
    pub params: Vec<Param>,
    /// Declared return type, `None` for constructors, fields and classes.
    pub return_type: Option<String>,
    /// Declared checked exception type names, in declaration order.
    pub throws: Vec<String>,
    /// Whether this method declaration is a constructor.
    pub is_constructor: bool,
}

impl Signature {
    /// Creates a signature carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    /// Leaf text. Always empty for non-leaf nodes.
    text: String,
    signature: Option<Signature>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable syntax tree for one source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    /// Creates a tree containing only an empty file root.
    pub fn new() -> Self {
        let root_data = NodeData {
            kind: NodeKind::File,
            text: String::new(),
            signature: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_data],
            root: NodeId(0),
        }
    }

    /// The file root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, kind: NodeKind, text: String, signature: Option<Signature>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            text,
            signature,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocates a detached documentation comment leaf.
    pub fn new_doc_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::DocComment, text.into(), None)
    }

    /// Allocates a detached whitespace leaf.
    pub fn new_whitespace(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Whitespace, text.into(), None)
    }

    /// Allocates a detached raw code leaf.
    pub fn new_code(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Code, text.into(), None)
    }

    /// Allocates a detached declaration node carrying a signature.
    pub fn new_declaration(&mut self, kind: NodeKind, signature: Signature) -> NodeId {
        debug_assert!(kind.is_declaration(), "{kind:?} is not a declaration kind");
        self.alloc(kind, String::new(), Some(signature))
    }

    /// The kind of a node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Leaf text of a node; empty for non-leaf nodes.
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    /// The parsed signature of a declaration node, if any.
    pub fn signature(&self, id: NodeId) -> Option<&Signature> {
        self.node(id).signature.as_ref()
    }

    pub(crate) fn signature_mut(&mut self, id: NodeId) -> Option<&mut Signature> {
        self.node_mut(id).signature.as_mut()
    }

    /// Parent of a node, `None` for the root and for detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of a node, in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// First child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    /// The sibling immediately following a node under the same parent.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let position = siblings.iter().position(|&child| child == id)?;
        siblings.get(position + 1).copied()
    }

    /// Inserts a detached node as the first child of `parent`.
    pub fn insert_child_front(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_detached(child)?;
        self.node_mut(parent).children.insert(0, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Inserts a detached node as a child of `parent`, directly before `anchor`.
    pub fn insert_child_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<()> {
        self.check_detached(child)?;
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|&existing| existing == anchor)
            .ok_or(TreeError::NotAChild)?;
        self.node_mut(parent).children.insert(position, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_detached(child)?;
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Detaches a node from its parent. The node id stays valid but the node
    /// no longer appears in the tree.
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id).parent.ok_or(TreeError::Detached)?;
        self.node_mut(parent).children.retain(|&child| child != id);
        self.node_mut(id).parent = None;
        Ok(())
    }

    /// Replaces the text of a leaf node. Used by the range reformatter.
    pub(crate) fn set_text(&mut self, id: NodeId, text: String) {
        debug_assert!(self.node(id).kind.is_leaf());
        self.node_mut(id).text = text;
    }

    fn check_detached(&self, id: NodeId) -> Result<()> {
        if self.node(id).parent.is_some() || id == self.root {
            return Err(TreeError::AlreadyAttached);
        }
        Ok(())
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_front_and_navigate() {
        let mut tree = SyntaxTree::new();
        let method = tree.new_declaration(NodeKind::Method, Signature::named("run"));
        tree.append_child(tree.root(), method).unwrap();
        let code = tree.new_code("void run() {}\n");
        tree.append_child(method, code).unwrap();

        let comment = tree.new_doc_comment("/** Run. */");
        tree.insert_child_front(method, comment).unwrap();

        assert_eq!(tree.first_child(method), Some(comment));
        assert_eq!(tree.next_sibling(comment), Some(code));
        assert_eq!(tree.kind(comment), NodeKind::DocComment);
    }

    #[test]
    fn insert_before_unrelated_anchor_fails() {
        let mut tree = SyntaxTree::new();
        let method = tree.new_declaration(NodeKind::Method, Signature::named("run"));
        tree.append_child(tree.root(), method).unwrap();
        let stray = tree.new_code("x");
        let ws = tree.new_whitespace("\n");

        let err = tree.insert_child_before(method, ws, stray).unwrap_err();
        assert_eq!(err, TreeError::NotAChild);
    }

    #[test]
    fn delete_detaches_node() {
        let mut tree = SyntaxTree::new();
        let comment = tree.new_doc_comment("/** Old. */");
        tree.append_child(tree.root(), comment).unwrap();

        tree.delete(comment).unwrap();
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.parent(comment), None);
        // deleting twice is an error
        assert_eq!(tree.delete(comment).unwrap_err(), TreeError::Detached);
    }

    #[test]
    fn attached_node_cannot_be_inserted_again() {
        let mut tree = SyntaxTree::new();
        let comment = tree.new_doc_comment("/** A. */");
        tree.append_child(tree.root(), comment).unwrap();
        let err = tree.insert_child_front(tree.root(), comment).unwrap_err();
        assert_eq!(err, TreeError::AlreadyAttached);
    }
}
