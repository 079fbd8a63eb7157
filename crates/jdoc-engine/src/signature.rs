//! Read-only signature snapshots driving tag synthesis.

use jdoc_syntax::{NodeId, NodeKind, SyntaxTree};

/// The closed set of element kinds the engine documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Class, interface, or enum declaration.
    Class,
    /// Method or constructor declaration.
    Method,
    /// Field or enum constant declaration.
    Field,
}

/// Maps a tree node kind onto a documentable element kind.
///
/// Unrecognized kinds yield `None` and are skipped, not an error.
pub fn classify(kind: NodeKind) -> Option<ElementKind> {
    match kind {
        kind if kind.is_class_like() => Some(ElementKind::Class),
        NodeKind::Method => Some(ElementKind::Method),
        NodeKind::Field | NodeKind::EnumConstant => Some(ElementKind::Field),
        _ => None,
    }
}

/// A formal parameter as seen by synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamFact {
    /// Parameter name.
    pub name: String,
    /// Declared type as written in source.
    pub type_name: String,
}

/// Read-only snapshot of a declaration's shape.
///
/// Computed fresh for every generation request; the underlying declaration
/// may be edited between invocations, so facts are never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFacts {
    /// Documentable kind of the declaration.
    pub kind: ElementKind,
    /// Declared name.
    pub name: String,
    /// Generic type parameter names, in declaration order.
    pub type_params: Vec<String>,
    /// Formal parameters, in declaration order.
    pub params: Vec<ParamFact>,
    /// Declared return type, `None` when the declaration returns nothing.
    pub return_type: Option<String>,
    /// Declared checked exception type names, in declaration order.
    pub throws: Vec<String>,
    /// Whether this is a constructor.
    pub is_constructor: bool,
}

impl SignatureFacts {
    /// Derives the snapshot for a declaration node. Returns `None` for nodes
    /// that are not documentable declarations.
    pub fn of(tree: &SyntaxTree, element: NodeId) -> Option<Self> {
        let kind = classify(tree.kind(element))?;
        let signature = tree.signature(element)?;
        Some(Self {
            kind,
            name: signature.name.clone(),
            type_params: signature.type_params.clone(),
            params: signature
                .params
                .iter()
                .map(|param| ParamFact {
                    name: param.name.clone(),
                    type_name: param.type_name.clone(),
                })
                .collect(),
            return_type: signature
                .return_type
                .clone()
                .filter(|type_name| type_name != "void"),
            throws: signature.throws.clone(),
            is_constructor: signature.is_constructor,
        })
    }

    /// Whether the declaration produces a value.
    pub fn has_return(&self) -> bool {
        self.return_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdoc_syntax::FileBuilder;

    #[test]
    fn void_method_has_no_return() {
        let file = FileBuilder::new("A.java")
            .class("A", |class| {
                class.method("run", |_| {});
            })
            .build();
        let tree = file.tree();
        let class = tree.children(tree.root())[0];
        let method = tree
            .children(class)
            .iter()
            .copied()
            .find(|&child| tree.kind(child) == NodeKind::Method)
            .unwrap();

        let facts = SignatureFacts::of(tree, method).unwrap();
        assert_eq!(facts.kind, ElementKind::Method);
        assert!(!facts.has_return());
    }

    #[test]
    fn code_leaves_are_not_documentable() {
        let file = FileBuilder::new("A.java")
            .class("A", |_| {})
            .build();
        let tree = file.tree();
        let class = tree.children(tree.root())[0];
        let header = tree.children(class)[0];
        assert_eq!(tree.kind(header), NodeKind::Code);
        assert!(SignatureFacts::of(tree, header).is_none());
    }
}
