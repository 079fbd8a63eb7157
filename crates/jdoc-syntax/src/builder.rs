//! Ergonomic programmatic construction of source files.
//!
//! Parsing Java text is the host's job, not this crate's; callers and tests
//! assemble trees through these builders instead. The generated code leaves
//! carry plausible source text so the rendered document reads like the file
//! the host would hold.

use crate::file::SourceFile;
use crate::tree::{NodeId, NodeKind, Param, Signature, SyntaxTree};

/// Builds a [`SourceFile`] from declaration descriptions.
#[derive(Debug)]
pub struct FileBuilder {
    tree: SyntaxTree,
    path: String,
}

impl FileBuilder {
    /// Starts an empty file at the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            tree: SyntaxTree::new(),
            path: path.into(),
        }
    }

    /// Adds a top-level class declaration.
    pub fn class(mut self, name: &str, build: impl FnOnce(&mut ClassBuilder<'_>)) -> Self {
        let root = self.tree.root();
        add_class_like(&mut self.tree, root, NodeKind::Class, name, build);
        self
    }

    /// Adds a top-level interface declaration.
    pub fn interface(mut self, name: &str, build: impl FnOnce(&mut ClassBuilder<'_>)) -> Self {
        let root = self.tree.root();
        add_class_like(&mut self.tree, root, NodeKind::Interface, name, build);
        self
    }

    /// Adds a top-level enum declaration.
    pub fn enumeration(mut self, name: &str, build: impl FnOnce(&mut ClassBuilder<'_>)) -> Self {
        let root = self.tree.root();
        add_class_like(&mut self.tree, root, NodeKind::Enum, name, build);
        self
    }

    /// Finishes the file.
    pub fn build(self) -> SourceFile {
        SourceFile::new(self.path, self.tree)
    }
}

fn add_class_like(
    tree: &mut SyntaxTree,
    parent: NodeId,
    kind: NodeKind,
    name: &str,
    build: impl FnOnce(&mut ClassBuilder<'_>),
) -> NodeId {
    let decl = tree.new_declaration(kind, Signature::named(name));
    tree.append_child(parent, decl)
        .expect("freshly allocated declaration is detached");
    let keyword = match kind {
        NodeKind::Interface => "interface",
        NodeKind::Enum => "enum",
        _ => "class",
    };
    let header = tree.new_code(format!("{keyword} {name} {{\n"));
    tree.append_child(decl, header)
        .expect("freshly allocated code leaf is detached");

    let mut builder = ClassBuilder {
        tree: &mut *tree,
        class: decl,
    };
    build(&mut builder);

    let footer = tree.new_code("}\n");
    tree.append_child(decl, footer)
        .expect("freshly allocated code leaf is detached");
    decl
}

/// Adds members to a class-like declaration.
#[derive(Debug)]
pub struct ClassBuilder<'a> {
    tree: &'a mut SyntaxTree,
    class: NodeId,
}

impl ClassBuilder<'_> {
    /// Attaches an existing doc comment to the class itself.
    pub fn doc(&mut self, raw: &str) -> &mut Self {
        attach_doc(self.tree, self.class, raw);
        self
    }

    /// Declares a generic type parameter on the class.
    pub fn type_param(&mut self, name: &str) -> &mut Self {
        if let Some(signature) = self.tree.signature_mut(self.class) {
            signature.type_params.push(name.to_string());
        }
        self
    }

    /// Adds a method declaration described by the closure.
    pub fn method(&mut self, name: &str, build: impl FnOnce(&mut MethodBuilder)) -> &mut Self {
        let mut method = MethodBuilder::named(name);
        build(&mut method);
        method.materialize(self.tree, self.class);
        self
    }

    /// Adds an undocumented field declaration.
    pub fn field(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.add_field(name, type_name, None)
    }

    /// Adds a field declaration carrying an existing doc comment.
    pub fn field_with_doc(&mut self, name: &str, type_name: &str, raw_doc: &str) -> &mut Self {
        self.add_field(name, type_name, Some(raw_doc))
    }

    /// Adds an enum constant. Enum constants have no whitespace slot between
    /// a leading comment and the constant token, matching host parser output.
    pub fn constant(&mut self, name: &str) -> &mut Self {
        let decl = self
            .tree
            .new_declaration(NodeKind::EnumConstant, Signature::named(name));
        self.tree
            .append_child(self.class, decl)
            .expect("freshly allocated declaration is detached");
        let code = self.tree.new_code(format!("{name},\n"));
        self.tree
            .append_child(decl, code)
            .expect("freshly allocated code leaf is detached");
        self
    }

    /// Adds a nested class declaration.
    pub fn nested_class(&mut self, name: &str, build: impl FnOnce(&mut ClassBuilder<'_>)) -> &mut Self {
        add_class_like(self.tree, self.class, NodeKind::Class, name, build);
        self
    }

    fn add_field(&mut self, name: &str, type_name: &str, raw_doc: Option<&str>) -> &mut Self {
        let decl = self
            .tree
            .new_declaration(NodeKind::Field, Signature::named(name));
        self.tree
            .append_child(self.class, decl)
            .expect("freshly allocated declaration is detached");
        let code = self.tree.new_code(format!("private {type_name} {name};\n"));
        self.tree
            .append_child(decl, code)
            .expect("freshly allocated code leaf is detached");
        if let Some(raw) = raw_doc {
            attach_doc(self.tree, decl, raw);
        }
        self
    }
}

/// Describes a method declaration before it is materialized into the tree.
#[derive(Debug)]
pub struct MethodBuilder {
    signature: Signature,
    doc: Option<String>,
}

impl MethodBuilder {
    fn named(name: &str) -> Self {
        let mut signature = Signature::named(name);
        signature.return_type = Some("void".to_string());
        Self {
            signature,
            doc: None,
        }
    }

    /// Attaches an existing doc comment to the method.
    pub fn doc(&mut self, raw: &str) -> &mut Self {
        self.doc = Some(raw.to_string());
        self
    }

    /// Adds a formal parameter.
    pub fn param(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.signature.params.push(Param::new(name, type_name));
        self
    }

    /// Declares a generic type parameter.
    pub fn type_param(&mut self, name: &str) -> &mut Self {
        self.signature.type_params.push(name.to_string());
        self
    }

    /// Sets the declared return type. Defaults to `void`.
    pub fn returns(&mut self, type_name: &str) -> &mut Self {
        self.signature.return_type = Some(type_name.to_string());
        self
    }

    /// Declares a checked exception.
    pub fn throws(&mut self, type_name: &str) -> &mut Self {
        self.signature.throws.push(type_name.to_string());
        self
    }

    /// Marks the method as a constructor (no return type).
    pub fn constructor(&mut self) -> &mut Self {
        self.signature.return_type = None;
        self.signature.is_constructor = true;
        self
    }

    fn materialize(self, tree: &mut SyntaxTree, class: NodeId) {
        let header = method_header(&self.signature);
        let decl = tree.new_declaration(NodeKind::Method, self.signature);
        tree.append_child(class, decl)
            .expect("freshly allocated declaration is detached");
        let code = tree.new_code(header);
        tree.append_child(decl, code)
            .expect("freshly allocated code leaf is detached");
        if let Some(raw) = self.doc {
            attach_doc(tree, decl, &raw);
        }
    }
}

fn attach_doc(tree: &mut SyntaxTree, decl: NodeId, raw: &str) {
    let ws = tree.new_whitespace("\n");
    tree.insert_child_front(decl, ws)
        .expect("freshly allocated whitespace is detached");
    let comment = tree.new_doc_comment(raw);
    tree.insert_child_front(decl, comment)
        .expect("freshly allocated comment is detached");
}

fn method_header(signature: &Signature) -> String {
    let mut header = String::new();
    if !signature.type_params.is_empty() {
        header.push('<');
        header.push_str(&signature.type_params.join(", "));
        header.push_str("> ");
    }
    if let Some(return_type) = &signature.return_type {
        header.push_str(return_type);
        header.push(' ');
    }
    header.push_str(&signature.name);
    header.push('(');
    let params: Vec<String> = signature
        .params
        .iter()
        .map(|param| format!("{} {}", param.type_name, param.name))
        .collect();
    header.push_str(&params.join(", "));
    header.push(')');
    if !signature.throws.is_empty() {
        header.push_str(" throws ");
        header.push_str(&signature.throws.join(", "));
    }
    header.push_str(" {\n}\n");
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_method_with_signature() {
        let file = FileBuilder::new("Calc.java")
            .class("Calc", |class| {
                class.method("add", |method| {
                    method
                        .param("a", "int")
                        .param("b", "int")
                        .returns("int")
                        .throws("IOException");
                });
            })
            .build();

        let tree = file.tree();
        let class = tree.children(tree.root())[0];
        assert_eq!(tree.kind(class), NodeKind::Class);
        let method = tree
            .children(class)
            .iter()
            .copied()
            .find(|&child| tree.kind(child) == NodeKind::Method)
            .unwrap();
        let signature = tree.signature(method).unwrap();
        assert_eq!(signature.name, "add");
        assert_eq!(signature.params.len(), 2);
        assert_eq!(signature.return_type.as_deref(), Some("int"));
        assert_eq!(signature.throws, vec!["IOException".to_string()]);
    }

    #[test]
    fn attached_doc_comes_before_code() {
        let file = FileBuilder::new("Holder.java")
            .class("Holder", |class| {
                class.field_with_doc("value", "int", "/** The value. */");
            })
            .build();

        let tree = file.tree();
        let class = tree.children(tree.root())[0];
        let field = tree
            .children(class)
            .iter()
            .copied()
            .find(|&child| tree.kind(child) == NodeKind::Field)
            .unwrap();
        let children = tree.children(field);
        assert_eq!(tree.kind(children[0]), NodeKind::DocComment);
        assert_eq!(tree.kind(children[1]), NodeKind::Whitespace);
        assert_eq!(tree.kind(children[2]), NodeKind::Code);
    }

    #[test]
    fn enum_constant_has_no_whitespace_slot() {
        let file = FileBuilder::new("Color.java")
            .enumeration("Color", |class| {
                class.constant("RED").constant("GREEN");
            })
            .build();

        let tree = file.tree();
        let decl = tree.children(tree.root())[0];
        assert_eq!(tree.kind(decl), NodeKind::Enum);
        let constants: Vec<_> = tree
            .children(decl)
            .iter()
            .copied()
            .filter(|&child| tree.kind(child) == NodeKind::EnumConstant)
            .collect();
        assert_eq!(constants.len(), 2);
        assert_eq!(tree.children(constants[0]).len(), 1);
    }
}
