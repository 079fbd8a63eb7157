//! Element collection, classification, and batch dispatch.
//!
//! The dispatcher walks a file or class subtree, collects every documentable
//! declaration, and runs the synthesis, merge, and write steps per element.
//! Batch processing is best-effort: one element's failure is recorded and
//! the batch moves on; nothing already committed is rolled back.

use jdoc_syntax::{NodeId, NodeKind, SourceFile, SyntaxTree};
use tracing::debug;

use crate::error::Result;
use crate::javadoc::parse_javadoc;
use crate::merge::merge;
use crate::model::JavaDoc;
use crate::settings::{GenerationMode, JavaDocSettings};
use crate::signature::{SignatureFacts, classify};
use crate::synthesize::synthesize;
use crate::writer::{JavaDocWriter, check_file_access};

/// Outcome of a batch run over a file or class subtree.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Elements whose comment was written or removed.
    pub processed: usize,
    /// Elements skipped (unrecognized kind, or `Keep` mode with an existing
    /// comment).
    pub skipped: usize,
    /// Per-element failures, in processing order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Returns `true` when every element was handled without failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One element's failure within a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// Name of the failed element, or the file path for whole-file failures.
    pub element: String,
    /// Human-readable cause, suitable for the user-facing failure channel.
    pub message: String,
}

/// Routes declarations through synthesis, merge, and the writer.
///
/// Collaborators are injected at construction; the generator holds no
/// ambient state and no tree handles.
#[derive(Debug, Default)]
pub struct JavaDocGenerator {
    settings: JavaDocSettings,
    writer: JavaDocWriter,
}

impl JavaDocGenerator {
    /// Creates a generator with the given settings and writer.
    pub fn new(settings: JavaDocSettings, writer: JavaDocWriter) -> Self {
        Self { settings, writer }
    }

    /// Collects every documentable declaration under `root` in processing
    /// order: all class-like declarations top-down (outer before inner),
    /// then for each class its direct member methods, then its direct
    /// fields and enum constants, in declaration order.
    pub fn collect(&self, tree: &SyntaxTree, root: NodeId) -> Vec<NodeId> {
        let mut classes = Vec::new();
        collect_classes(tree, root, &mut classes);

        let mut elements = classes.clone();
        for &class in &classes {
            let members = tree.children(class);
            elements.extend(
                members
                    .iter()
                    .copied()
                    .filter(|&member| tree.kind(member) == NodeKind::Method),
            );
            elements.extend(members.iter().copied().filter(|&member| {
                matches!(tree.kind(member), NodeKind::Field | NodeKind::EnumConstant)
            }));
        }
        elements
    }

    /// Generates (or regenerates) the comment for one element.
    ///
    /// Returns `Ok(false)` when the element was skipped: its kind is not
    /// documentable, or `Keep` mode found an existing comment.
    pub fn generate(&self, file: &mut SourceFile, element: NodeId) -> Result<bool> {
        if classify(file.tree().kind(element)).is_none() {
            return Ok(false);
        }
        let existing = existing_comment(file.tree(), element);
        if self.settings.mode == GenerationMode::Keep && existing.is_some() {
            return Ok(false);
        }
        let Some(facts) = SignatureFacts::of(file.tree(), element) else {
            return Ok(false);
        };

        let synthesized = synthesize(&facts, &self.settings);
        let merged = match self.settings.mode {
            GenerationMode::Replace => synthesized,
            _ => merge(existing.as_ref(), synthesized),
        };
        self.writer.write(&merged, file, element)?;
        debug!("generated javadoc for '{}'", facts.name);
        Ok(true)
    }

    /// Removes the comment from one element.
    pub fn remove(&self, file: &mut SourceFile, element: NodeId) -> Result<()> {
        self.writer.remove(file, element)
    }

    /// Runs generation over every collected element of the file.
    ///
    /// File access is checked once up front: an invalid or read-only file
    /// produces a report with exactly one failure and no mutations. After
    /// that, each element is processed independently.
    pub fn generate_all(&self, file: &mut SourceFile) -> BatchReport {
        let mut report = BatchReport::default();
        if let Err(failure) = check_file_access(file) {
            report.failures.push(BatchFailure {
                element: file.path().to_string(),
                message: failure.to_string(),
            });
            return report;
        }

        let elements = self.collect(file.tree(), file.tree().root());
        for element in elements {
            let label = element_label(file.tree(), element);
            match self.generate(file, element) {
                Ok(true) => report.processed += 1,
                Ok(false) => report.skipped += 1,
                Err(failure) => report.failures.push(BatchFailure {
                    element: label,
                    message: failure.to_string(),
                }),
            }
        }
        report
    }

    /// Removes comments from every collected element of the file.
    pub fn remove_all(&self, file: &mut SourceFile) -> BatchReport {
        let mut report = BatchReport::default();
        if let Err(failure) = check_file_access(file) {
            report.failures.push(BatchFailure {
                element: file.path().to_string(),
                message: failure.to_string(),
            });
            return report;
        }

        let elements = self.collect(file.tree(), file.tree().root());
        for element in elements {
            let label = element_label(file.tree(), element);
            let had_comment = existing_comment(file.tree(), element).is_some();
            match self.remove(file, element) {
                Ok(()) if had_comment => report.processed += 1,
                Ok(()) => report.skipped += 1,
                Err(failure) => report.failures.push(BatchFailure {
                    element: label,
                    message: failure.to_string(),
                }),
            }
        }
        report
    }
}

/// Parses the element's existing leading comment, if it has one.
pub fn existing_comment(tree: &SyntaxTree, element: NodeId) -> Option<JavaDoc> {
    let first = tree.first_child(element)?;
    (tree.kind(first) == NodeKind::DocComment).then(|| parse_javadoc(tree.text(first)))
}

fn collect_classes(tree: &SyntaxTree, node: NodeId, out: &mut Vec<NodeId>) {
    if tree.kind(node).is_class_like() {
        out.push(node);
    }
    for &child in tree.children(node) {
        if !tree.kind(child).is_leaf() {
            collect_classes(tree, child, out);
        }
    }
}

fn element_label(tree: &SyntaxTree, element: NodeId) -> String {
    tree.signature(element)
        .map(|signature| signature.name.clone())
        .unwrap_or_else(|| format!("{:?}", tree.kind(element)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdoc_syntax::FileBuilder;

    #[test]
    fn collects_classes_first_then_members_per_class() {
        let file = FileBuilder::new("Outer.java")
            .class("Outer", |class| {
                class
                    .field("count", "int")
                    .method("getCount", |method| {
                        method.returns("int");
                    })
                    .nested_class("Inner", |inner| {
                        inner.method("run", |_| {});
                    });
            })
            .class("Second", |_| {})
            .build();

        let generator = JavaDocGenerator::default();
        let tree = file.tree();
        let elements = generator.collect(tree, tree.root());
        let names: Vec<String> = elements
            .iter()
            .map(|&element| element_label(tree, element))
            .collect();
        assert_eq!(
            names,
            vec!["Outer", "Inner", "Second", "getCount", "count", "run"]
        );
    }

    #[test]
    fn enum_constants_collect_as_members() {
        let file = FileBuilder::new("Color.java")
            .enumeration("Color", |class| {
                class.constant("RED").constant("GREEN");
            })
            .build();

        let generator = JavaDocGenerator::default();
        let tree = file.tree();
        let elements = generator.collect(tree, tree.root());
        assert_eq!(elements.len(), 3);
        assert_eq!(tree.kind(elements[1]), NodeKind::EnumConstant);
        assert_eq!(tree.kind(elements[2]), NodeKind::EnumConstant);
    }
}
