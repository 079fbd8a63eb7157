//! Source file wrapper: validity and writability state, a synchronized
//! document index (rendered text plus per-node byte offsets), undoable write
//! transactions with rollback, and a bounded range reformatter.

use rustc_hash::FxHashMap;

use crate::error::{Result, TreeError};
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Rendered document text with byte offsets for every attached node.
///
/// The index goes stale as soon as the tree is mutated and must be rebuilt
/// with [`SourceFile::sync`] before offsets are read again.
#[derive(Debug)]
struct DocumentIndex {
    text: String,
    offsets: FxHashMap<NodeId, usize>,
}

impl DocumentIndex {
    fn build(tree: &SyntaxTree) -> Self {
        let mut index = Self {
            text: String::new(),
            offsets: FxHashMap::default(),
        };
        index.walk(tree, tree.root());
        index
    }

    fn walk(&mut self, tree: &SyntaxTree, id: NodeId) {
        self.offsets.insert(id, self.text.len());
        if tree.kind(id).is_leaf() {
            self.text.push_str(tree.text(id));
        } else {
            for &child in tree.children(id) {
                self.walk(tree, child);
            }
        }
    }
}

/// A single Java source file owned by the host.
///
/// Wraps the syntax tree together with the state the documentation engine
/// checks before mutating: file validity, writability, and document
/// synchronization. All structural edits go through [`write_transaction`],
/// which snapshots the tree and rolls back when the action fails.
///
/// [`write_transaction`]: SourceFile::write_transaction
#[derive(Debug)]
pub struct SourceFile {
    path: String,
    tree: SyntaxTree,
    valid: bool,
    writable: bool,
    document: Option<DocumentIndex>,
    undo: Vec<SyntaxTree>,
}

impl SourceFile {
    /// Wraps a tree as a valid, writable source file.
    pub fn new(path: impl Into<String>, tree: SyntaxTree) -> Self {
        Self {
            path: path.into(),
            tree,
            valid: true,
            writable: true,
            document: None,
            undo: Vec::new(),
        }
    }

    /// File-system path of this file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the file is still valid (not stale or deleted on the host side).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the file may be mutated.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Host-side control: marks the file read-only or writable.
    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    /// Host-side control: invalidates the file (e.g. deleted from disk).
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Read-only view of the syntax tree.
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Rebuilds the document index if the tree changed since the last sync.
    pub fn sync(&mut self) {
        if self.document.is_none() {
            self.document = Some(DocumentIndex::build(&self.tree));
        }
    }

    /// The rendered document text. Fails if the document is out of sync.
    pub fn text(&self) -> Result<&str> {
        self.document
            .as_ref()
            .map(|document| document.text.as_str())
            .ok_or(TreeError::Desynced)
    }

    /// Byte offset of a node in the rendered document.
    ///
    /// Fails with [`TreeError::Desynced`] when the index is stale and with
    /// [`TreeError::Detached`] when the node is not reachable from the root.
    pub fn offset_of(&self, id: NodeId) -> Result<usize> {
        let document = self.document.as_ref().ok_or(TreeError::Desynced)?;
        document.offsets.get(&id).copied().ok_or(TreeError::Detached)
    }

    /// Runs a structural edit as one atomic, undoable unit.
    ///
    /// The tree is snapshotted before the action runs. On success the
    /// snapshot becomes an undo entry; on failure the tree is restored from
    /// it, so a failed action never leaves partial edits behind.
    pub fn write_transaction<T, E>(
        &mut self,
        action: impl FnOnce(&mut WriteGuard<'_>) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let snapshot = self.tree.clone();
        self.document = None;
        let mut guard = WriteGuard { file: &mut *self };
        let outcome = action(&mut guard);
        match outcome {
            Ok(value) => {
                self.undo.push(snapshot);
                Ok(value)
            }
            Err(error) => {
                self.tree = snapshot;
                self.document = None;
                Err(error)
            }
        }
    }

    /// Reverts the most recent committed transaction. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(snapshot) => {
                self.tree = snapshot;
                self.document = None;
                true
            }
            None => false,
        }
    }

    /// Reformats all comment and whitespace leaves intersecting `start..end`.
    ///
    /// Doc comments are rewritten into the canonical `/** ... */` block
    /// shape; whitespace runs collapse to a single newline. Leaves outside
    /// the range are not touched.
    fn reformat_range(&mut self, start: usize, end: usize) {
        self.sync();
        let mut edits: Vec<(NodeId, String)> = Vec::new();
        self.collect_reformat_edits(self.tree.root(), start, end, &mut edits);
        if edits.is_empty() {
            return;
        }
        for (id, text) in edits {
            self.tree.set_text(id, text);
        }
        self.document = None;
    }

    fn collect_reformat_edits(
        &self,
        id: NodeId,
        start: usize,
        end: usize,
        edits: &mut Vec<(NodeId, String)>,
    ) {
        let kind = self.tree.kind(id);
        if kind.is_leaf() {
            let offset = match self.offset_of(id) {
                Ok(offset) => offset,
                Err(_) => return,
            };
            let len = self.tree.text(id).len();
            match kind {
                NodeKind::DocComment if offset < end && offset + len > start => {
                    let canonical = normalize_doc_comment(self.tree.text(id));
                    if canonical != self.tree.text(id) {
                        edits.push((id, canonical));
                    }
                }
                NodeKind::Whitespace if offset < end && offset + len > start => {
                    if self.tree.text(id) != "\n" {
                        edits.push((id, "\n".to_string()));
                    }
                }
                _ => {}
            }
            return;
        }
        for &child in self.tree.children(id) {
            self.collect_reformat_edits(child, start, end, edits);
        }
    }
}

/// Mutable access handle passed to a [`SourceFile::write_transaction`] action.
///
/// Structural mutation is only reachable through this guard, which keeps all
/// edits inside the transaction boundary.
#[derive(Debug)]
pub struct WriteGuard<'a> {
    file: &'a mut SourceFile,
}

impl WriteGuard<'_> {
    /// Path of the file being edited.
    pub fn path(&self) -> &str {
        self.file.path()
    }

    /// Read-only view of the tree.
    pub fn tree(&self) -> &SyntaxTree {
        &self.file.tree
    }

    /// Mutable tree access. Marks the document index stale.
    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        self.file.document = None;
        &mut self.file.tree
    }

    /// Flushes pending edits into the document index.
    pub fn sync(&mut self) {
        self.file.sync();
    }

    /// Byte offset of a node in the synchronized document.
    pub fn offset_of(&self, id: NodeId) -> Result<usize> {
        self.file.offset_of(id)
    }

    /// Reformats comment and whitespace leaves within `start..end`.
    pub fn reformat_range(&mut self, start: usize, end: usize) {
        self.file.reformat_range(start, end);
    }
}

/// Rewrites a doc comment into the canonical block shape:
/// `/**`, one ` * ` line per content line, closing ` */`.
fn normalize_doc_comment(raw: &str) -> String {
    let inner = raw.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let mut lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect();
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut out = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Signature;

    fn method_file() -> (SourceFile, NodeId) {
        let mut tree = SyntaxTree::new();
        let method = tree.new_declaration(NodeKind::Method, Signature::named("run"));
        tree.append_child(tree.root(), method).unwrap();
        let code = tree.new_code("void run() {}\n");
        tree.append_child(method, code).unwrap();
        (SourceFile::new("Run.java", tree), method)
    }

    #[test]
    fn text_requires_sync() {
        let (file, _) = method_file();
        assert_eq!(file.text().unwrap_err(), TreeError::Desynced);
    }

    #[test]
    fn sync_exposes_text_and_offsets() {
        let (mut file, method) = method_file();
        file.sync();
        assert_eq!(file.text().unwrap(), "void run() {}\n");
        assert_eq!(file.offset_of(method).unwrap(), 0);
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let (mut file, method) = method_file();
        let result: std::result::Result<(), TreeError> = file.write_transaction(|tx| {
            let comment = tx.tree_mut().new_doc_comment("/** Run. */");
            tx.tree_mut().insert_child_front(method, comment)?;
            Err(TreeError::Desynced)
        });
        assert!(result.is_err());
        let first = file.tree().first_child(method).unwrap();
        assert_eq!(file.tree().kind(first), NodeKind::Code);
    }

    #[test]
    fn committed_transaction_can_be_undone() {
        let (mut file, method) = method_file();
        file.write_transaction::<_, TreeError>(|tx| {
            let comment = tx.tree_mut().new_doc_comment("/** Run. */");
            tx.tree_mut().insert_child_front(method, comment)
        })
        .unwrap();
        let first = file.tree().first_child(method).unwrap();
        assert_eq!(file.tree().kind(first), NodeKind::DocComment);

        assert!(file.undo());
        let first = file.tree().first_child(method).unwrap();
        assert_eq!(file.tree().kind(first), NodeKind::Code);
        assert!(!file.undo());
    }

    #[test]
    fn reformat_is_bounded() {
        let mut tree = SyntaxTree::new();
        let method = tree.new_declaration(NodeKind::Method, Signature::named("run"));
        tree.append_child(tree.root(), method).unwrap();
        let comment = tree.new_doc_comment("/**  Run.   */");
        tree.append_child(method, comment).unwrap();
        let ws = tree.new_whitespace("\n\n\n");
        tree.append_child(method, ws).unwrap();
        let code = tree.new_code("void run() {}\n");
        tree.append_child(method, code).unwrap();
        // trailing comment outside the reformat range keeps its sloppy shape
        let outside = tree.new_doc_comment("/**  outside   */");
        tree.append_child(tree.root(), outside).unwrap();

        let mut file = SourceFile::new("Run.java", tree);
        file.sync();
        let ws_offset = file.offset_of(ws).unwrap();
        file.write_transaction::<_, TreeError>(|tx| {
            tx.reformat_range(0, ws_offset + 1);
            Ok(())
        })
        .unwrap();

        assert_eq!(file.tree().text(comment), "/**\n * Run.\n */");
        assert_eq!(file.tree().text(ws), "\n");
        assert_eq!(file.tree().text(outside), "/**  outside   */");
    }
}
