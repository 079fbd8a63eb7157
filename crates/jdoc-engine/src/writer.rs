//! Transactional splicing of rendered comments into the syntax tree.
//!
//! Every mutation runs behind a writability pre-check and inside one atomic,
//! undoable write transaction: delete the old comment, insert the new one,
//! fix the whitespace separation, reformat the affected range. A failure
//! inside the unit rolls the whole unit back; a failed reformat lookup does
//! not, since the comment itself has already been committed.

use jdoc_syntax::{NodeId, NodeKind, SourceFile, WriteGuard};
use tracing::{error, info};

use crate::error::{EngineError, Result};
use crate::model::JavaDoc;

/// Writes and removes leading documentation comments.
#[derive(Debug, Default)]
pub struct JavaDocWriter;

impl JavaDocWriter {
    /// Creates a writer.
    pub fn new() -> Self {
        Self
    }

    /// Writes `javadoc` as the leading comment of `element`, replacing any
    /// comment already there.
    pub fn write(&self, javadoc: &JavaDoc, file: &mut SourceFile, element: NodeId) -> Result<()> {
        check_file_access(file)?;
        let rendered = javadoc.render();
        let result = file.write_transaction(|tx| {
            place_comment(tx, element, &rendered)?;
            ensure_whitespace_after(tx, element)?;
            reformat_comment(tx, element);
            Ok(())
        });
        if let Err(failure) = &result {
            error!("write action failed: {failure}");
        }
        result
    }

    /// Removes the leading comment of `element`, if any.
    pub fn remove(&self, file: &mut SourceFile, element: NodeId) -> Result<()> {
        check_file_access(file)?;
        let result = file.write_transaction(|tx| {
            tx.sync();
            let Some(first) = tx.tree().first_child(element) else {
                return Ok(());
            };
            if tx.tree().kind(first) == NodeKind::DocComment {
                tx.tree_mut().delete(first)?;
            }
            Ok(())
        });
        if let Err(failure) = &result {
            error!("remove action failed: {failure}");
        }
        result
    }
}

/// Rejects invalid and read-only files before any mutation happens.
pub(crate) fn check_file_access(file: &SourceFile) -> Result<()> {
    if !file.is_valid() {
        let failure = EngineError::file_not_valid(file.path(), "file is not valid");
        error!("{failure}");
        return Err(failure);
    }
    if !file.is_writable() {
        let failure = EngineError::file_not_valid(file.path(), "file is read-only");
        error!("{failure}");
        return Err(failure);
    }
    Ok(())
}

/// Inserts the rendered comment as the element's first child. An existing
/// comment is deleted first, then the new one inserted at the same position,
/// as two ordered steps of the same transaction.
fn place_comment(tx: &mut WriteGuard<'_>, element: NodeId, rendered: &str) -> Result<()> {
    tx.sync();
    let tree = tx.tree_mut();
    let comment = tree.new_doc_comment(rendered);
    match tree.first_child(element) {
        Some(first) if tree.kind(first) == NodeKind::DocComment => {
            tree.delete(first)?;
            tree.insert_child_front(element, comment)?;
        }
        Some(_) => tree.insert_child_front(element, comment)?,
        None => tree.append_child(element, comment)?,
    }
    Ok(())
}

/// Some declaration shapes (enum constants) do not separate a leading
/// comment from the following token; insert a newline node when missing.
fn ensure_whitespace_after(tx: &mut WriteGuard<'_>, element: NodeId) -> Result<()> {
    tx.sync();
    let tree = tx.tree();
    let Some(first) = tree.first_child(element) else {
        return Ok(());
    };
    if tree.kind(first) != NodeKind::DocComment {
        return Ok(());
    }
    let Some(next) = tree.next_sibling(first) else {
        return Ok(());
    };
    if tree.kind(next) == NodeKind::Whitespace {
        return Ok(());
    }
    let tree = tx.tree_mut();
    let whitespace = tree.new_whitespace("\n");
    tree.insert_child_before(element, whitespace, next)?;
    Ok(())
}

/// Reformats the range spanning the new comment up to the first byte of the
/// node after it. Lookup failures are logged and skipped; the comment text
/// has already been committed at this point.
fn reformat_comment(tx: &mut WriteGuard<'_>, element: NodeId) {
    match reformat_bounds(tx, element) {
        Ok((start, end)) => tx.reformat_range(start, end),
        Err(failure) => {
            info!("could not reformat javadoc, required elements not found: {failure}");
        }
    }
}

fn reformat_bounds(tx: &mut WriteGuard<'_>, element: NodeId) -> Result<(usize, usize)> {
    tx.sync();
    let tree = tx.tree();
    let comment = tree
        .first_child(element)
        .filter(|&first| tree.kind(first) == NodeKind::DocComment)
        .ok_or_else(|| EngineError::not_found("a leading doc comment"))?;
    let second = tree
        .children(element)
        .get(1)
        .copied()
        .ok_or_else(|| EngineError::not_found("the code offset after the comment"))?;
    let start = tx.offset_of(comment)?;
    let end = tx.offset_of(second)? + 1;
    Ok((start, end))
}
