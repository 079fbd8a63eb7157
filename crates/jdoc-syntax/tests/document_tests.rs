//! Document rendering and transaction behavior through the public API.

use jdoc_syntax::{FileBuilder, NodeKind, TreeError};

#[test]
fn document_text_reads_like_source() {
    let mut file = FileBuilder::new("Calc.java")
        .class("Calc", |class| {
            class
                .field("count", "int")
                .method("add", |method| {
                    method.param("a", "int").param("b", "int").returns("int");
                });
        })
        .build();

    file.sync();
    assert_eq!(
        file.text().unwrap(),
        "class Calc {\nprivate int count;\nint add(int a, int b) {\n}\n}\n"
    );
}

#[test]
fn offsets_follow_declaration_order() {
    let mut file = FileBuilder::new("Calc.java")
        .class("Calc", |class| {
            class.field("count", "int");
        })
        .build();

    file.sync();
    let tree = file.tree();
    let class = tree.children(tree.root())[0];
    let field = tree
        .children(class)
        .iter()
        .copied()
        .find(|&member| tree.kind(member) == NodeKind::Field)
        .unwrap();

    assert_eq!(file.offset_of(class).unwrap(), 0);
    assert_eq!(file.offset_of(field).unwrap(), "class Calc {\n".len());
}

#[test]
fn mutation_outside_sync_invalidates_offsets() {
    let mut file = FileBuilder::new("Calc.java")
        .class("Calc", |_| {})
        .build();
    file.sync();
    let class = file.tree().children(file.tree().root())[0];
    assert!(file.offset_of(class).is_ok());

    file.write_transaction::<_, TreeError>(|tx| {
        let comment = tx.tree_mut().new_doc_comment("/** The type Calc. */");
        tx.tree_mut().insert_child_front(class, comment)
    })
    .unwrap();

    // the transaction mutated the tree; offsets are stale until re-synced
    assert_eq!(file.offset_of(class).unwrap_err(), TreeError::Desynced);
    file.sync();
    assert_eq!(file.offset_of(class).unwrap(), 0);
}

#[test]
fn rolled_back_transaction_leaves_no_trace() {
    let mut file = FileBuilder::new("Calc.java")
        .class("Calc", |class| {
            class.field("count", "int");
        })
        .build();
    file.sync();
    let before = file.text().unwrap().to_string();
    let class = file.tree().children(file.tree().root())[0];

    let result: Result<(), TreeError> = file.write_transaction(|tx| {
        let comment = tx.tree_mut().new_doc_comment("/** Doomed. */");
        tx.tree_mut().insert_child_front(class, comment)?;
        let stray = tx.tree_mut().new_whitespace("\n");
        // inserting before a detached anchor fails and aborts the unit
        let unattached = tx.tree_mut().new_code("x");
        tx.tree_mut().insert_child_before(class, stray, unattached)
    });
    assert_eq!(result.unwrap_err(), TreeError::NotAChild);

    file.sync();
    assert_eq!(file.text().unwrap(), before);
}
