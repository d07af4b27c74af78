// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use rill_core::{Sink, Splittable};
use rill_node::{builder, Node, NodeBuilder, SpinedBuffer};

#[test]
fn test_conc_count_is_sum_of_children() {
    let left = Node::leaf(vec![1, 2]);
    let right = Node::conc(Node::leaf(vec![3]), Node::leaf(vec![4, 5, 6]));

    let tree = Node::conc(left, right);

    assert_eq!(tree.count(), 6);
}

#[test]
fn test_traversal_reproduces_encounter_order() {
    let tree = Node::conc(
        Node::conc(Node::leaf(vec![1]), Node::leaf(vec![2, 3])),
        Node::conc(Node::leaf(vec![4, 5]), Node::leaf(vec![6])),
    );

    assert_eq!(tree.into_vec(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_empty_operands_vanish_in_conc() {
    let tree = Node::conc(Node::Empty, Node::leaf(vec![9]));
    assert!(matches!(tree, Node::Leaf(_)));
    assert_eq!(tree.count(), 1);
}

#[test]
fn test_node_source_drains_in_order_and_splits_near_half() {
    // Arrange
    let tree = Node::conc(
        Node::leaf(vec![1, 2, 3]),
        Node::conc(Node::leaf(vec![4, 5]), Node::leaf(vec![6, 7, 8])),
    );
    let mut source = tree.into_source();
    assert_eq!(source.exact_size_if_known(), Some(8));

    // Act
    let mut prefix = source.try_split().expect("eight elements must split");

    // Assert
    assert_eq!(prefix.estimate_size(), 4);
    assert_eq!(source.estimate_size(), 4);
    let mut seen = Vec::new();
    prefix.for_each_remaining(&mut |value| seen.push(value));
    source.for_each_remaining(&mut |value| seen.push(value));
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_truncate_windows_the_encounter_order() {
    let tree = Node::conc(Node::leaf(vec![0, 1, 2, 3]), Node::leaf(vec![4, 5, 6, 7]));

    assert_eq!(tree.clone().truncate(2, 6).into_vec(), vec![2, 3, 4, 5]);
    assert_eq!(tree.clone().truncate(6, 100).into_vec(), vec![6, 7]);
    assert_eq!(tree.clone().truncate(8, 9).count(), 0);
    assert_eq!(tree.truncate(0, 8).into_vec(), (0..8).collect::<Vec<_>>());
}

#[test]
fn test_spined_buffer_grows_past_chunk_boundaries() {
    // Arrange: enough elements to park three chunks (16 + 32 + 64)
    let mut buffer = SpinedBuffer::new();

    // Act
    for value in 0..200u32 {
        buffer.push(value);
    }

    // Assert
    assert_eq!(buffer.len(), 200);
    // prefix sums telescope: chunk 0 starts at 0, chunk 1 after 16, chunk 2 after 48
    assert_eq!(buffer.prior_count(0), Some(0));
    assert_eq!(buffer.prior_count(1), Some(16));
    assert_eq!(buffer.prior_count(2), Some(48));
    assert_eq!(buffer.prior_count(3), None);
    assert_eq!(buffer.into_vec(), (0..200).collect::<Vec<_>>());
}

#[test]
fn test_spined_buffer_into_node_keeps_order_without_copying() {
    let mut buffer = SpinedBuffer::new();
    for value in 0..40 {
        buffer.push(value);
    }

    let node = buffer.into_node();

    assert_eq!(node.count(), 40);
    assert_eq!(node.into_vec(), (0..40).collect::<Vec<_>>());
}

#[test]
fn test_fixed_builder_fills_exactly() {
    let mut fixed = builder::<i32>(Some(3));

    fixed.begin(3);
    fixed.accept(1);
    fixed.accept(2);
    fixed.accept(3);
    fixed.end();

    assert_eq!(fixed.build().into_vec(), vec![1, 2, 3]);
}

#[test]
fn test_spined_builder_handles_unknown_size() {
    let mut spined = builder::<i32>(None);

    spined.begin(rill_core::SIZE_UNKNOWN);
    for value in 0..50 {
        spined.accept(value);
    }
    spined.end();

    let node = spined.build();
    assert_eq!(node.count(), 50);
    assert_eq!(node.into_vec(), (0..50).collect::<Vec<_>>());
}
