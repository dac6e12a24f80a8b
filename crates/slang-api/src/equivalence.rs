//! Syntactic equivalence of trees and duplicate grouping.

use crate::tree::Tree;
use crate::visitors::tree_to_string;
use log::debug;
use rayon::prelude::*;
use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Structural equality, literal values included
pub fn are_equivalent(first: &Tree, second: &Tree) -> bool {
    are_equivalent_with(first, second, false)
}

/// Structural equality; with `ignore_literals` any two literals of the
/// same kind match
pub fn are_equivalent_with(first: &Tree, second: &Tree, ignore_literals: bool) -> bool {
    if ptr::eq(first, second) {
        return true;
    }
    if first.kind() != second.kind() {
        return false;
    }

    let same_node = match (first, second) {
        (Tree::Identifier(a), Tree::Identifier(b)) => return a.name() == b.name(),
        (Tree::Literal(a), Tree::Literal(b)) => return ignore_literals || a.value() == b.value(),
        (Tree::IntegerLiteral(a), Tree::IntegerLiteral(b)) => {
            return ignore_literals || a.value() == b.value()
        }
        (Tree::StringLiteral(a), Tree::StringLiteral(b)) => {
            return ignore_literals || a.value() == b.value()
        }
        (Tree::Native(a), Tree::Native(b)) => a.native_kind() == b.native_kind(),
        (Tree::Binary(a), Tree::Binary(b)) => a.operator() == b.operator(),
        (Tree::Unary(a), Tree::Unary(b)) => a.operator() == b.operator(),
        (Tree::Assignment(a), Tree::Assignment(b)) => a.operator() == b.operator(),
        (Tree::Modifier(a), Tree::Modifier(b)) => a.kind() == b.kind(),
        (Tree::Loop(a), Tree::Loop(b)) => a.kind() == b.kind(),
        (Tree::Jump(a), Tree::Jump(b)) => a.kind() == b.kind(),
        _ => true,
    };

    same_node && are_all_equivalent(&first.children(), &second.children(), ignore_literals)
}

/// Two absent trees are equivalent, one absent tree is not
pub fn are_optional_equivalent(
    first: Option<&Tree>,
    second: Option<&Tree>,
    ignore_literals: bool,
) -> bool {
    match (first, second) {
        (None, None) => true,
        (Some(first), Some(second)) => are_equivalent_with(first, second, ignore_literals),
        _ => false,
    }
}

/// Same length and pairwise equivalent, in order
pub fn are_all_equivalent<A, B>(first: &[A], second: &[B], ignore_literals: bool) -> bool
where
    A: Borrow<Tree>,
    B: Borrow<Tree>,
{
    first.len() == second.len()
        && first
            .iter()
            .zip(second)
            .all(|(a, b)| are_equivalent_with(a.borrow(), b.borrow(), ignore_literals))
}

/// List comparison where either list may be absent
pub fn are_optional_lists_equivalent<A, B>(
    first: Option<&[A]>,
    second: Option<&[B]>,
    ignore_literals: bool,
) -> bool
where
    A: Borrow<Tree>,
    B: Borrow<Tree>,
{
    match (first, second) {
        (None, None) => true,
        (Some(first), Some(second)) => are_all_equivalent(first, second, ignore_literals),
        _ => false,
    }
}

/// Hash of the canonical rendering, the pre-filter of duplicate grouping
pub fn tree_hash(tree: &Tree) -> u64 {
    let mut hasher = DefaultHasher::new();
    tree_to_string(tree).hash(&mut hasher);
    hasher.finish()
}

/// Groups of two or more equivalent trees.
///
/// Groups are ordered by their first member's position in `trees` and keep
/// members in input order. Hashes only select candidates; membership is
/// always confirmed with [`are_equivalent`].
pub fn find_duplicated_groups<'t>(trees: &[&'t Tree]) -> Vec<Vec<&'t Tree>> {
    let hashes: Vec<u64> = trees.par_iter().map(|tree| tree_hash(tree)).collect();

    let mut groups: Vec<Vec<&'t Tree>> = Vec::new();
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
    for (&tree, hash) in trees.iter().zip(hashes) {
        let bucket = buckets.entry(hash).or_default();
        let existing = bucket
            .iter()
            .copied()
            .find(|&group| are_equivalent(groups[group][0], tree));
        match existing {
            Some(group) => groups[group].push(tree),
            None => {
                bucket.push(groups.len());
                groups.push(vec![tree]);
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    debug!(
        "found {} duplicated group(s) among {} tree(s)",
        groups.len(),
        trees.len()
    );
    groups
}
