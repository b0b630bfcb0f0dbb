//! Ancestor-chain based queries over a built tree.

use std::fmt;
use std::hash::Hash;

use generational_arena::Index;
use tracing::instrument;

use crate::arena::TreeArena;
use crate::errors::{TreeError, TreeResult};

/// Most recent common ancestor of the nodes named `name1` and `name2`.
///
/// Both chains are inclusive of the node itself, so a node is its own
/// ancestor: `mrca(a, a) == a`, and an ancestor/descendant pair resolves to
/// the ancestor. The first chain is walked nearest-to-farthest and tested for
/// membership in the second, so the deepest common ancestor wins.
///
/// Fails with [`TreeError::NodeNotFound`] if either name was never seen
/// during construction. Returns `None` only when the two nodes live in
/// disconnected parts of the registry, which a single well-formed input
/// cannot produce.
#[instrument(level = "debug", skip(arena))]
pub fn most_recent_common_ancestor<T>(
    arena: &TreeArena<T>,
    name1: &T,
    name2: &T,
) -> TreeResult<Option<Index>>
where
    T: Eq + Hash + Clone + fmt::Display + fmt::Debug,
{
    let n1 = arena
        .lookup(name1)
        .ok_or_else(|| TreeError::NodeNotFound(name1.to_string()))?;
    let n2 = arena
        .lookup(name2)
        .ok_or_else(|| TreeError::NodeNotFound(name2.to_string()))?;

    let chain1 = arena.self_and_ancestors(n1);
    let chain2 = arena.self_and_ancestors(n2);

    // O(depth1 * depth2) linear membership scan, fine for genealogy-sized trees
    Ok(chain1.into_iter().find(|idx| chain2.contains(idx)))
}
