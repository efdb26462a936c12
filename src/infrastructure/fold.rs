use std::hash::Hash;

use indexmap::IndexMap;

/// Rebuild parents from the rows of a one-to-many join.
///
/// Every row carries the parent's columns next to one child. The first row
/// seen for a key creates the parent via `new_parent`; every row, including
/// that first one, is then handed to `push_child`. Parents are returned in
/// the order their key was first seen, so a query sorted by parent key
/// yields parents sorted the same way. Rows of one parent do not have to be
/// contiguous.
///
/// The first `Err` from `rows` stops the fold and is returned; nothing
/// folded so far escapes. For deeper joins, fold the outer level here and
/// let `push_child` fold the inner level into the parent.
pub fn fold_one_to_many<R, K, P, E, I>(
    rows: I,
    mut key_of: impl FnMut(&R) -> K,
    mut new_parent: impl FnMut(&R) -> P,
    mut push_child: impl FnMut(&mut P, R),
) -> Result<Vec<P>, E>
where
    I: IntoIterator<Item = Result<R, E>>,
    K: Eq + Hash,
{
    let mut parents: IndexMap<K, P> = IndexMap::new();

    for row in rows {
        let row = row?;
        let parent = parents
            .entry(key_of(&row))
            .or_insert_with(|| new_parent(&row));
        push_child(parent, row);
    }

    Ok(parents.into_values().collect())
}
