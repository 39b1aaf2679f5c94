/*!

A [`Path`] addresses a subterm by the sequence of child indices leading to it from the root.
The empty path addresses the root itself.

*/

/// A sequence of child indices. `path[k]` is the index, within its parent, of the node at
/// depth `k+1` along the addressed subterm.
pub type Path = Vec<usize>;
