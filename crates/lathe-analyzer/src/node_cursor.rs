use lathe_parser::{Item, Kvps, Node};

/// One step of a path into a node value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edge<'a> {
    /// Entered a braced object.
    Obj,
    /// Entered an array.
    Arr,
    /// Descended into the array element at this index.
    Elem(usize),
    /// The offset sits on this key.
    Key(&'a str),
    /// Descended into (or completion should produce) the value for this key.
    ValueForKey(&'a str),
    /// The walk stopped here.
    Terminal,
}

/// An ordered path from a root node value down to the given offset.
pub type NodePath<'a> = Vec<Edge<'a>>;

/// Walk `root` towards `offset`, recording an edge per step.
///
/// At a key-value list, a key containing the offset terminates the path at
/// that key; a value containing it descends. When neither matches and the
/// last pair has no value yet, the path ends at `ValueForKey` for that pair
/// so completion can trigger at the empty slot.
pub fn node_path(root: &Node, offset: usize) -> NodePath<'_> {
    let mut path = Vec::new();
    let mut node = root;
    loop {
        match node {
            Node::Kvps(kvps) => match kvps_step(kvps, offset, &mut path) {
                Some(next) => node = next,
                None => return path,
            },
            Node::Obj(obj) => {
                path.push(Edge::Obj);
                match kvps_step(&obj.kvps, offset, &mut path) {
                    Some(next) => node = next,
                    None => return path,
                }
            }
            Node::Arr(arr) => {
                path.push(Edge::Arr);
                let element = arr
                    .elements
                    .iter()
                    .enumerate()
                    .find(|(_, element)| element.is_in(offset));
                match element {
                    Some((index, element)) => {
                        path.push(Edge::Elem(index));
                        node = element;
                    }
                    None => {
                        path.push(Edge::Terminal);
                        return path;
                    }
                }
            }
            Node::Str(_) | Node::Num(_) | Node::Ident(_) | Node::Err(_) => {
                path.push(Edge::Terminal);
                return path;
            }
        }
    }
}

/// Resolve one step within a key-value list. Returns the node to descend
/// into, or `None` when the path is complete.
fn kvps_step<'a, 'p>(kvps: &'a Kvps, offset: usize, path: &'p mut NodePath<'a>) -> Option<&'a Node> {
    for kvp in &kvps.kvps {
        if kvp.key.is_in(offset) {
            path.push(Edge::Key(kvp.key.text()));
            path.push(Edge::Terminal);
            return None;
        }
        if let Some(value) = &kvp.value {
            if value.is_in(offset) {
                path.push(Edge::ValueForKey(kvp.key.text()));
                return Some(value);
            }
        }
    }
    if let Some(last) = kvps.kvps.last() {
        if last.value.is_none() {
            path.push(Edge::ValueForKey(last.key.text()));
            path.push(Edge::Terminal);
            return None;
        }
    }
    path.push(Edge::Terminal);
    None
}
