use fxhash::{FxHashMap, FxHashSet};

/// External identifier of a vertex, as it appears in the edge list.
pub type Label = u32;
/// Dense index of a vertex in `[0, V)`.
pub type Position = usize;
/// Index into the slot space `[0, V+2E)` of an incidence table.
pub type SlotId = usize;

pub type Edge = (Label, Label);
pub type VertexSet = FxHashSet<Label>;
pub type VertexMap<T> = FxHashMap<Label, T>;

/// Read-only access to an undirected graph whose vertices are identified by [Label]s.
pub trait Graph {
    fn num_vertices(&self) -> usize;
    fn num_edges(&self) -> usize;

    fn contains(&self, u:&Label) -> bool;

    fn adjacent(&self, u:&Label, v:&Label) -> bool;
    fn degree(&self, u:&Label) -> u32;

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&Label> + 'a>;
    fn neighbours<'a>(&'a self, u:&Label) -> Box<dyn Iterator<Item=&Label> + 'a>;

    /// Returns every undirected edge exactly once.
    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=Edge> + 'a>;

    fn len(&self) -> usize {
        self.num_vertices()
    }

    fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }
}
