//! core::graph
//!
//! Stitch graph representation and operations.
//!
//! # Architecture
//!
//! The stitch graph is a flat arena where:
//! - Nodes are stitches, kept in collection (creation) order
//! - `parent` edges point to the stitch preceding in crochet order
//! - `base` edges point to the stitch a stitch is worked into
//! - The first stitch is the sentinel and anchors the whole pattern
//!
//! Ids are handed out in increasing order and removal preserves order, so the
//! collection stays sorted by id and lookups are a binary search.
//!
//! # Invariants
//!
//! - Exactly one sentinel, never deleted
//! - Every `parent`/`base` reference resolves to a live stitch
//! - The next-parent cursor always resolves to a live stitch
//!
//! All mutations either uphold these or do nothing.

use super::types::{Point, StitchId, StitchType};

/// A single stitch in the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Stitch {
    id: StitchId,
    position: Point,
    parent: Option<StitchId>,
    base: Option<StitchId>,
    kind: StitchType,
}

impl Stitch {
    pub fn id(&self) -> StitchId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Stitch preceding this one in crochet order.
    pub fn parent(&self) -> Option<StitchId> {
        self.parent
    }

    /// Stitch this one is physically attached to.
    pub fn base(&self) -> Option<StitchId> {
        self.base
    }

    pub fn kind(&self) -> StitchType {
        self.kind
    }
}

/// A stitch described by collection indices instead of ids.
///
/// This is the shape the pattern file uses; see
/// [`StitchGraph::from_indexed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedStitch {
    pub position: Point,
    pub parent: Option<usize>,
    pub base: Option<usize>,
    pub kind: StitchType,
}

/// The stitch graph: owns every stitch and all graph mutations.
///
/// # Example
///
/// ```
/// use stitchwork::core::graph::StitchGraph;
/// use stitchwork::core::types::{Point, StitchType};
///
/// let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
/// let sentinel = graph.sentinel();
///
/// let chain = graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
/// assert_eq!(graph.get(chain).unwrap().parent(), Some(sentinel));
/// assert_eq!(graph.next_parent(), chain);
///
/// // The sentinel can never be deleted
/// assert!(!graph.delete_stitch(sentinel));
/// assert!(graph.delete_stitch(chain));
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StitchGraph {
    stitches: Vec<Stitch>,
    next_parent: StitchId,
    next_id: u32,
}

impl StitchGraph {
    /// Create a graph holding only the sentinel slip stitch at `origin`.
    pub fn new(origin: Point) -> Self {
        let sentinel = StitchId::new(0);
        Self {
            stitches: vec![Stitch {
                id: sentinel,
                position: origin,
                parent: None,
                base: None,
                kind: StitchType::Slip,
            }],
            next_parent: sentinel,
            next_id: 1,
        }
    }

    /// Build a graph from index-referenced stitches.
    ///
    /// Stitch `i` gets id `i`; the first stitch becomes the sentinel and the
    /// cursor is placed on the last one. Returns `None` for an empty list or
    /// when any reference is out of range.
    pub fn from_indexed(nodes: &[IndexedStitch]) -> Option<Self> {
        if nodes.is_empty() {
            return None;
        }
        let len = nodes.len();
        let resolve = |index: Option<usize>| -> Result<Option<StitchId>, ()> {
            match index {
                None => Ok(None),
                Some(i) if i < len => Ok(Some(StitchId::new(i as u32))),
                Some(_) => Err(()),
            }
        };

        let mut stitches = Vec::with_capacity(len);
        for (i, node) in nodes.iter().enumerate() {
            stitches.push(Stitch {
                id: StitchId::new(i as u32),
                position: node.position,
                parent: resolve(node.parent).ok()?,
                base: resolve(node.base).ok()?,
                kind: node.kind,
            });
        }

        Some(Self {
            stitches,
            next_parent: StitchId::new((len - 1) as u32),
            next_id: len as u32,
        })
    }

    /// Collection position of `id`.
    fn position_of(&self, id: StitchId) -> Option<usize> {
        self.stitches.binary_search_by_key(&id, |s| s.id).ok()
    }

    fn get_mut(&mut self, id: StitchId) -> Option<&mut Stitch> {
        let index = self.position_of(id)?;
        self.stitches.get_mut(index)
    }

    /// Look up a stitch.
    pub fn get(&self, id: StitchId) -> Option<&Stitch> {
        self.position_of(id).map(|i| &self.stitches[i])
    }

    /// Whether `id` refers to a live stitch.
    pub fn contains(&self, id: StitchId) -> bool {
        self.position_of(id).is_some()
    }

    /// Iterate stitches in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Stitch> {
        self.stitches.iter()
    }

    /// Iterate stitch ids in collection order.
    pub fn ids(&self) -> impl Iterator<Item = StitchId> + '_ {
        self.stitches.iter().map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.stitches.len()
    }

    /// Always false: a graph holds at least its sentinel.
    pub fn is_empty(&self) -> bool {
        self.stitches.is_empty()
    }

    /// The permanent first stitch.
    pub fn sentinel(&self) -> StitchId {
        self.stitches[0].id
    }

    pub fn is_sentinel(&self, id: StitchId) -> bool {
        self.sentinel() == id
    }

    /// The stitch new stitches attach to by default.
    pub fn next_parent(&self) -> StitchId {
        self.next_parent
    }

    /// Move the next-parent cursor. Unknown ids are ignored.
    pub fn set_next_parent(&mut self, id: StitchId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.next_parent = id;
        true
    }

    /// Collection index of `id` (the index used by the pattern file).
    pub fn index_of(&self, id: StitchId) -> Option<usize> {
        self.position_of(id)
    }

    /// Id of the stitch at collection index `index`.
    pub fn id_at(&self, index: usize) -> Option<StitchId> {
        self.stitches.get(index).map(|s| s.id)
    }

    /// Stitches whose parent is `id`.
    pub fn children(&self, id: StitchId) -> impl Iterator<Item = StitchId> + '_ {
        self.stitches
            .iter()
            .filter(move |s| s.parent == Some(id))
            .map(|s| s.id)
    }

    /// Stitches worked into `id`.
    pub fn based_on(&self, id: StitchId) -> impl Iterator<Item = StitchId> + '_ {
        self.stitches
            .iter()
            .filter(move |s| s.base == Some(id))
            .map(|s| s.id)
    }

    /// Crochet-order edges as `(stitch, parent)` pairs, in collection order.
    pub fn crochet_path(&self) -> Vec<(StitchId, StitchId)> {
        self.stitches
            .iter()
            .filter_map(|s| s.parent.map(|p| (s.id, p)))
            .collect()
    }

    /// Append a stitch after the next-parent cursor.
    ///
    /// See [`StitchGraph::add_stitch_with_parent`].
    pub fn add_stitch(
        &mut self,
        position: Point,
        kind: StitchType,
        base: Option<StitchId>,
    ) -> StitchId {
        self.add_stitch_with_parent(position, kind, Some(self.next_parent), base)
    }

    /// Append a stitch with an explicit parent.
    ///
    /// If a stitch was following the current cursor, it is rewired to follow
    /// the new stitch instead, so adding after a stitch in the middle of the
    /// order splices the new stitch in. The cursor then moves to the new
    /// stitch. References to unknown stitches are stored as `None`.
    pub fn add_stitch_with_parent(
        &mut self,
        position: Point,
        kind: StitchType,
        parent: Option<StitchId>,
        base: Option<StitchId>,
    ) -> StitchId {
        let previous = self.next_parent;
        let parent = parent.filter(|p| self.contains(*p));
        let base = base.filter(|b| self.contains(*b));

        let id = StitchId::new(self.next_id);
        self.next_id += 1;

        if let Some(follower) = self
            .stitches
            .iter_mut()
            .find(|s| s.parent == Some(previous))
        {
            follower.parent = Some(id);
        }

        self.stitches.push(Stitch {
            id,
            position,
            parent,
            base,
            kind,
        });
        self.next_parent = id;
        id
    }

    /// Delete a stitch, repairing every reference to it first.
    ///
    /// - stitches based on it fall back to its base, else its parent
    /// - stitches following it fall back to its parent, else the sentinel
    /// - the cursor falls back to its parent, else the sentinel
    ///
    /// Returns `false` (and changes nothing) for the sentinel or an unknown id.
    pub fn delete_stitch(&mut self, id: StitchId) -> bool {
        if self.is_sentinel(id) {
            return false;
        }
        let Some(index) = self.position_of(id) else {
            return false;
        };

        let removed = self.stitches.remove(index);
        let sentinel = self.sentinel();
        // A self-reference can only come from an imported file; never hand it on.
        let own_parent = removed.parent.filter(|p| *p != id);
        let own_base = removed.base.filter(|b| *b != id);
        let base_fallback = own_base.or(own_parent);
        let parent_fallback = own_parent.unwrap_or(sentinel);

        for stitch in &mut self.stitches {
            if stitch.base == Some(id) {
                stitch.base = base_fallback;
            }
            if stitch.parent == Some(id) {
                stitch.parent = Some(parent_fallback);
            }
        }

        if self.next_parent == id {
            self.next_parent = parent_fallback;
        }
        true
    }

    /// Attach `id` to `new_base`.
    ///
    /// Does nothing for unknown ids, the sentinel, or a stitch onto itself.
    pub fn rebase(&mut self, id: StitchId, new_base: StitchId) -> bool {
        if id == new_base || self.is_sentinel(id) || !self.contains(new_base) {
            return false;
        }
        match self.get_mut(id) {
            Some(stitch) => {
                stitch.base = Some(new_base);
                true
            }
            None => false,
        }
    }

    /// Translate every listed stitch by `delta`. Returns how many moved.
    pub fn move_by<I>(&mut self, ids: I, delta: Point) -> usize
    where
        I: IntoIterator<Item = StitchId>,
    {
        let mut moved = 0;
        for id in ids {
            if let Some(stitch) = self.get_mut(id) {
                stitch.position += delta;
                moved += 1;
            }
        }
        moved
    }

    /// Line the listed stitches up on a vertical line through their mean x.
    pub fn align_vertical(&mut self, ids: &[StitchId]) -> bool {
        self.align(ids, |p| p.x, |p, x| p.x = x)
    }

    /// Line the listed stitches up on a horizontal line through their mean y.
    pub fn align_horizontal(&mut self, ids: &[StitchId]) -> bool {
        self.align(ids, |p| p.y, |p, y| p.y = y)
    }

    fn align(
        &mut self,
        ids: &[StitchId],
        read: impl Fn(&Point) -> f64,
        write: impl Fn(&mut Point, f64),
    ) -> bool {
        let live: Vec<StitchId> = ids.iter().copied().filter(|id| self.contains(*id)).collect();
        if live.len() < 2 {
            return false;
        }
        let sum: f64 = live
            .iter()
            .filter_map(|id| self.get(*id))
            .map(|s| read(&s.position))
            .sum();
        let mean = sum / live.len() as f64;
        for id in live {
            if let Some(stitch) = self.get_mut(id) {
                write(&mut stitch.position, mean);
            }
        }
        true
    }
}
