//! The beachline: the arcs of parabolas closest to the sweep line.
//!
//! Arcs are kept in a doubly linked list, ordered by increasing `y`. The list
//! lives in an arena of slots; removing an arc frees its slot for reuse and
//! bumps the slot's generation, so that a stale [`ArcIdx`] (for example, one
//! held by a circle event that should have been invalidated) can be detected
//! instead of silently pointing at some other arc.

use crate::{
    geom::{self, Point, SiteIdx, SiteVec},
    queue::CircleIdx,
    segments::SegIdx,
};

/// A handle to an arc on the beachline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ArcIdx {
    slot: u32,
    generation: u32,
}

impl std::fmt::Debug for ArcIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arc_{}.{}", self.slot, self.generation)
    }
}

/// A piece of the parabola belonging to one site.
///
/// The same site can own several arcs at once, after another site split one
/// of its arcs in two.
#[derive(Clone, Debug)]
pub(crate) struct Arc {
    pub site: SiteIdx,
    /// The arc below this one.
    pub prev: Option<ArcIdx>,
    /// The arc above this one.
    pub next: Option<ArcIdx>,
    /// The circle event that would remove this arc, if one is scheduled.
    pub event: Option<CircleIdx>,
    /// The segment traced by the breakpoint between `prev` and this arc.
    pub left_seg: Option<SegIdx>,
    /// The segment traced by the breakpoint between this arc and `next`.
    pub right_seg: Option<SegIdx>,
}

impl Arc {
    fn new(site: SiteIdx) -> Self {
        Arc {
            site,
            prev: None,
            next: None,
            event: None,
            left_seg: None,
            right_seg: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    arc: Option<Arc>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Beachline {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<ArcIdx>,
    tail: Option<ArcIdx>,
    len: usize,
}

impl Beachline {
    fn alloc(&mut self, arc: Arc) -> ArcIdx {
        self.len += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            debug_assert!(entry.arc.is_none());
            entry.arc = Some(arc);
            ArcIdx {
                slot,
                generation: entry.generation,
            }
        } else {
            let slot = u32::try_from(self.slots.len()).expect("too many arcs");
            self.slots.push(Slot {
                generation: 0,
                arc: Some(arc),
            });
            ArcIdx {
                slot,
                generation: 0,
            }
        }
    }

    /// Returns the arc at `idx`, or `None` if that arc has been removed.
    pub fn get(&self, idx: ArcIdx) -> Option<&Arc> {
        self.slots
            .get(idx.slot as usize)
            .filter(|s| s.generation == idx.generation)
            .and_then(|s| s.arc.as_ref())
    }

    fn get_mut(&mut self, idx: ArcIdx) -> Option<&mut Arc> {
        self.slots
            .get_mut(idx.slot as usize)
            .filter(|s| s.generation == idx.generation)
            .and_then(|s| s.arc.as_mut())
    }

    pub fn contains(&self, idx: ArcIdx) -> bool {
        self.get(idx).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The lowest arc.
    pub fn head(&self) -> Option<ArcIdx> {
        self.head
    }

    /// The highest arc.
    pub fn tail(&self) -> Option<ArcIdx> {
        self.tail
    }

    /// Adds a new arc above all the others.
    pub fn push_back(&mut self, site: SiteIdx) -> ArcIdx {
        let mut arc = Arc::new(site);
        arc.prev = self.tail;
        let idx = self.alloc(arc);
        match self.tail {
            Some(tail) => self[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        idx
    }

    /// Adds a new arc immediately above `after`.
    pub fn insert_after(&mut self, after: ArcIdx, site: SiteIdx) -> ArcIdx {
        let next = self[after].next;
        let mut arc = Arc::new(site);
        arc.prev = Some(after);
        arc.next = next;
        let idx = self.alloc(arc);
        self[after].next = Some(idx);
        match next {
            Some(next) => self[next].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        idx
    }

    /// Unlinks the arc at `idx`, returning it.
    ///
    /// After this, `idx` (and any copy of it) is stale.
    pub fn remove(&mut self, idx: ArcIdx) -> Arc {
        assert!(self.contains(idx), "stale arc {idx:?}");
        let slot = &mut self.slots[idx.slot as usize];
        let arc = slot.arc.take().expect("live arc has no data");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx.slot);
        self.len -= 1;

        match arc.prev {
            Some(prev) => self[prev].next = arc.next,
            None => self.head = arc.next,
        }
        match arc.next {
            Some(next) => self[next].prev = arc.prev,
            None => self.tail = arc.prev,
        }
        arc
    }

    /// Iterates over the arcs from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = ArcIdx> + '_ {
        std::iter::successors(self.head(), |&idx| self[idx].next)
    }

    /// The sites of the arcs before and after `idx`.
    pub fn neighbor_sites(&self, idx: ArcIdx) -> (Option<SiteIdx>, Option<SiteIdx>) {
        let arc = &self[idx];
        (
            arc.prev.map(|prev| self[prev].site),
            arc.next.map(|next| self[next].site),
        )
    }

    /// Does the arc at `idx` span the height of the new site `p`? If so,
    /// returns the point on the arc at that height.
    pub fn intersect(&self, idx: ArcIdx, p: Point, sites: &SiteVec<Point>) -> Option<Point> {
        let (prev, next) = self.neighbor_sites(idx);
        geom::intersect(
            p,
            sites[self[idx].site],
            prev.map(|s| sites[s]),
            next.map(|s| sites[s]),
        )
    }

    /// Finds the arc directly to the left of the new site `p`.
    ///
    /// This is a linear scan from the bottom of the beachline. Returns `None`
    /// if no arc spans the site's height, which happens when every arc's site
    /// has the same `x` coordinate as `p`.
    pub fn locate(&self, p: Point, sites: &SiteVec<Point>) -> Option<(ArcIdx, Point)> {
        self.iter()
            .find_map(|idx| self.intersect(idx, p, sites).map(|z| (idx, z)))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Checks that the links are consistent.
    ///
    /// Used in tests, and when enabling slow-asserts.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub fn assert_consistent(&self) {
        let mut count = 0;
        let mut prev = None;
        for idx in self.iter() {
            let arc = &self[idx];
            assert_eq!(arc.prev, prev, "bad back link at {idx:?}");
            if let Some(prev) = prev {
                assert_eq!(
                    self[prev].right_seg, arc.left_seg,
                    "neighbors {prev:?} and {idx:?} disagree on their segment"
                );
            }
            prev = Some(idx);
            count += 1;
            assert!(count <= self.len, "cycle in the beachline");
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len);
        assert_eq!(
            self.slots.iter().filter(|s| s.arc.is_some()).count(),
            self.len
        );
    }

    #[cfg(feature = "slow-asserts")]
    pub fn check_invariants(&self) {
        self.assert_consistent();
    }

    #[cfg(not(feature = "slow-asserts"))]
    pub fn check_invariants(&self) {}
}

impl std::ops::Index<ArcIdx> for Beachline {
    type Output = Arc;

    fn index(&self, idx: ArcIdx) -> &Arc {
        self.get(idx)
            .unwrap_or_else(|| panic!("stale arc {idx:?}"))
    }
}

impl std::ops::IndexMut<ArcIdx> for Beachline {
    fn index_mut(&mut self, idx: ArcIdx) -> &mut Arc {
        self.get_mut(idx)
            .unwrap_or_else(|| panic!("stale arc {idx:?}"))
    }
}
