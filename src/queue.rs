//! The priority queue of upcoming sweep events.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    beachline::ArcIdx,
    geom::{Point, SiteIdx},
    num::CheapOrderedFloat,
};

/// An index into the circle events that have been scheduled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CircleIdx(pub usize);

pub(crate) struct CircleVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(CircleVec, CircleIdx, "circle");

/// A predicted vertex of the diagram, where an arc shrinks to nothing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CircleEvent {
    /// The sweep position at which the event happens.
    pub x: f64,
    /// The vertex.
    pub center: Point,
    /// The arc that vanishes.
    pub arc: ArcIdx,
    /// Cleared when the arc's neighbors change before the event fires. We
    /// don't bother removing invalid events from the heap; they're just
    /// ignored when they come out.
    pub valid: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Event {
    Site(SiteIdx),
    Circle(CircleIdx),
}

/// Breaks ties in sweep position: sites go before circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Site,
    Circle,
}

// The field order matters: it's the lexicographic order of the derived `Ord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    x: CheapOrderedFloat,
    kind: Kind,
    y: CheapOrderedFloat,
    seq: u64,
    event: Event,
}

/// Site events and circle events, ordered by the sweep position at which
/// they happen.
///
/// Ties are broken by kind (sites first), then by the height of the site
/// or vertex, and finally by the order in which the events were pushed. All
/// comparisons are exact.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    circles: CircleVec<CircleEvent>,
    seq: u64,
}

impl EventQueue {
    fn push(&mut self, x: f64, kind: Kind, y: f64, event: Event) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(QueueEntry {
            x: x.into(),
            kind,
            y: y.into(),
            seq,
            event,
        }));
    }

    pub fn push_site(&mut self, idx: SiteIdx, p: Point) {
        self.push(p.x, Kind::Site, p.y, Event::Site(idx));
    }

    /// Schedules the disappearance of `arc` at sweep position `x`.
    pub fn push_circle(&mut self, x: f64, center: Point, arc: ArcIdx) -> CircleIdx {
        let idx = self.circles.push(CircleEvent {
            x,
            center,
            arc,
            valid: true,
        });
        self.push(x, Kind::Circle, center.y, Event::Circle(idx));
        idx
    }

    /// Removes the next event, along with its sweep position.
    ///
    /// Invalidated circle events are returned like any other; check them
    /// with [`EventQueue::is_valid`].
    pub fn pop_min(&mut self) -> Option<(f64, Event)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.x.into_inner(), entry.event))
    }

    pub fn peek_min(&self) -> Option<(f64, Event)> {
        self.heap
            .peek()
            .map(|Reverse(entry)| (entry.x.into_inner(), entry.event))
    }

    pub fn invalidate(&mut self, idx: CircleIdx) {
        self.circles[idx].valid = false;
    }

    pub fn circle(&self, idx: CircleIdx) -> &CircleEvent {
        &self.circles[idx]
    }

    /// Site events are always valid; circle events are valid until
    /// invalidated.
    pub fn is_valid(&self, event: Event) -> bool {
        match event {
            Event::Site(_) => true,
            Event::Circle(idx) => self.circles[idx].valid,
        }
    }

    /// The number of events still in the heap, valid or not.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The number of circle events ever scheduled.
    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.circles.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beachline::Beachline;
    use assert_matches::assert_matches;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn drain(q: &mut EventQueue) -> Vec<(f64, Event)> {
        std::iter::from_fn(|| q.pop_min()).collect()
    }

    #[test]
    fn sites_in_sweep_order() {
        let mut q = EventQueue::default();
        q.push_site(SiteIdx(0), p(3.0, 0.0));
        q.push_site(SiteIdx(1), p(1.0, 5.0));
        q.push_site(SiteIdx(2), p(1.0, -5.0));
        q.push_site(SiteIdx(3), p(2.0, 0.0));
        assert_eq!(q.len(), 4);
        assert_eq!(q.peek_min(), Some((1.0, Event::Site(SiteIdx(2)))));

        let order: Vec<_> = drain(&mut q).into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            order,
            vec![
                Event::Site(SiteIdx(2)),
                Event::Site(SiteIdx(1)),
                Event::Site(SiteIdx(3)),
                Event::Site(SiteIdx(0)),
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn sites_win_ties() {
        let mut bl = Beachline::default();
        let arc = bl.push_back(SiteIdx(0));

        let mut q = EventQueue::default();
        // The circle is pushed first, and is lower, but the site still wins.
        let c = q.push_circle(1.0, p(0.0, -10.0), arc);
        q.push_site(SiteIdx(1), p(1.0, 10.0));

        assert_eq!(q.pop_min(), Some((1.0, Event::Site(SiteIdx(1)))));
        assert_eq!(q.pop_min(), Some((1.0, Event::Circle(c))));
        assert_eq!(q.pop_min(), None);
    }

    #[test]
    fn identical_sites_keep_push_order() {
        let mut q = EventQueue::default();
        q.push_site(SiteIdx(1), p(0.0, 0.0));
        q.push_site(SiteIdx(0), p(0.0, 0.0));
        assert_matches!(q.pop_min(), Some((_, Event::Site(SiteIdx(1)))));
        assert_matches!(q.pop_min(), Some((_, Event::Site(SiteIdx(0)))));
    }

    #[test]
    fn invalidated_circles_stay_in_the_heap() {
        let mut bl = Beachline::default();
        let arc = bl.push_back(SiteIdx(0));

        let mut q = EventQueue::default();
        let c0 = q.push_circle(2.0, p(1.0, 0.0), arc);
        let c1 = q.push_circle(3.0, p(2.0, 0.0), arc);
        q.invalidate(c0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.circle_count(), 2);

        let (x, e) = q.pop_min().unwrap();
        assert_eq!(x, 2.0);
        assert_eq!(e, Event::Circle(c0));
        assert!(!q.is_valid(e));

        let (_, e) = q.pop_min().unwrap();
        assert_eq!(e, Event::Circle(c1));
        assert!(q.is_valid(e));
        assert_eq!(q.circle(c1).center, p(2.0, 0.0));
        assert_eq!(q.circle(c1).arc, arc);

        q.clear();
        assert_eq!(q.circle_count(), 0);
    }
}
