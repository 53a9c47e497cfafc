//! Voronoi edges, as they are traced out by the sweep.

use crate::geom::{Point, SiteIdx};

/// A boundary segment between two Voronoi cells.
///
/// During the sweep, a segment starts at a fixed point and grows along the
/// bisector of its two sites until its end point is found. In a finished
/// diagram, every segment is finalized.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// The start point.
    pub start: Point,
    /// The end point, if it has been found yet.
    pub end: Option<Point>,
    /// Has this segment been finished? A finalized segment never changes.
    pub finalized: bool,
    /// The two sites whose cells are separated by this segment.
    pub sites: [SiteIdx; 2],
}

impl Segment {
    /// Starts a new segment at `start`, separating the cells of `sites`.
    pub fn new(start: Point, sites: [SiteIdx; 2]) -> Self {
        Segment {
            start,
            end: None,
            finalized: false,
            sites,
        }
    }

    /// Finishes this segment at `end`.
    ///
    /// Only the first call has any effect. Returns true if this call was the
    /// one that finished the segment.
    pub fn finish(&mut self, end: Point) -> bool {
        if self.finalized {
            return false;
        }
        self.end = Some(end);
        self.finalized = true;
        true
    }

    /// Does this segment form part of the boundary of `site`'s cell?
    pub fn separates(&self, site: SiteIdx) -> bool {
        self.sites.contains(&site)
    }

    /// Are both endpoints present and finite?
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_some_and(|e| e.is_finite())
    }

    /// Convert to a `kurbo` line, if this segment has an end point.
    pub fn to_kurbo(&self) -> Option<kurbo::Line> {
        self.end
            .map(|end| kurbo::Line::new(self.start.to_kurbo(), end.to_kurbo()))
    }
}

/// An index into the segments opened by the sweep.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SegIdx(pub usize);

pub(crate) struct SegVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(SegVec, SegIdx, "seg");

/// How a segment relates to the other half of its edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Half {
    /// The segment is a whole edge on its own.
    Whole,
    /// The segment was opened together with this other segment, at the same
    /// point, heading the other way along the bisector.
    First(SegIdx),
    /// This is the other half of some `First`.
    Second,
}

/// The segments opened so far by the sweep.
///
/// When a new site splits an arc, two breakpoints move apart from the same
/// point, tracing the same edge in both directions. We open one segment per
/// breakpoint and stitch them together in [`Segments::edges`].
#[derive(Debug, Default)]
pub(crate) struct Segments {
    segs: SegVec<Segment>,
    halves: SegVec<Half>,
}

impl Segments {
    /// Opens a new segment at `start`.
    pub fn open(&mut self, start: Point, sites: [SiteIdx; 2]) -> SegIdx {
        self.halves.push(Half::Whole);
        self.segs.push(Segment::new(start, sites))
    }

    /// Opens the two halves of an edge, both starting at `start`.
    ///
    /// `sites` are the sites on the lower and upper side of the first half;
    /// the second half gets them the other way around.
    pub fn open_pair(&mut self, start: Point, sites: [SiteIdx; 2]) -> (SegIdx, SegIdx) {
        let first = self.segs.push(Segment::new(start, sites));
        let second = self
            .segs
            .push(Segment::new(start, [sites[1], sites[0]]));
        self.halves.push(Half::First(second));
        self.halves.push(Half::Second);
        (first, second)
    }

    /// Finishes the segment `idx` at `end`, unless it's already finished.
    pub fn finish(&mut self, idx: SegIdx, end: Point) -> bool {
        self.segs[idx].finish(end)
    }

    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn clear(&mut self) {
        self.segs.clear();
        self.halves.clear();
    }

    /// Iterates over the edges, in the order they were opened.
    ///
    /// Each pair of halves is joined into a single segment running from the
    /// first half's end point to the second half's end point.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segs
            .iter()
            .zip(self.halves.iter())
            .filter_map(|((_, seg), (_, half))| match *half {
                Half::Whole => Some(*seg),
                Half::Second => None,
                Half::First(twin) => {
                    let twin = &self.segs[twin];
                    Some(Segment {
                        start: seg.end.unwrap_or(seg.start),
                        end: twin.end,
                        finalized: seg.finalized && twin.finalized,
                        sites: seg.sites,
                    })
                }
            })
    }
}

#[cfg(test)]
impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Self::Output {
        &self.segs[index]
    }
}
