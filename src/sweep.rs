//! Fortune's algorithm, driving the beachline through the event queue.

use tracing::{debug, debug_span, trace, warn};

use crate::{
    beachline::{ArcIdx, Beachline},
    bounds::BoundingBox,
    geom::{self, Point, SiteIdx, SiteVec},
    num::CheapOrderedFloat,
    queue::{CircleEvent, CircleIdx, Event, EventQueue},
    segments::{Segment, Segments},
    Config, Error,
};

/// Computes the Voronoi diagram of a set of sites.
///
/// Register the sites with [`Sweeper::add_site`], run the sweep with
/// [`Sweeper::compute`], and then read off the edges with
/// [`Sweeper::segments`].
///
/// ```
/// use beachline::{Point, Sweeper};
///
/// let mut sweeper = Sweeper::default();
/// let a = sweeper.add_site((0.0, 0.0)).unwrap();
/// let b = sweeper.add_site((2.0, 0.0)).unwrap();
/// sweeper.compute().unwrap();
///
/// // Two sites are separated by a single (clipped) bisector.
/// assert_eq!(sweeper.segments().len(), 1);
/// assert_eq!(sweeper.locate_cell(Point::new(0.5, 7.0)), Some(a));
/// assert_eq!(sweeper.locate_cell(Point::new(1.5, 7.0)), Some(b));
/// ```
#[derive(Debug, Default)]
pub struct Sweeper {
    config: Config,
    sites: SiteVec<Point>,
    /// The exact extent of the sites, without any margin.
    extent: Option<BoundingBox>,
    beachline: Beachline,
    queue: EventQueue,
    segments: Segments,
    output: Vec<Segment>,
    sweep_x: f64,
    /// The last site that was inserted into the beachline. Sites come out of
    /// the queue in sweep order, so any duplicates of this one come next.
    last_site: Option<SiteIdx>,
    computed: bool,
}

impl Sweeper {
    /// Creates an empty diagram with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty diagram with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Sweeper {
            config,
            ..Self::default()
        }
    }

    /// The configuration this diagram was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a new site.
    ///
    /// Sites are numbered in the order they're added. Adding a site that
    /// coincides with an earlier one is allowed, but the duplicate won't get
    /// a cell of its own.
    pub fn add_site(&mut self, p: impl Into<Point>) -> Result<SiteIdx, Error> {
        if self.computed {
            return Err(Error::AlreadyComputed);
        }
        let p = p.into();
        Error::check_finite(p.x, p.y)?;

        match &mut self.extent {
            Some(extent) => extent.include(p),
            None => self.extent = Some(BoundingBox::around(p)),
        }
        Ok(self.sites.push(p))
    }

    /// Registers a collection of sites.
    ///
    /// If any of them is invalid, none of them are added.
    pub fn add_sites<P: Into<Point>>(
        &mut self,
        ps: impl IntoIterator<Item = P>,
    ) -> Result<(), Error> {
        if self.computed {
            return Err(Error::AlreadyComputed);
        }
        let ps: Vec<Point> = ps.into_iter().map(Into::into).collect();
        for p in &ps {
            Error::check_finite(p.x, p.y)?;
        }
        for p in ps {
            self.add_site(p)?;
        }
        Ok(())
    }

    /// Returns the site with index `idx`, if there is one.
    pub fn site(&self, idx: SiteIdx) -> Option<Point> {
        self.sites.get(idx).copied()
    }

    /// Iterates over the registered sites and their indices.
    pub fn sites(&self) -> impl Iterator<Item = (SiteIdx, Point)> + '_ {
        self.sites.iter().map(|(idx, p)| (idx, *p))
    }

    /// The number of registered sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// The box that the diagram is clipped to: the sites' bounding box, plus
    /// a margin. Returns `None` if there are no sites.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.extent
            .map(|e| e.with_margin(self.config.margin_ratio, self.config.margin_bias))
    }

    /// Has [`Sweeper::compute`] been run?
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Forgets all the sites and the computed diagram, if any.
    pub fn reset(&mut self) {
        self.sites.clear();
        self.extent = None;
        self.beachline.clear();
        self.queue.clear();
        self.segments.clear();
        self.output.clear();
        self.sweep_x = 0.0;
        self.last_site = None;
        self.computed = false;
    }

    /// Runs the sweep over all the registered sites.
    ///
    /// This can only be done once (until the next [`Sweeper::reset`]).
    pub fn compute(&mut self) -> Result<(), Error> {
        if self.computed {
            return Err(Error::AlreadyComputed);
        }
        self.computed = true;

        let Some(bounds) = self.bounds() else {
            debug!("no sites, nothing to compute");
            return Ok(());
        };

        let _span = debug_span!("compute", sites = self.sites.len()).entered();
        self.sweep_x = f64::NEG_INFINITY;
        for (idx, p) in self.sites.iter() {
            self.queue.push_site(idx, *p);
        }

        while let Some((x, event)) = self.queue.pop_min() {
            trace!(x, ?event, pending = self.queue.len(), next = ?self.queue.peek_min(), "event");
            match event {
                Event::Site(idx) => self.site_event(idx, &bounds),
                Event::Circle(idx) => self.circle_event(idx),
            }
            self.beachline.check_invariants();
        }

        debug_assert!(self.queue.is_empty());
        self.finish(&bounds);
        debug!(
            segments = self.output.len(),
            opened = self.segments.len(),
            circle_events = self.queue.circle_count(),
            arcs = self.beachline.len(),
            "finished sweep"
        );
        Ok(())
    }

    fn advance_sweep(&mut self, x: f64) {
        debug_assert!(x >= self.sweep_x, "sweep moved back from {} to {x}", self.sweep_x);
        self.sweep_x = x;
    }

    fn site_event(&mut self, idx: SiteIdx, bounds: &BoundingBox) {
        let p = self.sites[idx];
        if let Some(last) = self.last_site {
            if self.sites[last] == p {
                warn!(site = ?idx, duplicate_of = ?last, "skipping duplicate site {:?}", p);
                return;
            }
        }
        self.last_site = Some(idx);
        self.advance_sweep(p.x);

        if self.beachline.is_empty() {
            self.beachline.push_back(idx);
            return;
        }

        if let Some((arc, z)) = self.beachline.locate(p, &self.sites) {
            // Split `arc` in two, with the new site's arc in between.
            let old_site = self.beachline[arc].site;
            let right = self.beachline.insert_after(arc, old_site);
            let new = self.beachline.insert_after(arc, idx);
            let carried = self.beachline[arc].right_seg;
            self.beachline[right].right_seg = carried;

            let (lower, upper) = self.segments.open_pair(z, [old_site, idx]);
            self.beachline[arc].right_seg = Some(lower);
            self.beachline[new].left_seg = Some(lower);
            self.beachline[new].right_seg = Some(upper);
            self.beachline[right].left_seg = Some(upper);

            for changed in [arc, new, right] {
                self.check_circle(changed);
            }
        } else {
            // Every arc's site is on the sweep line, and this site is above
            // all of them.
            let tail = self.beachline.tail().expect("beachline is non-empty");
            let tail_site = self.beachline[tail].site;
            let new = self.beachline.push_back(idx);

            // Their edge is a horizontal line coming in from far off to the
            // left, as far out as the finishing directrix is to the right.
            let far = bounds.x_min - 2.0 * (bounds.width() + bounds.height());
            let start = Point::new(far, (p.y + self.sites[tail_site].y) / 2.0);
            let seg = self.segments.open(start, [tail_site, idx]);
            self.beachline[tail].right_seg = Some(seg);
            self.beachline[new].left_seg = Some(seg);

            self.check_circle(tail);
        }
    }

    fn circle_event(&mut self, idx: CircleIdx) {
        if !self.queue.is_valid(Event::Circle(idx)) {
            return;
        }
        let CircleEvent { x, center, arc, .. } = *self.queue.circle(idx);
        self.advance_sweep(x);

        let removed = self.beachline.remove(arc);
        let (Some(prev), Some(next)) = (removed.prev, removed.next) else {
            panic!("circle event {idx:?} for {arc:?}, which isn't an interior arc");
        };

        for seg in [removed.left_seg, removed.right_seg].into_iter().flatten() {
            self.segments.finish(seg, center);
        }

        let seg = self.segments.open(
            center,
            [self.beachline[prev].site, self.beachline[next].site],
        );
        self.beachline[prev].right_seg = Some(seg);
        self.beachline[next].left_seg = Some(seg);

        self.check_circle(prev);
        self.check_circle(next);
    }

    /// Replaces any circle event for `arc` with a fresh one, if its current
    /// neighbors converge.
    fn check_circle(&mut self, arc: ArcIdx) {
        if let Some(old) = self.beachline[arc].event.take() {
            self.queue.invalidate(old);
        }

        let (Some(prev), Some(next)) = self.beachline.neighbor_sites(arc) else {
            return;
        };
        let site = self.beachline[arc].site;
        let Some(circle) =
            geom::circumcenter(self.sites[prev], self.sites[site], self.sites[next])
        else {
            return;
        };

        // A co-circular site can produce an event right at the sweep line.
        if circle.event_x < self.sweep_x {
            return;
        }
        let event = self.queue.push_circle(circle.event_x, circle.center, arc);
        self.beachline[arc].event = Some(event);
    }

    /// Closes the segments that are still growing, and produces the output.
    fn finish(&mut self, bounds: &BoundingBox) {
        // Push the sweep line far enough that every remaining breakpoint is
        // outside the box.
        let far = bounds.x_max + 2.0 * (bounds.width() + bounds.height());
        for idx in self.beachline.iter() {
            let arc = &self.beachline[idx];
            if let (Some(next), Some(seg)) = (arc.next, arc.right_seg) {
                let end = geom::breakpoint(
                    self.sites[arc.site],
                    self.sites[self.beachline[next].site],
                    far,
                );
                self.segments.finish(seg, end);
            }
        }

        self.output.clear();
        for seg in self.segments.edges() {
            let Some(end) = seg.end.filter(|_| seg.finalized && seg.is_finite()) else {
                warn!(sites = ?seg.sites, "dropping unfinished segment {:?}", seg);
                continue;
            };
            if self.config.clip_to_bounds {
                match bounds.clip(seg.start, end) {
                    Some((start, end)) => self.output.push(Segment {
                        start,
                        end: Some(end),
                        ..seg
                    }),
                    None => trace!(sites = ?seg.sites, "segment is outside the box"),
                }
            } else {
                self.output.push(seg);
            }
        }
    }

    /// The edges of the diagram, in the order they were found.
    ///
    /// This is empty until [`Sweeper::compute`] has run. Every returned
    /// segment is finalized.
    pub fn segments(&self) -> &[Segment] {
        &self.output
    }

    /// The edges on the boundary of `site`'s cell, in no particular order.
    pub fn cell_segments(&self, site: SiteIdx) -> impl Iterator<Item = &Segment> + '_ {
        self.output.iter().filter(move |seg| seg.separates(site))
    }

    /// Finds the site whose cell contains `p`.
    ///
    /// This just looks for the nearest site, so it works whether or not the
    /// diagram has been computed. If `p` is equally close to more than one
    /// site, the one added first wins. Returns `None` if there are no sites,
    /// or if `p` has a NaN coordinate.
    pub fn locate_cell(&self, p: impl Into<Point>) -> Option<SiteIdx> {
        let p = p.into();
        if p.x.is_nan() || p.y.is_nan() {
            return None;
        }
        self.sites
            .iter()
            .min_by_key(|(_, site)| CheapOrderedFloat::from(site.distance_squared(&p)))
            .map(|(idx, _)| idx)
    }
}
