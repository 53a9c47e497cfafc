//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::Point;

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    float_in_range(-1e6, 1e6, u)
}

/// Generate a float with a chance to be equal, or very close, to `orig`.
fn another_float(orig: f64, u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    match u.int_in_range(0..=2)? {
        0 => Ok(orig),
        1 => {
            let ulps: i32 = u.int_in_range(-32..=32)?;
            Ok(orig * (1.0 + ulps as f64 * f64::EPSILON))
        }
        _ => float(u),
    }
}

/// Generate an arbitrary site.
pub fn site(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(float(u)?, float(u)?))
}

/// Generate a site that has a chance to share a coordinate (exactly or
/// almost) with `other`.
///
/// Shared coordinates are where the degenerate cases of the sweep live:
/// sites on the sweep line together, and breakpoints moving horizontally.
pub fn another_site(other: Point, u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(another_float(other.x, u)?, another_float(other.y, u)?))
}

/// Generate a collection of sites, with a bias towards degenerate
/// configurations.
pub fn sites(u: &mut Unstructured<'_>) -> Result<Vec<Point>, arbitrary::Error> {
    let mut ret: Vec<Point> = Vec::new();
    u.arbitrary_loop(Some(1), Some(64), |u| {
        let p = match ret.last() {
            Some(&last) if u.arbitrary::<bool>()? => another_site(last, u)?,
            _ => site(u)?,
        };
        ret.push(p);
        Ok(std::ops::ControlFlow::Continue(()))
    })?;
    Ok(ret)
}

/// Checks that can be driven either by a fuzzer or by `arbtest`.
pub mod arbtests {
    use arbitrary::Unstructured;

    use crate::Sweeper;

    /// Computes the diagram of some arbitrary sites, and checks that the
    /// output is finished, finite and inside the bounding box.
    pub fn compute(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
        let sites = super::sites(u)?;

        let mut sweeper = Sweeper::default();
        sweeper.add_sites(sites.iter().copied()).unwrap();
        sweeper.compute().unwrap();

        let Some(bounds) = sweeper.bounds() else {
            return Ok(());
        };
        for seg in sweeper.segments() {
            assert!(seg.finalized);
            assert!(seg.is_finite(), "{seg:?}");
            assert!(bounds.contains(seg.start), "{seg:?} outside {bounds:?}");
            assert!(bounds.contains(seg.end.unwrap()), "{seg:?} outside {bounds:?}");
        }

        for (idx, p) in sweeper.sites() {
            let found = sweeper.locate_cell(p).unwrap();
            // Duplicates resolve to the first copy.
            assert!(found <= idx);
            assert_eq!(sweeper.site(found), Some(p));
        }
        Ok(())
    }
}
