use assert_matches::assert_matches;

use beachline::{compute_diagram, Error, Point, Segment, SiteIdx, Sweeper};

fn approx_eq(p: Point, q: Point) -> bool {
    p.distance(&q) < 1e-6
}

fn sorted_pairs(segs: &[Segment]) -> Vec<(usize, usize)> {
    let mut ret: Vec<_> = segs
        .iter()
        .map(|s| {
            let [a, b] = s.sites;
            (a.0.min(b.0), a.0.max(b.0))
        })
        .collect();
    ret.sort();
    ret
}

#[test]
fn five_sites() {
    let sites = [
        (100.0, 200.0),
        (300.0, 400.0),
        (200.0, 100.0),
        (400.0, 300.0),
        (250.0, 250.0),
    ];
    let diagram = compute_diagram(sites).unwrap();
    let segs = diagram.segments();
    assert!(!segs.is_empty());
    assert!(segs.iter().all(|s| s.finalized));

    // Every site gets a cell.
    for i in 0..sites.len() {
        assert!(diagram.cell_segments(SiteIdx(i)).next().is_some());
    }
    assert_eq!(diagram.locate_cell((250.0, 250.0)), Some(SiteIdx(4)));

    // The middle cell is a closed diamond.
    let vertices = [
        Point::new(187.5, 187.5),
        Point::new(125.0, 375.0),
        Point::new(375.0, 125.0),
        Point::new(312.5, 312.5),
    ];
    let middle: Vec<_> = diagram.cell_segments(SiteIdx(4)).collect();
    assert_eq!(middle.len(), 4);
    for seg in middle {
        let end = seg.end.unwrap();
        assert!(vertices.iter().any(|&v| approx_eq(v, seg.start)));
        assert!(vertices.iter().any(|&v| approx_eq(v, end)));
    }

    assert_eq!(
        sorted_pairs(segs),
        vec![
            (0, 1),
            (0, 2),
            (0, 4),
            (1, 3),
            (1, 4),
            (2, 3),
            (2, 4),
            (3, 4)
        ]
    );
}

#[test]
fn single_site() {
    let diagram = compute_diagram([(3.0, 4.0)]).unwrap();
    assert!(diagram.segments().is_empty());
    assert_eq!(diagram.locate_cell((-100.0, 20.0)), Some(SiteIdx(0)));
    assert_eq!(diagram.locate_cell((3.0, 4.0)), Some(SiteIdx(0)));
}

#[test]
fn colinear() {
    let diagram = compute_diagram([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
    let segs = diagram.segments();
    assert_eq!(segs.len(), 2);

    let mut xs: Vec<f64> = segs
        .iter()
        .map(|s| (s.start.x + s.end.unwrap().x) / 2.0)
        .collect();
    xs.sort_by(f64::total_cmp);
    assert!((xs[0] - 0.5).abs() < 1e-9);
    assert!((xs[1] - 1.5).abs() < 1e-9);
}

#[test]
fn bisector_is_perpendicular() {
    let diagram = compute_diagram([(0.0, 0.0), (4.0, 2.0)]).unwrap();
    let seg = diagram.segments()[0];
    let line = seg.to_kurbo().unwrap();
    let dir = line.p1 - line.p0;
    assert!(dir.dot(kurbo::Vec2::new(4.0, 2.0)).abs() < 1e-6 * dir.hypot());

    let mid = seg.start.midpoint(&seg.end.unwrap());
    let d0 = mid.distance(&Point::new(0.0, 0.0));
    let d1 = mid.distance(&Point::new(4.0, 2.0));
    assert!((d0 - d1).abs() < 1e-9);
}

#[test]
fn errors() {
    let mut sweeper = Sweeper::new();
    assert_matches!(sweeper.add_site((f64::NAN, 0.0)), Err(Error::NaN));
    assert_matches!(sweeper.add_site((0.0, f64::NEG_INFINITY)), Err(Error::Infinity));
    assert_eq!(sweeper.site_count(), 0);

    assert_matches!(sweeper.add_site((0.0, 0.0)), Ok(SiteIdx(0)));
    assert_matches!(sweeper.add_site(kurbo::Point::new(1.0, 1.0)), Ok(SiteIdx(1)));
    sweeper.compute().unwrap();
    assert_matches!(sweeper.compute(), Err(Error::AlreadyComputed));
    assert_matches!(sweeper.add_sites([(5.0, 5.0)]), Err(Error::AlreadyComputed));
}

#[test]
fn cells_of_a_grid() {
    // Jittered, so that no four sites are exactly co-circular.
    let mut sites = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            let jitter = ((i * 7 + j * 13) % 5) as f64 * 0.01;
            sites.push(Point::new(i as f64 + jitter, j as f64 - jitter));
        }
    }
    let diagram = compute_diagram(sites.iter().copied()).unwrap();
    let n = sites.len();
    assert!(diagram.segments().len() <= 3 * n - 6);

    // Every site owns its own position, and every interior site has at least
    // three neighbors.
    for (i, &p) in sites.iter().enumerate() {
        assert_eq!(diagram.locate_cell(p), Some(SiteIdx(i)));
        assert!(diagram.cell_segments(SiteIdx(i)).count() >= 2);
    }
    let interior = SiteIdx(2 * 6 + 3);
    assert!(diagram.cell_segments(interior).count() >= 3);
}

#[test]
fn arbitrary_sites() {
    arbtest::arbtest(|u| {
        let n: usize = u.int_in_range(1..=30)?;
        let mut sites = Vec::with_capacity(n);
        for _ in 0..n {
            let x: i16 = u.arbitrary()?;
            let y: i16 = u.arbitrary()?;
            sites.push((f64::from(x), f64::from(y)));
        }

        let diagram = compute_diagram(sites.iter().copied()).unwrap();
        let bounds = diagram.bounds().unwrap();
        for seg in diagram.segments() {
            assert!(seg.finalized);
            assert!(bounds.contains(seg.start));
            assert!(bounds.contains(seg.end.unwrap()));
        }
        for &p in &sites {
            let found = diagram.locate_cell(p).unwrap();
            assert_eq!(diagram.site(found), Some(Point::from(p)));
        }
        Ok(())
    });
}
