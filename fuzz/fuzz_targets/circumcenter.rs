#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

use beachline::{
    arbitrary::{another_site, site},
    geom::{circumcenter, orientation},
};

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(a) = site(&mut u) else { return };
    let Ok(b) = another_site(a, &mut u) else { return };
    let Ok(c) = another_site(b, &mut u) else { return };

    let Some(circle) = circumcenter(a, b, c) else {
        return;
    };
    assert!(orientation(a, b, c) <= 0.0);
    assert!(circle.center.is_finite());
    assert!(circle.event_x.is_finite());

    // The sweep line can't reach the far side of the circle before it
    // reaches a point on it.
    let r = circle.center.distance(&a);
    let threshold = 1e-9 * (1.0 + r);
    assert!(circle.event_x >= a.x - threshold);
});
