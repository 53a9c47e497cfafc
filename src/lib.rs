#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod beachline;
pub mod bounds;
mod config;
mod error;
pub mod geom;
mod num;
mod queue;
mod segments;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

pub use bounds::BoundingBox;
pub use config::Config;
pub use error::Error;
pub use geom::{Point, SiteIdx};
pub use segments::Segment;
pub use sweep::Sweeper;

/// Computes the Voronoi diagram of a collection of sites.
///
/// The sites are numbered in the order they're given, starting from zero.
pub fn compute_diagram<P: Into<Point>>(
    sites: impl IntoIterator<Item = P>,
) -> Result<Sweeper, Error> {
    compute_diagram_with(Config::default(), sites)
}

/// Computes the Voronoi diagram of a collection of sites, with a custom
/// configuration.
pub fn compute_diagram_with<P: Into<Point>>(
    config: Config,
    sites: impl IntoIterator<Item = P>,
) -> Result<Sweeper, Error> {
    let mut sweeper = Sweeper::with_config(config);
    sweeper.add_sites(sites)?;
    sweeper.compute()?;
    Ok(sweeper)
}
