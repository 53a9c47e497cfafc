//! Tunable parameters for the sweep.

/// Options controlling how a diagram is finished.
///
/// The defaults give a bounding box that extends a fifth of the sites' extent
/// (plus a little) past the outermost sites on every side.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// The margin added to the sites' bounding box, as a fraction of its
    /// extent along each axis.
    pub margin_ratio: f64,
    /// Added to the extent along each axis before applying `margin_ratio`,
    /// so that sites sharing a coordinate still get a non-empty box.
    pub margin_bias: f64,
    /// Whether to clip the output segments to the bounding box.
    ///
    /// Without clipping, unbounded edges end wherever the finishing pass
    /// left them, which is well outside the bounding box.
    pub clip_to_bounds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            margin_ratio: 0.2,
            margin_bias: 1.0,
            clip_to_bounds: true,
        }
    }
}

impl Config {
    /// Sets the margin ratio.
    pub fn with_margin_ratio(mut self, margin_ratio: f64) -> Self {
        self.margin_ratio = margin_ratio;
        self
    }

    /// Sets the margin bias.
    pub fn with_margin_bias(mut self, margin_bias: f64) -> Self {
        self.margin_bias = margin_bias;
        self
    }

    /// Turns clipping on or off.
    pub fn with_clip_to_bounds(mut self, clip_to_bounds: bool) -> Self {
        self.clip_to_bounds = clip_to_bounds;
        self
    }
}
