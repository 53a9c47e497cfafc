use thiserror::Error;

/// The input sites were faulty, or the diagram was used out of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// At least one of the inputs was infinite.
    #[error("one of the inputs was infinite")]
    Infinity,
    /// At least one of the inputs was not a number.
    #[error("one of the inputs had a NaN")]
    NaN,
    /// The diagram has already been computed, so it can't accept new sites
    /// or be computed again until it is reset.
    #[error("the diagram was already computed")]
    AlreadyComputed,
}

impl Error {
    /// Checks that both coordinates of a site are usable.
    pub(crate) fn check_finite(x: f64, y: f64) -> Result<(), Error> {
        if x.is_nan() || y.is_nan() {
            Err(Error::NaN)
        } else if x.is_infinite() || y.is_infinite() {
            Err(Error::Infinity)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn nan_wins_over_infinity() {
        assert_matches!(Error::check_finite(f64::NAN, f64::INFINITY), Err(Error::NaN));
        assert_matches!(Error::check_finite(0.0, -f64::INFINITY), Err(Error::Infinity));
        assert_matches!(Error::check_finite(0.0, 1e300), Ok(()));
    }

    #[test]
    fn messages() {
        assert_eq!(Error::NaN.to_string(), "one of the inputs had a NaN");
        assert_eq!(
            Error::AlreadyComputed.to_string(),
            "the diagram was already computed"
        );
    }
}
