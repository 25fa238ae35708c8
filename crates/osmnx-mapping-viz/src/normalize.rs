use tracing::warn;

/// Range substituted when the observed values span zero width.
pub const DEFAULT_RANGE: (f64, f64) = (0.0, 1.0);

/// Linear map from `[vmin, vmax]` onto the colormap domain `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    vmin: f64,
    vmax: f64,
}

impl Normalize {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Builds the scale from an observed `(min, max)`.
    ///
    /// A constant attribute (`min == max`) or one with no values at all gets
    /// [`DEFAULT_RANGE`] so the colorbar keeps a nonzero extent.
    pub fn from_observed(observed: Option<(f64, f64)>) -> Self {
        match observed {
            Some((lo, hi)) if lo != hi => Self::new(lo, hi),
            Some((lo, _)) => {
                warn!(value = lo, "attribute is constant, using default range [0, 1]");
                Self::new(DEFAULT_RANGE.0, DEFAULT_RANGE.1)
            }
            None => {
                warn!("attribute has no values, using default range [0, 1]");
                Self::new(DEFAULT_RANGE.0, DEFAULT_RANGE.1)
            }
        }
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    pub fn range(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    /// Position of `value` in `[0, 1]`, clipped at both ends.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.0;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }
}

/// Smallest range covering both inputs.
pub fn union_range(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((alo, ahi)), Some((blo, bhi))) => Some((alo.min(blo), ahi.max(bhi))),
        (Some(r), None) | (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_range_is_kept() {
        assert_eq!(Normalize::from_observed(Some((2.0, 8.0))).range(), (2.0, 8.0));
    }

    #[test]
    fn constant_range_becomes_unit_interval() {
        assert_eq!(Normalize::from_observed(Some((42.0, 42.0))).range(), (0.0, 1.0));
        assert_eq!(Normalize::from_observed(None).range(), (0.0, 1.0));
    }

    #[test]
    fn normalize_scales_and_clips() {
        let norm = Normalize::new(10.0, 20.0);
        assert_eq!(norm.normalize(15.0), 0.5);
        assert_eq!(norm.normalize(5.0), 0.0);
        assert_eq!(norm.normalize(25.0), 1.0);
    }

    #[test]
    fn union_covers_both() {
        assert_eq!(
            union_range(Some((1.0, 3.0)), Some((-2.0, 2.0))),
            Some((-2.0, 3.0))
        );
        assert_eq!(union_range(None, Some((1.0, 2.0))), Some((1.0, 2.0)));
        assert_eq!(union_range(None, None), None);
    }
}
