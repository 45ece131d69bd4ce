//! Core units, constants, and shared primitives for the micro-thruster simulator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Pascals per bar.
    pub const PA_PER_BAR: f64 = 100_000.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::PA_PER_BAR;

    /// Convert pascals to bar.
    #[inline]
    pub fn pa_to_bar(v: f64) -> f64 {
        v / PA_PER_BAR
    }

    /// Convert kg/s to mg/s, the natural scale for micro-thruster flow rates.
    #[inline]
    pub fn kg_s_to_mg_s(v: f64) -> f64 {
        v * 1.0e6
    }

    /// Convert newtons to millinewtons.
    #[inline]
    pub fn n_to_mn(v: f64) -> f64 {
        v * 1_000.0
    }
}

/// Small helpers over sampled series so callers avoid ad-hoc folds everywhere.
pub mod series {
    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Minimum and maximum of a slice, `None` for an empty slice.
    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        Some(
            values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Rectangle-rule integral of `values` sampled every `dt` seconds.
    pub fn integrate_uniform(values: &[f64], dt: f64) -> f64 {
        values.iter().sum::<f64>() * dt
    }

    /// Index and value of the first non-finite entry.
    pub fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
        values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }
}
