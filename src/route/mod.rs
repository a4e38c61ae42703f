//! A single source → destination connection.

/// Shaping curves.
pub mod curve;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{destination::DestinationId, source::SourceId};

pub use curve::{Curve, CustomCurve, CUSTOM_CURVE_POINTS};

/// Handle to a route in a routing table. Never reused within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Settings for a new route.
///
/// Defaults: amount 0.5, linear, unipolar, multiplier 1.0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteParams {
    pub amount: f64,
    pub curve: Curve,
    pub bipolar: bool,
    pub source_multiplier: f64,
}

impl RouteParams {
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn bipolar(mut self, bipolar: bool) -> Self {
        self.bipolar = bipolar;
        self
    }

    pub fn source_multiplier(mut self, multiplier: f64) -> Self {
        self.source_multiplier = multiplier;
        self
    }
}

impl Default for RouteParams {
    fn default() -> Self {
        Self {
            amount: 0.5,
            curve: Curve::Linear,
            bipolar: false,
            source_multiplier: 1.0,
        }
    }
}

/// One edge of the matrix. Refers to its source and destination by id and
/// owns neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationRoute {
    pub id: RouteId,
    pub source: SourceId,
    pub destination: DestinationId,
    pub amount: f64,            // [-1, 1], clamped on write
    pub source_multiplier: f64, // applied before the curve
    pub curve: Curve,
    pub custom_curve: Option<CustomCurve>,
    pub bipolar: bool,
    pub enabled: bool,
}

impl ModulationRoute {
    pub fn new(id: RouteId, source: SourceId, destination: DestinationId, params: RouteParams) -> Self {
        Self {
            id,
            source,
            destination,
            amount: clamp_amount(params.amount),
            source_multiplier: sanitize_multiplier(params.source_multiplier),
            curve: params.curve,
            custom_curve: None,
            bipolar: params.bipolar,
            enabled: true,
        }
    }

    /// This route's contribution for a given smoothed source value.
    ///
    /// multiplier → curve → unipolar clamp → amount. Disabled routes
    /// contribute nothing.
    #[inline]
    pub fn evaluate(&self, source_value: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }

        let scaled = source_value * self.source_multiplier;
        let mut shaped = self.curve.shape(scaled, self.bipolar, self.custom_curve.as_ref());
        if !self.bipolar {
            shaped = shaped.max(0.0);
        }
        shaped * self.amount
    }

    /// Same as [`evaluate`](Self::evaluate).
    #[inline]
    pub fn contribution(&self, source_value: f64) -> f64 {
        self.evaluate(source_value)
    }

    pub fn params(&self) -> RouteParams {
        RouteParams {
            amount: self.amount,
            curve: self.curve,
            bipolar: self.bipolar,
            source_multiplier: self.source_multiplier,
        }
    }
}

/// Amounts are clamped, never rejected. NaN becomes 0.
#[inline]
pub(crate) fn clamp_amount(amount: f64) -> f64 {
    if amount.is_nan() {
        0.0
    } else {
        amount.clamp(-1.0, 1.0)
    }
}

/// A non-finite multiplier falls back to 1 so the route passes its source
/// through unscaled.
#[inline]
pub(crate) fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() {
        multiplier
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn route(params: RouteParams) -> ModulationRoute {
        ModulationRoute::new(RouteId(1), SourceId(0), DestinationId(0), params)
    }

    #[test]
    fn test_exponential_scenario() {
        let r = route(RouteParams::default().curve(Curve::Exponential));
        assert_relative_eq!(r.evaluate(0.8), 0.32, epsilon = 1e-12);
    }

    #[test]
    fn test_unipolar_clamps_negative() {
        let r = route(RouteParams::default().amount(1.0));
        assert_eq!(r.evaluate(-0.6), 0.0);

        let bipolar = route(RouteParams::default().amount(1.0).bipolar(true));
        assert_relative_eq!(bipolar.evaluate(-0.6), -0.6);
    }

    #[test]
    fn test_unipolar_exponential_squares_negative_input() {
        let r = route(RouteParams::default().amount(1.0).curve(Curve::Exponential));
        assert_relative_eq!(r.evaluate(-0.5), 0.25, epsilon = 1e-12);

        let bipolar = route(RouteParams::default().amount(1.0).curve(Curve::Exponential).bipolar(true));
        assert_relative_eq!(bipolar.evaluate(-0.5), -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_amount_inverts_after_clamp() {
        // Unipolar clamp happens before the amount, so inversion still works
        let r = route(RouteParams::default().amount(-0.5));
        assert_relative_eq!(r.evaluate(0.4), -0.2);
    }

    #[test]
    fn test_disabled_contributes_nothing() {
        let mut r = route(RouteParams::default().amount(1.0));
        r.enabled = false;
        assert_eq!(r.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_multiplier_applies_before_curve() {
        let r = route(
            RouteParams::default()
                .amount(1.0)
                .curve(Curve::Exponential)
                .source_multiplier(0.5),
        );
        // (0.8 * 0.5)^2 = 0.16, not 0.8^2 * 0.5 = 0.32
        assert_relative_eq!(r.evaluate(0.8), 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_amount_clamped_on_construction() {
        assert_eq!(route(RouteParams::default().amount(3.0)).amount, 1.0);
        assert_eq!(route(RouteParams::default().amount(-3.0)).amount, -1.0);
        assert_eq!(route(RouteParams::default().amount(f64::NAN)).amount, 0.0);
    }

    #[test]
    fn test_non_finite_multiplier_falls_back_to_one() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let r = route(RouteParams::default().amount(1.0).source_multiplier(bad));
            assert_eq!(r.source_multiplier, 1.0);
            assert_relative_eq!(r.evaluate(0.4), 0.4);
        }
    }

    #[test]
    fn test_custom_curve_route() {
        let mut r = route(RouteParams::default().amount(1.0).curve(Curve::Custom));
        assert_relative_eq!(r.evaluate(0.3), 0.3);
        r.custom_curve = Some(CustomCurve::from_fn(|_| 0.75));
        assert_relative_eq!(r.evaluate(0.3), 0.75);
    }
}
