#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Shaping Curves
==============

A curve bends the source signal before it is scaled by the route amount.
The same LFO feels very different on a cutoff depending on the curve:

    linear        exponential     logarithmic
    1 ┤    ╱      1 ┤      │      1 ┤  ╭───
      │   ╱         │     ╱         │ ╱
      │  ╱          │   ╱╯          │╱
    0 ┼─╱         0 ┼──╯          0 ┼
      0   1         0   1           0   1

  linear       x' = x
  exponential  x' = x²             slow start, fast finish
  logarithmic  x' = log10(9x + 1)  fast start, slow finish, x clamped to [0, 1]
  custom       breakpoint table    identity until a table is supplied

On a bipolar route exponential squares |x| and puts the sign back, so a
bipolar LFO swings evenly both ways. On a unipolar route it is a plain
square and a negative input folds up into the positive half. Logarithmic
has no sensible negative half, so its input is clamped to [0, 1] first.
*/

/// Number of breakpoints in a [`CustomCurve`].
pub const CUSTOM_CURVE_POINTS: usize = 17;

/// Shaping applied to a route's scaled source value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    #[default]
    Linear,
    Exponential,
    Logarithmic,
    Custom,
}

impl Curve {
    pub const ALL: [Curve; 4] = [
        Curve::Linear,
        Curve::Exponential,
        Curve::Logarithmic,
        Curve::Custom,
    ];

    /// Shape `x`. `bipolar` only matters for [`Curve::Exponential`] and
    /// `custom` is only consulted for [`Curve::Custom`].
    #[inline]
    pub fn shape(self, x: f64, bipolar: bool, custom: Option<&CustomCurve>) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::Exponential if bipolar => x * x.abs(),
            Curve::Exponential => x * x,
            Curve::Logarithmic => (x.clamp(0.0, 1.0) * 9.0 + 1.0).log10(),
            Curve::Custom => custom.map_or(x, |table| table.shape(x)),
        }
    }

    /// The next curve in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Curve::Linear => Curve::Exponential,
            Curve::Exponential => Curve::Logarithmic,
            Curve::Logarithmic => Curve::Custom,
            Curve::Custom => Curve::Linear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::Exponential => "exp",
            Curve::Logarithmic => "log",
            Curve::Custom => "custom",
        }
    }
}

/// User-drawn curve: evenly spaced breakpoints over |x| in [0, 1],
/// interpolated linearly. Negative inputs mirror through the origin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomCurve {
    points: [f64; CUSTOM_CURVE_POINTS],
}

impl CustomCurve {
    pub fn identity() -> Self {
        Self::from_fn(|x| x)
    }

    pub fn from_points(points: [f64; CUSTOM_CURVE_POINTS]) -> Self {
        Self { points }
    }

    /// Sample `f` at each breakpoint.
    pub fn from_fn(f: impl Fn(f64) -> f64) -> Self {
        let last = (CUSTOM_CURVE_POINTS - 1) as f64;
        let mut points = [0.0; CUSTOM_CURVE_POINTS];
        for (i, p) in points.iter_mut().enumerate() {
            *p = f(i as f64 / last);
        }
        Self { points }
    }

    pub fn points(&self) -> &[f64; CUSTOM_CURVE_POINTS] {
        &self.points
    }

    #[inline]
    pub fn shape(&self, x: f64) -> f64 {
        let magnitude = x.abs().min(1.0);
        let pos = magnitude * (CUSTOM_CURVE_POINTS - 1) as f64;
        let i = (pos as usize).min(CUSTOM_CURVE_POINTS - 2);
        let frac = pos - i as f64;

        let y = self.points[i] + (self.points[i + 1] - self.points[i]) * frac;
        if x < 0.0 {
            -y
        } else {
            y
        }
    }
}

impl Default for CustomCurve {
    fn default() -> Self {
        Self::identity()
    }
}
