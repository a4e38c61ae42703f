/// Below this distance the smoother lands on its target. Keeps held values
/// exact and avoids a denormal tail.
const SNAP_EPSILON: f64 = 1e-9;

/// One-pole exponential smoother driven by a variable tick length.
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    time_constant: f64, // seconds, <= 0 means instant
    value: f64,
}

impl Smoother {
    pub fn new(time_constant: f64) -> Self {
        Self {
            time_constant,
            value: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    pub fn set_time_constant(&mut self, seconds: f64) {
        self.time_constant = seconds;
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: f64) {
        self.value = value;
    }

    /// Fraction of the remaining distance covered in one tick of `dt` seconds.
    /// A tick that is not a positive length (NaN included) holds.
    #[inline]
    pub fn coefficient(&self, dt: f64) -> f64 {
        if dt.is_nan() || dt <= 0.0 {
            return 0.0;
        }
        if self.time_constant <= 0.0 || !self.time_constant.is_finite() {
            return 1.0;
        }
        1.0 - (-dt / self.time_constant).exp()
    }

    /// Advance toward `target` by one tick and return the new value.
    #[inline]
    pub fn tick(&mut self, target: f64, dt: f64) -> f64 {
        let delta = target - self.value;
        let coefficient = self.coefficient(dt);
        if delta.abs() < SNAP_EPSILON || coefficient >= 1.0 {
            self.value = target;
        } else {
            self.value += delta * coefficient;
        }
        self.value
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SMOOTHING_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_time_constant_covers_63_percent() {
        let mut s = Smoother::new(0.01);
        s.tick(1.0, 0.01);
        assert_relative_eq!(s.value(), 1.0 - (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_time_constant_is_instant() {
        let mut s = Smoother::new(0.0);
        assert_eq!(s.tick(0.7, 0.001), 0.7);
    }

    #[test]
    fn test_zero_dt_holds() {
        let mut s = Smoother::new(0.01);
        s.reset(0.25);
        assert_eq!(s.tick(1.0, 0.0), 0.25);
    }

    #[test]
    fn test_nan_dt_holds_and_recovers() {
        let mut s = Smoother::new(0.01);
        s.reset(0.25);
        assert_eq!(s.tick(1.0, f64::NAN), 0.25);
        for _ in 0..100 {
            s.tick(1.0, 0.001);
        }
        assert!(s.value().is_finite());
        assert!(s.value() > 0.25);

        let mut instant = Smoother::new(0.0);
        assert_eq!(instant.tick(1.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_snaps_when_close() {
        let mut s = Smoother::new(0.001);
        for _ in 0..1000 {
            s.tick(0.5, 0.001);
        }
        assert_eq!(s.value(), 0.5);
    }

    #[test]
    fn test_split_ticks_match_one_long_tick() {
        // Two ticks of dt/2 cover the same distance as one tick of dt
        let mut a = Smoother::new(0.005);
        let mut b = Smoother::new(0.005);
        a.tick(1.0, 0.002);
        b.tick(1.0, 0.001);
        b.tick(1.0, 0.001);
        assert_relative_eq!(a.value(), b.value(), epsilon = 1e-12);
    }
}
