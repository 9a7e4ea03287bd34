//! Temperature sample points.

/// Ascending, evenly spaced temperatures in °C (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureGrid {
    start_c: i32,
    stop_c: i32,
    step_c: i32,
}

impl Default for TemperatureGrid {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemperatureGrid {
    pub const STANDARD_START_C: i32 = 20;
    pub const STANDARD_STOP_C: i32 = 660;
    pub const STANDARD_STEP_C: i32 = 20;

    /// 20 °C to 660 °C every 20 °C (33 points).
    pub const fn standard() -> Self {
        Self {
            start_c: Self::STANDARD_START_C,
            stop_c: Self::STANDARD_STOP_C,
            step_c: Self::STANDARD_STEP_C,
        }
    }

    pub fn len(&self) -> usize {
        ((self.stop_c - self.start_c) / self.step_c) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.len()).map(move |i| self.start_c + i as i32 * self.step_c)
    }

    pub fn points(&self) -> Vec<f64> {
        self.iter().map(f64::from).collect()
    }
}
