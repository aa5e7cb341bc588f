/// Highest value observed since boot. There is no decay and no reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakTracker {
    peak: Option<f32>,
}

impl PeakTracker {
    pub const fn new() -> Self {
        Self { peak: None }
    }

    /// Record `value` and return the peak so far.
    ///
    /// The stored peak only changes when `value` is strictly greater.
    pub fn observe(&mut self, value: f32) -> f32 {
        match self.peak {
            Some(peak) if value <= peak => peak,
            _ => {
                self.peak = Some(value);
                value
            }
        }
    }

    /// Peak so far, or `None` before the first observation.
    pub fn peak(&self) -> Option<f32> {
        self.peak
    }
}
