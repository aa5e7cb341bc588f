//! Sliding-window smoothing for the current reading.

/// O(1) moving average over the last `N` samples.
///
/// Backed by a fixed array, a write cursor and a running sum, so no
/// resummation happens per update. Slots start at zero, so the average ramps
/// up over the first `N` samples.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    values: [f32; N],
    index: usize,
    sum: f32,
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MovingAverage<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "moving average window must not be empty") };

        Self {
            values: [0.0; N],
            index: 0,
            sum: 0.0,
        }
    }

    /// Push a sample and return the new average.
    pub fn update(&mut self, sample: f32) -> f32 {
        // Swap the oldest value out of the sum instead of re-adding the window.
        self.sum -= self.values[self.index];
        self.values[self.index] = sample;
        self.sum += sample;

        self.index = (self.index + 1) % N;

        self.average()
    }

    /// Average of the window, counting not-yet-filled slots as zero.
    pub fn average(&self) -> f32 {
        self.sum / N as f32
    }
}
