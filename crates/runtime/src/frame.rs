/// Deterministic frame metadata.
///
/// Frames slice virtual time into fixed steps. The scheduler is advanced to
/// the start of each frame, so frame 0 never fires anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed frame length (milliseconds).
    pub dt_ms: u64,
    /// Virtual time at the start of the frame (milliseconds).
    pub time_ms: u64,
}

impl Frame {
    pub fn new(index: u64, dt_ms: u64) -> Self {
        Self {
            index,
            dt_ms,
            time_ms: index.saturating_mul(dt_ms),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 250);
        let b = Frame::new(10, 250);
        assert_eq!(a, b);
        assert_eq!(a.time_ms, 2_500);
    }

    #[test]
    fn next_advances_index_and_time() {
        let f1 = Frame::new(0, 500).next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time_ms, 500);
    }
}
