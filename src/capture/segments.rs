use std::collections::HashMap;

/// A closed speaking interval for one speaker.
///
/// `end_ms` is fixed when the speaker's stream closes and never altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakingSegment {
    pub speaker_id: u64,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Per-speaker Idle -> Speaking -> Idle state machine.
///
/// Closed segments are kept in the order they were closed; downstream
/// chronology merging relies on that order.
#[derive(Debug, Default)]
pub struct SegmentTracker {
    /// speaker -> start instant of the currently open segment
    open: HashMap<u64, u64>,
    closed: Vec<SpeakingSegment>,
}

impl SegmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a segment for `speaker_id`. Duplicate start notifications while
    /// already speaking are no-ops.
    pub fn mark_start(&mut self, speaker_id: u64, at_ms: u64) {
        self.open.entry(speaker_id).or_insert(at_ms);
    }

    /// Close the open segment for `speaker_id`. No-op when none is open.
    pub fn mark_end(&mut self, speaker_id: u64, at_ms: u64) {
        if let Some(start_ms) = self.open.remove(&speaker_id) {
            self.closed.push(SpeakingSegment {
                speaker_id,
                start_ms,
                end_ms: at_ms,
            });
        }
    }

    /// Closed segments in close order.
    pub fn segments(&self) -> &[SpeakingSegment] {
        &self.closed
    }

    /// Discard all open and closed state. Open segments do not need to be
    /// closed first; used after checkpoint drains.
    pub fn clear(&mut self) {
        self.open.clear();
        self.closed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_start_keeps_original_instant() {
        let mut tracker = SegmentTracker::new();
        tracker.mark_start(1, 100);
        tracker.mark_start(1, 500);
        tracker.mark_end(1, 900);

        assert_eq!(
            tracker.segments(),
            &[SpeakingSegment {
                speaker_id: 1,
                start_ms: 100,
                end_ms: 900
            }]
        );
    }

    #[test]
    fn end_without_open_segment_is_noop() {
        let mut tracker = SegmentTracker::new();
        tracker.mark_end(1, 100);
        assert!(tracker.segments().is_empty());
    }

    #[test]
    fn segments_are_returned_in_close_order() {
        let mut tracker = SegmentTracker::new();
        tracker.mark_start(1, 0);
        tracker.mark_start(2, 10);
        tracker.mark_end(2, 20);
        tracker.mark_end(1, 30);

        let speakers: Vec<u64> = tracker.segments().iter().map(|s| s.speaker_id).collect();
        assert_eq!(speakers, vec![2, 1]);
    }

    #[test]
    fn clear_discards_open_segments() {
        let mut tracker = SegmentTracker::new();
        tracker.mark_start(1, 0);
        tracker.clear();
        tracker.mark_end(1, 100);
        assert!(tracker.segments().is_empty());
    }
}
