// Per-speaker buffering of compressed audio frames.
//
// Frames arrive from independent, parallel speaker streams, so the store is
// sharded by speaker: appends for unrelated speakers never contend on the
// same lock. A drain swaps each speaker's buffer for an empty one, so a
// frame arriving mid-drain lands in the new buffer rather than being lost
// or duplicated.

use dashmap::DashMap;
use std::collections::HashMap;
use tracing::debug;

/// One compressed audio packet from a single speaker.
///
/// Immutable once appended; owned by its speaker's bucket until drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    /// Stable identifier of the speaker's stream
    pub speaker_id: u64,
    /// Opaque compressed (Opus) payload
    pub payload: Vec<u8>,
    /// Capture instant in milliseconds since the session started
    pub capture_offset_ms: u64,
}

/// Thread-safe, append-only frame buffer partitioned by speaker.
#[derive(Debug, Default)]
pub struct PacketStore {
    buckets: DashMap<u64, Vec<AudioFrame>>,
}

impl PacketStore {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Pre-create a bucket for a newly arrived speaker.
    pub fn register(&self, speaker_id: u64) {
        self.buckets.entry(speaker_id).or_default();
    }

    /// Append a frame to its speaker's bucket.
    ///
    /// Never fails: a frame with an empty payload is dropped and logged.
    /// Holds only the speaker's shard lock for the duration of a push.
    pub fn append(&self, frame: AudioFrame) {
        if frame.payload.is_empty() {
            debug!(
                speaker = frame.speaker_id,
                at_ms = frame.capture_offset_ms,
                "dropping frame with empty payload"
            );
            return;
        }
        self.buckets.entry(frame.speaker_id).or_default().push(frame);
    }

    /// Atomically swap every speaker's buffer for an empty one and return
    /// the prior contents. Buckets that held no frames are omitted.
    pub fn drain_all(&self) -> HashMap<u64, Vec<AudioFrame>> {
        let mut drained = HashMap::new();
        for mut entry in self.buckets.iter_mut() {
            let frames = std::mem::take(entry.value_mut());
            if !frames.is_empty() {
                drained.insert(*entry.key(), frames);
            }
        }
        drained
    }

    /// Total buffered frames across all speakers.
    pub fn count(&self) -> usize {
        self.buckets.iter().map(|entry| entry.value().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(speaker_id: u64, at_ms: u64) -> AudioFrame {
        AudioFrame {
            speaker_id,
            payload: vec![0xFC, 0xFF, 0xFE],
            capture_offset_ms: at_ms,
        }
    }

    #[test]
    fn append_preserves_per_speaker_order() {
        let store = PacketStore::new();
        store.append(frame(1, 0));
        store.append(frame(2, 10));
        store.append(frame(1, 20));

        let drained = store.drain_all();
        let ones = &drained[&1];
        assert_eq!(ones.len(), 2);
        assert_eq!(ones[0].capture_offset_ms, 0);
        assert_eq!(ones[1].capture_offset_ms, 20);
        assert_eq!(drained[&2].len(), 1);
    }

    #[test]
    fn empty_payload_is_dropped() {
        let store = PacketStore::new();
        store.append(AudioFrame {
            speaker_id: 1,
            payload: Vec::new(),
            capture_offset_ms: 0,
        });
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn registered_empty_bucket_is_not_drained() {
        let store = PacketStore::new();
        store.register(7);
        assert_eq!(store.count(), 0);
        assert!(store.drain_all().is_empty());
    }
}
