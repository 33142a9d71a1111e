// Scene boundaries: fixed time windows used to group transcript lines for
// bounded-size downstream processing.

use std::collections::BTreeMap;

use crate::transcript::line::TranscriptLine;

/// Half-open window `[start_sec, end_sec)`. Boundaries are contiguous and
/// non-overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBoundary {
    pub index: usize,
    pub start_sec: f64,
    pub end_sec: f64,
}

/// Contiguous fixed-width windows covering `[0, total_duration_sec]`. The
/// final window may extend past the total duration.
pub fn boundaries_from_width(total_duration_sec: f64, width_sec: f64) -> Vec<SceneBoundary> {
    if width_sec <= 0.0 || total_duration_sec <= 0.0 {
        return Vec::new();
    }

    let mut boundaries = Vec::new();
    let mut start = 0.0;
    while start < total_duration_sec {
        boundaries.push(SceneBoundary {
            index: boundaries.len(),
            start_sec: start,
            end_sec: start + width_sec,
        });
        start += width_sec;
    }
    boundaries
}

/// Windows `[0, e1), [e1, e2), ...` from externally supplied cut points.
/// Cut points that do not advance past the previous end are skipped.
pub fn boundaries_from_cut_points(end_times_sec: &[f64]) -> Vec<SceneBoundary> {
    let mut boundaries = Vec::new();
    let mut start = 0.0;
    for &end in end_times_sec {
        if end <= start {
            continue;
        }
        boundaries.push(SceneBoundary {
            index: boundaries.len(),
            start_sec: start,
            end_sec: end,
        });
        start = end;
    }
    boundaries
}

/// Assign each line to the scene whose window contains its start time.
///
/// A time exactly equal to a window's end belongs to the next scene, never
/// the current one. Lines outside every window are dropped.
pub fn assign(
    lines: &[TranscriptLine],
    boundaries: &[SceneBoundary],
) -> BTreeMap<usize, Vec<TranscriptLine>> {
    let mut scenes: BTreeMap<usize, Vec<TranscriptLine>> = BTreeMap::new();
    for line in lines {
        let t = line.start_sec as f64;
        if let Some(boundary) = boundaries
            .iter()
            .find(|b| b.start_sec <= t && t < b.end_sec)
        {
            scenes.entry(boundary.index).or_default().push(line.clone());
        }
    }
    scenes
}
