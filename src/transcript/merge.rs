// Chronology merging of independently transcribed per-speaker texts.
//
// Policy: group by first appearance. Speakers are ordered by the start of
// their first closed speaking segment and each speaker's full text is
// emitted once, labeled with that first-appearance timestamp. The alternate
// policy of interleaving consecutive speaking-segment runs was considered
// and rejected; see DESIGN.md.

use std::collections::HashMap;

use crate::capture::SpeakingSegment;
use crate::transcript::line::format_timestamp;

fn label_for(labels: &HashMap<u64, String>, speaker_id: u64) -> String {
    labels
        .get(&speaker_id)
        .cloned()
        .unwrap_or_else(|| format!("speaker-{speaker_id}"))
}

/// Merge per-speaker transcription output into one ordered text.
///
/// Speakers with empty or whitespace-only text are omitted. With no
/// segments available at all, falls back to an unordered (id-sorted)
/// listing without timestamps.
pub fn merge_chronological(
    texts: &HashMap<u64, String>,
    segments: &[SpeakingSegment],
    labels: &HashMap<u64, String>,
) -> String {
    // First closed segment per speaker; `segments` is in close order.
    let mut first_start: HashMap<u64, u64> = HashMap::new();
    for segment in segments {
        first_start
            .entry(segment.speaker_id)
            .or_insert(segment.start_ms);
    }

    if segments.is_empty() {
        let mut ids: Vec<u64> = texts.keys().copied().collect();
        ids.sort_unstable();
        return ids
            .into_iter()
            .filter_map(|id| {
                let text = texts[&id].trim();
                (!text.is_empty()).then(|| format!("{} - {}\n", label_for(labels, id), text))
            })
            .collect();
    }

    // Speakers with text but no closed segment come last, id-ordered.
    let mut ordered: Vec<(u64, Option<u64>)> = texts
        .keys()
        .map(|&id| (id, first_start.get(&id).copied()))
        .collect();
    ordered.sort_by_key(|&(id, start)| (start.is_none(), start, id));

    let mut out = String::new();
    for (id, start_ms) in ordered {
        let text = texts[&id].trim();
        if text.is_empty() {
            continue;
        }
        match start_ms {
            Some(start_ms) => out.push_str(&format!(
                "[{}] {} - {}\n",
                format_timestamp(start_ms / 1000),
                label_for(labels, id),
                text
            )),
            None => out.push_str(&format!("{} - {}\n", label_for(labels, id), text)),
        }
    }
    out
}
