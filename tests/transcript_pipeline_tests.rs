// Integration test for the transcript half of the pipeline: per-speaker
// texts -> chronology merge -> line parsing -> scene assignment -> bounded
// chunks, as the generation engine would receive them.

use std::collections::HashMap;

use session_scribe::{
    assign, boundaries_from_width, build_chunks, merge_chronological, parse_transcript,
    ChunkPolicy, SpeakingSegment,
};

fn segment(speaker_id: u64, start_ms: u64, end_ms: u64) -> SpeakingSegment {
    SpeakingSegment {
        speaker_id,
        start_ms,
        end_ms,
    }
}

#[test]
fn merged_text_flows_through_scenes_and_chunks() {
    let texts = HashMap::from([
        (1, "we should open the gate".to_string()),
        (2, "agreed, but quietly".to_string()),
        (3, "I will keep watch".to_string()),
    ]);
    let labels = HashMap::from([
        (1, "mira".to_string()),
        (2, "tobin".to_string()),
        (3, "hale".to_string()),
    ]);
    // First-closed-segment starts: speaker2 at 3s, speaker1 at 12s, speaker3 at 40s.
    let segments = vec![
        segment(2, 3_000, 9_000),
        segment(1, 12_000, 20_000),
        segment(3, 40_000, 45_000),
    ];

    let merged = merge_chronological(&texts, &segments, &labels);
    assert_eq!(
        merged,
        "[0:03] tobin - agreed, but quietly\n\
         [0:12] mira - we should open the gate\n\
         [0:40] hale - I will keep watch\n"
    );

    // The merged skeleton parses back into ordered lines.
    let lines = parse_transcript(&merged);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].speaker, "tobin");
    assert_eq!(lines[2].start_sec, 40);

    // 30-second scenes: the first two lines share scene 0, the last is in
    // scene 1.
    let boundaries = boundaries_from_width(45.0, 30.0);
    let scenes = assign(&lines, &boundaries);
    assert_eq!(scenes[&0].len(), 2);
    assert_eq!(scenes[&1].len(), 1);
    assert_eq!(scenes[&1][0].speaker, "hale");

    // Chunking scene 0 under a tight limit keeps whole lines.
    let rendered: Vec<String> = scenes[&0].iter().map(|l| l.render()).collect();
    let policy = ChunkPolicy {
        max_chunk_chars: 40,
        min_line_chars: 3,
        skip_terms: Vec::new(),
    };
    let chunks = build_chunks(&rendered, &policy);
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].starts_with("[0:03] tobin"));
    assert!(chunks[1].starts_with("[0:12] mira"));
}

#[test]
fn noise_lines_are_dropped_before_chunking() {
    let rendered = vec![
        "[0:01] mira - [BLANK_AUDIO]".to_string(),
        "[0:05] tobin - a real utterance".to_string(),
        "hopelessly malformed".to_string(),
    ];

    // Malformed lines fall out at parse time, noise markers at chunk time.
    let merged = rendered.join("\n");
    let lines = parse_transcript(&merged);
    assert_eq!(lines.len(), 2);

    let back: Vec<String> = lines.iter().map(|l| l.render()).collect();
    let chunks = build_chunks(&back, &ChunkPolicy::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], "[0:05] tobin - a real utterance");
}
