// Canonical transcript line format: `[M:SS] label - text` (hours shown as
// `H:MM:SS` from one hour on). This is the boundary format shared with the
// transcription and generation engines; this crate never originates line
// text, only parses and re-renders it.

/// One utterance parsed from a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Start of the utterance in whole seconds from session start
    pub start_sec: u64,
    pub speaker: String,
    pub text: String,
}

impl TranscriptLine {
    /// Parse one line; `None` for anything malformed. Callers drop such
    /// lines individually rather than aborting a whole transcript.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('[')?;
        let (stamp, rest) = rest.split_once(']')?;
        let start_sec = parse_timestamp(stamp.trim())?;
        let (speaker, text) = rest.trim_start().split_once(" - ")?;
        let speaker = speaker.trim();
        if speaker.is_empty() {
            return None;
        }
        Some(Self {
            start_sec,
            speaker: speaker.to_string(),
            text: text.trim().to_string(),
        })
    }

    pub fn render(&self) -> String {
        format!(
            "[{}] {} - {}",
            format_timestamp(self.start_sec),
            self.speaker,
            self.text
        )
    }
}

/// Parse a whole transcript, dropping malformed lines.
pub fn parse_transcript(text: &str) -> Vec<TranscriptLine> {
    text.lines().filter_map(TranscriptLine::parse).collect()
}

/// Render seconds as `M:SS`, or `H:MM:SS` from one hour on.
pub fn format_timestamp(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

fn parse_timestamp(stamp: &str) -> Option<u64> {
    let parts: Vec<&str> = stamp.split(':').collect();
    let fields: Vec<u64> = parts
        .iter()
        .map(|p| p.trim().parse().ok())
        .collect::<Option<Vec<u64>>>()?;
    match fields.as_slice() {
        [m, s] if *s < 60 => Some(m * 60 + s),
        [h, m, s] if *m < 60 && *s < 60 => Some(h * 3600 + m * 60 + s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_second_form() {
        let line = TranscriptLine::parse("[1:05] alice - hello there").unwrap();
        assert_eq!(line.start_sec, 65);
        assert_eq!(line.speaker, "alice");
        assert_eq!(line.text, "hello there");
    }

    #[test]
    fn parses_hour_form() {
        let line = TranscriptLine::parse("[1:02:03] bob - hi").unwrap();
        assert_eq!(line.start_sec, 3723);
    }

    #[test]
    fn text_may_contain_the_separator() {
        let line = TranscriptLine::parse("[0:10] carol - first - second").unwrap();
        assert_eq!(line.text, "first - second");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(TranscriptLine::parse("no timestamp here").is_none());
        assert!(TranscriptLine::parse("[xx:yy] alice - hi").is_none());
        assert!(TranscriptLine::parse("[1:99] alice - hi").is_none());
        assert!(TranscriptLine::parse("[1:05] missing separator").is_none());
    }

    #[test]
    fn render_round_trips() {
        let line = TranscriptLine {
            start_sec: 3723,
            speaker: "bob".to_string(),
            text: "hi".to_string(),
        };
        assert_eq!(line.render(), "[1:02:03] bob - hi");
        assert_eq!(TranscriptLine::parse(&line.render()).unwrap(), line);
    }

    #[test]
    fn parse_transcript_drops_bad_lines_only() {
        let text = "[0:01] a - one\ngarbage\n[0:02] b - two";
        let lines = parse_transcript(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].speaker, "b");
    }

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(65), "1:05");
        assert_eq!(format_timestamp(3723), "1:02:03");
        assert_eq!(format_timestamp(0), "0:00");
    }
}
