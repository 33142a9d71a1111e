// Bounded-size text chunking for generation engines with limited context.
//
// Whole lines are packed greedily; a line is never split, so a single line
// longer than the limit becomes its own oversized chunk.

/// Filtering and sizing policy for chunk building.
#[derive(Debug, Clone)]
pub struct ChunkPolicy {
    /// Soft upper bound on chunk size in characters
    pub max_chunk_chars: usize,
    /// Lines shorter than this are dropped before packing
    pub min_line_chars: usize,
    /// Lines containing any of these terms (case-insensitive) are dropped;
    /// covers the noise markers transcription engines emit
    pub skip_terms: Vec<String>,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            max_chunk_chars: 4000,
            min_line_chars: 3,
            skip_terms: vec![
                "[BLANK_AUDIO]".to_string(),
                "[INAUDIBLE]".to_string(),
                "[MUSIC]".to_string(),
            ],
        }
    }
}

impl ChunkPolicy {
    fn keeps(&self, line: &str) -> bool {
        if line.chars().count() < self.min_line_chars {
            return false;
        }
        let lowered = line.to_lowercase();
        !self
            .skip_terms
            .iter()
            .any(|term| lowered.contains(&term.to_lowercase()))
    }
}

/// Pack filtered lines into newline-joined chunks of at most
/// `max_chunk_chars`, except where a single line alone exceeds the limit.
pub fn build_chunks(lines: &[String], policy: &ChunkPolicy) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in lines.iter().map(|l| l.trim()).filter(|l| policy.keeps(l)) {
        let added = if current.is_empty() {
            line.len()
        } else {
            line.len() + 1
        };
        if !current.is_empty() && current.len() + added > policy.max_chunk_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max: usize) -> ChunkPolicy {
        ChunkPolicy {
            max_chunk_chars: max,
            min_line_chars: 0,
            skip_terms: Vec::new(),
        }
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn concatenated_chunks_reproduce_the_filtered_sequence() {
        let input = lines(&["aaaa", "bbbb", "cccc", "dddd"]);
        let chunks = build_chunks(&input, &policy(9));
        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.lines().map(|l| l.to_string()))
            .collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn no_chunk_exceeds_the_limit() {
        let input = lines(&["aaaa", "bbbb", "cccc"]);
        let chunks = build_chunks(&input, &policy(9));
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc"]);
        assert!(chunks.iter().all(|c| c.len() <= 9));
    }

    #[test]
    fn oversized_line_forms_its_own_chunk() {
        let input = lines(&["short", "this line is far beyond the limit", "tail"]);
        let chunks = build_chunks(&input, &policy(10));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], "this line is far beyond the limit");
    }

    #[test]
    fn short_lines_are_filtered_out() {
        let mut p = policy(100);
        p.min_line_chars = 4;
        let chunks = build_chunks(&lines(&["ok", "long enough"]), &p);
        assert_eq!(chunks, vec!["long enough"]);
    }

    #[test]
    fn skip_terms_filter_case_insensitively() {
        let mut p = policy(100);
        p.skip_terms = vec!["[blank_audio]".to_string()];
        let chunks = build_chunks(&lines(&["[BLANK_AUDIO]", "speech"]), &p);
        assert_eq!(chunks, vec!["speech"]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(build_chunks(&[], &ChunkPolicy::default()).is_empty());
    }
}
