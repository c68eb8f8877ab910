//! Character-window chunking with overlap, split on whitespace boundaries.

/// Default chunk window, in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 1_200;
/// Default overlap carried between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Split `text` into windows of at most `max_chars`, preferring to break on
/// whitespace, with `overlap` characters repeated between windows. Short
/// texts yield a single chunk.
pub fn chunk_text(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }
    let max_chars = max_chars.max(1);
    let overlap = overlap.min(max_chars / 2);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let hard_end = (start + max_chars).min(chars.len());
        let mut end = hard_end;
        if hard_end < chars.len() {
            // Backtrack to the last whitespace, but never below half a window.
            let floor = start + max_chars / 2;
            if let Some(ws) = (floor..hard_end).rev().find(|&i| chars[i].is_whitespace()) {
                end = ws;
            }
        }
        chunks.push(chars[start..end].iter().collect::<String>().trim().to_string());
        if end >= chars.len() {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }
    chunks.retain(|c| !c.is_empty());
    chunks
}
