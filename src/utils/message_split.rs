//! Splitting of long replies into Telegram-sized messages.

/// Character budget for a single outgoing text message.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Characters held back from each chunk for the "Message N of M" header.
pub const CHUNK_HEADER_RESERVE: usize = 64;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

struct ChunkBuilder {
    limit: usize,
    chunks: Vec<String>,
    current: String,
    current_len: usize,
}

impl ChunkBuilder {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Appends `piece` to the open chunk, joined by `separator` when the
    /// chunk is non-empty. Returns false when it would exceed the limit.
    fn try_append(&mut self, piece: &str, separator: char) -> bool {
        let piece_len = char_len(piece);
        let needed = if self.current.is_empty() {
            piece_len
        } else {
            self.current_len + 1 + piece_len
        };

        if needed > self.limit {
            return false;
        }

        if !self.current.is_empty() {
            self.current.push(separator);
        }
        self.current.push_str(piece);
        self.current_len = needed;
        true
    }

    fn flush(&mut self) {
        let trimmed = self.current.trim();
        if !trimmed.is_empty() {
            self.chunks.push(trimmed.to_string());
        }
        self.current.clear();
        self.current_len = 0;
    }

    /// Breaks a word longer than the limit into limit-sized pieces.
    fn push_oversized_word(&mut self, word: &str) {
        self.flush();
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(self.limit) {
            self.chunks.push(piece.iter().collect());
        }
    }

    fn push_long_line(&mut self, line: &str) {
        for word in line.split(' ') {
            if char_len(word) > self.limit {
                self.push_oversized_word(word);
                continue;
            }
            if !self.try_append(word, ' ') {
                self.flush();
                self.try_append(word, ' ');
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}

/// Splits `text` into ordered chunks of at most `limit` characters.
///
/// Breaks prefer line boundaries, then word boundaries; a single word longer
/// than `limit` is cut into pieces. Chunks are trimmed and empty chunks are
/// dropped. Text that already fits is returned unchanged as one chunk.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }

    if char_len(text) <= limit {
        return vec![text.to_string()];
    }

    let mut builder = ChunkBuilder::new(limit);

    for line in text.split('\n') {
        if builder.try_append(line, '\n') {
            continue;
        }

        builder.flush();

        if char_len(line) <= limit {
            builder.try_append(line, '\n');
        } else {
            builder.push_long_line(line);
        }
    }

    builder.finish()
}

/// Adds a "Message N of M" header to every chunk when there is more than one.
pub fn frame_chunks(chunks: Vec<String>) -> Vec<String> {
    let total = chunks.len();
    if total <= 1 {
        return chunks;
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| format!("<i>📄 Message {} of {}</i>\n\n{}", index + 1, total, chunk))
        .collect()
}

/// Splits and frames `text` so every message fits within `limit`.
pub fn chunk_for_delivery(text: &str, limit: usize) -> Vec<String> {
    if char_len(text) <= limit {
        return vec![text.to_string()];
    }
    let budget = limit.saturating_sub(CHUNK_HEADER_RESERVE).max(1);
    frame_chunks(split_message(text, budget))
}
