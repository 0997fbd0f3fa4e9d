/// Returns the byte offset of the character at `cursor` (a character index),
/// clamped to the end of `text`.
fn byte_offset(text: &str, cursor: usize) -> usize {
	text.char_indices().nth(cursor).map(|(i, _)| i).unwrap_or(text.len())
}

/// Returns the byte offset where the word ending at `end` starts.
fn word_start(text: &str, end: usize) -> usize {
	text[..end]
		.char_indices()
		.rev()
		.find(|(_, c)| c.is_whitespace())
		.map(|(i, c)| i + c.len_utf8())
		.unwrap_or(0)
}

/// Returns the word being typed: the run of non-whitespace characters
/// ending at `cursor` (a character index into `text`).
///
/// Examples:
/// - `("hello wor", 9)` → `"wor"`
/// - `("hello ", 6)` → `""`
pub fn current_word(text: &str, cursor: usize) -> &str {
	let end = byte_offset(text, cursor);
	&text[word_start(text, end)..end]
}

/// Replaces the word being typed with `word`.
///
/// Returns the new text and the new cursor (character index), placed right
/// after the inserted word. Text after the cursor is preserved.
pub fn replace_current_word(text: &str, cursor: usize, word: &str) -> (String, usize) {
	let end = byte_offset(text, cursor);
	let start = word_start(text, end);

	let mut replaced = String::with_capacity(text.len() + word.len());
	replaced.push_str(&text[..start]);
	replaced.push_str(word);
	replaced.push_str(&text[end..]);

	let new_cursor = text[..start].chars().count() + word.chars().count();
	(replaced, new_cursor)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn current_word_at_end() {
		assert_eq!(current_word("hello wor", 9), "wor");
		assert_eq!(current_word("hello", 5), "hello");
		assert_eq!(current_word("hello ", 6), "");
		assert_eq!(current_word("", 0), "");
	}

	#[test]
	fn current_word_mid_text() {
		assert_eq!(current_word("the quick brown", 7), "qui");
		assert_eq!(current_word("the quick", 0), "");
	}

	#[test]
	fn cursor_past_end_is_clamped() {
		assert_eq!(current_word("abc", 99), "abc");
	}

	#[test]
	fn replace_keeps_surrounding_text() {
		let (text, cursor) = replace_current_word("the qui fox", 7, "quick");
		assert_eq!(text, "the quick fox");
		assert_eq!(cursor, 9);
	}

	#[test]
	fn replace_counts_characters_not_bytes() {
		let (text, cursor) = replace_current_word("né he", 5, "hello");
		assert_eq!(text, "né hello");
		assert_eq!(cursor, 8);
	}
}
