use serde::{Deserialize, Serialize};

/// Effort spent typing a text, used to measure how much the suggestions help.
///
/// Suggestions are cycled with tab, so fewer letters and more tabs per word
/// mean the predictor did more of the work.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TypingStats {
	/// Non-whitespace characters across all words.
	pub letters: usize,
	/// Tab characters in the text.
	pub tab_presses: usize,
	/// `letters / words`, rounded to two decimals.
	pub avg_letters_per_word: f64,
	/// `tab_presses / words`, rounded to two decimals.
	pub avg_tabs_per_word: f64,
}

/// Computes [`TypingStats`] for `text`.
///
/// Blank text (empty or whitespace only, tabs included) yields all zeros.
pub fn typing_stats(text: &str) -> TypingStats {
	if text.trim().is_empty() {
		return TypingStats::default();
	}

	let words = text.split_whitespace().count();
	let letters: usize = text.split_whitespace().map(|w| w.chars().count()).sum();
	let tab_presses = text.chars().filter(|&c| c == '\t').count();

	TypingStats {
		letters,
		tab_presses,
		avg_letters_per_word: round2(letters as f64 / words as f64),
		avg_tabs_per_word: round2(tab_presses as f64 / words as f64),
	}
}

fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}
