/// Normalizes raw corpus text.
///
/// - Lower-cases the text
/// - Replaces anything that is not `a`..`z`, whitespace or `'` with a space
/// - Collapses whitespace runs into one space and trims both ends
///
/// Non-ASCII letters are treated as separators.
pub fn normalize(text: &str) -> String {
	let cleaned: String = text
		.chars()
		.flat_map(char::to_lowercase)
		.map(|c| if c.is_ascii_lowercase() || c == '\'' || c.is_whitespace() { c } else { ' ' })
		.collect();

	cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into words.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
	normalized.split_whitespace()
}
