use indexmap::{IndexMap, IndexSet};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{ModelConfig, ShortWordPolicy, TieBreak};
use super::corpus;
use super::state::State;
use crate::error::ModelError;

/// A ranked completion: a vocabulary word and its smoothed probability.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
	pub word: String,
	pub score: f64,
}

/// Character-level n-gram model used to complete and rank words.
///
/// The model is trained once, at construction, and never mutated afterward:
/// every query takes `&self`, so a trained model can be shared freely
/// between threads.
///
/// # Responsibilities
/// - Accumulate context => next-character counts from a corpus
/// - Resolve unseen or short contexts by backing off to their longest known suffix
/// - Greedily complete a prefix into a word
/// - Score words with additive smoothing and rank vocabulary completions
///
/// # Invariants
/// - `config` is valid (`order >= 2`, `alpha > 0`)
/// - Every state key is 1 to `order - 1` characters long; keys shorter
///   than `order - 1` only serve backoff, scoring reads full-length keys
/// - `vocabulary` holds every character recorded after a full-length context
/// - `words` keeps the distinct corpus words in first-seen order
#[derive(Clone, Debug, PartialEq)]
pub struct NgramModel {
	config: ModelConfig,

	/// Context table: context (length n-1) => its next-character counts
	states: IndexMap<String, State>,

	/// Every next-character ever observed
	vocabulary: IndexSet<char>,

	/// Distinct words of the normalized corpus
	words: IndexSet<String>,
}

impl NgramModel {
	/// Trains a new model on `corpus`.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid (for instance `order < 2`).
	/// An empty corpus is not an error: it yields a model that predicts nothing.
	pub fn new(corpus: &str, config: ModelConfig) -> Result<Self, ModelError> {
		config.validate()?;

		let mut model = Self {
			config,
			states: IndexMap::new(),
			vocabulary: IndexSet::new(),
			words: IndexSet::new(),
		};
		model.train(corpus);
		Ok(model)
	}

	/// Trains a new model of order `n` with every other parameter at its default.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn with_order(corpus: &str, n: usize) -> Result<Self, ModelError> {
		Self::new(corpus, ModelConfig::with_order(n))
	}

	fn train(&mut self, corpus: &str) {
		let normalized = corpus::normalize(corpus);

		for word in corpus::words(&normalized) {
			if !self.words.contains(word) {
				self.words.insert(word.to_owned());
			}
			self.add_word(word);
		}

		log::info!(
			"trained {}-gram model: {} words, {} contexts, {} characters",
			self.config.order,
			self.words.len(),
			self.states.len(),
			self.vocabulary.len()
		);
	}

	/// Records every n-gram of a single word, plus the shorter backoff
	/// contexts (1 to `n - 2` characters) preceding each of its characters.
	///
	/// Only full n-grams feed the vocabulary. Words shorter than `n`
	/// contribute nothing.
	fn add_word(&mut self, word: &str) {
		let n = self.config.order;
		let chars: Vec<char> = word.chars().collect();
		if chars.len() < n {
			return;
		}

		for (context, next_char) in ngrams(&chars, n) {
			self.states.entry(context).or_default().add_transition(next_char);
			self.vocabulary.insert(next_char);
		}

		for (j, &next_char) in chars.iter().enumerate().skip(1) {
			for len in 1..=(n - 2).min(j) {
				let context: String = chars[j - len..j].iter().collect();
				self.states.entry(context).or_default().add_transition(next_char);
			}
		}
	}

	/// Returns the order `n` of the model.
	pub fn order(&self) -> usize {
		self.config.order
	}

	/// Returns the configuration the model was built with.
	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	/// Iterates over the distinct corpus words, in first-seen order.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}

	/// Number of distinct corpus words.
	pub fn word_count(&self) -> usize {
		self.words.len()
	}

	/// Number of distinct next-characters ever observed.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// Iterates over `(context, total)` for every known context.
	pub fn contexts(&self) -> impl Iterator<Item = (&str, usize)> {
		self.states.iter().map(|(key, state)| (key.as_str(), state.total()))
	}

	/// Iterates over `(next_char, count)` recorded for `context`, in
	/// first-observation order. Empty if the context is unknown.
	pub fn successors(&self, context: &str) -> impl Iterator<Item = (char, usize)> + '_ {
		self.states.get(context).into_iter().flat_map(State::transitions)
	}

	/// Number of times `next_char` followed `context`.
	pub fn count(&self, context: &str, next_char: char) -> usize {
		self.states.get(context).map_or(0, |state| state.count(next_char))
	}

	/// Number of times `context` was followed by any character.
	pub fn total(&self, context: &str) -> usize {
		self.states.get(context).map_or(0, State::total)
	}

	/// Returns the longest suffix of `raw` that is a known context.
	///
	/// The context is shortened by one character from the left until it
	/// matches. Returns `None` if no suffix, down to the empty string, matches.
	pub fn resolve_context<'a>(&self, raw: &'a str) -> Option<&'a str> {
		raw.char_indices()
			.map(|(i, _)| i)
			.chain(std::iter::once(raw.len()))
			.map(|i| &raw[i..])
			.find(|suffix| self.states.contains_key(*suffix))
	}

	/// Completes `prefix` greedily, appending at most `max_extra_chars`
	/// characters (see [`NgramModel::generate_with_limit`]).
	pub fn generate(&self, prefix: &str) -> String {
		self.generate_with_limit(prefix, self.config.max_extra_chars)
	}

	/// Completes `prefix` into a word by repeatedly appending the most
	/// frequent successor of its last `n - 1` characters.
	///
	/// Generation stops when no context resolves, when the chosen character
	/// is whitespace, or after `max_extra_chars` characters. Ties between
	/// equally frequent successors follow the configured [`TieBreak`].
	pub fn generate_with_limit(&self, prefix: &str, max_extra_chars: usize) -> String {
		let tie_break = self.config.tie_break;
		self.extend_word(prefix, max_extra_chars, |state| state.most_frequent(tie_break))
	}

	/// Completes `prefix` by weighted random sampling instead of greedy choice.
	///
	/// Each next character is drawn with probability proportional to its
	/// count in the resolved context. Bounded by `max_extra_chars`.
	pub fn sample_word<R: Rng + ?Sized>(&self, prefix: &str, rng: &mut R) -> String {
		self.extend_word(prefix, self.config.max_extra_chars, |state| state.sample(rng))
	}

	/// Collects up to `k` distinct sampled completions of `prefix`.
	///
	/// Sampling is attempted at most `2 * k` times; results keep the order
	/// in which they were first drawn. Empty completions are skipped.
	pub fn sample_top_words<R: Rng + ?Sized>(&self, prefix: &str, k: usize, rng: &mut R) -> Vec<String> {
		let mut words: IndexSet<String> = IndexSet::new();

		for _ in 0..k.saturating_mul(2) {
			if words.len() >= k {
				break;
			}
			let word = self.sample_word(prefix, rng);
			if !word.is_empty() {
				words.insert(word);
			}
		}

		words.into_iter().collect()
	}

	fn extend_word<F>(&self, prefix: &str, max_extra_chars: usize, mut pick: F) -> String
	where
		F: FnMut(&State) -> Option<char>,
	{
		let mut word = prefix.to_lowercase();

		for _ in 0..max_extra_chars {
			let raw = last_n_chars(&word, self.config.order - 1);
			let Some(state) = self.resolve_context(&raw).and_then(|key| self.states.get(key)) else {
				break;
			};

			match pick(state) {
				// Trained targets are never whitespace; a picker may still return one
				Some(c) if !c.is_whitespace() => word.push(c),
				_ => break,
			}
		}

		word.trim().to_owned()
	}

	/// Smoothed probability of `word` under the model.
	///
	/// The product, over every n-gram of the word, of
	/// `(count + alpha) / (total + alpha * |vocabulary|)`. Unknown contexts
	/// count as zero, so no term is ever zero. Words shorter than `n` have
	/// no n-gram and score 1.0 (the empty product).
	///
	/// The result is always in `(0, 1]`.
	pub fn score(&self, word: &str) -> f64 {
		let alpha = self.config.alpha();
		// An untrained model has no vocabulary; count it as one symbol to keep terms finite.
		let vocabulary = self.vocabulary.len().max(1) as f64;
		let chars: Vec<char> = word.to_lowercase().chars().collect();

		ngrams(&chars, self.config.order)
			.map(|(context, next_char)| {
				let count = self.count(&context, next_char) as f64;
				let total = self.total(&context) as f64;
				(count + alpha) / (total + alpha * vocabulary)
			})
			.product()
	}

	/// Ranks vocabulary words completing `prefix`, best first, keeping at most `k`.
	///
	/// Candidates are the corpus words starting with `prefix`; if there are
	/// none, the words containing it anywhere. Words shorter than `n` are
	/// dropped or kept according to [`ShortWordPolicy`]. Equal scores keep
	/// the configured [`TieBreak`] order. An empty prefix ranks the whole
	/// vocabulary.
	pub fn rank(&self, prefix: &str, k: usize) -> Vec<Prediction> {
		let prefix = prefix.to_lowercase();

		let mut candidates = self.candidates(|word| word.starts_with(prefix.as_str()));
		if candidates.is_empty() {
			candidates = self.candidates(|word| word.contains(prefix.as_str()));
		}
		if self.config.tie_break == TieBreak::Lexical {
			candidates.sort_unstable();
		}

		let mut predictions: Vec<Prediction> = candidates
			.into_iter()
			.map(|word| Prediction { word: word.to_owned(), score: self.score(word) })
			.collect();

		// Stable sort: equal scores keep candidate order
		predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
		predictions.truncate(k);

		log::debug!("ranked {} completions for {:?}", predictions.len(), prefix);
		predictions
	}

	/// Returns the `k` best vocabulary completions of `prefix`.
	///
	/// Same as [`NgramModel::rank`] without the scores. Never fails; an
	/// untrained model returns an empty list.
	pub fn predict_top_words(&self, prefix: &str, k: usize) -> Vec<String> {
		self.rank(prefix, k).into_iter().map(|p| p.word).collect()
	}

	fn candidates<F>(&self, matches: F) -> Vec<&str>
	where
		F: Fn(&str) -> bool,
	{
		self.words()
			.filter(|&word| self.is_rankable(word) && matches(word))
			.collect()
	}

	fn is_rankable(&self, word: &str) -> bool {
		match self.config.short_words {
			ShortWordPolicy::EmptyProduct => true,
			ShortWordPolicy::Exclude => word.chars().count() >= self.config.order,
		}
	}
}

/// Enumerates the `(context, next_char)` pairs of a character sequence:
/// every window of `n` characters, split into its first `n - 1` and its last.
fn ngrams(chars: &[char], n: usize) -> impl Iterator<Item = (String, char)> + '_ {
	chars
		.windows(n)
		.map(move |window| (window[..n - 1].iter().collect(), window[n - 1]))
}

/// Returns the last `n` characters of a string.
///
/// If `n` is greater than the number of characters in `s`, the entire string is returned.
fn last_n_chars(s: &str, n: usize) -> String {
	let len = s.chars().count();
	s.chars().skip(len.saturating_sub(n)).collect()
}
