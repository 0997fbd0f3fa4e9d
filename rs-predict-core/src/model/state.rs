use indexmap::IndexMap;

use rand::Rng;

use super::config::TieBreak;

/// Represents one context of an n-gram model.
///
/// A `State` is the row of the context table for a fixed prefix: every
/// character observed right after that prefix, with how many times it was
/// observed. The running `total` is the context's total count.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each transition count is strictly positive
/// - `total` equals the sum of all transition counts
/// - Transitions iterate in first-observation order
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct State {
	/// Next character => number of observations.
	/// Example: { 'e' => 42, 'a' => 3 }
	transitions: IndexMap<char, usize>,
	/// Sum of `transitions` values, kept in lock-step.
	total: usize,
}

impl State {
	/// Records an occurrence of a transition toward `next_char`.
	pub fn add_transition(&mut self, next_char: char) {
		*self.transitions.entry(next_char).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of times `next_char` followed this context (0 if never).
	pub fn count(&self, next_char: char) -> usize {
		self.transitions.get(&next_char).copied().unwrap_or(0)
	}

	/// Total number of observations of this context.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Iterates over `(next_char, count)` in first-observation order.
	pub fn transitions(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.transitions.iter().map(|(c, n)| (*c, *n))
	}

	/// Returns the most frequent next character.
	///
	/// Among characters sharing the maximum count, `InsertionOrder` keeps the
	/// first one observed and `Lexical` the smallest one.
	///
	/// Returns `None` if the state has no transitions.
	pub fn most_frequent(&self, tie_break: TieBreak) -> Option<char> {
		let mut best: Option<(char, usize)> = None;
		for (next_char, occurrence) in self.transitions() {
			let better = match best {
				None => true,
				Some((c, n)) => match tie_break {
					TieBreak::InsertionOrder => occurrence > n,
					TieBreak::Lexical => occurrence > n || (occurrence == n && next_char < c),
				},
			};
			if better {
				best = Some((next_char, occurrence));
			}
		}
		best.map(|(c, _)| c)
	}

	/// Picks the next character using weighted random sampling.
	///
	/// The probability of selecting a character is proportional to its
	/// occurrence count.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (next_char, occurrence) in self.transitions() {
			if r < occurrence {
				return Some(next_char);
			}
			r -= occurrence;
		}

		// Unreachable while `total` matches the transitions
		None
	}
}
