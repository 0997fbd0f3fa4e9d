use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Policy used to order items that compare equal.
///
/// Applies both to the generator (successors with the same count) and to
/// ranking (candidates with the same score).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
	/// First observed in the corpus wins.
	#[default]
	InsertionOrder,
	/// Smallest in lexical order wins.
	Lexical,
}

/// What ranking does with vocabulary words shorter than the model order.
///
/// Such words contain no complete n-gram, so there is no evidence to score them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShortWordPolicy {
	/// Leave them out of the candidate set.
	#[default]
	Exclude,
	/// Keep them, scored as the empty product (1.0).
	EmptyProduct,
}

/// Construction parameters of an [`NgramModel`](crate::NgramModel).
///
/// # Invariants (checked by [`ModelConfig::validate`])
/// - `order >= 2`
/// - `alpha` is finite and strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
	/// Order `n` of the model: `n - 1` characters predict the next one.
	pub order: usize,

	/// Additive smoothing constant.
	alpha: f64,

	/// Maximum number of characters the generator appends to a prefix.
	pub max_extra_chars: usize,

	/// Tie-break between equal counts (generation) and equal scores (ranking).
	pub tie_break: TieBreak,

	/// Handling of words shorter than `order` during ranking.
	pub short_words: ShortWordPolicy,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			order: 3,
			alpha: 0.0001,
			max_extra_chars: 10,
			tie_break: TieBreak::InsertionOrder,
			short_words: ShortWordPolicy::Exclude,
		}
	}
}

impl ModelConfig {
	/// Default configuration with the given order.
	pub fn with_order(order: usize) -> Self {
		Self { order, ..Self::default() }
	}

	/// Returns the smoothing constant.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Sets the smoothing constant.
	///
	/// # Errors
	/// Returns an error if `alpha` is not a positive finite number.
	pub fn set_alpha(&mut self, alpha: f64) -> Result<(), ModelError> {
		if !alpha.is_finite() || alpha <= 0.0 {
			return Err(ModelError::InvalidAlpha(alpha));
		}
		self.alpha = alpha;
		Ok(())
	}

	/// Checks every invariant. Called by model construction, since a
	/// deserialized configuration never went through the setters.
	pub fn validate(&self) -> Result<(), ModelError> {
		if self.order < 2 {
			return Err(ModelError::InvalidOrder(self.order));
		}
		if !self.alpha.is_finite() || self.alpha <= 0.0 {
			return Err(ModelError::InvalidAlpha(self.alpha));
		}
		Ok(())
	}
}
