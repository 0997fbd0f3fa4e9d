/// Errors raised while building or configuring an [`NgramModel`](crate::NgramModel).
///
/// Once a model is constructed no operation on it can fail, so this is the
/// whole error surface of the library (loader errors are plain `io::Error`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
	/// The order `n` is below 2, so there is no context to condition on.
	#[error("n must be >= 2, got {0}")]
	InvalidOrder(usize),

	/// The smoothing constant is zero, negative or not finite.
	#[error("alpha must be a positive finite number, got {0}")]
	InvalidAlpha(f64),
}
