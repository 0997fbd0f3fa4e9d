use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_predict_core::model::corpus;
use rs_predict_core::{ModelConfig, ModelError, NgramModel, TieBreak};

const CORPUS: &str = "The quick brown fox jumps over the lazy dog. \
	The dog barks; the fox runs! Then they rest, and then there's quiet.";

#[test]
fn it_rejects_invalid_order() {
	assert_eq!(NgramModel::with_order("abc", 1).unwrap_err(), ModelError::InvalidOrder(1));
	assert_eq!(NgramModel::with_order("abc", 0).unwrap_err(), ModelError::InvalidOrder(0));
	assert!(NgramModel::with_order("abc", 2).is_ok());
}

#[test]
fn it_accepts_only_validated_alpha() {
	let mut config = ModelConfig::default();
	assert!(config.set_alpha(-0.5).is_err());
	config.set_alpha(0.01).unwrap();
	assert!(NgramModel::new("abc", config).is_ok());
}

#[test]
fn word_set_matches_distinct_tokens() {
	let model = NgramModel::with_order(CORPUS, 3).unwrap();
	let normalized = corpus::normalize(CORPUS);
	let distinct: HashSet<&str> = corpus::words(&normalized).collect();

	assert_eq!(model.word_count(), distinct.len());
	for word in model.words() {
		assert!(distinct.contains(word));
		assert!(!word.is_empty());
		assert!(!word.contains(char::is_whitespace));
	}
	assert!(model.words().any(|w| w == "there's"));
}

#[test]
fn context_totals_match_row_sums() {
	let model = NgramModel::with_order(CORPUS, 3).unwrap();
	assert!(model.contexts().count() > 0);

	for (context, total) in model.contexts() {
		let len = context.chars().count();
		assert!((1..=2).contains(&len), "context {context:?}");
		let sum: usize = model.successors(context).map(|(_, n)| n).sum();
		assert_eq!(total, sum, "context {context:?}");
		assert!(model.successors(context).all(|(_, n)| n > 0));
	}
}

#[test]
fn training_is_deterministic() {
	let first = NgramModel::with_order(CORPUS, 4).unwrap();
	let second = NgramModel::with_order(CORPUS, 4).unwrap();
	assert_eq!(first, second);
	assert_eq!(
		first.contexts().collect::<Vec<_>>(),
		second.contexts().collect::<Vec<_>>()
	);
}

#[test]
fn scores_are_probabilities() {
	let model = NgramModel::with_order(CORPUS, 3).unwrap();
	for word in model.words().filter(|w| w.chars().count() >= 3) {
		let score = model.score(word);
		assert!(score > 0.0 && score <= 1.0, "{word}: {score}");
	}
	let unseen = model.score("qqqqqq");
	assert!(unseen > 0.0 && unseen <= 1.0);
}

#[test]
fn smoothing_never_inflates_fully_determined_words() {
	// Every context of "abc" has a single successor, so its unsmoothed probability is 1.
	let mut large = ModelConfig::with_order(3);
	large.set_alpha(0.1).unwrap();
	let mut small = ModelConfig::with_order(3);
	small.set_alpha(0.0001).unwrap();

	let large = NgramModel::new("abc xyz", large).unwrap();
	let small = NgramModel::new("abc xyz", small).unwrap();

	assert!(large.score("abc") <= 1.0);
	assert!(small.score("abc") <= 1.0);
	assert!(small.score("abc") >= large.score("abc"));
}

#[test]
fn predicts_the_ca_family() {
	let model = NgramModel::with_order("cat can cap car", 3).unwrap();

	let ranked = model.rank("ca", 10);
	let words: HashSet<&str> = ranked.iter().map(|p| p.word.as_str()).collect();
	assert_eq!(words, HashSet::from(["cat", "can", "cap", "car"]));
	assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));

	let top = model.predict_top_words("ca", 3);
	assert_eq!(top.len(), 3);
	assert_eq!(top, vec!["cat", "can", "cap"]);
}

#[test]
fn prefix_is_case_insensitive() {
	let model = NgramModel::with_order("cat can cap car", 3).unwrap();
	assert_eq!(model.predict_top_words("CA", 2), model.predict_top_words("ca", 2));
}

#[test]
fn greedy_generation_from_he() {
	let model = NgramModel::with_order("hello help held", 2).unwrap();
	assert_eq!(model.resolve_context("e"), Some("e"));
	assert_eq!(model.successors("e").collect::<Vec<_>>(), vec![('l', 3)]);

	let word = model.generate("he");
	assert!(word.starts_with("hel"));
	assert_eq!(word.chars().count(), 2 + model.config().max_extra_chars);
	assert_eq!(word, model.generate("he"));
}

#[test]
fn single_letter_prefix_is_completed() {
	let model = NgramModel::with_order("cat can cap car", 3).unwrap();
	assert_eq!(model.resolve_context("c"), Some("c"));
	assert_eq!(model.generate("c"), "cat");

	let model = NgramModel::with_order(CORPUS, 4).unwrap();
	let word = model.generate("q");
	assert!(word.starts_with("qu"), "{word}");
}

#[test]
fn unknown_context_shrinks_during_generation() {
	let model = NgramModel::with_order("cat can cap car", 3).unwrap();
	assert_eq!(model.generate("xca"), "xcat");
}

#[test]
fn only_short_words_matching_falls_back_to_substrings() {
	let model = NgramModel::with_order("ab cab", 3).unwrap();
	assert_eq!(model.predict_top_words("ab", 5), vec!["cab"]);
}

#[test]
fn empty_corpus_predicts_nothing() {
	let model = NgramModel::with_order("", 3).unwrap();
	assert_eq!(model.word_count(), 0);
	assert!(model.predict_top_words("a", 5).is_empty());
	assert!(model.predict_top_words("", 5).is_empty());
	assert_eq!(model.generate("a"), "a");
}

#[test]
fn predictions_are_bounded_and_unique() {
	let model = NgramModel::with_order(CORPUS, 2).unwrap();
	for prefix in ["", "t", "th", "the", "o", "x", "!!"] {
		for k in [0, 1, 3, 50] {
			let words = model.predict_top_words(prefix, k);
			assert!(words.len() <= k);
			let unique: HashSet<&String> = words.iter().collect();
			assert_eq!(unique.len(), words.len());
		}
	}
}

#[test]
fn sampled_mode_is_reproducible_with_a_seed() {
	let model = NgramModel::with_order(CORPUS, 3).unwrap();

	let first = model.sample_top_words("th", 3, &mut StdRng::seed_from_u64(11));
	let second = model.sample_top_words("th", 3, &mut StdRng::seed_from_u64(11));
	assert_eq!(first, second);
	assert!(first.len() <= 3);
	assert!(first.iter().all(|w| w.starts_with("th")));

	let unique: HashSet<&String> = first.iter().collect();
	assert_eq!(unique.len(), first.len());
}

#[test]
fn sampled_word_follows_single_successor() {
	let model = NgramModel::with_order("banana", 3).unwrap();
	let word = model.sample_word("ban", &mut StdRng::seed_from_u64(3));
	assert!(word.starts_with("bana"));
}

#[test]
fn lexical_config_is_stable() {
	let mut config = ModelConfig::with_order(3);
	config.tie_break = TieBreak::Lexical;
	let model = NgramModel::new("car cap can cat", config).unwrap();
	assert_eq!(model.predict_top_words("ca", 4), vec!["can", "cap", "car", "cat"]);
}

#[test]
fn model_is_shareable_between_threads() {
	let model = Arc::new(NgramModel::with_order(CORPUS, 3).unwrap());
	let expected = model.predict_top_words("th", 5);

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let model = Arc::clone(&model);
			thread::spawn(move || model.predict_top_words("th", 5))
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().unwrap(), expected);
	}
}
