use rs_predict_core::io::read_corpus;
use rs_predict_core::model::cursor::{current_word, replace_current_word};
use rs_predict_core::{ModelConfig, NgramModel, TieBreak};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load the corpus: every file of the "data" directory, in name order
    let corpus = read_corpus("./data")?;

    // Build a configuration, every field has a default
    let mut config = ModelConfig::with_order(3);

    // Words longer than prefix + 'max_extra_chars' are never generated
    config.max_extra_chars = 12;

    // Equal counts and equal scores are ordered alphabetically
    // ('InsertionOrder' keeps the corpus order instead)
    config.tie_break = TieBreak::Lexical;

    // Set the smoothing constant (must be a positive finite number)
    config.set_alpha(0.0001)?;

    // Test invalid alpha values
    match config.set_alpha(0.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Alpha 0.0 is invalid: {e}"),
    }

    // An order below 2 is refused at construction
    match NgramModel::with_order(&corpus, 1) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Order 1 is invalid: {e}"),
    }

    // Train once, the model is read-only afterward
    let model = NgramModel::new(&corpus, config)?;
    println!(
        "{} words, {} contexts, {} characters",
        model.word_count(),
        model.contexts().count(),
        model.vocabulary_size()
    );

    // Ranked completions from the vocabulary
    for prefix in ["th", "wh", "qu", "ing"] {
        println!("Top words for '{}':", prefix);
        for prediction in model.rank(prefix, 5) {
            println!("  {:<16} {:.6}", prediction.word, prediction.score);
        }
    }

    // Greedy generation, always the same result
    for prefix in ["th", "wa", "sto"] {
        println!("Generated from '{}': {}", prefix, model.generate(prefix));
    }

    // Sampled generation, differs between runs
    println!("Sampled from 'th': {:?}", model.sample_top_words("th", 5, &mut rand::rng()));

    // Complete the word under the cursor, as an editor would
    let text = "the old ma";
    let cursor = text.chars().count();
    let word = current_word(text, cursor);
    if let Some(best) = model.predict_top_words(word, 1).first() {
        let (completed, cursor) = replace_current_word(text, cursor, best);
        println!("'{}' -> '{}' (cursor at {})", text, completed, cursor);
    }

    Ok(())
}
