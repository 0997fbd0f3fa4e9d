use actix_cors::Cors;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};

use rs_predict_core::io::read_corpus;
use rs_predict_core::model::cursor::current_word;
use rs_predict_core::{NgramModel, Prediction, TypingStats, typing_stats};
use serde::{Deserialize, Serialize};

mod config;

use config::ServerConfig;

/// Number of suggestions returned when `k` is not given.
const DEFAULT_K: usize = 10;

/// Query parameters for the `/v1/predict` endpoint
#[derive(Deserialize)]
struct PredictParams {
	prefix: Option<String>,
	k: Option<usize>,
}

/// Query parameters for the `/v1/complete` endpoint
#[derive(Deserialize)]
struct CompleteParams {
	text: Option<String>,
	cursor: Option<usize>, // character index, defaults to the end of `text`
	k: Option<usize>,
}

/// Query parameters for the `/v1/stats/typing` endpoint
#[derive(Deserialize)]
struct TypingParams {
	text: Option<String>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	prefix: Option<String>,
	mode: Option<String>, // greedy (default) or sampled
}

enum GenerationMode {
	Greedy,
	Sampled,
}

impl GenerateParams {
	/// Determines the generation strategy.
	fn mode(&self) -> Result<GenerationMode, String> {
		match self.mode.as_deref().map(str::to_lowercase).as_deref() {
			None | Some("greedy") => Ok(GenerationMode::Greedy),
			Some("sampled") => Ok(GenerationMode::Sampled),
			Some(other) => Err(format!("Mode must be 'greedy' or 'sampled', got '{other}'")),
		}
	}
}

/// Body of the `/v1/complete` response
#[derive(Serialize, Deserialize, Debug)]
struct Completion {
	word: String,
	suggestions: Vec<Prediction>,
}

/// Body of the `/v1/stats` response
#[derive(Serialize, Deserialize, Debug)]
struct Stats {
	order: usize,
	alpha: f64,
	words: usize,
	contexts: usize,
	vocabulary: usize,
}

/// HTTP GET endpoint `/v1/predict`
///
/// Ranks the vocabulary words completing `prefix`, best first.
#[get("/v1/predict")]
async fn get_predict(model: web::Data<NgramModel>, query: web::Query<PredictParams>) -> impl Responder {
	let prefix = query.prefix.as_deref().unwrap_or("");
	HttpResponse::Ok().json(model.rank(prefix, query.k.unwrap_or(DEFAULT_K)))
}

/// HTTP GET endpoint `/v1/complete`
///
/// Finds the word under the cursor in `text` and ranks its completions.
#[get("/v1/complete")]
async fn get_complete(model: web::Data<NgramModel>, query: web::Query<CompleteParams>) -> impl Responder {
	let text = query.text.as_deref().unwrap_or("");
	let cursor = query.cursor.unwrap_or_else(|| text.chars().count());
	let word = current_word(text, cursor);

	HttpResponse::Ok().json(Completion {
		word: word.to_owned(),
		suggestions: model.rank(word, query.k.unwrap_or(DEFAULT_K)),
	})
}

/// HTTP GET endpoint `/v1/generate`
///
/// Extends `prefix` character by character and returns the generated word.
#[get("/v1/generate")]
async fn get_generate(model: web::Data<NgramModel>, query: web::Query<GenerateParams>) -> impl Responder {
	let prefix = query.prefix.as_deref().unwrap_or("");

	let word = match query.mode() {
		Ok(GenerationMode::Greedy) => model.generate(prefix),
		Ok(GenerationMode::Sampled) => model.sample_word(prefix, &mut rand::rng()),
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	HttpResponse::Ok().body(word)
}

#[get("/v1/stats")]
async fn get_stats(model: web::Data<NgramModel>) -> impl Responder {
	HttpResponse::Ok().json(Stats {
		order: model.order(),
		alpha: model.config().alpha(),
		words: model.word_count(),
		contexts: model.contexts().count(),
		vocabulary: model.vocabulary_size(),
	})
}

/// HTTP GET endpoint `/v1/stats/typing`
///
/// Letters and tab presses spent on `text`, in total and per word.
#[get("/v1/stats/typing")]
async fn get_typing_stats(query: web::Query<TypingParams>) -> impl Responder {
	let stats: TypingStats = typing_stats(query.text.as_deref().unwrap_or(""));
	HttpResponse::Ok().json(stats)
}

/// Registers every endpoint.
fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_predict)
		.service(get_complete)
		.service(get_generate)
		.service(get_stats)
		.service(get_typing_stats);
}

/// Main entry point for the server.
///
/// Reads the configuration (first CLI argument, `./predict.toml`, or defaults),
/// trains the model once, then serves it. The model is never mutated after
/// training, so workers share it without a lock.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let config_path = std::env::args().nth(1);
	let config = ServerConfig::load(config_path.as_deref())?;

	let corpus = read_corpus(&config.corpus)
		.map_err(|e| format!("Failed to read corpus {}: {e}", config.corpus))?;
	let model = web::Data::new(NgramModel::new(&corpus, config.model.clone())?);

	log::info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(model.clone())
			.configure(routes)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await?;

	Ok(())
}
