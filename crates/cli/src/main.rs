use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{pearson, RatingPredictor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use store::{load_test_rows, MovieId, RatingsStore, UserId};

/// ReelRater - Item-based collaborative filtering rating predictor
#[derive(Parser)]
#[command(name = "reel-rater")]
#[command(about = "Predicts user ratings via item-based collaborative filtering", long_about = None)]
struct Cli {
    /// Path to the movie catalog file
    #[arg(short, long, default_value = "movies.csv")]
    movies: PathBuf,

    /// Path to the training ratings file
    #[arg(short, long, default_value = "training_ratings.csv")]
    ratings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict ratings for every row of a test file and report the
    /// correlation against the actual ratings
    Predict {
        /// Path to the test ratings file
        #[arg(long, default_value = "test_ratings.csv")]
        test: PathBuf,
    },

    /// Predict a single user's rating for a single movie
    Rate {
        /// User ID to predict for
        #[arg(long)]
        user_id: UserId,

        /// Movie ID to predict
        #[arg(long)]
        movie_id: MovieId,
    },

    /// Show the similarity between two movies
    Similarity {
        /// First movie ID
        #[arg(long)]
        movie_a: MovieId,

        /// Second movie ID
        #[arg(long)]
        movie_b: MovieId,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog and training ratings (this may take a moment)
    println!(
        "Loading tables from {} and {}...",
        cli.movies.display(),
        cli.ratings.display()
    );
    let start = Instant::now();
    let store = Arc::new(
        RatingsStore::load_from_files(&cli.movies, &cli.ratings)
            .context("Failed to load catalog and training ratings")?,
    );
    println!("{} Loaded tables in {:?}", "✓".green(), start.elapsed());

    let predictor = RatingPredictor::new(store.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Predict { test } => handle_predict(&predictor, &test)?,
        Commands::Rate { user_id, movie_id } => {
            handle_rate(&store, &predictor, user_id, movie_id)?
        }
        Commands::Similarity { movie_a, movie_b } => {
            handle_similarity(&predictor, movie_a, movie_b)?
        }
    }

    Ok(())
}

/// Handle the 'predict' command: batch prediction plus correlation
fn handle_predict(predictor: &RatingPredictor, test_path: &Path) -> Result<()> {
    let test_rows = load_test_rows(test_path)
        .with_context(|| format!("Failed to load test ratings from {}", test_path.display()))?;

    let start = Instant::now();
    let predictions = predictor
        .predict_ratings(&test_rows)
        .context("Batch prediction failed")?;
    let elapsed = start.elapsed();

    println!("{}", "Rating predictions:".bold().blue());
    for p in &predictions {
        println!(
            "  user {:>6}  {:<50}  predicted {:.3}  actual {:.1}",
            p.user_id, p.title, p.predicted, p.actual
        );
    }

    let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
    let actual: Vec<f64> = predictions.iter().map(|p| p.actual).collect();
    let correlation = pearson(&predicted, &actual).context("Correlation failed")?;

    println!(
        "\n{} {} predictions in {:?}",
        "✓".green(),
        predictions.len(),
        elapsed
    );
    println!("Correlation: {}", format!("{:.4}", correlation).bold());

    Ok(())
}

/// Handle the 'rate' command
fn handle_rate(
    store: &Arc<RatingsStore>,
    predictor: &RatingPredictor,
    user_id: UserId,
    movie_id: MovieId,
) -> Result<()> {
    let predicted = predictor.predict_rating(user_id, movie_id)?;
    let title = store
        .movie(movie_id)
        .map(|m| m.title.as_str())
        .unwrap_or("<unknown>");

    if store.rating(user_id, movie_id).is_some() {
        println!(
            "User {} already rated {} {}: {:.1}",
            user_id,
            title.bold(),
            "(stored rating)".dimmed(),
            predicted
        );
    } else {
        println!(
            "Predicted rating for user {} on {}: {}",
            user_id,
            title.bold(),
            format!("{:.3}", predicted).bold().blue()
        );
    }

    Ok(())
}

/// Handle the 'similarity' command
fn handle_similarity(
    predictor: &RatingPredictor,
    movie_a: MovieId,
    movie_b: MovieId,
) -> Result<()> {
    let similarity = predictor.similarity(movie_a, movie_b)?;
    println!(
        "Similarity between movie {} and movie {}: {}",
        movie_a,
        movie_b,
        format!("{:.4}", similarity).bold().blue()
    );

    Ok(())
}
