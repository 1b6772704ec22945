use std::path::Path;
use std::time::Instant;
use store::RatingsStore;

fn main() {
    let movies = Path::new("movies.csv");
    let ratings = Path::new("training_ratings.csv");

    println!("Loading catalog and training ratings...\n");

    let start = Instant::now();
    let store = RatingsStore::load_from_files(movies, ratings)
        .expect("Failed to load tables");
    let elapsed = start.elapsed();

    let (users, movie_count, rating_count) = store.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Movies: {}", movie_count);
    println!("Ratings: {}", rating_count);
    println!("\nPerformance: {:.0} ratings/second",
             rating_count as f64 / elapsed.as_secs_f64());
}
