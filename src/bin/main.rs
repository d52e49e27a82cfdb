use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_finder::catalog::{Movie, MovieId};
use movie_finder::config::Config;
use movie_finder::AppError;

#[derive(Parser, Debug)]
#[command(name = "movie-finder")]
#[command(about = "Movie search and favorites", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "movie-finder.yaml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Keep favorites in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and front end (default)
    Serve,
    /// List popular movies
    Popular,
    /// Search movies by title
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Manage favorites
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// Show all favorites
    List,
    /// Add a movie given as a JSON object with at least an "id"
    Add { movie: String },
    /// Remove a movie by id
    Remove { id: MovieId },
    /// Tell whether a movie is a favorite
    Check { id: MovieId },
}

fn init_logging(debug: bool, json: bool) {
    let default_filter = if debug {
        "movie_finder=debug,tower_http=debug"
    } else {
        "movie_finder=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        println!("No movies found.");
        return;
    }
    for movie in movies {
        println!(
            "{:>8}  {}  ({})",
            movie.id,
            movie.title().unwrap_or("<untitled>"),
            movie.release_date().unwrap_or("unknown"),
        );
    }
}

async fn run_command(args: Args) -> Result<(), AppError> {
    let mut config = Config::load(&args.config)?;
    config.debug_logs = args.debug;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => movie_finder::run(config, args.ephemeral).await,
        Command::Popular => {
            let catalog = movie_finder::catalog_client(&config)?;
            print_movies(&catalog.get_popular().await?);
            Ok(())
        }
        Command::Search { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                return Err(AppError::Usage("Search query is empty".to_string()));
            }
            let catalog = movie_finder::catalog_client(&config)?;
            print_movies(&catalog.search(&query).await?);
            Ok(())
        }
        Command::Favorites(cmd) => {
            let favorites = movie_finder::open_favorites(&config, args.ephemeral).await?;
            match cmd {
                FavoritesCommand::List => print_movies(&favorites.list().await),
                FavoritesCommand::Add { movie } => {
                    let movie: Movie = serde_json::from_str(&movie)
                        .map_err(|e| AppError::Usage(format!("Invalid movie JSON: {}", e)))?;
                    let id = movie.id;
                    if favorites.add(movie).await? {
                        println!("Added {}", id);
                    } else {
                        println!("{} is already a favorite", id);
                    }
                }
                FavoritesCommand::Remove { id } => {
                    if favorites.remove(id).await? {
                        println!("Removed {}", id);
                    } else {
                        println!("{} is not a favorite", id);
                    }
                }
                FavoritesCommand::Check { id } => {
                    println!("{}", favorites.is_favorite(id).await);
                }
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug, args.json_logs);

    if let Err(e) = run_command(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
