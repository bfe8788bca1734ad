//! Predecir CLI - mpg model training and serving
//!
//! # Commands
//!
//! - `train` - Fit the regression model and persist the serving artifacts
//! - `serve` - Start the prediction HTTP service

use clap::{Parser, Subcommand};
use predecir::error::Result;
use predecir::serve::ServeConfig;
use predecir::train::TrainConfig;

/// Predecir - vehicle fuel-efficiency prediction
#[derive(Parser)]
#[command(name = "predecir")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the mpg model from a CSV dataset
    ///
    /// Examples:
    ///   predecir train data/auto_mpg_clean.csv
    ///   predecir train data/auto_mpg_clean.csv --trees 200 --seed 7
    Train {
        /// Path to the training dataset (CSV with headers)
        #[arg(value_name = "DATASET", default_value = "data/auto_mpg_clean.csv")]
        dataset: String,

        /// Output path for the fitted model
        #[arg(long, default_value = "data/model.bin")]
        model: String,

        /// Output path for the feature-column list
        #[arg(long, default_value = "data/model_columns.json")]
        columns: String,

        /// Number of trees in the forest
        #[arg(long, default_value = "100")]
        trees: u16,

        /// Random seed for the split and the fit
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Start the prediction server
    ///
    /// Examples:
    ///   predecir serve
    ///   predecir serve --host 0.0.0.0 --port 9000
    Serve {
        /// Bind host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind port
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Path to the fitted model
        #[arg(long, default_value = "data/model.bin")]
        model: String,

        /// Path to the feature-column list
        #[arg(long, default_value = "data/model_columns.json")]
        columns: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            dataset,
            model,
            columns,
            trees,
            seed,
        } => {
            let config = TrainConfig {
                dataset_path: dataset.into(),
                model_path: model.into(),
                columns_path: columns.into(),
                n_trees: trees,
                seed,
            };
            predecir::train::run(&config)?;
        }
        Commands::Serve {
            host,
            port,
            model,
            columns,
        } => {
            let config = ServeConfig {
                host,
                port,
                model_path: model.into(),
                columns_path: columns.into(),
            };
            predecir::serve::run(&config).await?;
        }
    }

    Ok(())
}
