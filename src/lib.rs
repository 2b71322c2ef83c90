//! # SQA CLI
//!
//! Command-line front end for stock analysis: lists the available TA-Lib
//! indicators and shows a ticker's recent prices with indicator columns,
//! as a terminal table and optionally as CSV.
//!
//! ## Example
//! ```no_run
//! use sqa_cli::commands::Context;
//! use sqa_cli::data::FileSource;
//! use sqa_cli::dispatcher::Dispatcher;
//! use sqa_cli::talib::IndicatorRegistry;
//!
//! let context = Context::new(Box::new(FileSource::new("sqa_data")), IndicatorRegistry::talib());
//! let args: Vec<String> = vec!["show".into(), "-t".into(), "aapl".into(), "-i".into(), "sma,rsi".into()];
//!
//! let status = Dispatcher::new(context).run(&args, &mut std::io::stdout(), &mut std::io::stderr());
//! assert_eq!(status, 0);
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod data;
pub mod dispatcher;
pub mod error;
pub mod render;
pub mod resolver;
pub mod rows;
pub mod talib;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{CliError, Result};

/// Crate version reported by `sqa-cli version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
