#[macro_use] extern crate clap;
#[macro_use] extern crate lazy_static;

pub mod error;
pub mod graphics;
pub mod harness;
pub mod interface;
pub mod render;
pub mod scene;

use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use interface::cli::{parse_args, variant_listing};

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

fn main() {
    let config = match parse_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    if config.list {
        println!("{}", variant_listing());
        return;
    }

    init_logging(config.log_level());

    if let Err(e) = harness::run(config.variant.scene()) {
        error!("{}", e);
        process::exit(-1);
    }
}
