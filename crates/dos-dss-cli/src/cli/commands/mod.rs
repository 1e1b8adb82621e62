use super::args::*;

pub mod bag;
pub mod manifest;
pub mod serve;

use crate::exit_codes::{CONFIG_ERROR, MANIFEST_VIOLATION, SUCCESS, UPSTREAM_ERROR};
use dos_bag::BagError;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Serve(args) => serve::run(args).await,
        Command::Manifest(args) => manifest::run(args).await,
        Command::Bag(args) => bag::run(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}

/// Report a bag-side failure and pick its exit code.
pub(crate) fn bag_error_exit(err: &BagError) -> i32 {
    eprintln!("error: {err}");
    if err.is_precondition() {
        return MANIFEST_VIOLATION;
    }
    match err {
        BagError::NotFound { .. }
        | BagError::Network { .. }
        | BagError::InvalidResponse { .. }
        | BagError::MissingSize { .. } => UPSTREAM_ERROR,
        _ => CONFIG_ERROR,
    }
}
