use clap::{Parser, Subcommand};

pub mod bag;
pub mod serve;
pub use bag::*;
pub use serve::*;

#[derive(Parser, Debug)]
#[command(
    name = "dos-dss",
    version,
    about = "GA4GH Data Object Service over the DSS storage API, plus remote-file bag building"
)]
pub struct Cli {
    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the DOS API, translating each call to the DSS API
    Serve(ServeArgs),
    /// Write a remote-file manifest for one or more data bundles
    Manifest(ManifestArgs),
    /// Build a BagIt bag that fetches the bundles' files remotely
    Bag(BagArgs),
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bag_args() {
        let cli = Cli::try_parse_from([
            "dos-dss",
            "bag",
            "--service-url",
            "http://localhost:8000",
            "--bundle",
            "b1",
            "--bundle",
            "b2.v2",
            "--algorithm",
            "sha256",
            "--algorithm",
            "md5",
            "--out",
            "my-bag",
        ])
        .unwrap();

        let Command::Bag(args) = cli.cmd else {
            panic!("expected bag command");
        };
        assert_eq!(args.source.bundles.len(), 2);
        assert_eq!(args.source.bundles[1].version.as_deref(), Some("v2"));
        assert_eq!(args.algorithms.len(), 2);
        assert_eq!(args.out.to_str(), Some("my-bag"));
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        let result = Cli::try_parse_from([
            "dos-dss",
            "bag",
            "--bundle",
            "b1",
            "--algorithm",
            "crc32c",
            "--out",
            "my-bag",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["dos-dss", "serve"]).unwrap();
        let Command::Serve(args) = cli.cmd else {
            panic!("expected serve command");
        };
        assert_eq!(args.base_path, "/ga4gh/dos/v1");
    }
}
