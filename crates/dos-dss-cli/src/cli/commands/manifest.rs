use std::io::Write;

use anyhow::Context;
use dos_bag::manifest::manifest_json;
use dos_bag::{BagClientConfig, BundleRef, DosClient, ManifestBuilder};

use crate::cli::args::{BundleSource, ManifestArgs};
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};

use super::bag_error_exit;

pub async fn run(args: ManifestArgs) -> anyhow::Result<i32> {
    let (builder, bundles) = match prepare(&args.source) {
        Ok(prepared) => prepared,
        Err(code) => return Ok(code),
    };

    let entries = match builder.build_manifest(&bundles).await {
        Ok(entries) => entries,
        Err(e) => return Ok(bag_error_exit(&e)),
    };

    let json = manifest_json(&entries).context("failed to render manifest")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} entries to {}", entries.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&json).context("failed to write manifest")?;
        }
    }
    Ok(SUCCESS)
}

/// Resolve the DOS client and the bundle list, or an exit code.
pub(crate) fn prepare(source: &BundleSource) -> Result<(ManifestBuilder, Vec<BundleRef>), i32> {
    let bundles = collect_bundles(source).map_err(|e| {
        eprintln!("error: {e:#}");
        CONFIG_ERROR
    })?;
    if bundles.is_empty() {
        eprintln!("error: no bundles given; use --bundle or --bundles-file");
        return Err(CONFIG_ERROR);
    }

    let mut config = BagClientConfig::from_env();
    if let Some(url) = &source.service_url {
        config = config.with_service_url(url.clone());
    }
    if let Some(base_path) = &source.dos_base_path {
        config = config.with_base_path(base_path.clone());
    }

    let client = DosClient::new(config).map_err(|e| bag_error_exit(&e))?;
    Ok((ManifestBuilder::new(client), bundles))
}

fn collect_bundles(source: &BundleSource) -> anyhow::Result<Vec<BundleRef>> {
    let mut bundles = source.bundles.clone();
    if let Some(path) = &source.bundles_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let from_file: Vec<BundleRef> = serde_json::from_str(&content)
            .with_context(|| format!("invalid bundle list in {}", path.display()))?;
        bundles.extend(from_file);
    }
    Ok(bundles)
}
