use dos_bag::BagOptions;

use crate::cli::args::BagArgs;
use crate::exit_codes::SUCCESS;

use super::bag_error_exit;
use super::manifest::prepare;

pub async fn run(args: BagArgs) -> anyhow::Result<i32> {
    let (builder, bundles) = match prepare(&args.source) {
        Ok(prepared) => prepared,
        Err(code) => return Ok(code),
    };
    let options = BagOptions::default().with_algorithms(args.algorithms);

    match builder.make_bag(&bundles, &args.out, &options).await {
        Ok(summary) => {
            eprintln!(
                "Created bag {} ({} files, Payload-Oxum {})",
                summary.path.display(),
                summary.entries,
                summary.payload_oxum()
            );
            Ok(SUCCESS)
        }
        Err(e) => Ok(bag_error_exit(&e)),
    }
}
