use std::path::Path;

use anyhow::{Context, bail};
use riv_core::worklist::{build_worklist, parse_extra_ids};
use riv_core::{ScanResult, ZoneStatus};
use riv_gateway::{ContainerSource, MemorySource};
use riv_scan::{BatchScanner, CddResolution, CddResolver, ScanSummary};
use serde::Serialize;

use crate::cli::root_commands::ScanArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::NO_SESSION_HELP;
use crate::context::AppContext;
use crate::output::{Tabular, output, output_rows};
use crate::progress::{ScanProgress, Spinner};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanResponse {
    deep: bool,
    summary: ScanSummary,
    cdd: Option<CddResolution>,
    results: Vec<ScanResult>,
}

#[derive(Serialize)]
struct ZoneRow<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    #[serde(skip)]
    deep: bool,
}

impl Tabular for ZoneRow<'_> {
    const HEADERS: &'static [&'static str] = &["zone", "status", "pallets", "units", "category", "error"];

    fn cells(&self) -> Vec<String> {
        let active = self.result.status == ZoneStatus::Active;
        vec![
            self.result.zone_id.clone(),
            self.result.status.to_string(),
            if active {
                self.result.pallet_count.to_string()
            } else {
                "-".to_string()
            },
            if active && self.deep {
                self.result.unit_count.to_string()
            } else {
                "-".to_string()
            },
            self.result.sortation_category.clone(),
            self.result.error.clone().unwrap_or_default(),
        ]
    }
}

/// Handle `riv scan`.
pub async fn handle(args: &ScanArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let extras = args
        .zones
        .iter()
        .flat_map(|text| parse_extra_ids(text))
        .collect::<Vec<_>>();
    let zones = build_worklist(&args.segments, &extras);
    if zones.is_empty() {
        bail!("nothing to scan: pass --segment PREFIX:START-END or --zone ID");
    }

    if let Some(fixture) = &args.fixture {
        let source = MemorySource::from_fixture_file(Path::new(fixture))
            .with_context(|| format!("failed to load fixture {fixture}"))?;
        return run(&source, &zones, args, ctx, flags).await;
    }

    if !ctx.session.is_valid() {
        bail!(NO_SESSION_HELP);
    }
    let gateway = ctx.gateway()?;
    run(&gateway, &zones, args, ctx, flags).await
}

async fn run<S: ContainerSource>(
    source: &S,
    zones: &[String],
    args: &ScanArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scanner = BatchScanner::new(source, ctx.scan_settings())
        .with_destinations(ctx.config.destinations.clone());

    let progress = ScanProgress::start(
        zones.len(),
        scanner.settings().batch_size(args.deep),
        args.deep,
    );
    let report = match scanner
        .scan(zones, args.deep, |done, total| progress.batch_done(done, total))
        .await
    {
        Ok(report) => report,
        Err(error) => {
            progress.abandon("already running");
            return Err(error.into());
        }
    };
    progress.finish();

    let summary = ScanSummary::from_results(&report.results, &ctx.config.destinations);
    let cdd = if args.deep && !args.no_cdd && !report.cdd_candidates.is_empty() {
        let spinner = Spinner::start("verifying Clean Decant Dates");
        let resolution = CddResolver::new(source).resolve(&report.cdd_candidates).await;
        spinner.finish();
        resolution
    } else {
        None
    };

    if flags.format != OutputFormat::Table {
        return output(
            &ScanResponse {
                deep: report.deep,
                summary,
                cdd,
                results: report.results,
            },
            flags.format,
        );
    }

    let rows = report
        .results
        .iter()
        .map(|result| ZoneRow {
            result,
            deep: report.deep,
        })
        .collect::<Vec<_>>();
    output_rows(&rows, flags.format)?;
    println!();
    output(&summary, flags.format)?;
    if let Some(cdd) = &cdd {
        println!();
        output(cdd, flags.format)?;
    } else if args.deep && !args.no_cdd {
        println!("\nno Clean Decant Date available");
    }
    Ok(())
}
