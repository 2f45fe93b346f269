use anyhow::Context;
use riv_core::Container;
use riv_gateway::FetchOptions;
use serde::Serialize;

use crate::cli::root_commands::ContainerArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::NO_SESSION_HELP;
use crate::context::AppContext;
use crate::output::{Tabular, output, output_rows};
use crate::progress::Spinner;

#[derive(Serialize)]
struct ChildRow<'a>(&'a Container);

impl Tabular for ChildRow<'_> {
    const HEADERS: &'static [&'static str] = &["id", "type", "children", "category", "cdd"];

    fn cells(&self) -> Vec<String> {
        let child = self.0;
        vec![
            child.container_id.clone(),
            child.container_type.clone().unwrap_or_else(|| "-".into()),
            child
                .unit_hint()
                .map_or_else(|| "-".into(), |count| count.to_string()),
            child.categories().collect::<Vec<_>>().join(", "),
            child.clean_decant_date().unwrap_or("-").to_string(),
        ]
    }
}

/// Handle `riv container`.
pub async fn handle(args: &ContainerArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.session.is_valid() {
        tracing::warn!("{NO_SESSION_HELP}; sending placeholder identifiers");
    }
    let gateway = ctx.gateway()?;

    let spinner = Spinner::start(format!("fetching {}", args.id));
    let fetched = gateway.fetch(&args.id, FetchOptions::default()).await;
    spinner.finish();
    let container = fetched.with_context(|| format!("failed to fetch container {}", args.id))?;

    if flags.format != OutputFormat::Table {
        return output(&container, flags.format);
    }

    let rows = container.children().iter().map(ChildRow).collect::<Vec<_>>();
    output_rows(&rows, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn child_rows_show_counts_categories_and_dates() {
        let tote: Container = serde_json::from_value(json!({
            "containerId": "TOTE-1",
            "containerType": "TOTE",
            "numOfChildContainers": 14,
            "sortationCategories": ["SC-FAST", "N/A"],
            "containerProperties": {"cleanDecantDate": "07-05-2025 02:07"}
        }))
        .unwrap();

        assert_eq!(
            ChildRow(&tote).cells(),
            vec!["TOTE-1", "TOTE", "14", "SC-FAST, N/A", "07-05-2025 02:07"]
        );
        assert_eq!(
            ChildRow(&Container::default()).cells(),
            vec!["", "-", "-", "", "-"]
        );
    }
}
