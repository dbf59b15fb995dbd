//! # Options CLI — Print the option catalogs.
//!
//! ```bash
//! rforge options
//! rforge options --json
//! ```

use anyhow::Result;
use clap::Args;
use rforge_client::ForgeClient;
use rforge_core::TemplateOptions;

/// Arguments for `rforge options`.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Print the catalogs as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Plain-text rendering of the catalogs.
pub fn render(options: &TemplateOptions) -> String {
    let mut out = String::new();
    let mut list = |title: &str, items: &[String]| {
        out.push_str(title);
        out.push_str(":\n");
        for item in items {
            out.push_str("  - ");
            out.push_str(item);
            out.push('\n');
        }
    };
    list("Infrastructure environments", &options.infrastructure_options);
    list("Severity levels", &options.severity_levels);
    list("Communication channels", &options.communication_channels);

    out.push_str("Output formats:\n");
    for format in &options.output_formats {
        out.push_str(&format!("  - {:<6} {}\n", format.value, format.label));
    }
    out
}

/// Execute the options subcommand. Falls back to the built-in catalog.
pub async fn run_options(args: &OptionsArgs, client: &ForgeClient) -> Result<u8> {
    let options = client.options().fetch_or_default().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", render(&options));
    }
    Ok(0)
}
