//! Config subcommand - print the effective settings

use anyhow::Result;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    eprintln!("\n{}", settings_table(config));
    Ok(())
}

fn settings_table(config: &Config) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec!["Input file", &config.paths.input.display().to_string()]);
    table.add_row(vec![
        "Output file",
        &config.paths.output.display().to_string(),
    ]);
    table.add_row(vec!["S2 batch URL", &config.s2.batch_url]);
    table.add_row(vec!["Batch size", &config.s2.batch_size.to_string()]);
    table.add_row(vec![
        "S2 API key",
        if config.s2.api_key.is_some() {
            "configured"
        } else {
            "not set"
        },
    ]);
    table.add_row(vec![
        "Timeout",
        &match config.http.timeout_secs {
            Some(secs) => format!("{secs}s"),
            None => "none".to_string(),
        },
    ]);
    table
}
