use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use tapeprobe_client::TapeRenderer;
use tapeprobe_wire::StateRecord;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered tape text.
    Text,
    Json,
    Table,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    state: u8,
    head_location: u8,
    cells: &'a [u8],
    rendered: String,
}

/// Print one decoded record in the selected format.
pub fn print_record(record: &StateRecord, renderer: &TapeRenderer, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", renderer.render(record));
        }
        OutputFormat::Json => {
            let out = RecordOutput {
                state: record.state,
                head_location: record.head_location,
                cells: &record.cells,
                rendered: renderer.render(record),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["STATE", "HEAD", "CELLS"])
                .add_row(vec![
                    record.state.to_string(),
                    record.head_location.to_string(),
                    cells_preview(&record.cells),
                ]);
            println!("{table}");
        }
    }
}

fn cells_preview(cells: &[u8]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
