//! Command line front end: collects label data and dispatches to the actions.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::labels::commands;
use crate::models::{BackgroundColor, LabelRequest, LogoSlot};
use crate::settings::DEFAULT_SETTINGS_FILE;
use crate::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Packaging labels with QR codes and a local history")]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// History database, overriding the settings file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Render a PNG preview of one label
    Preview {
        #[command(flatten)]
        label: LabelArgs,
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
    /// Save the label to history
    Save {
        #[command(flatten)]
        label: LabelArgs,
    },
    /// Write the label sheet PDF, optionally sending it to the printer
    Pdf {
        #[command(flatten)]
        label: LabelArgs,
        #[arg(short, long, default_value = "rotulos.pdf")]
        output: PathBuf,
        /// Production date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        print: bool,
    },
    /// List saved labels, newest first
    History,
    /// Print a saved label as JSON so it can be re-issued
    Reuse { id: i64 },
    /// Remove a saved label
    Delete { id: i64 },
    /// Export the history as an .xlsx workbook
    Export {
        #[arg(short, long, default_value = "historial.xlsx")]
        output: PathBuf,
    },
    /// Manage the two logo slots
    Logo {
        #[command(subcommand)]
        action: LogoCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum LogoCommand {
    /// Store an image file in a slot
    Set { slot: SlotArg, file: PathBuf },
    /// Write the stored image to a file
    Show {
        slot: SlotArg,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SlotArg {
    #[value(alias = "izquierdo")]
    Left,
    #[value(alias = "derecho")]
    Right,
}

impl From<SlotArg> for LogoSlot {
    fn from(value: SlotArg) -> Self {
        match value {
            SlotArg::Left => LogoSlot::Left,
            SlotArg::Right => LogoSlot::Right,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LabelArgs {
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub product: String,
    /// Units per package
    #[arg(long)]
    pub quantity: u32,
    /// Package number recorded in history
    #[arg(long, default_value_t = 1)]
    pub package: u32,
    /// Labels to print in the run
    #[arg(long)]
    pub total: u32,
    #[arg(long)]
    pub lot: String,
    #[arg(long)]
    pub order: String,
    /// white, green, red or blue (Spanish names accepted)
    #[arg(long, default_value = "white")]
    pub color: String,
}

impl LabelArgs {
    pub fn to_request(&self) -> LabelRequest {
        LabelRequest {
            client: self.client.trim().to_string(),
            product: self.product.trim().to_string(),
            quantity: self.quantity,
            package_index: self.package,
            total_count: self.total,
            lot_code: self.lot.trim().to_string(),
            purchase_order: self.order.trim().to_string(),
            background_color: BackgroundColor::from_name(&self.color),
        }
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let state = AppState::open(cli.config, cli.db)?;
    commands::seed_default_logos(&state)?;

    match cli.command {
        CliCommand::Preview { label, output } => {
            let png = commands::preview_label(&state, &label.to_request())?;
            fs::write(&output, png)?;
            println!("Preview written to {}", output.display());
        }
        CliCommand::Save { label } => {
            let record = commands::save_label(&state, &label.to_request())?;
            println!("Saved label #{}", record.id);
        }
        CliCommand::Pdf {
            label,
            output,
            date,
            print,
        } => {
            let request = label.to_request();
            let pdf = if print {
                let outcome = commands::print_labels(&state, &request, date)?;
                if let Some(warning) = &outcome.warning {
                    eprintln!("warning: {warning}");
                }
                outcome.pdf
            } else {
                commands::generate_label_pdf(&state, &request, date)?
            };
            fs::write(&output, pdf)?;
            println!(
                "{} labels written to {}",
                request.total_count,
                output.display()
            );
        }
        CliCommand::History => {
            for record in commands::list_history(&state)? {
                println!(
                    "#{:<5} {}  {} | {} | cant. {} | paq. {}/{} | lote {} | OC {} | {}",
                    record.id,
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.client,
                    record.product,
                    record.quantity,
                    record.package_index,
                    record.total_count,
                    record.lot_code,
                    record.purchase_order,
                    record.background_color,
                );
            }
        }
        CliCommand::Reuse { id } => match commands::reuse_from_history(&state, id)? {
            Some(request) => {
                let json =
                    serde_json::to_string_pretty(&request).map_err(std::io::Error::from)?;
                println!("{json}");
            }
            None => println!("No saved label #{id}"),
        },
        CliCommand::Delete { id } => {
            if commands::delete_history_entry(&state, id)? {
                println!("Deleted label #{id}");
            } else {
                println!("No saved label #{id}");
            }
        }
        CliCommand::Export { output } => {
            fs::write(&output, commands::export_history(&state)?)?;
            println!("History exported to {}", output.display());
        }
        CliCommand::Logo { action } => match action {
            LogoCommand::Set { slot, file } => {
                let bytes = fs::read(&file)?;
                commands::upload_logo(&state, slot.into(), &bytes)?;
                println!("Stored {} logo", LogoSlot::from(slot));
            }
            LogoCommand::Show { slot, output } => {
                let slot = LogoSlot::from(slot);
                match state.db.get_logo_asset(slot)? {
                    Some(asset) => {
                        fs::write(&output, &asset.image_bytes)?;
                        println!(
                            "{slot} logo (updated {}) written to {}",
                            asset.updated_at.format("%Y-%m-%d %H:%M"),
                            output.display()
                        );
                    }
                    None => println!("No {slot} logo stored"),
                }
            }
        },
    }

    Ok(())
}
