//! Dataconv CLI - Convert tabular files and edit XML attributes
//!
//! # Main Commands
//!
//! ```bash
//! dataconv convert input.csv output.json   # Convert between formats
//! dataconv read input.xlsx                 # Read a file and print JSON
//! dataconv formats                         # List supported conversions
//! ```
//!
//! # XML Commands
//!
//! ```bash
//! dataconv xml summary doc.xml                    # Show tags in a document
//! dataconv xml add-attr doc.xml item id auto      # Add an attribute to all <item>
//! dataconv xml del-attr doc.xml item id           # Remove an attribute from all <item>
//! ```

use clap::{Parser, Subcommand};
use dataconv::{
    add_attribute, convert, delete_attribute, parse_summary, read_file, supported_pairs,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dataconv")]
#[command(about = "Convert tabular files between formats and edit XML attributes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file into another format
    Convert {
        /// Input file (format taken from the extension)
        input: PathBuf,

        /// Output file (format taken from the extension)
        output: PathBuf,
    },

    /// Read a file and output its rows as JSON
    Read {
        /// Input file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or edit an XML document
    Xml {
        #[command(subcommand)]
        action: XmlAction,
    },

    /// List the supported conversion pairs
    Formats,
}

#[derive(Subcommand)]
enum XmlAction {
    /// Show the distinct tags of a document
    Summary {
        /// XML file
        input: PathBuf,
    },

    /// Add an attribute to every matching element under the root
    AddAttr {
        /// XML file (edited in place)
        input: PathBuf,
        /// Tag to match
        tag: String,
        /// Attribute name ("id" values are numbered automatically)
        attr: String,
        /// Attribute value
        value: String,
    },

    /// Remove an attribute from every matching element under the root
    DelAttr {
        /// XML file (edited in place)
        input: PathBuf,
        /// Tag to match
        tag: String,
        /// Attribute name
        attr: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => cmd_convert(&input, &output),

        Commands::Read { input, output } => cmd_read(&input, output.as_deref()),

        Commands::Xml { action } => cmd_xml(action),

        Commands::Formats => cmd_formats(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    let report = convert(input, output)?;

    eprintln!("   Rows: {}", report.rows);
    eprintln!("   Columns: {}", report.columns.join(", "));
    eprintln!("✅ {}", report);
    Ok(())
}

fn cmd_read(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reading: {}", input.display());

    let dataset = read_file(input)?;
    eprintln!("   Rows: {}", dataset.row_count());
    eprintln!("   Columns: {}", dataset.columns().join(", "));

    let json = serde_json::to_string_pretty(dataset.rows())?;
    write_output(&json, output)?;
    Ok(())
}

fn cmd_xml(action: XmlAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        XmlAction::Summary { input } => {
            let summary = parse_summary(&input)?;
            eprintln!("📄 {}", input.display());
            for tag in &summary.tags {
                println!("{}", tag);
            }
        }

        XmlAction::AddAttr {
            input,
            tag,
            attr,
            value,
        } => {
            let count = add_attribute(&input, &tag, &attr, &value)?;
            eprintln!("✅ Added '{}' to {} <{}> element(s)", attr, count, tag);
        }

        XmlAction::DelAttr { input, tag, attr } => {
            let count = delete_attribute(&input, &tag, &attr)?;
            eprintln!("✅ Removed '{}' from {} <{}> element(s)", attr, count, tag);
        }
    }

    Ok(())
}

fn cmd_formats() -> Result<(), Box<dyn std::error::Error>> {
    for (input, output) in supported_pairs() {
        println!("{} -> {}", input, output);
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
