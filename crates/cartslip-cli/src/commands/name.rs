//! Name command - run the unit parser and name cleaner on a product name.

use clap::Args;
use serde::Serialize;

use cartslip_core::invoice::rules::{clean_name, FieldExtractor, PackageSize, UnitExtractor, UnitTier};
use cartslip_core::models::invoice::Unit;

/// Arguments for the name command.
#[derive(Args)]
pub struct NameArgs {
    /// Raw product name, e.g. "Fortune Oil (1l) Pouch"
    #[arg(required = true)]
    text: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct NameReport {
    name: String,
    unit_value: f64,
    unit: Unit,
    tier: &'static str,
    /// Size token as matched in the lowercased name.
    matched: Option<String>,
    /// Byte range of the token in the lowercased name.
    position: Option<(usize, usize)>,
}

fn analyze(raw: &str) -> NameReport {
    let found = UnitExtractor::new().extract(raw);
    let (size, tier) = found
        .as_ref()
        .map(|m| (m.size.value, m.tier))
        .unwrap_or((PackageSize::default(), UnitTier::Default));

    NameReport {
        name: clean_name(raw),
        unit_value: size.value,
        unit: size.unit,
        tier: tier.as_str(),
        matched: found.as_ref().map(|m| m.size.source.clone()),
        position: found.and_then(|m| m.size.position),
    }
}

pub async fn run(args: NameArgs) -> anyhow::Result<()> {
    let report = analyze(&args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Name:  {}", report.name);
        println!("Value: {}", report.unit_value);
        println!("Unit:  {}", report.unit);
        println!("Tier:  {}", report.tier);
        match (&report.matched, report.position) {
            (Some(token), Some((start, end))) => {
                println!("Match: {:?} at {}..{}", token, start, end)
            }
            _ => println!("Match: none"),
        }
    }

    Ok(())
}
