//! Stateless helpers: date formatting and option lists

use crate::cli::args::{DateArgs, OptionSet, OptionsArgs, OutputFormat};
use crate::error::PortalResult;
use crate::helpers::{date_to_str, ControlTime, CreditRange, OptionItem};

/// Execute the date command
pub async fn date(args: DateArgs) -> PortalResult<()> {
    println!("{}", date_to_str(&args.value));
    Ok(())
}

/// Execute the options command
pub async fn options(args: OptionsArgs) -> PortalResult<()> {
    match args.format {
        OutputFormat::Json => {
            let json = match args.set {
                OptionSet::CreditRange => serde_json::to_string_pretty(&CreditRange::all())?,
                OptionSet::ControlTime => serde_json::to_string_pretty(&ControlTime::all())?,
            };
            println!("{}", json);
        }
        OutputFormat::Table => {
            for item in option_items(args.set) {
                println!("{:>3}  {}", item.key, item.label);
            }
        }
    }

    Ok(())
}

fn option_items(set: OptionSet) -> Vec<OptionItem> {
    match set {
        OptionSet::CreditRange => CreditRange::all().into_iter().map(Into::into).collect(),
        OptionSet::ControlTime => ControlTime::all().into_iter().map(Into::into).collect(),
    }
}
