//! Handler for `aosm config`.

use crate::cli::{ConfigAction, OutputFormat};
use anyhow::Result;
use aosm_store::ConfigStore;

use super::resources::print_mutation;
use super::{print_json, read_content};

/// Handle `aosm config ...`.
pub(crate) fn handle_config_command(
    store: &ConfigStore,
    action: ConfigAction,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let doc = store.read()?;
            if format.is_json() {
                return print_json(&doc);
            }
            match doc {
                Some(doc) => print!("{}", serde_yaml::to_string(&doc)?),
                None => println!("No config at {}", store.path()?.display()),
            }
            Ok(())
        }
        ConfigAction::Write { file } => {
            let text = read_content(&file)?;
            let path = store.write_raw(&text)?;
            print_mutation("wrote", &path, format)
        }
    }
}
