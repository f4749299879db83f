use crate::commands::{CmdMessage, CmdResult};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::links;

pub fn run(config: &CatalogConfig, code: &str) -> Result<CmdResult> {
    let link = links::associate_link(code, config)?;
    let mut result = CmdResult::default();
    if config.associate_tag.is_none() {
        result.add_message(CmdMessage::info(
            "No associate_tag configured; the link is untagged.",
        ));
    }
    Ok(result.with_link(link))
}
