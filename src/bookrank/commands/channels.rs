use crate::commands::{ChannelEntry, CmdResult};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::metrics;
use crate::store::DataSource;
use log::warn;
use std::collections::HashMap;

use super::helpers::{books_or_empty, channels_or_empty};

/// The channel directory, in dataset order.
///
/// Appearance counts are joined on the channel name, which is free text: a
/// name spelled differently in the books file simply counts zero.
pub fn run<S: DataSource>(source: &S, config: &CatalogConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let channels = channels_or_empty(source, &mut result);
    let books = books_or_empty(source, &mut result);

    let counts: HashMap<String, usize> = metrics::channels_covered(&books)
        .into_iter()
        .map(|c| (c.name, c.count))
        .collect();

    let entries: Vec<ChannelEntry> = channels
        .into_iter()
        .map(|channel| {
            let appearances = counts.get(&channel.name).copied().unwrap_or(0);
            if appearances == 0 && !books.is_empty() {
                warn!("channel {:?} has no appearances in the books file", channel.name);
            }
            ChannelEntry {
                url: config.channel_url(&channel.channel_id),
                appearances,
                channel,
            }
        })
        .collect();

    Ok(result.with_channels(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Channel;
    use crate::model::fixtures::{appearance, book};
    use crate::store::memory::InMemorySource;

    fn channel(name: &str, id: &str) -> Channel {
        Channel {
            name: name.to_string(),
            channel_id: id.to_string(),
            subscribers: "10万人".to_string(),
            note: None,
        }
    }

    #[test]
    fn joins_appearance_counts_by_name() {
        let source = InMemorySource::new(
            vec![book(
                "a",
                "A",
                vec![
                    appearance("Reader", "2023-01-01", 0, 0),
                    appearance("Reader", "2023-01-02", 0, 0),
                ],
            )],
            vec![channel("Quiet", "UCq"), channel("Reader", "UCr")],
        );

        let result = run(&source, &CatalogConfig::default()).unwrap();
        assert_eq!(result.channels.len(), 2);
        assert_eq!(result.channels[0].channel.name, "Quiet");
        assert_eq!(result.channels[0].appearances, 0);
        assert_eq!(result.channels[1].appearances, 2);
        assert_eq!(
            result.channels[1].url,
            "https://www.youtube.com/channel/UCr"
        );
    }

    #[test]
    fn unavailable_dataset_yields_empty_directory() {
        let result = run(&InMemorySource::unavailable(), &CatalogConfig::default()).unwrap();
        assert!(result.unavailable);
        assert!(result.channels.is_empty());
        // Both loads fail but the warning is shown once
        assert_eq!(result.messages.len(), 1);
    }
}
