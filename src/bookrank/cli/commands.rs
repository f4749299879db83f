//! # CLI Layer
//!
//! This module is **one possible UI client** for bookrank. It is the only
//! place that parses arguments, installs the logger, prints, and decides exit
//! codes.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves configuration and builds the API
//! - `handle_*()`: Per-command handlers that call the API and print rendered output
//!
//! A missing or broken dataset is not an error here: the command layer
//! returns an empty result with a warning and the process exits 0. Only
//! genuine failures (a bad config file, an unusable product code) come back
//! as `Err` and end in `Error: …` with exit status 1.

use super::render::{print_messages, render_book, render_channels, render_listing, render_stats};
use super::setup::{
    BrowseCommands, CatalogueCommands, Cli, Commands, ListArgs, MiscCommands, print_grouped_help,
    print_help_for_command, print_subcommand_help,
};
use bookrank::api::CatalogApi;
use bookrank::config::{CatalogConfig, DATA_DIR_ENV};
use bookrank::error::{CatalogError, Result};
use bookrank::store::fs::FileSource;
use bookrank::view_state::ViewState;
use clap::Parser;
use log::{debug, info};
use std::path::{Path, PathBuf};

struct AppContext {
    api: CatalogApi<FileSource>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Browse(cmd)) => match cmd {
            BrowseCommands::List(args) => handle_list(&ctx, &args),
            BrowseCommands::Show { id } => handle_show(&ctx, &id),
        },
        Some(Commands::Catalogue(cmd)) => match cmd {
            CatalogueCommands::Channels => handle_channels(&ctx),
            CatalogueCommands::Stats => handle_stats(&ctx),
            CatalogueCommands::Link { code } => handle_link(&ctx, &code),
        },
        Some(Commands::Misc(MiscCommands::Help { .. })) => Ok(()),
        None => handle_list(&ctx, &ListArgs::default()),
    }
}

/// `warn` by default, `info` with `-v`, `debug` with `-vv`; `RUST_LOG` wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let config = resolve_config(cli, &cwd, env_data_dir)?;
    info!("reading dataset from {}", config.data_dir.display());

    let source = FileSource::from_config(&config);
    let use_color = !cli.no_color && console::colors_enabled();

    Ok(AppContext {
        api: CatalogApi::new(source, config),
        use_color,
    })
}

/// Picks the config file (`--config`, else discovery) and applies the data
/// directory overrides, `--data` taking precedence over the environment.
fn resolve_config(
    cli: &Cli,
    cwd: &Path,
    env_data_dir: Option<PathBuf>,
) -> Result<CatalogConfig> {
    let config = match cli.config.as_deref() {
        Some(path) => {
            let path = cwd.join(path);
            if !path.exists() {
                return Err(CatalogError::Api(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            load_anchored(&path, cwd)?
        }
        None => match CatalogConfig::discover(cwd) {
            Some(path) => load_anchored(&path, cwd)?,
            None => CatalogConfig::default().anchored_at(cwd),
        },
    };

    let data_dir = cli.data.clone().or(env_data_dir);
    Ok(match data_dir {
        Some(dir) => config.with_data_dir(cwd.join(dir)),
        None => config,
    })
}

fn load_anchored(path: &Path, cwd: &Path) -> Result<CatalogConfig> {
    debug!("loading config from {}", path.display());
    let base = path.parent().unwrap_or(cwd);
    Ok(CatalogConfig::load(path)?.anchored_at(base))
}

/// Builds the view state for `list`: the `--url` state first, then each flag
/// given on top of it as a transition.
fn state_from_args(args: &ListArgs) -> ViewState {
    let mut state = args
        .url
        .as_deref()
        .map(|url| ViewState::decode(query_part(url)))
        .unwrap_or_default();

    if let Some(sort) = args.sort {
        state = state.with_sort(sort.into());
    }
    if let Some(query) = &args.query {
        state = state.with_query(query.clone());
    }
    if let Some(year) = args.year {
        state = state.with_year(Some(year));
    }
    if let Some(channel) = &args.channel {
        state = state.with_channel(Some(channel.clone()));
    }
    if let Some(page) = args.page {
        state = state.with_page(page);
    }
    state
}

/// The query string of a full link, or the input itself when it has no `?`.
fn query_part(url: &str) -> &str {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((_, query)) => query,
        None => url,
    }
}

fn handle_list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let state = state_from_args(args);
    let result = ctx.api.list(&state)?;
    if let Some(listing) = &result.listing {
        print!(
            "{}",
            render_listing(
                listing,
                &state,
                result.facets.as_ref(),
                result.unavailable,
                ctx.use_color
            )
        );
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show(id)?;
    if let Some(detail) = &result.book {
        print!("{}", render_book(detail, ctx.use_color));
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_channels(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.channels()?;
    print!("{}", render_channels(&result.channels, ctx.use_color));
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let (Some(summary), Some(facets)) = (&result.summary, &result.facets) {
        print!("{}", render_stats(summary, facets, ctx.use_color));
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

fn handle_link(ctx: &AppContext, code: &str) -> Result<()> {
    let result = ctx.api.link(code)?;
    if let Some(link) = &result.link {
        println!("{}", link);
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookrank::view_state::SortMode;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn list_args(args: &[&str]) -> ListArgs {
        match parse(args).command {
            Some(Commands::Browse(BrowseCommands::List(list))) => list,
            other => panic!("not a list command: {:?}", other),
        }
    }

    #[test]
    fn flags_build_the_state() {
        let state = state_from_args(&list_args(&[
            "bookrank", "list", "--sort", "likes", "--year", "2022", "--page", "3",
        ]));
        assert_eq!(state.sort, SortMode::Likes);
        assert_eq!(state.year, Some(2022));
        assert_eq!(state.page, 3);
    }

    #[test]
    fn url_is_the_base_state() {
        let state = state_from_args(&list_args(&[
            "bookrank",
            "list",
            "--url",
            "https://example.com/?sort=views&page=4&q=deep+work#top",
        ]));
        assert_eq!(state.sort, SortMode::Views);
        assert_eq!(state.page, 4);
        assert_eq!(state.query, "deep work");
    }

    #[test]
    fn flags_override_the_url_and_reset_its_page() {
        let state = state_from_args(&list_args(&[
            "bookrank", "list", "--url", "?sort=views&page=4", "--sort", "count",
        ]));
        assert_eq!(state.sort, SortMode::Count);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn query_part_accepts_bare_queries() {
        assert_eq!(query_part("sort=likes"), "sort=likes");
        assert_eq!(query_part("?sort=likes"), "sort=likes");
        assert_eq!(query_part("/ranking?page=2#x"), "page=2");
    }

    #[test]
    fn data_flag_beats_environment_and_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bookrank.json"),
            r#"{"data_dir": "site/data", "associate_tag": "shelf-22"}"#,
        )
        .unwrap();

        let discovered = resolve_config(&parse(&["bookrank"]), dir.path(), None).unwrap();
        assert_eq!(discovered.data_dir, dir.path().join("site/data"));
        assert_eq!(discovered.associate_tag.as_deref(), Some("shelf-22"));

        let from_env =
            resolve_config(&parse(&["bookrank"]), dir.path(), Some("/srv/env".into())).unwrap();
        assert_eq!(from_env.data_dir, PathBuf::from("/srv/env"));

        let from_flag = resolve_config(
            &parse(&["bookrank", "--data", "/srv/flag"]),
            dir.path(),
            Some("/srv/env".into()),
        )
        .unwrap();
        assert_eq!(from_flag.data_dir, PathBuf::from("/srv/flag"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["bookrank", "--config", "nope.json"]);
        assert!(matches!(
            resolve_config(&cli, dir.path(), None),
            Err(CatalogError::Api(_))
        ));
    }
}
