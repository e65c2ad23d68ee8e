//! Terminal front end for the demon catalog.
//!
//! Builds one `BrowserState` from the command line, runs the filter over the
//! full catalog, and prints the resulting cards, the contract dialog for a
//! single demon, or one of the informational sections. The catalog comes from
//! `--catalog`, then `DEMON_CATALOG_PATH`, then the embedded copy.

use anyhow::{Context, Result, anyhow, bail};
use black_deal::render::{
    render_detail, render_header, render_ndjson, render_page, render_section,
};
use black_deal::{
    BrowserState, CatalogPage, DemonId, RatingRange, Section, TypeSelector, load_catalog,
    resolve_catalog_source,
};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("demon-catalog: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let source = resolve_catalog_source(cli.catalog_path.as_deref());
    let index = load_catalog(&source)?;

    if cli.list_types {
        for option in BrowserState::type_options(index.types()) {
            println!("{}", option.as_str());
        }
        return Ok(());
    }

    if let Some(id) = cli.show {
        let demon = index
            .demon(id)
            .ok_or_else(|| anyhow!("no demon with id {id} in catalog {}", index.key().0))?;
        print!("{}", render_detail(index.metadata(), demon)?);
        return Ok(());
    }

    let mut state = BrowserState::default().with_section(cli.section);
    if let Some(search) = cli.search {
        state = state.with_search(search);
    }
    if let Some(range) = cli.power {
        state = state.with_power(range);
    }
    if let Some(range) = cli.danger {
        state = state.with_danger(range);
    }
    if let Some(selector) = cli.kind {
        state = state.with_type(selector);
    }
    debug!(?state, "browser state");

    if cli.json {
        let page = state.page(index.demons());
        print!("{}", render_ndjson(page.demons())?);
        return Ok(());
    }

    print!("{}", render_header(index.metadata(), state.section()));
    println!();
    match state.section() {
        Section::Catalog => {
            let criteria = state.criteria();
            println!(
                "Поиск: \"{}\"  Тип: {}  Уровень силы: {}  Уровень опасности: {}",
                criteria.search,
                criteria.kind.as_str(),
                criteria.power,
                criteria.danger
            );
            println!();
            let page = state.page(index.demons());
            if let CatalogPage::Matches(demons) = &page {
                println!("Найдено: {}\n", demons.len());
            }
            print!("{}", render_page(index.metadata(), &page)?);
        }
        other => print!("{}", render_section(other)?),
    }
    Ok(())
}

struct Cli {
    catalog_path: Option<PathBuf>,
    search: Option<String>,
    power: Option<RatingRange>,
    danger: Option<RatingRange>,
    kind: Option<TypeSelector>,
    section: Section,
    show: Option<DemonId>,
    json: bool,
    list_types: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut cli = Cli {
            catalog_path: None,
            search: None,
            power: None,
            danger: None,
            kind: None,
            section: Section::default(),
            show: None,
            json: false,
            list_types: false,
        };

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => {
                    let path = PathBuf::from(next_value("--catalog", &mut args)?);
                    if path.as_os_str().is_empty() {
                        bail!("--catalog must not be empty");
                    }
                    cli.catalog_path = Some(path);
                }
                "--search" => cli.search = Some(next_value("--search", &mut args)?),
                "--power" => {
                    let raw = next_value("--power", &mut args)?;
                    cli.power = Some(RatingRange::parse(&raw).context("--power")?);
                }
                "--danger" => {
                    let raw = next_value("--danger", &mut args)?;
                    cli.danger = Some(RatingRange::parse(&raw).context("--danger")?);
                }
                "--type" => {
                    cli.kind = Some(TypeSelector::parse(&next_value("--type", &mut args)?));
                }
                "--section" => {
                    cli.section = Section::parse(&next_value("--section", &mut args)?)?;
                }
                "--show" => {
                    let raw = next_value("--show", &mut args)?;
                    let id = raw
                        .trim()
                        .parse::<u32>()
                        .with_context(|| format!("--show expects a numeric id, got '{raw}'"))?;
                    cli.show = Some(DemonId(id));
                }
                "--json" => cli.json = true,
                "--list-types" => cli.list_types = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(cli)
    }
}

fn next_value(flag: &str, args: &mut env::ArgsOs) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    value
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: demon-catalog [--catalog PATH] [--search TEXT] [--power MIN-MAX] [--danger MIN-MAX]\n                     [--type TYPE|all] [--section NAME] [--show ID] [--json] [--list-types]\n\nOptions:\n  --catalog PATH            Load an alternate catalog (or set DEMON_CATALOG_PATH).\n  --search TEXT             Case-insensitive substring of the demon name.\n  --power MIN-MAX           Inclusive power range (default 1-5); a single N means N-N.\n  --danger MIN-MAX          Inclusive danger range (default 1-4); a single N means N-N.\n  --type TYPE               Exact demon type, or 'all' (default).\n  --section NAME            catalog (default), about, contracts, or contact.\n  --show ID                 Print the contract dialog for one demon.\n  --json                    Print matching demons as NDJSON.\n  --list-types              Print the type selector entries.\n  --help                    Show this help text.\n\nLogging is controlled by RUST_LOG (default: warn)."
    );
    std::process::exit(code);
}
