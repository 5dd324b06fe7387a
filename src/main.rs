use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use tpbscrape::{Category, Config, Criteria, Search};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> tpbscrape::Result<()> {
    let matches = Command::new("tpbscrape")
        .version(env!("CARGO_PKG_VERSION"))
        .about("command-line interface for the pirate bay search pages.")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .required(true)
                .help("Name you want to search for."),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .help("Select media type: all, audio, video, applications, games or other")
                .value_parser(|x: &str| x.parse::<Category>())
                .default_value("all"),
        )
        .arg(
            Arg::new("min-seeds")
                .long("min-seeds")
                .value_parser(value_parser!(u32))
                .default_value("30")
                .help("Minimum number of seeds"),
        )
        .arg(
            Arg::new("min-size")
                .long("min-size")
                .default_value("1 GiB")
                .help("Minimum size, e.g. 700 MiB"),
        )
        .arg(
            Arg::new("max-size")
                .long("max-size")
                .default_value("4 GiB")
                .help("Maximum size, e.g. 4 GiB"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Print every result, not only the best one"),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(ArgAction::SetTrue)
                .help("Fetch the description of the best result"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the best result as json"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("HOST")
                .help("Override the configured site host"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file location"),
        )
        .arg(
            Arg::new("v")
                .short('v')
                .action(ArgAction::Count)
                .help("Sets the level of verbosity"),
        )
        .get_matches();

    let level = match matches.get_count("v") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }

    let category = matches
        .get_one::<Category>("type")
        .copied()
        .unwrap_or_default();

    let criteria = Criteria::default()
        .min_seeds(*matches.get_one::<u32>("min-seeds").unwrap_or(&30))
        .min_size(matches.get_one::<String>("min-size").cloned().unwrap_or_default())
        .max_size(matches.get_one::<String>("max-size").cloned().unwrap_or_default());

    let search = Search::new(&config)?;
    let to_search = matches.get_one::<String>("name").cloned().unwrap_or_default();
    tracing::info!(name = %to_search, ?category, "searching");

    let torrents = search.search(&to_search, category).await?;
    println!("Found {}", torrents);

    if matches.get_flag("list") {
        for (idx, item) in torrents.iter().enumerate() {
            println!(
                "[{}] {} ({} {}/{}) Uploaded by: {}",
                idx,
                item.title(),
                item.size(),
                item.seeds(),
                item.leeches(),
                item.uploader()
            );
        }
    }

    let best = match torrents.best(&criteria)? {
        Some(x) => x,
        None => {
            println!("No torrents found given criteria");
            return Ok(());
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(best)?);
    } else {
        println!("{}", best);
        println!("{}", best.magnet());
    }

    if matches.get_flag("info") {
        println!("{}", best.info(&search).await?);
    }

    Ok(())
}
