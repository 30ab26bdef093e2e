// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use jewelbench_app::{
    ClientDirectory, ClientSortKey, ClientStore, MemoryClientStore, MemoryImageStore,
    SortDirection,
};
use runtime::{JsonClientStore, JsonTicketPrinter, OrderDraft};
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    init_tracing();
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if env_flag("JEWELBENCH_LOG_JSON") {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init();
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `jewelbench --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    if options.demo {
        if options.print_clients_path {
            println!(":memory:");
            return Ok(());
        }
        return serve(&options, &config, &mut MemoryClientStore::with_demo_clients());
    }

    let clients_path = config.clients_path()?;
    if options.print_clients_path {
        println!("{}", clients_path.display());
        return Ok(());
    }
    serve(&options, &config, &mut JsonClientStore::new(clients_path))
}

fn serve(options: &CliOptions, config: &Config, store: &mut impl ClientStore) -> Result<()> {
    let mut directory = ClientDirectory::load(&*store).context(
        "load clients -- if the clients file is wrong, set [storage].clients_path or JEWELBENCH_CLIENTS_PATH",
    )?;
    tracing::debug!(clients = directory.len(), "client directory loaded");
    if options.check_only {
        return Ok(());
    }

    if let Some(draft_path) = &options.submit {
        let draft = OrderDraft::read(draft_path)?;
        let mut printer = JsonTicketPrinter::new(std::io::stdout().lock(), config.shop_name());
        let order = runtime::submit_draft(
            &draft,
            &mut directory,
            store,
            &mut MemoryImageStore::default(),
            &mut printer,
            OffsetDateTime::now_utc().date(),
        )?;
        eprintln!("{}", runtime::render_order_summary(&order));
        return Ok(());
    }

    let mut sort = config.client_sort();
    if let Some(key) = options.sort_key {
        sort.key = key;
    }
    if options.descending {
        sort.direction = SortDirection::Desc;
    }
    let rows = directory.view(options.search.as_deref().unwrap_or(""), sort);
    print!("{}", runtime::render_client_table(config.shop_name(), &rows));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_clients_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    search: Option<String>,
    sort_key: Option<ClientSortKey>,
    descending: bool,
    submit: Option<PathBuf>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_clients_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        search: None,
        sort_key: None,
        descending: false,
        submit: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_clients_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--search" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--search requires a term"))?;
                options.search = Some(value.as_ref().to_owned());
            }
            "--sort" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--sort requires one of name, last_repair, total_repairs")
                })?;
                let key = ClientSortKey::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown sort key {:?}; use name, last_repair, or total_repairs",
                        value.as_ref()
                    )
                })?;
                options.sort_key = Some(key);
            }
            "--desc" => {
                options.descending = true;
            }
            "--submit" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--submit requires a draft JSON path"))?;
                options.submit = Some(PathBuf::from(value.as_ref()));
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("jewelbench");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved clients file path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use the built-in demo clients (in-memory)");
    println!("  --check                  Validate config and client data, then exit");
    println!("  --search <term>          Filter clients by name, mobile, or email");
    println!("  --sort <key>             Sort by name, last_repair, or total_repairs");
    println!("  --desc                   Sort descending");
    println!("  --submit <draft.json>    Validate a repair order and print its ticket");
    println!("  --help                   Show this help");
}
