use std::future::Future;
use std::sync::{Arc, atomic::AtomicBool};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::info_span;

use crate::commands::{ApiArgs, DiscoverArgs};
use crate::{mprint, terminal::{colors, format, input::{self, Choice}, print, spinner}};
use compass_common::{company::Company, config::Config, error, info, query::SearchQuery, success, warn};
use compass_core::error::DiscoveryError;
use compass_core::export;
use compass_core::prompt::ModelChoice;
use compass_core::provider::GeminiProvider;
use compass_core::session::DiscoverySession;

pub async fn discover(args: DiscoverArgs, api: &ApiArgs, cfg: &Config) -> anyhow::Result<()> {
    let query: SearchQuery = args.to_query()?;
    let provider: GeminiProvider = build_provider(api)?;
    let mut session = DiscoverySession::new(Box::new(provider));

    print_query(&query, cfg);

    let start_time: Instant = Instant::now();
    let message = spinner::scanning_message(&query.domain);
    with_spinner(message, session.generate(query.clone())).await?;

    if !args.json {
        first_page_ends(session.companies(), cfg);
    }

    load_more_pages(&mut session, &args, cfg).await;

    if args.json {
        let json = serde_json::to_string_pretty(session.companies())?;
        println!("{json}");
    }

    print_summary(session.companies().len(), start_time.elapsed(), cfg);

    if let Some(dir) = &args.csv {
        export_results(session.companies(), &query.domain, dir)?;
    }

    Ok(())
}

fn build_provider(api: &ApiArgs) -> anyhow::Result<GeminiProvider> {
    let api_key: String = api.resolve_api_key().ok_or(DiscoveryError::MissingApiKey)?;
    let provider = GeminiProvider::new(api_key).context("building HTTP client")?;

    Ok(match &api.api_base {
        Some(base) => provider.with_base_url(base.as_str()),
        None => provider,
    })
}

/// Runs `task` while a spinner with `message` is shown.
async fn with_spinner<F: Future>(message: String, task: F) -> F::Output {
    let span = info_span!("request", indicatif.pb_show = true);
    let guard = span.enter();

    let running: Arc<AtomicBool> = Arc::new(AtomicBool::new(true));
    let spinner_handle = spinner::start_spinner(span.clone(), running.clone(), message);

    let output = task.await;

    spinner::stop_spinner(&running, spinner_handle);
    drop(guard);
    output
}

fn print_query(query: &SearchQuery, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let model = ModelChoice::for_query(query);
    let rows: [(&str, String); 4] = [
        ("Industry", query.domain.clone()),
        ("Location", query.location.to_string()),
        ("Statuses", query.statuses_label()),
        ("Model", model.model_name().to_string()),
    ];
    let key_width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    print::section("getting ready for discovery", cfg);
    for (key, value) in rows {
        print::field(key, key_width, value);
    }
}

fn first_page_ends(companies: &[Company], cfg: &Config) {
    if companies.is_empty() {
        no_companies_found(cfg);
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::section("discovered companies", cfg);
    print_companies(companies, 0, cfg);
}

fn no_companies_found(cfg: &Config) {
    print::section("zero companies found", cfg);
    if cfg.quiet < 2 {
        print::no_results();
    }
}

/// Keeps asking for pages while the source has more and the user wants them.
///
/// `--pages N` fetches up to `N` pages in total without asking. Otherwise an
/// interactive terminal is prompted after every page.
async fn load_more_pages(session: &mut DiscoverySession, args: &DiscoverArgs, cfg: &Config) {
    let interactive: bool =
        args.pages.is_none() && !args.json && !cfg.disable_input && input::is_interactive();
    let mut remaining_pages: u32 = args.pages.unwrap_or(1).saturating_sub(1);

    while session.has_more() && !session.companies().is_empty() {
        if remaining_pages > 0 {
            remaining_pages -= 1;
        } else if !interactive || ask_for_more().await != Choice::LoadMore {
            break;
        }

        let known: usize = session.companies().len();
        match with_spinner(spinner::loading_more_message(known), session.load_more()).await {
            Ok(0) => {
                info!("No new companies found, that is everything for this search");
            }
            Ok(added) => {
                if !args.json {
                    mprint!();
                    print_companies(&session.companies()[known..], known, cfg);
                }
                success!("{added} more companies loaded");
            }
            Err(e) => {
                error!("{e}");
                break;
            }
        }
    }
}

async fn ask_for_more() -> Choice {
    mprint!();
    print::note(format!(
        "Press {} to load more results, {} to finish",
        "'m'".color(colors::ACCENT).bold(),
        "'q'".color(colors::ACCENT).bold()
    ));

    match tokio::task::spawn_blocking(input::wait_for_choice).await {
        Ok(Ok(choice)) => choice,
        Ok(Err(e)) => {
            warn!("Could not read key press: {e}");
            Choice::Stop
        }
        Err(e) => {
            warn!("Input task failed: {e}");
            Choice::Stop
        }
    }
}

fn print_companies(companies: &[Company], offset: usize, cfg: &Config) {
    if cfg.quiet >= 2 {
        return;
    }

    for (idx, company) in companies.iter().enumerate() {
        print::company_tree(offset + idx, company.name.trim(), &format::company_to_details(company));
        if idx + 1 != companies.len() {
            mprint!();
        }
    }
}

fn print_summary(count: usize, total_time: Duration, cfg: &Config) {
    let found: ColoredString = format!("{count} companies").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Discovery Complete: {found} identified in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::summary(&output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}

fn export_results(companies: &[Company], domain: &str, dir: &std::path::Path) -> anyhow::Result<()> {
    match export::export_csv(companies, domain, dir)? {
        Some(path) => success!("Exported {} companies to {}", companies.len(), path.display()),
        None => warn!("Nothing to export, no companies were found"),
    }
    Ok(())
}
