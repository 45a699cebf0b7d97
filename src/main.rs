//! dc-load entry point: CLI wiring and config-driven session construction.

use std::process;
use std::sync::Arc;

use dc_load::catalog::EquipmentCatalog;
use dc_load::cli::{self, CliOptions, SiteSource};
use dc_load::config::SiteConfig;
use dc_load::io::export::{export_history_csv, export_report};
use dc_load::logging;
use dc_load::report;
use dc_load::session::Session;

fn load_catalog(opts: &CliOptions) -> EquipmentCatalog {
    match opts.catalog {
        Some(ref path) => EquipmentCatalog::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => EquipmentCatalog::builtin(),
    }
}

fn load_site(source: &SiteSource, opts: &CliOptions) -> SiteConfig {
    let loaded = match source {
        SiteSource::File(path) => SiteConfig::from_toml_file(path),
        SiteSource::Preset(name) => SiteConfig::from_preset(name),
    };
    let mut site = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    // Apply overrides
    if let Some(ref name) = opts.site_name {
        site.site.name = name.clone();
    }
    if let Some(pct) = opts.diversity_pct {
        site.site.diversity_factor_pct = pct;
    }

    let errors = site.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    site
}

fn print_catalog(catalog: &EquipmentCatalog) {
    for category in catalog.categories() {
        println!("{category}");
        for entry in catalog.models(category).unwrap_or_default() {
            println!(
                "  {:<24} {:>6} W  {}",
                entry.model, entry.rated_power_w, entry.load_class
            );
        }
    }
}

/// Most recent saved calculations listed after a multi-site run.
const SUMMARY_RECORDS: usize = 6;

fn print_saved_summary(session: &Session) {
    eprintln!("Saved calculations (most recent first):");
    for record in session.history().recent(SUMMARY_RECORDS) {
        let f = record.figures();
        eprintln!(
            "  {} {}  {:.2} A -> {} A  {}",
            record.timestamp().format("%H:%M:%S"),
            record.site_name(),
            f.dc_amps,
            f.rectifier_a,
            f.recommendation
        );
    }
}

fn main() {
    logging::init();

    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    let catalog = Arc::new(load_catalog(&opts));
    if opts.list_catalog {
        print_catalog(&catalog);
    }

    let mut session = Session::with_catalog(Arc::clone(&catalog));
    for (n, source) in opts.sites.iter().enumerate() {
        let site = load_site(source, &opts);
        tracing::info!(?source, "processing site");

        if let Err(e) = site.apply(&mut session) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        let Some(record) = session.save() else {
            eprintln!("error: site has no equipment");
            process::exit(1);
        };

        let text = report::format(record);
        if n > 0 {
            println!();
        }
        print!("{text}");

        if let Some(ref dir) = opts.report_out {
            let file_name = report::report_file_name(&site.site.name, record.timestamp().date());
            match export_report(&text, dir, &file_name) {
                Ok(path) => eprintln!("Report written to {}", path.display()),
                Err(e) => {
                    eprintln!("error: failed to write report: {e}");
                    process::exit(1);
                }
            }
        }
    }

    if session.history().len() > 1 {
        print_saved_summary(&session);
    }

    if let Some(ref path) = opts.history_out {
        if let Err(e) = export_history_csv(session.history().iter(), path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("History written to {}", path.display());
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;

        let state = Arc::new(dc_load::api::AppState { catalog });
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(dc_load::api::serve(state, addr));
    }
}
