use std::env;
use std::path::PathBuf;

/// Where a site definition comes from, in command-line order.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteSource {
    File(PathBuf),
    Preset(String),
}

pub struct CliOptions {
    pub sites: Vec<SiteSource>,
    pub catalog: Option<PathBuf>,
    pub site_name: Option<String>,
    pub diversity_pct: Option<f64>,
    pub report_out: Option<PathBuf>,
    pub history_out: Option<PathBuf>,
    pub list_catalog: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        sites: Vec::new(),
        catalog: None,
        site_name: None,
        diversity_pct: None,
        report_out: None,
        history_out: None,
        list_catalog: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--site" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --site (expected a TOML file path)")?;
                opts.sites.push(SiteSource::File(PathBuf::from(path)));
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                opts.sites.push(SiteSource::Preset(name.to_string()));
            }
            "--catalog" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --catalog (expected a TOML file path)",
                )?;
                if opts.catalog.replace(PathBuf::from(path)).is_some() {
                    return Err("--catalog provided more than once".to_string());
                }
            }
            "--site-name" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --site-name")?;
                if opts.site_name.replace(name.to_string()).is_some() {
                    return Err("--site-name provided more than once".to_string());
                }
            }
            "--diversity" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --diversity (expected a percentage)",
                )?;
                let pct = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--diversity value \"{raw}\" is not a number"))?;
                if opts.diversity_pct.replace(pct).is_some() {
                    return Err("--diversity provided more than once".to_string());
                }
            }
            "--report-out" => {
                i += 1;
                let dir = args.next_or_err(
                    i,
                    "missing value for --report-out (expected a directory)",
                )?;
                if opts.report_out.replace(PathBuf::from(dir)).is_some() {
                    return Err("--report-out provided more than once".to_string());
                }
            }
            "--history-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --history-out (expected a file path)",
                )?;
                if opts.history_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--history-out provided more than once".to_string());
                }
            }
            "--list-catalog" => opts.list_catalog = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.sites.is_empty() && !opts.list_catalog {
        opts.sites.push(SiteSource::Preset("demo".to_string()));
    }

    if opts.site_name.is_some() && opts.sites.len() > 1 {
        return Err("--site-name applies to a single site; got several".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("dc-load: telecom site DC power budget and rectifier sizing");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  dc-load [--site <path> | --preset <name>]... [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --site <path>          Load a site from a TOML file (repeatable)");
    eprintln!("  --preset <name>        Use a built-in site: demo, macro_site, small_cell (repeatable)");
    eprintln!("  --catalog <path>       Replace the built-in equipment catalog with a TOML file");
    eprintln!("  --site-name <name>     Override the site name (single site only)");
    eprintln!("  --diversity <pct>      Override the diversity factor (50-100)");
    eprintln!("  --report-out <dir>     Write each report to <dir>/DC_Load_<site>_<date>.txt");
    eprintln!("  --history-out <path>   Export saved calculations to CSV");
    eprintln!("  --list-catalog         Print the equipment catalog");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                Start the HTTP API after processing sites");
        eprintln!("  --port <u16>           API server port (default: 3000)");
    }
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --site or --preset is given, the demo preset is used.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_demo_preset() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert_eq!(opts.sites, vec![SiteSource::Preset("demo".to_string())]);
        assert!(opts.catalog.is_none());
    }

    #[test]
    fn sites_keep_command_line_order() {
        let opts = parse_args_from(args(&[
            "--preset",
            "macro_site",
            "--site",
            "sites/a.toml",
            "--preset",
            "demo",
        ]))
        .expect("parse should succeed");
        assert_eq!(
            opts.sites,
            vec![
                SiteSource::Preset("macro_site".to_string()),
                SiteSource::File(PathBuf::from("sites/a.toml")),
                SiteSource::Preset("demo".to_string()),
            ]
        );
    }

    #[test]
    fn supports_overrides_and_outputs() {
        let opts = parse_args_from(args(&[
            "--site-name",
            "Tower-5",
            "--diversity",
            "65",
            "--report-out",
            "out",
            "--history-out",
            "history.csv",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.site_name.as_deref(), Some("Tower-5"));
        assert_eq!(opts.diversity_pct, Some(65.0));
        assert_eq!(opts.report_out, Some(PathBuf::from("out")));
        assert_eq!(opts.history_out, Some(PathBuf::from("history.csv")));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args_from(args(&["--diversity", "lots"])).is_err());
        assert!(parse_args_from(args(&["--site"])).is_err());
        assert!(parse_args_from(args(&["--bogus"])).is_err());
        assert!(parse_args_from(args(&["--catalog", "a.toml", "--catalog", "b.toml"])).is_err());
        assert!(
            parse_args_from(args(&[
                "--preset",
                "demo",
                "--preset",
                "small_cell",
                "--site-name",
                "X"
            ]))
            .is_err()
        );
    }

    #[test]
    fn list_catalog_needs_no_site() {
        let opts = parse_args_from(args(&["--list-catalog"])).expect("parse should succeed");
        assert!(opts.list_catalog);
        assert!(opts.sites.is_empty());
    }
}
