use dongnae::{Catalog, Engine, Region, DEFAULT_K, DEFAULT_SEARCH_LIMIT, DEFAULT_THRESHOLD};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: dongnae <catalog.bin|catalog.csv> <command> [args]

Commands:
  where <lat> <lon>
  nearest <lat> <lon> [k] [radius_km]
  within <lat> <lon> <radius_km> [limit]
  resolve <lat> <lon> [threshold]
  search <keyword>... [--all] [--limit N]
  get <id>
  count";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    let engine = Engine::new(load(&args[1])?);
    let rest = &args[3..];
    let arg = |i: usize| rest.get(i).map(String::as_str);
    let coord = |i: usize| -> Result<f64, Box<dyn std::error::Error>> {
        Ok(arg(i).ok_or("missing coordinate")?.parse::<f64>()?)
    };

    let results: Vec<Region> = match args[2].as_str() {
        "where" => engine.locate(coord(0)?, coord(1)?).into_iter().collect(),
        "nearest" => {
            let k = arg(2).map(str::parse::<usize>).transpose()?.unwrap_or(DEFAULT_K);
            let radius = arg(3).map(str::parse::<f64>).transpose()?;
            engine.nearest(coord(0)?, coord(1)?, k, radius)
        }
        "within" => {
            let limit = arg(3).map(str::parse::<usize>).transpose()?;
            engine.within(coord(0)?, coord(1)?, coord(2)?, limit)
        }
        "resolve" => {
            let threshold = arg(2)
                .map(str::parse::<f64>)
                .transpose()?
                .unwrap_or(DEFAULT_THRESHOLD);
            engine.resolve(coord(0)?, coord(1)?, threshold)
        }
        "search" => {
            let search = SearchArgs::parse(rest)?;
            match search.limit {
                Some(limit) => engine.search(&search.keyword, limit),
                None => engine.best_match(&search.keyword).into_iter().collect(),
            }
        }
        "get" => engine
            .get(arg(0).ok_or("missing id")?)
            .into_iter()
            .collect(),
        "count" => {
            println!("{}", engine.len());
            return Ok(());
        }
        other => {
            eprintln!("Unknown command: {}\n{}", other, USAGE);
            return Ok(());
        }
    };

    print_results(&results)
}

/// Keyword and ranked-list limit of a `search` command. `limit` is `None` for best-match mode.
#[derive(Debug, PartialEq)]
struct SearchArgs {
    keyword: String,
    limit: Option<usize>,
}

impl SearchArgs {
    fn parse(rest: &[String]) -> Result<Self, Box<dyn std::error::Error>> {
        let mut words = Vec::new();
        let mut all = false;
        let mut limit = None;
        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--all" => all = true,
                "--limit" => {
                    let value = iter.next().ok_or("--limit needs a value")?;
                    limit = Some(value.parse::<usize>()?);
                }
                word => words.push(word),
            }
        }
        // --limit alone implies the ranked list.
        let limit = match (all, limit) {
            (_, Some(limit)) => Some(limit),
            (true, None) => Some(DEFAULT_SEARCH_LIMIT),
            (false, None) => None,
        };
        Ok(Self {
            keyword: words.join(" "),
            limit,
        })
    }
}

fn load(path: &str) -> Result<Catalog, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let catalog = if path.to_ascii_lowercase().ends_with(".csv") {
        dongnae::source::parse_csv(std::str::from_utf8(&bytes)?)?
    } else {
        Catalog::from_bytes(&bytes)?
    };
    Ok(catalog)
}

fn print_results(results: &[Region]) -> Result<(), Box<dyn std::error::Error>> {
    if results.is_empty() {
        eprintln!("No neighborhood found");
    }
    for region in results {
        println!("{}", serde_json::to_string(region)?);
    }
    Ok(())
}
