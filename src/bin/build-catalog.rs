use dongnae::builder::Builder;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(source) = args.next() else {
        eprintln!("Usage: build-catalog <source.csv|source.zip|url> [output.bin]");
        std::process::exit(1);
    };
    let output_path = args.next().unwrap_or_else(|| "dongnae.bin".to_string());

    println!("Building catalog to: {}", output_path);
    let catalog = Builder::new().build(&source, &output_path)?;
    println!("Catalog built with {} neighborhoods", catalog.len());
    Ok(())
}
