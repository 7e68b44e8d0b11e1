//! remd-tgen — query the REMD temperature generator from the command line.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use remd_tgen::{load_parameters, ClientConfig, TemperatureClient, ValueMap};
use remd_tgen_cli::collect_params;
use remd_tgen_cli::output::{format_fields, format_params, format_table, format_temperatures};

#[derive(Parser)]
#[command(
    name = "remd-tgen",
    about = "Temperature generator for REMD simulations — web client",
    version,
    after_help = "Parameters use the form codes (Np=200) or the form labels\n(\"number of protein atoms=200\"). Run 'remd-tgen fields' for the full list."
)]
struct Cli {
    /// Generator endpoint URL (also REMD_TGENERATOR_URL).
    #[arg(long, global = true)]
    url: Option<String>,

    /// Request timeout in milliseconds (also REMD_TGENERATOR_TIMEOUT_MS).
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Output results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParamArgs {
    /// Parameter assignment KEY=VALUE (repeatable).
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// JSON file with an object of parameter names to values.
    #[arg(long, value_name = "FILE")]
    params_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the predicted temperature ladder.
    Temperatures(ParamArgs),

    /// Print temperatures with energy averages, deviations and exchange probabilities.
    Table(ParamArgs),

    /// Print the resolved form parameters without contacting the server.
    Params(ParamArgs),

    /// List form fields, their labels, defaults and accepted values.
    Fields,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   remd-tgen completions bash > ~/.local/share/bash-completion/completions/remd-tgen
    ///   remd-tgen completions zsh > ~/.zfunc/_remd-tgen
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::resolve(cli.url.as_deref(), cli.timeout_ms);

    match cli.command {
        Commands::Temperatures(args) => {
            let input = collect_params(args.params_file.as_deref(), &args.params)?;
            let client = TemperatureClient::new(&config)?;
            tracing::info!("Requesting temperatures from {}", client.url());
            let temps = client.get_temperatures(input).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&temps)?);
            } else {
                println!("{}", format_temperatures(&temps));
            }
        }

        Commands::Table(args) => {
            let input = collect_params(args.params_file.as_deref(), &args.params)?;
            let client = TemperatureClient::new(&config)?;
            tracing::info!("Requesting temperatures and energies from {}", client.url());
            if cli.json {
                let records = client.get_energy_records(input).await?;
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                let rows = client.get_temperatures_energies(input).await?;
                println!("Temperatures and energies");
                println!("{}", format_table(&rows));
            }
        }

        Commands::Params(args) => {
            let input = collect_params(args.params_file.as_deref(), &args.params)?;
            let params = load_parameters(input)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else {
                println!("{}", format_params(&params));
            }
        }

        Commands::Fields => {
            let fields = remd_tgen::fields();
            if cli.json {
                let info: Vec<_> = fields
                    .iter()
                    .map(|f| {
                        let values = match f.values {
                            ValueMap::PassThrough => serde_json::Value::Null,
                            ValueMap::Choices(choices) => choices
                                .iter()
                                .map(|(name, code)| (name.to_string(), serde_json::json!(code)))
                                .collect::<serde_json::Map<_, _>>()
                                .into(),
                        };
                        serde_json::json!({
                            "code": f.code,
                            "label": f.label,
                            "default": f.default,
                            "values": values,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", format_fields(fields));
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "remd-tgen", &mut std::io::stdout());
        }
    }

    Ok(())
}
