use std::process::ExitCode;

use bft_broker_binance::ReqwestTransport;
use bft_config::{AppConfig, LogConfig, LogLevel};
use bft_execution::{OrderService, RawOrderIntent, SystemClock};
use clap::Parser;
use tracing::{error, info};

mod logging;
mod report;

/// Missing/unknown argument or unusable configuration.
const EXIT_USAGE: u8 = 1;
/// Anything that is not an order-pipeline failure (log file, HTTP client).
const EXIT_UNEXPECTED: u8 = 99;

#[derive(Parser, Debug)]
#[command(name = "bft-cli")]
#[command(about = "Binance Futures Testnet order placement CLI", long_about = None)]
#[command(after_help = "Examples:\n  \
    bft-cli --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001\n  \
    bft-cli --symbol BTCUSDT --side SELL --type LIMIT --quantity 0.001 --price 100000\n  \
    bft-cli --symbol BTCUSDT --side BUY --type STOP_MARKET --quantity 0.001 --stop-price 95000")]
struct Cli {
    /// Trading pair symbol, e.g. BTCUSDT
    #[arg(long)]
    symbol: String,

    /// Order side: BUY or SELL
    #[arg(long)]
    side: String,

    /// Order type: MARKET, LIMIT or STOP_MARKET
    #[arg(long = "type")]
    order_type: String,

    /// Order quantity in base asset, e.g. 0.001
    #[arg(long)]
    quantity: String,

    /// Limit price (required for LIMIT)
    #[arg(long)]
    price: Option<String>,

    /// Trigger price (required for STOP_MARKET)
    #[arg(long)]
    stop_price: Option<String>,

    /// GTC, IOC, FOK or GTX (LIMIT only, default GTC)
    #[arg(long)]
    time_in_force: Option<String>,

    /// DEBUG, INFO, WARNING or ERROR
    #[arg(long, default_value = "INFO")]
    log_level: LogLevel,
}

impl Cli {
    fn raw_intent(&self) -> RawOrderIntent {
        RawOrderIntent {
            symbol: self.symbol.clone(),
            side: self.side.clone(),
            order_type: self.order_type.clone(),
            quantity: self.quantity.clone(),
            price: self.price.clone(),
            stop_price: self.stop_price.clone(),
            time_in_force: self.time_in_force.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version go to stdout and are not failures.
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // Local runs keep credentials in .env; a missing file is fine.
    let _ = dotenvy::dotenv();

    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let log_cfg = LogConfig::from_env(cli.log_level);
    if let Err(e) = logging::init(&log_cfg) {
        eprintln!("Unexpected error: {e:#}");
        return EXIT_UNEXPECTED;
    }

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %format!("{e:#}"), "config/invalid");
            eprintln!("Error: {e:#}");
            eprintln!("Create a .env file or export BINANCE_API_KEY and BINANCE_API_SECRET.");
            return EXIT_USAGE;
        }
    };
    info!(
        base_url = %config.client.base_url,
        recv_window_ms = config.client.recv_window_ms,
        "config/loaded"
    );

    let transport = match ReqwestTransport::new() {
        Ok(t) => t,
        Err(e) => {
            error!(error = %format!("{e:#}"), "http/init_failed");
            eprintln!("Unexpected error: {e:#}");
            return EXIT_UNEXPECTED;
        }
    };

    let service = match OrderService::new(&config, transport, SystemClock) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", report::format_error(&e));
            return e.exit_code();
        }
    };

    let placed = service.place_order_with(&cli.raw_intent(), |intent| {
        println!("{}", report::format_order_summary(intent));
    });
    match placed {
        Ok(result) => {
            println!("{}", report::format_order_result(&result));
            println!("  Order placed successfully.");
            0
        }
        Err(e) => {
            eprintln!("{}", report::format_error(&e));
            e.exit_code()
        }
    }
}
