use futuur_rest::{FutuurClient, FutuurError, MarketListParams, PaginationParams};
use std::process::ExitCode;
use tracing::{error, info};

const USAGE: &str = "usage: runner <me|rates|categories|markets>";

#[tokio::main]
async fn main() -> ExitCode {
    common::init_logging();

    let Some(command) = std::env::args().nth(1) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let client = match FutuurClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to create client");
            return ExitCode::FAILURE;
        }
    };

    info!(command = %command, public_key = %client.public_key(), "Starting");

    match run(&client, &command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("unknown command '{command}'\n{USAGE}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, transport = e.is_transport(), "Command failed");
            ExitCode::FAILURE
        }
    }
}

/// Run `command`; `Ok(false)` if it is not recognized.
async fn run(client: &FutuurClient, command: &str) -> Result<bool, FutuurError> {
    match command {
        "me" => println!("{:#?}", client.me().await?),
        "rates" => println!("{:#?}", client.current_rates().await?),
        "categories" => {
            let page = client
                .category_list(Some(&PaginationParams::page(20, 0)))
                .await?;
            println!("{:#?}", page);
        }
        "markets" => {
            let params = MarketListParams {
                limit: Some(10),
                ..Default::default()
            };
            println!("{:#?}", client.market_list(Some(&params)).await?);
        }
        _ => return Ok(false),
    }
    Ok(true)
}
