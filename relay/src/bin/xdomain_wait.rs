use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use xdomain_relay::config::Config;
use xdomain_relay::shared_state::SharedState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let shared_state = SharedState::new(
        config.l1_rpc_url.clone(),
        config.l1_messenger,
        config.l2_rpc_url.clone(),
        config.l2_messenger,
    );

    let res = shared_state
        .wait_for_xdomain_transaction(config.tx_hash, config.direction, &config.wait_config())
        .await;

    match res {
        Ok(receipt) => match serde_json::to_string_pretty(&receipt.remote) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("serialize: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            log::error!("{} {:?}: {}", config.direction, config.tx_hash, err);
            ExitCode::FAILURE
        }
    }
}
