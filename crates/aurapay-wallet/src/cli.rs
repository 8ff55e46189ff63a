use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use aurapay_wallet_adapters::{
    Eip1193Adapter, JsonRpcReader, StaticSessionAdapter, WalletAdapterConfig,
};
use aurapay_wallet_core::{Asset, Network, TransferRequest, WalletCore};

type Wallet = WalletCore<Eip1193Adapter, JsonRpcReader>;

/// AuraPay wallet: balances, transfers and confirmations on Avalanche C-Chain
#[derive(Parser)]
#[command(name = "aurapay-wallet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the chain parameters for a network
    Network(NetworkArgs),

    /// Check whether a string is a well-formed address
    Validate {
        address: String,
    },

    /// Display balance of an address
    Balance {
        address: String,
        #[command(flatten)]
        target: Target,
    },

    /// Display balance of the configured session address
    SessionBalance(Target),

    /// Submit a transfer through the connected wallet
    Send {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Decimal amount, e.g. 0.0001
        #[arg(long)]
        amount: String,
        #[command(flatten)]
        target: Target,
    },

    /// Check a transaction once
    Status {
        transaction_id: String,
        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Poll a transaction until it settles
    Watch {
        transaction_id: String,
        #[command(flatten)]
        network: NetworkArgs,
        /// Seconds between status checks
        #[arg(long, default_value_t = 3)]
        interval: u64,
        #[arg(long, default_value_t = 40)]
        max_attempts: u32,
    },

    /// Show which chain the wallet is currently on
    Detect,
}

#[derive(Args, Clone, Copy)]
struct NetworkArgs {
    /// Use the Fuji testnet instead of mainnet
    #[arg(long)]
    testnet: bool,
}

impl NetworkArgs {
    fn network(self) -> Network {
        Network::from_testnet_flag(self.testnet)
    }
}

#[derive(Args, Clone, Copy)]
struct Target {
    #[command(flatten)]
    network: NetworkArgs,
    /// Operate on the USDC token instead of AVAX
    #[arg(long)]
    token: bool,
}

impl Target {
    fn asset(self) -> Asset {
        if self.token {
            Asset::Token
        } else {
            Asset::Native
        }
    }
}

impl Cli {
    pub async fn run(self) -> eyre::Result<ExitCode> {
        let config = WalletAdapterConfig::from_env();
        let wallet = build_wallet(&config)?;

        match self.command {
            Command::Network(args) => {
                emit(wallet.network_info(args.network()))?;
            }
            Command::Validate { address } => {
                let valid = wallet.is_valid_address(&address);
                emit(&json!({ "address": address, "valid": valid }))?;
                if !valid {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Balance { address, target } => {
                let balance = wallet
                    .fetch_balance(&address, target.network.network(), target.asset())
                    .await;
                emit(&balance)?;
            }
            Command::SessionBalance(target) => {
                let session = StaticSessionAdapter::with_config(&config);
                let balance = wallet
                    .session_balance(&session, target.network.network(), target.asset())
                    .await;
                emit(&balance)?;
            }
            Command::Send {
                from,
                to,
                amount,
                target,
            } => {
                let request =
                    TransferRequest::new(from, to, amount, target.network.network(), target.asset());
                let result = wallet.send_transaction(&request).await;
                emit(&result)?;
                if !result.success {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Status {
                transaction_id,
                network,
            } => {
                let status = wallet.check_status(&transaction_id, network.network()).await;
                emit(&status)?;
            }
            Command::Watch {
                transaction_id,
                network,
                interval,
                max_attempts,
            } => {
                return watch(&wallet, &transaction_id, network.network(), interval, max_attempts)
                    .await;
            }
            Command::Detect => match wallet.detect_network().await {
                Some(info) => emit(&info)?,
                None => {
                    emit(&json!({ "available": false }))?;
                    return Ok(ExitCode::FAILURE);
                }
            },
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn build_wallet(config: &WalletAdapterConfig) -> eyre::Result<Wallet> {
    let reader = JsonRpcReader::with_config(config)?;
    let provider = Eip1193Adapter::with_config(config.clone());
    Ok(WalletCore::new(Some(provider), reader))
}

async fn watch(
    wallet: &Wallet,
    transaction_id: &str,
    network: Network,
    interval_secs: u64,
    max_attempts: u32,
) -> eyre::Result<ExitCode> {
    let interval = Duration::from_secs(interval_secs);
    for attempt in 1..=max_attempts {
        let status = wallet.check_status(transaction_id, network).await;
        tracing::debug!(attempt, state = ?status.state, "status polled");
        println!("{}", serde_json::to_string(&status)?);
        if status.state.is_settled() {
            return Ok(ExitCode::SUCCESS);
        }
        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }
    tracing::warn!(transaction_id, max_attempts, "transaction not settled, giving up");
    Ok(ExitCode::FAILURE)
}

fn emit<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
