use clap::Subcommand;

use crate::client::CoinmillClient;
use crate::output::{self, OutputConfig};

/// User management commands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a new user
    Create {
        /// Starting balance
        #[clap(long, default_value_t = 0.0)]
        signup_coin: f64,
        /// Starting coins-per-minute rate
        #[clap(long, default_value_t = 0.0)]
        coins_per_minute: f64,
    },
    /// Get a user by ID
    Get {
        /// The user ID
        id: String,
    },
}

/// Executes a user command
pub async fn execute(
    client: &CoinmillClient,
    cmd: UserCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        UserCommands::Create { signup_coin, coins_per_minute } => {
            let user = client.create_user(signup_coin, coins_per_minute).await?;
            output::print_user(&user, config);
        }
        UserCommands::Get { id } => {
            let user = client.get_user(&id).await?;
            output::print_user(&user, config);
        }
    }
    Ok(())
}
