use clap::Subcommand;
use coinmill::dto::CreateRestraintDto;

use crate::client::CoinmillClient;
use crate::output::{self, OutputConfig};

/// Restraint management commands
#[derive(Subcommand, Debug)]
pub enum RestraintCommands {
    /// List all upgrade sets and their restraints
    List,
    /// Append a restraint to the first upgrade set
    Create {
        /// The owning user ID
        #[clap(long)]
        user_id: Option<String>,
        /// Name of the restraint
        #[clap(long)]
        name: String,
        /// Starting level
        #[clap(long, default_value_t = 1)]
        level: i32,
        /// Cost in "<number>k" form
        #[clap(long)]
        cost: String,
        /// Coins per minute the restraint contributes
        #[clap(long)]
        coin_min: f64,
        /// Icon reference
        #[clap(long, default_value = "")]
        icon: String,
        /// Flavor text
        #[clap(long, default_value = "")]
        quote: String,
    },
    /// Buy the next level of a restraint
    Upgrade {
        /// The upgrade set ID
        upgrade_set_id: String,
        /// The restraint ID
        restraint_id: String,
    },
    /// Add to a user's coins-per-minute rate
    AddRate {
        /// The user ID
        #[clap(long)]
        user_id: String,
        /// Amount to add
        #[clap(long)]
        coin_min: f64,
    },
}

/// Executes a restraint command
pub async fn execute(
    client: &CoinmillClient,
    cmd: RestraintCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        RestraintCommands::List => {
            let sets = client.list_upgrade_sets().await?;
            output::print_upgrade_sets(&sets, config);
        }
        RestraintCommands::Create { user_id, name, level, cost, coin_min, icon, quote } => {
            let dto = CreateRestraintDto { user_id, name, level, cost, coin_min, icon, quote };
            let set = client.create_restraint(&dto).await?;
            output::print_upgrade_set(&set, config);
        }
        RestraintCommands::Upgrade { upgrade_set_id, restraint_id } => {
            let set = client.upgrade_restraint(&upgrade_set_id, &restraint_id).await?;
            output::print_upgrade_set(&set, config);
        }
        RestraintCommands::AddRate { user_id, coin_min } => {
            let reply = client.update_coins_per_minute(user_id, coin_min).await?;
            output::print_success(&reply.message, config);
        }
    }
    Ok(())
}
