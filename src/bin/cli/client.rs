use coinmill::dto::{CreateRestraintDto, CreateUserDto, MessageDto, UpdateCoinsPerMinuteDto};
use coinmill::models::{UpgradeSet, User};
use reqwest::Client;

/// Error type for CLI client operations
#[derive(Debug)]
pub enum ClientError {
    /// Server returned an error status with a message body
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    Request(reqwest::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status.as_u16(), message)
            }
            ClientError::Request(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(err) => Some(err),
            ClientError::Server { .. } => None,
        }
    }
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body.get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the Coinmill server
pub struct CoinmillClient {
    /// The base URL of the server (e.g. "http://localhost:3000")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl CoinmillClient {
    /// Creates a new CoinmillClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the Coinmill server
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    // ── Restraint endpoints ──────────────────────────────────────────

    /// Lists all upgrade sets with their restraints
    pub async fn list_upgrade_sets(&self) -> Result<Vec<UpgradeSet>, ClientError> {
        let url = format!("{}/restraints", self.base_url);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Appends a restraint to the first upgrade set and returns that set
    pub async fn create_restraint(&self, dto: &CreateRestraintDto) -> Result<UpgradeSet, ClientError> {
        let url = format!("{}/restraints", self.base_url);
        let response = self.client.post(&url).json(dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Adds `coin_min` to a user's coins-per-minute rate
    pub async fn update_coins_per_minute(&self, user_id: String, coin_min: f64) -> Result<MessageDto, ClientError> {
        let url = format!("{}/restraints/coins-per-minute", self.base_url);
        let dto = UpdateCoinsPerMinuteDto {
            user_id: Some(user_id),
            coin_min: Some(Some(coin_min)),
        };
        let response = self.client.put(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Buys the next level of a restraint
    pub async fn upgrade_restraint(&self, upgrade_set_id: &str, restraint_id: &str) -> Result<UpgradeSet, ClientError> {
        let url = format!("{}/restraints/{}/{}", self.base_url, upgrade_set_id, restraint_id);
        let response = self.client.put(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    // ── User endpoints ───────────────────────────────────────────────

    /// Creates a new user
    pub async fn create_user(&self, signup_coin: f64, coins_per_minute: f64) -> Result<User, ClientError> {
        let url = format!("{}/users", self.base_url);
        let dto = CreateUserDto { signup_coin, coins_per_minute };
        let response = self.client.post(&url).json(&dto).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }

    /// Gets a specific user by ID
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        let response = self.client.get(&url).send().await.map_err(ClientError::Request)?.check().await?;
        response.json().await.map_err(ClientError::Request)
    }
}
