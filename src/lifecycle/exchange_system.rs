use crate::clients::{OrderClient, OrderRegistry, RewardClient, UserClient};
use crate::codes::CodeGenerator;
use crate::config::{ConfigError, ExchangeConfig};
use crate::model::{User, UserCreate, UserId};
use crate::reward_actor::RewardError;
use crate::user_actor::UserError;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument};

/// Failure of the two-step signup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignupError {
    /// The user record was not created; nothing else happened.
    #[error("Registration failed: {0}")]
    User(#[from] UserError),

    /// The user exists but has no reward account.
    #[error("{user_id} was registered but its reward account was not opened: {source}")]
    RewardAccount {
        user_id: UserId,
        #[source]
        source: RewardError,
    },
}

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("{actor} actor task failed: {source}")]
    ActorTask {
        actor: &'static str,
        #[source]
        source: JoinError,
    },
}

/// The running exchange: the User, Reward and Order actors, wired together.
///
/// # Architecture
///
/// - **User Actor**: the identity store
/// - **Reward Actor**: the coin ledger
/// - **Order Actor**: the order registry; its client holds clients for the other two
///
/// # Example
///
/// ```ignore
/// let mut system = ExchangeSystem::new(ExchangeConfig::default())?;
///
/// let asha = system.signup(UserCreate::new("asha@campus.edu", "Asha", "555-0101")).await?;
/// let mut registry = system.registry();
/// let order = registry.create_order("Canteen", "Two samosas", asha.id).await?;
///
/// drop(registry);
/// system.shutdown().await?;
/// ```
pub struct ExchangeSystem {
    /// Client for interacting with the User actor
    pub user_client: UserClient,

    /// Client for interacting with the Reward actor
    pub reward_client: RewardClient,

    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    config: ExchangeConfig,
    codes: CodeGenerator,

    /// Actor tasks, in the order they must be joined on shutdown
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl ExchangeSystem {
    /// Starts the exchange with codes drawn from the operating system's randomness.
    pub fn new(config: ExchangeConfig) -> Result<Self, ConfigError> {
        let codes = CodeGenerator::new(config.display_code_prefix.clone());
        Self::with_codes(config, codes)
    }

    /// Starts the exchange with the given code generator; registries fork from it.
    ///
    /// 1. Validates the configuration
    /// 2. Creates the User and Reward actors, then the Order actor whose client reaches both
    /// 3. Spawns all three with a `()` context
    pub fn with_codes(config: ExchangeConfig, codes: CodeGenerator) -> Result<Self, ConfigError> {
        config.validate()?;

        // 1. Create actors
        let (user_actor, user_client) = crate::user_actor::new(&config);
        let (reward_actor, reward_client) = crate::reward_actor::new(&config);
        let (order_actor, order_client) =
            crate::order_actor::new(&config, user_client.clone(), reward_client.clone());

        // 2. Start actors
        let user_handle = tokio::spawn(user_actor.run(()));
        let reward_handle = tokio::spawn(reward_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(
            stake = config.order_stake,
            signup_bonus = config.signup_bonus,
            "Exchange started"
        );

        Ok(Self {
            user_client,
            reward_client,
            order_client,
            config,
            codes,
            // Order clients keep the User and Reward mailboxes open, so Order goes first.
            handles: vec![
                ("Order", order_handle),
                ("Reward", reward_handle),
                ("User", user_handle),
            ],
        })
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// A registry with its own code generator, forked from the system's.
    pub fn registry(&mut self) -> OrderRegistry {
        OrderRegistry::new(self.order_client.clone(), self.codes.fork())
    }

    /// Registers a user and opens their reward account with the signup bonus.
    ///
    /// The two steps are not atomic. If the account cannot be opened the user record
    /// stays, and the error carries its id.
    #[instrument(skip(self), fields(email = %params.email))]
    pub async fn signup(&self, params: UserCreate) -> Result<User, SignupError> {
        let user = self.user_client.create_user(params).await?;
        if let Err(source) = self.reward_client.create_account(user.id).await {
            error!(user_id = %user.id, error = %source, "User registered without reward account");
            return Err(SignupError::RewardAccount {
                user_id: user.id,
                source,
            });
        }
        info!(user_id = %user.id, "Signed up");
        Ok(user)
    }

    /// Gracefully shuts down the exchange.
    ///
    /// Drops the system's clients so each actor's mailbox closes, then joins the actor
    /// tasks, Order first. Registries and client clones handed out earlier must be dropped
    /// before calling this, or the matching actor keeps running. An order client also
    /// keeps the User and Reward actors running.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down exchange...");

        drop(self.order_client);
        drop(self.reward_client);
        drop(self.user_client);

        for (actor, handle) in self.handles {
            if let Err(source) = handle.await {
                error!(actor, error = %source, "Actor task failed");
                return Err(ShutdownError::ActorTask { actor, source });
            }
        }

        info!("Exchange shutdown complete.");
        Ok(())
    }
}
