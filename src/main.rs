//! Demo walk-through of the exchange: two students sign up, one posts an errand, the
//! other accepts and completes it, and the coins move.

use errand_exchange::config::ExchangeConfig;
use errand_exchange::lifecycle::{setup_tracing, ExchangeSystem};
use errand_exchange::model::UserCreate;
use std::error::Error;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ExchangeConfig::from_env()?;
    let mut system = ExchangeSystem::new(config)?;

    let asha = system
        .signup(UserCreate {
            hostel: "H3".into(),
            branch: "CSE".into(),
            year: "2".into(),
            ..UserCreate::new("asha@campus.edu", "Asha", "555-0101")
        })
        .await?;
    let ravi = system
        .signup(UserCreate::new("ravi@campus.edu", "Ravi", "555-0102"))
        .await?;

    let mut registry = system.registry();

    let span = tracing::info_span!("errand", requester = %asha.id, accepter = %ravi.id);
    async {
        let order = registry
            .create_order("Canteen", "Two samosas and a chai", asha.id)
            .await?;
        info!(display_code = %order.display_code, "Errand posted");

        let available = registry.list_available(ravi.id).await?;
        info!(count = available.len(), "Errands visible to the accepter");

        registry.accept_order(order.id, ravi.id).await?;

        // The requester reads the code from their own view and hands it over on delivery.
        let own_view = registry.get_order(order.id, asha.id).await?;
        let code = own_view.one_time_code.unwrap_or_default();
        let done = registry.complete_order(order.id, ravi.id, &code).await?;
        info!(status = %done.status, "Errand closed");

        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;

    let rewards = &system.reward_client;
    let asha_coins = rewards.balance(asha.id).await?;
    let ravi_coins = rewards.balance(ravi.id).await?;
    let total = rewards.total_supply().await?;
    info!(asha = asha_coins, ravi = ravi_coins, total, "Balances");

    drop(registry);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
