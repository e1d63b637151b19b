//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber: compact `fmt` output, no module
//! prefix (`with_target(false)`), levels taken from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` / `Shutdown` with the entity type and final store size
//! - **Entity Operations**: Create, Get, List, Update, Delete and Actions at `debug`, outcomes at `info`/`warn`
//! - **Client Calls**: every typed client method opens a span (`#[instrument]`)
//! - **Settlement**: a transfer that debits without crediting is logged at `error`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=info cargo run
//!
//! # Full payloads and per-request lines
//! RUST_LOG=debug cargo run
//!
//! # Just the generic actor loop
//! RUST_LOG=errand_exchange::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing and completing one order with `RUST_LOG=info`:
//!
//! ```text
//! INFO Created entity_type="User" id=user_1 size=1
//! INFO Created entity_type="RewardAccount" id=user_1 size=1
//! INFO create_order: Created entity_type="Order" id=order_1 size=1
//! INFO create_order: Order placed order_id=order_1 display_code=#NBO48213 attempt=1
//! INFO accept_order: Order accepted order_id=order_1 accepter=user_2
//! INFO complete_order: Order completed order_id=order_1 amount=10 requester_balance=40 accepter_balance=60
//! ```
//!
//! A display-code collision shows up as a `warn` line followed by a second attempt:
//!
//! ```text
//! WARN create_order: Unique key taken entity_type="Order" key="#NBO48213"
//! WARN create_order: Display code collision code=#NBO48213 attempt=1
//! ```

/// Installs the global subscriber. Later calls leave the first one in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .try_init();
}
