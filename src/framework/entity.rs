//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored record (User, RewardAccount, Order)
//! implements to be managed by the generic [`ResourceActor`](crate::framework::ResourceActor).
//! It names the associated types for IDs, DTOs, actions, queries, context and errors, and
//! provides the lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::natural_id`] lets a record be keyed by caller data instead of a generated ID.
//! - [`ActorEntity::unique_key`] declares a secondary unique index enforced at insert time.
//! - [`ActorEntity::on_create`] / [`ActorEntity::on_delete`] default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can call other actors. The `Context` type is
/// injected into every hook, which allows "Late Binding" of dependencies (passing clients
/// to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Accept`, `Adjust`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Filter used by `List` requests.
    type Query: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum for the whole actor. Clients downcast it back out of
    /// [`FrameworkError::EntityError`](crate::framework::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The ID this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Caller-supplied key. When `Some`, the actor stores the record under it and
    /// rejects the create if the key is already present.
    fn natural_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Secondary unique index value, checked against every stored record on insert.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Whether this entity belongs in the result of `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Returning an error aborts the create; nothing is persisted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed. Returning an error keeps it.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// The entity is mutated in place, so any change made before an error is returned
    /// is kept. Validate first, then mutate.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// Update payload for records that cannot be edited after creation.
///
/// Uninhabited, so an `Update` request for such an entity cannot even be constructed.
#[derive(Debug, Clone, Copy)]
pub enum NoUpdate {}
