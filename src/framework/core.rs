//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all resource types must implement.
//! - [`ResourceActor`]: The generic actor that owns the entity store.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::store::{EntityStore, StoreError};

/// Upper bound on regeneration attempts when a new entity's unique key collides.
pub const MAX_REKEY_ATTEMPTS: u32 = 1_000_000;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that every resource type must satisfy,
/// we write the `ResourceActor` logic *once*. Associated types keep each resource's
/// payloads apart: a `Delivery` actor only ever accepts a `DeliveryCreate`.
///
/// There is no generic update or delete request. An entity changes
/// only through its own [`ActorEntity::Action`] enum, so every mutation goes through
/// rules the entity itself enforces.
///
/// # Async & Context
/// This trait is `#[async_trait]` so action handlers may await. The `Context` type is
/// injected into every hook at `run()` time ("late binding" of dependencies such as
/// clocks or other clients).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Predicate used by `List` requests.
    type Query: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// It travels boxed inside [`FrameworkError::EntityError`]; typed clients
    /// downcast it back.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload.
    ///
    /// Validation belongs here: an `Err` means nothing is stored.
    fn from_create_params(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// A secondary key that must be unique across the store, already normalized
    /// for comparison. `None` opts out of the check.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Regenerate the unique key after a collision. `attempt` starts at 1.
    fn rekey(&mut self, _attempt: u32) {}

    /// Whether this entity satisfies a `List` query.
    fn matches(&self, query: &Self::Query) -> bool;

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action.
    ///
    /// The actor hands the hook a working copy; the copy is committed to the store
    /// only when this returns `Ok`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unique key space exhausted for {0}")]
    KeyExhausted(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// - **Create**: Lifecycle start. Uses [`ActorEntity::Create`] and returns the stored entity.
/// - **Get**: Fetches the current state of one entity by ID.
/// - **List**: Returns every entity matching an [`ActorEntity::Query`], in store order.
/// - **Action**: Executes a custom [`ActorEntity::Action`] against one entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the store and the
/// receiver end of the channel, and it is the only writer of that store.
///
/// **Concurrency Model**:
/// Messages are processed *sequentially* in one task. Two actions aimed at the same
/// entity can never interleave, and each one reads the latest committed state. No
/// `Mutex` is needed around the store.
pub struct ResourceActor<T: ActorEntity, S: EntityStore<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: S,
    unique_keys: HashSet<String>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity, S: EntityStore<T>> ResourceActor<T, S> {
    /// A `buffer_size` of 0 is raised to 1; the channel needs room for one request.
    pub fn new(
        buffer_size: usize,
        store: S,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store,
            unique_keys: HashSet::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Delivery" instead of "delivery_lifecycle::model::delivery::Delivery")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        match self.store.list().await {
            Ok(existing) => {
                self.unique_keys = existing.iter().filter_map(T::unique_key).collect();
                info!(entity_type, size = existing.len(), "Actor started");
            }
            Err(e) => {
                error!(entity_type, error = %e, "Failed to load store, actor not started");
                return;
            }
        }

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(item) => info!(entity_type, id = %item.id(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self.store.get(&id).await.map_err(FrameworkError::from);
                    let found = matches!(result, Ok(Some(_)));
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { query, respond_to } => {
                    let result = self
                        .store
                        .list()
                        .await
                        .map(|items| items.into_iter().filter(|item| item.matches(&query)).collect::<Vec<_>>())
                        .map_err(FrameworkError::from);
                    if let Ok(items) = &result {
                        debug!(entity_type, ?query, matched = items.len(), "List");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.apply_action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id, params, context)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        let mut attempt = 0;
        while let Some(key) = item.unique_key() {
            if !self.unique_keys.contains(&key) {
                break;
            }
            attempt += 1;
            if attempt > MAX_REKEY_ATTEMPTS {
                return Err(FrameworkError::KeyExhausted(key));
            }
            debug!(%key, attempt, "Unique key collision, regenerating");
            item.rekey(attempt);
        }

        self.store.put(item.clone()).await?;
        if let Some(key) = item.unique_key() {
            self.unique_keys.insert(key);
        }
        Ok(item)
    }

    async fn apply_action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut item = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        self.store.put(item).await?;
        Ok(result)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the channel sender, so cloning is cheap and clones can be handed to
/// any number of tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// A derive would demand `T: Clone` bounds on every associated type.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self, query: T::Query) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { query, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { id, action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u64,
        code: String,
        seat: u32,
        used: bool,
    }

    #[derive(Debug)]
    struct TicketCreate {
        code: String,
        seat: u32,
    }

    #[derive(Debug)]
    enum TicketAction {
        Use,
        // Mutates before failing, to prove the store keeps the committed copy.
        MoveAndFail(u32),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum TicketError {
        #[error("seat 0 does not exist")]
        NoSeat,
        #[error("ticket already used")]
        AlreadyUsed,
        #[error("move rejected")]
        MoveRejected,
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u64;
        type Create = TicketCreate;
        type Action = TicketAction;
        type ActionResult = Ticket;
        type Query = bool;
        type Context = ();
        type Error = TicketError;

        fn id(&self) -> &u64 {
            &self.id
        }

        fn from_create_params(id: u64, params: TicketCreate, _ctx: &()) -> Result<Self, TicketError> {
            if params.seat == 0 {
                return Err(TicketError::NoSeat);
            }
            Ok(Self { id, code: params.code, seat: params.seat, used: false })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.code.to_uppercase())
        }

        fn rekey(&mut self, attempt: u32) {
            self.code = format!("{}-{}", self.code, attempt);
        }

        fn matches(&self, used: &bool) -> bool {
            self.used == *used
        }

        async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<Ticket, TicketError> {
            match action {
                TicketAction::Use if self.used => Err(TicketError::AlreadyUsed),
                TicketAction::Use => {
                    self.used = true;
                    Ok(self.clone())
                }
                TicketAction::MoveAndFail(seat) => {
                    self.seat = seat;
                    Err(TicketError::MoveRejected)
                }
            }
        }
    }

    fn spawn_ticket_actor() -> ResourceClient<Ticket> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst);
        let (actor, client) = ResourceActor::new(10, MemoryStore::<Ticket>::new(), next_id);
        tokio::spawn(actor.run(()));
        client
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_ticket_actor();

        // 1. Create
        let ticket = client.create(TicketCreate { code: "a1".into(), seat: 4 }).await.unwrap();
        assert_eq!(ticket.id, 1);

        // 2. Perform Action
        let used = client.perform_action(1, TicketAction::Use).await.unwrap();
        assert!(used.used);

        // 3. Same action again is rejected by the entity
        let err = client.perform_action(1, TicketAction::Use).await.unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));

        // 4. List by predicate
        assert_eq!(client.list(true).await.unwrap().len(), 1);
        assert!(client.list(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_action_is_not_committed() {
        let client = spawn_ticket_actor();
        client.create(TicketCreate { code: "b".into(), seat: 7 }).await.unwrap();

        let err = client.perform_action(1, TicketAction::MoveAndFail(9)).await.unwrap_err();
        let inner = match err {
            FrameworkError::EntityError(inner) => inner.downcast::<TicketError>().unwrap(),
            other => panic!("unexpected error: {other}"),
        };
        assert_eq!(*inner, TicketError::MoveRejected);

        let stored = client.get(1).await.unwrap().unwrap();
        assert_eq!(stored.seat, 7);
    }

    #[tokio::test]
    async fn test_create_validation_and_missing_ids() {
        let client = spawn_ticket_actor();

        let err = client.create(TicketCreate { code: "c".into(), seat: 0 }).await.unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));
        assert!(client.list(false).await.unwrap().is_empty());

        assert!(client.get(42).await.unwrap().is_none());
        let err = client.perform_action(42, TicketAction::Use).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "42"));
    }

    #[tokio::test]
    async fn test_unique_key_collision_rekeys() {
        let client = spawn_ticket_actor();

        let first = client.create(TicketCreate { code: "dup".into(), seat: 1 }).await.unwrap();
        let second = client.create(TicketCreate { code: "DUP".into(), seat: 2 }).await.unwrap();

        assert_eq!(first.code, "dup");
        assert_eq!(second.code, "DUP-1");
    }

    #[tokio::test]
    async fn test_zero_buffer_still_serves_requests() {
        let (actor, client) = ResourceActor::new(0, MemoryStore::<Ticket>::new(), || 7);
        tokio::spawn(actor.run(()));

        let ticket = client.create(TicketCreate { code: "z".into(), seat: 3 }).await.unwrap();
        assert_eq!(ticket.id, 7);
        assert_eq!(client.get(7).await.unwrap(), Some(ticket));
    }
}
