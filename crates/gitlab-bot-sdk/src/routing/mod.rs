//! Event routing: wiring webhook events to application handlers.
//!
//! A [`Router`] maps `(event type, action)` pairs to ordered lists of
//! async handlers. The application registers its handlers up front, then
//! feeds every parsed [`Event`] through [`Router::dispatch`], which invokes
//! each matching handler sequentially and fail-fast.
//!
//! There is no process-wide registry: the application constructs a router,
//! owns it, and passes it to the dispatch call site. Registration should
//! complete before serving traffic; concurrent registration and dispatch on
//! the same instance is not supported.
//!
//! # Resolution Order
//!
//! 1. If the event carries an action (`object_attributes.action`), handlers
//!    registered for exactly that action run first, in registration order.
//! 2. Wildcard handlers for the event type run next, in registration order.
//! 3. Events without an action invoke only the wildcard handlers.
//! 4. Event types with no registrations at all are a silent no-op; most
//!    deployments intentionally ignore the majority of hook kinds.
//!
//! # Examples
//!
//! ```
//! use gitlab_bot_sdk::routing::{EventHandler, HandlerError, Router};
//! use gitlab_bot_sdk::webhook::Event;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct GreetOnOpen;
//!
//! #[async_trait]
//! impl EventHandler for GreetOnOpen {
//!     async fn handle(&self, event: &Event, _context: &()) -> Result<(), HandlerError> {
//!         println!("issue opened in project {:?}", event.project_id());
//!         Ok(())
//!     }
//! }
//!
//! # async fn example(event: Event) -> Result<(), HandlerError> {
//! let mut router = Router::new();
//! router.register("Issue Hook", Some("open"), Arc::new(GreetOnOpen));
//!
//! router.dispatch(&event, &()).await
//! # }
//! ```

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::webhook::Event;

/// Error type handlers report; propagated verbatim by [`Router::dispatch`].
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Boxed future returned by closure-based handlers (see [`handler_fn`]).
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'a>>;

/// Application-provided handler for webhook events.
///
/// `C` is the caller-chosen context type passed to every invocation,
/// typically an API client, configuration, or both. Handlers must be
/// `Send + Sync`; the router invokes them sequentially but holds them
/// behind `Arc` so the same handler can be registered under several keys.
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::routing::{EventHandler, HandlerError};
/// use gitlab_bot_sdk::webhook::Event;
/// use async_trait::async_trait;
///
/// struct AuditLog;
///
/// #[async_trait]
/// impl EventHandler<String> for AuditLog {
///     async fn handle(&self, event: &Event, context: &String) -> Result<(), HandlerError> {
///         println!("[{}] saw {}", context, event.event_type());
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler<C = ()>: Send + Sync {
    /// Handle one webhook event.
    ///
    /// An `Err` aborts the remaining handlers for this dispatch and
    /// propagates to the dispatch caller, which decides the HTTP response
    /// (typically 500) and whether to retry the whole event.
    async fn handle(&self, event: &Event, context: &C) -> Result<(), HandlerError>;
}

/// Per-event-type dispatch table.
struct Routes<C> {
    /// action -> handlers, in registration order
    exact: HashMap<String, Vec<Arc<dyn EventHandler<C>>>>,
    /// handlers matching any action (or none), in registration order
    wildcard: Vec<Arc<dyn EventHandler<C>>>,
}

impl<C> Default for Routes<C> {
    fn default() -> Self {
        Self {
            exact: HashMap::new(),
            wildcard: Vec::new(),
        }
    }
}

/// Routes webhook [`Event`]s to registered asynchronous handlers.
///
/// See the [module documentation](self) for the resolution order and a
/// usage example.
pub struct Router<C = ()> {
    routes: HashMap<String, Routes<C>>,
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Router<C> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Add a handler for an event type.
    ///
    /// `action` narrows the registration to events whose
    /// `object_attributes.action` equals the given value; `None` is the
    /// wildcard, matching any action as well as events that have no action
    /// field at all.
    ///
    /// Registration order is preserved and duplicates are kept: the same
    /// handler registered twice under the same key runs twice per dispatch.
    pub fn register(
        &mut self,
        event_type: impl Into<String>,
        action: Option<&str>,
        handler: Arc<dyn EventHandler<C>>,
    ) {
        let routes = self.routes.entry(event_type.into()).or_default();
        match action {
            Some(action) => routes
                .exact
                .entry(action.to_string())
                .or_default()
                .push(handler),
            None => routes.wildcard.push(handler),
        }
    }

    /// Fold another router's registrations into this one.
    ///
    /// Typically each semantic set of features builds its own router and a
    /// server-wide router is assembled from the parts. Relative order
    /// within each key is preserved; `other`'s handlers come after any
    /// already registered here.
    pub fn merge(&mut self, other: Router<C>) {
        for (event_type, routes) in other.routes {
            let entry = self.routes.entry(event_type).or_default();
            for (action, handlers) in routes.exact {
                entry.exact.entry(action).or_default().extend(handlers);
            }
            entry.wildcard.extend(routes.wildcard);
        }
    }

    /// Invoke every handler matching the event, in resolution order.
    ///
    /// Handlers run sequentially; the first error aborts the remainder and
    /// propagates verbatim, so partial completion is visible to the caller.
    /// Events with no matching registrations are a no-op.
    pub async fn dispatch(&self, event: &Event, context: &C) -> Result<(), HandlerError> {
        let Some(routes) = self.routes.get(event.event_type()) else {
            trace!(event_type = event.event_type(), "no handlers registered");
            return Ok(());
        };

        let mut matched: Vec<&Arc<dyn EventHandler<C>>> = Vec::new();
        if let Some(action) = event.action() {
            if let Some(handlers) = routes.exact.get(action) {
                matched.extend(handlers);
            }
        }
        matched.extend(&routes.wildcard);

        trace!(
            event_type = event.event_type(),
            handlers = matched.len(),
            "dispatching event"
        );
        for handler in matched {
            handler.handle(event, context).await?;
        }
        Ok(())
    }
}

impl<C> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: usize = self
            .routes
            .values()
            .map(|routes| {
                routes.wildcard.len() + routes.exact.values().map(Vec::len).sum::<usize>()
            })
            .sum();
        f.debug_struct("Router")
            .field("event_types", &self.routes.len())
            .field("handlers", &handlers)
            .finish()
    }
}

/// Wrap a plain async closure as an [`EventHandler`].
///
/// This is the explicit-call equivalent of decorator-style registration:
/// the closure receives the event and context by reference and returns a
/// boxed future.
///
/// # Examples
///
/// ```
/// use gitlab_bot_sdk::routing::{handler_fn, Router};
///
/// let mut router: Router = Router::new();
/// router.register(
///     "Push Hook",
///     None,
///     handler_fn(|event, _context| {
///         Box::pin(async move {
///             println!("push in project {:?}", event.project_id());
///             Ok(())
///         })
///     }),
/// );
/// ```
pub fn handler_fn<C, F>(func: F) -> Arc<dyn EventHandler<C>>
where
    C: Sync + 'static,
    F: for<'a> Fn(&'a Event, &'a C) -> HandlerFuture<'a> + Send + Sync + 'static,
{
    struct FnHandler<F> {
        func: F,
    }

    #[async_trait]
    impl<C, F> EventHandler<C> for FnHandler<F>
    where
        C: Sync,
        F: for<'a> Fn(&'a Event, &'a C) -> HandlerFuture<'a> + Send + Sync,
    {
        async fn handle(&self, event: &Event, context: &C) -> Result<(), HandlerError> {
            (self.func)(event, context).await
        }
    }

    Arc::new(FnHandler { func })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
