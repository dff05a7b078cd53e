//! Gateway state
//!
//! Application state for the gateway server.

use crate::broadcast::EventDispatcher;
use crate::connection::ConnectionManager;
use crate::widgets::{PixelCanvas, SharedDocument};
use parlor_service::ServiceContext;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Service context with the message store
    service_context: Arc<ServiceContext>,
    /// Connection manager for WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Fan-out and chat ordering
    event_dispatcher: Arc<EventDispatcher>,
    /// Shared pixel canvas
    canvas: Arc<PixelCanvas>,
    /// Shared collaborative document
    document: Arc<SharedDocument>,
}

impl GatewayState {
    /// Create a new gateway state with an empty room
    pub fn new(service_context: ServiceContext) -> Self {
        let connection_manager = ConnectionManager::new_shared();
        let event_dispatcher = Arc::new(EventDispatcher::new(Arc::clone(&connection_manager)));

        Self {
            service_context: Arc::new(service_context),
            connection_manager,
            event_dispatcher,
            canvas: Arc::new(PixelCanvas::new()),
            document: Arc::new(SharedDocument::new()),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the event dispatcher
    pub fn event_dispatcher(&self) -> &EventDispatcher {
        &self.event_dispatcher
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("service_context", &self.service_context)
            .field("connection_manager", &self.connection_manager)
            .finish()
    }
}
