use crate::session::DashboardSnapshot;
use fixwatch_types::RunSession;

/// Events delivered to the display layer.
///
/// Per-resource poll failures deliberately have no variant: they are
/// recorded as diagnostics and self-heal on the next tick.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// A run was accepted by the gateway and polling is about to begin.
    Started { session: RunSession },

    /// A poll response or uptime tick changed the store.
    StateUpdated { snapshot: Box<DashboardSnapshot> },

    /// Polling was stopped. Emitted once per stop.
    Stopped,
}
