//! Application state and its read/write operations.
//!
//! All data lives in process memory behind `parking_lot` locks; nothing
//! survives a restart. The operations are split per entity:
//! - `document` - document collection operations
//! - `user` - user collection operations (including auth lookups)
//! - `activity` - append-only audit log operations

mod activity;
mod document;
mod user;

use parking_lot::RwLock;
use std::sync::Arc;

use crate::export::{RenderSurface, TypstRenderSurface};

pub struct AppState {
    pub users: RwLock<Vec<crate::user::models::User>>,
    pub documents: RwLock<Vec<crate::document::models::Document>>,
    pub activities: RwLock<Vec<crate::activity::models::Activity>>,
    pub render: Arc<dyn RenderSurface>,
}

impl AppState {
    /// State with the production Typst render surface and the seeded
    /// demo accounts.
    pub fn new() -> Self {
        Self::with_render_surface(Arc::new(TypstRenderSurface))
    }

    /// State with a caller-provided render surface. Tests use this to
    /// swap in a mock rasterizer.
    pub fn with_render_surface(render: Arc<dyn RenderSurface>) -> Self {
        let state = AppState {
            users: RwLock::new(Vec::new()),
            documents: RwLock::new(Vec::new()),
            activities: RwLock::new(Vec::new()),
            render,
        };
        state.seed_demo_users();
        state
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
