//! Business logic services over the database layer.

pub mod documents;
pub mod orders;
pub mod stock;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

pub use documents::DocumentService;
pub use orders::OrderService;
pub use stock::StockService;

/// All services wired to one pool and event channel.
#[derive(Clone)]
pub struct AppServices {
    pub orders: OrderService,
    pub stock: StockService,
    pub documents: DocumentService,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            orders: OrderService::new(db_pool.clone(), event_sender.clone()),
            stock: StockService::new(db_pool.clone(), event_sender.clone()),
            documents: DocumentService::new(db_pool, event_sender),
        }
    }
}
