use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Events emitted by the service layer after successful state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Order events
    OrderCreated {
        order_id: Uuid,
        order_number: String,
    },
    OrderUpdated(Uuid),
    OrderApproved {
        order_id: Uuid,
        order_number: String,
        outbound_ship_date: NaiveDate,
    },
    OrderCancelled(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: String,
        new_status: String,
    },

    // Stock events
    StockAdjusted {
        stock_item_id: Uuid,
        quantity_change: i32,
        movement_type: String,
    },
    StockAllocated {
        stock_item_id: Uuid,
        order_id: Uuid,
        quantity: i32,
    },

    // Shipment events
    ShipmentCreated(Uuid),

    // Document events
    LabelGenerated {
        box_id: Uuid,
        document_type: String,
        file_name: String,
    },
    BoxCreated {
        order_id: Uuid,
        box_number: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Consumes events from the channel and logs them. Runs until the
/// channel closes; downstream integrations (webhooks, queues) would
/// subscribe here.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::OrderCreated {
                order_id,
                order_number,
            } => {
                info!(order_id = %order_id, order_number = %order_number, "Order created");
            }
            Event::OrderApproved {
                order_id,
                order_number,
                outbound_ship_date,
            } => {
                info!(
                    order_id = %order_id,
                    order_number = %order_number,
                    outbound_ship_date = %outbound_ship_date,
                    "Order approved"
                );
            }
            Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            } => {
                info!(order_id = %order_id, old_status = %old_status, new_status = %new_status, "Order status changed");
            }
            Event::StockAdjusted {
                stock_item_id,
                quantity_change,
                movement_type,
            } => {
                info!(
                    stock_item_id = %stock_item_id,
                    quantity_change = quantity_change,
                    movement_type = %movement_type,
                    "Stock adjusted"
                );
            }
            Event::LabelGenerated {
                box_id,
                document_type,
                file_name,
            } => {
                info!(box_id = %box_id, document_type = %document_type, file_name = %file_name, "Label generated");
            }
            other => {
                info!(event = ?other, "Event processed");
            }
        }
    }
    info!("Event channel closed; event processor exiting");
}
