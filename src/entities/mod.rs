//! Database entities, one module per table.

pub mod box_document;
pub mod contract_config;
pub mod kit;
pub mod kit_item;
pub mod lab;
pub mod order;
pub mod order_box;
pub mod shipment;
pub mod site;
pub mod stock_item;
pub mod stock_movement;
