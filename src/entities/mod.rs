pub mod item;
pub mod item_history;
pub mod item_request;
pub mod notification;
pub mod purchase_order_item;
pub mod used_item;
pub mod user;
