//! Service layer. Each service owns the business rules for one resource
//! and is handed its database handle, observers, and event sender at
//! wiring time.

pub mod history;
pub mod item_requests;
pub mod items;
pub mod notifications;
pub mod purchase_orders;
pub mod used_items;
pub mod users;

pub use history::HistoryService;
pub use item_requests::ItemRequestService;
pub use items::ItemService;
pub use notifications::NotificationService;
pub use purchase_orders::PurchaseOrderService;
pub use used_items::UsedItemService;
pub use users::UserService;
