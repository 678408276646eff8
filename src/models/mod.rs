//! Modelos de dados do motor de fechamento

pub mod closing;
pub mod receivable;
pub mod route;
pub mod route_item;
pub mod sale_order;

pub use closing::{CashDenomination, Closing, Expense};
pub use receivable::{PaymentMethod, Receivable};
pub use route::{Route, RouteStatus};
pub use route_item::RouteItem;
pub use sale_order::SaleOrder;
