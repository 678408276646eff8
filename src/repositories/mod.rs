pub mod closing_repository;
pub mod receivable_repository;
pub mod route_item_repository;
pub mod route_repository;
pub mod sale_order_repository;
