//! Componentes do motor de fechamento

pub mod closing_calculator;
pub mod item_allocator;
pub mod receivable_tracker;
pub mod route_lifecycle;
