pub mod order_executor;
pub mod translator;
pub mod validator;

pub use order_executor::OrderExecutor;
pub use translator::{build_order, translate, OrderSettings};
pub use validator::validate;
