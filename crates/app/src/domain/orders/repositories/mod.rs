//! Order Repositories

mod items;
mod orders;
mod receipts;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
pub(crate) use receipts::PgReceiptsRepository;
