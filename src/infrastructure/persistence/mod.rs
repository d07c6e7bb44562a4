pub mod memory;
pub mod postgres;

pub use memory::InMemoryInvoiceRepository;
pub use postgres::PostgresInvoiceRepository;
