pub mod dtos;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgTicketRepository, TicketRepository};
pub use services::TicketService;
