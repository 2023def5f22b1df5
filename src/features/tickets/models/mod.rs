mod ticket;

pub use ticket::{NewTicket, Ticket, TicketStatus};
