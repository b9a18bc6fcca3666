//! Protocol module containing the command builder, the legacy byte encoder,
//! and the last-command observability record.

pub mod command;
pub mod encode;
pub mod record;

pub use command::MatrixCommand;
pub use encode::{encode_wire, wire_safe};
pub use record::CommandRecord;
