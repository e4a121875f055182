pub mod chat_turn;
pub mod message_store;

pub use chat_turn::{ChatTurn, Sender};
pub use message_store::MessageStore;
