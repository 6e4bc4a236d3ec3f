pub mod board;
pub mod filter_bar;
pub mod room_card;
pub mod room_table;
pub mod summary_strip;
pub mod warning_banner;

pub use board::RoomStatusBoard;
