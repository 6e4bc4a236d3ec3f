pub mod d100_room_status;

pub use d100_room_status::ui::RoomStatusBoard;
