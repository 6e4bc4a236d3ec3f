pub mod d100_room_status;
