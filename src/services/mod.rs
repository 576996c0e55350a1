pub mod stt;
pub mod wit;
