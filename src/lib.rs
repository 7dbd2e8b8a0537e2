pub mod normalize;
pub mod oto;
pub mod oto_file;
pub mod pitch;

// Utility modules
pub mod text;
