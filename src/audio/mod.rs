pub mod error;
pub mod playback;
pub mod state;
pub mod system;
pub mod util;
