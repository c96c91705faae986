// Purpose: the single voice, its parameter table, and the threaded front end
// that drives an engine from a message queue.

pub mod message;
pub mod mono;
pub mod params;
pub mod voice;
