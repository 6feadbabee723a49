mod devices;
mod topology;

pub use devices::*;
pub use topology::*;
