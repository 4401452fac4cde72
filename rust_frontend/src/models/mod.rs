pub mod booking;
pub mod catalog;
pub mod macros;
pub mod money;
pub mod reservation;
pub mod time;

pub use booking::*;
pub use catalog::*;
pub use money::Rubles;
pub use reservation::*;
pub use time::*;
