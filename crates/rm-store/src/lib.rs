//! `rm-store` — the ride store that feeds search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`store`]  | `RideStore`: insert, post, status, seats, search        |
//! | [`post`]   | `PostRide` and its validation                           |
//! | [`loader`] | `load_rides_csv`, `load_rides_reader`                   |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                          |

pub mod error;
pub mod loader;
pub mod post;
pub mod store;


pub use error::{StoreError, StoreResult};
pub use loader::{load_rides_csv, load_rides_reader};
pub use post::PostRide;
pub use store::RideStore;
