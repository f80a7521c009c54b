pub mod geo;
pub mod input;
pub mod loaders;
pub mod record;
pub mod route;

pub use geo::{Coordinate, ResolvedAddress};
pub use input::{InputError, InputItem};
pub use loaders::{InputSource, TextFileSource};
pub use record::{RouteRecord, Status};
pub use route::{format_duration, meters_to_km, RouteMetrics};
