//! City layer - cities, resource ledger, founding and production

pub mod founding;
pub mod ledger;
pub mod production;
pub mod registry;

pub use founding::{found_city, Founding};
pub use ledger::{Commodity, Holdings, ResourceLedger};
pub use production::{
    building_cost, claim_radius, process_city, unit_cost, CityReport, ProductionEvent, StallReason,
};
pub use registry::{create_city, BuildTarget, BuildingKind, City, CityRegistry};
