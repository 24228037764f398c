// Domain layer: compatibility models, persisted records, storefront queries and ports.

pub mod model;
pub mod ports;
pub mod query;
pub mod record;
