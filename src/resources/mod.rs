//! Per-resource services. Each one builds URLs and payloads and hands them to
//! [`Client::execute`](crate::Client::execute); none holds state of its own.

pub mod assets;
pub mod companies;
pub mod licenses;
pub mod metrics;
pub mod users;

pub use assets::{Asset, AssetListOptions, AssetService};
pub use companies::{
    Company, CompanyListOptions, CompanyService, LeanCompany, LeanCompanyListOptions,
};
pub use licenses::{Currency, License};
pub use metrics::{DimensionData, Metric, MetricsListOptions, MetricsService};
pub use users::{User, UserService};
