pub mod remote;
pub mod types;

pub use remote::RemoteDistanceProvider;
pub use types::MatrixResponse;
