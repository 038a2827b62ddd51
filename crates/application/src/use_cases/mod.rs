pub mod resolution;

pub use resolution::{GetZoneDelegationUseCase, ResolveAddressUseCase, ResolveNameServersUseCase};
