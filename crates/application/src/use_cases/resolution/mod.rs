pub mod get_zone_delegation;
pub mod resolve_address;
pub mod resolve_name_servers;

pub use get_zone_delegation::GetZoneDelegationUseCase;
pub use resolve_address::ResolveAddressUseCase;
pub use resolve_name_servers::ResolveNameServersUseCase;
