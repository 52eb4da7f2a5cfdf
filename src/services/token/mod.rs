pub mod factory;
pub mod jwt;
pub mod maker;
pub mod payload;
pub mod sealed;

pub use factory::{TokenScheme, build_token_maker};
pub use maker::{TokenError, TokenMaker};
pub use payload::Payload;
