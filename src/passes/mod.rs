//! The nine rewrite passes, run in the fixed priority order assembled by
//! [`crate::simplify_tree`].

mod adder;
mod associator;
mod degenerate;
mod distributor;
mod geometric_product;
mod inner_product;
mod inverter;
mod multiplier;
mod outer_product;

pub use adder::Adder;
pub use associator::Associator;
pub use degenerate::DegenerateCaseHandler;
pub use distributor::Distributor;
pub use geometric_product::GeometricProductHandler;
pub use inner_product::InnerProductHandler;
pub use inverter::Inverter;
pub use multiplier::Multiplier;
pub use outer_product::OuterProductHandler;
