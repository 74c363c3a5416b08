//! Domain Port Interfaces
//!
//! Contracts implemented outside the domain: the router implements
//! [`ServiceLocator`], generated fragments implement [`ExtraInjector`].

pub mod injector;
pub mod locator;

pub use injector::ExtraInjector;
pub use locator::ServiceLocator;
