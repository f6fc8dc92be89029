//! # Plumbline
//!
//! Struct-level validation hooks with namespace-aware error reporting.
//!
//! Field rules check one value at a time. Plumbline adds the other half: a
//! callback that sees a whole struct, knows where in the object graph that
//! struct sits, and reports errors that land at the right path no matter how
//! deeply the struct is nested.
//!
//! ## Quick Example
//!
//! ```rust
//! use plumbline::prelude::*;
//!
//! #[derive(Clone)]
//! struct Customer {
//!     email: String,
//! }
//!
//! impl Reflect for Customer {
//!     fn reflect(&self) -> Value {
//!         StructValue::new("Customer").field("Email", &self.email).into()
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct Order {
//!     customer: Customer,
//! }
//!
//! impl Validatable for Order {
//!     fn validate(&self, sl: &mut dyn StructLevel) {
//!         // Validate the customer on its own, then graft its errors in.
//!         if let Validation::Failure(errors) = sl.validator().validate_struct(&self.customer) {
//!             sl.report_validation_errors("", "", errors);
//!         }
//!     }
//! }
//!
//! impl Reflect for Order {
//!     fn reflect(&self) -> Value {
//!         StructValue::new("Order").self_validating(self).into()
//!     }
//! }
//!
//! let mut validate = Validate::new();
//! validate.register_field_rule("Customer", "Email", "required", |v| !v.is_zero());
//!
//! let order = Order { customer: Customer { email: String::new() } };
//! match validate.validate_struct(&order) {
//!     Validation::Failure(errors) => {
//!         assert_eq!(errors.namespaces(), vec!["Order.Customer.Email"]);
//!     }
//!     Validation::Success(_) => panic!("expected failure"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
mod context;
pub mod errors;
mod extract;
pub mod namespace;
pub mod semigroup;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod struct_level;
pub mod testing;
pub mod validation;
pub mod validator;
pub mod value;

// Re-exports
pub use config::Config;
pub use errors::{FieldError, ValidationErrors};
pub use extract::CustomTypeFn;
pub use semigroup::Semigroup;
pub use struct_level::{StructLevel, StructLevelFn, Validatable};
pub use validation::Validation;
pub use validator::Validate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::errors::{FieldError, ValidationErrors};
    pub use crate::semigroup::Semigroup;
    pub use crate::struct_level::{StructLevel, Validatable};
    pub use crate::validation::Validation;
    pub use crate::validator::Validate;
    pub use crate::value::{Kind, Reflect, StructValue, Value};
}
