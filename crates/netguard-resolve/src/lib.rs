//! Call-target resolution for netguard.
//!
//! The analysis needs to know, for each call expression, which function it
//! invokes and which annotations that function carries. Producing that
//! knowledge is the job of a semantic front end; this crate defines the seam
//! through which the analysis asks for it ([`CallResolver`]) and the plain
//! table form a front end hands it over in ([`BindingTable`]).

pub mod resolver;
pub mod target;

pub use netguard_syntax::CallId;
pub use resolver::{Binding, BindingTable, CallResolver, NoBindings};
pub use target::{CallTarget, ResolvedCall};
