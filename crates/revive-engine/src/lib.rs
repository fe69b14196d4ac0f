//! # revive-engine — Schema-Guided Object Revival
//!
//! Turns JSON documents into graphs of typed instances. A schema says which
//! type to construct at each object, which nested schemas apply to which
//! properties, and which arrays hold revived elements; everything else is
//! copied onto the instance as a plain value.
//!
//! ```
//! use revive_core::{ConstructionError, FieldTable, ObjectSchema, RevivalOptions, Revivable, Schema};
//!
//! #[derive(Debug, Default)]
//! struct Job { title: String }
//!
//! impl Revivable for Job {
//!     const TYPE_NAME: &'static str = "Job";
//!     fn construct() -> Result<Self, ConstructionError> { Ok(Self::default()) }
//!     fn fields() -> FieldTable<Self> {
//!         FieldTable::new().value("title", |j: &mut Job, title: String| j.title = title)
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Person { name: String, job: Option<Job> }
//!
//! impl Person {
//!     fn job_title(&self) -> Option<&str> { self.job.as_ref().map(|j| j.title.as_str()) }
//! }
//!
//! impl Revivable for Person {
//!     const TYPE_NAME: &'static str = "Person";
//!     fn construct() -> Result<Self, ConstructionError> { Ok(Self::default()) }
//!     fn fields() -> FieldTable<Self> {
//!         FieldTable::new()
//!             .value("name", |p: &mut Person, name: String| p.name = name)
//!             .optional("job", |p: &mut Person, job: Option<Job>| p.job = job)
//!     }
//! }
//!
//! let schema = ObjectSchema::of::<Person>().property("job", Schema::of::<Job>());
//! let person: Person = revive_engine::unmarshal(
//!     r#"{"name": "John Smith", "job": {"title": "Developer"}}"#,
//!     schema,
//!     &RevivalOptions::default(),
//! )?;
//! assert_eq!(person.job_title(), Some("Developer"));
//! # Ok::<(), revive_core::ReviveError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `revive-core` internally.
//! - Single-threaded and synchronous; no state survives a call.
//! - Every failure aborts the call. No partial graphs are returned.

pub mod reviver;
pub mod unmarshal;

pub use reviver::Reviver;
pub use unmarshal::{from_str, from_value, unmarshal, unmarshal_value, unmarshal_vec};
