//! Shared domain types for the reviver integration tests.

#![allow(dead_code)]

use revive_core::{
    ConstructionError, FieldTable, HasSchema, ObjectSchema, Revivable, Schema,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobProperties {
    prop1: String,
}

impl JobProperties {
    pub fn prop1(&self) -> &str {
        &self.prop1
    }
}

impl Revivable for JobProperties {
    const TYPE_NAME: &'static str = "JobProperties";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new().value("prop1", |p: &mut JobProperties, v: String| p.prop1 = v)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Job {
    title: String,
    props: Option<JobProperties>,
}

impl Job {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn props(&self) -> Option<&JobProperties> {
        self.props.as_ref()
    }
}

impl Revivable for Job {
    const TYPE_NAME: &'static str = "Job";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new()
            .value("title", |j: &mut Job, title: String| j.title = title)
            .optional("props", |j: &mut Job, props: Option<JobProperties>| {
                j.props = props
            })
    }
}

/// A person whose job is optional and needs an explicit schema.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    name: String,
    job: Option<Job>,
}

impl Person {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }
}

impl Revivable for Person {
    const TYPE_NAME: &'static str = "Person";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new()
            .value("name", |p: &mut Person, name: String| p.name = name)
            .optional("job", |p: &mut Person, job: Option<Job>| p.job = job)
    }
}

/// An employee that reports its own nested schema, including a list of
/// friends of the same type.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Employee {
    name: String,
    job: Job,
    friends: Vec<Employee>,
}

impl Employee {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn friends(&self) -> &[Employee] {
        &self.friends
    }
}

impl Revivable for Employee {
    const TYPE_NAME: &'static str = "Employee";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new()
            .value("name", |e: &mut Employee, name: String| e.name = name)
            .instance("job", |e: &mut Employee, job: Job| e.job = job)
            .list("friends", |e: &mut Employee, friends: Vec<Employee>| {
                e.friends = friends
            })
    }

    fn as_has_schema(&self) -> Option<&dyn HasSchema> {
        Some(self)
    }
}

impl HasSchema for Employee {
    fn revive_schema(&self) -> Schema {
        ObjectSchema::of::<Employee>()
            .property(
                "job",
                ObjectSchema::of::<Job>().property("props", Schema::of::<JobProperties>()),
            )
            .property("friends", Schema::array(Schema::of::<Employee>()))
            .into()
    }
}

/// Counts how often its post-revival hook ran.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Audited {
    label: String,
    hook_runs: u32,
}

impl Audited {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn hook_runs(&self) -> u32 {
        self.hook_runs
    }
}

impl Revivable for Audited {
    const TYPE_NAME: &'static str = "Audited";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new().value("label", |a: &mut Audited, label: String| a.label = label)
    }

    fn revived(&mut self) -> Result<(), ConstructionError> {
        if self.label.is_empty() {
            return Err(ConstructionError::new("label must not be empty"));
        }
        self.hook_runs += 1;
        Ok(())
    }
}

/// A type whose construction always fails.
#[derive(Debug)]
pub struct Unbuildable;

impl Revivable for Unbuildable {
    const TYPE_NAME: &'static str = "Unbuildable";

    fn construct() -> Result<Self, ConstructionError> {
        Err(ConstructionError::new("no zero-argument form"))
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new()
    }
}

/// Holds an `Unbuildable` so construction failures can be observed nested.
#[derive(Debug, Default)]
pub struct Holder;

impl Revivable for Holder {
    const TYPE_NAME: &'static str = "Holder";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self)
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new().instance("inner", |_: &mut Holder, _: Unbuildable| {})
    }
}

/// Reports a schema for a different type, which the reviver rejects.
#[derive(Debug, Default)]
pub struct Confused {
    name: String,
}

impl Revivable for Confused {
    const TYPE_NAME: &'static str = "Confused";

    fn construct() -> Result<Self, ConstructionError> {
        Ok(Self::default())
    }

    fn fields() -> FieldTable<Self> {
        FieldTable::new().value("name", |c: &mut Confused, name: String| c.name = name)
    }

    fn as_has_schema(&self) -> Option<&dyn HasSchema> {
        Some(self)
    }
}

impl HasSchema for Confused {
    fn revive_schema(&self) -> Schema {
        Schema::of::<Person>()
    }
}
