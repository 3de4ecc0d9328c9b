//! Per-collection schema: field template and display groups.
//!
//! # Responsibility
//! - Hold the ordered set of known field keys (the template).
//! - Hold the named, ordered field groups used for display/editing.
//!
//! # Invariants
//! - The template is only rewritten by a full schema replacement; ad hoc
//!   field insertion through a record write never updates it.
//! - Groups are presentation only; removing a field from every group does
//!   not delete its stored values.

use serde::{Deserialize, Serialize};

/// Named, ordered subset of field keys. Groups may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub fields: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Template plus groups for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    template: Vec<String>,
    groups: Vec<Group>,
}

impl Schema {
    pub fn new(template: Vec<String>, groups: Vec<Group>) -> Self {
        Self { template, groups }
    }

    /// Ordered field keys known to the collection.
    pub fn template(&self) -> &[String] {
        &self.template
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Replaces the groups and recomputes the template as the de-duplicated
    /// concatenation of all group fields in first-encounter order.
    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        self.template = template_from_groups(&groups);
        self.groups = groups;
    }
}

/// First-encounter-order de-duplication of every field named by `groups`.
pub fn template_from_groups(groups: &[Group]) -> Vec<String> {
    let mut template: Vec<String> = Vec::new();
    for group in groups {
        for field in &group.fields {
            if !template.iter().any(|known| known == field) {
                template.push(field.clone());
            }
        }
    }
    template
}

#[cfg(test)]
mod tests {
    use super::{template_from_groups, Group, Schema};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn template_dedupes_in_first_encounter_order() {
        let groups = vec![
            Group::new("identity", fields(&["plate", "brand"])),
            Group::new("service", fields(&["brand", "garage", "plate", "phone"])),
        ];
        assert_eq!(
            template_from_groups(&groups),
            fields(&["plate", "brand", "garage", "phone"])
        );
    }

    #[test]
    fn replace_groups_rewrites_template() {
        let mut schema = Schema::new(fields(&["old"]), vec![]);
        schema.replace_groups(vec![Group::new("g", fields(&["a", "b"]))]);
        assert_eq!(schema.template(), fields(&["a", "b"]).as_slice());
        assert_eq!(schema.groups().len(), 1);
    }
}
