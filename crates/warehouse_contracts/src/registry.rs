//! Contract registry and the built-in job-ads warehouse declaration.
//!
//! The registry is an ordered, duplicate-free collection of relation
//! contracts. Adding a relation to a deployment is a data change here, not
//! a code change in the validators.

use std::collections::HashSet;

use crate::{
    DataCheck, NamespaceMap, ReferentialLink, RegistryError, RelationBuilder, RelationContract,
    RelationGroup,
};

/// Ordered collection of relation contracts.
///
/// Construction enforces the registry invariants: relation names are unique
/// within their group and column names are unique within each relation.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    contracts: Vec<RelationContract>,
}

impl ContractRegistry {
    /// Creates a registry, validating its invariants.
    pub fn new(contracts: Vec<RelationContract>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for contract in &contracts {
            if !seen.insert((contract.group, contract.name.clone())) {
                return Err(RegistryError::DuplicateRelation {
                    group: contract.group,
                    name: contract.name.clone(),
                });
            }

            let mut columns = HashSet::new();
            for column in &contract.columns {
                if !columns.insert(column.name.as_str()) {
                    return Err(RegistryError::DuplicateColumn {
                        relation: contract.name.clone(),
                        column: column.name.clone(),
                    });
                }
            }
        }

        Ok(Self { contracts })
    }

    /// Iterates contracts in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RelationContract> {
        self.contracts.iter()
    }

    /// Number of contracts in the registry.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Builds the standard check list for a registry: one non-emptiness check
/// per relation in declaration order, followed by one referential check per
/// link. Relation names are namespace-qualified so the checks run unchanged
/// under a namespace override.
pub fn standard_checks(
    registry: &ContractRegistry,
    links: &[ReferentialLink],
    namespaces: &NamespaceMap,
) -> Vec<DataCheck> {
    let mut checks: Vec<DataCheck> = registry
        .iter()
        .map(|contract| DataCheck::non_empty(&namespaces.qualify(contract)))
        .collect();

    checks.extend(
        links
            .iter()
            .map(|link| DataCheck::referential(&link.dependent, &link.referenced, &link.key)),
    );

    checks
}

/// Columns shared by every mart view.
fn mart(name: &str) -> RelationContract {
    RelationBuilder::new(name, RelationGroup::Mart)
        .column("vacancies", "INTEGER")
        .column("occupation", "VARCHAR")
        .column("occupation_field", "VARCHAR")
        .column("application_deadline", "TIMESTAMP")
        .column("headline", "VARCHAR")
        .column("employer_name", "VARCHAR")
        .column("employment_type", "VARCHAR")
        .column("salary_type", "VARCHAR")
        .column("duration", "VARCHAR")
        .column("workplace_region", "VARCHAR")
        .column("job_description_id", "INTEGER")
        .column("description_html", "VARCHAR")
        .column("occupation_group", "VARCHAR")
        .build()
}

/// The job-ads warehouse registry: the fact relation, its dimensions, and
/// the three consumer marts.
pub fn job_ads_registry() -> ContractRegistry {
    let contracts = vec![
        RelationBuilder::new("fct_job_ads", RelationGroup::Warehouse)
            .column("job_description_id", "INTEGER")
            .column("auxilliary_id", "VARCHAR")
            .column("employer_id", "VARCHAR")
            .column("job_details_id", "VARCHAR")
            .column("occupation_id", "VARCHAR")
            .column("vacancies", "INTEGER")
            .column("relevance", "DOUBLE")
            .column("application_deadline", "TIMESTAMP")
            .build(),
        RelationBuilder::new("dim_occupation", RelationGroup::Warehouse)
            .column("occupation_id", "VARCHAR")
            .column("occupation", "VARCHAR")
            .column("occupation_group", "VARCHAR")
            .column("occupation_field", "VARCHAR")
            .build(),
        RelationBuilder::new("dim_job_details", RelationGroup::Warehouse)
            .column("job_details_id", "VARCHAR")
            .column("employment_type", "VARCHAR")
            .column("salary_type", "VARCHAR")
            .column("duration", "VARCHAR")
            .column("scope_of_work_min", "INTEGER")
            .column("scope_of_work_max", "INTEGER")
            .build(),
        RelationBuilder::new("dim_job_description", RelationGroup::Warehouse)
            .column("job_description_id", "INTEGER")
            .column("headline", "VARCHAR")
            .column("description_text", "VARCHAR")
            .column("description_html", "VARCHAR")
            .build(),
        RelationBuilder::new("dim_employer", RelationGroup::Warehouse)
            .column("employer_id", "VARCHAR")
            .column("employer_name", "VARCHAR")
            .column("employer_workplace", "VARCHAR")
            .column("employer_organization_number", "VARCHAR")
            .column("workplace_street_address", "VARCHAR")
            .column("workplace_region", "VARCHAR")
            .column("workplace_postcode", "VARCHAR")
            .column("workplace_city", "VARCHAR")
            .column("workplace_country", "VARCHAR")
            .build(),
        RelationBuilder::new("dim_auxilliary_attributes", RelationGroup::Warehouse)
            .column("auxilliary_id", "VARCHAR")
            .column("experience_required", "VARCHAR")
            .column("access_to_own_car", "VARCHAR")
            .column("driving_license_required", "VARCHAR")
            .build(),
        mart("mart_it"),
        mart("mart_economics"),
        mart("mart_construction"),
    ];

    ContractRegistry::new(contracts).expect("built-in registry is duplicate-free")
}

/// Referential links for the job-ads warehouse: every mart row must point
/// at an existing fact row. Names are namespace-qualified against the given
/// map so the links match the relations the checks will query.
pub fn job_ads_links(namespaces: &NamespaceMap) -> Vec<ReferentialLink> {
    let fact = format!("{}.fct_job_ads", namespaces.namespace(RelationGroup::Warehouse));
    let mart_ns = namespaces.namespace(RelationGroup::Mart);

    ["mart_it", "mart_economics", "mart_construction"]
        .into_iter()
        .map(|mart| {
            ReferentialLink::new(
                format!("{mart_ns}.{mart}"),
                fact.clone(),
                "job_description_id",
            )
        })
        .collect()
}
