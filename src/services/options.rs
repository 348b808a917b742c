use std::collections::BTreeMap;

use crate::domain::profile::{BudgetRange, BudgetTier, TaskType, TaskTypeInfo};

/// Static reference data for the task picker, keyed by task slug.
pub fn task_types() -> BTreeMap<&'static str, TaskTypeInfo> {
    TaskType::ALL
        .iter()
        .map(|task| (task.as_str(), task.info()))
        .collect()
}

/// Static reference data for the budget picker, keyed by tier slug.
pub fn budget_ranges() -> BTreeMap<&'static str, BudgetRange> {
    BudgetTier::ALL
        .iter()
        .map(|tier| (tier.as_str(), tier.range()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_every_task_type() {
        let options = task_types();
        assert_eq!(options.len(), TaskType::ALL.len());
        assert_eq!(options["office"].name, "Office Work");
    }

    #[test]
    fn exposes_every_budget_tier() {
        let options = budget_ranges();
        assert_eq!(options.len(), BudgetTier::ALL.len());
        assert_eq!(options["optimal"].recommended, 45_000);
    }
}
