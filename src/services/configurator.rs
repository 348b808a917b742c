use serde::Serialize;

use crate::domain::compatibility::{self, BuildValidation};
use crate::domain::component::Component;
use crate::domain::types::{CategorySlug, ComponentId};
use crate::repository::ComponentReader;

use super::{ServiceError, ServiceResult};

/// Result of a manual-mode compatibility query.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredComponents {
    /// Catalog components of the requested category compatible with every
    /// already-selected part, ascending by price.
    pub components: Vec<Component>,
    /// Full records of the currently-selected ids, for display.
    pub selected: Vec<Component>,
}

/// Whole-build validation with derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub validation: BuildValidation,
    pub components: Vec<Component>,
    pub total_price: f64,
    pub total_tdp: i32,
}

/// Drop non-positive ids; malformed input narrows the query instead of
/// failing it.
fn sanitize_ids(ids: &[i32]) -> Vec<ComponentId> {
    ids.iter()
        .copied()
        .filter_map(|id| ComponentId::new(id).ok())
        .collect()
}

/// Core business logic for manual component selection.
///
/// Returns the components of `category` compatible with the current partial
/// build. An unknown category slug yields an empty result rather than an
/// error, and an empty selection returns the whole category unfiltered.
pub fn filter_compatible<R>(
    category: &str,
    selected_ids: &[i32],
    repo: &R,
) -> ServiceResult<FilteredComponents>
where
    R: ComponentReader,
{
    let Ok(slug) = CategorySlug::try_from(category) else {
        return Ok(FilteredComponents {
            components: Vec::new(),
            selected: Vec::new(),
        });
    };

    let ids = sanitize_ids(selected_ids);

    if ids.is_empty() {
        let components = repo.list_components_by_category(slug).map_err(|e| {
            log::error!("Failed to list components for {slug}: {e}");
            ServiceError::Internal
        })?;
        return Ok(FilteredComponents {
            components,
            selected: Vec::new(),
        });
    }

    let selected = repo.get_components_by_ids(&ids).map_err(|e| {
        log::error!("Failed to resolve selected components: {e}");
        ServiceError::Internal
    })?;
    let selected_by_category = compatibility::index_by_category(selected.clone());

    let components = repo
        .list_components_by_category(slug)
        .map_err(|e| {
            log::error!("Failed to list components for {slug}: {e}");
            ServiceError::Internal
        })?
        .into_iter()
        .filter(|candidate| compatibility::candidate_is_compatible(candidate, &selected_by_category))
        .collect();

    Ok(FilteredComponents {
        components,
        selected,
    })
}

/// Validate an arbitrary component id set and derive display totals.
pub fn validate_build<R>(component_ids: &[i32], repo: &R) -> ServiceResult<BuildReport>
where
    R: ComponentReader,
{
    let ids = sanitize_ids(component_ids);
    let components = repo.get_components_by_ids(&ids).map_err(|e| {
        log::error!("Failed to resolve components for validation: {e}");
        ServiceError::Internal
    })?;

    let validation = compatibility::validate_build(&components);
    let total_price = compatibility::total_price(&components);
    let total_tdp = compatibility::total_tdp(&components);

    Ok(BuildReport {
        validation,
        components,
        total_price,
        total_tdp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::ComponentSpecs;
    use crate::domain::types::{
        CategoryId, ComponentName, ComponentPrice, RamType, Socket, Watts,
    };
    use crate::repository::test::TestRepository;

    fn component(id: i32, category: CategorySlug, price: f64) -> Component {
        Component {
            id: ComponentId::new(id).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            category,
            name: ComponentName::new(format!("component-{id}")).unwrap(),
            price: ComponentPrice::new(price).unwrap(),
            image: None,
            socket: None,
            ram_type: None,
            tdp: None,
            psu_wattage: None,
            specs: ComponentSpecs::default(),
        }
    }

    fn catalog() -> Vec<Component> {
        let mut cpu = component(1, CategorySlug::Cpu, 9_000.0);
        cpu.socket = Some(Socket::new("AM5").unwrap());
        cpu.tdp = Some(Watts::new(105).unwrap());

        let mut mb_am5 = component(2, CategorySlug::Motherboard, 4_500.0);
        mb_am5.socket = Some(Socket::new("AM5").unwrap());
        mb_am5.ram_type = Some(RamType::new("DDR5").unwrap());

        let mut mb_am4 = component(3, CategorySlug::Motherboard, 2_500.0);
        mb_am4.socket = Some(Socket::new("AM4").unwrap());
        mb_am4.ram_type = Some(RamType::new("DDR4").unwrap());

        let mut gpu = component(4, CategorySlug::Gpu, 20_000.0);
        gpu.tdp = Some(Watts::new(200).unwrap());

        let mut psu_small = component(5, CategorySlug::Psu, 1_500.0);
        psu_small.psu_wattage = Some(Watts::new(400).unwrap());

        let mut psu_big = component(6, CategorySlug::Psu, 2_500.0);
        psu_big.psu_wattage = Some(Watts::new(650).unwrap());

        vec![cpu, mb_am5, mb_am4, gpu, psu_small, psu_big]
    }

    #[test]
    fn returns_whole_category_when_nothing_is_selected() {
        let repo = TestRepository::new(catalog());

        let result = filter_compatible("motherboard", &[], &repo).unwrap();

        assert_eq!(result.components.len(), 2);
        assert!(result.selected.is_empty());
        // Ascending by price.
        assert!(result.components[0].price.get() <= result.components[1].price.get());
    }

    #[test]
    fn selected_cpu_narrows_motherboards_to_its_socket() {
        let repo = TestRepository::new(catalog());

        let result = filter_compatible("motherboard", &[1], &repo).unwrap();

        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].id, 2);
        assert_eq!(result.selected.len(), 1);
    }

    #[test]
    fn psu_candidates_cover_selected_draw_plus_headroom() {
        let repo = TestRepository::new(catalog());

        // cpu 105 W + gpu 200 W + 100 W headroom = 405 W required.
        let result = filter_compatible("psu", &[1, 4], &repo).unwrap();

        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[0].id, 6);
    }

    #[test]
    fn unknown_category_yields_empty_result() {
        let repo = TestRepository::new(catalog());

        let result = filter_compatible("watercooling", &[1], &repo).unwrap();

        assert!(result.components.is_empty());
        assert!(result.selected.is_empty());
    }

    #[test]
    fn non_positive_ids_are_dropped_silently() {
        let repo = TestRepository::new(catalog());

        let result = filter_compatible("motherboard", &[0, -3], &repo).unwrap();

        // Nothing valid selected, so the whole category comes back.
        assert_eq!(result.components.len(), 2);
    }

    #[test]
    fn filtering_is_idempotent_for_a_fixed_catalog() {
        let repo = TestRepository::new(catalog());

        let first = filter_compatible("motherboard", &[1], &repo).unwrap();
        let second = filter_compatible("motherboard", &[1], &repo).unwrap();

        let ids = |r: &FilteredComponents| r.components.iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn validation_report_includes_totals() {
        let repo = TestRepository::new(catalog());

        let report = validate_build(&[1, 4, 5], &repo).unwrap();

        assert!(!report.validation.compatible);
        assert_eq!(report.total_price, 30_500.0);
        assert_eq!(report.total_tdp, 305);
    }

    #[test]
    fn validating_an_empty_selection_is_compatible() {
        let repo = TestRepository::new(catalog());

        let report = validate_build(&[], &repo).unwrap();

        assert!(report.validation.compatible);
        assert!(report.validation.errors.is_empty());
        assert_eq!(report.total_price, 0.0);
    }
}
