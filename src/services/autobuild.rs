//! Automatic build generation: a greedy, non-backtracking pipeline that
//! allocates a per-category slice of the total budget and picks one component
//! per category in dependency order. An earlier choice is never revisited when
//! a later category fails; that limitation is accepted by design.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::compatibility;
use crate::domain::component::Component;
use crate::domain::profile::{BudgetTemplate, MIN_BUDGET, TaskType};
use crate::domain::types::{CategorySlug, RamType, Socket};
use crate::repository::ComponentReader;

use super::{ServiceError, ServiceResult};

/// Wattage headroom demanded of a PSU during selection; intentionally larger
/// than the validator's 100 W.
pub const SELECTION_PSU_HEADROOM_WATTS: i32 = 150;

/// A build in progress, keyed by category in selection order.
pub type BuildMap = BTreeMap<CategorySlug, Component>;

/// Summary figures for a successfully generated build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildStats {
    pub total_price: f64,
    pub budget_used_percent: f64,
    pub total_tdp: i32,
    pub psu_margin: i32,
    pub task_type: TaskType,
    pub budget_template: BudgetTemplate,
}

/// Outcome of one generation run.
///
/// On failure `build` holds the partial selection accumulated before the
/// failing category; it is diagnostic data, not a usable configuration.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedBuild {
    pub success: bool,
    pub build: BuildMap,
    pub errors: Vec<String>,
    pub stats: Option<BuildStats>,
}

impl GeneratedBuild {
    fn failure(build: BuildMap, message: String) -> Self {
        Self {
            success: false,
            build,
            errors: vec![message],
            stats: None,
        }
    }
}

/// Generate one complete, compatible build for a task type and total budget.
///
/// Selection order is fixed: cpu, motherboard, ram, gpu, psu, case, storage.
/// The first five are mandatory; a miss there aborts the run with a
/// category-specific error. Case and storage are enrichments whose absence is
/// tolerated silently.
pub fn generate_build<R>(task_type: &str, budget: i64, repo: &R) -> ServiceResult<GeneratedBuild>
where
    R: ComponentReader,
{
    let Ok(task) = TaskType::try_from(task_type) else {
        let available = TaskType::ALL.map(TaskType::as_str).join(", ");
        return Ok(GeneratedBuild::failure(
            BuildMap::new(),
            format!("Unknown task type. Available: {available}"),
        ));
    };

    if budget < MIN_BUDGET {
        return Ok(GeneratedBuild::failure(
            BuildMap::new(),
            format!("Budget is too small. Minimum: {MIN_BUDGET}"),
        ));
    }

    let template = task.budget_template();
    let requirements = task.min_requirements();
    let mut build = BuildMap::new();

    // 1. CPU.
    let cpu_budget = template.sub_budget(budget, CategorySlug::Cpu);
    let Some(cpu) = select_cpu(repo, cpu_budget, requirements.cpu_min_cores)? else {
        return Ok(GeneratedBuild::failure(
            build,
            format!("Could not find a CPU within the {cpu_budget:.2} budget"),
        ));
    };
    build.insert(CategorySlug::Cpu, cpu.clone());

    // 2. Motherboard, bound to the CPU socket.
    let mb_budget = template.sub_budget(budget, CategorySlug::Motherboard);
    let Some(motherboard) = select_motherboard(repo, mb_budget, cpu.socket.as_ref())? else {
        let socket = cpu.socket.as_ref().map(Socket::as_str).unwrap_or("unspecified");
        return Ok(GeneratedBuild::failure(
            build,
            format!(
                "Could not find a motherboard (socket {socket}) within the {mb_budget:.2} budget"
            ),
        ));
    };
    build.insert(CategorySlug::Motherboard, motherboard.clone());

    // 3. RAM, bound to the motherboard's memory generation.
    let ram_budget = template.sub_budget(budget, CategorySlug::Ram);
    let Some(ram) = select_ram(
        repo,
        ram_budget,
        motherboard.ram_type.as_ref(),
        requirements.ram_min_gb,
    )?
    else {
        let ram_type = motherboard
            .ram_type
            .as_ref()
            .map(RamType::as_str)
            .unwrap_or("unspecified");
        return Ok(GeneratedBuild::failure(
            build,
            format!("Could not find RAM ({ram_type}) within the {ram_budget:.2} budget"),
        ));
    };
    build.insert(CategorySlug::Ram, ram);

    // 4. GPU.
    let gpu_budget = template.sub_budget(budget, CategorySlug::Gpu);
    let Some(gpu) = select_gpu(repo, gpu_budget, requirements.gpu_tdp_min)? else {
        return Ok(GeneratedBuild::failure(
            build,
            format!("Could not find a graphics card within the {gpu_budget:.2} budget"),
        ));
    };
    build.insert(CategorySlug::Gpu, gpu.clone());

    // 5. PSU, sized for the chosen CPU and GPU.
    let psu_budget = template.sub_budget(budget, CategorySlug::Psu);
    let required_wattage = cpu.tdp_or_zero() + gpu.tdp_or_zero() + SELECTION_PSU_HEADROOM_WATTS;
    let Some(psu) = select_psu(repo, psu_budget, required_wattage)? else {
        return Ok(GeneratedBuild::failure(
            build,
            format!(
                "Could not find a power supply (min {required_wattage} W) within the \
                 {psu_budget:.2} budget"
            ),
        ));
    };
    build.insert(CategorySlug::Psu, psu.clone());

    // 6-7. Case and storage are nice-to-haves; a miss is not an error.
    for slug in [CategorySlug::Case, CategorySlug::Storage] {
        let sub_budget = template.sub_budget(budget, slug);
        if let Some(extra) = select_any(repo, slug, sub_budget)? {
            build.insert(slug, extra);
        }
    }

    let components: Vec<Component> = build.values().cloned().collect();

    // Post-hoc validation; the per-category filters are stricter, so anything
    // surfacing here is reported as a warning rather than a failure.
    let validation = compatibility::validate_build(&components);
    let errors = validation.errors;

    let total_price = compatibility::total_price(&components);
    let stats = BuildStats {
        total_price,
        budget_used_percent: (total_price / budget as f64) * 100.0,
        total_tdp: compatibility::total_tdp(&components),
        psu_margin: psu.psu_wattage_or_zero() - (cpu.tdp_or_zero() + gpu.tdp_or_zero()),
        task_type: task,
        budget_template: template,
    };

    Ok(GeneratedBuild {
        success: true,
        build,
        errors,
        stats: Some(stats),
    })
}

fn list_category<R>(repo: &R, slug: CategorySlug) -> ServiceResult<Vec<Component>>
where
    R: ComponentReader,
{
    repo.list_components_by_category(slug).map_err(|e| {
        log::error!("Failed to list components for {slug}: {e}");
        ServiceError::Internal
    })
}

fn select_cpu<R>(repo: &R, budget: f64, min_cores: u32) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    let eligible = list_category(repo, CategorySlug::Cpu)?
        .into_iter()
        // Advisory core check: only declared counts below the minimum exclude.
        .filter(|cpu| match cpu.specs.cores {
            Some(cores) => cores >= min_cores,
            None => true,
        })
        .collect();
    Ok(closest_to_budget(eligible, budget))
}

fn select_motherboard<R>(
    repo: &R,
    budget: f64,
    socket: Option<&Socket>,
) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    let eligible = list_category(repo, CategorySlug::Motherboard)?
        .into_iter()
        .filter(|mb| mb.socket.as_ref() == socket)
        .collect();
    Ok(closest_to_budget(eligible, budget))
}

fn select_ram<R>(
    repo: &R,
    budget: f64,
    ram_type: Option<&RamType>,
    min_gb: u32,
) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    let eligible = list_category(repo, CategorySlug::Ram)?
        .into_iter()
        .filter(|ram| ram.ram_type.as_ref() == ram_type)
        .filter(|ram| match ram.specs.capacity {
            Some(capacity) => capacity >= min_gb,
            None => true,
        })
        .collect();
    Ok(closest_to_budget(eligible, budget))
}

fn select_gpu<R>(repo: &R, budget: f64, min_tdp: i32) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    let eligible = list_category(repo, CategorySlug::Gpu)?
        .into_iter()
        // TDP doubles as the performance floor here, so undeclared TDP
        // excludes the card.
        .filter(|gpu| gpu.tdp_or_zero() >= min_tdp)
        .collect();
    Ok(closest_to_budget(eligible, budget))
}

fn select_psu<R>(repo: &R, budget: f64, min_wattage: i32) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    let eligible = list_category(repo, CategorySlug::Psu)?
        .into_iter()
        .filter(|psu| psu.psu_wattage_or_zero() >= min_wattage)
        .collect();
    Ok(closest_to_budget(eligible, budget))
}

fn select_any<R>(repo: &R, slug: CategorySlug, budget: f64) -> ServiceResult<Option<Component>>
where
    R: ComponentReader,
{
    Ok(closest_to_budget(list_category(repo, slug)?, budget))
}

/// The greedy selection rule: the most expensive eligible component not
/// exceeding the sub-budget, otherwise the cheapest eligible one. The
/// sub-budget is a soft target, not a hard cap.
fn closest_to_budget(mut components: Vec<Component>, budget: f64) -> Option<Component> {
    if components.is_empty() {
        return None;
    }

    components.sort_by(|a, b| {
        a.price
            .get()
            .partial_cmp(&b.price.get())
            .unwrap_or(Ordering::Equal)
    });

    if let Some(best) = components
        .iter()
        .rev()
        .find(|c| c.price.get() <= budget)
        .cloned()
    {
        return Some(best);
    }

    components.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::ComponentSpecs;
    use crate::domain::types::{
        CategoryId, ComponentId, ComponentName, ComponentPrice, Watts,
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

    fn cpu(id: i32, price: f64, socket: &str, tdp: i32, cores: u32) -> Component {
        let mut c = component(id, CategorySlug::Cpu, price);
        c.socket = Some(Socket::new(socket).unwrap());
        c.tdp = Some(Watts::new(tdp).unwrap());
        c.specs = ComponentSpecs {
            cores: Some(cores),
            ..ComponentSpecs::default()
        };
        c
    }

    fn motherboard(id: i32, price: f64, socket: &str, ram_type: &str) -> Component {
        let mut c = component(id, CategorySlug::Motherboard, price);
        c.socket = Some(Socket::new(socket).unwrap());
        c.ram_type = Some(RamType::new(ram_type).unwrap());
        c
    }

    fn ram(id: i32, price: f64, ram_type: &str, capacity: u32) -> Component {
        let mut c = component(id, CategorySlug::Ram, price);
        c.ram_type = Some(RamType::new(ram_type).unwrap());
        c.specs = ComponentSpecs {
            capacity: Some(capacity),
            ..ComponentSpecs::default()
        };
        c
    }

    fn gpu(id: i32, price: f64, tdp: i32) -> Component {
        let mut c = component(id, CategorySlug::Gpu, price);
        c.tdp = Some(Watts::new(tdp).unwrap());
        c
    }

    fn psu(id: i32, price: f64, wattage: i32) -> Component {
        let mut c = component(id, CategorySlug::Psu, price);
        c.psu_wattage = Some(Watts::new(wattage).unwrap());
        c
    }

    /// A small but complete catalog covering every category.
    fn catalog() -> Vec<Component> {
        vec![
            cpu(1, 4_000.0, "LGA1700", 60, 4),
            cpu(2, 9_000.0, "AM5", 105, 6),
            cpu(3, 14_000.0, "AM5", 105, 8),
            motherboard(10, 2_500.0, "LGA1700", "DDR4"),
            motherboard(11, 4_500.0, "AM5", "DDR5"),
            motherboard(12, 7_000.0, "AM5", "DDR5"),
            ram(20, 1_200.0, "DDR4", 8),
            ram(21, 3_000.0, "DDR5", 16),
            ram(22, 6_000.0, "DDR5", 32),
            gpu(30, 2_500.0, 75),
            gpu(31, 8_000.0, 120),
            gpu(32, 20_000.0, 220),
            psu(40, 1_500.0, 450),
            psu(41, 2_500.0, 650),
            psu(42, 4_500.0, 850),
            component(50, CategorySlug::Case, 1_000.0),
            component(51, CategorySlug::Storage, 800.0),
        ]
    }

    #[test]
    fn office_build_at_minimum_budget_fills_all_mandatory_categories() {
        let repo = TestRepository::new(catalog());

        let result = generate_build("office", 10_000, &repo).unwrap();

        assert!(result.success, "errors: {:?}", result.errors);
        for slug in [
            CategorySlug::Cpu,
            CategorySlug::Motherboard,
            CategorySlug::Ram,
            CategorySlug::Gpu,
            CategorySlug::Psu,
        ] {
            assert!(result.build.contains_key(&slug), "missing {slug}");
        }
        assert!(result.errors.is_empty());
    }

    #[test]
    fn stats_total_matches_the_sum_of_chosen_components() {
        let repo = TestRepository::new(catalog());

        let result = generate_build("office", 10_000, &repo).unwrap();
        let stats = result.stats.unwrap();

        let expected: f64 = result.build.values().map(|c| c.price.get()).sum();
        assert_eq!(stats.total_price, expected);
        assert_eq!(
            stats.budget_used_percent,
            expected / 10_000.0 * 100.0
        );
    }

    #[test]
    fn generated_psu_covers_the_selected_draw() {
        let repo = TestRepository::new(catalog());

        let result = generate_build("gaming_aaa", 60_000, &repo).unwrap();
        assert!(result.success, "errors: {:?}", result.errors);

        let cpu = &result.build[&CategorySlug::Cpu];
        let gpu = &result.build[&CategorySlug::Gpu];
        let psu = &result.build[&CategorySlug::Psu];
        assert!(
            psu.psu_wattage_or_zero()
                >= cpu.tdp_or_zero() + gpu.tdp_or_zero() + SELECTION_PSU_HEADROOM_WATTS
        );
        assert_eq!(
            result.stats.unwrap().psu_margin,
            psu.psu_wattage_or_zero() - (cpu.tdp_or_zero() + gpu.tdp_or_zero())
        );
    }

    #[test]
    fn picks_the_best_component_the_sub_budget_affords() {
        let repo = TestRepository::new(catalog());

        // work_3d at 35000 gives the CPU a 14000 slice; the eight-core CPU
        // costs exactly that and is preferred over any cheaper pick.
        let result = generate_build("work_3d", 35_000, &repo).unwrap();
        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.build[&CategorySlug::Cpu].id, 3);
    }

    #[test]
    fn falls_back_to_the_cheapest_eligible_component_over_budget() {
        let repo = TestRepository::new(catalog());

        // office at 10000 gives the CPU 2500; the cheapest eligible CPU costs
        // 4000 and is taken anyway.
        let result = generate_build("office", 10_000, &repo).unwrap();
        assert_eq!(result.build[&CategorySlug::Cpu].id, 1);
    }

    #[test]
    fn aaa_gaming_on_a_small_budget_fails_with_a_budget_error() {
        // No GPU reaches the 150 W performance floor in this catalog.
        let mut parts = catalog();
        parts.retain(|c| c.category != CategorySlug::Gpu);
        parts.push(gpu(33, 2_500.0, 75));
        parts.push(gpu(34, 8_000.0, 120));
        let repo = TestRepository::new(parts);

        let result = generate_build("gaming_aaa", 15_000, &repo).unwrap();

        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("graphics card"));
        assert!(result.errors[0].contains("budget"));
        // The partial build is returned for diagnostics.
        assert!(result.build.contains_key(&CategorySlug::Cpu));
        assert!(result.build.contains_key(&CategorySlug::Ram));
        assert!(!result.build.contains_key(&CategorySlug::Gpu));
        assert!(result.stats.is_none());
    }

    #[test]
    fn missing_socket_match_fails_at_the_motherboard_step() {
        let mut parts = catalog();
        parts.retain(|c| {
            c.category != CategorySlug::Motherboard
                || c.socket.as_ref().map(Socket::as_str) != Some("AM5")
        });
        // Steer selection to an AM5 CPU.
        parts.retain(|c| c.category != CategorySlug::Cpu || c.id != 1);
        let repo = TestRepository::new(parts);

        let result = generate_build("cyber_sport", 30_000, &repo).unwrap();

        assert!(!result.success);
        assert!(result.errors[0].contains("AM5"));
        assert_eq!(result.build.len(), 1);
    }

    #[test]
    fn case_and_storage_are_optional() {
        let mut parts = catalog();
        parts.retain(|c| c.category != CategorySlug::Case && c.category != CategorySlug::Storage);
        let repo = TestRepository::new(parts);

        let result = generate_build("office", 20_000, &repo).unwrap();

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.build.len(), 5);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn ram_must_meet_the_profile_capacity_floor() {
        let repo = TestRepository::new(catalog());

        // work_3d demands 32 GB; the only qualifying DDR5 kit is the 32 GB one.
        let result = generate_build("work_3d", 35_000, &repo).unwrap();
        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.build[&CategorySlug::Ram].id, 22);
    }

    #[test]
    fn rejects_unknown_task_types_without_selecting_anything() {
        let repo = TestRepository::new(catalog());

        let result = generate_build("mining", 50_000, &repo).unwrap();

        assert!(!result.success);
        assert!(result.build.is_empty());
        assert!(result.errors[0].contains("Unknown task type"));
        assert!(result.errors[0].contains("office"));
    }

    #[test]
    fn rejects_budgets_below_the_floor() {
        let repo = TestRepository::new(catalog());

        let result = generate_build("office", 9_999, &repo).unwrap();

        assert!(!result.success);
        assert!(result.build.is_empty());
        assert!(result.errors[0].contains("Minimum"));
    }

    #[test]
    fn closest_to_budget_prefers_the_priciest_fit() {
        let parts = vec![
            component(1, CategorySlug::Case, 500.0),
            component(2, CategorySlug::Case, 900.0),
            component(3, CategorySlug::Case, 1_500.0),
        ];

        let chosen = closest_to_budget(parts.clone(), 1_000.0).unwrap();
        assert_eq!(chosen.id, 2);

        let fallback = closest_to_budget(parts, 100.0).unwrap();
        assert_eq!(fallback.id, 1);

        assert!(closest_to_budget(Vec::new(), 1_000.0).is_none());
    }
}
