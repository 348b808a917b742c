//! Pairwise and whole-build compatibility rules.
//!
//! Two policies coexist on purpose. Candidate filtering is null-lenient: a
//! missing socket/RAM type/TDP never blocks a selection, so users are not
//! locked out by incomplete catalog data. The whole-build validator compares
//! stored values directly, so a populated field on one side and `None` on the
//! other is reported as a contradiction. Filtering keeps the UX permissive;
//! validation is the final word before a build may be saved.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::component::Component;
use crate::domain::types::{CategorySlug, RamType, Socket};

/// Wattage headroom added on top of CPU + GPU draw when checking a PSU.
pub const PSU_HEADROOM_WATTS: i32 = 100;

/// Components already chosen for a build, keyed by their category.
pub type SelectedByCategory = HashMap<CategorySlug, Component>;

/// Group components by category; on duplicates the last one wins.
pub fn index_by_category(components: Vec<Component>) -> SelectedByCategory {
    components.into_iter().map(|c| (c.category, c)).collect()
}

/// Combined TDP of the selected CPU and GPU, missing values counted as zero.
pub fn cpu_gpu_tdp(selected: &SelectedByCategory) -> i32 {
    selected
        .get(&CategorySlug::Cpu)
        .map(Component::tdp_or_zero)
        .unwrap_or(0)
        + selected
            .get(&CategorySlug::Gpu)
            .map(Component::tdp_or_zero)
            .unwrap_or(0)
}

/// Decide whether `candidate` may join a build containing `selected`.
///
/// The check is one-directional: it answers "can this component of its
/// category be added", consulting only the categories that constrain it.
pub fn candidate_is_compatible(candidate: &Component, selected: &SelectedByCategory) -> bool {
    match candidate.category {
        CategorySlug::Cpu => {
            if let Some(motherboard) = selected.get(&CategorySlug::Motherboard)
                && let (Some(mb_socket), Some(cpu_socket)) =
                    (&motherboard.socket, &candidate.socket)
            {
                return mb_socket == cpu_socket;
            }
            true
        }
        CategorySlug::Motherboard => {
            if let Some(cpu) = selected.get(&CategorySlug::Cpu)
                && let (Some(cpu_socket), Some(mb_socket)) = (&cpu.socket, &candidate.socket)
                && cpu_socket != mb_socket
            {
                return false;
            }
            if let Some(ram) = selected.get(&CategorySlug::Ram)
                && let (Some(ram_type), Some(mb_ram_type)) = (&ram.ram_type, &candidate.ram_type)
                && ram_type != mb_ram_type
            {
                return false;
            }
            true
        }
        CategorySlug::Ram => {
            if let Some(motherboard) = selected.get(&CategorySlug::Motherboard)
                && let (Some(mb_ram_type), Some(ram_type)) =
                    (&motherboard.ram_type, &candidate.ram_type)
            {
                return mb_ram_type == ram_type;
            }
            true
        }
        CategorySlug::Psu => {
            let required = cpu_gpu_tdp(selected) + PSU_HEADROOM_WATTS;
            match candidate.psu_wattage {
                Some(wattage) => wattage.get() >= required,
                None => true,
            }
        }
        // GPU, case and storage have no cross-category axis.
        CategorySlug::Gpu | CategorySlug::Case | CategorySlug::Storage => true,
    }
}

/// Outcome of validating a fully-assembled component set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildValidation {
    pub compatible: bool,
    pub errors: Vec<String>,
}

fn socket_label(socket: Option<&Socket>) -> &str {
    socket.map(Socket::as_str).unwrap_or("unspecified")
}

fn ram_type_label(ram_type: Option<&RamType>) -> &str {
    ram_type.map(RamType::as_str).unwrap_or("unspecified")
}

/// Validate a finished set of components for internal contradictions.
///
/// All three invariants are checked and every violation is collected; the
/// result is compatible only when no error was produced.
pub fn validate_build(components: &[Component]) -> BuildValidation {
    let by_category = index_by_category(components.to_vec());
    let mut errors = Vec::new();

    if let (Some(cpu), Some(motherboard)) = (
        by_category.get(&CategorySlug::Cpu),
        by_category.get(&CategorySlug::Motherboard),
    ) && cpu.socket != motherboard.socket
    {
        errors.push(format!(
            "CPU (socket {}) is incompatible with the motherboard (socket {})",
            socket_label(cpu.socket.as_ref()),
            socket_label(motherboard.socket.as_ref()),
        ));
    }

    if let (Some(ram), Some(motherboard)) = (
        by_category.get(&CategorySlug::Ram),
        by_category.get(&CategorySlug::Motherboard),
    ) && ram.ram_type != motherboard.ram_type
    {
        errors.push(format!(
            "RAM ({}) is incompatible with the motherboard ({})",
            ram_type_label(ram.ram_type.as_ref()),
            ram_type_label(motherboard.ram_type.as_ref()),
        ));
    }

    if let Some(psu) = by_category.get(&CategorySlug::Psu) {
        let total_tdp = cpu_gpu_tdp(&by_category);
        let required = total_tdp + PSU_HEADROOM_WATTS;
        let wattage = psu.psu_wattage_or_zero();
        if wattage < required {
            errors.push(format!(
                "Power supply ({wattage} W) is too weak. At least {required} W recommended \
                 (system TDP {total_tdp} W + {PSU_HEADROOM_WATTS} W headroom)",
            ));
        }
    }

    BuildValidation {
        compatible: errors.is_empty(),
        errors,
    }
}

/// Sum of component prices.
pub fn total_price(components: &[Component]) -> f64 {
    components.iter().map(|c| c.price.get()).sum()
}

/// Sum of declared TDP values, missing data counted as zero.
pub fn total_tdp(components: &[Component]) -> i32 {
    components.iter().map(Component::tdp_or_zero).sum()
}
