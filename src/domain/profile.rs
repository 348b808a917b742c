//! Use-case profiles driving the automatic build generator.
//!
//! Each profile carries a fixed percentage split of the total budget across
//! the seven categories plus minimum hardware requirements. The tables mirror
//! curated reference data and are compiled in rather than stored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{CategorySlug, TypeConstraintError};

/// Smallest budget the generator accepts, in currency units.
pub const MIN_BUDGET: i64 = 10_000;
/// Largest budget accepted at the API boundary.
pub const MAX_BUDGET: i64 = 500_000;

/// A named build scenario the user optimises for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    CyberSport,
    GamingAaa,
    Work3d,
    Streaming,
    Office,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        Self::CyberSport,
        Self::GamingAaa,
        Self::Work3d,
        Self::Streaming,
        Self::Office,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CyberSport => "cyber_sport",
            Self::GamingAaa => "gaming_aaa",
            Self::Work3d => "work_3d",
            Self::Streaming => "streaming",
            Self::Office => "office",
        }
    }

    /// Percentage split of the total budget for this profile.
    pub const fn budget_template(self) -> BudgetTemplate {
        match self {
            Self::CyberSport => BudgetTemplate {
                cpu: 35,
                motherboard: 12,
                ram: 15,
                gpu: 25,
                psu: 8,
                case: 3,
                storage: 2,
            },
            Self::GamingAaa => BudgetTemplate {
                cpu: 20,
                motherboard: 12,
                ram: 12,
                gpu: 45,
                psu: 7,
                case: 2,
                storage: 2,
            },
            Self::Work3d => BudgetTemplate {
                cpu: 40,
                motherboard: 12,
                ram: 20,
                gpu: 20,
                psu: 5,
                case: 2,
                storage: 1,
            },
            Self::Streaming => BudgetTemplate {
                cpu: 30,
                motherboard: 12,
                ram: 15,
                gpu: 30,
                psu: 8,
                case: 3,
                storage: 2,
            },
            Self::Office => BudgetTemplate {
                cpu: 25,
                motherboard: 15,
                ram: 20,
                gpu: 15,
                psu: 10,
                case: 10,
                storage: 5,
            },
        }
    }

    /// Minimum hardware thresholds for this profile.
    pub const fn min_requirements(self) -> MinRequirements {
        match self {
            Self::CyberSport => MinRequirements {
                ram_min_gb: 16,
                cpu_min_cores: 6,
                gpu_tdp_min: 100,
            },
            Self::GamingAaa => MinRequirements {
                ram_min_gb: 16,
                cpu_min_cores: 8,
                gpu_tdp_min: 150,
            },
            Self::Work3d => MinRequirements {
                ram_min_gb: 32,
                cpu_min_cores: 8,
                gpu_tdp_min: 150,
            },
            Self::Streaming => MinRequirements {
                ram_min_gb: 16,
                cpu_min_cores: 8,
                gpu_tdp_min: 120,
            },
            Self::Office => MinRequirements {
                ram_min_gb: 8,
                cpu_min_cores: 4,
                gpu_tdp_min: 50,
            },
        }
    }

    /// Display metadata for pickers.
    pub const fn info(self) -> TaskTypeInfo {
        match self {
            Self::CyberSport => TaskTypeInfo {
                name: "Esports",
                description: "CS2, Dota 2, Valorant - high FPS",
                icon: "fa-gamepad",
            },
            Self::GamingAaa => TaskTypeInfo {
                name: "AAA Gaming",
                description: "Cyberpunk, GTA VI - maximum settings",
                icon: "fa-trophy",
            },
            Self::Work3d => TaskTypeInfo {
                name: "3D Work",
                description: "Blender, Maya - rendering and modelling",
                icon: "fa-cube",
            },
            Self::Streaming => TaskTypeInfo {
                name: "Streaming",
                description: "Twitch, YouTube - gaming plus broadcast",
                icon: "fa-video",
            },
            Self::Office => TaskTypeInfo {
                name: "Office Work",
                description: "Word, Excel, browser",
                icon: "fa-briefcase",
            },
        }
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TaskType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "cyber_sport" => Ok(Self::CyberSport),
            "gaming_aaa" => Ok(Self::GamingAaa),
            "work_3d" => Ok(Self::Work3d),
            "streaming" => Ok(Self::Streaming),
            "office" => Ok(Self::Office),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "task type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for TaskType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        value.as_str().to_string()
    }
}

/// Percentage of the total budget allotted to each category. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTemplate {
    pub cpu: u32,
    pub motherboard: u32,
    pub ram: u32,
    pub gpu: u32,
    pub psu: u32,
    pub case: u32,
    pub storage: u32,
}

impl BudgetTemplate {
    /// Percentage share for one category.
    pub const fn share(&self, slug: CategorySlug) -> u32 {
        match slug {
            CategorySlug::Cpu => self.cpu,
            CategorySlug::Motherboard => self.motherboard,
            CategorySlug::Ram => self.ram,
            CategorySlug::Gpu => self.gpu,
            CategorySlug::Psu => self.psu,
            CategorySlug::Case => self.case,
            CategorySlug::Storage => self.storage,
        }
    }

    /// Slice of `total` allotted to one category. Kept as a float on purpose:
    /// sub-budgets are soft targets, not rounded prices.
    pub fn sub_budget(&self, total: i64, slug: CategorySlug) -> f64 {
        (total as f64 * self.share(slug) as f64) / 100.0
    }
}

/// Minimum hardware thresholds a profile demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinRequirements {
    pub ram_min_gb: u32,
    pub cpu_min_cores: u32,
    pub gpu_tdp_min: i32,
}

/// Static display metadata for a task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskTypeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Recommended budget brackets shown alongside the task picker.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Minimal,
    Optimal,
    Progressive,
    Maximum,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 4] = [
        Self::Minimal,
        Self::Optimal,
        Self::Progressive,
        Self::Maximum,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Optimal => "optimal",
            Self::Progressive => "progressive",
            Self::Maximum => "maximum",
        }
    }

    pub const fn range(self) -> BudgetRange {
        match self {
            Self::Minimal => BudgetRange {
                name: "Minimal",
                min: 20_000,
                max: 30_000,
                recommended: 25_000,
                description: "Entry configuration for undemanding workloads",
            },
            Self::Optimal => BudgetRange {
                name: "Optimal",
                min: 35_000,
                max: 55_000,
                recommended: 45_000,
                description: "Balanced build for most games",
            },
            Self::Progressive => BudgetRange {
                name: "Progressive",
                min: 60_000,
                max: 90_000,
                recommended: 75_000,
                description: "Powerful system for AAA titles at high settings",
            },
            Self::Maximum => BudgetRange {
                name: "Maximum",
                min: 100_000,
                max: 200_000,
                recommended: 125_000,
                description: "Top-end configuration without compromise",
            },
        }
    }
}

impl Display for BudgetTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recommended budget bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetRange {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
    pub recommended: i64,
    pub description: &'static str,
}
