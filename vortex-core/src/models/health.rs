use serde::{Deserialize, Serialize};

/// Component health tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health of one component (pool, cache backend, queue, store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub name: String,
    pub status: HealthStatus,
    pub detail: Option<String>,
}

impl SubsystemHealth {
    pub fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            detail: None,
        }
    }

    pub fn degraded(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Degraded,
            detail: Some(detail.into()),
        }
    }

    pub fn unhealthy(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthStatus::Unhealthy,
            detail: Some(detail.into()),
        }
    }
}

/// Aggregate component report exposed by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall: HealthStatus,
    pub subsystems: Vec<SubsystemHealth>,
}

impl HealthReport {
    /// Roll up: unhealthy if any subsystem is unhealthy, degraded if any is
    /// degraded, otherwise healthy.
    pub fn from_subsystems(subsystems: Vec<SubsystemHealth>) -> Self {
        let mut overall = HealthStatus::Healthy;
        for s in &subsystems {
            match s.status {
                HealthStatus::Unhealthy => {
                    overall = HealthStatus::Unhealthy;
                    break;
                }
                HealthStatus::Degraded => overall = HealthStatus::Degraded,
                HealthStatus::Healthy => {}
            }
        }
        Self {
            overall,
            subsystems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_subsystem_wins() {
        let report = HealthReport::from_subsystems(vec![
            SubsystemHealth::healthy("pool"),
            SubsystemHealth::degraded("cache", "backend unreachable"),
        ]);
        assert_eq!(report.overall, HealthStatus::Degraded);

        let report = HealthReport::from_subsystems(vec![
            SubsystemHealth::degraded("cache", "x"),
            SubsystemHealth::unhealthy("store", "down"),
        ]);
        assert_eq!(report.overall, HealthStatus::Unhealthy);
    }
}
