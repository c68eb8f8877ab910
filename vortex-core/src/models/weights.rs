use serde::{Deserialize, Serialize};

/// A named weight strategy for multi-signal fusion, plus the search depth
/// used when gathering candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    pub name: String,
    pub dense: f64,
    pub sparse: f64,
    pub splade: f64,
    pub title: f64,
    pub search_k: usize,
}

impl WeightProfile {
    pub fn named(
        name: &str,
        dense: f64,
        sparse: f64,
        splade: f64,
        title: f64,
        search_k: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            dense,
            sparse,
            splade,
            title,
            search_k,
        }
    }

    /// Evenly balanced default profile.
    pub fn balanced() -> Self {
        Self::named("balanced", 0.4, 0.2, 0.2, 0.2, 60)
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Explicit per-field overrides. Any `Some` field wins over whatever the
/// heuristic or bandit layers selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub dense: Option<f64>,
    pub sparse: Option<f64>,
    pub splade: Option<f64>,
    pub title: Option<f64>,
    pub search_k: Option<usize>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        self.dense.is_none()
            && self.sparse.is_none()
            && self.splade.is_none()
            && self.title.is_none()
            && self.search_k.is_none()
    }

    /// Apply these overrides field-by-field on top of `profile`.
    pub fn apply(&self, mut profile: WeightProfile) -> WeightProfile {
        if let Some(v) = self.dense {
            profile.dense = v;
        }
        if let Some(v) = self.sparse {
            profile.sparse = v;
        }
        if let Some(v) = self.splade {
            profile.splade = v;
        }
        if let Some(v) = self.title {
            profile.title = v;
        }
        if let Some(k) = self.search_k {
            profile.search_k = k;
        }
        if !self.is_empty() {
            profile.name = format!("{}+override", profile.name);
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_field_by_field() {
        let overrides = WeightOverrides {
            dense: Some(0.9),
            search_k: Some(10),
            ..Default::default()
        };
        let profile = overrides.apply(WeightProfile::balanced());
        assert_eq!(profile.dense, 0.9);
        assert_eq!(profile.search_k, 10);
        // Untouched fields keep the base values.
        assert_eq!(profile.sparse, 0.2);
        assert_eq!(profile.name, "balanced+override");
    }

    #[test]
    fn empty_overrides_keep_profile_name() {
        let profile = WeightOverrides::default().apply(WeightProfile::balanced());
        assert_eq!(profile.name, "balanced");
    }
}
