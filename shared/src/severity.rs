use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

/// Ordinal diabetic retinopathy stage predicted by the classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    EnumCountMacro,
)]
#[serde(rename_all = "snake_case")]
pub enum SeverityClass {
    NoDr,
    Mild,
    Moderate,
    Severe,
    ProliferativeDr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            AlertLevel::Success => "alert-success",
            AlertLevel::Warning => "alert-warning",
            AlertLevel::Error => "alert-error",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub level: AlertLevel,
    /// 0 means no action, 4 means immediate medical attention.
    pub urgency: u8,
    pub headline: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SeverityInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub recommendation: Recommendation,
}

static NO_DR: SeverityInfo = SeverityInfo {
    name: "No DR",
    description: "No signs of diabetic retinopathy detected. Regular eye checkups are still recommended for diabetics.",
    color: "#2ecc71",
    recommendation: Recommendation {
        level: AlertLevel::Success,
        urgency: 0,
        headline: "No action required for diabetic retinopathy.",
        detail: "However, if you have diabetes, regular annual eye exams are still recommended.",
    },
};

static MILD: SeverityInfo = SeverityInfo {
    name: "Mild",
    description: "Mild nonproliferative retinopathy with microaneurysms only. Early stage that may not require treatment but needs monitoring.",
    color: "#f39c12",
    recommendation: Recommendation {
        level: AlertLevel::Warning,
        urgency: 1,
        headline: "Schedule a follow-up with an ophthalmologist within 6-12 months.",
        detail: "Maintain good blood sugar control to prevent progression.",
    },
};

static MODERATE: SeverityInfo = SeverityInfo {
    name: "Moderate",
    description: "Moderate nonproliferative retinopathy with more extensive vascular changes. May need treatment depending on symptoms.",
    color: "#e67e22",
    recommendation: Recommendation {
        level: AlertLevel::Warning,
        urgency: 2,
        headline: "Consult an eye specialist within 3-6 months.",
        detail: "You may need additional testing like fluorescein angiography.",
    },
};

static SEVERE: SeverityInfo = SeverityInfo {
    name: "Severe",
    description: "Severe nonproliferative retinopathy with extensive vascular damage. Usually requires prompt treatment.",
    color: "#d35400",
    recommendation: Recommendation {
        level: AlertLevel::Error,
        urgency: 3,
        headline: "Urgent consultation needed with a retina specialist within 1 month.",
        detail: "Treatment options may include laser therapy or injections.",
    },
};

static PROLIFERATIVE_DR: SeverityInfo = SeverityInfo {
    name: "Proliferative DR",
    description: "Proliferative diabetic retinopathy, the most advanced stage with new blood vessel growth. Requires immediate treatment.",
    color: "#e74c3c",
    recommendation: Recommendation {
        level: AlertLevel::Error,
        urgency: 4,
        headline: "Immediate medical attention required.",
        detail: "Contact a retina specialist immediately. Proliferative DR can lead to serious vision loss without prompt treatment.",
    },
};

impl SeverityClass {
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static SeverityInfo {
        match self {
            SeverityClass::NoDr => &NO_DR,
            SeverityClass::Mild => &MILD,
            SeverityClass::Moderate => &MODERATE,
            SeverityClass::Severe => &SEVERE,
            SeverityClass::ProliferativeDr => &PROLIFERATIVE_DR,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Class labels in model output order.
    pub fn labels() -> Vec<String> {
        Self::iter().map(|class| class.name().to_string()).collect()
    }

    pub const fn count() -> usize {
        Self::COUNT
    }
}

/// Index of the largest value; the first occurrence wins ties and NaN never wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_every_variant() {
        for (i, class) in SeverityClass::iter().enumerate() {
            assert_eq!(class.index(), i);
            assert_eq!(SeverityClass::from_index(i), Some(class));
        }
        assert_eq!(SeverityClass::from_index(5), None);
        assert_eq!(SeverityClass::count(), 5);
    }

    #[test]
    fn boundary_classes() {
        let lowest = SeverityClass::from_index(0).unwrap().info();
        assert_eq!(lowest.name, "No DR");
        assert_eq!(lowest.recommendation.level, AlertLevel::Success);
        assert!(lowest.recommendation.headline.starts_with("No action required"));

        let highest = SeverityClass::from_index(4).unwrap().info();
        assert_eq!(highest.name, "Proliferative DR");
        assert_eq!(highest.recommendation.level, AlertLevel::Error);
        assert!(highest.recommendation.headline.starts_with("Immediate medical attention"));
    }

    #[test]
    fn urgency_strictly_increases_with_severity() {
        let urgencies: Vec<u8> = SeverityClass::iter()
            .map(|c| c.info().recommendation.urgency)
            .collect();
        assert_eq!(urgencies, vec![0, 1, 2, 3, 4]);
        assert!(urgencies.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lookup_is_stable_across_calls() {
        for class in SeverityClass::iter() {
            assert!(std::ptr::eq(class.info(), class.info()));
            assert_eq!(class.info(), class.info());
        }
    }

    #[test]
    fn labels_follow_output_order() {
        assert_eq!(
            SeverityClass::labels(),
            vec!["No DR", "Mild", "Moderate", "Severe", "Proliferative DR"]
        );
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), Some(1));
        assert_eq!(argmax(&[0.9, 0.02, 0.02, 0.03, 0.03]), Some(0));
        assert_eq!(argmax(&[0.0, 0.0, 0.0, 0.0, 1.0]), Some(4));
        assert_eq!(argmax(&[f32::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&SeverityClass::ProliferativeDr).unwrap();
        assert_eq!(json, "\"proliferative_dr\"");
    }
}
